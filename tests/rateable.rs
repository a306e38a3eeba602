mod support;

use rateable::{
    CollectionExt, DefaultRater, InMemoryModelStore, ModelStore, Rateable, Rater, RatingError,
    RatingRange,
};
use support::{Admin, Article, Comment, Post, User};

struct People {
    bob: User,
    alice: User,
    sally: User,
}

fn people() -> People {
    People {
        bob: User::new("1", "Bob"),
        alice: User::new("2", "Alice"),
        sally: User::new("3", "Sally"),
    }
}

fn rated_post(p: &People) -> Post {
    let mut post = Post::new("post-1", "Announcement");
    post.rate(1, &p.bob).unwrap();
    post
}

#[test]
fn tracks_rates() {
    let p = people();
    let mut post = rated_post(&p);
    post.rate(1, &p.sally).unwrap();

    assert_eq!(post.rates(), 2);
    assert_eq!(post.rate_count(), 2);
    assert_eq!(post.rating(), Some(1.0));
}

#[test]
fn limits_rates_by_user() {
    let p = people();
    let mut post = rated_post(&p);
    post.rate(5, &p.bob).unwrap();

    assert_eq!(post.rates(), 5);
    assert_eq!(post.rate_count(), 1);
    assert_eq!(post.user_mark(&p.bob), Some(5));
}

#[test]
fn negative_values() {
    let p = people();
    let mut post = rated_post(&p);
    post.rate(-1, &p.sally).unwrap();
    assert_eq!(post.rates(), 0);
    assert_eq!(post.rating(), Some(0.0));

    post.rate(-3, &p.sally).unwrap();
    assert_eq!(post.rates(), -2);
}

#[test]
fn rated_and_rated_by() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    assert!(!post.is_rated());

    post.rate(1, &p.bob).unwrap();
    post.rate(1, &p.alice).unwrap();

    assert!(post.is_rated());
    assert!(post.is_rated_by(&p.bob));
    assert!(post.is_rated_by(&p.alice));
    assert!(!post.is_rated_by(&p.sally));
}

#[test]
fn same_id_different_kind_is_a_different_rater() {
    let mut post = Post::new("post-1", "Announcement");
    let user = User::new("42", "Zed");
    let admin = Admin { login: "42".into() };

    post.rate(2, &user).unwrap();
    post.rate(4, &admin).unwrap();

    assert_eq!(post.rate_count(), 2);
    assert_eq!(post.user_mark(&user), Some(2));
    assert_eq!(post.user_mark(&admin), Some(4));
    assert_eq!(admin.rater_kind(), "Admin");
}

#[test]
fn unrate_removes_mark() {
    let p = people();
    let mut post = rated_post(&p);
    post.unrate(&p.bob).unwrap();

    assert_eq!(post.rate_count(), 0);
    assert_eq!(post.rates(), 0);
    assert_eq!(post.rating(), None);
    assert!(!post.is_rated());
}

#[test]
fn unrate_never_rated_is_a_noop() {
    let p = people();
    let mut post = rated_post(&p);
    post.rate(4, &p.alice).unwrap();
    let before = post.ratings.clone();

    post.unrate(&p.sally).unwrap();
    assert_eq!(post.ratings, before);
}

#[test]
fn average_rating() {
    let p = people();
    let mut post = rated_post(&p);
    post.rate(4, &p.sally).unwrap();
    assert_eq!(post.rating(), Some(2.5));
}

#[test]
fn not_rated() {
    let post = Post::new("post-1", "Announcement");
    assert_eq!(post.rates(), 0);
    assert_eq!(post.rating(), None);
    assert_eq!(post.previous_rating(), None);
    assert_eq!(post.rating_delta(), 0.0);
    assert_eq!(post.unweighted_rating(), None);
    assert_eq!(post.rate_weight(), 0);
}

#[test]
fn rating_delta_follows_each_mutation() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    post.rate(10, &p.bob).unwrap();
    post.rate(5, &p.sally).unwrap();

    assert_eq!(post.rating(), Some(7.5));
    assert_eq!(post.previous_rating(), Some(10.0));
    assert_eq!(post.rating_delta(), -2.5);

    post.unrate(&p.sally).unwrap();
    assert_eq!(post.rating(), Some(10.0));
    assert_eq!(post.previous_rating(), Some(7.5));
    assert_eq!(post.rating_delta(), 2.5);
}

#[test]
fn weighted_marks() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    post.rate_weighted(8, &p.bob, 2).unwrap();
    post.rate(-10, &p.sally).unwrap();

    assert_eq!(post.rates(), 6);
    assert_eq!(post.rate_weight(), 3);
    assert_eq!(post.rating(), Some(2.0));
    assert_eq!(post.unweighted_rating(), Some(-1.0));
}

#[test]
fn fan_out_over_raters() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    let everyone = vec![p.bob.clone(), p.alice.clone(), p.sally.clone()];

    post.rate(3, &everyone).unwrap();
    assert_eq!(post.rate_count(), 3);
    assert_eq!(post.rating(), Some(3.0));

    post.unrate(&everyone[..2]).unwrap();
    assert_eq!(post.rate_count(), 1);
    assert!(post.is_rated_by(&p.sally));
}

#[test]
fn user_marks_for_many_raters() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    post.rate(2, &p.bob).unwrap();
    post.rate(5, &p.sally).unwrap();

    let marks = post
        .user_marks(&[p.bob.clone(), p.alice.clone(), p.sally.clone()])
        .unwrap();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks.get("1"), Some(&2));
    assert_eq!(marks.get("3"), Some(&5));
    assert_eq!(marks.get("2"), None);
}

#[test]
fn user_marks_rejects_mixed_kinds() {
    let p = people();
    let post = rated_post(&p);
    let raters = [p.bob.to_rater_ref(), Admin { login: "root".into() }.to_rater_ref()];

    assert!(matches!(
        post.user_marks(&raters),
        Err(RatingError::MixedRaterKinds { .. })
    ));
}

#[test]
fn article_uses_default_range() {
    let p = people();
    let mut article = Article::new("hello-world");

    let err = article.rate(7, &p.sally).unwrap_err();
    assert_eq!(
        err,
        RatingError::OutOfRange {
            value: 7,
            range: RatingRange::new(1, 5)
        }
    );
    assert!(!article.is_rated());

    article.rate(1, &p.sally).unwrap();
    assert_eq!(article.rating(), Some(1.0));
}

#[test]
fn comment_range_and_raters() {
    let p = people();
    let mut comment = Comment::new("c-1", None);

    comment.rate(-5, &p.bob).unwrap();
    comment.rate(7, &p.alice).unwrap();
    assert_eq!(comment.rating(), Some(1.0));

    assert!(matches!(
        comment.rate(8, &p.sally),
        Err(RatingError::OutOfRange { value: 8, .. })
    ));
    assert!(matches!(
        comment.rate(1, &Admin { login: "root".into() }),
        Err(RatingError::InvalidRater { .. })
    ));
    assert_eq!(comment.rate_count(), 2);
}

#[test]
fn comment_default_rater() {
    let mut comment = Comment::new("c-1", Some("9"));
    comment.rate(6, DefaultRater).unwrap();
    assert_eq!(comment.user_mark(&User::new("9", "Author")), Some(6));

    let mut anonymous = Comment::new("c-2", None);
    assert_eq!(
        anonymous.rate(6, DefaultRater).unwrap_err(),
        RatingError::NoRaterSpecified
    );
}

#[test]
fn saved_post_reloads_with_marks() {
    let p = people();
    let store = InMemoryModelStore::new();
    let mut post = Post::new("post-1", "Announcement");
    post.rate(8, &p.bob).unwrap();
    post.rate_and_save(&store, -10, &p.sally).unwrap();

    let found = store
        .collection::<Post>()
        .find(&|post: &Post| post.name == "Announcement")
        .unwrap();
    assert_eq!(found.len(), 1);
    let found = &found[0].data;

    assert!(found.is_rated_by(&p.bob));
    assert!(found.is_rated_by(&p.sally));
    assert!(!found.is_rated_by(&p.alice));
    assert_eq!(found.rates(), -2);
    assert_eq!(found.rate_count(), 2);
    assert_eq!(found.rating(), Some(-1.0));
}

#[test]
fn legacy_document_heals_on_next_rate() {
    let store = InMemoryModelStore::new();
    let legacy = serde_json::json!({
        "id": "post-legacy",
        "name": "Old",
        "ratings": {
            "rates": 8,
            "rating": 4.0,
            "rating_marks": [
                {"mark": 3, "rater_id": "1", "rater_class": "User"},
                {"mark": 5, "rater_id": "2", "rater_class": "User"}
            ]
        }
    });
    let post: Post = serde_json::from_value(legacy).unwrap();
    store.save(&post).unwrap();

    let mut post = store.load::<Post>("post-legacy").unwrap().unwrap().data;
    assert_eq!(post.ratings.weighted_rate_count(), 0);
    assert_eq!(post.rate_weight(), 2);

    post.rate(2, &User::new("3", "Sally")).unwrap();
    assert_eq!(post.ratings.weighted_rate_count(), 3);
    assert_eq!(post.rates(), 10);
    assert_eq!(post.rating(), Some(10.0 / 3.0));
    assert_eq!(post.previous_rating(), Some(4.0));
}

#[test]
fn marks_survive_a_store_round_trip() {
    let p = people();
    let store = InMemoryModelStore::new();
    let mut post = Post::new("post-1", "Announcement");
    post.rate_weighted(4, &p.bob, 3).unwrap();
    post.rate_and_save(&store, 2, &p.alice).unwrap();

    let mut loaded = store.load::<Post>("post-1").unwrap().unwrap().data;
    loaded.rate(1, &p.bob).unwrap();

    // bob's weight-3 mark is replaced by a weight-1 mark
    assert_eq!(loaded.rates(), 3);
    assert_eq!(loaded.rate_weight(), 2);
    assert_eq!(loaded.rating(), Some(1.5));
}

#[test]
fn huge_weight_is_rejected_without_panicking() {
    let p = people();
    let mut post = rated_post(&p);
    let before = post.ratings.clone();

    assert_eq!(
        post.rate_weighted(5, &p.sally, i64::MAX).unwrap_err(),
        RatingError::Overflow {
            value: 5,
            weight: i64::MAX
        }
    );
    assert_eq!(post.ratings, before);
}

#[test]
fn overflowing_fan_out_leaves_post_untouched() {
    let p = people();
    let mut post = Post::new("post-1", "Announcement");
    post.rate(i64::MAX, &p.bob).unwrap();
    let before = post.ratings.clone();

    assert!(matches!(
        post.rate(1, &p.sally),
        Err(RatingError::Overflow { value: 1, weight: 1 })
    ));
    assert_eq!(post.ratings, before);

    let pair = [p.alice.clone(), p.sally.clone()];
    post.rate(-1, &pair).unwrap();
    let rated_twice = post.ratings.clone();

    // alice alone would fit, sally's mark then overflows
    assert!(matches!(
        post.rate(1, &pair),
        Err(RatingError::Overflow { .. })
    ));
    assert_eq!(post.ratings, rated_twice);

    post.unrate(&pair).unwrap();
    assert_eq!(post.ratings.rates(), before.rates());
    assert_eq!(post.rating(), Some(i64::MAX as f64));
}
