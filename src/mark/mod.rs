mod mark;
mod store;

pub use mark::Mark;
pub use store::MarkStore;
