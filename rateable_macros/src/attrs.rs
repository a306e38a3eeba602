use syn::{Data, DeriveInput, Fields, Ident, LitStr};

/// Read `#[<namespace>(<key> = "...")]` from the struct-level attributes.
pub fn struct_string(input: &DeriveInput, namespace: &str, key: &str) -> syn::Result<Option<String>> {
    for attr in &input.attrs {
        if !attr.path().is_ident(namespace) {
            continue;
        }

        let mut found = None;
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident(key) {
                let value: LitStr = meta.value()?.parse()?;
                found = Some(value.value());
            }
            Ok(())
        })?;

        if found.is_some() {
            return Ok(found);
        }
    }

    Ok(None)
}

/// Find the field marked `#[<namespace>(id)]`, falling back to a field named `id`.
pub fn id_field(input: &DeriveInput, namespace: &str) -> syn::Result<Ident> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("{} derive only supports structs", namespace),
        ));
    };

    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            format!("{} derive requires named fields", namespace),
        ));
    };

    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident(namespace) {
                continue;
            }
            let mut is_id = false;
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    is_id = true;
                }
                Ok(())
            })?;
            if is_id {
                if let Some(ident) = &field.ident {
                    return Ok(ident.clone());
                }
            }
        }
    }

    for field in &fields.named {
        if let Some(ident) = &field.ident {
            if ident == "id" {
                return Ok(ident.clone());
            }
        }
    }

    Err(syn::Error::new_spanned(
        &input.ident,
        format!(
            "no field marked with #[{}(id)] and no field named `id`",
            namespace
        ),
    ))
}

pub fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case() {
        assert_eq!(to_snake_case("Post"), "post");
        assert_eq!(to_snake_case("BlogPost"), "blog_post");
        assert_eq!(to_snake_case("already_snake"), "already_snake");
    }

    #[test]
    fn explicit_id_field_wins() {
        let input: DeriveInput = syn::parse_quote! {
            #[model(collection = "articles")]
            struct Article {
                id: String,
                #[model(id)]
                slug: String,
            }
        };
        assert_eq!(id_field(&input, "model").unwrap(), "slug");
        assert_eq!(
            struct_string(&input, "model", "collection").unwrap(),
            Some("articles".to_string())
        );
    }

    #[test]
    fn falls_back_to_id_field() {
        let input: DeriveInput = syn::parse_quote! {
            struct User {
                id: String,
                name: String,
            }
        };
        assert_eq!(id_field(&input, "rater").unwrap(), "id");
        assert_eq!(struct_string(&input, "rater", "kind").unwrap(), None);
    }

    #[test]
    fn missing_id_is_an_error() {
        let input: DeriveInput = syn::parse_quote! {
            struct Anonymous {
                name: String,
            }
        };
        assert!(id_field(&input, "rater").is_err());
    }
}
