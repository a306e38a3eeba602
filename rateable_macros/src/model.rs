use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::{id_field, struct_string, to_snake_case};

pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Default: snake_case struct name + "s"
    let collection = match struct_string(input, "model", "collection")? {
        Some(collection) => collection,
        None => format!("{}s", to_snake_case(&name.to_string())),
    };
    let id_field = id_field(input, "model")?;

    Ok(quote! {
        impl #impl_generics rateable::Model for #name #ty_generics #where_clause {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    })
}
