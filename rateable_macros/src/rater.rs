use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::attrs::{id_field, struct_string};

pub fn derive_rater(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let kind = match struct_string(input, "rater", "kind")? {
        Some(kind) => kind,
        None => name.to_string(),
    };
    let id_field = id_field(input, "rater")?;

    Ok(quote! {
        impl #impl_generics rateable::Rater for #name #ty_generics #where_clause {
            fn rater_id(&self) -> &str {
                &self.#id_field
            }

            fn rater_kind(&self) -> &str {
                #kind
            }
        }
    })
}
