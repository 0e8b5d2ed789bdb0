use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let collection = extract_collection(&input);
    let key_fields = extract_key_fields(&input);

    let key_body = if key_fields.len() == 1 {
        let field = &key_fields[0];
        quote! { ::std::string::ToString::to_string(&self.#field) }
    } else {
        quote! {
            ::accolade::composite_key(&[
                #( ::std::string::ToString::to_string(&self.#key_fields) ),*
            ])
        }
    };

    let expanded = quote! {
        impl ::accolade::Record for #name {
            const COLLECTION: &'static str = #collection;

            fn key(&self) -> String {
                #key_body
            }
        }
    };

    TokenStream::from(expanded)
}

fn extract_collection(input: &DeriveInput) -> String {
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        let mut collection = None;
        let _ = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
            }
            Ok(())
        });

        if let Some(c) = collection {
            return c;
        }
    }

    let name = input.ident.to_string();
    format!("{}s", to_snake_case(&name))
}

fn extract_key_fields(input: &DeriveInput) -> Vec<Ident> {
    let Data::Struct(data_struct) = &input.data else {
        panic!("Record derive: only structs with named fields are supported");
    };
    let Fields::Named(fields) = &data_struct.fields else {
        panic!("Record derive: only structs with named fields are supported");
    };

    let mut keys = Vec::new();
    for field in &fields.named {
        let marked = field.attrs.iter().any(|attr| {
            if !attr.path().is_ident("record") {
                return false;
            }
            let mut is_key = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    is_key = true;
                }
                Ok(())
            });
            is_key
        });
        if marked {
            if let Some(ident) = &field.ident {
                keys.push(ident.clone());
            }
        }
    }

    if keys.is_empty() {
        if let Some(ident) = fields
            .named
            .iter()
            .filter_map(|f| f.ident.as_ref())
            .find(|ident| *ident == "id")
        {
            keys.push(ident.clone());
        }
    }

    if keys.is_empty() {
        panic!("Record derive: no field marked with #[record(key)] and no field named `id`");
    }
    keys
}

fn to_snake_case(s: &str) -> String {
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
