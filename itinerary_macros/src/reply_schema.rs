use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_named_struct, parse_reply_schema_args,
    resolve_description, resolve_schema_name,
};

pub fn reply_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match parse_reply_schema_args(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let item_struct = parse_macro_input!(item as ItemStruct);

    if let Err(err) = ensure_named_struct(&item_struct) {
        return err.to_compile_error().into();
    }

    if !item_struct.generics.params.is_empty() {
        return syn::Error::new(
            item_struct.generics.span(),
            "`#[reply_schema]` cannot be applied to generic structs",
        )
        .to_compile_error()
        .into();
    }

    let schema_name = resolve_schema_name(&item_struct, args.name.as_ref());
    let description = resolve_description(
        args.description.as_ref(),
        collect_doc_comments(&item_struct.attrs),
    );

    let description_tokens = match &description {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };

    let field_doc_tokens: Vec<_> = collect_field_docs(&item_struct)
        .iter()
        .map(|(field, doc)| {
            let field_lit = LitStr::new(field, Span::call_site());
            let doc_lit = LitStr::new(doc, Span::call_site());
            quote! { (#field_lit, #doc_lit) }
        })
        .collect();

    let ident = &item_struct.ident;

    let expanded = quote! {
        #item_struct

        impl travel_itinerary_rs::schema::ReplySchema for #ident {
            fn schema() -> &'static travel_itinerary_rs::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<travel_itinerary_rs::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    travel_itinerary_rs::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description_tokens,
                        &[#(#field_doc_tokens),*],
                    );
                    travel_itinerary_rs::schema::SchemaHandle::from_root_schema(#schema_name, root)
                })
            }
        }
    };

    expanded.into()
}
