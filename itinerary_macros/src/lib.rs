mod reply_schema;
mod schema_extraction;

use proc_macro::TokenStream;

/// Marks a struct as the expected shape of a model reply.
///
/// Generates a `travel_itinerary_rs::schema::ReplySchema` impl whose JSON
/// Schema is derived once with schemars and cached for the process.
///
/// Accepts optional `name = "..."` and `description = "..."` arguments;
/// otherwise the struct ident and its doc comment are used.
#[proc_macro_attribute]
pub fn reply_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    reply_schema::reply_schema(attr, item)
}
