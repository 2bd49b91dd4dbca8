//! Reply schemas: JSON Schema metadata for the structures the model is asked to return.

pub mod schema;
pub mod validation;

pub use schema::{apply_doc_comments, ReplySchema, SchemaHandle};
pub use validation::validate_against_schema;
