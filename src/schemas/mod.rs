pub mod handle;
pub mod validation;

pub use handle::{apply_doc_comments, schema_type_name, CompletionSchema, SchemaHandle};
pub use validation::validate_structured_payload;
