pub mod config;
pub mod error;
pub mod ops;
pub mod resources;
pub mod store;
pub mod validate;

pub use config::CoreConfig;
pub use error::Rejection;
pub use http::StatusCode;
pub use ops::{
    create_document, delete_document, fetch_all_documents, fetch_document, replace_document,
};
pub use resources::{MealType, ResourceKind};
pub use store::{DocumentStore, MemoryStore, StoreError};
pub use validate::{check_references, missing_required, validate_for_write, RefCheck};
