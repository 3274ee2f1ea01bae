pub mod document;
pub mod error;
pub mod health;
pub mod id;
pub mod repository;
pub mod store;

pub use document::Document;
pub use error::DataError;
pub use health::StoreHealth;
pub use id::ObjectId;
pub use repository::Repository;
pub use store::{Collection, DocumentStore};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{Collection, DataError, Document, DocumentStore, ObjectId, Repository};
}
