pub mod document;
pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use document::{DocumentFile, NodeRecord, FORMAT_ID, FORMAT_VERSION};
pub use errors::{LoadError, SaveError};
pub use load::{load_document, load_document_with_config};
pub use metadata::ProjectMetadata;
pub use save::{save_document, to_document};
