use shape_engine::EngineError;
use uuid::Uuid;

/// Errors during document loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("unknown file format: {0}")]
    UnknownFormat(String),

    #[error("file version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("node {uid} appears more than once")]
    DuplicateNode { uid: Uuid },

    #[error("node {from} refers to unknown node {to}")]
    DanglingReference { from: Uuid, to: Uuid },

    #[error("node {uid} is listed as a child of more than one node")]
    MultipleParents { uid: Uuid },

    #[error("invalid declaration tree: {0}")]
    Engine(#[from] EngineError),
}

/// Errors during document saving.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}
