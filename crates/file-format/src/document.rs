use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shape_engine::{Operation, RefField};
use uuid::Uuid;

use crate::metadata::ProjectMetadata;

/// Format identifier written to every document.
pub const FORMAT_ID: &str = "shape-tree";

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level file structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Project metadata.
    pub project: ProjectMetadata,
    /// Every declared node. Shapes are never stored.
    pub nodes: Vec<NodeRecord>,
}

/// One node of the declaration tree, linked to others by uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub uid: Uuid,
    pub name: String,
    pub operation: Operation,
    /// Children in declared order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Uuid>,
    /// Explicit references by field.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub refs: BTreeMap<RefField, Uuid>,
}
