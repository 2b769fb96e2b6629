use shape_engine::Engine;
use tracing::info;

use crate::document::{DocumentFile, NodeRecord, FORMAT_ID, FORMAT_VERSION};
use crate::errors::SaveError;
use crate::metadata::ProjectMetadata;

/// Capture the engine's declaration tree as a document.
///
/// Children and references are stored by uid. Computed shapes are not
/// part of the document.
pub fn to_document(engine: &Engine, metadata: &ProjectMetadata) -> DocumentFile {
    let tree = engine.tree();
    let uid_of = |id| tree.get(id).map(|n| n.uid);

    let nodes = tree
        .iter()
        .map(|(_, node)| NodeRecord {
            uid: node.uid,
            name: node.name.clone(),
            operation: node.operation.clone(),
            children: node.children.iter().filter_map(|c| uid_of(*c)).collect(),
            refs: node
                .refs
                .iter()
                .filter_map(|(field, binding)| uid_of(binding.target).map(|uid| (*field, uid)))
                .collect(),
        })
        .collect();

    DocumentFile {
        format: FORMAT_ID.to_string(),
        version: FORMAT_VERSION,
        project: metadata.clone(),
        nodes,
    }
}

/// Serialize the engine's declaration tree to a pretty-printed JSON string.
pub fn save_document(engine: &Engine, metadata: &ProjectMetadata) -> Result<String, SaveError> {
    let file = to_document(engine, metadata);
    let json =
        serde_json::to_string_pretty(&file).map_err(|e| SaveError::Serialize(e.to_string()))?;
    info!(project = %metadata.name, nodes = file.nodes.len(), "document saved");
    Ok(json)
}
