use std::collections::{HashMap, HashSet};

use shape_engine::{Engine, EngineConfig, NodeId};
use tracing::info;
use uuid::Uuid;

use crate::document::{DocumentFile, FORMAT_ID, FORMAT_VERSION};
use crate::errors::LoadError;
use crate::metadata::ProjectMetadata;

/// Deserialize a document into a fresh engine with the default configuration.
pub fn load_document(json: &str) -> Result<(Engine, ProjectMetadata), LoadError> {
    load_document_with_config(json, EngineConfig::default())
}

/// Deserialize a document into a fresh engine.
///
/// Validates the format identifier and version, restores every node under
/// its saved uid, then re-links children in order and re-installs explicit
/// references. Leaves come back without shapes and must be re-published.
pub fn load_document_with_config(
    json: &str,
    config: EngineConfig,
) -> Result<(Engine, ProjectMetadata), LoadError> {
    let raw: DocumentFile =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != FORMAT_ID {
        return Err(LoadError::UnknownFormat(raw.format));
    }
    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }
    let records = if raw.version < FORMAT_VERSION {
        crate::migrate::migrate(raw.nodes, raw.version, FORMAT_VERSION)?
    } else {
        raw.nodes
    };

    let mut engine = Engine::with_config(config);
    let mut ids: HashMap<Uuid, NodeId> = HashMap::with_capacity(records.len());
    for record in &records {
        if ids.contains_key(&record.uid) {
            return Err(LoadError::DuplicateNode { uid: record.uid });
        }
        let id = engine.add_node_with_uid(record.uid, record.name.clone(), record.operation.clone());
        ids.insert(record.uid, id);
    }

    let lookup = |from: Uuid, to: Uuid| {
        ids.get(&to)
            .copied()
            .ok_or(LoadError::DanglingReference { from, to })
    };

    let mut claimed = HashSet::new();
    for record in &records {
        let parent = lookup(record.uid, record.uid)?;
        for (index, child_uid) in record.children.iter().enumerate() {
            if !claimed.insert(*child_uid) {
                return Err(LoadError::MultipleParents { uid: *child_uid });
            }
            let child = lookup(record.uid, *child_uid)?;
            engine.attach_child(parent, child, index)?;
        }
    }

    for record in &records {
        let node = lookup(record.uid, record.uid)?;
        for (field, target_uid) in &record.refs {
            let target = lookup(record.uid, *target_uid)?;
            engine.set_explicit_ref(node, *field, Some(target))?;
        }
    }

    info!(project = %raw.project.name, nodes = records.len(), "document loaded");
    Ok((engine, raw.project))
}
