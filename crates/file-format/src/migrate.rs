use tracing::debug;

use crate::document::NodeRecord;
use crate::errors::LoadError;

/// Bring node records written by an older format version up to `target`.
///
/// Steps run one version at a time. Version 1 is the first published
/// layout, so there is no step to run yet and every older version fails.
pub fn migrate(
    mut records: Vec<NodeRecord>,
    from: u32,
    target: u32,
) -> Result<Vec<NodeRecord>, LoadError> {
    let mut version = from;
    while version < target {
        records = upgrade_step(records, version).map_err(|reason| LoadError::MigrationFailed {
            from,
            to: target,
            reason,
        })?;
        version += 1;
        debug!(version, "node records migrated");
    }
    if version != target {
        return Err(LoadError::MigrationFailed {
            from,
            to: target,
            reason: format!("cannot downgrade v{from} records"),
        });
    }
    Ok(records)
}

fn upgrade_step(_records: Vec<NodeRecord>, version: u32) -> Result<Vec<NodeRecord>, String> {
    Err(format!("no upgrade from v{version} to v{}", version + 1))
}
