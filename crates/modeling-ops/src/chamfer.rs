use kernel_bridge::ChamferEdge;
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::ChamferParams;
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Execute a chamfer on the first child.
///
/// Edges (declared, or all of the child's) are zipped with faces (declared,
/// or all of the child's). Pairing stops at the shorter list, so surplus
/// edges or faces are never submitted.
pub fn execute_chamfer(
    kb: &mut dyn KernelBundle,
    children: &[InputShape<'_>],
    params: &ChamferParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let base = children
        .first()
        .ok_or(ConfigurationError::NoChild)?
        .require(InputRole::Child(0))?;

    if params.distance <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "chamfer distance must be positive".to_string(),
        });
    }

    let introspect = kb.as_introspect();
    let edges = if params.edges.is_empty() {
        introspect.list_edges(base)
    } else {
        params.edges.clone()
    };
    let faces = if params.faces.is_empty() {
        introspect.list_faces(base)
    } else {
        params.faces.clone()
    };

    let distance2 = params.distance2.filter(|d| *d != 0.0);
    let pairs: Vec<ChamferEdge> = edges
        .into_iter()
        .zip(faces)
        .map(|(edge, face)| ChamferEdge {
            distance: params.distance,
            distance2,
            edge,
            face,
        })
        .collect();

    debug!(pairs = pairs.len(), asymmetric = distance2.is_some(), "chamfer");
    let shape = kb.chamfer(base, &pairs)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "chamfer")?))
}
