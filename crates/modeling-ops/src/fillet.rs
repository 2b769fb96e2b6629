use kernel_bridge::FilletEdge;
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::FilletParams;
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Execute a fillet on the first child.
///
/// Targets the declared edges, or every edge of the child when none are
/// declared. Each edge is submitted with the same radius.
pub fn execute_fillet(
    kb: &mut dyn KernelBundle,
    children: &[InputShape<'_>],
    params: &FilletParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let base = children
        .first()
        .ok_or(ConfigurationError::NoChild)?
        .require(InputRole::Child(0))?;

    if params.radius <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "fillet radius must be positive".to_string(),
        });
    }

    let edges = if params.edges.is_empty() {
        kb.as_introspect().list_edges(base)
    } else {
        params.edges.clone()
    };

    let submissions: Vec<FilletEdge> = edges
        .into_iter()
        .map(|edge| FilletEdge {
            radius: params.radius,
            edge,
        })
        .collect();

    debug!(edges = submissions.len(), radius = params.radius, "fillet");
    let shape = kb.fillet(base, params.shape, &submissions)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "fillet")?))
}
