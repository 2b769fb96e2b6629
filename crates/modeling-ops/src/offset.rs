use kernel_bridge::{KernelId, OffsetSpec};
use shape_types::LeafKind;
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::{OffsetParams, ThickSolidParams};
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

fn offset_spec(params: &OffsetParams, options: &OpOptions) -> OffsetSpec {
    OffsetSpec {
        distance: params.offset,
        tolerance: params.tolerance.unwrap_or(options.default_tolerance),
        mode: params.mode,
        intersection: params.intersection,
        join: params.join,
    }
}

/// Execute an offset of the first child.
///
/// A wire still under construction takes the planar offset-curve path;
/// anything else is offset as a shape.
pub fn execute_offset(
    kb: &mut dyn KernelBundle,
    children: &[InputShape<'_>],
    params: &OffsetParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let child = children.first().ok_or(ConfigurationError::NoChild)?;
    let target = child.require(InputRole::Child(0))?;

    let shape = if child.leaf == Some(LeafKind::WireBuilder) {
        debug!(distance = params.offset, join = ?params.join, "planar offset");
        kb.offset_curve(target, params.join, params.offset)?
    } else {
        let spec = offset_spec(params, options);
        debug!(?spec, "shape offset");
        kb.offset_shape(target, &spec)?
    };
    Ok(OpOutcome::Built(checked(kb, shape, options, "offset")?))
}

/// Execute a thick-solid (hollowing) of the first child.
///
/// Closing faces default to the child's first face. When no face can be
/// resolved the node is left untouched and the kernel is never called.
pub fn execute_thick_solid(
    kb: &mut dyn KernelBundle,
    children: &[InputShape<'_>],
    params: &ThickSolidParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let target = children
        .first()
        .ok_or(ConfigurationError::NoChild)?
        .require(InputRole::Child(0))?;

    let faces: Vec<KernelId> = if params.closing_faces.is_empty() {
        kb.as_introspect()
            .list_faces(target)
            .into_iter()
            .take(1)
            .collect()
    } else {
        params.closing_faces.clone()
    };

    if faces.is_empty() {
        debug!("thick solid has no closing faces, skipping");
        return Ok(OpOutcome::Skipped);
    }

    let spec = offset_spec(&params.offset, options);
    debug!(faces = faces.len(), ?spec, "thick solid");
    let shape = kb.thick_solid(target, &faces, &spec)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "thick solid")?))
}
