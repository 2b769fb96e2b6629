use shape_types::{compose, TransformOp};
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::TransformParams;
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Execute a transform.
///
/// An explicit target is transformed as a copy; otherwise the first child is
/// transformed in place. The matrix is the declared ops folded in order.
pub fn execute_transform(
    kb: &mut dyn KernelBundle,
    target: Option<InputShape<'_>>,
    children: &[InputShape<'_>],
    params: &TransformParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    validate_ops(&params.operations)?;

    let (source, copy) = match target {
        Some(input) => (input.require(InputRole::Target)?, true),
        None => (
            children
                .first()
                .ok_or(ConfigurationError::NoChild)?
                .require(InputRole::Child(0))?,
            false,
        ),
    };

    let matrix = compose(&params.operations);
    debug!(ops = params.operations.len(), copy, "transform");
    let shape = kb.transform(source, &matrix, copy)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "transform")?))
}

fn validate_ops(ops: &[TransformOp]) -> Result<(), OpError> {
    for (i, op) in ops.iter().enumerate() {
        if let Some([x, y, z]) = op.direction() {
            if (x * x + y * y + z * z).sqrt() < 1e-12 {
                return Err(OpError::InvalidParameter {
                    reason: format!("transform op {} has a zero-length axis", i),
                });
            }
        }
        if let TransformOp::Scale { factor, .. } = op {
            if factor.abs() < 1e-12 {
                return Err(OpError::InvalidParameter {
                    reason: format!("transform op {} scales by zero", i),
                });
            }
        }
    }
    Ok(())
}
