use kernel_bridge::{BooleanKind, Shape};
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::BooleanParams;
use crate::types::{InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Left-fold a boolean operation over the node's operands.
///
/// With both `shape1` and `shape2` declared the fold starts from
/// `op(shape1, shape2)` and continues over every child in order. With neither
/// declared the first two children seed the fold. A half-declared pair, an
/// unbuilt declared operand, or fewer than two operands leaves the node
/// without a shape. A lone child is not passed through: a boolean with one
/// operand is an incomplete declaration, and its result is `Cleared` without
/// a kernel call. Every input is resolved before the first kernel call.
pub fn execute_boolean(
    kb: &mut dyn KernelBundle,
    kind: BooleanKind,
    shape1: Option<InputShape<'_>>,
    shape2: Option<InputShape<'_>>,
    children: &[InputShape<'_>],
    params: &BooleanParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let (first, second, rest) = match (shape1, shape2) {
        (Some(a), Some(b)) => match (a.shape, b.shape) {
            (Some(a), Some(b)) => (a, b, 0),
            _ => {
                debug!(?kind, "declared operand not built yet");
                return Ok(OpOutcome::Cleared);
            }
        },
        (None, None) if children.len() >= 2 => (
            children[0].require(InputRole::Child(0))?,
            children[1].require(InputRole::Child(1))?,
            2,
        ),
        _ => {
            debug!(?kind, "boolean operands incomplete");
            return Ok(OpOutcome::Cleared);
        }
    };

    let tail: Vec<&Shape> = children
        .iter()
        .enumerate()
        .skip(rest)
        .map(|(i, c)| c.require(InputRole::Child(i)))
        .collect::<Result<_, _>>()?;

    let pave_filler = params.pave_filler.as_ref();
    let built = kb.boolean(kind, first, second, pave_filler)?;
    let mut acc = checked(kb, built, options, "boolean")?;

    for operand in tail {
        let next = kb.boolean(kind, &acc, operand, pave_filler);
        kb.release(acc);
        acc = checked(kb, next?, options, "boolean")?;
    }

    debug!(?kind, operands = children.len() + 2 - rest, "boolean reduced");
    Ok(OpOutcome::Built(acc))
}
