use kernel_bridge::Shape;
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::PipeParams;
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Execute a pipe sweep.
///
/// The spline and the profile each come from their explicit reference when
/// one is declared, otherwise from the children in order: the spline takes
/// the first child when it is not explicit, the profile takes the next one.
pub fn execute_pipe<'a>(
    kb: &mut dyn KernelBundle,
    spline: Option<InputShape<'a>>,
    profile: Option<InputShape<'a>>,
    children: &[InputShape<'a>],
    params: &PipeParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    let mut next_child = 0;
    let spline = resolve(spline, InputRole::Spline, children, &mut next_child)?;
    let profile = resolve(profile, InputRole::Profile, children, &mut next_child)?;

    debug!(fill_mode = ?params.fill_mode, "pipe");
    let shape = kb.pipe(spline, profile, params.fill_mode)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "pipe")?))
}

fn resolve<'a>(
    explicit: Option<InputShape<'a>>,
    role: InputRole,
    children: &[InputShape<'a>],
    next_child: &mut usize,
) -> Result<&'a Shape, ConfigurationError> {
    if let Some(input) = explicit {
        return input.require(role);
    }
    let index = *next_child;
    *next_child += 1;
    children
        .get(index)
        .ok_or(ConfigurationError::MissingInput { role })?
        .require(InputRole::Child(index))
}
