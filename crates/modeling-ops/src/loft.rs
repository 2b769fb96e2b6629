use kernel_bridge::{LoftSection, LoftSpec};
use shape_types::LeafKind;
use tracing::debug;

use crate::kernel_ext::{checked, KernelBundle};
use crate::params::LoftParams;
use crate::types::{ConfigurationError, InputRole, InputShape, OpError, OpOptions, OpOutcome};

/// Execute a loft through the children, in declared order.
///
/// Vertex leaves become vertex sections and wire leaves become wire
/// sections. Any other child is rejected before the kernel is called.
pub fn execute_loft<'a>(
    kb: &mut dyn KernelBundle,
    children: &[InputShape<'a>],
    params: &LoftParams,
    options: &OpOptions,
) -> Result<OpOutcome, OpError> {
    if children.is_empty() {
        return Err(ConfigurationError::NoSections.into());
    }

    let mut sections: Vec<LoftSection<'a>> = Vec::with_capacity(children.len());
    for (index, child) in children.iter().enumerate() {
        let section = match child.leaf {
            Some(LeafKind::Vertex) => LoftSection::Vertex(child.require(InputRole::Child(index))?),
            Some(LeafKind::Wire | LeafKind::WireBuilder) => {
                LoftSection::Wire(child.require(InputRole::Child(index))?)
            }
            Some(LeafKind::Face | LeafKind::Solid) | None => {
                return Err(ConfigurationError::UnsupportedSection {
                    index,
                    kind: child.leaf,
                }
                .into());
            }
        };
        sections.push(section);
    }

    let spec = LoftSpec {
        solid: params.solid,
        ruled: params.ruled,
        precision: params.precision,
    };
    debug!(sections = sections.len(), ?spec, "loft");
    let shape = kb.loft(&spec, &sections)?;
    Ok(OpOutcome::Built(checked(kb, shape, options, "loft")?))
}
