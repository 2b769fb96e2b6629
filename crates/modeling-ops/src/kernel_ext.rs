use kernel_bridge::{GeometryKernel, KernelError, KernelIntrospect, Shape};

use crate::types::{OpError, OpOptions};

/// Combined trait for operations that need both mutable GeometryKernel access
/// and read-only KernelIntrospect access on the same object.
///
/// This avoids the borrow-checker issue of needing &mut and & on the same value.
pub trait KernelBundle: GeometryKernel + KernelIntrospect {
    fn as_introspect(&self) -> &dyn KernelIntrospect;
}

// Blanket implementation for any type that implements both traits
impl<T: GeometryKernel + KernelIntrospect> KernelBundle for T {
    fn as_introspect(&self) -> &dyn KernelIntrospect {
        self
    }
}

/// Check the builder status of a freshly built shape.
///
/// With verification on, a "not done" shape is released and reported as a
/// kernel failure so it can never be published.
pub(crate) fn checked(
    kb: &mut dyn KernelBundle,
    shape: Shape,
    options: &OpOptions,
    operation: &'static str,
) -> Result<Shape, OpError> {
    if options.verify_kernel_results && !kb.as_introspect().is_done(&shape) {
        kb.release(shape);
        return Err(KernelError::BuildFailed {
            operation,
            reason: "builder did not complete".to_string(),
        }
        .into());
    }
    Ok(shape)
}
