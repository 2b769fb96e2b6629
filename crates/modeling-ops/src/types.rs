use std::fmt;

use kernel_bridge::Shape;
use shape_types::LeafKind;

/// What a rebuild produced.
#[derive(Debug)]
pub enum OpOutcome {
    /// A fresh shape that replaces the node's previous one.
    Built(Shape),
    /// The declaration is incomplete; the node should hold no shape.
    Cleared,
    /// The declaration is incomplete; the node keeps whatever it had.
    Skipped,
}

/// A child or referenced node as an operation sees it.
#[derive(Debug, Clone, Copy)]
pub struct InputShape<'a> {
    /// Set when the input is a leaf producer.
    pub leaf: Option<LeafKind>,
    /// The input's current shape, if it has ever been built.
    pub shape: Option<&'a Shape>,
}

impl<'a> InputShape<'a> {
    /// Output of another operation node.
    pub fn built(shape: &'a Shape) -> Self {
        Self {
            leaf: None,
            shape: Some(shape),
        }
    }

    /// Output of a leaf producer.
    pub fn leaf(kind: LeafKind, shape: &'a Shape) -> Self {
        Self {
            leaf: Some(kind),
            shape: Some(shape),
        }
    }

    /// The input's shape, or an error naming the role it was needed for.
    pub fn require(&self, role: InputRole) -> Result<&'a Shape, ConfigurationError> {
        self.shape.ok_or(ConfigurationError::InputNotBuilt { role })
    }
}

/// Where an operation looked for one of its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    Child(usize),
    Shape1,
    Shape2,
    Spline,
    Profile,
    Target,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputRole::Child(i) => write!(f, "child {}", i),
            InputRole::Shape1 => f.write_str("shape1"),
            InputRole::Shape2 => f.write_str("shape2"),
            InputRole::Spline => f.write_str("spline"),
            InputRole::Profile => f.write_str("profile"),
            InputRole::Target => f.write_str("target shape"),
        }
    }
}

/// A required child or reference is missing. Fatal to the rebuild, never to the process.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("no child")]
    NoChild,

    #[error("missing {role}")]
    MissingInput { role: InputRole },

    #[error("{role} has no shape yet")]
    InputNotBuilt { role: InputRole },

    #[error("loft section {index} must be a vertex or wire (got {kind:?})")]
    UnsupportedSection {
        index: usize,
        kind: Option<LeafKind>,
    },

    #[error("loft has no sections")]
    NoSections,
}

/// Errors from modeling operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OpError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("kernel error: {0}")]
    Kernel(#[from] kernel_bridge::KernelError),

    #[error("invalid parameter: {reason}")]
    InvalidParameter { reason: String },
}

/// Settings that apply to every operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpOptions {
    /// Treat a builder that reports "not done" as a kernel failure.
    pub verify_kernel_results: bool,
    /// Tolerance used when an offset declaration does not give one.
    pub default_tolerance: f64,
}

impl Default for OpOptions {
    fn default() -> Self {
        Self {
            verify_kernel_results: true,
            default_tolerance: 1e-7,
        }
    }
}
