use serde::{Deserialize, Serialize};

// Re-export shared option types so kernel implementations only need this crate
pub use shape_types::{
    BooleanKind, FillMode, FilletShape, JoinType, OffsetMode, PaveFiller, Transform,
};

/// Opaque handle to a shape owned by the geometry kernel.
///
/// Deliberately not `Clone`: a handle has exactly one owner until it is
/// given back through `GeometryKernel::release`.
/// NEVER persisted. Valid only for the current kernel session.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Shape(pub(crate) u64);

impl Shape {
    /// Wrap a raw kernel identifier. Only kernel implementations should call this.
    pub fn from_raw(raw: u64) -> Self {
        Shape(raw)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Transient kernel-internal identifier for an edge or face of a shape.
/// Stable within a single kernel session but NOT across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KernelId(pub u64);

// Serialized as a bare integer so declarations stay readable
impl Serialize for KernelId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for KernelId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u64::deserialize(deserializer).map(KernelId)
    }
}

/// One `add(radius, edge)` submission to a fillet builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilletEdge {
    pub radius: f64,
    pub edge: KernelId,
}

/// One `add(distance[, distance2], edge, face)` submission to a chamfer builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamferEdge {
    pub distance: f64,
    /// Second distance for asymmetric chamfers.
    pub distance2: Option<f64>,
    pub edge: KernelId,
    pub face: KernelId,
}

/// Arguments shared by the offset-shape and thick-solid builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetSpec {
    pub distance: f64,
    pub tolerance: f64,
    pub mode: OffsetMode,
    pub intersection: bool,
    pub join: JoinType,
}

/// Arguments for the loft (thru-sections) builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoftSpec {
    pub solid: bool,
    pub ruled: bool,
    pub precision: f64,
}

/// A section handed to the loft builder, in order.
#[derive(Debug, Clone, Copy)]
pub enum LoftSection<'a> {
    Vertex(&'a Shape),
    Wire(&'a Shape),
}

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("{operation} failed: {reason}")]
    BuildFailed {
        operation: &'static str,
        reason: String,
    },

    #[error("shape not found: {id}")]
    ShapeNotFound { id: u64 },

    #[error("entity not found: {id:?}")]
    EntityNotFound { id: KernelId },

    #[error("operation not supported: {operation}")]
    NotSupported { operation: String },
}
