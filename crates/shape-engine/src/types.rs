use std::collections::BTreeMap;

use kernel_bridge::{KernelId, Shape};
use modeling_ops::{
    BooleanParams, ChamferParams, FilletParams, LoftParams, OffsetParams, OpError, PipeParams,
    ThickSolidParams, TransformParams,
};
use serde::{Deserialize, Serialize};
use shape_types::{FillMode, FilletShape, JoinType, LeafKind, OffsetMode, PaveFiller, TransformOp};
use slotmap::{new_key_type, SlotMap};
use uuid::Uuid;

new_key_type! {
    /// Arena key for a node. Keys of removed nodes never resolve again.
    pub struct NodeId;
    /// Handle for one installed dependency edge.
    pub struct SubscriptionHandle;
}

/// Every node of the declaration tree, keyed by `NodeId`.
#[derive(Debug, Default)]
pub struct ShapeTree {
    pub(crate) nodes: SlotMap<NodeId, Node>,
}

/// One declared operation instance.
#[derive(Debug)]
pub struct Node {
    /// Stable identifier, preserved across save/load.
    pub uid: Uuid,
    /// User-visible name.
    pub name: String,
    pub operation: Operation,
    /// Ordered children. Order is significant for booleans and lofts.
    pub children: Vec<NodeId>,
    pub parent: Option<NodeId>,
    /// Out-of-tree references, each backed by a live dependency edge.
    pub refs: BTreeMap<RefField, RefBinding>,
    pub state: ShapeState,
}

/// An explicit reference and the edge that keeps it observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefBinding {
    pub target: NodeId,
    pub handle: SubscriptionHandle,
}

/// Named slot for an out-of-tree reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefField {
    Shape1,
    Shape2,
    Spline,
    Profile,
    Target,
}

/// Computed shape of a node.
#[derive(Debug)]
pub enum ShapeState {
    /// Never built, or cleared by an incomplete declaration.
    Empty,
    Ready(Shape),
    /// The last rebuild failed. The previous shape, if any, stays usable.
    Failed {
        error: OpError,
        last_good: Option<Shape>,
    },
}

impl ShapeState {
    /// Current usable shape, including a stale one kept after a failure.
    pub fn shape(&self) -> Option<&Shape> {
        match self {
            ShapeState::Empty => None,
            ShapeState::Ready(shape) => Some(shape),
            ShapeState::Failed { last_good, .. } => last_good.as_ref(),
        }
    }

    pub fn error(&self) -> Option<&OpError> {
        match self {
            ShapeState::Failed { error, .. } => Some(error),
            ShapeState::Empty | ShapeState::Ready(_) => None,
        }
    }

    pub(crate) fn into_shape(self) -> Option<Shape> {
        match self {
            ShapeState::Empty => None,
            ShapeState::Ready(shape) => Some(shape),
            ShapeState::Failed { last_good, .. } => last_good,
        }
    }
}

/// Operation kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Leaf,
    Common,
    Cut,
    Fuse,
    Fillet,
    Chamfer,
    Offset,
    ThickSolid,
    Pipe,
    ThruSections,
    Transform,
}

/// A declared operation with its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    /// Primitive producer whose shape is published from outside.
    Leaf { kind: LeafKind },
    Common { params: BooleanParams },
    Cut { params: BooleanParams },
    Fuse { params: BooleanParams },
    Fillet { params: FilletParams },
    Chamfer { params: ChamferParams },
    Offset { params: OffsetParams },
    ThickSolid { params: ThickSolidParams },
    Pipe { params: PipeParams },
    ThruSections { params: LoftParams },
    Transform { params: TransformParams },
}

impl Operation {
    pub fn leaf(kind: LeafKind) -> Self {
        Operation::Leaf { kind }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Operation::Leaf { .. } => NodeKind::Leaf,
            Operation::Common { .. } => NodeKind::Common,
            Operation::Cut { .. } => NodeKind::Cut,
            Operation::Fuse { .. } => NodeKind::Fuse,
            Operation::Fillet { .. } => NodeKind::Fillet,
            Operation::Chamfer { .. } => NodeKind::Chamfer,
            Operation::Offset { .. } => NodeKind::Offset,
            Operation::ThickSolid { .. } => NodeKind::ThickSolid,
            Operation::Pipe { .. } => NodeKind::Pipe,
            Operation::ThruSections { .. } => NodeKind::ThruSections,
            Operation::Transform { .. } => NodeKind::Transform,
        }
    }

    pub fn leaf_kind(&self) -> Option<LeafKind> {
        match self {
            Operation::Leaf { kind } => Some(*kind),
            _ => None,
        }
    }

    /// Whether this operation reads the given explicit reference.
    pub fn accepts_ref(&self, field: RefField) -> bool {
        matches!(
            (self.kind(), field),
            (
                NodeKind::Common | NodeKind::Cut | NodeKind::Fuse,
                RefField::Shape1 | RefField::Shape2
            ) | (NodeKind::Pipe, RefField::Spline | RefField::Profile)
                | (NodeKind::Transform, RefField::Target)
        )
    }

    /// Write a single parameter field.
    pub fn apply(&mut self, param: Param) -> Result<(), EngineError> {
        let kind = self.kind();
        let mismatch = EngineError::ParameterMismatch {
            kind,
            param: param.name(),
        };

        match (self, param) {
            (
                Operation::Common { params } | Operation::Cut { params } | Operation::Fuse { params },
                Param::PaveFiller(v),
            ) => params.pave_filler = v,

            (Operation::Fillet { params }, Param::Radius(v)) => params.radius = v,
            (Operation::Fillet { params }, Param::FilletShape(v)) => params.shape = v,
            (Operation::Fillet { params }, Param::Edges(v)) => params.edges = v,

            (Operation::Chamfer { params }, Param::Distance(v)) => params.distance = v,
            (Operation::Chamfer { params }, Param::Distance2(v)) => params.distance2 = v,
            (Operation::Chamfer { params }, Param::Edges(v)) => params.edges = v,
            (Operation::Chamfer { params }, Param::Faces(v)) => params.faces = v,

            (Operation::Offset { params }, p) => {
                return apply_offset(params, p).map_err(|_| mismatch);
            }
            (Operation::ThickSolid { params }, Param::ClosingFaces(v)) => {
                params.closing_faces = v
            }
            (Operation::ThickSolid { params }, p) => {
                return apply_offset(&mut params.offset, p).map_err(|_| mismatch);
            }

            (Operation::Pipe { params }, Param::FillMode(v)) => params.fill_mode = v,

            (Operation::ThruSections { params }, Param::Solid(v)) => params.solid = v,
            (Operation::ThruSections { params }, Param::Ruled(v)) => params.ruled = v,
            (Operation::ThruSections { params }, Param::Precision(v)) => params.precision = v,

            (Operation::Transform { params }, Param::TransformOps(v)) => params.operations = v,

            _ => return Err(mismatch),
        }
        Ok(())
    }
}

fn apply_offset(params: &mut OffsetParams, param: Param) -> Result<(), Param> {
    match param {
        Param::Offset(v) => params.offset = v,
        Param::Tolerance(v) => params.tolerance = v,
        Param::OffsetMode(v) => params.mode = v,
        Param::Intersection(v) => params.intersection = v,
        Param::Join(v) => params.join = v,
        other => return Err(other),
    }
    Ok(())
}

/// A new value for one parameter field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum Param {
    PaveFiller(Option<PaveFiller>),
    Radius(f64),
    FilletShape(FilletShape),
    /// Fillet or chamfer edges.
    Edges(Vec<KernelId>),
    Distance(f64),
    Distance2(Option<f64>),
    Faces(Vec<KernelId>),
    Offset(f64),
    Tolerance(Option<f64>),
    OffsetMode(OffsetMode),
    Intersection(bool),
    Join(JoinType),
    ClosingFaces(Vec<KernelId>),
    FillMode(Option<FillMode>),
    Solid(bool),
    Ruled(bool),
    Precision(f64),
    TransformOps(Vec<TransformOp>),
}

impl Param {
    pub fn name(&self) -> &'static str {
        match self {
            Param::PaveFiller(_) => "pave_filler",
            Param::Radius(_) => "radius",
            Param::FilletShape(_) => "fillet_shape",
            Param::Edges(_) => "edges",
            Param::Distance(_) => "distance",
            Param::Distance2(_) => "distance2",
            Param::Faces(_) => "faces",
            Param::Offset(_) => "offset",
            Param::Tolerance(_) => "tolerance",
            Param::OffsetMode(_) => "offset_mode",
            Param::Intersection(_) => "intersection",
            Param::Join(_) => "join",
            Param::ClosingFaces(_) => "closing_faces",
            Param::FillMode(_) => "fill_mode",
            Param::Solid(_) => "solid",
            Param::Ruled(_) => "ruled",
            Param::Precision(_) => "precision",
            Param::TransformOps(_) => "transform_ops",
        }
    }
}

/// A node whose last rebuild failed.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub node: NodeId,
    pub name: String,
    pub message: String,
}

/// Errors from the shape engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("node not found: {id:?}")]
    NodeNotFound { id: NodeId },

    #[error("parameter '{param}' does not apply to a {kind:?} node")]
    ParameterMismatch { kind: NodeKind, param: &'static str },

    #[error("a {kind:?} node has no {field:?} reference")]
    ReferenceMismatch { kind: NodeKind, field: RefField },

    #[error("cannot replace a {current:?} operation with a {requested:?} operation")]
    KindMismatch {
        current: NodeKind,
        requested: NodeKind,
    },

    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("leaf node {id:?} cannot have children")]
    LeafParent { id: NodeId },

    #[error("making {consumer:?} depend on {producer:?} would form a cycle")]
    DependencyCycle { consumer: NodeId, producer: NodeId },

    #[error("scheduler did not settle within {turns} turns")]
    SettleLimitExceeded { turns: usize },

    #[error("node {id:?} is not a leaf")]
    NotALeaf { id: NodeId },

    #[error("node {id:?} has no shape")]
    NotBuilt { id: NodeId },

    #[error(transparent)]
    Op(#[from] OpError),
}
