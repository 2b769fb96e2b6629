use kernel_bridge::KernelId;
use serde::{Deserialize, Serialize};
use shape_types::{FillMode, FilletShape, JoinType, OffsetMode, PaveFiller, TransformOp};

/// Parameters shared by Common, Cut and Fuse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BooleanParams {
    pub pave_filler: Option<PaveFiller>,
}

/// Parameters for a fillet operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilletParams {
    /// Uniform radius applied to every target edge.
    pub radius: f64,
    pub shape: FilletShape,
    /// Edges of the child to round. Empty means every edge.
    pub edges: Vec<KernelId>,
}

impl Default for FilletParams {
    fn default() -> Self {
        Self {
            radius: 1.0,
            shape: FilletShape::default(),
            edges: Vec::new(),
        }
    }
}

/// Parameters for a chamfer operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChamferParams {
    pub distance: f64,
    /// Second distance for an asymmetric chamfer. `None` or zero means unused.
    pub distance2: Option<f64>,
    /// Edges of the child. Empty means every edge.
    pub edges: Vec<KernelId>,
    /// Reference faces paired positionally with `edges`. Empty means every face.
    pub faces: Vec<KernelId>,
}

impl Default for ChamferParams {
    fn default() -> Self {
        Self {
            distance: 1.0,
            distance2: None,
            edges: Vec::new(),
            faces: Vec::new(),
        }
    }
}

/// Parameters for an offset operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OffsetParams {
    pub offset: f64,
    /// Falls back to the engine's default tolerance when unset.
    pub tolerance: Option<f64>,
    pub mode: OffsetMode,
    pub intersection: bool,
    pub join: JoinType,
}

impl Default for OffsetParams {
    fn default() -> Self {
        Self {
            offset: 1.0,
            tolerance: None,
            mode: OffsetMode::default(),
            intersection: false,
            join: JoinType::default(),
        }
    }
}

/// Parameters for a thick-solid operation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThickSolidParams {
    #[serde(flatten)]
    pub offset: OffsetParams,
    /// Faces left open. Empty means the child's first face.
    pub closing_faces: Vec<KernelId>,
}

/// Parameters for a pipe sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipeParams {
    pub fill_mode: Option<FillMode>,
}

/// Parameters for a loft through sections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoftParams {
    /// Build a solid rather than a shell.
    pub solid: bool,
    /// Ruled faces between consecutive sections instead of approximated ones.
    pub ruled: bool,
    pub precision: f64,
}

impl Default for LoftParams {
    fn default() -> Self {
        Self {
            solid: false,
            ruled: false,
            precision: 1e-6,
        }
    }
}

/// Parameters for a transform: the ordered op list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub operations: Vec<TransformOp>,
}
