use serde::{Deserialize, Serialize};

/// Binary boolean combination supplied by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BooleanKind {
    Common,
    Cut,
    Fuse,
}

/// Refinement options forwarded to the kernel's boolean builder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaveFiller {
    /// Additional tolerance used to glue nearly-coincident entities.
    pub fuzzy_value: f64,
    /// Allow the kernel to run intersection in parallel.
    pub parallel: bool,
    /// Keep the argument shapes unmodified.
    pub non_destructive: bool,
}

impl Default for PaveFiller {
    fn default() -> Self {
        Self {
            fuzzy_value: 0.0,
            parallel: false,
            non_destructive: false,
        }
    }
}

/// Cross-section law used by the kernel fillet builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FilletShape {
    #[default]
    Rational,
    Angular,
    Polynomial,
}

/// How an offset shape treats its faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OffsetMode {
    #[default]
    Skin,
    Pipe,
    RectoVerso,
}

/// How offset curves and faces are joined at corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JoinType {
    #[default]
    Arc,
    Tangent,
    Intersection,
}

/// Trihedron law controlling how a pipe sweep orients its profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FillMode {
    CorrectedFrenet,
    Fixed,
    Frenet,
    ConstantNormal,
    Darboux,
    GuideAc,
    GuidePlan,
    GuideAcContact,
    GuidePlanContact,
    DiscreteTrihedron,
}

impl FillMode {
    pub const ALL: [FillMode; 10] = [
        FillMode::CorrectedFrenet,
        FillMode::Fixed,
        FillMode::Frenet,
        FillMode::ConstantNormal,
        FillMode::Darboux,
        FillMode::GuideAc,
        FillMode::GuidePlan,
        FillMode::GuideAcContact,
        FillMode::GuidePlanContact,
        FillMode::DiscreteTrihedron,
    ];
}

/// What a leaf producer emits. Loft membership and the planar offset
/// path are chosen from this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LeafKind {
    Vertex,
    Wire,
    /// A wire still being assembled by its producer.
    WireBuilder,
    Face,
    Solid,
}
