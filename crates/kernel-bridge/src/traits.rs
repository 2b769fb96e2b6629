use crate::types::*;

/// Core geometry kernel trait: one call per operation builder.
///
/// Calls are synchronous and not reentrant. Every returned `Shape` is a new
/// value; inputs are never modified in place.
pub trait GeometryKernel {
    /// Combine two shapes, optionally refining the intersection with a pave filler.
    fn boolean(
        &mut self,
        kind: BooleanKind,
        a: &Shape,
        b: &Shape,
        pave_filler: Option<&PaveFiller>,
    ) -> Result<Shape, KernelError>;

    /// Round the given edges of `base`, one builder `add` per entry.
    fn fillet(
        &mut self,
        base: &Shape,
        shape: FilletShape,
        edges: &[FilletEdge],
    ) -> Result<Shape, KernelError>;

    /// Bevel the given edge/face pairs of `base`.
    fn chamfer(&mut self, base: &Shape, edges: &[ChamferEdge]) -> Result<Shape, KernelError>;

    /// Planar offset of a wire.
    fn offset_curve(
        &mut self,
        wire: &Shape,
        join: JoinType,
        distance: f64,
    ) -> Result<Shape, KernelError>;

    /// Offset every face of a shape.
    fn offset_shape(&mut self, shape: &Shape, spec: &OffsetSpec) -> Result<Shape, KernelError>;

    /// Hollow a solid, opening it at `closing_faces`.
    fn thick_solid(
        &mut self,
        shape: &Shape,
        closing_faces: &[KernelId],
        spec: &OffsetSpec,
    ) -> Result<Shape, KernelError>;

    /// Sweep `profile` along the `spline` wire.
    fn pipe(
        &mut self,
        spline: &Shape,
        profile: &Shape,
        fill_mode: Option<FillMode>,
    ) -> Result<Shape, KernelError>;

    /// Loft through the ordered sections.
    fn loft(&mut self, spec: &LoftSpec, sections: &[LoftSection<'_>])
        -> Result<Shape, KernelError>;

    /// Apply an affine matrix. With `copy` the source geometry is duplicated.
    fn transform(
        &mut self,
        shape: &Shape,
        matrix: &Transform,
        copy: bool,
    ) -> Result<Shape, KernelError>;

    /// Hand a superseded shape back to the kernel.
    fn release(&mut self, shape: Shape);
}

/// Topology introspection trait. Provides read-only queries on kernel shapes.
pub trait KernelIntrospect {
    /// List all edges of a shape, in topology-explorer order.
    fn list_edges(&self, shape: &Shape) -> Vec<KernelId>;

    /// List all faces of a shape, in topology-explorer order.
    fn list_faces(&self, shape: &Shape) -> Vec<KernelId>;

    /// Whether the builder that produced `shape` reported success.
    fn is_done(&self, shape: &Shape) -> bool;
}
