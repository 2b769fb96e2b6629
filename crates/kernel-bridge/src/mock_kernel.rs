//! MockKernel: deterministic test double implementing GeometryKernel + KernelIntrospect.
//!
//! Every shape carries a symbolic expression describing how it was built
//! (`cut(cut(A,B),C)`), a list of sample points that transforms act on, and
//! synthetic edge/face identifiers. Every kernel call is recorded so tests
//! can count invocations and inspect the exact arguments submitted.

use std::collections::HashMap;

use tracing::trace;

use crate::traits::{GeometryKernel, KernelIntrospect};
use crate::types::*;

/// Which builder a recorded call went to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelOp {
    Boolean,
    Fillet,
    Chamfer,
    OffsetCurve,
    OffsetShape,
    ThickSolid,
    Pipe,
    Loft,
    Transform,
}

/// Failure injected for a given builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    /// The call returns an error.
    Raise,
    /// The call returns a shape whose builder reports "not done".
    NotDone,
}

/// A recorded kernel call with the raw ids of its shape arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelCall {
    Boolean {
        kind: BooleanKind,
        a: u64,
        b: u64,
        pave_filler: Option<PaveFiller>,
    },
    Fillet {
        base: u64,
        shape: FilletShape,
        edges: Vec<FilletEdge>,
    },
    Chamfer {
        base: u64,
        edges: Vec<ChamferEdge>,
    },
    OffsetCurve {
        wire: u64,
        join: JoinType,
        distance: f64,
    },
    OffsetShape {
        shape: u64,
        spec: OffsetSpec,
    },
    ThickSolid {
        shape: u64,
        faces: Vec<KernelId>,
        spec: OffsetSpec,
    },
    Pipe {
        spline: u64,
        profile: u64,
        fill_mode: Option<FillMode>,
    },
    Loft {
        spec: LoftSpec,
        /// `(is_vertex, shape id)` per section.
        sections: Vec<(bool, u64)>,
    },
    Transform {
        shape: u64,
        matrix: Transform,
        copy: bool,
    },
}

impl KernelCall {
    pub fn op(&self) -> KernelOp {
        match self {
            KernelCall::Boolean { .. } => KernelOp::Boolean,
            KernelCall::Fillet { .. } => KernelOp::Fillet,
            KernelCall::Chamfer { .. } => KernelOp::Chamfer,
            KernelCall::OffsetCurve { .. } => KernelOp::OffsetCurve,
            KernelCall::OffsetShape { .. } => KernelOp::OffsetShape,
            KernelCall::ThickSolid { .. } => KernelOp::ThickSolid,
            KernelCall::Pipe { .. } => KernelOp::Pipe,
            KernelCall::Loft { .. } => KernelOp::Loft,
            KernelCall::Transform { .. } => KernelOp::Transform,
        }
    }
}

/// Topological nature of a mock shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockShapeKind {
    Vertex,
    Wire,
    Face,
    Solid,
}

#[derive(Debug, Clone)]
struct MockShape {
    kind: MockShapeKind,
    expr: String,
    points: Vec<[f64; 3]>,
    edges: Vec<KernelId>,
    faces: Vec<KernelId>,
    done: bool,
}

/// Deterministic test double for the geometry kernel.
pub struct MockKernel {
    next_id: u64,
    next_handle: u64,
    shapes: HashMap<u64, MockShape>,
    calls: Vec<KernelCall>,
    failures: HashMap<KernelOp, MockFailure>,
}

impl MockKernel {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_handle: 1,
            shapes: HashMap::new(),
            calls: Vec::new(),
            failures: HashMap::new(),
        }
    }

    fn alloc_ids(&mut self, count: usize) -> Vec<KernelId> {
        (0..count)
            .map(|_| {
                let id = KernelId(self.next_id);
                self.next_id += 1;
                id
            })
            .collect()
    }

    fn insert(&mut self, shape: MockShape) -> Shape {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.shapes.insert(handle, shape);
        Shape(handle)
    }

    fn get(&self, shape: &Shape) -> Result<&MockShape, KernelError> {
        self.shapes
            .get(&shape.id())
            .ok_or(KernelError::ShapeNotFound { id: shape.id() })
    }

    fn build(
        &mut self,
        kind: MockShapeKind,
        expr: String,
        points: Vec<[f64; 3]>,
        edge_count: usize,
        face_count: usize,
    ) -> MockShape {
        MockShape {
            kind,
            expr,
            points,
            edges: self.alloc_ids(edge_count),
            faces: self.alloc_ids(face_count),
            done: true,
        }
    }

    /// Record the call and apply any injected failure for its builder.
    fn record(&mut self, call: KernelCall) -> Result<Option<MockFailure>, KernelError> {
        let op = call.op();
        trace!(?op, "mock kernel call");
        self.calls.push(call);
        match self.failures.get(&op) {
            Some(MockFailure::Raise) => Err(KernelError::BuildFailed {
                operation: op_name(op),
                reason: "injected failure".to_string(),
            }),
            other => Ok(other.copied()),
        }
    }

    fn finish(&mut self, mut shape: MockShape, failure: Option<MockFailure>) -> Shape {
        if failure == Some(MockFailure::NotDone) {
            shape.done = false;
        }
        self.insert(shape)
    }

    // ── Primitive producers ────────────────────────────────────────────────

    /// Axis-aligned box from the origin to (w, h, d): 8 vertices, 12 edges, 6 faces.
    pub fn make_box(&mut self, label: &str, w: f64, h: f64, d: f64) -> Shape {
        let points = vec![
            [0.0, 0.0, 0.0],
            [w, 0.0, 0.0],
            [w, h, 0.0],
            [0.0, h, 0.0],
            [0.0, 0.0, d],
            [w, 0.0, d],
            [w, h, d],
            [0.0, h, d],
        ];
        let shape = self.build(MockShapeKind::Solid, label.to_string(), points, 12, 6);
        self.insert(shape)
    }

    pub fn make_vertex(&mut self, label: &str, position: [f64; 3]) -> Shape {
        let shape = self.build(MockShapeKind::Vertex, label.to_string(), vec![position], 0, 0);
        self.insert(shape)
    }

    /// Open polyline through `points`.
    pub fn make_wire(&mut self, label: &str, points: &[[f64; 3]]) -> Shape {
        let edges = points.len().saturating_sub(1);
        let shape = self.build(MockShapeKind::Wire, label.to_string(), points.to_vec(), edges, 0);
        self.insert(shape)
    }

    /// Planar face bounded by the closed polygon through `points`.
    pub fn make_face(&mut self, label: &str, points: &[[f64; 3]]) -> Shape {
        let edges = points.len();
        let shape = self.build(MockShapeKind::Face, label.to_string(), points.to_vec(), edges, 1);
        self.insert(shape)
    }

    // ── Test inspection ────────────────────────────────────────────────────

    /// Symbolic construction history of a shape, e.g. `cut(A,B)`.
    pub fn describe(&self, shape: &Shape) -> Option<&str> {
        self.shapes.get(&shape.id()).map(|s| s.expr.as_str())
    }

    pub fn points(&self, shape: &Shape) -> Option<&[[f64; 3]]> {
        self.shapes.get(&shape.id()).map(|s| s.points.as_slice())
    }

    pub fn shape_kind(&self, shape: &Shape) -> Option<MockShapeKind> {
        self.shapes.get(&shape.id()).map(|s| s.kind)
    }

    pub fn calls(&self) -> &[KernelCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    pub fn count_of(&self, op: KernelOp) -> usize {
        self.calls.iter().filter(|c| c.op() == op).count()
    }

    pub fn last_call(&self) -> Option<&KernelCall> {
        self.calls.last()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Make every subsequent call to `op` fail in the given way.
    pub fn fail_on(&mut self, op: KernelOp, failure: MockFailure) {
        self.failures.insert(op, failure);
    }

    pub fn clear_failures(&mut self) {
        self.failures.clear();
    }

    /// Number of shapes not yet released.
    pub fn live_shapes(&self) -> usize {
        self.shapes.len()
    }
}

impl Default for MockKernel {
    fn default() -> Self {
        Self::new()
    }
}

fn op_name(op: KernelOp) -> &'static str {
    match op {
        KernelOp::Boolean => "boolean",
        KernelOp::Fillet => "fillet",
        KernelOp::Chamfer => "chamfer",
        KernelOp::OffsetCurve => "offset curve",
        KernelOp::OffsetShape => "offset shape",
        KernelOp::ThickSolid => "thick solid",
        KernelOp::Pipe => "pipe",
        KernelOp::Loft => "loft",
        KernelOp::Transform => "transform",
    }
}

fn boolean_name(kind: BooleanKind) -> &'static str {
    match kind {
        BooleanKind::Common => "common",
        BooleanKind::Cut => "cut",
        BooleanKind::Fuse => "fuse",
    }
}

impl GeometryKernel for MockKernel {
    fn boolean(
        &mut self,
        kind: BooleanKind,
        a: &Shape,
        b: &Shape,
        pave_filler: Option<&PaveFiller>,
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::Boolean {
            kind,
            a: a.id(),
            b: b.id(),
            pave_filler: pave_filler.copied(),
        })?;
        let sa = self.get(a)?.clone();
        let sb = self.get(b)?.clone();

        let expr = format!("{}({},{})", boolean_name(kind), sa.expr, sb.expr);
        let mut points = sa.points;
        points.extend(sb.points);
        let shape = self.build(
            MockShapeKind::Solid,
            expr,
            points,
            sa.edges.len() + sb.edges.len(),
            sa.faces.len() + sb.faces.len(),
        );
        Ok(self.finish(shape, failure))
    }

    fn fillet(
        &mut self,
        base: &Shape,
        shape: FilletShape,
        edges: &[FilletEdge],
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::Fillet {
            base: base.id(),
            shape,
            edges: edges.to_vec(),
        })?;
        let source = self.get(base)?.clone();

        for fe in edges {
            if !source.edges.contains(&fe.edge) {
                return Err(KernelError::EntityNotFound { id: fe.edge });
            }
            if fe.radius <= 0.0 {
                return Err(KernelError::BuildFailed {
                    operation: "fillet",
                    reason: format!("radius {} must be positive", fe.radius),
                });
            }
        }

        let n = edges.len();
        let expr = format!("fillet({},{})", source.expr, n);
        let mut result = self.build(
            source.kind,
            expr,
            source.points,
            source.edges.len() + 2 * n,
            source.faces.len() + n,
        );
        // A builder with nothing added never reaches "done"
        result.done = n > 0;
        Ok(self.finish(result, failure))
    }

    fn chamfer(&mut self, base: &Shape, edges: &[ChamferEdge]) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::Chamfer {
            base: base.id(),
            edges: edges.to_vec(),
        })?;
        let source = self.get(base)?.clone();

        for ce in edges {
            if !source.edges.contains(&ce.edge) {
                return Err(KernelError::EntityNotFound { id: ce.edge });
            }
            if !source.faces.contains(&ce.face) {
                return Err(KernelError::EntityNotFound { id: ce.face });
            }
        }

        let n = edges.len();
        let expr = format!("chamfer({},{})", source.expr, n);
        let mut result = self.build(
            source.kind,
            expr,
            source.points,
            source.edges.len() + 2 * n,
            source.faces.len() + n,
        );
        result.done = n > 0;
        Ok(self.finish(result, failure))
    }

    fn offset_curve(
        &mut self,
        wire: &Shape,
        join: JoinType,
        distance: f64,
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::OffsetCurve {
            wire: wire.id(),
            join,
            distance,
        })?;
        let source = self.get(wire)?.clone();
        if source.kind != MockShapeKind::Wire {
            return Err(KernelError::BuildFailed {
                operation: "offset curve",
                reason: "input is not a wire".to_string(),
            });
        }

        let expr = format!("offset_curve({},{})", source.expr, distance);
        let edges = source.edges.len();
        let result = self.build(MockShapeKind::Wire, expr, source.points, edges, 0);
        Ok(self.finish(result, failure))
    }

    fn offset_shape(&mut self, shape: &Shape, spec: &OffsetSpec) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::OffsetShape {
            shape: shape.id(),
            spec: *spec,
        })?;
        let source = self.get(shape)?.clone();

        let expr = format!("offset({},{})", source.expr, spec.distance);
        let result = self.build(
            source.kind,
            expr,
            source.points,
            source.edges.len(),
            source.faces.len(),
        );
        Ok(self.finish(result, failure))
    }

    fn thick_solid(
        &mut self,
        shape: &Shape,
        closing_faces: &[KernelId],
        spec: &OffsetSpec,
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::ThickSolid {
            shape: shape.id(),
            faces: closing_faces.to_vec(),
            spec: *spec,
        })?;
        let source = self.get(shape)?.clone();

        for face in closing_faces {
            if !source.faces.contains(face) {
                return Err(KernelError::EntityNotFound { id: *face });
            }
        }

        let expr = format!("thick_solid({},{})", source.expr, closing_faces.len());
        let faces = (2 * source.faces.len()).saturating_sub(closing_faces.len());
        let result = self.build(
            MockShapeKind::Solid,
            expr,
            source.points,
            2 * source.edges.len(),
            faces,
        );
        Ok(self.finish(result, failure))
    }

    fn pipe(
        &mut self,
        spline: &Shape,
        profile: &Shape,
        fill_mode: Option<FillMode>,
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::Pipe {
            spline: spline.id(),
            profile: profile.id(),
            fill_mode,
        })?;
        let path = self.get(spline)?.clone();
        let section = self.get(profile)?.clone();
        if path.kind != MockShapeKind::Wire {
            return Err(KernelError::BuildFailed {
                operation: "pipe",
                reason: "spline is not a wire".to_string(),
            });
        }

        let kind = match section.kind {
            MockShapeKind::Vertex => MockShapeKind::Wire,
            MockShapeKind::Wire => MockShapeKind::Face,
            MockShapeKind::Face | MockShapeKind::Solid => MockShapeKind::Solid,
        };
        let expr = format!("pipe({},{})", path.expr, section.expr);
        let mut points = section.points;
        points.extend(path.points);
        let result = self.build(
            kind,
            expr,
            points,
            3 * section.edges.len(),
            section.edges.len() + 2,
        );
        Ok(self.finish(result, failure))
    }

    fn loft(
        &mut self,
        spec: &LoftSpec,
        sections: &[LoftSection<'_>],
    ) -> Result<Shape, KernelError> {
        let recorded = sections
            .iter()
            .map(|s| match s {
                LoftSection::Vertex(shape) => (true, shape.id()),
                LoftSection::Wire(shape) => (false, shape.id()),
            })
            .collect();
        let failure = self.record(KernelCall::Loft {
            spec: *spec,
            sections: recorded,
        })?;

        let mut exprs = Vec::new();
        let mut points = Vec::new();
        let mut edge_total = 0;
        let mut max_edges = 0;
        for section in sections {
            let (shape, expected) = match section {
                LoftSection::Vertex(s) => (*s, MockShapeKind::Vertex),
                LoftSection::Wire(s) => (*s, MockShapeKind::Wire),
            };
            let source = self.get(shape)?;
            if source.kind != expected {
                return Err(KernelError::BuildFailed {
                    operation: "loft",
                    reason: format!("section {} is not a {:?}", source.expr, expected),
                });
            }
            exprs.push(source.expr.clone());
            points.extend(source.points.iter().copied());
            edge_total += source.edges.len();
            max_edges = max_edges.max(source.edges.len());
        }

        let (kind, caps) = if spec.solid {
            (MockShapeKind::Solid, 2)
        } else {
            (MockShapeKind::Face, 0)
        };
        let expr = format!("loft({})", exprs.join(","));
        let mut result = self.build(kind, expr, points, edge_total, max_edges + caps);
        result.done = sections.len() >= 2;
        Ok(self.finish(result, failure))
    }

    fn transform(
        &mut self,
        shape: &Shape,
        matrix: &Transform,
        copy: bool,
    ) -> Result<Shape, KernelError> {
        let failure = self.record(KernelCall::Transform {
            shape: shape.id(),
            matrix: *matrix,
            copy,
        })?;
        let source = self.get(shape)?.clone();

        let expr = format!("transform({})", source.expr);
        let points = source
            .points
            .iter()
            .map(|p| matrix.transform_point(*p))
            .collect();
        let result = self.build(
            source.kind,
            expr,
            points,
            source.edges.len(),
            source.faces.len(),
        );
        Ok(self.finish(result, failure))
    }

    fn release(&mut self, shape: Shape) {
        self.shapes.remove(&shape.id());
    }
}

impl KernelIntrospect for MockKernel {
    fn list_edges(&self, shape: &Shape) -> Vec<KernelId> {
        self.shapes
            .get(&shape.id())
            .map(|s| s.edges.clone())
            .unwrap_or_default()
    }

    fn list_faces(&self, shape: &Shape) -> Vec<KernelId> {
        self.shapes
            .get(&shape.id())
            .map(|s| s.faces.clone())
            .unwrap_or_default()
    }

    fn is_done(&self, shape: &Shape) -> bool {
        self.shapes.get(&shape.id()).is_some_and(|s| s.done)
    }
}
