use serde::{Deserialize, Serialize};

/// A 4x4 affine transformation matrix stored in column-major order.
///
/// Points are column vectors, so `a.then(&b)` maps `p` to `a * (b * p)`:
/// the right-hand operand is applied to the point first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Column-major 4x4 matrix entries.
    pub m: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        ];
        Self { m }
    }

    pub fn uniform_scaling(s: f64) -> Self {
        #[rustfmt::skip]
        let m = [
            s,   0.0, 0.0, 0.0,
            0.0, s,   0.0, 0.0,
            0.0, 0.0, s,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        Self { m }
    }

    /// Rotation around an axis through the origin by `angle` radians (Rodrigues' formula).
    ///
    /// A zero-length axis yields the identity.
    pub fn rotation_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let Some([x, y, z]) = normalize(axis) else {
            return Self::identity();
        };
        let c = angle.cos();
        let s = angle.sin();
        let t = 1.0 - c;

        #[rustfmt::skip]
        let m = [
            t*x*x + c,     t*x*y + s*z,   t*x*z - s*y,   0.0,
            t*x*y - s*z,   t*y*y + c,     t*y*z + s*x,   0.0,
            t*x*z + s*y,   t*y*z - s*x,   t*z*z + c,     0.0,
            0.0,            0.0,            0.0,            1.0,
        ];
        Self { m }
    }

    /// Rotation around the axis through `point` along `direction`.
    pub fn rotation_about(point: [f64; 3], direction: [f64; 3], angle: f64) -> Self {
        Self::about_point(point, Self::rotation_axis_angle(direction, angle))
    }

    /// Axial symmetry: a half turn around the axis through `point` along `direction`.
    pub fn mirror_axis(point: [f64; 3], direction: [f64; 3]) -> Self {
        Self::rotation_about(point, direction, std::f64::consts::PI)
    }

    /// Uniform scale by `factor` with `point` held fixed.
    pub fn scaling_about(point: [f64; 3], factor: f64) -> Self {
        Self::about_point(point, Self::uniform_scaling(factor))
    }

    fn about_point(point: [f64; 3], linear: Transform) -> Self {
        let [px, py, pz] = point;
        Self::translation(px, py, pz)
            .then(&linear)
            .then(&Self::translation(-px, -py, -pz))
    }

    /// Matrix element access (row, col), 0-indexed.
    fn at(&self, row: usize, col: usize) -> f64 {
        self.m[col * 4 + row]
    }

    /// Transform a point (applies translation).
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        for (row, value) in out.iter_mut().enumerate() {
            *value = self.at(row, 0) * p[0]
                + self.at(row, 1) * p[1]
                + self.at(row, 2) * p[2]
                + self.at(row, 3);
        }
        out
    }

    /// Compose two transforms: self * other.
    pub fn then(&self, other: &Transform) -> Transform {
        let mut result = [0.0f64; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * other.at(k, col);
                }
                result[col * 4 + row] = sum;
            }
        }
        Transform { m: result }
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Transform, tol: f64) -> bool {
        self.m
            .iter()
            .zip(other.m.iter())
            .all(|(a, b)| (a - b).abs() <= tol)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn normalize(v: [f64; 3]) -> Option<[f64; 3]> {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len < 1e-12 {
        return None;
    }
    Some([v[0] / len, v[1] / len, v[2] / len])
}

fn origin() -> [f64; 3] {
    [0.0, 0.0, 0.0]
}

fn z_axis() -> [f64; 3] {
    [0.0, 0.0, 1.0]
}

/// One step of a declared transform sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformOp {
    Translate {
        x: f64,
        y: f64,
        z: f64,
    },
    Rotate {
        #[serde(default = "origin")]
        point: [f64; 3],
        #[serde(default = "z_axis")]
        direction: [f64; 3],
        /// Radians.
        angle: f64,
    },
    Mirror {
        #[serde(default = "origin")]
        point: [f64; 3],
        direction: [f64; 3],
    },
    Scale {
        #[serde(default = "origin")]
        point: [f64; 3],
        factor: f64,
    },
}

impl TransformOp {
    pub fn translate(x: f64, y: f64, z: f64) -> Self {
        TransformOp::Translate { x, y, z }
    }

    /// Rotation about an axis through the origin.
    pub fn rotate(direction: [f64; 3], angle: f64) -> Self {
        TransformOp::Rotate {
            point: origin(),
            direction,
            angle,
        }
    }

    pub fn scale(factor: f64) -> Self {
        TransformOp::Scale {
            point: origin(),
            factor,
        }
    }

    /// The axis direction this op depends on, if any.
    pub fn direction(&self) -> Option<[f64; 3]> {
        match self {
            TransformOp::Rotate { direction, .. } | TransformOp::Mirror { direction, .. } => {
                Some(*direction)
            }
            TransformOp::Translate { .. } | TransformOp::Scale { .. } => None,
        }
    }

    pub fn to_matrix(&self) -> Transform {
        match *self {
            TransformOp::Translate { x, y, z } => Transform::translation(x, y, z),
            TransformOp::Rotate {
                point,
                direction,
                angle,
            } => Transform::rotation_about(point, direction, angle),
            TransformOp::Mirror { point, direction } => Transform::mirror_axis(point, direction),
            TransformOp::Scale { point, factor } => Transform::scaling_about(point, factor),
        }
    }
}

/// Fold a declared op list into one matrix by right-multiplication in
/// declared order: `M = I; for op in ops { M = M * T(op) }`.
pub fn compose(ops: &[TransformOp]) -> Transform {
    ops.iter()
        .fold(Transform::identity(), |acc, op| acc.then(&op.to_matrix()))
}
