use json::{array, JsonValue};
use std::fmt;
use std::ops::{Div, Index};

#[derive(Clone, Copy, Debug)]
/// 2D vector in reference (parametric) space
pub struct V2D {
    inner: [f64; 2],
}

impl V2D {
    pub const fn from([x, y]: [f64; 2]) -> Self {
        Self { inner: [x, y] }
    }
}

impl Default for V2D {
    fn default() -> Self {
        Self { inner: [0.0; 2] }
    }
}

impl Index<usize> for V2D {
    type Output = f64;
    fn index(&self, index: usize) -> &Self::Output {
        &self.inner[index]
    }
}

impl Div<f64> for V2D {
    type Output = Self;
    fn div(self, divisor: f64) -> Self {
        Self {
            inner: [self[0] / divisor, self[1] / divisor],
        }
    }
}

impl From<V2D> for JsonValue {
    fn from(v: V2D) -> JsonValue {
        array![v[0], v[1]]
    }
}

impl fmt::Display for V2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self[0], self[1])
    }
}

/*
    | [x1, y1] |
    | [x2, y2] |
*/

#[derive(Clone, Copy, Debug)]
/// 2 by 2 matrix. Represents the Jacobian of the reference-to-physical
/// coordinate map and its inverse
pub struct M2D {
    pub u: V2D,
    pub v: V2D,
}

impl M2D {
    pub const fn from(r0: [f64; 2], r1: [f64; 2]) -> Self {
        Self {
            u: V2D::from(r0),
            v: V2D::from(r1),
        }
    }

    #[inline]
    pub fn det(&self) -> f64 {
        self.u[0] * self.v[1] - self.u[1] * self.v[0]
    }

    /// Closed-form inverse via the adjugate. Callers must reject a
    /// near-zero determinant before dividing.
    pub fn inverse(&self) -> Self {
        Self {
            u: V2D::from([self.v[1], -1.0 * self.u[1]]),
            v: V2D::from([-1.0 * self.v[0], self.u[0]]),
        } / self.det()
    }
}

impl Div<f64> for M2D {
    type Output = Self;
    fn div(self, divisor: f64) -> Self {
        Self {
            u: self.u / divisor,
            v: self.v / divisor,
        }
    }
}

impl fmt::Display for M2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "u: [{:.5}, {:.5}]  v: [{:.5}, {:.5}]",
            self.u[0], self.u[1], self.v[0], self.v[1]
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Point in 2D physical space
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl Default for Point {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl From<Point> for JsonValue {
    fn from(p: Point) -> JsonValue {
        array![p.x, p.y]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(x: {:.10}, y: {:.10})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn determinant_and_inverse() {
        let m = M2D::from([2.0, 1.0], [0.5, 3.0]);
        assert_relative_eq!(m.det(), 5.5);

        let inv = m.inverse();
        // m * inv should be the identity
        assert_relative_eq!(m.u[0] * inv.u[0] + m.u[1] * inv.v[0], 1.0);
        assert_relative_eq!(m.u[0] * inv.u[1] + m.u[1] * inv.v[1], 0.0);
        assert_relative_eq!(m.v[0] * inv.u[0] + m.v[1] * inv.v[0], 0.0);
        assert_relative_eq!(m.v[0] * inv.u[1] + m.v[1] * inv.v[1], 1.0);
    }

    #[test]
    fn diagonal_inverse() {
        let m = M2D::from([0.5, 0.0], [0.0, 0.25]);
        let inv = m.inverse();
        assert_relative_eq!(inv.u[0], 2.0);
        assert_relative_eq!(inv.v[1], 4.0);
        assert_relative_eq!(inv.u[1], 0.0);
        assert_relative_eq!(inv.v[0], 0.0);
    }
}
