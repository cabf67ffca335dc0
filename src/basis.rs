use crate::space::V2D;

/*
    Node layout of the reference element. This matches the connectivity
    convention in [crate::mesh::topology] exactly; it is NOT a
    counter-clockwise loop:

    2 --------- 3
    |           |
    |           |
    0 --------- 1
*/

/// Reference-space corner associated with each shape function
pub const REFERENCE_CORNERS: [[f64; 2]; 4] =
    [[-1.0, -1.0], [1.0, -1.0], [-1.0, 1.0], [1.0, 1.0]];

/// Bilinear shape function values N0..N3 at a reference point.
/// Sums to 1 everywhere on `[-1, 1]²` and interpolates each corner.
pub fn shape_fns(at: V2D) -> [f64; 4] {
    let (xi, eta) = (at[0], at[1]);

    [
        0.25 * (1.0 - xi) * (1.0 - eta),
        0.25 * (1.0 + xi) * (1.0 - eta),
        0.25 * (1.0 - xi) * (1.0 + eta),
        0.25 * (1.0 + xi) * (1.0 + eta),
    ]
}

/// Local derivatives of the shape functions at a reference point.
/// Row 0 holds ∂N/∂ξ, row 1 holds ∂N/∂η.
pub fn shape_fn_derivs(at: V2D) -> [[f64; 4]; 2] {
    let (xi, eta) = (at[0], at[1]);

    [
        [
            -0.25 * (1.0 - eta),
            0.25 * (1.0 - eta),
            -0.25 * (1.0 + eta),
            0.25 * (1.0 + eta),
        ],
        [
            -0.25 * (1.0 - xi),
            -0.25 * (1.0 + xi),
            0.25 * (1.0 - xi),
            0.25 * (1.0 + xi),
        ],
    ]
}
