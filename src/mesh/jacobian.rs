use super::MeshError;
use crate::basis;
use crate::space::{Point, M2D, V2D};

/// Jacobian determinants below this magnitude mark an element as
/// geometrically degenerate
pub const MIN_JACOBIAN_DET: f64 = 1e-12;

#[derive(Clone, Debug)]
/// The Jacobian of the reference-to-physical map for one element at one
/// reference point, along with the global shape function derivatives
pub struct ElementDerivs {
    pub jacobian: M2D,
    /// Determinant of the Jacobian; scales the integration measure
    pub det: f64,
    /// `gradients[axis][n]`: derivative of shape function `n` along physical
    /// axis 0 (x) or 1 (y)
    pub gradients: [[f64; 4]; 2],
}

/// Assemble and invert the element Jacobian at `at`, given the physical
/// coordinates of the element's four nodes in connectivity order.
pub(crate) fn evaluate(
    elem_id: usize,
    corners: &[Point; 4],
    at: V2D,
) -> Result<ElementDerivs, MeshError> {
    let local_derivs = basis::shape_fn_derivs(at);

    // J[a][b] = Σ_n dN_n/dξ_a * corner_n[b]
    let mut jac = [[0.0f64; 2]; 2];
    for (n, corner) in corners.iter().enumerate() {
        jac[0][0] += local_derivs[0][n] * corner.x;
        jac[0][1] += local_derivs[0][n] * corner.y;
        jac[1][0] += local_derivs[1][n] * corner.x;
        jac[1][1] += local_derivs[1][n] * corner.y;
    }

    let jacobian = M2D::from(jac[0], jac[1]);
    let det = jacobian.det();
    if det.abs() < MIN_JACOBIAN_DET {
        return Err(MeshError::DegenerateElement { elem_id, det });
    }

    let inverse = jacobian.inverse();
    let inverse_rows = [inverse.u, inverse.v];

    // chain rule: dN_n/dx_a = Σ_b dN_n/dξ_b * Jinv[a][b]
    let mut gradients = [[0.0f64; 4]; 2];
    for (axis, inverse_row) in inverse_rows.iter().enumerate() {
        for n in 0..4 {
            gradients[axis][n] =
                local_derivs[0][n] * inverse_row[0] + local_derivs[1][n] * inverse_row[1];
        }
    }

    Ok(ElementDerivs {
        jacobian,
        det,
        gradients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rectangle(dx: f64, dy: f64) -> [Point; 4] {
        [
            Point::new(0.0, 0.0),
            Point::new(dx, 0.0),
            Point::new(0.0, dy),
            Point::new(dx, dy),
        ]
    }

    #[test]
    fn rectangle_determinant() {
        // axis-aligned rectangle: det J = (Δx/2)(Δy/2) at every point
        let corners = rectangle(2.0, 3.0);

        for at in [
            V2D::from([0.0, 0.0]),
            V2D::from([-0.5, 0.7]),
            V2D::from([1.0, -1.0]),
        ] {
            let derivs = evaluate(0, &corners, at).unwrap();
            assert_relative_eq!(derivs.det, 1.5, epsilon = 1e-14);
            assert!(derivs.det > 0.0);
        }
    }

    #[test]
    fn rectangle_gradients_scale_local_derivatives() {
        let corners = rectangle(0.5, 0.25);
        let at = V2D::from([0.2, -0.6]);

        let derivs = evaluate(0, &corners, at).unwrap();
        let local = crate::basis::shape_fn_derivs(at);

        // Jinv is diagonal with entries 2/Δx and 2/Δy
        for n in 0..4 {
            assert_relative_eq!(derivs.gradients[0][n], local[0][n] * 4.0, epsilon = 1e-13);
            assert_relative_eq!(derivs.gradients[1][n], local[1][n] * 8.0, epsilon = 1e-13);
        }
    }

    #[test]
    fn gradients_of_linear_field_are_exact() {
        // u(x, y) = 3x + 2y interpolated at the corners must reproduce
        // its gradient at any reference point
        let corners = [
            Point::new(0.1, 0.2),
            Point::new(1.3, 0.3),
            Point::new(0.0, 1.1),
            Point::new(1.2, 1.4),
        ];
        let nodal: Vec<f64> = corners.iter().map(|p| 3.0 * p.x + 2.0 * p.y).collect();

        let derivs = evaluate(0, &corners, V2D::from([-0.3, 0.45])).unwrap();

        let du_dx: f64 = (0..4).map(|n| derivs.gradients[0][n] * nodal[n]).sum();
        let du_dy: f64 = (0..4).map(|n| derivs.gradients[1][n] * nodal[n]).sum();
        assert_relative_eq!(du_dx, 3.0, epsilon = 1e-12);
        assert_relative_eq!(du_dy, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn collapsed_element_is_degenerate() {
        let corners = [Point::new(0.5, 0.5); 4];

        match evaluate(7, &corners, V2D::from([0.0, 0.0])) {
            Err(MeshError::DegenerateElement { elem_id, det }) => {
                assert_eq!(elem_id, 7);
                assert_relative_eq!(det, 0.0);
            }
            other => panic!("expected DegenerateElement, got {:?}", other),
        }
    }

    #[test]
    fn collapsed_edge_is_degenerate() {
        // zero-width element
        let corners = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 1.0),
        ];

        assert!(matches!(
            evaluate(3, &corners, V2D::from([0.0, 0.0])),
            Err(MeshError::DegenerateElement { elem_id: 3, .. })
        ));
    }
}
