use crate::space::V2D;
use nalgebra::{DMatrix, SymmetricEigen};

/// The fixed integration table used by the mesh: the four 2x2 Gauss points
/// `(±1/√3, ±1/√3)` in the order `(-,-), (+,-), (+,+), (-,+)`.
///
/// No weights are stored here; callers that need a weighted rule should use
/// [QuadratureRule::gauss_legendre].
pub(crate) fn bilinear_table() -> [V2D; 4] {
    let g = 1.0 / 3.0_f64.sqrt();

    [
        V2D::from([-g, -g]),
        V2D::from([g, -g]),
        V2D::from([g, g]),
        V2D::from([-g, g]),
    ]
}

/// Tensor-product quadrature rule over the `[-1, 1]²` reference element,
/// with explicit weights
#[derive(Clone, Debug)]
pub struct QuadratureRule {
    pub points: Vec<V2D>,
    pub weights: Vec<f64>,
}

impl QuadratureRule {
    /// n by n Gauss-Legendre rule; exact for polynomials of degree `2n - 1`
    /// along each axis
    pub fn gauss_legendre(n: usize) -> Self {
        let (points_1d, weights_1d) = gauss_quadrature_points(n);

        let mut points = Vec::with_capacity(n * n);
        let mut weights = Vec::with_capacity(n * n);
        for (v, w_v) in points_1d.iter().zip(weights_1d.iter()) {
            for (u, w_u) in points_1d.iter().zip(weights_1d.iter()) {
                points.push(V2D::from([*u, *v]));
                weights.push(w_u * w_v);
            }
        }

        Self { points, weights }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Weighted sum of `integrand` over the rule's points
    pub fn integrate<F>(&self, integrand: F) -> f64
    where
        F: Fn(V2D) -> f64,
    {
        self.points
            .iter()
            .zip(self.weights.iter())
            .map(|(point, weight)| integrand(*point) * weight)
            .sum()
    }
}

// https://en.wikipedia.org/wiki/Gaussian_quadrature#Gauss%E2%80%93Legendre_quadrature
// Golub-Welsch: the eigenvalues of the symmetric tri-diagonal Jacobi matrix
// are the quadrature points; the squared first components of the normalized
// eigenvectors (times 2) are the weights.
fn gauss_quadrature_points(n: usize) -> (Vec<f64>, Vec<f64>) {
    assert!(n >= 1, "Quadrature rules need at least one point!");

    let betas: Vec<f64> = (1..n)
        .map(|i| 0.5 / (1.0 - (2.0 * i as f64).powi(-2)).sqrt())
        .collect();

    let jacobi: DMatrix<f64> = DMatrix::from_fn(n, n, |r, c| {
        if r == c + 1 {
            betas[c]
        } else if c == r + 1 {
            betas[r]
        } else {
            0.0
        }
    });

    let eigen_decomp = SymmetricEigen::new(jacobi);

    let mut point_weight_pairs: Vec<(f64, f64)> = eigen_decomp
        .eigenvalues
        .iter()
        .copied()
        .zip(
            eigen_decomp
                .eigenvectors
                .row(0)
                .iter()
                .map(|component| component.powi(2) * 2.0),
        )
        .collect();

    point_weight_pairs.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

    point_weight_pairs.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const GLQ_ACCURACY: f64 = 1e-12;

    #[test]
    fn two_point_rule_matches_fixed_table() {
        let (points, weights) = gauss_quadrature_points(2);
        let g = 1.0 / 3.0_f64.sqrt();

        assert_relative_eq!(points[0], -g, epsilon = GLQ_ACCURACY);
        assert_relative_eq!(points[1], g, epsilon = GLQ_ACCURACY);
        assert_relative_eq!(weights[0], 1.0, epsilon = GLQ_ACCURACY);
        assert_relative_eq!(weights[1], 1.0, epsilon = GLQ_ACCURACY);

        // the mesh's fixed table is exactly this rule's point set
        let table = bilinear_table();
        let rule = QuadratureRule::gauss_legendre(2);
        for table_point in table.iter() {
            assert!(rule.points.iter().any(|rule_point| {
                (rule_point[0] - table_point[0]).abs() < GLQ_ACCURACY
                    && (rule_point[1] - table_point[1]).abs() < GLQ_ACCURACY
            }));
        }
    }

    #[test]
    fn fixed_table_ordering() {
        let table = bilinear_table();

        let signs = [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]];
        for (point, sign) in table.iter().zip(signs.iter()) {
            assert!(point[0] * sign[0] > 0.0);
            assert!(point[1] * sign[1] > 0.0);
            assert_relative_eq!(point[0].abs(), 1.0 / 3.0_f64.sqrt());
        }
    }

    #[test]
    fn weights_sum_to_cell_measure() {
        for n in 1..=6 {
            let rule = QuadratureRule::gauss_legendre(n);
            assert_eq!(rule.len(), n * n);

            let measure: f64 = rule.weights.iter().sum();
            assert_relative_eq!(measure, 4.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn integrates_polynomials_exactly() {
        let rule = QuadratureRule::gauss_legendre(2);

        // ∫∫ ξ²η² over [-1,1]² = 4/9
        let quartic = rule.integrate(|p| p[0].powi(2) * p[1].powi(2));
        assert_relative_eq!(quartic, 4.0 / 9.0, epsilon = 1e-12);

        // odd powers vanish by symmetry
        let cubic = rule.integrate(|p| p[0].powi(3) * p[1]);
        assert_relative_eq!(cubic, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn five_point_rule_is_symmetric() {
        let (points, weights) = gauss_quadrature_points(5);

        assert_relative_eq!(points[2], 0.0, epsilon = 1e-12);
        for i in 0..5 {
            assert_relative_eq!(points[i], -points[4 - i], epsilon = 1e-12);
            assert_relative_eq!(weights[i], weights[4 - i], epsilon = 1e-12);
        }
    }
}
