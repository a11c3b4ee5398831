//! Interpolating B-splines of degree 1, 2 and 3.
//!
//! Knots follow the usual scientific-computing conventions for interpolation through `n`
//! nodes: odd degrees use not-a-knot end conditions (interior knots at the nodes, skipping
//! `(k - 1) / 2` nodes at each end) and degree 2 places interior knots halfway between
//! nodes, dropping the first and last midpoint. Both ends are clamped.

use crate::interpolation::error::InterpolationError;
use crate::types::interpolation_method::InterpolationMethod;

/// A spline basis over fixed nodes, with its collocation system already factorized.
///
/// Fitting different value sets over the same nodes only costs a triangular solve.
#[derive(Debug, Clone)]
pub struct InterpolatingSpline {
    degree: usize,
    nodes: Vec<f64>,
    knots: Vec<f64>,
    collocation: LuFactors,
}

impl InterpolatingSpline {
    /// Builds the spline basis for strictly increasing `nodes`.
    pub fn new(nodes: &[f64], method: InterpolationMethod) -> Result<Self, InterpolationError> {
        let degree = method.degree();
        // degree 2 drops two midpoints, so it needs one node more than the others
        let required = if degree == 2 { 4 } else { degree + 1 };
        if nodes.len() < required {
            return Err(InterpolationError::TooFewNodes {
                degree,
                required,
                found: nodes.len(),
            });
        }

        let knots = knot_vector(nodes, degree);
        let count = nodes.len();
        let mut matrix = vec![0.0; count * count];
        for (row, &x) in nodes.iter().enumerate() {
            let span = find_span(&knots, degree, count, x);
            for (offset, weight) in basis_functions(&knots, degree, span, x)
                .into_iter()
                .enumerate()
            {
                matrix[row * count + span - degree + offset] = weight;
            }
        }

        Ok(Self {
            degree,
            nodes: nodes.to_vec(),
            knots,
            collocation: LuFactors::decompose(matrix, count)?,
        })
    }

    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Prepares evaluation at `targets`; the result can be applied to many value sets.
    pub fn at(&self, targets: &[f64]) -> SplineEvaluator<'_> {
        let count = self.nodes.len();
        let samples = targets
            .iter()
            .map(|&x| {
                match self.nodes.binary_search_by(|node| node.total_cmp(&x)) {
                    // nodes are reproduced exactly
                    Ok(node) => Sample::Node(node),
                    Err(_) => {
                        let span = find_span(&self.knots, self.degree, count, x);
                        Sample::Span {
                            first: span - self.degree,
                            weights: basis_functions(&self.knots, self.degree, span, x),
                        }
                    }
                }
            })
            .collect();
        SplineEvaluator {
            spline: self,
            samples,
        }
    }

    /// Fits `values` at the nodes and evaluates the interpolant at `targets`.
    pub fn interpolate(&self, values: &[f64], targets: &[f64]) -> Result<Vec<f64>, InterpolationError> {
        self.at(targets).evaluate(values)
    }
}

#[derive(Debug, Clone)]
enum Sample {
    Node(usize),
    Span { first: usize, weights: Vec<f64> },
}

/// Basis weights of an [`InterpolatingSpline`] at a fixed set of targets.
#[derive(Debug, Clone)]
pub struct SplineEvaluator<'a> {
    spline: &'a InterpolatingSpline,
    samples: Vec<Sample>,
}

impl SplineEvaluator<'_> {
    /// Interpolates `values` (one per node) at every target.
    pub fn evaluate(&self, values: &[f64]) -> Result<Vec<f64>, InterpolationError> {
        let count = self.spline.nodes.len();
        if values.len() != count {
            return Err(InterpolationError::NodeValueMismatch {
                expected: count,
                found: values.len(),
            });
        }
        let coefficients = self.spline.collocation.solve(values);
        Ok(self
            .samples
            .iter()
            .map(|sample| match sample {
                Sample::Node(node) => values[*node],
                Sample::Span { first, weights } => weights
                    .iter()
                    .zip(&coefficients[*first..])
                    .map(|(weight, coefficient)| weight * coefficient)
                    .sum(),
            })
            .collect())
    }
}

fn knot_vector(nodes: &[f64], degree: usize) -> Vec<f64> {
    let count = nodes.len();
    let first = nodes[0];
    let last = nodes[count - 1];

    let interior: Vec<f64> = if degree % 2 == 1 {
        let skip = (degree - 1) / 2;
        nodes[skip + 1..count - skip - 1].to_vec()
    } else {
        let midpoints: Vec<f64> = nodes.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect();
        midpoints[1..midpoints.len() - 1].to_vec()
    };

    let mut knots = Vec::with_capacity(count + degree + 1);
    knots.extend(std::iter::repeat(first).take(degree + 1));
    knots.extend(interior);
    knots.extend(std::iter::repeat(last).take(degree + 1));
    knots
}

/// Index `s` in `degree..count` with `knots[s] <= x < knots[s + 1]`, clamped at both ends.
fn find_span(knots: &[f64], degree: usize, count: usize, x: f64) -> usize {
    if x >= knots[count] {
        return count - 1;
    }
    if x <= knots[degree] {
        return degree;
    }
    let (mut low, mut high) = (degree, count);
    while high - low > 1 {
        let mid = (low + high) / 2;
        if x < knots[mid] {
            high = mid;
        } else {
            low = mid;
        }
    }
    low
}

/// The `degree + 1` non-zero basis functions at `x`, for coefficients
/// `span - degree ..= span` (Cox-de Boor recurrence).
fn basis_functions(knots: &[f64], degree: usize, span: usize, x: f64) -> Vec<f64> {
    let mut values = vec![0.0; degree + 1];
    let mut left = vec![0.0; degree + 1];
    let mut right = vec![0.0; degree + 1];
    values[0] = 1.0;
    for j in 1..=degree {
        left[j] = x - knots[span + 1 - j];
        right[j] = knots[span + j] - x;
        let mut saved = 0.0;
        for r in 0..j {
            let temp = values[r] / (right[r + 1] + left[j - r]);
            values[r] = saved + right[r + 1] * temp;
            saved = left[j - r] * temp;
        }
        values[j] = saved;
    }
    values
}

/// Dense LU factorization with partial pivoting, stored row-major.
#[derive(Debug, Clone)]
struct LuFactors {
    size: usize,
    factors: Vec<f64>,
    permutation: Vec<usize>,
}

impl LuFactors {
    fn decompose(mut matrix: Vec<f64>, size: usize) -> Result<Self, InterpolationError> {
        let mut permutation: Vec<usize> = (0..size).collect();
        for col in 0..size {
            let pivot = (col..size)
                .max_by(|&a, &b| {
                    matrix[a * size + col]
                        .abs()
                        .total_cmp(&matrix[b * size + col].abs())
                })
                .unwrap_or(col);
            if matrix[pivot * size + col].abs() < 1e-12 {
                return Err(InterpolationError::SingularCollocation);
            }
            if pivot != col {
                for k in 0..size {
                    matrix.swap(col * size + k, pivot * size + k);
                }
                permutation.swap(col, pivot);
            }

            let diagonal = matrix[col * size + col];
            for row in col + 1..size {
                let factor = matrix[row * size + col] / diagonal;
                matrix[row * size + col] = factor;
                if factor == 0.0 {
                    continue;
                }
                for k in col + 1..size {
                    let upper = matrix[col * size + k];
                    matrix[row * size + k] -= factor * upper;
                }
            }
        }
        Ok(Self {
            size,
            factors: matrix,
            permutation,
        })
    }

    fn solve(&self, rhs: &[f64]) -> Vec<f64> {
        let n = self.size;
        let mut x: Vec<f64> = self.permutation.iter().map(|&i| rhs[i]).collect();
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.factors[i * n + j] * x[j];
            }
        }
        for i in (0..n).rev() {
            for j in i + 1..n {
                x[i] -= self.factors[i * n + j] * x[j];
            }
            x[i] /= self.factors[i * n + i];
        }
        x
    }
}
