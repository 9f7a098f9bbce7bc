//! # Spline Remapping
//!
//! Natural cubic splines that turn raw noise values into semantic ranges
//! (stone height, mountain mass, dirt depth).
//!
//! The curve passes through every control point and has zero curvature at
//! both ends. Outside the control range it keeps following the cubic of the
//! nearest end segment.

use crate::error::{GenResult, GenerationError};

/// Cubic polynomial for one segment `[x_i, x_{i+1}]`, in powers of `x - x_i`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Segment {
    x: f64,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
}

impl Segment {
    #[inline]
    fn eval(&self, x: f64) -> f64 {
        let t = x - self.x;
        self.a + t * (self.b + t * (self.c + t * self.d))
    }
}

/// A natural cubic spline over strictly increasing control points.
///
/// Immutable after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct SplineCurve {
    /// Control points as `(x, y)`.
    points: Vec<(f64, f64)>,
    /// One polynomial per interval between consecutive points.
    segments: Vec<Segment>,
}

impl SplineCurve {
    /// Fits a natural cubic spline through `points`.
    ///
    /// `name` only labels errors.
    ///
    /// # Errors
    ///
    /// Fails when there are fewer than two points, when any coordinate is
    /// not finite, or when x values are not strictly increasing.
    pub fn natural(name: &'static str, points: &[(f64, f64)]) -> GenResult<Self> {
        match points.len() {
            0 => return Err(GenerationError::EmptySpline { name }),
            1 => return Err(GenerationError::SplineTooShort { name, count: 1 }),
            _ => {}
        }
        for (index, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(GenerationError::NonFiniteSpline { name, index });
            }
        }
        if let Some(index) = points.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(GenerationError::UnsortedSpline { name, index: index + 1 });
        }

        let segments = fit_natural(points);
        Ok(Self {
            points: points.to_vec(),
            segments,
        })
    }

    /// Fits a spline from `[x, y]` pairs as they appear in configuration.
    ///
    /// # Errors
    ///
    /// Same as [`SplineCurve::natural`].
    pub fn from_pairs(name: &'static str, pairs: &[[f64; 2]]) -> GenResult<Self> {
        let points: Vec<(f64, f64)> = pairs.iter().map(|p| (p[0], p[1])).collect();
        Self::natural(name, &points)
    }

    /// Returns the control points.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Evaluates the curve at `x`.
    ///
    /// Exact at control points: the segment starting at a knot is evaluated
    /// with a zero offset, which returns the knot's y unchanged.
    #[must_use]
    pub fn interpolate(&self, x: f64) -> f64 {
        // Largest i with x_i <= x, clamped to a valid segment
        let upper = self.points.partition_point(|&(px, _)| px <= x);
        let index = upper.saturating_sub(1).min(self.segments.len() - 1);
        self.segments[index].eval(x)
    }
}

/// Solves the tridiagonal system for second derivatives with `M_0 = M_n = 0`.
fn fit_natural(points: &[(f64, f64)]) -> Vec<Segment> {
    let n = points.len();
    let h: Vec<f64> = points.windows(2).map(|w| w[1].0 - w[0].0).collect();

    // Second derivatives at each knot
    let mut m = vec![0.0; n];
    if n > 2 {
        // Thomas algorithm over the interior knots 1..n-1
        let interior = n - 2;
        let mut diag = vec![0.0; interior];
        let mut rhs = vec![0.0; interior];
        for k in 0..interior {
            let i = k + 1;
            diag[k] = 2.0 * (h[i - 1] + h[i]);
            rhs[k] = 6.0
                * ((points[i + 1].1 - points[i].1) / h[i]
                    - (points[i].1 - points[i - 1].1) / h[i - 1]);
        }
        for k in 1..interior {
            let factor = h[k] / diag[k - 1];
            diag[k] -= factor * h[k];
            rhs[k] -= factor * rhs[k - 1];
        }
        m[interior] = rhs[interior - 1] / diag[interior - 1];
        for k in (0..interior - 1).rev() {
            m[k + 1] = (rhs[k] - h[k + 1] * m[k + 2]) / diag[k];
        }
    }

    points
        .windows(2)
        .enumerate()
        .map(|(i, w)| {
            let (x0, y0) = w[0];
            let (_, y1) = w[1];
            let hi = h[i];
            Segment {
                x: x0,
                a: y0,
                b: (y1 - y0) / hi - hi * (2.0 * m[i] + m[i + 1]) / 6.0,
                c: m[i] / 2.0,
                d: (m[i + 1] - m[i]) / (6.0 * hi),
            }
        })
        .collect()
}
