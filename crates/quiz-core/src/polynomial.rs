use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuizError, QuizResult};
use crate::subject::Subject;

/// Redraw rounds before generation gives up. dividend[0] > divisor[0]
/// holds on roughly 4/9 of independent draws, so the cap is defensive only.
const RETRY_CAP: u32 = 10_000;

/// A quadratic dividend divided by a linear divisor. Coefficients are
/// highest-degree first. Generation keeps this shape fixed: the 2-term
/// quotient + remainder answer format is only well-defined for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolynomialProblem {
    dividend: Vec<i64>,
    divisor: Vec<i64>,
}

impl PolynomialProblem {
    /// Draw all coefficients uniformly from [1, 9], redrawing both
    /// polynomials until the dividend's leading coefficient strictly
    /// exceeds the divisor's.
    pub fn generate(rng: &mut impl Rng) -> QuizResult<Self> {
        let mut attempts = 0;
        loop {
            let divisor: Vec<i64> = (0..2).map(|_| rng.gen_range(1..=9)).collect();
            let dividend: Vec<i64> = (0..3).map(|_| rng.gen_range(1..=9)).collect();
            if dividend[0] > divisor[0] {
                debug!(attempts, "polynomial leading coefficients accepted");
                return Ok(Self { dividend, divisor });
            }
            attempts += 1;
            if attempts >= RETRY_CAP {
                return Err(QuizError::Exhausted(Subject::Polynomials, RETRY_CAP));
            }
        }
    }

    /// Build a problem from explicit coefficient sequences (highest-degree
    /// first). The divisor must be linear.
    pub fn from_coefficients(dividend: Vec<i64>, divisor: Vec<i64>) -> Self {
        Self { dividend, divisor }
    }

    pub fn dividend(&self) -> &[i64] {
        &self.dividend
    }

    pub fn divisor(&self) -> &[i64] {
        &self.divisor
    }

    /// Synthetic division: walk the dividend left to right, dividing the
    /// leading work coefficient by divisor[0] and folding
    /// `divisor[1] × quotient_term` into the next coefficient. The single
    /// coefficient left at the end is the remainder.
    pub fn divide(&self) -> (Vec<f64>, f64) {
        let mut work: Vec<f64> = self.dividend.iter().map(|&c| c as f64).collect();
        let leading = self.divisor[0] as f64;
        let trailing = self.divisor[1] as f64;

        let mut quotient = Vec::with_capacity(work.len() - 1);
        while work.len() > 1 {
            let term = work[0] / leading;
            quotient.push(term);
            work.remove(0);
            work[0] -= trailing * term;
        }
        (quotient, work[0])
    }

    /// `"What is (4x^2 + 2x + 3) ⟌ (2x + 1)"` — dividend first.
    pub fn prompt(&self) -> String {
        format!(
            "What is ({}) \u{27CC} ({})",
            poly_string(&self.dividend),
            poly_string(&self.divisor)
        )
    }

    /// `"<q0>x+<q1>r<remainder>"`, all to 2 decimals. A negative second
    /// term keeps its own sign after the `+`.
    pub fn answer(&self) -> String {
        let (quotient, remainder) = self.divide();
        format!("{:.2}x+{:.2}r{:.2}", quotient[0], quotient[1], remainder)
    }
}

/// Render coefficients highest-degree first: `x^n` for exponents ≥ 2,
/// `x` for exponent 1, a bare constant for exponent 0.
fn poly_string(coeffs: &[i64]) -> String {
    let degree = coeffs.len() - 1;
    let terms: Vec<String> = coeffs
        .iter()
        .enumerate()
        .map(|(i, c)| match degree - i {
            0 => format!("{c}"),
            1 => format!("{c}x"),
            n => format!("{c}x^{n}"),
        })
        .collect();
    terms.join(" + ")
}
