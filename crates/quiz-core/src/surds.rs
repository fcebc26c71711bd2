use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{QuizError, QuizResult};
use crate::subject::Subject;

/// Number of terms in a surd problem unless configured otherwise.
pub const DEFAULT_SURD_TERMS: usize = 3;

/// Draws per term before generation gives up. The retry loop terminates
/// with probability 1 (any reduced radicand the first term produces occurs
/// with positive probability on an independent draw), so the cap only
/// guards the invariant.
const RETRY_CAP: u32 = 10_000;

/// One addend of a surd sum: `coefficient√radicand`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurdTerm {
    pub coefficient: i64,
    pub radicand: i64,
}

impl SurdTerm {
    pub fn new(coefficient: i64, radicand: i64) -> Self {
        Self {
            coefficient,
            radicand,
        }
    }

    fn random(rng: &mut impl Rng) -> Self {
        Self {
            coefficient: rng.gen_range(1..=50),
            radicand: rng.gen_range(1..=50),
        }
    }

    /// Extract the largest perfect-square factor of the radicand:
    /// `c√r` becomes `(c·k)√(r/k²)` for the largest `k ≥ 2` with `k² | r`.
    /// A square-free radicand reduces to itself; a reduced radicand of 1
    /// means the term is a pure integer.
    pub fn reduced(&self) -> SurdTerm {
        let mut root = (self.radicand as f64).sqrt().floor() as i64;
        while root >= 2 {
            let factor = root * root;
            if self.radicand % factor == 0 {
                return SurdTerm {
                    coefficient: self.coefficient * root,
                    radicand: self.radicand / factor,
                };
            }
            root -= 1;
        }
        *self
    }
}

/// A sum of surd terms that all share one reduced radicand, so the whole
/// expression collapses to a single term after simplification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurdProblem {
    terms: Vec<SurdTerm>,
}

impl SurdProblem {
    /// Generate `count` terms with coefficients and radicands drawn
    /// uniformly from [1, 50]. The first term fixes the target reduced
    /// radicand; later terms are redrawn until they agree.
    pub fn generate(rng: &mut impl Rng, count: usize) -> QuizResult<Self> {
        let count = count.max(1);
        let first = SurdTerm::random(rng);
        let target = first.reduced().radicand;

        let mut terms = Vec::with_capacity(count);
        terms.push(first);

        for _ in 1..count {
            let mut attempts = 0;
            loop {
                let term = SurdTerm::random(rng);
                if term.reduced().radicand == target {
                    terms.push(term);
                    break;
                }
                attempts += 1;
                if attempts >= RETRY_CAP {
                    return Err(QuizError::Exhausted(Subject::Surds, RETRY_CAP));
                }
            }
            debug!(attempts, target, "surd term agreed");
        }

        Ok(Self { terms })
    }

    /// Build a problem from explicit terms. The caller is responsible for
    /// the shared-radicand invariant.
    pub fn from_terms(terms: Vec<SurdTerm>) -> Self {
        Self { terms }
    }

    pub fn terms(&self) -> &[SurdTerm] {
        &self.terms
    }

    /// `"Simplify 2√8 + 3√2"` — original, unreduced values.
    pub fn prompt(&self) -> String {
        let rendered: Vec<String> = self
            .terms
            .iter()
            .map(|t| format!("{}\u{221A}{}", t.coefficient, t.radicand))
            .collect();
        format!("Simplify {}", rendered.join(" + "))
    }

    /// Sum of reduced coefficients; `"<sum>*sqrt(<radicand>)"`, or the bare
    /// sum when the shared reduced radicand is 1.
    pub fn answer(&self) -> String {
        let radicand = self.terms[0].reduced().radicand;
        let sum: i64 = self.terms.iter().map(|t| t.reduced().coefficient).sum();
        if radicand == 1 {
            sum.to_string()
        } else {
            format!("{sum}*sqrt({radicand})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_extracts_largest_square() {
        // 2√8 = 4√2
        assert_eq!(SurdTerm::new(2, 8).reduced(), SurdTerm::new(4, 2));
        // 1√48 = 4√3 (largest square factor 16, not 4)
        assert_eq!(SurdTerm::new(1, 48).reduced(), SurdTerm::new(4, 3));
        // 3√49 = 21√1
        assert_eq!(SurdTerm::new(3, 49).reduced(), SurdTerm::new(21, 1));
    }

    #[test]
    fn test_reduce_square_free_is_identity() {
        assert_eq!(SurdTerm::new(5, 30).reduced(), SurdTerm::new(5, 30));
        assert_eq!(SurdTerm::new(7, 2).reduced(), SurdTerm::new(7, 2));
    }

    #[test]
    fn test_reduce_radicand_one() {
        assert_eq!(SurdTerm::new(6, 1).reduced(), SurdTerm::new(6, 1));
    }

    #[test]
    fn test_answer_shared_radicand() {
        // 2√8 + 3√2 = 4√2 + 3√2 = 7√2
        let problem = SurdProblem::from_terms(vec![SurdTerm::new(2, 8), SurdTerm::new(3, 2)]);
        assert_eq!(problem.answer(), "7*sqrt(2)");
    }

    #[test]
    fn test_answer_degenerate_integers() {
        // 2√4 + 3√9 = 4 + 9 = 13: no sqrt in the answer
        let problem = SurdProblem::from_terms(vec![SurdTerm::new(2, 4), SurdTerm::new(3, 9)]);
        assert_eq!(problem.answer(), "13");
        assert!(!problem.answer().contains("sqrt"));
    }

    #[test]
    fn test_prompt_uses_unreduced_values() {
        let problem = SurdProblem::from_terms(vec![SurdTerm::new(2, 8), SurdTerm::new(3, 2)]);
        assert_eq!(problem.prompt(), "Simplify 2\u{221A}8 + 3\u{221A}2");
    }

    #[test]
    fn test_generated_terms_share_reduced_radicand() {
        let mut rng = rand::thread_rng();
        for _ in 0..50 {
            let problem = SurdProblem::generate(&mut rng, 3).unwrap();
            let target = problem.terms()[0].reduced().radicand;
            for term in problem.terms() {
                assert_eq!(term.reduced().radicand, target);
                assert!((1..=50).contains(&term.coefficient));
                assert!((1..=50).contains(&term.radicand));
            }
        }
    }

    #[test]
    fn test_generate_respects_count() {
        let mut rng = rand::thread_rng();
        let problem = SurdProblem::generate(&mut rng, 5).unwrap();
        assert_eq!(problem.terms().len(), 5);
        // A zero count still yields a well-formed single-term problem.
        let problem = SurdProblem::generate(&mut rng, 0).unwrap();
        assert_eq!(problem.terms().len(), 1);
    }
}
