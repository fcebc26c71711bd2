use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::complex::ComplexProblem;
use crate::differentiation::DifferentiationProblem;
use crate::error::{QuizError, QuizResult};
use crate::polynomial::PolynomialProblem;
use crate::subject::Subject;
use crate::surds::{SurdProblem, DEFAULT_SURD_TERMS};

/// One generated problem instance of any subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "subject", rename_all = "lowercase")]
pub enum Problem {
    Surds(SurdProblem),
    Complex(ComplexProblem),
    Polynomials(PolynomialProblem),
    Differentiation(DifferentiationProblem),
}

impl Problem {
    pub fn generate(subject: Subject, surd_terms: usize, rng: &mut impl Rng) -> QuizResult<Self> {
        Ok(match subject {
            Subject::Surds => Self::Surds(SurdProblem::generate(rng, surd_terms)?),
            Subject::Complex => Self::Complex(ComplexProblem::generate(rng)),
            Subject::Polynomials => Self::Polynomials(PolynomialProblem::generate(rng)?),
            Subject::Differentiation => {
                Self::Differentiation(DifferentiationProblem::generate(rng))
            }
        })
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::Surds(p) => p.prompt(),
            Self::Complex(p) => p.prompt(),
            Self::Polynomials(p) => p.prompt(),
            Self::Differentiation(p) => p.prompt(),
        }
    }

    pub fn answer(&self) -> String {
        match self {
            Self::Surds(p) => p.answer(),
            Self::Complex(p) => p.answer(),
            Self::Polynomials(p) => p.answer(),
            Self::Differentiation(p) => p.answer(),
        }
    }
}

/// One quiz question: a subject plus its problem, generated lazily on the
/// first `render()`. Asking for the answer before rendering is a contract
/// error, not a nonsense string.
#[derive(Debug, Clone)]
pub struct Question {
    subject: Subject,
    surd_terms: usize,
    problem: Option<Problem>,
}

impl Question {
    pub fn new(subject: Subject) -> Self {
        Self::with_options(subject, DEFAULT_SURD_TERMS)
    }

    pub fn with_options(subject: Subject, surd_terms: usize) -> Self {
        Self {
            subject,
            surd_terms,
            problem: None,
        }
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Problem text. The first call generates the problem; repeated calls
    /// re-render the same instance.
    pub fn render(&mut self) -> QuizResult<String> {
        match &self.problem {
            Some(problem) => Ok(problem.prompt()),
            None => {
                let mut rng = rand::thread_rng();
                let problem = Problem::generate(self.subject, self.surd_terms, &mut rng)?;
                let prompt = problem.prompt();
                self.problem = Some(problem);
                Ok(prompt)
            }
        }
    }

    /// Canonical answer text. Only valid once `render()` has produced a
    /// problem; idempotent afterwards.
    pub fn answer(&self) -> QuizResult<String> {
        self.problem
            .as_ref()
            .map(Problem::answer)
            .ok_or(QuizError::NotRendered)
    }
}

/// Entry point matching the session layer's vocabulary: one fresh
/// generator per question.
pub fn create_generator(subject: Subject) -> Question {
    Question::new(subject)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_before_render_fails() {
        let question = Question::new(Subject::Surds);
        assert!(matches!(question.answer(), Err(QuizError::NotRendered)));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut question = Question::new(Subject::Polynomials);
        let first = question.render().unwrap();
        let second = question.render().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_answer_is_idempotent() {
        let mut question = Question::new(Subject::Differentiation);
        question.render().unwrap();
        assert_eq!(question.answer().unwrap(), question.answer().unwrap());
    }

    #[test]
    fn test_every_subject_renders() {
        for subject in Subject::ALL {
            let mut question = create_generator(subject);
            let prompt = question.render().unwrap();
            assert!(!prompt.is_empty());
            assert!(!question.answer().unwrap().is_empty());
        }
    }
}
