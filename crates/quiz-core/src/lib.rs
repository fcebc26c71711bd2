pub mod complex;
pub mod differentiation;
pub mod error;
pub mod polynomial;
pub mod question;
pub mod session;
pub mod similarity;
pub mod store;
pub mod subject;
pub mod surds;
pub mod user;

pub use complex::ComplexProblem;
pub use differentiation::{DifferentiationProblem, Family};
pub use error::{QuizError, QuizResult};
pub use polynomial::PolynomialProblem;
pub use question::{create_generator, Problem, Question};
pub use session::{QuizSession, SessionOptions, Verdict};
pub use similarity::{is_correct, similarity, SIMILARITY_THRESHOLD};
pub use store::{ScoreStore, UserStore};
pub use subject::Subject;
pub use surds::{SurdProblem, SurdTerm, DEFAULT_SURD_TERMS};
pub use user::{ScoreRecord, User};
