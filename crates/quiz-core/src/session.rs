use chrono::NaiveDate;

use crate::error::{QuizError, QuizResult};
use crate::question::Question;
use crate::similarity::is_correct;
use crate::subject::Subject;
use crate::surds::DEFAULT_SURD_TERMS;
use crate::user::ScoreRecord;

/// Session-level knobs, normally sourced from the config file.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub questions: usize,
    pub surd_terms: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            questions: 5,
            surd_terms: DEFAULT_SURD_TERMS,
        }
    }
}

/// Outcome of checking one response.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub correct: bool,
    pub expected: String,
}

/// One quiz run: a fixed subject and an ordered set of independently
/// generated questions, each rendered exactly once at start.
#[derive(Debug)]
pub struct QuizSession {
    subject: Subject,
    questions: Vec<Question>,
    prompts: Vec<String>,
}

impl QuizSession {
    pub fn start(subject: Subject, options: &SessionOptions) -> QuizResult<Self> {
        let count = options.questions.max(1);
        let mut questions = Vec::with_capacity(count);
        let mut prompts = Vec::with_capacity(count);
        for _ in 0..count {
            let mut question = Question::with_options(subject, options.surd_terms);
            prompts.push(question.render()?);
            questions.push(question);
        }
        Ok(Self {
            subject,
            questions,
            prompts,
        })
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn prompt(&self, index: usize) -> Option<&str> {
        self.prompts.get(index).map(String::as_str)
    }

    /// Compare a raw response against question `index`'s canonical answer.
    pub fn check(&self, index: usize, response: &str) -> QuizResult<Verdict> {
        let question = self
            .questions
            .get(index)
            .ok_or_else(|| QuizError::NotFound(format!("question {index}")))?;
        let expected = question.answer()?;
        Ok(Verdict {
            correct: is_correct(&expected, response),
            expected,
        })
    }

    /// Score a full set of responses. Missing responses count as wrong.
    pub fn grade(&self, responses: &[String]) -> QuizResult<u32> {
        let mut score = 0;
        for (index, response) in responses.iter().enumerate().take(self.len()) {
            if self.check(index, response)?.correct {
                score += 1;
            }
        }
        Ok(score)
    }

    pub fn score_record(&self, user_id: &str, date: NaiveDate, score: u32) -> ScoreRecord {
        ScoreRecord::new(user_id.to_string(), date, self.subject, score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(questions: usize) -> SessionOptions {
        SessionOptions {
            questions,
            ..SessionOptions::default()
        }
    }

    #[test]
    fn test_start_renders_all_questions_up_front() {
        let session = QuizSession::start(Subject::Differentiation, &options(5)).unwrap();
        assert_eq!(session.len(), 5);
        for index in 0..session.len() {
            assert!(session.prompt(index).is_some());
            // answer() must already be valid: rendering happened at start
            assert!(session.check(index, "").is_ok());
        }
    }

    #[test]
    fn test_check_exact_answer_is_correct() {
        let session = QuizSession::start(Subject::Polynomials, &options(1)).unwrap();
        let expected = session.check(0, "").unwrap().expected;
        assert!(session.check(0, &expected).unwrap().correct);
    }

    #[test]
    fn test_check_out_of_range() {
        let session = QuizSession::start(Subject::Surds, &options(2)).unwrap();
        assert!(matches!(
            session.check(5, "whatever"),
            Err(QuizError::NotFound(_))
        ));
    }

    #[test]
    fn test_grade_counts_correct_responses() {
        let session = QuizSession::start(Subject::Complex, &options(3)).unwrap();
        let mut responses: Vec<String> = (0..3)
            .map(|i| session.check(i, "").unwrap().expected)
            .collect();
        responses[1] = "definitely wrong".into();
        assert_eq!(session.grade(&responses).unwrap(), 2);
    }

    #[test]
    fn test_grade_short_response_list() {
        let session = QuizSession::start(Subject::Surds, &options(3)).unwrap();
        let responses = vec![session.check(0, "").unwrap().expected];
        assert_eq!(session.grade(&responses).unwrap(), 1);
    }

    #[test]
    fn test_score_record_carries_subject() {
        let session = QuizSession::start(Subject::Surds, &options(1)).unwrap();
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let record = session.score_record("user-1", date, 1);
        assert_eq!(record.subject, Subject::Surds);
        assert_eq!(record.score, 1);
        assert_eq!(record.date, date);
    }
}
