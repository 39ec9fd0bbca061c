use crate::{
    errors::{AppError, AppResult},
    models::dto::{
        artifacts::{same_answer, QuizQuestion},
        response::{QuestionResult, QuizScoreResponse},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizState {
    InProgress { question_index: usize },
    Finished,
}

/// Walks a student through a generated quiz, one question at a time.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<String>>,
    state: QuizState,
}

impl QuizSession {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let state = if questions.is_empty() {
            QuizState::Finished
        } else {
            QuizState::InProgress { question_index: 0 }
        };

        Self {
            answers: vec![None; questions.len()],
            questions,
            state,
        }
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::InProgress { question_index } => self.questions.get(question_index),
            QuizState::Finished => None,
        }
    }

    /// Records (or replaces) the choice for the current question.
    pub fn select_answer(&mut self, answer: impl Into<String>) -> AppResult<()> {
        match self.state {
            QuizState::InProgress { question_index } => {
                self.answers[question_index] = Some(answer.into());
                Ok(())
            }
            QuizState::Finished => Err(AppError::ValidationError(
                "The quiz is already finished.".to_string(),
            )),
        }
    }

    pub fn next(&mut self) -> QuizState {
        if let QuizState::InProgress { question_index } = self.state {
            self.state = if question_index + 1 < self.questions.len() {
                QuizState::InProgress {
                    question_index: question_index + 1,
                }
            } else {
                QuizState::Finished
            };
        }
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == QuizState::Finished
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Number of answers matching the expected one, in any order of answering.
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| is_correct(question, answer.as_deref()))
            .count()
    }

    pub fn percentage(&self) -> u8 {
        if self.questions.is_empty() {
            return 0;
        }
        ((self.score() * 100) as f64 / self.total() as f64).round() as u8
    }

    pub fn results(&self) -> Vec<QuestionResult> {
        self.questions
            .iter()
            .zip(&self.answers)
            .map(|(question, answer)| QuestionResult {
                question: question.question.clone(),
                user_answer: answer.clone(),
                correct_answer: question.correct_answer.clone(),
                explanation: question.explanation.clone(),
                is_correct: is_correct(question, answer.as_deref()),
            })
            .collect()
    }
}

fn is_correct(question: &QuizQuestion, answer: Option<&str>) -> bool {
    answer.is_some_and(|a| same_answer(a, &question.correct_answer))
}

/// Replays submitted answers through a fresh session and reports the score.
pub fn score_submission(
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<String>>,
) -> AppResult<QuizScoreResponse> {
    if answers.len() > questions.len() {
        return Err(AppError::ValidationError(format!(
            "Received {} answers for {} questions.",
            answers.len(),
            questions.len()
        )));
    }

    let mut session = QuizSession::new(questions);
    let mut answers = answers.into_iter();
    while !session.is_finished() {
        if let Some(answer) = answers.next().flatten() {
            session.select_answer(answer)?;
        }
        session.next();
    }

    log::debug!("Scored quiz: {}/{}", session.score(), session.total());

    Ok(QuizScoreResponse {
        score: session.score(),
        total: session.total(),
        percentage: session.percentage(),
        results: session.results(),
    })
}
