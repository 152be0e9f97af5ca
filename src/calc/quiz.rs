// src/calc/quiz.rs

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    calc::AttemptError,
    models::quiz::{AnswerRecord, QuizAttempt, QuizQuestion},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizScore {
    pub score: usize,
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub unanswered_count: usize,
}

/// Scores answers against the paper.
///
/// An answer is correct only if it equals the question's option letter exactly
/// (case-sensitive). Blank answers count as unanswered. Answers for questions
/// that are not on the paper are ignored.
pub fn compute_quiz_score(questions: &[QuizQuestion], answers: &HashMap<i64, String>) -> QuizScore {
    let mut correct_count = 0;
    let mut incorrect_count = 0;
    let mut unanswered_count = 0;

    for question in questions {
        match answers.get(&question.id).filter(|a| !a.trim().is_empty()) {
            Some(answer) if *answer == question.correct_option => correct_count += 1,
            Some(_) => incorrect_count += 1,
            None => unanswered_count += 1,
        }
    }

    QuizScore {
        score: correct_count,
        correct_count,
        incorrect_count,
        unanswered_count,
    }
}

/// Final figures for a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptSummary {
    #[serde(flatten)]
    pub score: QuizScore,
    pub total_questions: usize,
    pub elapsed_seconds: i64,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl QuizAttempt {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            answers: Vec::new(),
            score: 0,
            started_at: now,
            finished_at: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Records (or changes) the answer to `question`.
    pub fn record_answer(
        &mut self,
        question: &QuizQuestion,
        chosen_option: &str,
    ) -> Result<(), AttemptError> {
        if self.is_finished() {
            return Err(AttemptError::AlreadyFinished);
        }

        let record = AnswerRecord {
            question_id: question.id,
            chosen_option: chosen_option.to_string(),
            is_correct: chosen_option == question.correct_option,
        };

        match self
            .answers
            .iter_mut()
            .find(|existing| existing.question_id == question.id)
        {
            Some(existing) => *existing = record,
            None => self.answers.push(record),
        }

        self.score = self.answers.iter().filter(|a| a.is_correct).count();
        Ok(())
    }

    /// Seals the attempt and scores it against `questions`.
    ///
    /// Correctness is re-derived from the paper; the `is_correct` flags carried
    /// by the attempt are not trusted. A `started_at` later than `now` is rejected.
    pub fn finish(
        &mut self,
        questions: &[QuizQuestion],
        now: DateTime<Utc>,
    ) -> Result<AttemptSummary, AttemptError> {
        if self.is_finished() {
            return Err(AttemptError::AlreadyFinished);
        }
        if self.started_at > now {
            return Err(AttemptError::StartedInFuture);
        }

        let mut answers = HashMap::with_capacity(self.answers.len());
        for record in &self.answers {
            if !questions.iter().any(|q| q.id == record.question_id) {
                return Err(AttemptError::UnknownQuestion(record.question_id));
            }
            answers.insert(record.question_id, record.chosen_option.clone());
        }

        let score = compute_quiz_score(questions, &answers);
        for record in &mut self.answers {
            record.is_correct = questions
                .iter()
                .any(|q| q.id == record.question_id && q.correct_option == record.chosen_option);
        }
        self.score = score.score;
        self.finished_at = Some(now);

        Ok(AttemptSummary {
            score,
            total_questions: questions.len(),
            elapsed_seconds: (now - self.started_at).num_seconds(),
            started_at: self.started_at,
            finished_at: now,
        })
    }
}
