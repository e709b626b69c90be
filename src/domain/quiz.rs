//! Quiz scoring with a verified and an initial answer key.
//!
//! A separate verification call is the authoritative source of correctness. When it is
//! missing (the call failed) the answer key from the original generation is used instead,
//! and every review records which of the two it came from.

use serde::Serialize;

use super::models::{
    GenerateQuizOutput, QuestionAndAnswer, VerifiedQuestionResult, VerifyQuizAnswersInput,
    VerifyQuizAnswersOutput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Verified,
    Initial,
}

impl AnswerSource {
    /// Label shown next to explanations.
    pub fn label(&self) -> &'static str {
        match self {
            AnswerSource::Verified => "AI Verified",
            AnswerSource::Initial => "Initial",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    pub question: String,
    pub user_choice: Option<u8>,
    pub correct_index: u8,
    pub is_correct: bool,
    pub explanation: String,
    pub source: AnswerSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizGrade {
    pub score: usize,
    pub total: usize,
    pub source: AnswerSource,
    pub reviews: Vec<QuestionReview>,
}

impl QuizGrade {
    pub fn is_perfect(&self) -> bool {
        self.score == self.total
    }
}

/// Pair every question with the user's pick for the verifier. Missing answers become `null`.
pub fn verification_input(quiz: &GenerateQuizOutput, answers: &[Option<u8>]) -> VerifyQuizAnswersInput {
    let questions_and_user_answers = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| QuestionAndAnswer {
            question_text: question.question.clone(),
            options: question.options.clone(),
            user_selected_option_index: answers.get(index).copied().flatten(),
        })
        .collect();
    VerifyQuizAnswersInput { questions_and_user_answers }
}

/// Score `answers` against the verified results if present, else the original key.
pub fn grade(
    quiz: &GenerateQuizOutput,
    answers: &[Option<u8>],
    verification: Option<&VerifyQuizAnswersOutput>,
) -> QuizGrade {
    let source = if verification.is_some() { AnswerSource::Verified } else { AnswerSource::Initial };

    let reviews: Vec<QuestionReview> = quiz
        .questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let user_choice = answers.get(index).copied().flatten();
            let verified: Option<&VerifiedQuestionResult> =
                verification.and_then(|v| v.verified_results.get(index));

            match verified {
                Some(result) => QuestionReview {
                    question: question.question.clone(),
                    user_choice,
                    correct_index: result.verified_correct_answer_index,
                    is_correct: result.is_user_choice_correct,
                    explanation: result.explanation.clone(),
                    source: AnswerSource::Verified,
                },
                None => QuestionReview {
                    question: question.question.clone(),
                    user_choice,
                    correct_index: question.correct_answer_index,
                    is_correct: user_choice == Some(question.correct_answer_index),
                    explanation: question.explanation.clone(),
                    source: AnswerSource::Initial,
                },
            }
        })
        .collect();

    let score = reviews.iter().filter(|review| review.is_correct).count();
    QuizGrade { score, total: quiz.questions.len(), source, reviews }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::QuizQuestion;

    fn quiz(keys: &[u8]) -> GenerateQuizOutput {
        GenerateQuizOutput {
            quiz_title: "Cells".into(),
            questions: keys
                .iter()
                .enumerate()
                .map(|(i, key)| QuizQuestion {
                    question: format!("Q{}", i + 1),
                    options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    correct_answer_index: *key,
                    explanation: "initial".into(),
                })
                .collect(),
        }
    }

    fn verified(flags: &[(bool, u8)]) -> VerifyQuizAnswersOutput {
        VerifyQuizAnswersOutput {
            verified_results: flags
                .iter()
                .map(|(correct, index)| VerifiedQuestionResult {
                    is_user_choice_correct: *correct,
                    verified_correct_answer_index: *index,
                    explanation: "verified".into(),
                })
                .collect(),
        }
    }

    #[test]
    fn verified_flags_decide_the_score() {
        // The original key says answer 0 everywhere; the verifier disagrees on Q2.
        let quiz = quiz(&[0, 0, 0]);
        let answers = [Some(0), Some(1), Some(0)];
        let verification = verified(&[(true, 0), (true, 1), (false, 2)]);

        let grade = grade(&quiz, &answers, Some(&verification));
        assert_eq!(grade.score, 2);
        assert_eq!(grade.total, 3);
        assert_eq!(grade.source, AnswerSource::Verified);
        assert_eq!(grade.reviews[1].correct_index, 1);
        assert_eq!(grade.reviews[2].explanation, "verified");
    }

    #[test]
    fn failed_verification_falls_back_to_initial_key() {
        let quiz = quiz(&[0, 1, 2]);
        let answers = [Some(0), Some(1), Some(3)];

        let grade = grade(&quiz, &answers, None);
        assert_eq!(grade.score, 2);
        assert_eq!(grade.source, AnswerSource::Initial);
        assert!(grade.reviews.iter().all(|r| r.source == AnswerSource::Initial));
        assert_eq!(grade.reviews[0].explanation, "initial");
    }

    #[test]
    fn unanswered_questions_are_wrong_under_initial_key() {
        let grade = grade(&quiz(&[2, 3]), &[None], None);
        assert_eq!(grade.score, 0);
        assert_eq!(grade.reviews[1].user_choice, None);
    }

    #[test]
    fn short_verification_falls_back_per_question() {
        let quiz = quiz(&[0, 1]);
        let verification = verified(&[(false, 3)]);

        let grade = grade(&quiz, &[Some(0), Some(1)], Some(&verification));
        assert_eq!(grade.reviews[0].source, AnswerSource::Verified);
        assert_eq!(grade.reviews[1].source, AnswerSource::Initial);
        assert_eq!(grade.score, 1);
    }

    #[test]
    fn perfect_score_is_detected() {
        let grade = grade(&quiz(&[1, 2]), &[Some(1), Some(2)], None);
        assert!(grade.is_perfect());
    }

    #[test]
    fn verification_input_marks_missing_answers_as_null() {
        let input = verification_input(&quiz(&[0, 1]), &[Some(2)]);
        assert_eq!(input.questions_and_user_answers.len(), 2);
        assert_eq!(input.questions_and_user_answers[0].user_selected_option_index, Some(2));
        assert_eq!(input.questions_and_user_answers[1].user_selected_option_index, None);
        assert_eq!(input.questions_and_user_answers[1].question_text, "Q2");
    }

    #[test]
    fn labels_match_presentation() {
        assert_eq!(AnswerSource::Verified.label(), "AI Verified");
        assert_eq!(AnswerSource::Initial.label(), "Initial");
    }
}
