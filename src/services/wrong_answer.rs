use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::db::operations::wrong_answers;
use crate::services::record::{PaginatedResult, Pagination, PaginationOptions, QuestionType, RecordError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WrongAnswer {
    pub id: String,
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise_id: Option<String>,
    pub word_ids: Vec<String>,
    pub question: String,
    pub question_type: QuestionType,
    pub correct_answer: String,
    pub user_answer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub reviewed: bool,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWrongAnswerInput {
    #[serde(default)]
    pub exercise_id: Option<String>,
    #[serde(default)]
    pub word_ids: Vec<String>,
    pub question: String,
    pub question_type: QuestionType,
    pub correct_answer: String,
    pub user_answer: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub reviewed: bool,
    #[serde(default)]
    pub reviewed_at: Option<String>,
}

/// Validated insert payload. `reviewed_at` is guaranteed to be `Some` iff
/// `reviewed` is true.
#[derive(Debug, Clone)]
pub struct NewWrongAnswer {
    pub exercise_id: Option<String>,
    pub word_ids: Vec<String>,
    pub question: String,
    pub question_type: QuestionType,
    pub correct_answer: String,
    pub user_answer: String,
    pub explanation: Option<String>,
    pub reviewed: bool,
    pub reviewed_at: Option<NaiveDateTime>,
}

impl CreateWrongAnswerInput {
    /// Normalizes the reviewed/reviewedAt pair. A client may send
    /// `reviewed=true` without a timestamp; the current time is stamped
    /// instead, and an un-reviewed entry never carries a timestamp.
    pub fn normalize(self, now: NaiveDateTime) -> Result<NewWrongAnswer, RecordError> {
        if self.question.trim().is_empty() {
            return Err(RecordError::Validation("题目内容不能为空".to_string()));
        }

        let reviewed_at = if self.reviewed {
            Some(
                self.reviewed_at
                    .as_deref()
                    .and_then(parse_iso_naive)
                    .unwrap_or(now),
            )
        } else {
            None
        };

        Ok(NewWrongAnswer {
            exercise_id: self.exercise_id,
            word_ids: self.word_ids,
            question: self.question,
            question_type: self.question_type,
            correct_answer: self.correct_answer,
            user_answer: self.user_answer,
            explanation: self.explanation,
            reviewed: self.reviewed,
            reviewed_at,
        })
    }
}

pub async fn create_wrong_answer(
    db: &Database,
    user_id: &str,
    input: CreateWrongAnswerInput,
) -> Result<WrongAnswer, RecordError> {
    let entry = input.normalize(Utc::now().naive_utc())?;
    wrong_answers::insert_wrong_answer(db.pool(), user_id, entry).await
}

pub async fn list_wrong_answers(
    db: &Database,
    user_id: &str,
    reviewed: Option<bool>,
    options: PaginationOptions,
) -> Result<PaginatedResult<WrongAnswer>, RecordError> {
    let (page, page_size, offset) = options.resolve();
    let (data, total) =
        wrong_answers::list_wrong_answers(db.pool(), user_id, reviewed, page_size, offset).await?;
    Ok(PaginatedResult {
        data,
        pagination: Pagination::new(page, page_size, total),
    })
}

pub async fn mark_reviewed(
    db: &Database,
    user_id: &str,
    id: &str,
) -> Result<WrongAnswer, RecordError> {
    wrong_answers::mark_reviewed(db.pool(), user_id, id)
        .await?
        .ok_or_else(|| RecordError::NotFound("错题记录不存在".to_string()))
}

fn parse_iso_naive(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(reviewed: bool, reviewed_at: Option<&str>) -> CreateWrongAnswerInput {
        CreateWrongAnswerInput {
            exercise_id: None,
            word_ids: vec!["w-1".to_string()],
            question: "apple 的释义是？".to_string(),
            question_type: QuestionType::MultipleChoice,
            correct_answer: "苹果".to_string(),
            user_answer: "菠萝".to_string(),
            explanation: None,
            reviewed,
            reviewed_at: reviewed_at.map(|s| s.to_string()),
        }
    }

    #[test]
    fn reviewed_without_timestamp_gets_stamped() {
        let now = Utc::now().naive_utc();
        let entry = input(true, None).normalize(now).unwrap();
        assert!(entry.reviewed);
        assert_eq!(entry.reviewed_at, Some(now));
    }

    #[test]
    fn unreviewed_never_carries_a_timestamp() {
        let now = Utc::now().naive_utc();
        let entry = input(false, Some("2025-06-15T10:00:00Z"))
            .normalize(now)
            .unwrap();
        assert!(!entry.reviewed);
        assert!(entry.reviewed_at.is_none());
    }

    #[test]
    fn reviewed_with_valid_timestamp_keeps_it() {
        let now = Utc::now().naive_utc();
        let entry = input(true, Some("2025-06-15T10:00:00Z"))
            .normalize(now)
            .unwrap();
        let kept = entry.reviewed_at.unwrap();
        assert_eq!(kept.format("%Y-%m-%dT%H:%M:%S").to_string(), "2025-06-15T10:00:00");
    }

    #[test]
    fn unparsable_timestamp_falls_back_to_now() {
        let now = Utc::now().naive_utc();
        let entry = input(true, Some("yesterday")).normalize(now).unwrap();
        assert_eq!(entry.reviewed_at, Some(now));
    }

    #[test]
    fn empty_question_is_rejected() {
        let now = Utc::now().naive_utc();
        let mut bad = input(false, None);
        bad.question = "   ".to_string();
        assert!(matches!(
            bad.normalize(now),
            Err(RecordError::Validation(_))
        ));
    }
}
