use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::db::operations::learning;

/// Exercise activity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Read,
    Listen,
    Write,
}

/// Question presentation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    FillBlank,
    Writing,
}

/// Per-word progress entry inside a learning record. Flags default to the
/// untouched state so a bare word reference deserializes cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStatus {
    pub word_id: String,
    #[serde(default)]
    pub mastered: bool,
    #[serde(default)]
    pub review_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub prompt: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<String>>,
    pub expected_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub content: String,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningRecord {
    pub id: String,
    pub user_id: String,
    pub date: String,
    pub words_learned: Vec<WordStatus>,
    pub exercises: Vec<Exercise>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLearningRecordInput {
    pub date: String,
    #[serde(default)]
    pub words_learned: Vec<WordStatus>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

#[derive(Debug, Clone)]
pub struct PaginationOptions {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationOptions {
    /// (page, page_size, offset) with defaults of page 1, 20 per page,
    /// page size capped at 100.
    pub fn resolve(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let page_size = self.page_size.unwrap_or(20).clamp(1, 100);
        (page, page_size, (page - 1) * page_size)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, page_size: i64, total: i64) -> Self {
        Self {
            page,
            page_size,
            total,
            total_pages: (total + page_size - 1) / page_size.max(1),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("sql error: {0}")]
    Sql(#[from] sqlx::Error),
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub async fn create_record(
    db: &Database,
    user_id: &str,
    input: CreateLearningRecordInput,
) -> Result<LearningRecord, RecordError> {
    let date = validate_record_input(&input)?;
    learning::insert_learning_record(db.pool(), user_id, date, &input.words_learned, &input.exercises)
        .await
}

pub async fn list_records(
    db: &Database,
    user_id: &str,
    options: PaginationOptions,
) -> Result<PaginatedResult<LearningRecord>, RecordError> {
    let (page, page_size, offset) = options.resolve();
    let (data, total) =
        learning::list_learning_records(db.pool(), user_id, page_size, offset).await?;
    Ok(PaginatedResult {
        data,
        pagination: Pagination::new(page, page_size, total),
    })
}

fn validate_record_input(input: &CreateLearningRecordInput) -> Result<NaiveDate, RecordError> {
    let date = NaiveDate::parse_from_str(input.date.trim(), "%Y-%m-%d")
        .map_err(|_| RecordError::Validation("学习日期格式不合法，应为 YYYY-MM-DD".to_string()))?;

    for status in &input.words_learned {
        if status.word_id.trim().is_empty() {
            return Err(RecordError::Validation("单词引用不能为空".to_string()));
        }
        if status.review_count < 0 {
            return Err(RecordError::Validation("复习次数不能为负数".to_string()));
        }
    }

    for exercise in &input.exercises {
        if exercise.content.trim().is_empty() {
            return Err(RecordError::Validation("练习内容不能为空".to_string()));
        }
    }

    Ok(date)
}

pub fn naive_to_iso(value: NaiveDateTime) -> String {
    DateTime::<Utc>::from_naive_utc_and_offset(value, Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
