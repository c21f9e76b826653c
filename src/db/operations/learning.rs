use chrono::{NaiveDate, NaiveDateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::services::record::{
    naive_to_iso, Exercise, LearningRecord, RecordError, WordStatus,
};

pub async fn insert_learning_record(
    pool: &PgPool,
    user_id: &str,
    date: NaiveDate,
    words_learned: &[WordStatus],
    exercises: &[Exercise],
) -> Result<LearningRecord, RecordError> {
    let record_id = Uuid::new_v4().to_string();
    let now = Utc::now().naive_utc();

    let words_json = serde_json::to_value(words_learned)?;
    let exercises_json = serde_json::to_value(exercises)?;

    sqlx::query(
        r#"
        INSERT INTO "learning_records"
          ("id","userId","date","wordsLearned","exercises","createdAt","updatedAt")
        VALUES ($1,$2,$3,$4,$5,$6,$6)
        "#,
    )
    .bind(&record_id)
    .bind(user_id)
    .bind(date)
    .bind(&words_json)
    .bind(&exercises_json)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(LearningRecord {
        id: record_id,
        user_id: user_id.to_string(),
        date: date.format("%Y-%m-%d").to_string(),
        words_learned: words_learned.to_vec(),
        exercises: exercises.to_vec(),
        created_at: naive_to_iso(now),
        updated_at: naive_to_iso(now),
    })
}

pub async fn list_learning_records(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
    offset: i64,
) -> Result<(Vec<LearningRecord>, i64), RecordError> {
    let total: i64 =
        sqlx::query_scalar(r#"SELECT COUNT(*) FROM "learning_records" WHERE "userId" = $1"#)
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let rows = sqlx::query(
        r#"
        SELECT "id","userId","date","wordsLearned","exercises","createdAt","updatedAt"
        FROM "learning_records"
        WHERE "userId" = $1
        ORDER BY "date" DESC, "createdAt" DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        records.push(row_to_record(&row)?);
    }

    Ok((records, total))
}

/// Aggregates for the words-stats endpoint, computed over the embedded
/// JSONB arrays. Streak counting happens in Rust over the distinct dates.
pub async fn word_stat_counts(pool: &PgPool, user_id: &str) -> Result<(i64, i64), RecordError> {
    let row = sqlx::query(
        r#"
        SELECT
          COUNT(DISTINCT elem->>'wordId') AS "total",
          COUNT(DISTINCT elem->>'wordId')
            FILTER (WHERE (elem->>'mastered')::boolean) AS "mastered"
        FROM "learning_records", jsonb_array_elements("wordsLearned") AS elem
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    let total: i64 = row.try_get("total")?;
    let mastered: i64 = row.try_get("mastered")?;
    Ok((total, mastered))
}

pub async fn exercise_count(pool: &PgPool, user_id: &str) -> Result<i64, RecordError> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COALESCE(SUM(jsonb_array_length("exercises")), 0)::bigint
        FROM "learning_records"
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(total)
}

pub async fn study_dates_desc(pool: &PgPool, user_id: &str) -> Result<Vec<NaiveDate>, RecordError> {
    let dates: Vec<NaiveDate> = sqlx::query_scalar(
        r#"
        SELECT DISTINCT "date"
        FROM "learning_records"
        WHERE "userId" = $1
        ORDER BY "date" DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(dates)
}

fn row_to_record(row: &sqlx::postgres::PgRow) -> Result<LearningRecord, RecordError> {
    let date: NaiveDate = row.try_get("date")?;
    let created_at: NaiveDateTime = row.try_get("createdAt")?;
    let updated_at: NaiveDateTime = row.try_get("updatedAt")?;

    let words_value: serde_json::Value = row.try_get("wordsLearned")?;
    let exercises_value: serde_json::Value = row.try_get("exercises")?;

    Ok(LearningRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        date: date.format("%Y-%m-%d").to_string(),
        words_learned: serde_json::from_value(words_value)?,
        exercises: serde_json::from_value(exercises_value)?,
        created_at: naive_to_iso(created_at),
        updated_at: naive_to_iso(updated_at),
    })
}
