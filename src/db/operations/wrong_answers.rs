use chrono::NaiveDateTime;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::services::record::{naive_to_iso, QuestionType, RecordError};
use crate::services::wrong_answer::{NewWrongAnswer, WrongAnswer};

pub async fn insert_wrong_answer(
    pool: &PgPool,
    user_id: &str,
    entry: NewWrongAnswer,
) -> Result<WrongAnswer, RecordError> {
    let id = Uuid::new_v4().to_string();
    let word_ids_json = serde_json::to_value(&entry.word_ids)?;
    let question_type_json = serde_json::to_value(entry.question_type)?;
    let question_type_text = question_type_json
        .as_str()
        .unwrap_or("multiple-choice")
        .to_string();

    let row = sqlx::query(
        r#"
        INSERT INTO "wrong_answers"
          ("id","userId","exerciseId","wordIds","question","questionType",
           "correctAnswer","userAnswer","explanation","reviewed","reviewedAt")
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
        RETURNING "createdAt"
        "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(entry.exercise_id.as_deref())
    .bind(&word_ids_json)
    .bind(&entry.question)
    .bind(&question_type_text)
    .bind(&entry.correct_answer)
    .bind(&entry.user_answer)
    .bind(entry.explanation.as_deref())
    .bind(entry.reviewed)
    .bind(entry.reviewed_at)
    .fetch_one(pool)
    .await?;

    let created_at: NaiveDateTime = row.try_get("createdAt")?;

    Ok(WrongAnswer {
        id,
        user_id: user_id.to_string(),
        exercise_id: entry.exercise_id,
        word_ids: entry.word_ids,
        question: entry.question,
        question_type: entry.question_type,
        correct_answer: entry.correct_answer,
        user_answer: entry.user_answer,
        explanation: entry.explanation,
        reviewed: entry.reviewed,
        reviewed_at: entry.reviewed_at.map(naive_to_iso),
        created_at: naive_to_iso(created_at),
    })
}

pub async fn list_wrong_answers(
    pool: &PgPool,
    user_id: &str,
    reviewed: Option<bool>,
    limit: i64,
    offset: i64,
) -> Result<(Vec<WrongAnswer>, i64), RecordError> {
    let mut count_qb =
        QueryBuilder::<sqlx::Postgres>::new(r#"SELECT COUNT(*) FROM "wrong_answers" WHERE "userId" = "#);
    count_qb.push_bind(user_id);
    if let Some(flag) = reviewed {
        count_qb.push(r#" AND "reviewed" = "#);
        count_qb.push_bind(flag);
    }
    let total: i64 = count_qb.build_query_scalar().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<sqlx::Postgres>::new(
        r#"
        SELECT "id","userId","exerciseId","wordIds","question","questionType",
               "correctAnswer","userAnswer","explanation","reviewed","reviewedAt","createdAt"
        FROM "wrong_answers"
        WHERE "userId" = "#,
    );
    qb.push_bind(user_id);
    if let Some(flag) = reviewed {
        qb.push(r#" AND "reviewed" = "#);
        qb.push_bind(flag);
    }
    qb.push(r#" ORDER BY "createdAt" DESC LIMIT "#);
    qb.push_bind(limit);
    qb.push(" OFFSET ");
    qb.push_bind(offset);

    let rows = qb.build().fetch_all(pool).await?;

    let mut entries = Vec::with_capacity(rows.len());
    for row in rows {
        entries.push(row_to_wrong_answer(&row)?);
    }

    Ok((entries, total))
}

/// Flips the reviewed flag and stamps the review time in one statement, so
/// the reviewed/reviewedAt invariant cannot be broken by a partial update.
pub async fn mark_reviewed(
    pool: &PgPool,
    user_id: &str,
    id: &str,
) -> Result<Option<WrongAnswer>, RecordError> {
    let row = sqlx::query(
        r#"
        UPDATE "wrong_answers"
        SET "reviewed" = TRUE, "reviewedAt" = NOW()
        WHERE "id" = $1 AND "userId" = $2
        RETURNING "id","userId","exerciseId","wordIds","question","questionType",
                  "correctAnswer","userAnswer","explanation","reviewed","reviewedAt","createdAt"
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => Ok(Some(row_to_wrong_answer(&row)?)),
        None => Ok(None),
    }
}

fn row_to_wrong_answer(row: &sqlx::postgres::PgRow) -> Result<WrongAnswer, RecordError> {
    let word_ids_value: serde_json::Value = row.try_get("wordIds")?;
    let question_type_text: String = row.try_get("questionType")?;
    let question_type: QuestionType =
        serde_json::from_value(serde_json::Value::String(question_type_text))?;
    let reviewed_at: Option<NaiveDateTime> = row.try_get("reviewedAt")?;
    let created_at: NaiveDateTime = row.try_get("createdAt")?;

    Ok(WrongAnswer {
        id: row.try_get("id")?,
        user_id: row.try_get("userId")?,
        exercise_id: row.try_get("exerciseId")?,
        word_ids: serde_json::from_value(word_ids_value)?,
        question: row.try_get("question")?,
        question_type,
        correct_answer: row.try_get("correctAnswer")?,
        user_answer: row.try_get("userAnswer")?,
        explanation: row.try_get("explanation")?,
        reviewed: row.try_get("reviewed")?,
        reviewed_at: reviewed_at.map(naive_to_iso),
        created_at: naive_to_iso(created_at),
    })
}
