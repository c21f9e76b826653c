use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::db::operations::learning;
use crate::db::Database;
use crate::services::record::RecordError;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordStats {
    pub total_words_learned: i64,
    pub mastered_words: i64,
    pub streak_days: i64,
    pub total_exercises: i64,
}

pub async fn word_stats(db: &Database, user_id: &str) -> Result<WordStats, RecordError> {
    let pool = db.pool();

    let (total_words_learned, mastered_words) = learning::word_stat_counts(pool, user_id).await?;
    let total_exercises = learning::exercise_count(pool, user_id).await?;
    let dates = learning::study_dates_desc(pool, user_id).await?;
    let streak_days = compute_streak(&dates, Utc::now().date_naive());

    Ok(WordStats {
        total_words_learned,
        mastered_words,
        streak_days,
        total_exercises,
    })
}

/// Consecutive study days ending today or yesterday. `dates` must be
/// distinct and sorted newest first.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> i64 {
    let Some(&latest) = dates.first() else {
        return 0;
    };

    let lead_gap = today.signed_duration_since(latest).num_days();
    if !(0..=1).contains(&lead_gap) {
        return 0;
    }

    let mut streak = 1;
    let mut prev = latest;
    for &date in &dates[1..] {
        if prev.signed_duration_since(date).num_days() == 1 {
            streak += 1;
            prev = date;
        } else {
            break;
        }
    }
    streak
}
