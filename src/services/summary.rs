use serde::{Deserialize, Serialize};

/// Counters a client submits after a day of studying. Everything defaults
/// to zero so a sparse payload still produces a usable summary.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LearningData {
    pub words_learned: u32,
    pub total_questions: u32,
    pub correct_answers: u32,
    pub study_minutes: u32,
    pub streak_days: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub achievement: String,
    pub summary: String,
    pub encouragement: String,
    pub suggestions: Vec<String>,
    pub next_goal: String,
}

/// Rule-based daily summary. Deterministic over the submitted counts;
/// every tier yields at least one suggestion and a concrete next goal.
pub fn generate_daily_summary(data: &LearningData) -> DailySummary {
    let correct = data.correct_answers.min(data.total_questions);
    let accuracy = if data.total_questions == 0 {
        0.0
    } else {
        f64::from(correct) / f64::from(data.total_questions)
    };

    let achievement = if data.words_learned == 0 {
        "今天还没有新的学习记录".to_string()
    } else if data.words_learned >= 20 {
        format!("今天学习了 {} 个单词，超额完成目标！", data.words_learned)
    } else if data.words_learned >= 10 {
        format!("今天学习了 {} 个单词，完成了日常目标", data.words_learned)
    } else {
        format!("今天学习了 {} 个单词，迈出了坚实的一步", data.words_learned)
    };

    let summary = if data.total_questions == 0 {
        format!(
            "共学习 {} 个单词，尚未完成任何练习题。",
            data.words_learned
        )
    } else {
        format!(
            "共学习 {} 个单词，完成 {} 道练习题，正确率 {:.0}%。",
            data.words_learned,
            data.total_questions,
            accuracy * 100.0
        )
    };

    let encouragement = if data.total_questions == 0 {
        "做几道练习题能巩固今天的记忆哦".to_string()
    } else if accuracy >= 0.9 {
        "正确率非常出色，记忆效果很扎实！".to_string()
    } else if accuracy >= 0.7 {
        "表现不错，继续保持这个势头！".to_string()
    } else if accuracy >= 0.5 {
        "有进步空间，多复习几遍错题会更好".to_string()
    } else {
        "别灰心，反复接触是记住单词的必经之路".to_string()
    };

    let mut suggestions = Vec::new();
    if data.total_questions > 0 && accuracy < 0.7 {
        suggestions.push("优先复习今天答错的题目".to_string());
    }
    if data.words_learned < 10 {
        suggestions.push("尝试把每日新词数量提高到 10 个".to_string());
    }
    if data.study_minutes > 60 {
        suggestions.push("学习时间较长，注意安排休息".to_string());
    }
    if data.streak_days >= 7 {
        suggestions.push(format!(
            "已连续学习 {} 天，保持节奏比冲刺更重要",
            data.streak_days
        ));
    }
    if suggestions.is_empty() {
        suggestions.push("保持当前节奏，继续巩固今日所学".to_string());
    }

    let next_goal = if data.words_learned == 0 {
        "明天学习 5 个新单词".to_string()
    } else if accuracy >= 0.9 && data.total_questions > 0 {
        format!("明天挑战 {} 个新单词", data.words_learned.saturating_add(5))
    } else {
        format!(
            "明天复习今日单词并学习 {} 个新单词",
            data.words_learned.min(20).max(5)
        )
    };

    DailySummary {
        achievement,
        summary,
        encouragement,
        suggestions,
        next_goal,
    }
}
