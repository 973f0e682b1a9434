//! APIレスポンスから表示用モデルへの変換
//!
//! DOMやシグナルに依存しない純粋関数のみを置く。

use crate::api::models::{Classification, FeedbackStats, SearchResult, TicketResult};
use crate::gui::models::{
    FeedbackButtonState, ResultPanel, Severity, SourceCard, Subcategories,
};

/// 回答プレビューの最大文字数
pub const ANSWER_PREVIEW_CHARS: usize = 100;

const PREVIEW_ELLIPSIS: &str = "...";

/// バックエンドが欠損値として送ってくるサブカテゴリ
const MISSING_SUBCATEGORY: &str = "nan";

const CONFIDENCE_HIGH_MARKERS: &[&str] = &["высок", "high"];
const CONFIDENCE_MEDIUM_MARKERS: &[&str] = &["средн", "medium"];
const PRIORITY_HIGH_MARKERS: &[&str] = &["срочн", "высок", "urgent", "high"];
const PRIORITY_MEDIUM_MARKERS: &[&str] = &["средн", "обычн", "medium", "normal"];

fn classify(label: &str, high: &[&str], medium: &[&str]) -> Severity {
    let label = label.to_lowercase();
    if high.iter().any(|m| label.contains(m)) {
        Severity::High
    } else if medium.iter().any(|m| label.contains(m)) {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// 分類の信頼度ラベルからバッジクラスを決める
pub fn confidence_severity(label: &str) -> Severity {
    classify(label, CONFIDENCE_HIGH_MARKERS, CONFIDENCE_MEDIUM_MARKERS)
}

/// 緊急度・優先度ラベルからバッジクラスを決める
pub fn priority_severity(label: &str) -> Severity {
    classify(label, PRIORITY_HIGH_MARKERS, PRIORITY_MEDIUM_MARKERS)
}

/// 回答の先頭100文字。長い場合は末尾に `...`
pub fn answer_preview(answer: &str) -> String {
    let mut chars = answer.chars();
    let head: String = chars.by_ref().take(ANSWER_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}{}", head, PREVIEW_ELLIPSIS)
    } else {
        head
    }
}

/// 0.0〜1.0 の値を四捨五入したパーセントに
pub fn to_percent(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value * 100.0).round() as u32
}

pub fn bonus_percent(feedback_bonus: f64) -> Option<u32> {
    (feedback_bonus > 0.0).then(|| to_percent(feedback_bonus))
}

pub fn feedback_line(stats: &FeedbackStats) -> Option<String> {
    (stats.total > 0).then(|| {
        format!(
            "👍 {}/{} ({}%)",
            stats.helpful,
            stats.total,
            to_percent(stats.rate)
        )
    })
}

pub fn subcategories(classification: &Classification) -> Subcategories {
    let listed: Vec<String> = classification
        .subcategories
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !listed.is_empty() {
        return Subcategories::List(listed);
    }

    match classification.subcategory.as_deref().map(str::trim) {
        Some(single) if !single.is_empty() && single != MISSING_SUBCATEGORY => {
            Subcategories::List(vec![single.to_string()])
        }
        _ => Subcategories::Empty,
    }
}

pub fn result_panel(result: &TicketResult) -> ResultPanel {
    let classification = &result.classification;
    let key_info = &result.key_info;

    ResultPanel {
        category: classification.category.clone(),
        confidence_label: classification.confidence.clone(),
        confidence_class: confidence_severity(&classification.confidence),
        subcategories: subcategories(classification),
        main_issue: key_info.main_issue.clone(),
        urgency_label: key_info.urgency.clone(),
        urgency_class: priority_severity(&key_info.urgency),
        sentiment: key_info.sentiment.clone(),
        overall_confidence: result.confidence.clone(),
        processed_at: result
            .processed_at()
            .map(|t| t.format("%H:%M:%S").to_string()),
    }
}

pub fn source_card(result: &SearchResult) -> SourceCard {
    let answer = result.article.answer();

    SourceCard {
        article_id: result.article_id.clone(),
        similarity_percent: to_percent(result.similarity),
        bonus_percent: bonus_percent(result.feedback_bonus),
        question: result.article.question().to_string(),
        answer_preview: answer_preview(answer),
        full_answer: answer.to_string(),
        feedback_line: feedback_line(&result.feedback_stats),
        feedback: FeedbackButtonState::Idle,
    }
}

pub fn source_cards(results: &[SearchResult]) -> Vec<SourceCard> {
    results.iter().map(source_card).collect()
}
