//! Helpfulness votes and the ranking bonus derived from them.

use std::collections::HashMap;

use serde::Serialize;

/// Votes below this count do not affect ranking.
const MIN_VOTES_FOR_BONUS: u32 = 3;
/// Upper bound of the bonus added to similarity.
const MAX_BONUS: f64 = 0.15;
/// Vote count at which the bonus reaches full weight.
const FULL_CONFIDENCE_VOTES: f64 = 10.0;
const HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct TemplateStats {
    pub helpful: u32,
    pub total: u32,
    pub rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeedbackSummary {
    pub total_templates_rated: usize,
    pub total_feedback: u32,
    pub total_helpful: u32,
    pub helpfulness_rate: f64,
    pub history_size: usize,
}

#[derive(Debug, Clone)]
struct Vote {
    article_id: String,
    query: String,
    is_helpful: bool,
    at: chrono::NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct FeedbackStore {
    templates: HashMap<String, (u32, u32)>,
    history: Vec<Vote>,
}

impl FeedbackStore {
    pub fn record(&mut self, article_id: &str, query: &str, is_helpful: bool) {
        let entry = self.templates.entry(article_id.to_string()).or_default();
        entry.1 += 1;
        if is_helpful {
            entry.0 += 1;
        }

        self.history.push(Vote {
            article_id: article_id.to_string(),
            query: query.to_string(),
            is_helpful,
            at: chrono::Local::now().naive_local(),
        });
        if self.history.len() > HISTORY_LIMIT {
            let excess = self.history.len() - HISTORY_LIMIT;
            self.history.drain(..excess);
        }

        if let Some(last) = self.history.last() {
            log::info!(
                "vote for {:.50} ({}) at {}: query {:?}",
                last.article_id,
                if last.is_helpful { "helpful" } else { "not helpful" },
                last.at.format("%H:%M:%S"),
                last.query
            );
        }
    }

    pub fn stats(&self, article_id: &str) -> TemplateStats {
        match self.templates.get(article_id) {
            Some(&(helpful, total)) if total > 0 => TemplateStats {
                helpful,
                total,
                rate: helpful as f64 / total as f64,
            },
            _ => TemplateStats::default(),
        }
    }

    /// Similarity bonus in `0.0..=0.15`.
    pub fn bonus(&self, article_id: &str) -> f64 {
        let stats = self.stats(article_id);
        if stats.total < MIN_VOTES_FOR_BONUS {
            return 0.0;
        }
        let confidence = (stats.total as f64 / FULL_CONFIDENCE_VOTES).min(1.0);
        stats.rate * MAX_BONUS * confidence
    }

    pub fn summary(&self) -> FeedbackSummary {
        let total_feedback: u32 = self.templates.values().map(|(_, total)| total).sum();
        let total_helpful: u32 = self.templates.values().map(|(helpful, _)| helpful).sum();

        FeedbackSummary {
            total_templates_rated: self.templates.len(),
            total_feedback,
            total_helpful,
            helpfulness_rate: if total_feedback > 0 {
                total_helpful as f64 / total_feedback as f64
            } else {
                0.0
            },
            history_size: self.history.len(),
        }
    }
}
