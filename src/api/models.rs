//! バックエンドAPIのワイヤ型
//!
//! `/api/*` エンドポイントが送受信するJSONをそのまま表現する。
//! サーバー側が省略しうるフィールドはすべて `#[serde(default)]` で受ける。

use serde::{Deserialize, Serialize};

/// フィードバック集計のキーとなる記事ID
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, derive_more::Display, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ArticleId(pub String);

impl ArticleId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 記事の行番号。ナレッジベースの読み込み元によって数値にも文字列にもなる
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArticleKey {
    Number(i64),
    Text(String),
}

/// `GET /api/version`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

/// `POST /api/init` リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitRequest {
    pub api_key: String,
}

/// `POST /api/init` レスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub articles_count: usize,
}

impl InitResponse {
    /// 初期化完了パネルに出す文言
    pub fn summary(&self) -> String {
        if self.articles_count > 0 {
            format!("{} (статей: {})", self.message, self.articles_count)
        } else {
            self.message.clone()
        }
    }
}

/// `GET /api/check_init`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitStatus {
    #[serde(default)]
    pub initialized: bool,
    #[serde(default)]
    pub articles_count: usize,
}

/// `POST /api/process_ticket` リクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketRequest {
    pub ticket_text: String,
}

/// 分類結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub subcategories: Vec<String>,
    /// 旧形式の単一サブカテゴリ（カンマ区切りのこともある）
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// 問い合わせから抽出された要点
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    pub main_issue: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub sentiment: String,
}

/// ナレッジベースの記事
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub id: Option<ArticleKey>,
    #[serde(default)]
    pub example_question: Option<String>,
    #[serde(default)]
    pub problem: Option<String>,
    #[serde(default)]
    pub template_answer: Option<String>,
    #[serde(default)]
    pub solution: Option<String>,
    #[serde(default)]
    pub main_category: Option<String>,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

fn first_filled<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> &'a str {
    primary
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| fallback.as_deref().filter(|s| !s.is_empty()))
        .unwrap_or("")
}

impl Article {
    /// 質問文（旧形式では `problem`）
    pub fn question(&self) -> &str {
        first_filled(&self.example_question, &self.problem)
    }

    /// 回答テンプレート（旧形式では `solution`）
    pub fn answer(&self) -> &str {
        first_filled(&self.template_answer, &self.solution)
    }
}

/// 記事ごとのフィードバック集計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackStats {
    #[serde(default)]
    pub helpful: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub rate: f64,
}

/// 類似記事の検索結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub similarity: f64,
    #[serde(default)]
    pub article: Article,
    #[serde(default)]
    pub article_id: ArticleId,
    #[serde(default)]
    pub feedback_stats: FeedbackStats,
    #[serde(default)]
    pub feedback_bonus: f64,
}

/// `POST /api/process_ticket` レスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketResult {
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub key_info: KeyInfo,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub suggested_response: String,
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default)]
    pub normalized_text: Option<String>,
    #[serde(default)]
    pub anglicism_changes: Option<Vec<String>>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TicketResult {
    /// バックエンドの処理時刻（タイムゾーン無しのISO 8601）
    pub fn processed_at(&self) -> Option<chrono::NaiveDateTime> {
        let raw = self.timestamp.as_deref()?.trim();
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

/// `POST /api/feedback` リクエスト
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub article_id: ArticleId,
    pub query: String,
    pub is_helpful: bool,
}

/// フィードバック全体の統計（`GET /api/feedback/stats`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackSummary {
    #[serde(default)]
    pub total_templates_rated: u32,
    #[serde(default)]
    pub total_feedback: u32,
    #[serde(default)]
    pub total_helpful: u32,
    #[serde(default)]
    pub helpfulness_rate: f64,
    #[serde(default)]
    pub history_size: u32,
}

/// `POST /api/feedback` レスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stats: Option<FeedbackSummary>,
}

/// 非2xxレスポンスのボディ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub attempts: Option<u32>,
    #[serde(default)]
    pub retry_available: Option<bool>,
}

impl ErrorBody {
    pub const RATE_LIMIT_CODE: &'static str = "rate_limit";

    pub fn is_rate_limit(&self) -> bool {
        self.error.as_deref() == Some(Self::RATE_LIMIT_CODE)
    }
}
