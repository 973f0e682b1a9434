use serde::{Deserialize, Serialize};

use crate::api::models::ArticleId;
use crate::gui::toast::ToastQueue;

/// 画面要素のID（ページマークアップとの固定契約）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    AppVersion,
    ApiModal,
    ApiKeyInput,
    InitButton,
    InitLoading,
    InitError,
    InitSuccess,
    ArticlesCount,
    TicketInput,
    ProcessButton,
    Loading,
    ErrorMessage,
    Category,
    ClassConfidence,
    Subcategory,
    MainIssue,
    Urgency,
    Sentiment,
    Confidence,
    SuggestedResponse,
    SourcesCard,
    SourcesCount,
    SourcesList,
}

impl ElementId {
    pub fn dom_id(&self) -> &'static str {
        match self {
            ElementId::AppVersion => "appVersion",
            ElementId::ApiModal => "apiModal",
            ElementId::ApiKeyInput => "apiKeyInput",
            ElementId::InitButton => "initBtn",
            ElementId::InitLoading => "initLoading",
            ElementId::InitError => "initError",
            ElementId::InitSuccess => "initSuccess",
            ElementId::ArticlesCount => "articlesCount",
            ElementId::TicketInput => "ticketInput",
            ElementId::ProcessButton => "processBtn",
            ElementId::Loading => "loading",
            ElementId::ErrorMessage => "errorMessage",
            ElementId::Category => "category",
            ElementId::ClassConfidence => "classConfidence",
            ElementId::Subcategory => "subcategory",
            ElementId::MainIssue => "mainIssue",
            ElementId::Urgency => "urgency",
            ElementId::Sentiment => "sentiment",
            ElementId::Confidence => "confidence",
            ElementId::SuggestedResponse => "suggestedResponse",
            ElementId::SourcesCard => "sourcesCard",
            ElementId::SourcesCount => "sourcesCount",
            ElementId::SourcesList => "sourcesList",
        }
    }
}

/// ネットワーク呼び出しを起動するコントロール
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    /// 問い合わせ送信ボタンとメインのローディング表示
    Submit,
    /// APIキー初期化ボタンとモーダル内のローディング表示
    Init,
}

impl Control {
    pub fn button(&self) -> ElementId {
        match self {
            Control::Submit => ElementId::ProcessButton,
            Control::Init => ElementId::InitButton,
        }
    }

    pub fn loading_indicator(&self) -> ElementId {
        match self {
            Control::Submit => ElementId::Loading,
            Control::Init => ElementId::InitLoading,
        }
    }
}

/// ボタンとローディング表示の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlState {
    pub enabled: bool,
    pub loading: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            enabled: true,
            loading: false,
        }
    }
}

/// エラー表示の置き場所
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorSlot {
    /// メイン画面のエラーバナー
    Main,
    /// APIキーモーダル内のエラー
    Init,
}

impl ErrorSlot {
    pub fn element(&self) -> ElementId {
        match self {
            ErrorSlot::Main => ElementId::ErrorMessage,
            ErrorSlot::Init => ElementId::InitError,
        }
    }
}

/// インラインエラーの表示状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDisplay {
    pub message: String,
    pub active: bool,
    /// 表示ごとに増える世代番号（古いタイマーによる消去を防ぐ）
    pub generation: u64,
}

/// フォーカス追跡対象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    TicketInput,
    SuggestedResponse,
    ApiKeyInput,
}

impl FocusTarget {
    pub fn element(&self) -> ElementId {
        match self {
            FocusTarget::TicketInput => ElementId::TicketInput,
            FocusTarget::SuggestedResponse => ElementId::SuggestedResponse,
            FocusTarget::ApiKeyInput => ElementId::ApiKeyInput,
        }
    }
}

/// バッジの重要度クラス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn css_class(&self) -> &'static str {
        match self {
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }

    /// `badge high` のような完全なクラス文字列
    pub fn badge_class(&self) -> String {
        format!("badge {}", self.css_class())
    }
}

/// サブカテゴリ表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subcategories {
    /// プレースホルダー（—）を表示
    Empty,
    List(Vec<String>),
}

impl Subcategories {
    pub const PLACEHOLDER: &'static str = "—";

    pub fn items(&self) -> &[String] {
        match self {
            Subcategories::Empty => &[],
            Subcategories::List(items) => items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }
}

/// 分類・要点パネルのビューモデル
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub category: String,
    pub confidence_label: String,
    pub confidence_class: Severity,
    pub subcategories: Subcategories,
    pub main_issue: String,
    pub urgency_label: String,
    pub urgency_class: Severity,
    pub sentiment: String,
    pub overall_confidence: String,
    /// バックエンドの処理時刻（HH:MM:SS）
    pub processed_at: Option<String>,
}

/// 記事ごとのフィードバックボタン状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedbackButtonState {
    #[default]
    Idle,
    Pending,
    Recorded,
}

impl FeedbackButtonState {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackButtonState::Idle => "👍 Полезно",
            FeedbackButtonState::Pending => "⏳",
            FeedbackButtonState::Recorded => "✅ Отмечено",
        }
    }

    pub fn is_disabled(&self) -> bool {
        !matches!(self, FeedbackButtonState::Idle)
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackButtonState::Recorded => "feedback-btn feedback-sent",
            _ => "feedback-btn",
        }
    }
}

/// 類似記事カードのビューモデル
#[derive(Debug, Clone, PartialEq)]
pub struct SourceCard {
    pub article_id: ArticleId,
    pub similarity_percent: u32,
    /// フィードバックボーナスが正のときのみ（パーセント）
    pub bonus_percent: Option<u32>,
    pub question: String,
    pub answer_preview: String,
    pub full_answer: String,
    /// `👍 helpful/total (rate%)`。フィードバックが無ければNone
    pub feedback_line: Option<String>,
    pub feedback: FeedbackButtonState,
}

/// 類似記事パネル
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcesPanel {
    pub visible: bool,
    pub cards: Vec<SourceCard>,
    /// カードを差し替えるたびに増える世代
    pub generation: u64,
}

impl SourcesPanel {
    pub fn count(&self) -> usize {
        self.cards.len()
    }
}

/// APIキーモーダルの状態
#[derive(Debug, Clone, PartialEq)]
pub struct ApiModalState {
    pub open: bool,
    pub api_key_input: String,
    pub control: ControlState,
    pub error: ErrorDisplay,
    /// 初期化成功時の文言（記事数を含む）
    pub success_message: Option<String>,
}

impl Default for ApiModalState {
    fn default() -> Self {
        Self {
            open: true,
            api_key_input: String::new(),
            control: ControlState::default(),
            error: ErrorDisplay::default(),
            success_message: None,
        }
    }
}

/// ヘッダーに表示するフィードバック統計
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackOverview {
    pub total_feedback: u32,
    pub helpfulness_percent: u32,
}

/// ページ全体の状態
#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub app_version: String,
    pub api_modal: ApiModalState,
    pub ticket_input: String,
    pub submit: ControlState,
    pub error: ErrorDisplay,
    pub result: Option<ResultPanel>,
    pub response_text: String,
    pub sources: SourcesPanel,
    pub focus: Option<FocusTarget>,
    pub toasts: ToastQueue,
    pub feedback_overview: Option<FeedbackOverview>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            app_version: String::new(),
            api_modal: ApiModalState::default(),
            ticket_input: String::new(),
            submit: ControlState::default(),
            error: ErrorDisplay::default(),
            result: None,
            response_text: String::new(),
            sources: SourcesPanel::default(),
            focus: None,
            toasts: ToastQueue::default(),
            feedback_overview: None,
        }
    }
}

impl PageState {
    pub fn control(&self, control: Control) -> &ControlState {
        match control {
            Control::Submit => &self.submit,
            Control::Init => &self.api_modal.control,
        }
    }

    pub fn control_mut(&mut self, control: Control) -> &mut ControlState {
        match control {
            Control::Submit => &mut self.submit,
            Control::Init => &mut self.api_modal.control,
        }
    }

    pub fn error(&self, slot: ErrorSlot) -> &ErrorDisplay {
        match slot {
            ErrorSlot::Main => &self.error,
            ErrorSlot::Init => &self.api_modal.error,
        }
    }

    pub fn error_mut(&mut self, slot: ErrorSlot) -> &mut ErrorDisplay {
        match slot {
            ErrorSlot::Main => &mut self.error,
            ErrorSlot::Init => &mut self.api_modal.error,
        }
    }
}
