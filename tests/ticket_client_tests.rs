//! 画面フローの統合テスト
//!
//! 録画用のフェイクAPIとメモリ上のビュー・クリップボードで
//! `TicketClient` の各操作を検証する。

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use smartsupport::api::models::{
    Article, ArticleId, ArticleKey, Classification, FeedbackRequest, FeedbackResponse,
    FeedbackStats, FeedbackSummary, InitResponse, InitStatus, KeyInfo, SearchResult,
    TicketResult, VersionInfo,
};
use smartsupport::gui::clipboard::MemoryClipboard;
use smartsupport::gui::hotkeys::{resolve_global, HotkeyAction, HotkeyContext, KeyName, KeyStroke};
use smartsupport::gui::models::{Control, FeedbackButtonState, FocusTarget};
use smartsupport::{
    ActionError, ApiError, ClientSettings, MemoryView, SupportApi, TicketClient, TicketView,
};

/// フェイクAPIの応答
#[derive(Debug, Clone)]
enum Outcome {
    Ok,
    RateLimited(Option<u32>),
    Server(Option<String>),
    /// 応答を返さない
    Hang,
    /// 通知されるまで待ってから成功する
    Gated(Arc<Notify>),
}

impl Outcome {
    async fn resolve<T>(&self, ok: T) -> Result<T, ApiError> {
        match self {
            Outcome::Ok => Ok(ok),
            Outcome::RateLimited(attempts) => Err(ApiError::RateLimited {
                attempts: *attempts,
                message: None,
            }),
            Outcome::Server(message) => Err(ApiError::Server {
                status: 400,
                message: message.clone(),
            }),
            Outcome::Hang => std::future::pending().await,
            Outcome::Gated(gate) => {
                gate.notified().await;
                Ok(ok)
            }
        }
    }
}

struct FakeApi {
    version: Mutex<Outcome>,
    initialized: Mutex<bool>,
    init: Mutex<Outcome>,
    ticket: Mutex<Outcome>,
    ticket_result: Mutex<TicketResult>,
    feedback: Mutex<Outcome>,
    feedback_stats_in_response: Mutex<bool>,
    calls: Mutex<Vec<String>>,
    init_keys: Mutex<Vec<String>>,
    tickets: Mutex<Vec<String>>,
    feedback_requests: Mutex<Vec<FeedbackRequest>>,
}

impl FakeApi {
    fn new() -> Self {
        Self {
            version: Mutex::new(Outcome::Ok),
            initialized: Mutex::new(false),
            init: Mutex::new(Outcome::Ok),
            ticket: Mutex::new(Outcome::Ok),
            ticket_result: Mutex::new(sample_result()),
            feedback: Mutex::new(Outcome::Ok),
            feedback_stats_in_response: Mutex::new(true),
            calls: Mutex::new(Vec::new()),
            init_keys: Mutex::new(Vec::new()),
            tickets: Mutex::new(Vec::new()),
            feedback_requests: Mutex::new(Vec::new()),
        }
    }

    fn record(&self, endpoint: &str) {
        self.calls.lock().push(endpoint.to_string());
    }

    fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().iter().filter(|c| *c == endpoint).count()
    }
}

fn summary() -> FeedbackSummary {
    FeedbackSummary {
        total_templates_rated: 1,
        total_feedback: 4,
        total_helpful: 3,
        helpfulness_rate: 0.75,
        history_size: 4,
    }
}

#[async_trait]
impl SupportApi for FakeApi {
    async fn version(&self) -> Result<VersionInfo, ApiError> {
        self.record("version");
        let outcome = self.version.lock().clone();
        outcome
            .resolve(VersionInfo {
                version: "3.1.4".to_string(),
            })
            .await
    }

    async fn check_init(&self) -> Result<InitStatus, ApiError> {
        self.record("check_init");
        let initialized = *self.initialized.lock();
        Ok(InitStatus {
            initialized,
            articles_count: if initialized { 42 } else { 0 },
        })
    }

    async fn init(&self, api_key: &str) -> Result<InitResponse, ApiError> {
        self.record("init");
        self.init_keys.lock().push(api_key.to_string());
        let outcome = self.init.lock().clone();
        outcome
            .resolve(InitResponse {
                success: true,
                message: "Система успешно инициализирована".to_string(),
                articles_count: 42,
            })
            .await
    }

    async fn process_ticket(&self, ticket_text: &str) -> Result<TicketResult, ApiError> {
        self.record("process_ticket");
        self.tickets.lock().push(ticket_text.to_string());
        let outcome = self.ticket.lock().clone();
        let result = self.ticket_result.lock().clone();
        outcome.resolve(result).await
    }

    async fn send_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        self.record("feedback");
        self.feedback_requests.lock().push(request.clone());
        let outcome = self.feedback.lock().clone();
        let stats = (*self.feedback_stats_in_response.lock()).then(summary);
        outcome
            .resolve(FeedbackResponse {
                success: true,
                message: "Спасибо за обратную связь!".to_string(),
                stats,
            })
            .await
    }

    async fn feedback_stats(&self) -> Result<FeedbackSummary, ApiError> {
        self.record("feedback_stats");
        Ok(summary())
    }
}

fn search_result(id: i64, question: &str, answer: &str) -> SearchResult {
    SearchResult {
        similarity: 0.82,
        article: Article {
            id: Some(ArticleKey::Number(id)),
            example_question: Some(question.to_string()),
            template_answer: Some(answer.to_string()),
            ..Article::default()
        },
        article_id: ArticleId::new(format!("{}_{}", question, answer)),
        feedback_stats: FeedbackStats::default(),
        feedback_bonus: 0.0,
    }
}

fn sample_result() -> TicketResult {
    TicketResult {
        classification: Classification {
            category: "Карты".to_string(),
            confidence: "высокая".to_string(),
            subcategories: vec!["Блокировка карты".to_string()],
            ..Classification::default()
        },
        key_info: KeyInfo {
            main_issue: "Потеря карты".to_string(),
            urgency: "Срочный".to_string(),
            sentiment: "тревожный".to_string(),
        },
        confidence: "высокая".to_string(),
        suggested_response: "Здравствуйте! Заблокируйте карту в приложении.".to_string(),
        search_results: vec![
            search_result(1, "Как заблокировать карту?", "Через приложение."),
            search_result(2, "Как сменить PIN?", "В настройках карты."),
        ],
        ..TicketResult::default()
    }
}

struct Harness {
    api: Arc<FakeApi>,
    clipboard: Arc<MemoryClipboard>,
    view: MemoryView,
    client: TicketClient<MemoryView>,
}

fn harness() -> Harness {
    harness_with(FakeApi::new())
}

fn harness_with(api: FakeApi) -> Harness {
    let api = Arc::new(api);
    let clipboard = Arc::new(MemoryClipboard::default());
    let view = MemoryView::new();
    let settings = ClientSettings {
        modal_close_delay: Duration::ZERO,
        ..ClientSettings::default()
    };
    let client = TicketClient::new(api.clone(), clipboard.clone(), view.clone(), settings);
    Harness {
        api,
        clipboard,
        view,
        client,
    }
}

/// 起動処理のテスト
mod startup_tests {
    use super::*;

    #[tokio::test]
    async fn test_startup_shows_backend_version() {
        let h = harness();
        h.client.startup().await;

        let state = h.view.snapshot();
        assert_eq!(state.app_version, "v3.1.4");
        assert!(state.api_modal.open);
        assert_eq!(h.api.call_count("check_init"), 1);
    }

    #[tokio::test]
    async fn test_startup_falls_back_on_version_error() {
        let api = FakeApi::new();
        *api.version.lock() = Outcome::Server(None);
        let h = harness_with(api);

        h.client.startup().await;
        assert_eq!(h.view.snapshot().app_version, "v2.2.0");
    }

    #[tokio::test]
    async fn test_startup_closes_modal_when_already_initialized() {
        let api = FakeApi::new();
        *api.initialized.lock() = true;
        let h = harness_with(api);

        h.client.startup().await;
        let state = h.view.snapshot();
        assert!(!state.api_modal.open);
        assert!(state
            .api_modal
            .success_message
            .as_deref()
            .is_some_and(|m| m.contains("42")));
    }
}

/// APIキー初期化のテスト
mod init_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_key_is_rejected_locally() {
        let h = harness();
        h.view.update(|s| s.api_modal.api_key_input = "   ".to_string());

        let result = h.client.initialize_system().await;
        assert!(matches!(result, Err(ActionError::EmptyApiKey)));
        assert_eq!(h.api.call_count("init"), 0);

        let state = h.view.snapshot();
        assert!(state.api_modal.error.active);
        assert_eq!(state.api_modal.error.message, "Введите API ключ");
        assert!(!state.error.active);
    }

    #[tokio::test]
    async fn test_init_success_closes_modal_and_focuses_input() {
        let h = harness();
        h.view.update(|s| s.api_modal.api_key_input = "  sk-test  ".to_string());

        h.client.initialize_system().await.unwrap();
        assert_eq!(h.api.init_keys.lock().as_slice(), ["sk-test"]);

        let state = h.view.snapshot();
        assert!(!state.api_modal.open);
        assert_eq!(state.focus, Some(FocusTarget::TicketInput));
        assert_eq!(
            state.api_modal.success_message.as_deref(),
            Some("Система успешно инициализирована (статей: 42)")
        );
        // 成功後はボタンを押せないままにする
        assert!(!state.api_modal.control.enabled);
        assert!(!state.api_modal.control.loading);
    }

    #[tokio::test]
    async fn test_init_failure_shows_server_text_and_restores_button() {
        let api = FakeApi::new();
        *api.init.lock() = Outcome::Server(Some("API ключ не может быть пустым".to_string()));
        let h = harness_with(api);
        h.view.update(|s| s.api_modal.api_key_input = "sk-test".to_string());

        let result = h.client.initialize_system().await;
        assert!(matches!(result, Err(ActionError::Backend { .. })));

        let state = h.view.snapshot();
        assert!(state.api_modal.open);
        assert_eq!(state.api_modal.error.message, "API ключ не может быть пустым");
        assert!(state.api_modal.control.enabled);
        assert!(!state.api_modal.control.loading);
    }

    #[tokio::test]
    async fn test_rate_limited_init_shows_fallback() {
        let api = FakeApi::new();
        *api.init.lock() = Outcome::RateLimited(Some(3));
        let h = harness_with(api);
        h.view.update(|s| s.api_modal.api_key_input = "sk-test".to_string());

        let result = h.client.initialize_system().await;
        assert!(matches!(result, Err(ActionError::Backend { .. })));
        assert_eq!(
            h.view.snapshot().api_modal.error.message,
            "Ошибка инициализации"
        );
    }

    #[tokio::test]
    async fn test_init_failure_without_text_uses_fallback() {
        let api = FakeApi::new();
        *api.init.lock() = Outcome::Server(None);
        let h = harness_with(api);
        h.view.update(|s| s.api_modal.api_key_input = "sk-test".to_string());

        let _ = h.client.initialize_system().await;
        assert_eq!(
            h.view.snapshot().api_modal.error.message,
            "Ошибка инициализации"
        );
    }
}

/// 問い合わせ送信のテスト
mod submit_tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_ticket_sends_nothing() {
        let h = harness();
        h.view.set_ticket_text(" \n\t ");

        let result = h.client.submit_ticket().await;
        assert!(matches!(result, Err(ActionError::EmptyTicket)));
        assert_eq!(h.api.call_count("process_ticket"), 0);

        let state = h.view.snapshot();
        assert!(state.error.active);
        assert_eq!(state.error.message, "Введите текст обращения");
        assert!(state.submit.enabled);
    }

    #[tokio::test]
    async fn test_submit_renders_every_panel() {
        let h = harness();
        h.view.set_ticket_text("  Потерял карту, что делать?  ");

        h.client.submit_ticket().await.unwrap();
        assert_eq!(
            h.api.tickets.lock().as_slice(),
            ["Потерял карту, что делать?"]
        );

        let state = h.view.snapshot();
        let panel = state.result.expect("result panel");
        assert_eq!(panel.category, "Карты");
        assert_eq!(panel.urgency_label, "Срочный");
        assert_eq!(
            state.response_text,
            "Здравствуйте! Заблокируйте карту в приложении."
        );
        assert!(state.sources.visible);
        assert_eq!(state.sources.count(), 2);
        assert_eq!(state.sources.cards[0].similarity_percent, 82);
        assert!(state.submit.enabled);
        assert!(!state.submit.loading);

        let session = h.client.session();
        assert_eq!(
            session.reset_target(),
            Some("Здравствуйте! Заблокируйте карту в приложении.")
        );
        assert_eq!(session.feedback_query(), Some("Потерял карту, что делать?"));
    }

    #[tokio::test]
    async fn test_empty_sources_leave_previous_cards() {
        let h = harness();
        h.view.set_ticket_text("Потерял карту");
        h.client.submit_ticket().await.unwrap();

        h.api.ticket_result.lock().search_results.clear();
        h.view.set_ticket_text("Другой вопрос");
        h.client.submit_ticket().await.unwrap();

        let state = h.view.snapshot();
        assert!(state.sources.visible);
        assert_eq!(state.sources.count(), 2);
    }

    #[tokio::test]
    async fn test_rate_limit_without_attempts_reports_first_attempt() {
        let api = FakeApi::new();
        *api.ticket.lock() = Outcome::RateLimited(None);
        let h = harness_with(api);
        h.view.set_ticket_text("Потерял карту");

        let result = h.client.submit_ticket().await;
        assert!(matches!(result, Err(ActionError::RateLimited { attempts: 1 })));

        let state = h.view.snapshot();
        assert_eq!(
            state.error.message,
            "API перегружен. Попытка 1. Подождите минуту."
        );
        assert!(state.submit.enabled);
        assert!(!state.submit.loading);
        assert!(!h.client.session().is_submit_in_flight());
    }

    #[tokio::test]
    async fn test_rate_limit_reports_server_attempts() {
        let api = FakeApi::new();
        *api.ticket.lock() = Outcome::RateLimited(Some(3));
        let h = harness_with(api);
        h.view.set_ticket_text("Потерял карту");

        let _ = h.client.submit_ticket().await;
        assert_eq!(
            h.view.snapshot().error.message,
            "API перегружен. Попытка 3. Подождите минуту."
        );
    }

    #[tokio::test]
    async fn test_server_error_text_and_fallback() {
        let api = FakeApi::new();
        *api.ticket.lock() =
            Outcome::Server(Some("Система не инициализирована. Введите API ключ.".to_string()));
        let h = harness_with(api);
        h.view.set_ticket_text("Потерял карту");

        let _ = h.client.submit_ticket().await;
        assert_eq!(
            h.view.snapshot().error.message,
            "Система не инициализирована. Введите API ключ."
        );

        *h.api.ticket.lock() = Outcome::Server(None);
        let _ = h.client.submit_ticket().await;
        assert_eq!(h.view.snapshot().error.message, "Ошибка обработки");
        assert!(h.view.snapshot().result.is_none());
    }

    #[tokio::test]
    async fn test_second_submit_while_pending_sends_nothing() {
        let api = FakeApi::new();
        *api.ticket.lock() = Outcome::Hang;
        let h = harness_with(api);
        h.view.set_ticket_text("Потерял карту");

        let mut first = Box::pin(h.client.submit_ticket());
        let pending = tokio::time::timeout(Duration::from_millis(20), &mut first).await;
        assert!(pending.is_err());

        let busy = h.view.snapshot();
        assert!(!busy.submit.enabled);
        assert!(busy.submit.loading);

        let second = h.client.submit_ticket().await;
        assert!(matches!(second, Err(ActionError::InFlight)));
        assert_eq!(h.api.call_count("process_ticket"), 1);
        assert!(!h.view.snapshot().error.active);

        // 中断されたリクエストでもボタンは元に戻る
        drop(first);
        let state = h.view.snapshot();
        assert!(state.submit.enabled);
        assert!(!state.submit.loading);
        assert!(!h.client.session().is_submit_in_flight());
    }
}

/// 回答欄と類似記事のテスト
mod response_tests {
    use super::*;

    #[tokio::test]
    async fn test_select_source_then_reset_restores_selection() {
        let h = harness();
        h.view.set_ticket_text("Потерял карту");
        h.client.submit_ticket().await.unwrap();

        let answer = h.view.source_card(1).unwrap().full_answer;
        h.client.select_source(&answer);
        assert_eq!(h.view.response_text(), "В настройках карты.");
        assert_eq!(
            h.view.snapshot().toasts.last_message(),
            Some("Ответ загружен!")
        );

        h.view.set_response_text("отредактированный текст");
        h.client.reset_response().unwrap();
        assert_eq!(h.view.response_text(), "В настройках карты.");
        assert_eq!(
            h.view.snapshot().toasts.last_message(),
            Some("Восстановлено!")
        );
    }

    #[test]
    fn test_reset_without_response_is_silent() {
        let h = harness();
        h.view.set_response_text("черновик");

        let result = h.client.reset_response();
        assert!(matches!(result, Err(ActionError::NothingToRestore)));
        let state = h.view.snapshot();
        assert_eq!(state.response_text, "черновик");
        assert!(!state.error.active);
        assert!(state.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_copy_response_writes_clipboard() {
        let h = harness();
        h.view.set_response_text("Готовый ответ");

        h.client.copy_response().await.unwrap();
        assert_eq!(h.clipboard.contents(), "Готовый ответ");
        assert_eq!(h.view.snapshot().toasts.last_message(), Some("Скопировано!"));
    }

    #[tokio::test]
    async fn test_copy_failure_is_reported() {
        let h = harness();
        h.clipboard.deny_access(true);

        let result = h.client.copy_response().await;
        assert!(matches!(result, Err(ActionError::ClipboardWrite(_))));
        assert_eq!(h.view.snapshot().error.message, "Не удалось скопировать");
    }
}

/// フィードバックのテスト
mod feedback_tests {
    use super::*;

    async fn submitted() -> Harness {
        let h = harness();
        h.view.set_ticket_text("Потерял карту");
        h.client.submit_ticket().await.unwrap();
        h
    }

    #[tokio::test]
    async fn test_feedback_without_query_is_rejected() {
        let h = harness();
        h.client.render_results(&sample_result());

        let result = h.client.send_feedback(0, true).await;
        assert!(matches!(result, Err(ActionError::FeedbackUnattributed)));
        assert_eq!(h.api.call_count("feedback"), 0);
        assert_eq!(
            h.view.snapshot().error.message,
            "Невозможно отправить отзыв"
        );
    }

    #[tokio::test]
    async fn test_feedback_without_article_id_is_rejected() {
        let h = submitted().await;
        h.view
            .update(|s| s.sources.cards[0].article_id = ArticleId::default());

        let result = h.client.send_feedback(0, true).await;
        assert!(matches!(result, Err(ActionError::FeedbackUnattributed)));
        assert_eq!(h.api.call_count("feedback"), 0);
    }

    #[tokio::test]
    async fn test_feedback_records_and_updates_overview() {
        let h = submitted().await;

        h.client.send_feedback(0, true).await.unwrap();
        let requests = h.api.feedback_requests.lock().clone();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].article_id,
            ArticleId::new("Как заблокировать карту?_Через приложение.")
        );
        assert_eq!(requests[0].query, "Потерял карту");
        assert!(requests[0].is_helpful);

        let state = h.view.snapshot();
        assert_eq!(state.sources.cards[0].feedback, FeedbackButtonState::Recorded);
        assert_eq!(state.sources.cards[1].feedback, FeedbackButtonState::Idle);
        assert_eq!(
            state.toasts.last_message(),
            Some("Спасибо за обратную связь!")
        );
        let overview = state.feedback_overview.unwrap();
        assert_eq!(overview.total_feedback, 4);
        assert_eq!(overview.helpfulness_percent, 75);
    }

    #[tokio::test]
    async fn test_recorded_feedback_is_not_sent_twice() {
        let h = submitted().await;
        h.client.send_feedback(0, true).await.unwrap();

        let again = h.client.send_feedback(0, true).await;
        assert!(matches!(again, Err(ActionError::FeedbackAlreadySent)));
        assert_eq!(h.api.call_count("feedback"), 1);
        assert!(!h.view.snapshot().error.active);
    }

    #[tokio::test]
    async fn test_pending_feedback_ignores_second_click() {
        let h = submitted().await;
        let gate = Arc::new(Notify::new());
        *h.api.feedback.lock() = Outcome::Gated(gate.clone());

        let mut vote = Box::pin(h.client.send_feedback(0, true));
        let pending = tokio::time::timeout(Duration::from_millis(20), &mut vote).await;
        assert!(pending.is_err());
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Pending
        );

        let again = h.client.send_feedback(0, true).await;
        assert!(matches!(again, Err(ActionError::FeedbackAlreadySent)));
        assert_eq!(h.api.call_count("feedback"), 1);
        assert!(!h.view.snapshot().error.active);

        gate.notify_one();
        vote.await.unwrap();
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Recorded
        );
    }

    #[tokio::test]
    async fn test_late_feedback_leaves_new_sources_alone() {
        let h = submitted().await;
        let gate = Arc::new(Notify::new());
        *h.api.feedback.lock() = Outcome::Gated(gate.clone());

        let mut vote = Box::pin(h.client.send_feedback(0, true));
        let pending = tokio::time::timeout(Duration::from_millis(20), &mut vote).await;
        assert!(pending.is_err());

        // 送信中に次の問い合わせで類似記事が差し替わる
        h.api.ticket_result.lock().search_results = vec![search_result(
            5,
            "Когда начисляются проценты?",
            "Ежемесячно.",
        )];
        h.view.set_ticket_text("Когда начисляются проценты?");
        h.client.submit_ticket().await.unwrap();
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Idle
        );

        gate.notify_one();
        vote.await.unwrap();
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Idle
        );
    }

    #[tokio::test]
    async fn test_cancelled_feedback_leaves_new_sources_alone() {
        let h = submitted().await;
        *h.api.feedback.lock() = Outcome::Hang;

        let mut vote = Box::pin(h.client.send_feedback(0, true));
        let pending = tokio::time::timeout(Duration::from_millis(20), &mut vote).await;
        assert!(pending.is_err());

        h.view.set_ticket_text("Другой вопрос");
        h.client.submit_ticket().await.unwrap();
        h.view.set_feedback_state(0, FeedbackButtonState::Recorded);

        drop(vote);
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Recorded
        );
    }

    #[tokio::test]
    async fn test_rate_limited_feedback_shows_fallback() {
        let h = submitted().await;
        *h.api.feedback.lock() = Outcome::RateLimited(Some(2));

        let result = h.client.send_feedback(0, true).await;
        assert!(matches!(result, Err(ActionError::Backend { .. })));
        assert_eq!(h.view.snapshot().error.message, "Ошибка отправки отзыва");
        assert_eq!(
            h.view.source_card(0).unwrap().feedback,
            FeedbackButtonState::Idle
        );
    }

    #[tokio::test]
    async fn test_feedback_failure_restores_button() {
        let h = submitted().await;
        *h.api.feedback.lock() = Outcome::Server(None);

        let result = h.client.send_feedback(0, false).await;
        assert!(result.is_err());

        let state = h.view.snapshot();
        assert_eq!(state.sources.cards[0].feedback, FeedbackButtonState::Idle);
        assert_eq!(state.error.message, "Ошибка отправки отзыва");
    }

    #[tokio::test]
    async fn test_feedback_without_stats_refreshes_summary() {
        let h = submitted().await;
        *h.api.feedback_stats_in_response.lock() = false;

        h.client.send_feedback(1, true).await.unwrap();
        assert_eq!(h.api.call_count("feedback_stats"), 1);
        assert!(h.view.snapshot().feedback_overview.is_some());
    }
}

/// クリップボード貼り付けとショートカットのテスト
mod clipboard_and_hotkey_tests {
    use super::*;

    #[tokio::test]
    async fn test_paste_trims_and_focuses_input() {
        let h = harness();
        h.clipboard.set_contents("\n  Не приходит SMS  \n");

        h.client.paste_to_question().await.unwrap();
        let state = h.view.snapshot();
        assert_eq!(state.ticket_input, "Не приходит SMS");
        assert_eq!(state.focus, Some(FocusTarget::TicketInput));
        assert_eq!(
            state.toasts.last_message(),
            Some("Текст вставлен в поле вопроса")
        );
    }

    #[tokio::test]
    async fn test_paste_empty_clipboard() {
        let h = harness();
        h.view.set_ticket_text("старый текст");
        h.clipboard.set_contents("   ");

        let result = h.client.paste_to_question().await;
        assert!(matches!(result, Err(ActionError::ClipboardEmpty)));
        let state = h.view.snapshot();
        assert_eq!(state.ticket_input, "старый текст");
        assert_eq!(state.error.message, "Буфер обмена пуст");
    }

    #[tokio::test]
    async fn test_paste_denied() {
        let h = harness();
        h.clipboard.deny_access(true);

        let result = h.client.paste_to_question().await;
        assert!(matches!(result, Err(ActionError::ClipboardRead(_))));
        assert_eq!(
            h.view.snapshot().error.message,
            "Не удалось прочитать буфер обмена"
        );
    }

    #[tokio::test]
    async fn test_ctrl_enter_submits_through_hotkey() {
        let h = harness();
        h.view.set_ticket_text("Потерял карту");

        let context = HotkeyContext {
            modal_open: h.view.is_modal_open(),
            focus: h.view.focused(),
        };
        // モーダル表示中はショートカット無効
        assert_eq!(
            resolve_global(&KeyStroke::ctrl(KeyName::Enter), &context),
            None
        );

        h.view.close_api_modal();
        let context = HotkeyContext {
            modal_open: h.view.is_modal_open(),
            focus: h.view.focused(),
        };
        let action = resolve_global(&KeyStroke::ctrl(KeyName::Enter), &context).unwrap();
        assert_eq!(action, HotkeyAction::SubmitTicket);

        h.client.handle_hotkey(action).await.unwrap();
        assert_eq!(h.api.call_count("process_ticket"), 1);
    }

    #[tokio::test]
    async fn test_ctrl_c_copies_response_through_hotkey() {
        let h = harness();
        h.view.close_api_modal();
        h.view.set_response_text("Ответ клиенту");

        let action = resolve_global(
            &KeyStroke::ctrl(KeyName::Char('c')),
            &HotkeyContext::default(),
        )
        .unwrap();
        h.client.handle_hotkey(action).await.unwrap();
        assert_eq!(h.clipboard.contents(), "Ответ клиенту");
    }

    #[test]
    fn test_busy_control_helpers() {
        let h = harness();
        h.view.set_control_busy(Control::Submit, true);
        assert!(!h.view.snapshot().submit.enabled);
    }
}
