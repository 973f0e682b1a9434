//! 問い合わせ処理のフロー
//!
//! 画面操作ごとに1つの `async fn` を持つ。各フローはバックエンド呼び出し中に
//! 起動元のコントロールを無効化し、成功・失敗・キャンセルのいずれでも
//! ドロップガードで元に戻す。

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::api::models::{FeedbackRequest, FeedbackSummary, SearchResult, TicketResult};
use crate::api::SupportApi;
use crate::gui::clipboard::Clipboard;
use crate::gui::error::ActionError;
use crate::gui::hotkeys::HotkeyAction;
use crate::gui::models::{
    Control, ErrorSlot, FeedbackButtonState, FeedbackOverview, FocusTarget,
};
use crate::gui::presenter;
use crate::gui::session::ClientSession;
use crate::gui::view::TicketView;

const INIT_FAILED: &str = "Ошибка инициализации";
const PROCESS_FAILED: &str = "Ошибка обработки";
const FEEDBACK_FAILED: &str = "Ошибка отправки отзыва";

const TOAST_PASTED: &str = "Текст вставлен в поле вопроса";
const TOAST_COPIED: &str = "Скопировано!";
const TOAST_RESTORED: &str = "Восстановлено!";
const TOAST_ANSWER_LOADED: &str = "Ответ загружен!";
const TOAST_FEEDBACK_THANKS: &str = "Спасибо за обратную связь!";

const ALREADY_INITIALIZED: &str = "Система уже инициализирована";

/// バージョン取得に失敗したときの表示
pub const FALLBACK_VERSION: &str = "2.2.0";

/// クライアントの動作設定
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    /// `/api/version` が失敗したときに表示するバージョン
    pub fallback_version: String,
    /// 初期化成功からモーダルを閉じるまでの待ち時間
    pub modal_close_delay: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            fallback_version: FALLBACK_VERSION.to_string(),
            modal_close_delay: Duration::from_millis(1500),
        }
    }
}

/// コントロールをビジー状態にし、ドロップ時に元に戻す
struct BusyGuard<'a, V: TicketView> {
    view: &'a V,
    control: Control,
    session: Option<&'a Mutex<ClientSession>>,
    keep_disabled: bool,
}

impl<'a, V: TicketView> BusyGuard<'a, V> {
    fn new(view: &'a V, control: Control, session: Option<&'a Mutex<ClientSession>>) -> Self {
        view.set_control_busy(control, true);
        Self {
            view,
            control,
            session,
            keep_disabled: false,
        }
    }

    /// ローディング表示だけ消し、ボタンは無効のままにする
    fn hold_disabled(&mut self) {
        self.keep_disabled = true;
    }
}

impl<V: TicketView> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.set_control_loading(self.control, false);
        if !self.keep_disabled {
            self.view.set_control_enabled(self.control, true);
        }
        if let Some(session) = self.session {
            session.lock().end_submit();
        }
    }
}

/// 送信が確定しなかったフィードバックボタンを元に戻す
///
/// 送信中に類似記事が差し替えられた場合は、新しいカードに触れない。
struct FeedbackGuard<'a, V: TicketView> {
    view: &'a V,
    generation: u64,
    index: usize,
    settled: bool,
}

impl<'a, V: TicketView> FeedbackGuard<'a, V> {
    fn new(view: &'a V, index: usize) -> Self {
        let generation = view.sources_generation();
        view.set_feedback_state_in(generation, index, FeedbackButtonState::Pending);
        Self {
            view,
            generation,
            index,
            settled: false,
        }
    }

    fn record(mut self) {
        self.view
            .set_feedback_state_in(self.generation, self.index, FeedbackButtonState::Recorded);
        self.settled = true;
    }
}

impl<V: TicketView> Drop for FeedbackGuard<'_, V> {
    fn drop(&mut self) {
        if !self.settled {
            self.view
                .set_feedback_state_in(self.generation, self.index, FeedbackButtonState::Idle);
        }
    }
}

/// 問い合わせ処理クライアント
pub struct TicketClient<V: TicketView> {
    api: Arc<dyn SupportApi>,
    clipboard: Arc<dyn Clipboard>,
    view: V,
    session: Arc<Mutex<ClientSession>>,
    settings: Arc<ClientSettings>,
}

impl<V: TicketView + Clone> Clone for TicketClient<V> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            clipboard: Arc::clone(&self.clipboard),
            view: self.view.clone(),
            session: Arc::clone(&self.session),
            settings: Arc::clone(&self.settings),
        }
    }
}

impl<V: TicketView> TicketClient<V> {
    pub fn new(
        api: Arc<dyn SupportApi>,
        clipboard: Arc<dyn Clipboard>,
        view: V,
        settings: ClientSettings,
    ) -> Self {
        Self {
            api,
            clipboard,
            view,
            session: Arc::new(Mutex::new(ClientSession::new())),
            settings: Arc::new(settings),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// 現在のセッション状態のコピー
    pub fn session(&self) -> ClientSession {
        self.session.lock().clone()
    }

    /// エラーを画面に出してから呼び出し元へ返す
    fn fail(&self, slot: ErrorSlot, error: ActionError) -> ActionError {
        if error.is_silent() {
            debug!("🔇 Action skipped: {}", error);
        } else {
            warn!("❌ {}", error);
            self.view.show_error(slot, &error.to_string());
        }
        error
    }

    /// 起動処理: セッション初期化、バージョン表示、初期化状態の確認
    pub async fn startup(&self) {
        self.session.lock().reset();
        self.load_version().await;
        self.refresh_init_status().await;
    }

    pub async fn load_version(&self) {
        match self.api.version().await {
            Ok(info) if !info.version.trim().is_empty() => {
                info!("🏷️ Backend version: {}", info.version);
                self.view.set_app_version(info.version.trim());
            }
            Ok(_) => {
                warn!("⚠️ Backend returned an empty version, using fallback");
                self.view.set_app_version(&self.settings.fallback_version);
            }
            Err(e) => {
                warn!("⚠️ Failed to load version, using fallback: {}", e);
                self.view.set_app_version(&self.settings.fallback_version);
            }
        }
    }

    /// バックエンドが初期化済みならAPIキーモーダルを閉じる
    pub async fn refresh_init_status(&self) -> bool {
        match self.api.check_init().await {
            Ok(status) if status.initialized => {
                info!(
                    articles = status.articles_count,
                    "✅ Backend already initialized"
                );
                self.view.show_init_success(&format!(
                    "{} (статей: {})",
                    ALREADY_INITIALIZED, status.articles_count
                ));
                self.view.close_api_modal();
                true
            }
            Ok(_) => {
                debug!("🔑 Backend is waiting for an API key");
                false
            }
            Err(e) => {
                warn!("⚠️ Failed to check initialization status: {}", e);
                false
            }
        }
    }

    /// APIキーを送信してバックエンドを初期化する
    pub async fn initialize_system(&self) -> Result<(), ActionError> {
        let api_key = self.view.api_key().trim().to_string();
        if api_key.is_empty() {
            return Err(self.fail(ErrorSlot::Init, ActionError::EmptyApiKey));
        }

        let mut guard = BusyGuard::new(&self.view, Control::Init, None);
        self.view.clear_error(ErrorSlot::Init);
        info!("🔑 Initializing backend");

        match self.api.init(&api_key).await {
            Ok(response) => {
                info!(
                    articles = response.articles_count,
                    "✅ Backend initialized: {}", response.message
                );
                self.view.show_init_success(&response.summary());
                guard.hold_disabled();
                drop(guard);

                if !self.settings.modal_close_delay.is_zero() {
                    tokio::time::sleep(self.settings.modal_close_delay).await;
                }
                self.view.close_api_modal();
                self.view.focus(FocusTarget::TicketInput);
                Ok(())
            }
            Err(e) => Err(self.fail(ErrorSlot::Init, ActionError::backend(e, INIT_FAILED))),
        }
    }

    /// 問い合わせを送信して結果を表示する
    pub async fn submit_ticket(&self) -> Result<(), ActionError> {
        let ticket_text = self.view.ticket_text().trim().to_string();
        if ticket_text.is_empty() {
            return Err(self.fail(ErrorSlot::Main, ActionError::EmptyTicket));
        }

        let started = self.session.lock().try_begin_submit();
        if !started {
            return Err(self.fail(ErrorSlot::Main, ActionError::InFlight));
        }

        let _guard = BusyGuard::new(&self.view, Control::Submit, Some(&self.session));
        self.view.clear_error(ErrorSlot::Main);
        info!(chars = ticket_text.chars().count(), "📨 Submitting ticket");

        match self.api.process_ticket(&ticket_text).await {
            Ok(result) => {
                self.session.lock().remember_query(ticket_text);
                self.render_results(&result);
                Ok(())
            }
            Err(e) => Err(self.fail(ErrorSlot::Main, ActionError::from_api(e, PROCESS_FAILED))),
        }
    }

    /// 分類・要点・回答案・類似記事を表示する
    pub fn render_results(&self, result: &TicketResult) {
        self.view.set_result_panel(presenter::result_panel(result));
        self.view.set_response_text(&result.suggested_response);
        self.session
            .lock()
            .remember_response(result.suggested_response.clone());

        if !result.search_results.is_empty() {
            self.render_sources(&result.search_results);
        }

        debug!(
            category = %result.classification.category,
            sources = result.search_results.len(),
            "🖼️ Results rendered"
        );
    }

    pub fn render_sources(&self, results: &[SearchResult]) {
        self.view.set_source_cards(presenter::source_cards(results));
    }

    /// 類似記事の回答を回答欄に読み込む
    pub fn select_source(&self, answer: &str) {
        self.view.set_response_text(answer);
        self.session.lock().remember_response(answer);
        self.view.show_toast(TOAST_ANSWER_LOADED);
    }

    /// `index` 番目の類似記事に「役に立った」を送る
    pub async fn send_feedback(&self, index: usize, is_helpful: bool) -> Result<(), ActionError> {
        let card = self.view.source_card(index);
        if card.as_ref().is_some_and(|c| c.feedback.is_disabled()) {
            return Err(self.fail(ErrorSlot::Main, ActionError::FeedbackAlreadySent));
        }

        let query = self.session.lock().feedback_query().map(str::to_string);
        let (article_id, query) = match (card, query) {
            (Some(card), Some(query)) if !card.article_id.is_empty() => (card.article_id, query),
            _ => return Err(self.fail(ErrorSlot::Main, ActionError::FeedbackUnattributed)),
        };

        let guard = FeedbackGuard::new(&self.view, index);
        let request = FeedbackRequest {
            article_id,
            query,
            is_helpful,
        };
        info!(article_id = %request.article_id, is_helpful, "👍 Sending feedback");

        match self.api.send_feedback(&request).await {
            Ok(response) => {
                guard.record();
                self.view.show_toast(TOAST_FEEDBACK_THANKS);
                match response.stats {
                    Some(stats) => self.apply_feedback_summary(&stats),
                    None => self.refresh_feedback_summary().await,
                }
                Ok(())
            }
            Err(e) => {
                drop(guard);
                Err(self.fail(ErrorSlot::Main, ActionError::backend(e, FEEDBACK_FAILED)))
            }
        }
    }

    /// フィードバック全体の統計をヘッダーに反映する。失敗はログのみ
    pub async fn refresh_feedback_summary(&self) {
        match self.api.feedback_stats().await {
            Ok(stats) => self.apply_feedback_summary(&stats),
            Err(e) => warn!("⚠️ Failed to load feedback stats: {}", e),
        }
    }

    fn apply_feedback_summary(&self, stats: &FeedbackSummary) {
        self.view.set_feedback_overview(FeedbackOverview {
            total_feedback: stats.total_feedback,
            helpfulness_percent: presenter::to_percent(stats.helpfulness_rate),
        });
    }

    /// 回答欄の内容をクリップボードにコピーする
    pub async fn copy_response(&self) -> Result<(), ActionError> {
        let text = self.view.response_text();
        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.view.show_toast(TOAST_COPIED);
                Ok(())
            }
            Err(e) => Err(self.fail(ErrorSlot::Main, ActionError::ClipboardWrite(e))),
        }
    }

    /// 回答欄を直近の回答案に戻す
    pub fn reset_response(&self) -> Result<(), ActionError> {
        let target = self.session.lock().reset_target().map(str::to_string);
        match target {
            Some(text) => {
                self.view.set_response_text(&text);
                self.view.show_toast(TOAST_RESTORED);
                Ok(())
            }
            None => Err(self.fail(ErrorSlot::Main, ActionError::NothingToRestore)),
        }
    }

    /// クリップボードの内容を問い合わせ欄に貼り付ける
    pub async fn paste_to_question(&self) -> Result<(), ActionError> {
        let text = match self.clipboard.read_text().await {
            Ok(text) => text,
            Err(e) => return Err(self.fail(ErrorSlot::Main, ActionError::ClipboardRead(e))),
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(self.fail(ErrorSlot::Main, ActionError::ClipboardEmpty));
        }

        self.view.set_ticket_text(trimmed);
        self.view.focus(FocusTarget::TicketInput);
        self.view.show_toast(TOAST_PASTED);
        Ok(())
    }

    /// ショートカットに対応する操作を実行する
    pub async fn handle_hotkey(&self, action: HotkeyAction) -> Result<(), ActionError> {
        debug!("⌨️ Hotkey: {:?}", action);
        match action {
            HotkeyAction::PasteToQuestion => self.paste_to_question().await,
            HotkeyAction::CopyResponse => self.copy_response().await,
            HotkeyAction::SubmitTicket => self.submit_ticket().await,
        }
    }
}
