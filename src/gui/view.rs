//! 画面要素への型付きアクセス
//!
//! `read` / `update` と副作用フックだけを実装すれば、
//! 要素操作はすべて既定メソッドとして使える。

use std::sync::Arc;

use parking_lot::Mutex;

use crate::gui::models::{
    Control, ErrorSlot, FeedbackButtonState, FeedbackOverview, FocusTarget, PageState,
    ResultPanel, SourceCard,
};
use crate::gui::toast::ToastId;

pub trait TicketView {
    /// 現在のページ状態を読む
    fn read<R>(&self, f: impl FnOnce(&PageState) -> R) -> R;

    /// ページ状態を書き換える
    fn update(&self, f: impl FnOnce(&mut PageState));

    /// 入力要素にフォーカスを移す
    fn focus(&self, target: FocusTarget);

    /// 表示時間経過後にトーストを消す
    fn schedule_toast_dismiss(&self, _id: ToastId) {}

    /// 表示時間経過後にインラインエラーを消す（世代が同じ場合のみ）
    fn schedule_error_clear(&self, _slot: ErrorSlot, _generation: u64) {}

    fn ticket_text(&self) -> String {
        self.read(|s| s.ticket_input.clone())
    }

    fn set_ticket_text(&self, text: &str) {
        self.update(|s| s.ticket_input = text.to_string());
    }

    fn api_key(&self) -> String {
        self.read(|s| s.api_modal.api_key_input.clone())
    }

    fn response_text(&self) -> String {
        self.read(|s| s.response_text.clone())
    }

    fn set_response_text(&self, text: &str) {
        self.update(|s| s.response_text = text.to_string());
    }

    fn set_app_version(&self, version: &str) {
        self.update(|s| s.app_version = format!("v{}", version));
    }

    /// ボタン無効化とローディング表示をまとめて切り替える
    fn set_control_busy(&self, control: Control, busy: bool) {
        self.update(|s| {
            let state = s.control_mut(control);
            state.enabled = !busy;
            state.loading = busy;
        });
    }

    fn set_control_enabled(&self, control: Control, enabled: bool) {
        self.update(|s| s.control_mut(control).enabled = enabled);
    }

    fn set_control_loading(&self, control: Control, loading: bool) {
        self.update(|s| s.control_mut(control).loading = loading);
    }

    fn show_error(&self, slot: ErrorSlot, message: &str) {
        let mut generation = 0;
        self.update(|s| {
            let error = s.error_mut(slot);
            error.generation += 1;
            error.message = message.to_string();
            error.active = true;
            generation = error.generation;
        });
        self.schedule_error_clear(slot, generation);
    }

    fn clear_error(&self, slot: ErrorSlot) {
        self.update(|s| s.error_mut(slot).active = false);
    }

    /// 指定世代のエラーがまだ表示中なら消す
    fn expire_error(&self, slot: ErrorSlot, generation: u64) {
        self.update(|s| {
            let error = s.error_mut(slot);
            if error.generation == generation {
                error.active = false;
            }
        });
    }

    fn show_toast(&self, message: &str) -> ToastId {
        let mut id = ToastId(0);
        self.update(|s| id = s.toasts.push(message));
        self.schedule_toast_dismiss(id);
        id
    }

    fn set_result_panel(&self, panel: ResultPanel) {
        self.update(|s| s.result = Some(panel));
    }

    /// 類似記事カードを差し替えてパネルを表示する
    fn set_source_cards(&self, cards: Vec<SourceCard>) {
        self.update(|s| {
            s.sources.cards = cards;
            s.sources.visible = true;
            s.sources.generation += 1;
        });
    }

    fn sources_generation(&self) -> u64 {
        self.read(|s| s.sources.generation)
    }

    fn source_card(&self, index: usize) -> Option<SourceCard> {
        self.read(|s| s.sources.cards.get(index).cloned())
    }

    fn set_feedback_state(&self, index: usize, state: FeedbackButtonState) {
        self.update(|s| {
            if let Some(card) = s.sources.cards.get_mut(index) {
                card.feedback = state;
            }
        });
    }

    /// カードが `generation` の世代のまま表示されている場合だけ状態を変える
    fn set_feedback_state_in(&self, generation: u64, index: usize, state: FeedbackButtonState) {
        self.update(|s| {
            if s.sources.generation != generation {
                return;
            }
            if let Some(card) = s.sources.cards.get_mut(index) {
                card.feedback = state;
            }
        });
    }

    fn show_init_success(&self, message: &str) {
        self.update(|s| s.api_modal.success_message = Some(message.to_string()));
    }

    fn close_api_modal(&self) {
        self.update(|s| s.api_modal.open = false);
    }

    fn is_modal_open(&self) -> bool {
        self.read(|s| s.api_modal.open)
    }

    fn focused(&self) -> Option<FocusTarget> {
        self.read(|s| s.focus)
    }

    fn set_feedback_overview(&self, overview: FeedbackOverview) {
        self.update(|s| s.feedback_overview = Some(overview));
    }
}

/// メモリ上のページ状態（ヘッドレス実行・テスト用）
///
/// フォーカスは状態に記録するだけで、タイマーは起動しない。
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    state: Arc<Mutex<PageState>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PageState {
        self.state.lock().clone()
    }
}

impl TicketView for MemoryView {
    fn read<R>(&self, f: impl FnOnce(&PageState) -> R) -> R {
        f(&*self.state.lock())
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        f(&mut *self.state.lock());
    }

    fn focus(&self, target: FocusTarget) {
        self.state.lock().focus = Some(target);
    }
}
