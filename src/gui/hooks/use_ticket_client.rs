//! 問い合わせクライアント用カスタムフック
//!
//! ページ状態を `Signal` に載せ、`TicketClient` のフローから直接書き換える。

use std::sync::Arc;

use dioxus::prelude::*;

use crate::api::SupportApi;
use crate::gui::{
    clipboard::WebviewClipboard,
    hotkeys::{KeyName, KeyStroke},
    models::{ErrorSlot, FocusTarget, PageState},
    ticket_client::{ClientSettings, TicketClient},
    toast::{ToastId, ERROR_VISIBLE, TOAST_ANIMATION, TOAST_VISIBLE},
    view::TicketView,
};

/// デスクトップ版のクライアント
pub type DesktopClient = TicketClient<SignalView>;

/// 起動時に注入するサービス
#[derive(Clone)]
pub struct ClientServices {
    pub api: Arc<dyn SupportApi>,
    pub settings: ClientSettings,
}

/// `Signal<PageState>` を画面として扱うビュー
#[derive(Clone, Copy, PartialEq)]
pub struct SignalView {
    state: Signal<PageState>,
}

impl SignalView {
    pub fn new(state: Signal<PageState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> Signal<PageState> {
        self.state
    }
}

impl TicketView for SignalView {
    fn read<R>(&self, f: impl FnOnce(&PageState) -> R) -> R {
        f(&*self.state.read())
    }

    fn update(&self, f: impl FnOnce(&mut PageState)) {
        let mut state = self.state;
        f(&mut *state.write());
    }

    fn focus(&self, target: FocusTarget) {
        self.update(|s| s.focus = Some(target));
        let script = format!(
            "document.getElementById('{}')?.focus();",
            target.element().dom_id()
        );
        spawn(async move {
            if let Err(e) = document::eval(&script).await {
                tracing::debug!("🎯 Focus change failed: {:?}", e);
            }
        });
    }

    fn schedule_toast_dismiss(&self, id: ToastId) {
        let view = *self;
        spawn(async move {
            tokio::time::sleep(TOAST_VISIBLE).await;
            view.update(|s| {
                s.toasts.begin_dismiss(id);
            });
            tokio::time::sleep(TOAST_ANIMATION).await;
            view.update(|s| {
                s.toasts.remove(id);
            });
        });
    }

    fn schedule_error_clear(&self, slot: ErrorSlot, generation: u64) {
        let view = *self;
        spawn(async move {
            tokio::time::sleep(ERROR_VISIBLE).await;
            view.expire_error(slot, generation);
        });
    }
}

/// ページ状態と問い合わせクライアントを用意する
///
/// `ClientServices` がコンテキストに提供されている必要がある。
pub fn use_ticket_client() -> DesktopClient {
    let services = use_context::<ClientServices>();
    let state = use_signal(PageState::default);

    use_hook(move || {
        TicketClient::new(
            Arc::clone(&services.api),
            Arc::new(WebviewClipboard),
            SignalView::new(state),
            services.settings.clone(),
        )
    })
}

/// キーボードイベントを `KeyStroke` に変換する
///
/// V/C はキーボード配列に依存しないよう物理キーで判定する。
pub fn key_stroke_from_event(event: &KeyboardEvent) -> KeyStroke {
    let key = match (event.key(), event.code()) {
        (Key::Enter, _) => KeyName::Enter,
        (_, Code::KeyV) => KeyName::Char('v'),
        (_, Code::KeyC) => KeyName::Char('c'),
        (Key::Character(text), _) => text.chars().next().map_or(KeyName::Other, KeyName::Char),
        _ => KeyName::Other,
    };
    let modifiers = event.modifiers();

    KeyStroke {
        key,
        ctrl: modifiers.contains(Modifiers::CONTROL),
        shift: modifiers.contains(Modifiers::SHIFT),
        alt: modifiers.contains(Modifiers::ALT),
    }
}
