use dioxus::prelude::*;

use crate::gui::{
    components::{ApiKeyModal, ResponseEditor, ResultsPanel, SourcesPanel, TicketInput, ToastLayer},
    hooks::{key_stroke_from_event, use_ticket_client},
    hotkeys::{resolve_global, HotkeyContext},
    models::ElementId,
    styles::theme::{get_embedded_css, CssClasses},
    view::TicketView,
};

/// メインウィンドウコンポーネント
///
/// ページ全体のショートカットはここで受け、各パネルは
/// コンテキスト経由で同じクライアントを使う。
#[component]
pub fn MainWindow() -> Element {
    let client = use_ticket_client();
    use_context_provider(|| client.clone());
    let state = client.view().state();

    // 起動処理（バージョン表示・初期化状態の確認）
    use_hook({
        let client = client.clone();
        move || {
            spawn(async move {
                client.startup().await;
            })
        }
    });

    let on_keydown = {
        let client = client.clone();
        move |event: KeyboardEvent| {
            let stroke = key_stroke_from_event(&event);
            let context = client.view().read(|s| HotkeyContext {
                modal_open: s.api_modal.open,
                focus: s.focus,
            });

            if let Some(action) = resolve_global(&stroke, &context) {
                event.prevent_default();
                let client = client.clone();
                spawn(async move {
                    let _ = client.handle_hotkey(action).await;
                });
            }
        }
    };

    let version = state.read().app_version.clone();
    let overview = state.read().feedback_overview;

    tracing::debug!("🖥️ MainWindow: rendering");

    rsx! {
        // CSSスタイルをdocument headに注入
        document::Style {
            {get_embedded_css()}
        }

        div {
            class: CssClasses::MAIN_WINDOW,
            tabindex: "0",
            onkeydown: on_keydown,

            // ヘッダー
            div {
                class: CssClasses::APP_HEADER,

                h1 {
                    class: CssClasses::APP_TITLE,
                    "🎧 SmartSupport"
                    span {
                        id: ElementId::AppVersion.dom_id(),
                        class: CssClasses::APP_VERSION,
                        "{version}"
                    }
                }

                if let Some(overview) = overview {
                    span {
                        class: CssClasses::FEEDBACK_OVERVIEW,
                        "👍 Отзывов: {overview.total_feedback} · полезность {overview.helpfulness_percent}%"
                    }
                }

                span {
                    class: CssClasses::HOTKEY_HINT,
                    "Ctrl+V: вставить · Ctrl+Enter: обработать · Ctrl+C: копировать ответ"
                }
            }

            ApiKeyModal {}

            div {
                class: CssClasses::MAIN_CONTENT,

                div {
                    class: CssClasses::LEFT_PANEL,
                    TicketInput {}
                    ResultsPanel {}
                }

                div {
                    class: CssClasses::RIGHT_PANEL,
                    ResponseEditor {}
                    SourcesPanel {}
                }
            }

            ToastLayer {}
        }
    }
}
