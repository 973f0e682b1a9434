use dioxus::prelude::*;

use crate::gui::{
    hooks::{key_stroke_from_event, DesktopClient},
    hotkeys::is_input_submit,
    models::{ElementId, FocusTarget},
    styles::theme::{active_class, get_button_class, CssClasses},
    view::TicketView,
};

/// 問い合わせ入力セクション
///
/// Enterで送信、Shift+Enterで改行。
#[component]
pub fn TicketInput() -> Element {
    let client = use_context::<DesktopClient>();
    let view = *client.view();
    let (ticket, submit, error) = {
        let state = view.state();
        let state = state.read();
        (state.ticket_input.clone(), state.submit, state.error.clone())
    };

    let start_submit = {
        let client = client.clone();
        move || {
            let client = client.clone();
            spawn(async move {
                let _ = client.submit_ticket().await;
            });
        }
    };

    let on_keydown = {
        let start_submit = start_submit.clone();
        move |event: KeyboardEvent| {
            let stroke = key_stroke_from_event(&event);
            if is_input_submit(&stroke) {
                event.prevent_default();
                // ページ全体のCtrl+Enterで二重送信しないよう伝播を止める
                event.stop_propagation();
                start_submit();
            }
        }
    };

    let on_paste = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                let _ = client.paste_to_question().await;
            });
        }
    };

    rsx! {
        div {
            class: CssClasses::CARD,

            h3 {
                class: CssClasses::CARD_TITLE,
                "✉️ Обращение клиента"
            }

            textarea {
                id: ElementId::TicketInput.dom_id(),
                class: CssClasses::TICKET_INPUT,
                placeholder: "Вставьте текст обращения клиента...",
                value: "{ticket}",
                oninput: move |event| view.set_ticket_text(&event.value()),
                onfocus: move |_| view.update(|s| s.focus = Some(FocusTarget::TicketInput)),
                onblur: move |_| {
                    view.update(|s| {
                        if s.focus == Some(FocusTarget::TicketInput) {
                            s.focus = None;
                        }
                    })
                },
                onkeydown: on_keydown,
            }

            div {
                class: CssClasses::BTN_GROUP,

                button {
                    id: ElementId::ProcessButton.dom_id(),
                    class: get_button_class("primary", &submit),
                    disabled: !submit.enabled,
                    onclick: move |_| start_submit(),
                    "🚀 Обработать"
                }

                button {
                    class: get_button_class("secondary", &Default::default()),
                    onclick: on_paste,
                    "📋 Вставить"
                }
            }

            div {
                id: ElementId::Loading.dom_id(),
                class: active_class(CssClasses::LOADING, submit.loading),
                "⏳ Анализ обращения..."
            }

            div {
                id: ElementId::ErrorMessage.dom_id(),
                class: active_class(CssClasses::ERROR_MESSAGE, error.active),
                "{error.message}"
            }
        }
    }
}
