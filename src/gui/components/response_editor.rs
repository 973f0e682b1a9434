use dioxus::prelude::*;

use crate::gui::{
    hooks::DesktopClient,
    models::{ElementId, FocusTarget},
    styles::theme::{get_button_class, CssClasses},
    view::TicketView,
};

/// 回答案の編集欄
#[component]
pub fn ResponseEditor() -> Element {
    let client = use_context::<DesktopClient>();
    let view = *client.view();
    let response = view.state().read().response_text.clone();

    let on_copy = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            spawn(async move {
                let _ = client.copy_response().await;
            });
        }
    };

    let on_reset = {
        let client = client.clone();
        move |_| {
            let _ = client.reset_response();
        }
    };

    rsx! {
        div {
            class: CssClasses::CARD,

            h3 {
                class: CssClasses::CARD_TITLE,
                "💬 Рекомендуемый ответ"
            }

            textarea {
                id: ElementId::SuggestedResponse.dom_id(),
                class: CssClasses::RESPONSE_EDITOR,
                value: "{response}",
                oninput: move |event| view.set_response_text(&event.value()),
                onfocus: move |_| view.update(|s| s.focus = Some(FocusTarget::SuggestedResponse)),
                onblur: move |_| {
                    view.update(|s| {
                        if s.focus == Some(FocusTarget::SuggestedResponse) {
                            s.focus = None;
                        }
                    })
                },
            }

            div {
                class: CssClasses::BTN_GROUP,

                button {
                    class: get_button_class("primary", &Default::default()),
                    onclick: on_copy,
                    "📋 Копировать"
                }

                button {
                    class: get_button_class("secondary", &Default::default()),
                    onclick: on_reset,
                    "↺ Сбросить"
                }
            }
        }
    }
}
