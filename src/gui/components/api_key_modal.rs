use dioxus::prelude::*;

use crate::gui::{
    hooks::DesktopClient,
    models::{ElementId, FocusTarget},
    styles::theme::{active_class, get_button_class, CssClasses},
    view::TicketView,
};

/// APIキー入力モーダル
#[component]
pub fn ApiKeyModal() -> Element {
    let client = use_context::<DesktopClient>();
    let view = *client.view();
    let modal = view.state().read().api_modal.clone();

    let start_init = {
        let client = client.clone();
        move || {
            let client = client.clone();
            spawn(async move {
                let _ = client.initialize_system().await;
            });
        }
    };

    let on_click = {
        let start_init = start_init.clone();
        move |_| start_init()
    };

    let on_keydown = move |event: KeyboardEvent| {
        if event.key() == Key::Enter {
            event.prevent_default();
            start_init();
        }
    };

    rsx! {
        div {
            id: ElementId::ApiModal.dom_id(),
            class: active_class(CssClasses::MODAL, modal.open),

            div {
                class: CssClasses::MODAL_CONTENT,

                h2 { "🔑 Инициализация системы" }
                p { "Введите API ключ для подключения к языковой модели" }

                div {
                    class: CssClasses::FORM_GROUP,
                    label {
                        class: CssClasses::FORM_LABEL,
                        r#for: ElementId::ApiKeyInput.dom_id(),
                        "API ключ"
                    }
                    input {
                        id: ElementId::ApiKeyInput.dom_id(),
                        class: CssClasses::FORM_INPUT,
                        r#type: "password",
                        autofocus: true,
                        value: "{modal.api_key_input}",
                        oninput: move |event| {
                            let value = event.value();
                            view.update(|s| s.api_modal.api_key_input = value);
                        },
                        onfocus: move |_| view.update(|s| s.focus = Some(FocusTarget::ApiKeyInput)),
                        onkeydown: on_keydown,
                    }
                }

                button {
                    id: ElementId::InitButton.dom_id(),
                    class: get_button_class("primary", &modal.control),
                    disabled: !modal.control.enabled,
                    onclick: on_click,
                    "Инициализировать"
                }

                div {
                    id: ElementId::InitLoading.dom_id(),
                    class: active_class(CssClasses::LOADING, modal.control.loading),
                    "⏳ Загрузка базы знаний..."
                }

                div {
                    id: ElementId::InitError.dom_id(),
                    class: active_class(CssClasses::ERROR_MESSAGE, modal.error.active),
                    "{modal.error.message}"
                }

                if let Some(message) = modal.success_message.as_ref() {
                    div {
                        id: ElementId::InitSuccess.dom_id(),
                        class: CssClasses::INIT_SUCCESS,
                        "✅ "
                        span {
                            id: ElementId::ArticlesCount.dom_id(),
                            "{message}"
                        }
                    }
                }
            }
        }
    }
}
