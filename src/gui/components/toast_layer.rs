use dioxus::prelude::*;

use crate::gui::{hooks::DesktopClient, styles::theme::CssClasses, toast::Toast};

/// 画面右上のトースト通知
#[component]
pub fn ToastLayer() -> Element {
    let client = use_context::<DesktopClient>();
    let toasts: Vec<Toast> = client.view().state().read().toasts.iter().cloned().collect();

    rsx! {
        div {
            class: CssClasses::TOAST_LAYER,

            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: toast.phase.css_class(),
                    "{toast.message}"
                }
            }
        }
    }
}
