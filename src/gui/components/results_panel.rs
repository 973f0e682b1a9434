use dioxus::prelude::*;

use crate::gui::{
    hooks::DesktopClient,
    models::{ElementId, ResultPanel, Subcategories},
    styles::theme::{get_subcategories_class, CssClasses},
};

/// 分類と要点の表示パネル
#[component]
pub fn ResultsPanel() -> Element {
    let client = use_context::<DesktopClient>();
    let result = client.view().state().read().result.clone();

    rsx! {
        div {
            class: CssClasses::CARD,

            h3 {
                class: CssClasses::CARD_TITLE,
                "📊 Классификация"
            }

            match result {
                Some(panel) => rsx! { ResultGrid { panel } },
                None => rsx! {
                    p {
                        class: CssClasses::RESULT_LABEL,
                        "Результаты появятся после обработки обращения"
                    }
                },
            }
        }
    }
}

#[component]
fn ResultGrid(panel: ResultPanel) -> Element {
    rsx! {
        div {
            class: CssClasses::RESULT_GRID,

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Категория" }
                div {
                    id: ElementId::Category.dom_id(),
                    class: CssClasses::RESULT_VALUE,
                    "{panel.category}"
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Уверенность классификации" }
                span {
                    id: ElementId::ClassConfidence.dom_id(),
                    class: panel.confidence_class.badge_class(),
                    "{panel.confidence_label}"
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Подкатегории" }
                div {
                    id: ElementId::Subcategory.dom_id(),
                    class: get_subcategories_class(panel.subcategories.is_empty()),
                    if panel.subcategories.is_empty() {
                        span { class: CssClasses::BADGE, {Subcategories::PLACEHOLDER} }
                    }
                    for item in panel.subcategories.items() {
                        div { class: CssClasses::SUBCATEGORY_ITEM, "{item}" }
                    }
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Суть проблемы" }
                div {
                    id: ElementId::MainIssue.dom_id(),
                    class: CssClasses::RESULT_VALUE,
                    "{panel.main_issue}"
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Срочность" }
                span {
                    id: ElementId::Urgency.dom_id(),
                    class: panel.urgency_class.badge_class(),
                    "{panel.urgency_label}"
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Тональность" }
                div {
                    id: ElementId::Sentiment.dom_id(),
                    class: CssClasses::RESULT_VALUE,
                    "{panel.sentiment}"
                }
            }

            div {
                class: CssClasses::RESULT_ITEM,
                div { class: CssClasses::RESULT_LABEL, "Общая уверенность" }
                div {
                    id: ElementId::Confidence.dom_id(),
                    class: CssClasses::RESULT_VALUE,
                    "{panel.overall_confidence}"
                }
            }

            if let Some(time) = panel.processed_at.as_ref() {
                div {
                    class: CssClasses::RESULT_ITEM,
                    div { class: CssClasses::RESULT_LABEL, "Обработано" }
                    div { class: CssClasses::RESULT_VALUE, "{time}" }
                }
            }
        }
    }
}
