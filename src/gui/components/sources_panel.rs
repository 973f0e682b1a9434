use dioxus::prelude::*;

use crate::gui::{
    hooks::DesktopClient,
    models::{ElementId, SourceCard},
    styles::theme::CssClasses,
};

/// 類似記事パネル
#[component]
pub fn SourcesPanel() -> Element {
    let client = use_context::<DesktopClient>();
    let sources = client.view().state().read().sources.clone();

    rsx! {
        div {
            id: ElementId::SourcesCard.dom_id(),
            class: CssClasses::CARD,
            style: if sources.visible { "display: block;" } else { "display: none;" },

            h3 {
                class: CssClasses::CARD_TITLE,
                "📚 Похожие статьи ("
                span {
                    id: ElementId::SourcesCount.dom_id(),
                    "{sources.count()}"
                }
                ")"
            }

            div {
                id: ElementId::SourcesList.dom_id(),
                class: CssClasses::SOURCES_LIST,

                for (index, card) in sources.cards.iter().enumerate() {
                    SourceItem {
                        key: "{card.article_id}-{index}",
                        index,
                        card: card.clone(),
                    }
                }
            }
        }
    }
}

/// 記事カード。本文クリックで回答を読み込み、ボタンでフィードバックを送る
#[component]
fn SourceItem(index: usize, card: SourceCard) -> Element {
    let client = use_context::<DesktopClient>();

    let on_select = {
        let client = client.clone();
        let answer = card.full_answer.clone();
        move |_| client.select_source(&answer)
    };

    let on_feedback = move |event: MouseEvent| {
        // カード本文のクリック（回答の読み込み）にしない
        event.stop_propagation();
        let client = client.clone();
        spawn(async move {
            let _ = client.send_feedback(index, true).await;
        });
    };

    rsx! {
        div {
            class: CssClasses::SOURCE_ITEM,

            div {
                class: CssClasses::SOURCE_CONTENT,
                title: "Нажмите, чтобы использовать этот ответ",
                onclick: on_select,

                div {
                    class: CssClasses::SOURCE_SIMILARITY,
                    "{card.similarity_percent}%"
                    if let Some(bonus) = card.bonus_percent {
                        span {
                            class: CssClasses::FEEDBACK_INDICATOR,
                            title: "Бонус от отзывов: +{bonus}%",
                            "⭐"
                        }
                    }
                }

                div { class: CssClasses::SOURCE_QUESTION, "{card.question}" }
                div { class: CssClasses::SOURCE_ANSWER, "{card.answer_preview}" }

                if let Some(line) = card.feedback_line.as_ref() {
                    div { class: CssClasses::SOURCE_FEEDBACK_STATS, "{line}" }
                }
            }

            button {
                class: card.feedback.css_class(),
                disabled: card.feedback.is_disabled(),
                onclick: on_feedback,
                {card.feedback.label()}
            }
        }
    }
}
