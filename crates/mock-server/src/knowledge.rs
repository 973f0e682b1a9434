//! Built-in knowledge base and keyword-overlap search.

use std::collections::HashSet;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: u32,
    pub main_category: &'static str,
    pub subcategory: &'static str,
    pub example_question: &'static str,
    pub template_answer: &'static str,
    pub priority: &'static str,
}

impl Article {
    /// Identifier used for feedback: first 100 chars of question and answer.
    pub fn feedback_id(&self) -> String {
        let question: String = self.example_question.chars().take(100).collect();
        let answer: String = self.template_answer.chars().take(100).collect();
        format!("{}_{}", question, answer)
    }
}

pub fn articles() -> Vec<Article> {
    vec![
        Article {
            id: 1,
            main_category: "Карты",
            subcategory: "Блокировка карты",
            example_question: "Как заблокировать карту, если я её потерял?",
            template_answer: "Заблокировать карту можно в мобильном приложении в разделе «Карты» → «Заблокировать» или по телефону горячей линии. После блокировки вы сможете заказать перевыпуск карты с сохранением реквизитов счёта.",
            priority: "Срочный",
        },
        Article {
            id: 2,
            main_category: "Карты",
            subcategory: "PIN-код",
            example_question: "Как сменить PIN-код карты?",
            template_answer: "Сменить PIN-код можно в приложении: откройте карту, выберите «Настройки» → «Сменить PIN-код» и подтвердите действие кодом из SMS.",
            priority: "Обычный",
        },
        Article {
            id: 3,
            main_category: "Переводы",
            subcategory: "Задержка перевода",
            example_question: "Перевод не дошёл до получателя, что делать?",
            template_answer: "Переводы между банками обычно зачисляются в течение одного рабочего дня. Если срок прошёл, пришлите номер операции, и мы запросим статус платежа у банка получателя.",
            priority: "Высокий",
        },
        Article {
            id: 4,
            main_category: "Мобильное приложение",
            subcategory: "Вход в приложение",
            example_question: "Не могу войти в мобильное приложение, не приходит SMS",
            template_answer: "Проверьте, что номер телефона в профиле актуален и на телефоне не включена блокировка SMS от банка. Если код так и не пришёл, войдите по биометрии или обратитесь в отделение для смены номера.",
            priority: "Средний",
        },
        Article {
            id: 5,
            main_category: "Вклады",
            subcategory: "Проценты по вкладу",
            example_question: "Когда начисляются проценты по вкладу?",
            template_answer: "Проценты начисляются ежемесячно в день открытия вклада. Историю начислений можно посмотреть в приложении в разделе «Вклады» → «Операции».",
            priority: "Низкий",
        },
    ]
}

fn words(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Jaccard overlap of the ticket words with the article question and answer.
pub fn similarity(ticket: &str, article: &Article) -> f64 {
    let query = words(ticket);
    if query.is_empty() {
        return 0.0;
    }
    let document = words(&format!(
        "{} {}",
        article.example_question, article.template_answer
    ));
    let shared = query.intersection(&document).count() as f64;
    let union = query.union(&document).count() as f64;
    if union == 0.0 {
        0.0
    } else {
        // 短い問い合わせでも差が見えるように重み付け
        (shared / union * 4.0).min(1.0)
    }
}
