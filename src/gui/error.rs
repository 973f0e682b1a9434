//! 画面操作のエラー
//!
//! `Display` がそのままユーザー向けメッセージになる。

use crate::api::ApiError;
use crate::gui::clipboard::ClipboardError;

#[derive(thiserror::Error, Debug)]
pub enum ActionError {
    #[error("Введите текст обращения")]
    EmptyTicket,

    #[error("Введите API ключ")]
    EmptyApiKey,

    #[error("API перегружен. Попытка {attempts}. Подождите минуту.")]
    RateLimited { attempts: u32 },

    #[error("{message}")]
    Backend {
        message: String,
        #[source]
        source: ApiError,
    },

    #[error("Невозможно отправить отзыв")]
    FeedbackUnattributed,

    #[error("Буфер обмена пуст")]
    ClipboardEmpty,

    #[error("Не удалось прочитать буфер обмена")]
    ClipboardRead(#[source] ClipboardError),

    #[error("Не удалось скопировать")]
    ClipboardWrite(#[source] ClipboardError),

    #[error("Запрос уже выполняется")]
    InFlight,

    #[error("Нет сохранённого ответа")]
    NothingToRestore,

    #[error("Отзыв уже отправлен")]
    FeedbackAlreadySent,
}

impl ActionError {
    /// APIエラーを画面向けに変換する。サーバーがメッセージを返さなければ `fallback`
    ///
    /// レート制限は再試行を促すメッセージになる（問い合わせ処理用）。
    pub fn from_api(err: ApiError, fallback: &str) -> Self {
        match err {
            ApiError::RateLimited { attempts, .. } => ActionError::RateLimited {
                attempts: attempts.filter(|n| *n > 0).unwrap_or(1),
            },
            other => Self::backend(other, fallback),
        }
    }

    /// レート制限も含め、サーバーのエラーテキストか `fallback` を表示する
    pub fn backend(err: ApiError, fallback: &str) -> Self {
        let message = err
            .server_message()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string());
        ActionError::Backend {
            message,
            source: err,
        }
    }

    /// 画面に何も表示しないエラー
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ActionError::InFlight | ActionError::NothingToRestore | ActionError::FeedbackAlreadySent
        )
    }
}
