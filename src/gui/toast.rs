//! トースト通知
//!
//! 画面右上に一時的に表示される成功通知を管理する。
//! 表示時間が過ぎるとスライドアウトに切り替わり、アニメーション後に削除される。

use std::time::Duration;

/// トーストが表示されている時間
pub const TOAST_VISIBLE: Duration = Duration::from_millis(2000);

/// スライドイン/アウトのアニメーション時間
pub const TOAST_ANIMATION: Duration = Duration::from_millis(300);

/// インラインエラーが自動で消えるまでの時間
pub const ERROR_VISIBLE: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPhase {
    Entering,
    Leaving,
}

impl ToastPhase {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastPhase::Entering => "toast slide-in",
            ToastPhase::Leaving => "toast slide-out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub phase: ToastPhase,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        self.toasts.push(Toast {
            id,
            message: message.into(),
            phase: ToastPhase::Entering,
        });
        id
    }

    /// スライドアウトを開始する。既に消えていればfalse
    pub fn begin_dismiss(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.phase = ToastPhase::Leaving;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.toasts.iter().map(|t| t.message.as_str()).collect()
    }

    pub fn last_message(&self) -> Option<&str> {
        self.toasts.last().map(|t| t.message.as_str())
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
