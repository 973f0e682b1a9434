//! クリップボードアクセス
//!
//! デスクトップ版はWebViewの `navigator.clipboard` を `document::eval` 経由で使う。

use async_trait::async_trait;
use parking_lot::Mutex;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ClipboardError {
    #[error("Clipboard access denied: {0}")]
    Denied(String),
    #[error("Clipboard returned unexpected data: {0}")]
    UnexpectedValue(String),
}

/// クリップボードの抽象インタフェース
#[async_trait(?Send)]
pub trait Clipboard {
    async fn read_text(&self) -> Result<String, ClipboardError>;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// WebView内のClipboard APIを使う実装
#[derive(Debug, Clone, Copy, Default)]
pub struct WebviewClipboard;

#[async_trait(?Send)]
impl Clipboard for WebviewClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        let script = r#"
            const text = await navigator.clipboard.readText();
            return text;
        "#;

        match dioxus::document::eval(script).await {
            Ok(value) => value
                .as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| ClipboardError::UnexpectedValue(value.to_string())),
            Err(e) => {
                tracing::warn!("📋 [Clipboard] read failed: {:?}", e);
                Err(ClipboardError::Denied(format!("{:?}", e)))
            }
        }
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        // 文字列はJSONリテラルとして埋め込む
        let literal = serde_json::to_string(text)
            .map_err(|e| ClipboardError::UnexpectedValue(e.to_string()))?;
        let script = format!(
            r#"
            await navigator.clipboard.writeText({literal});
            return true;
            "#
        );

        match dioxus::document::eval(&script).await {
            Ok(_) => {
                tracing::debug!("📋 [Clipboard] {} chars written", text.chars().count());
                Ok(())
            }
            Err(e) => {
                tracing::warn!("📋 [Clipboard] write failed: {:?}", e);
                Err(ClipboardError::Denied(format!("{:?}", e)))
            }
        }
    }
}

/// プロセス内だけで完結するクリップボード（ヘッドレス実行・テスト用）
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<String>,
    deny_access: Mutex<bool>,
}

impl MemoryClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(text.into()),
            deny_access: Mutex::new(false),
        }
    }

    pub fn contents(&self) -> String {
        self.contents.lock().clone()
    }

    pub fn set_contents(&self, text: impl Into<String>) {
        *self.contents.lock() = text.into();
    }

    /// 以降のアクセスを拒否させる
    pub fn deny_access(&self, deny: bool) {
        *self.deny_access.lock() = deny;
    }

    fn check_access(&self) -> Result<(), ClipboardError> {
        if *self.deny_access.lock() {
            return Err(ClipboardError::Denied("access denied".to_string()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl Clipboard for MemoryClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.check_access()?;
        Ok(self.contents())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.check_access()?;
        self.set_contents(text);
        Ok(())
    }
}
