//! クライアントセッション状態
//!
//! ページ読み込み（アプリ起動）ごとに `reset` され、永続化はしない。

/// 直近の回答案と問い合わせを保持するセッション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSession {
    /// リセット時に戻す回答テキスト
    last_response: Option<String>,
    /// フィードバックの紐付けに使う直近の問い合わせ
    last_query: Option<String>,
    submit_in_flight: bool,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// 起動時の初期状態に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn remember_response(&mut self, text: impl Into<String>) {
        self.last_response = Some(text.into());
    }

    pub fn remember_query(&mut self, query: impl Into<String>) {
        self.last_query = Some(query.into());
    }

    /// リセット対象の回答。空文字列は「無し」として扱う
    pub fn reset_target(&self) -> Option<&str> {
        self.last_response.as_deref().filter(|s| !s.is_empty())
    }

    /// フィードバックに添える問い合わせ。空なら送信できない
    pub fn feedback_query(&self) -> Option<&str> {
        self.last_query.as_deref().filter(|s| !s.trim().is_empty())
    }

    pub fn is_submit_in_flight(&self) -> bool {
        self.submit_in_flight
    }

    /// 送信中フラグを立てる。既に送信中ならfalse
    pub fn try_begin_submit(&mut self) -> bool {
        if self.submit_in_flight {
            return false;
        }
        self.submit_in_flight = true;
        true
    }

    pub fn end_submit(&mut self) {
        self.submit_in_flight = false;
    }
}
