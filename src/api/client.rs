use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::api::models::{
    ErrorBody, FeedbackRequest, FeedbackResponse, FeedbackSummary, InitRequest, InitResponse,
    InitStatus, TicketRequest, TicketResult, VersionInfo,
};

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("Rate limited (attempts: {attempts:?})")]
    RateLimited {
        attempts: Option<u32>,
        message: Option<String>,
    },
    #[error("Server returned {status}: {}", .message.as_deref().unwrap_or("<no message>"))]
    Server { status: u16, message: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// サーバーが返したエラーテキスト
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ApiError::RateLimited { .. })
    }
}

/// サポートバックエンドの抽象インタフェース
#[async_trait]
pub trait SupportApi: Send + Sync {
    /// アプリケーションのバージョンを取得
    async fn version(&self) -> Result<VersionInfo, ApiError>;

    /// バックエンドが初期化済みかどうかを取得
    async fn check_init(&self) -> Result<InitStatus, ApiError>;

    /// APIキーでバックエンドを初期化
    async fn init(&self, api_key: &str) -> Result<InitResponse, ApiError>;

    /// 問い合わせを分類し、回答案と類似記事を取得
    async fn process_ticket(&self, ticket_text: &str) -> Result<TicketResult, ApiError>;

    /// 記事の有用性フィードバックを送信
    async fn send_feedback(&self, request: &FeedbackRequest)
        -> Result<FeedbackResponse, ApiError>;

    /// フィードバック全体の統計を取得
    async fn feedback_stats(&self) -> Result<FeedbackSummary, ApiError>;
}

/// reqwestによる `SupportApi` 実装
#[derive(Debug, Clone)]
pub struct HttpSupportApi {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpSupportApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;
        Self::with_client(base_url, http_client)
    }

    pub fn with_client(base_url: &str, http_client: reqwest::Client) -> Result<Self, ApiError> {
        // join() が末尾のパス要素を置き換えないようにスラッシュで終える
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url =
            Url::parse(&normalized).map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "📡 API request sent");

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("❌ HTTP request failed: {}", e);
            e
        })?;

        Self::decode(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "📡 API request sent");

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("❌ HTTP request failed: {}", e);
                e
            })?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            tracing::error!("❌ Failed to read response text: {}", e);
            e
        })?;

        tracing::debug!(
            status = status.as_u16(),
            response_size_bytes = response_text.len(),
            "📨 API response received"
        );

        if !status.is_success() {
            return Err(Self::error_from_body(status, &response_text));
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!("❌ Failed to parse JSON response: {}", e);
            tracing::debug!(
                "🔍 Response text preview: {}",
                response_text.chars().take(200).collect::<String>()
            );
            ApiError::Decode(e)
        })
    }

    fn error_from_body(status: StatusCode, response_text: &str) -> ApiError {
        // エラーボディがJSONでない場合もステータスだけで判定できるようにする
        let body: ErrorBody = serde_json::from_str(response_text).unwrap_or_default();

        if status == StatusCode::TOO_MANY_REQUESTS || body.is_rate_limit() {
            tracing::warn!(
                status = status.as_u16(),
                attempts = ?body.attempts,
                "⏳ Backend is rate limited"
            );
            return ApiError::RateLimited {
                attempts: body.attempts,
                message: body.message,
            };
        }

        tracing::warn!(
            status = status.as_u16(),
            error = ?body.error,
            "⚠️ Backend returned an error"
        );
        ApiError::Server {
            status: status.as_u16(),
            message: body.error,
        }
    }
}

#[async_trait]
impl SupportApi for HttpSupportApi {
    async fn version(&self) -> Result<VersionInfo, ApiError> {
        self.get_json("api/version").await
    }

    async fn check_init(&self) -> Result<InitStatus, ApiError> {
        self.get_json("api/check_init").await
    }

    async fn init(&self, api_key: &str) -> Result<InitResponse, ApiError> {
        let request = InitRequest {
            api_key: api_key.to_string(),
        };
        self.post_json("api/init", &request).await
    }

    async fn process_ticket(&self, ticket_text: &str) -> Result<TicketResult, ApiError> {
        let request = TicketRequest {
            ticket_text: ticket_text.to_string(),
        };
        let result: TicketResult = self.post_json("api/process_ticket", &request).await?;

        if let Some(changes) = result.anglicism_changes.as_ref().filter(|c| !c.is_empty()) {
            tracing::debug!(changes = ?changes, "🔤 Backend normalized the ticket text");
        }

        Ok(result)
    }

    async fn send_feedback(
        &self,
        request: &FeedbackRequest,
    ) -> Result<FeedbackResponse, ApiError> {
        self.post_json("api/feedback", request).await
    }

    async fn feedback_stats(&self) -> Result<FeedbackSummary, ApiError> {
        self.get_json("api/feedback/stats").await
    }
}
