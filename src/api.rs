pub mod client; // reqwestによるバックエンドクライアント
pub mod models; // /api/* のワイヤ型

pub use client::{ApiError, HttpSupportApi, SupportApi};
