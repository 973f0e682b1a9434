// Core modules
pub mod clipboard;
pub mod config_manager; // 設定管理モジュール
pub mod error;
pub mod hotkeys;
pub mod models; // 画面状態とビューモデル
pub mod presenter; // APIレスポンス → 表示用モデル
pub mod session;
pub mod ticket_client; // 画面操作のフロー
pub mod toast;
pub mod utils; // ログ初期化などのユーティリティ
pub mod view;

// Dioxus UI components
pub mod components;
pub mod hooks;
pub mod styles;

pub use components::MainWindow;
pub use error::ActionError;
pub use models::PageState;
pub use ticket_client::{ClientSettings, TicketClient};
pub use view::{MemoryView, TicketView};
