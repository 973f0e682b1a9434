pub mod api;
pub mod error;
pub mod gui;

// Re-export the main error types for convenience
pub use api::ApiError;
pub use error::{SupportError, SupportResult};
pub use gui::ActionError;

// Re-export the backend client
pub use api::{HttpSupportApi, SupportApi};

// Re-export the UI flow types
pub use gui::{ClientSettings, MemoryView, PageState, TicketClient, TicketView};
