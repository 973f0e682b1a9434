// Dioxus GUI Components Module

pub mod api_key_modal;
pub mod main_window;
pub mod response_editor;
pub mod results_panel;
pub mod sources_panel;
pub mod ticket_input;
pub mod toast_layer;

pub use api_key_modal::ApiKeyModal;
pub use main_window::MainWindow;
pub use response_editor::ResponseEditor;
pub use results_panel::ResultsPanel;
pub use sources_panel::SourcesPanel;
pub use ticket_input::TicketInput;
pub use toast_layer::ToastLayer;
