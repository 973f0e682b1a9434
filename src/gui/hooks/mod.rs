// Dioxus用カスタムフック
pub mod use_ticket_client;

pub use use_ticket_client::{
    key_stroke_from_event, use_ticket_client, ClientServices, DesktopClient, SignalView,
};
