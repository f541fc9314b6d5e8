pub mod api;
pub mod config;
pub mod constants;
pub mod controller;
pub mod dispatch;
pub mod error;
pub mod history;
pub mod message;
pub mod render;
pub mod settings;
pub mod ui_context;

pub use api::{ApiClient, AskOutcome};
pub use controller::{ConversationController, SendOutcome, SettingsProjector};
pub use dispatch::{Action, ActionOutcome, App, DispatchTable, Trigger};
pub use error::ClientError;
pub use message::{Message, MessageLog, Origin};
pub use settings::{Appearance, FontSize, SettingsProjection, Theme, UserSettings};
pub use ui_context::{Panel, UiContext, UiEvent};
