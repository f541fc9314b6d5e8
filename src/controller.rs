//! Send/receive cycle for the two conversation panels, and the settings
//! projection that follows a settings turn.

use tracing::{error, info, instrument, warn};

use crate::api::{ApiClient, AskOutcome};
use crate::constants::{ASK_PATH, ASK_SETTINGS_PATH};
use crate::message::Message;
use crate::settings;
use crate::ui_context::{Panel, UiContext};

/// What a single send did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Input was empty or whitespace only. Nothing was appended or sent.
    Skipped,
    Replied { needs_confirmation: bool },
    BackendError,
    /// Transport or decoding failure; the fallback message was appended.
    Failed,
}

/// Fetches `/get_user_settings` and projects it onto the page.
#[derive(Clone)]
pub struct SettingsProjector {
    api: ApiClient,
    ui: UiContext,
}

impl SettingsProjector {
    pub fn new(api: ApiClient, ui: UiContext) -> Self {
        Self { api, ui }
    }

    /// Returns `false` when the fetch failed; the previous projection stays.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> bool {
        match self.api.get_user_settings().await {
            Ok(user_settings) => {
                let projection = settings::project(&user_settings);
                info!(classes = ?projection.appearance.body_classes(), "Applying user settings");
                self.ui.apply_settings(projection).await;
                true
            }
            Err(e) => {
                error!("Failed to fetch settings: {}", e);
                false
            }
        }
    }
}

/// Drives one conversation panel. The chat and settings panels share this
/// contract and differ only in endpoint and in the settings refresh after a
/// settings reply.
#[derive(Clone)]
pub struct ConversationController {
    panel: Panel,
    api: ApiClient,
    ui: UiContext,
    // Only the settings panel refreshes the projection after a reply.
    projector: Option<SettingsProjector>,
}

impl ConversationController {
    pub fn chat(api: ApiClient, ui: UiContext) -> Self {
        Self {
            panel: Panel::Chat,
            api,
            ui,
            projector: None,
        }
    }

    pub fn settings(api: ApiClient, ui: UiContext) -> Self {
        let projector = SettingsProjector::new(api.clone(), ui.clone());
        Self {
            panel: Panel::Settings,
            api,
            ui,
            projector: Some(projector),
        }
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    fn endpoint(&self) -> &'static str {
        match self.panel {
            Panel::Chat => ASK_PATH,
            Panel::Settings => ASK_SETTINGS_PATH,
        }
    }

    /// Send whatever is in the panel's input field.
    pub async fn send(&self) -> SendOutcome {
        match self.ui.submit_input(self.panel).await {
            Some(text) => self.deliver(&text).await,
            None => SendOutcome::Skipped,
        }
    }

    /// Send `text` directly, bypassing the input field.
    pub async fn send_text(&self, text: &str) -> SendOutcome {
        match self.ui.submit_text(self.panel, text).await {
            Some(text) => self.deliver(&text).await,
            None => SendOutcome::Skipped,
        }
    }

    #[instrument(skip(self, text), fields(panel = self.panel.name()))]
    async fn deliver(&self, text: &str) -> SendOutcome {
        match self.api.post_message(self.endpoint(), text).await {
            Ok(AskOutcome::Reply {
                text,
                needs_confirmation,
            }) => {
                self.ui.append(self.panel, Message::assistant(text)).await;
                if let Some(projector) = &self.projector {
                    projector.refresh().await;
                }
                SendOutcome::Replied { needs_confirmation }
            }
            Ok(AskOutcome::BackendError(error)) => {
                warn!(%error, "Backend reported an error");
                self.ui
                    .append(self.panel, Message::backend_error(&error))
                    .await;
                SendOutcome::BackendError
            }
            Err(e) => {
                error!("Request failed: {}", e);
                self.ui.append(self.panel, Message::fallback()).await;
                SendOutcome::Failed
            }
        }
    }
}
