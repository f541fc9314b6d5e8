//! The page model shared by every controller.
//!
//! `UiContext` is a cheap, cloneable handle. All mutation goes through it and
//! every visible change is also broadcast as a `UiEvent`, so a front end can
//! render updates in the order they happened.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::constants::UI_EVENT_CAPACITY;
use crate::message::{Message, MessageLog};
use crate::settings::{Appearance, SettingsProjection};

/// The two conversation panels on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    Chat,
    Settings,
}

impl Panel {
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Chat => "chat",
            Panel::Settings => "settings",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    MessageAppended { panel: Panel, message: Message },
    SettingsProjected(SettingsProjection),
}

#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub chat_input: String,
    pub settings_input: String,
    pub chat_log: MessageLog,
    pub settings_log: MessageLog,
    pub settings: SettingsProjection,
}

impl UiState {
    pub fn input(&self, panel: Panel) -> &str {
        match panel {
            Panel::Chat => &self.chat_input,
            Panel::Settings => &self.settings_input,
        }
    }

    fn input_mut(&mut self, panel: Panel) -> &mut String {
        match panel {
            Panel::Chat => &mut self.chat_input,
            Panel::Settings => &mut self.settings_input,
        }
    }

    pub fn log(&self, panel: Panel) -> &MessageLog {
        match panel {
            Panel::Chat => &self.chat_log,
            Panel::Settings => &self.settings_log,
        }
    }

    fn log_mut(&mut self, panel: Panel) -> &mut MessageLog {
        match panel {
            Panel::Chat => &mut self.chat_log,
            Panel::Settings => &mut self.settings_log,
        }
    }
}

#[derive(Clone)]
pub struct UiContext {
    state: Arc<Mutex<UiState>>,
    events: broadcast::Sender<UiEvent>,
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new()
    }
}

impl UiContext {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(UI_EVENT_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(UiState::default())),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.events.subscribe()
    }

    // Called with the state lock held so subscribers see changes in log order.
    fn emit(&self, event: UiEvent) {
        // No subscribers is fine, e.g. in tests.
        let _ = self.events.send(event);
    }

    pub async fn set_input(&self, panel: Panel, text: impl Into<String>) {
        *self.state.lock().await.input_mut(panel) = text.into();
    }

    /// Take the panel's input for sending.
    ///
    /// Whitespace-only input is left untouched and yields `None`. Otherwise the
    /// trimmed text is echoed into the log as a user message, the input is
    /// cleared, and the text is returned.
    pub async fn submit_input(&self, panel: Panel) -> Option<String> {
        let mut state = self.state.lock().await;
        let text = state.input(panel).trim().to_string();
        if text.is_empty() {
            debug!(panel = panel.name(), "Ignoring empty input");
            return None;
        }
        let message = Message::user(text.clone());
        state.log_mut(panel).push(message.clone());
        state.input_mut(panel).clear();
        self.emit(UiEvent::MessageAppended { panel, message });
        Some(text)
    }

    /// Like `submit_input`, for text that did not come from the input field.
    pub async fn submit_text(&self, panel: Panel, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() {
            debug!(panel = panel.name(), "Ignoring empty input");
            return None;
        }
        self.append(panel, Message::user(text)).await;
        Some(text.to_string())
    }

    pub async fn append(&self, panel: Panel, message: Message) {
        let mut state = self.state.lock().await;
        state.log_mut(panel).push(message.clone());
        self.emit(UiEvent::MessageAppended { panel, message });
    }

    /// Replace the settings panel and page appearance with a new projection.
    pub async fn apply_settings(&self, projection: SettingsProjection) {
        let mut state = self.state.lock().await;
        state.settings = projection.clone();
        self.emit(UiEvent::SettingsProjected(projection));
    }

    pub async fn input(&self, panel: Panel) -> String {
        self.state.lock().await.input(panel).to_string()
    }

    pub async fn messages(&self, panel: Panel) -> Vec<Message> {
        self.state.lock().await.log(panel).messages().to_vec()
    }

    pub async fn settings(&self) -> SettingsProjection {
        self.state.lock().await.settings.clone()
    }

    pub async fn appearance(&self) -> Appearance {
        self.state.lock().await.settings.appearance
    }

    pub async fn body_classes(&self) -> Vec<&'static str> {
        self.appearance().await.body_classes()
    }

    pub async fn snapshot(&self) -> UiState {
        self.state.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Origin;

    #[tokio::test]
    async fn test_submit_trims_echoes_and_clears() {
        let ui = UiContext::new();
        let mut events = ui.subscribe();
        ui.set_input(Panel::Chat, "  hello  ").await;

        let text = ui.submit_input(Panel::Chat).await;
        assert_eq!(text.as_deref(), Some("hello"));
        assert_eq!(ui.input(Panel::Chat).await, "");

        let messages = ui.messages(Panel::Chat).await;
        assert_eq!(messages, vec![Message::user("hello")]);
        assert!(ui.messages(Panel::Settings).await.is_empty());

        match events.recv().await.unwrap() {
            UiEvent::MessageAppended { panel, message } => {
                assert_eq!(panel, Panel::Chat);
                assert_eq!(message.origin, Origin::User);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_whitespace_is_noop() {
        let ui = UiContext::new();
        ui.set_input(Panel::Settings, "   \n\t").await;

        assert!(ui.submit_input(Panel::Settings).await.is_none());
        assert!(ui.messages(Panel::Settings).await.is_empty());
        assert_eq!(ui.input(Panel::Settings).await, "   \n\t");
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let ui = UiContext::new();
        let other = ui.clone();
        other.append(Panel::Chat, Message::assistant("hi")).await;
        assert_eq!(ui.messages(Panel::Chat).await.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_appends_broadcast_in_log_order() {
        let ui = UiContext::new();
        let mut events = ui.subscribe();

        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..50 {
            let ui = ui.clone();
            tasks.spawn(async move {
                ui.append(Panel::Chat, Message::assistant(i.to_string())).await;
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        let logged: Vec<String> = ui
            .messages(Panel::Chat)
            .await
            .into_iter()
            .map(|m| m.text)
            .collect();
        let mut received = Vec::new();
        while let Ok(event) = events.try_recv() {
            if let UiEvent::MessageAppended { message, .. } = event {
                received.push(message.text);
            }
        }
        assert_eq!(logged.len(), 50);
        assert_eq!(received, logged);
    }

    #[tokio::test]
    async fn test_initial_appearance() {
        let ui = UiContext::new();
        assert_eq!(ui.body_classes().await, vec!["font-medium"]);
        assert_eq!(ui.settings().await.age, "N/A");
    }
}
