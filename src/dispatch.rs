//! Maps user-facing triggers (clicks, key presses, page load) to actions.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::api::ApiClient;
use crate::controller::{ConversationController, SendOutcome, SettingsProjector};
use crate::ui_context::{Panel, UiContext};

/// A raw input event from a front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// The panel's send button was pressed.
    Click(Panel),
    /// A key was released in the panel's input field.
    KeyUp {
        panel: Panel,
        key: String,
        shift: bool,
    },
    /// The page finished loading.
    Loaded,
}

impl Trigger {
    pub fn enter(panel: Panel) -> Self {
        Trigger::KeyUp {
            panel,
            key: "Enter".to_string(),
            shift: false,
        }
    }

    /// The binding this trigger fires, if any. Shift+Enter is a newline, not a send.
    pub fn binding(&self) -> Option<Binding> {
        match self {
            Trigger::Click(panel) => Some(Binding::Click(*panel)),
            Trigger::KeyUp { panel, key, shift } if key == "Enter" && !shift => {
                Some(Binding::Enter(*panel))
            }
            Trigger::KeyUp { .. } => None,
            Trigger::Loaded => Some(Binding::Loaded),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    Click(Panel),
    Enter(Panel),
    Loaded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Send(Panel),
    RefreshSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Sent(SendOutcome),
    /// Whether the settings fetch succeeded.
    Refreshed(bool),
}

#[derive(Debug, Clone, Default)]
pub struct DispatchTable {
    routes: HashMap<Binding, Action>,
}

impl DispatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Click or Enter sends on each panel; page load projects settings.
    pub fn standard() -> Self {
        let mut table = Self::new();
        for panel in [Panel::Chat, Panel::Settings] {
            table.bind(Binding::Click(panel), Action::Send(panel));
            table.bind(Binding::Enter(panel), Action::Send(panel));
        }
        table.bind(Binding::Loaded, Action::RefreshSettings);
        table
    }

    pub fn bind(&mut self, binding: Binding, action: Action) -> &mut Self {
        self.routes.insert(binding, action);
        self
    }

    pub fn resolve(&self, trigger: &Trigger) -> Option<Action> {
        trigger
            .binding()
            .and_then(|binding| self.routes.get(&binding).copied())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Everything a front end needs: the shared page model, both controllers,
/// and the table wiring triggers to them. Cheap to clone into tasks.
#[derive(Clone)]
pub struct App {
    ui: UiContext,
    table: Arc<DispatchTable>,
    chat: ConversationController,
    settings: ConversationController,
    projector: SettingsProjector,
}

impl App {
    pub fn new(api: ApiClient, ui: UiContext) -> Self {
        Self::with_table(api, ui, DispatchTable::standard())
    }

    pub fn with_table(api: ApiClient, ui: UiContext, table: DispatchTable) -> Self {
        Self {
            chat: ConversationController::chat(api.clone(), ui.clone()),
            settings: ConversationController::settings(api.clone(), ui.clone()),
            projector: SettingsProjector::new(api, ui.clone()),
            table: Arc::new(table),
            ui,
        }
    }

    pub fn ui(&self) -> &UiContext {
        &self.ui
    }

    pub fn controller(&self, panel: Panel) -> &ConversationController {
        match panel {
            Panel::Chat => &self.chat,
            Panel::Settings => &self.settings,
        }
    }

    /// Run whatever the trigger is bound to. Unbound triggers do nothing.
    pub async fn handle(&self, trigger: Trigger) -> Option<ActionOutcome> {
        let Some(action) = self.table.resolve(&trigger) else {
            debug!(?trigger, "No action bound");
            return None;
        };
        debug!(?trigger, ?action, "Dispatching");
        Some(self.run(action).await)
    }

    pub async fn run(&self, action: Action) -> ActionOutcome {
        match action {
            Action::Send(panel) => ActionOutcome::Sent(self.controller(panel).send().await),
            Action::RefreshSettings => ActionOutcome::Refreshed(self.projector.refresh().await),
        }
    }

    /// Fire the page-load trigger.
    pub async fn start(&self) -> Option<ActionOutcome> {
        self.handle(Trigger::Loaded).await
    }
}
