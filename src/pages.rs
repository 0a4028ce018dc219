use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ListState;
use tracing::{info, warn};

use crate::api::Backend;
use crate::error::{ActionError, ApiError};
use crate::forms::{FormCommand, FormStatus, TextField, cycle_focus};
use crate::grouping::{placement, visible_documents};
use crate::modals::Modal;
use crate::models::{Document, LoginRequest, RegisterRequest, Workspace};

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Health {
    Checking,
    Online,
    Offline(String),
}

pub struct LandingPage {
    pub health: Health,
}

impl LandingPage {
    pub fn new() -> Self {
        Self {
            health: Health::Checking,
        }
    }

    pub fn check(&mut self, api: &dyn Backend) {
        self.health = match api.health() {
            Ok(()) => Health::Online,
            Err(err) => {
                warn!(error = %err, "backend health check failed");
                Health::Offline(err.to_string())
            }
        };
    }
}

pub struct RegisterPage {
    pub fields: [TextField; 3],
    pub focus: usize,
    pub status: FormStatus,
}

impl RegisterPage {
    pub const LABELS: [&'static str; 3] = ["Username", "Email", "Password"];

    pub fn new() -> Self {
        Self {
            fields: [TextField::new(), TextField::new(), TextField::masked()],
            focus: 0,
            status: FormStatus::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        if self.status.is_submitting() {
            return FormCommand::None;
        }
        handle_form_key(&mut self.fields, &mut self.focus, key)
    }

    pub fn prepare(&mut self) -> bool {
        self.status.begin(self.validate()).is_some()
    }

    fn validate(&self) -> Result<RegisterRequest, ActionError> {
        let [username, email, password] = &self.fields;
        let username = username.value().trim();
        let email = email.value().trim();
        if username.is_empty() || email.is_empty() || password.value().is_empty() {
            return Err(ActionError::validation(
                "Username, email and password are required.",
            ));
        }
        if !email.contains('@') {
            return Err(ActionError::validation("Please enter a valid email address."));
        }
        Ok(RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.value().to_string(),
        })
    }

    pub fn submit(&mut self, api: &dyn Backend) -> bool {
        let Some(request) = self.status.begin(self.validate()) else {
            return false;
        };
        match api.register(&request) {
            Ok(()) => {
                info!(username = %request.username, "account registered");
                self.status.succeed();
                true
            }
            Err(err) => {
                warn!(error = %err, "registration failed");
                self.status
                    .fail(ActionError::from_api(err, "Registration failed"));
                false
            }
        }
    }
}

pub struct LoginPage {
    pub fields: [TextField; 2],
    pub focus: usize,
    pub status: FormStatus,
}

impl LoginPage {
    pub const LABELS: [&'static str; 2] = ["Username", "Password"];

    pub fn new() -> Self {
        Self {
            fields: [TextField::new(), TextField::masked()],
            focus: 0,
            status: FormStatus::default(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormCommand {
        if self.status.is_submitting() {
            return FormCommand::None;
        }
        handle_form_key(&mut self.fields, &mut self.focus, key)
    }

    pub fn prepare(&mut self) -> bool {
        self.status.begin(self.validate()).is_some()
    }

    fn validate(&self) -> Result<LoginRequest, ActionError> {
        let [username, password] = &self.fields;
        let username = username.value().trim();
        if username.is_empty() || password.value().is_empty() {
            return Err(ActionError::validation("Username and password are required."));
        }
        Ok(LoginRequest {
            username: username.to_string(),
            password: password.value().to_string(),
        })
    }

    pub fn submit(&mut self, api: &dyn Backend) -> Option<String> {
        let request = self.status.begin(self.validate())?;
        match api.login(&request) {
            Ok(()) => {
                info!(username = %request.username, "logged in");
                self.status.succeed();
                Some(request.username)
            }
            Err(err) => {
                warn!(error = %err, "login failed");
                self.status.fail(ActionError::from_api(err, "Login failed"));
                None
            }
        }
    }
}

fn handle_form_key(fields: &mut [TextField], focus: &mut usize, key: KeyEvent) -> FormCommand {
    match key.code {
        KeyCode::Esc => FormCommand::Close,
        KeyCode::Enter => FormCommand::Submit,
        KeyCode::Tab | KeyCode::Down => {
            *focus = cycle_focus(*focus, fields.len(), false);
            FormCommand::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            *focus = cycle_focus(*focus, fields.len(), true);
            FormCommand::None
        }
        _ => {
            if let Some(field) = fields.get_mut(*focus) {
                field.handle_key(key);
            }
            FormCommand::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Workspaces,
    Documents,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    pub workspace_id: u64,
    pub title: String,
}

pub struct HomePage {
    pub documents: LoadState<Vec<Document>>,
    pub workspaces: LoadState<Vec<Workspace>>,
    pub focus: HomeFocus,
    pub workspace_state: ListState,
    pub document_state: ListState,
    pub open_workspace: Option<u64>,
    pub confirm: Option<DeleteConfirmation>,
    pub modal: Option<Modal>,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            documents: LoadState::Loading,
            workspaces: LoadState::Loading,
            focus: HomeFocus::Workspaces,
            workspace_state: ListState::default(),
            document_state: ListState::default(),
            open_workspace: None,
            confirm: None,
            modal: None,
        }
    }

    pub fn document_list(&self) -> &[Document] {
        match &self.documents {
            LoadState::Loaded(documents) => documents,
            _ => &[],
        }
    }

    pub fn workspace_list(&self) -> &[Workspace] {
        match &self.workspaces {
            LoadState::Loaded(workspaces) => workspaces,
            _ => &[],
        }
    }

    pub fn visible_documents(&self) -> Vec<&Document> {
        visible_documents(self.document_list(), self.open_workspace)
    }

    pub fn open_workspace(&self) -> Option<&Workspace> {
        let id = self.open_workspace?;
        self.workspace_list().iter().find(|workspace| workspace.id == id)
    }

    pub fn selected_workspace(&self) -> Option<&Workspace> {
        self.workspace_state
            .selected()
            .and_then(|index| self.workspace_list().get(index))
    }

    pub fn selected_document(&self) -> Option<&Document> {
        let index = self.document_state.selected()?;
        self.visible_documents().get(index).copied()
    }

    pub fn placement_label(&self, document: &Document) -> String {
        placement(document, self.workspace_list()).label()
    }

    pub fn apply_documents(&mut self, result: Result<Vec<Document>, ApiError>) {
        self.documents = match result {
            Ok(documents) => LoadState::Loaded(documents),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        self.clamp_document_selection();
    }

    pub fn apply_workspaces(&mut self, result: Result<Vec<Workspace>, ApiError>) {
        self.workspaces = match result {
            Ok(workspaces) => LoadState::Loaded(workspaces),
            Err(err) => LoadState::Failed(err.to_string()),
        };
        if let Some(id) = self.open_workspace {
            if !self.workspace_list().iter().any(|workspace| workspace.id == id) {
                self.open_workspace = None;
                self.clamp_document_selection();
            }
        }
        let len = self.workspace_list().len();
        clamp(&mut self.workspace_state, len);
    }

    fn clamp_document_selection(&mut self) {
        let len = self.visible_documents().len();
        clamp(&mut self.document_state, len);
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            HomeFocus::Workspaces => HomeFocus::Documents,
            HomeFocus::Documents => HomeFocus::Workspaces,
        };
    }

    pub fn move_selection(&mut self, backwards: bool) {
        let (len, state) = match self.focus {
            HomeFocus::Workspaces => (self.workspace_list().len(), &mut self.workspace_state),
            HomeFocus::Documents => {
                let len = self.visible_documents().len();
                (len, &mut self.document_state)
            }
        };
        if len == 0 {
            return;
        }
        let current = state.selected().unwrap_or(0);
        state.select(Some(cycle_focus(current, len, backwards)));
    }

    pub fn toggle_open(&mut self) {
        let Some(id) = self.selected_workspace().map(|workspace| workspace.id) else {
            return;
        };
        self.open_workspace = if self.open_workspace == Some(id) {
            None
        } else {
            Some(id)
        };
        self.document_state.select(None);
        self.clamp_document_selection();
    }

    pub fn close_workspace(&mut self) {
        self.open_workspace = None;
        self.clamp_document_selection();
    }

    pub fn request_delete(&mut self) {
        self.confirm = self
            .selected_workspace()
            .map(|workspace| DeleteConfirmation {
                workspace_id: workspace.id,
                title: workspace.title.clone(),
            });
    }
}

fn clamp(state: &mut ListState, len: usize) {
    match state.selected() {
        _ if len == 0 => state.select(None),
        Some(index) if index >= len => state.select(Some(len - 1)),
        None => state.select(Some(0)),
        Some(_) => {}
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileTab {
    Account,
    ApiKeys,
}

pub struct ProfilePage {
    pub tab: ProfileTab,
    pub api_keys: Vec<(&'static str, TextField)>,
    pub key_focus: usize,
}

impl ProfilePage {
    pub const SERVICES: [&'static str; 4] = ["OpenAI", "Mistral", "Claude", "VoyageAI"];

    pub fn new() -> Self {
        Self {
            tab: ProfileTab::Account,
            api_keys: Self::SERVICES
                .iter()
                .map(|service| (*service, TextField::masked()))
                .collect(),
            key_focus: 0,
        }
    }

    pub fn select_tab(&mut self, tab: ProfileTab) {
        self.tab = tab;
    }

    pub fn handle_key_input(&mut self, key: KeyEvent) -> FormCommand {
        match key.code {
            KeyCode::Esc => FormCommand::Close,
            KeyCode::Enter => FormCommand::Submit,
            KeyCode::Down | KeyCode::Tab => {
                self.key_focus = cycle_focus(self.key_focus, self.api_keys.len(), false);
                FormCommand::None
            }
            KeyCode::Up | KeyCode::BackTab => {
                self.key_focus = cycle_focus(self.key_focus, self.api_keys.len(), true);
                FormCommand::None
            }
            _ => {
                if let Some((_, field)) = self.api_keys.get_mut(self.key_focus) {
                    field.handle_key(key);
                }
                FormCommand::None
            }
        }
    }

    pub fn focused_service(&self) -> &'static str {
        self.api_keys
            .get(self.key_focus)
            .map(|(service, _)| *service)
            .unwrap_or_default()
    }
}
