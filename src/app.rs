use std::collections::VecDeque;
use std::time::{Duration, Instant};

use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info, warn};

use crate::api::Backend;
use crate::config::Settings;
use crate::error::ActionError;
use crate::forms::{FormCommand, ModalHost, Refresh};
use crate::modals::{AddToWorkspaceModal, CreateWorkspaceModal, Modal, UploadModal, ViewDocumentModal};
use crate::models::Session;
use crate::pages::{
    HomeFocus, HomePage, LandingPage, LoadState, LoginPage, ProfilePage, ProfileTab, RegisterPage,
};
use crate::router::Route;
use crate::storage::{ConfigStore, ThemePreference};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    CheckHealth,
    FetchDocuments,
    FetchWorkspaces,
    SubmitModal,
    DeleteWorkspace(u64),
    RemoveDocument(u64),
    Register,
    Login,
}

pub struct App {
    pub should_quit: bool,
    pub route: Route,
    pub session: Session,
    pub api_url: String,
    pub theme: ThemePreference,
    pub show_help: bool,
    pub landing: LandingPage,
    pub register: RegisterPage,
    pub login: LoginPage,
    pub home: HomePage,
    pub profile: ProfilePage,
    api: Box<dyn Backend>,
    store: Option<ConfigStore>,
    pending: VecDeque<Pending>,
    toast: Option<Toast>,
}

#[derive(Default)]
struct ModalOutcome {
    refresh: Refresh,
    closed: bool,
}

impl ModalHost for ModalOutcome {
    fn on_success(&mut self, refresh: Refresh) {
        self.refresh = refresh;
    }

    fn on_close(&mut self) {
        self.closed = true;
    }
}

impl App {
    pub fn new(settings: &Settings, api: Box<dyn Backend>, store: Option<ConfigStore>) -> Self {
        let mut app = App {
            should_quit: false,
            route: Route::Landing,
            session: Session::new(settings.user_id, settings.username.clone()),
            api_url: settings.api_url.clone(),
            theme: settings.theme,
            show_help: false,
            landing: LandingPage::new(),
            register: RegisterPage::new(),
            login: LoginPage::new(),
            home: HomePage::new(),
            profile: ProfilePage::new(),
            api,
            store,
            pending: VecDeque::new(),
            toast: None,
        };
        app.navigate(settings.start_route);
        app
    }

    pub fn navigate(&mut self, route: Route) {
        info!(from = %self.route, to = %route, "navigate");
        self.route = route;
        self.show_help = false;
        self.pending.clear();
        match route {
            Route::Landing => {
                self.landing = LandingPage::new();
                self.pending.push_back(Pending::CheckHealth);
            }
            Route::Register => self.register = RegisterPage::new(),
            Route::Login => self.login = LoginPage::new(),
            Route::Home => {
                self.home = HomePage::new();
                self.pending.push_back(Pending::FetchDocuments);
                self.pending.push_back(Pending::FetchWorkspaces);
            }
            Route::Profile => self.profile = ProfilePage::new(),
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn run_next_pending(&mut self) {
        let Some(action) = self.pending.pop_front() else {
            return;
        };

        match action {
            Pending::CheckHealth => self.landing.check(self.api.as_ref()),
            Pending::FetchDocuments => {
                let result = self.api.list_documents(self.session.user_id);
                if let Err(err) = &result {
                    error!(error = %err, "error fetching documents");
                }
                self.home.apply_documents(result);
            }
            Pending::FetchWorkspaces => {
                let result = self.api.list_workspaces(self.session.user_id);
                if let Err(err) = &result {
                    error!(error = %err, "error fetching workspaces");
                }
                self.home.apply_workspaces(result);
            }
            Pending::SubmitModal => self.submit_modal(),
            Pending::DeleteWorkspace(workspace_id) => self.delete_workspace(workspace_id),
            Pending::RemoveDocument(document_id) => self.remove_document(document_id),
            Pending::Register => {
                if self.register.submit(self.api.as_ref()) {
                    self.navigate(Route::Login);
                    self.set_toast("Account created. Please log in.", false);
                }
            }
            Pending::Login => {
                if let Some(username) = self.login.submit(self.api.as_ref()) {
                    self.persist_username(Some(&username));
                    self.session.username = Some(username);
                    self.navigate(Route::Home);
                }
            }
        }
    }

    fn submit_modal(&mut self) {
        let Some(mut modal) = self.home.modal.take() else {
            return;
        };
        let mut outcome = ModalOutcome::default();
        modal.submit(self.api.as_ref(), &self.session, &mut outcome);

        if !outcome.closed {
            self.home.modal = Some(modal);
            return;
        }
        self.request_refresh(outcome.refresh);
    }

    fn request_refresh(&mut self, refresh: Refresh) {
        if refresh.documents {
            self.home.documents = LoadState::Loading;
            self.pending.push_back(Pending::FetchDocuments);
        }
        if refresh.workspaces {
            self.home.workspaces = LoadState::Loading;
            self.pending.push_back(Pending::FetchWorkspaces);
        }
    }

    fn delete_workspace(&mut self, workspace_id: u64) {
        match self.api.delete_workspace(workspace_id) {
            Ok(()) => {
                info!(workspace_id, "workspace deleted");
                self.set_toast("Workspace deleted.", false);
                self.request_refresh(Refresh::WORKSPACES);
            }
            Err(err) => {
                error!(workspace_id, error = %err, "error deleting workspace");
                let failure = ActionError::from_api(err, "Failed to delete workspace");
                self.set_toast(failure.message().to_string(), true);
            }
        }
    }

    fn remove_document(&mut self, document_id: u64) {
        match self.api.remove_document_from_workspace(document_id) {
            Ok(()) => {
                info!(document_id, "document removed from workspace");
                self.set_toast("Document removed from workspace.", false);
                self.request_refresh(Refresh::DOCUMENTS);
            }
            Err(err) => {
                error!(document_id, error = %err, "error removing document");
                let failure = ActionError::from_api(err, "Failed to remove document");
                self.set_toast(failure.message().to_string(), true);
            }
        }
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.show_help = false;
            }
            return;
        }

        match self.route {
            Route::Landing => self.handle_landing_input(key),
            Route::Register => self.handle_register_input(key),
            Route::Login => self.handle_login_input(key),
            Route::Home => self.handle_home_input(key),
            Route::Profile => self.handle_profile_input(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        match self.route {
            Route::Home => {
                if let Some(modal) = self.home.modal.as_mut() {
                    modal.handle_paste(text);
                }
            }
            Route::Register => {
                let focus = self.register.focus;
                if !self.register.status.is_submitting() {
                    self.register.fields[focus].push_str(text);
                }
            }
            Route::Login => {
                let focus = self.login.focus;
                if !self.login.status.is_submitting() {
                    self.login.fields[focus].push_str(text);
                }
            }
            Route::Profile if self.profile.tab == ProfileTab::ApiKeys => {
                let focus = self.profile.key_focus;
                if let Some((_, field)) = self.profile.api_keys.get_mut(focus) {
                    field.push_str(text);
                }
            }
            Route::Landing | Route::Profile => {}
        }
    }

    fn handle_landing_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('l') => self.navigate(Route::Login),
            KeyCode::Char('r') | KeyCode::Enter => self.navigate(Route::Register),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_register_input(&mut self, key: KeyEvent) {
        match self.register.handle_key(key) {
            FormCommand::Submit => {
                if self.register.prepare() {
                    self.pending.push_back(Pending::Register);
                }
            }
            FormCommand::Close => self.navigate(Route::Landing),
            FormCommand::None | FormCommand::Copy(_) => {}
        }
    }

    fn handle_login_input(&mut self, key: KeyEvent) {
        match self.login.handle_key(key) {
            FormCommand::Submit => {
                if self.login.prepare() {
                    self.pending.push_back(Pending::Login);
                }
            }
            FormCommand::Close => self.navigate(Route::Landing),
            FormCommand::None | FormCommand::Copy(_) => {}
        }
    }

    fn handle_home_input(&mut self, key: KeyEvent) {
        if self.home.modal.is_some() {
            self.handle_modal_input(key);
            return;
        }

        if let Some(confirm) = self.home.confirm.clone() {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    self.home.confirm = None;
                    self.pending
                        .push_back(Pending::DeleteWorkspace(confirm.workspace_id));
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.home.confirm = None;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('p') => self.navigate(Route::Profile),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('r') => self.request_refresh(Refresh::ALL),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
                self.home.toggle_focus()
            }
            KeyCode::Up => self.home.move_selection(true),
            KeyCode::Down => self.home.move_selection(false),
            KeyCode::Esc => self.home.close_workspace(),
            KeyCode::Char('c') => {
                self.home.modal = Some(Modal::CreateWorkspace(CreateWorkspaceModal::new()));
            }
            KeyCode::Char('u') => {
                let modal = UploadModal::new(self.home.open_workspace());
                self.home.modal = Some(Modal::Upload(modal));
            }
            KeyCode::Char('a') => self.open_add_to_workspace(),
            KeyCode::Char('d') if self.home.focus == HomeFocus::Workspaces => {
                self.home.request_delete()
            }
            KeyCode::Enter if self.home.focus == HomeFocus::Workspaces => self.home.toggle_open(),
            KeyCode::Enter | KeyCode::Char('v') => self.open_document_view(),
            KeyCode::Char('x') => self.remove_selected_document(),
            _ => {}
        }
    }

    fn handle_modal_input(&mut self, key: KeyEvent) {
        let Some(modal) = self.home.modal.as_mut() else {
            return;
        };
        match modal.handle_key(key) {
            FormCommand::Submit => {
                if modal.prepare() {
                    self.pending.push_back(Pending::SubmitModal);
                }
            }
            FormCommand::Close => self.home.modal = None,
            FormCommand::Copy(text) => self.copy_to_clipboard(text),
            FormCommand::None => {}
        }
    }

    fn open_add_to_workspace(&mut self) {
        let preselected = match self.home.focus {
            HomeFocus::Documents => self.home.selected_document().map(|document| document.id),
            HomeFocus::Workspaces => None,
        };
        let mut modal = AddToWorkspaceModal::new(
            self.home.document_list(),
            self.home.workspace_list(),
            preselected,
        );
        if let Some(open) = self.home.open_workspace {
            modal.select_workspace(open);
        }
        self.home.modal = Some(Modal::AddToWorkspace(modal));
    }

    fn open_document_view(&mut self) {
        let Some(document) = self.home.selected_document().cloned() else {
            return;
        };
        let label = self.home.placement_label(&document);
        self.home.modal = Some(Modal::ViewDocument(ViewDocumentModal::new(document, label)));
    }

    fn remove_selected_document(&mut self) {
        if self.home.focus != HomeFocus::Documents {
            return;
        }
        let Some(document) = self.home.selected_document() else {
            return;
        };
        if document.workspace_id.is_none() {
            self.set_toast("Document is not in a workspace.", true);
            return;
        }
        let id = document.id;
        self.pending.push_back(Pending::RemoveDocument(id));
    }

    fn handle_profile_input(&mut self, key: KeyEvent) {
        if self.profile.tab == ProfileTab::ApiKeys {
            match key.code {
                KeyCode::Left | KeyCode::Right => self.profile.select_tab(ProfileTab::Account),
                _ => match self.profile.handle_key_input(key) {
                    FormCommand::Submit => {
                        let service = self.profile.focused_service();
                        self.set_toast(
                            format!("{service} key registration is not available yet."),
                            true,
                        );
                    }
                    FormCommand::Close => self.navigate(Route::Home),
                    FormCommand::None | FormCommand::Copy(_) => {}
                },
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.profile.select_tab(ProfileTab::ApiKeys)
            }
            KeyCode::Char('t') => self.cycle_theme(),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('h') | KeyCode::Esc => self.navigate(Route::Home),
            _ => {}
        }
    }

    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        if let Some(store) = &self.store {
            if let Err(err) = store.write_theme(self.theme) {
                warn!(error = %err, "failed to save theme");
                self.set_toast(format!("Failed to save theme: {err}"), true);
            }
        }
    }

    pub fn logout(&mut self) {
        self.persist_username(None);
        self.session.username = None;
        self.navigate(Route::Landing);
    }

    fn persist_username(&mut self, username: Option<&str>) {
        if let Some(store) = &self.store {
            if let Err(err) = store.write_username(username) {
                warn!(error = %err, "failed to save session");
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: String) {
        if text.is_empty() {
            self.set_toast("No extracted text to copy.", true);
            return;
        }
        match Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.set_toast("Copied document text.", false),
            Err(err) => self.set_toast(format!("Clipboard error: {err}"), true),
        }
    }

    pub fn active_toast(&mut self) -> Option<ToastView> {
        let toast = self.toast.as_ref()?;
        if toast.created_at.elapsed() > Duration::from_secs(3) {
            self.toast = None;
            return None;
        }
        Some(ToastView {
            message: toast.message.clone(),
            is_error: toast.is_error,
        })
    }

    fn set_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast {
            message: message.into(),
            created_at: Instant::now(),
            is_error,
        });
    }
}

struct Toast {
    message: String,
    created_at: Instant,
    is_error: bool,
}

pub struct ToastView {
    pub message: String,
    pub is_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, FakeBackend, server_error};
    use crate::models::{Document, Workspace};
    use std::io::Write;

    fn settings(route: Route) -> Settings {
        Settings {
            api_url: "http://localhost:8080".to_string(),
            user_id: 1,
            username: None,
            theme: ThemePreference::Terminal,
            request_timeout: Duration::from_secs(5),
            start_route: route,
        }
    }

    fn workspace(id: u64) -> Workspace {
        Workspace {
            id,
            title: format!("Workspace {id}"),
            created_at: "2026-02-01T00:00:00Z".to_string(),
            user_id: Some(1),
        }
    }

    fn document(id: u64, workspace_id: Option<u64>) -> Document {
        Document {
            id,
            title: format!("Doc {id}"),
            workspace_id,
            uploaded_at: "2026-02-03T00:00:00Z".to_string(),
            user_id: Some(1),
            file_path: None,
            extracted_text: None,
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn drain(app: &mut App) {
        while app.has_pending() {
            app.run_next_pending();
        }
    }

    fn home_app(fake: &FakeBackend) -> App {
        let mut app = App::new(&settings(Route::Home), Box::new(fake.clone()), None);
        drain(&mut app);
        app
    }

    #[test]
    fn home_mount_fetches_both_lists() {
        let fake = FakeBackend::with_data(vec![document(1, Some(1))], vec![workspace(1)]);
        let mut app = App::new(&settings(Route::Home), Box::new(fake.clone()), None);
        assert!(app.home.documents.is_loading());
        assert!(app.home.workspaces.is_loading());

        app.run_next_pending();
        assert!(!app.home.documents.is_loading());
        assert!(app.home.workspaces.is_loading());

        drain(&mut app);
        assert_eq!(fake.calls(), vec![Call::ListDocuments(1), Call::ListWorkspaces(1)]);
    }

    #[test]
    fn failed_fetch_leaves_other_list_intact() {
        let fake = FakeBackend::with_data(vec![], vec![workspace(1)]);
        fake.fail_on(Call::ListDocuments(1), server_error("boom"));
        let app = home_app(&fake);
        assert!(matches!(app.home.documents, LoadState::Failed(_)));
        assert_eq!(app.home.workspace_list().len(), 1);
    }

    #[test]
    fn declining_delete_sends_nothing() {
        let fake = FakeBackend::with_data(vec![], vec![workspace(3)]);
        let mut app = home_app(&fake);
        let before = fake.calls().len();

        press(&mut app, KeyCode::Char('d'));
        assert!(app.home.confirm.is_some());
        press(&mut app, KeyCode::Char('n'));
        drain(&mut app);

        assert!(app.home.confirm.is_none());
        assert_eq!(fake.calls().len(), before);
    }

    #[test]
    fn confirmed_delete_refreshes_workspaces_once() {
        let fake = FakeBackend::with_data(vec![document(1, Some(3))], vec![workspace(3)]);
        let mut app = home_app(&fake);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        drain(&mut app);

        assert_eq!(fake.count(|call| matches!(call, Call::DeleteWorkspace(3))), 1);
        assert_eq!(fake.count(|call| matches!(call, Call::ListWorkspaces(_))), 2);
        assert_eq!(fake.count(|call| matches!(call, Call::ListDocuments(_))), 1);
        assert!(app.home.workspace_list().is_empty());
        let orphan = app.home.document_list()[0].clone();
        assert!(app.home.placement_label(&orphan).contains("Missing"));
    }

    #[test]
    fn failed_delete_skips_refresh() {
        let fake = FakeBackend::with_data(vec![], vec![workspace(3)]);
        fake.fail_on(Call::DeleteWorkspace(3), server_error("Failed to delete workspace"));
        let mut app = home_app(&fake);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        drain(&mut app);

        assert_eq!(fake.count(|call| matches!(call, Call::ListWorkspaces(_))), 1);
        let toast = app.active_toast().unwrap();
        assert!(toast.is_error);
    }

    #[test]
    fn upload_closes_modal_and_refreshes_documents() {
        let fake = FakeBackend::new();
        let mut app = home_app(&fake);
        let mut pdf = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        pdf.write_all(b"%PDF-1.5\n%%EOF").unwrap();

        press(&mut app, KeyCode::Char('u'));
        type_text(&mut app, "Paper A");
        app.handle_paste(&format!("'{}'", pdf.path().display()));
        press(&mut app, KeyCode::Enter);
        assert!(app.home.modal.as_ref().is_some_and(Modal::is_submitting));
        drain(&mut app);

        assert!(app.home.modal.is_none());
        assert_eq!(fake.count(|call| matches!(call, Call::Upload { .. })), 1);
        assert_eq!(fake.count(|call| matches!(call, Call::ListDocuments(_))), 2);
        assert_eq!(fake.count(|call| matches!(call, Call::ListWorkspaces(_))), 2);
    }

    #[test]
    fn invalid_workspace_title_keeps_modal_open() {
        let fake = FakeBackend::new();
        let mut app = home_app(&fake);
        let before = fake.calls().len();

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "  ");
        press(&mut app, KeyCode::Enter);
        drain(&mut app);

        assert_eq!(fake.calls().len(), before);
        match &app.home.modal {
            Some(Modal::CreateWorkspace(modal)) => {
                assert_eq!(modal.status.error_message(), Some("Title is required"));
            }
            _ => panic!("create workspace modal should stay open"),
        }
    }

    #[test]
    fn failed_modal_submission_stays_open() {
        let fake = FakeBackend::new();
        fake.fail_on(Call::CreateWorkspace(1, "Thesis".to_string()), server_error("nope"));
        let mut app = home_app(&fake);

        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "Thesis");
        press(&mut app, KeyCode::Enter);
        drain(&mut app);

        assert!(matches!(app.home.modal, Some(Modal::CreateWorkspace(_))));
        assert_eq!(fake.count(|call| matches!(call, Call::ListWorkspaces(_))), 1);
    }

    #[test]
    fn add_to_workspace_preselects_highlighted_document() {
        let fake = FakeBackend::with_data(
            vec![document(1, None), document(2, None)],
            vec![workspace(7)],
        );
        let mut app = home_app(&fake);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        drain(&mut app);

        assert_eq!(fake.count(|call| matches!(call, Call::AddDocument(2, 7))), 1);
        assert!(app.home.modal.is_none());
    }

    #[test]
    fn remove_document_requires_a_workspace() {
        let fake = FakeBackend::with_data(
            vec![document(1, None), document(2, Some(7))],
            vec![workspace(7)],
        );
        let mut app = home_app(&fake);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('x'));
        drain(&mut app);
        assert_eq!(fake.count(|call| matches!(call, Call::RemoveDocument(_))), 0);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('x'));
        drain(&mut app);
        assert_eq!(fake.count(|call| matches!(call, Call::RemoveDocument(2))), 1);
        assert_eq!(fake.count(|call| matches!(call, Call::ListDocuments(_))), 2);
    }

    #[test]
    fn register_success_navigates_to_login() {
        let fake = FakeBackend::new();
        let mut app = App::new(&settings(Route::Register), Box::new(fake.clone()), None);
        type_text(&mut app, "ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "ada@example.com");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        drain(&mut app);

        assert_eq!(app.route, Route::Login);
        assert_eq!(fake.calls(), vec![Call::Register("ada".to_string())]);
    }

    #[test]
    fn login_sets_session_and_mounts_home() {
        let fake = FakeBackend::new();
        let mut app = App::new(&settings(Route::Login), Box::new(fake.clone()), None);
        type_text(&mut app, "ada");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);
        drain(&mut app);

        assert_eq!(app.route, Route::Home);
        assert_eq!(app.session.username.as_deref(), Some("ada"));
        assert_eq!(
            fake.calls(),
            vec![
                Call::Login("ada".to_string()),
                Call::ListDocuments(1),
                Call::ListWorkspaces(1),
            ]
        );
    }

    #[test]
    fn landing_checks_health_and_links_to_pages() {
        let fake = FakeBackend::new();
        let mut app = App::new(&settings(Route::Landing), Box::new(fake.clone()), None);
        drain(&mut app);
        assert_eq!(fake.calls(), vec![Call::Health]);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.route, Route::Login);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Landing);
    }

    #[test]
    fn profile_tabs_switch_locally() {
        let fake = FakeBackend::new();
        let mut app = App::new(&settings(Route::Profile), Box::new(fake.clone()), None);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.profile.tab, ProfileTab::ApiKeys);
        type_text(&mut app, "sk-test");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.profile.tab, ProfileTab::Account);
        assert!(fake.calls().is_empty());
    }

    #[test]
    fn logout_returns_to_landing() {
        let fake = FakeBackend::new();
        let mut settings = settings(Route::Home);
        settings.username = Some("ada".to_string());
        let mut app = App::new(&settings, Box::new(fake), None);
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.route, Route::Landing);
        assert_eq!(app.session.username, None);
    }

    #[test]
    fn ctrl_c_quits_from_text_input() {
        let fake = FakeBackend::new();
        let mut app = App::new(&settings(Route::Login), Box::new(fake), None);
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
