use std::sync::Arc;

use rbac_core::operations::Direction;
use rbac_core::repositories::RoleRepository;
use rbac_core::services::{EditSession, RoleService, SessionOptions};
use rbac_core::{DomainError, FlatRow, Icon, MenuPatch, NodeId, Role};
use rbac_shared::{Page, Pagination};
use tracing::{debug, info};

/// Screen states for the TUI state machine
#[derive(Clone, Debug, PartialEq)]
pub enum Screen {
    RoleList,
    Search,                                        // Typing a role filter
    ConfirmDeleteRole { id: String, name: String },
    Editor,
    EditNode,                                      // Inline node form is open
    RenameRole,
    ConfirmDeleteNode(NodeId),
    Message(String, bool),                         // Message, is_error
}

/// Fields of the inline node form, in Tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Name,
    Path,
    Icon,
}

impl EditField {
    pub fn label(&self) -> &'static str {
        match self {
            EditField::Name => "Name",
            EditField::Path => "Path",
            EditField::Icon => "Icon",
        }
    }

    pub fn next(&self) -> EditField {
        match self {
            EditField::Name => EditField::Path,
            EditField::Path => EditField::Icon,
            EditField::Icon => EditField::Name,
        }
    }

    pub fn prev(&self) -> EditField {
        match self {
            EditField::Name => EditField::Icon,
            EditField::Path => EditField::Name,
            EditField::Icon => EditField::Path,
        }
    }
}

/// Uncommitted values of the node being edited
#[derive(Clone, Debug, PartialEq)]
pub struct NodeForm {
    pub id: NodeId,
    pub field: EditField,
    pub name: String,
    pub path: String,
    pub icon: Icon,
}

impl NodeForm {
    /// Text buffer behind the focused field; the icon is picked, not typed.
    pub fn input_mut(&mut self) -> Option<&mut String> {
        match self.field {
            EditField::Name => Some(&mut self.name),
            EditField::Path => Some(&mut self.path),
            EditField::Icon => None,
        }
    }
}

/// Application state
pub struct App<R: RoleRepository> {
    pub screen: Screen,
    pub should_quit: bool,
    service: RoleService<R>,

    // Role list state
    pub page: Option<Page<Role>>,
    pub role_index: usize,
    pub pagination: Pagination,
    pub query: String,
    pub query_input: String,
    pub is_loading: bool,
    pub last_error: Option<String>,

    // Editor state
    pub session: Option<EditSession>,
    pub cursor: usize,
    pub form: Option<NodeForm>,
    pub rename_input: String,
    pub status: Option<String>,

    after_message: Screen,
}

impl<R: RoleRepository> App<R> {
    pub fn new(repo: Arc<R>, options: SessionOptions, page_size: u32) -> Self {
        Self {
            screen: Screen::RoleList,
            should_quit: false,
            service: RoleService::new(repo, options),
            page: None,
            role_index: 0,
            pagination: Pagination::new(1, page_size),
            query: String::new(),
            query_input: String::new(),
            is_loading: false,
            last_error: None,
            session: None,
            cursor: 0,
            form: None,
            rename_input: String::new(),
            status: None,
            after_message: Screen::RoleList,
        }
    }

    pub fn visible_roles(&self) -> &[Role] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or_default()
    }

    pub fn selected_role(&self) -> Option<&Role> {
        self.visible_roles().get(self.role_index)
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    pub fn show_message(&mut self, msg: impl Into<String>, is_error: bool) {
        self.after_message = match &self.screen {
            Screen::RoleList | Screen::Search | Screen::ConfirmDeleteRole { .. } => Screen::RoleList,
            Screen::Editor | Screen::RenameRole | Screen::ConfirmDeleteNode(_) => Screen::Editor,
            Screen::EditNode => Screen::EditNode,
            Screen::Message(_, _) => self.after_message.clone(),
        };
        self.screen = Screen::Message(msg.into(), is_error);
    }

    pub fn dismiss_message(&mut self) {
        self.screen = self.after_message.clone();
    }

    /// Run a session operation; a failure is shown and leaves the session as it was.
    fn with_session<T>(
        &mut self,
        op: impl FnOnce(&mut EditSession) -> Result<T, DomainError>,
    ) -> Option<T> {
        let session = self.session.as_mut()?;
        match op(session) {
            Ok(value) => Some(value),
            Err(e) => {
                self.show_message(e.to_string(), true);
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Role list
    // ------------------------------------------------------------------

    pub fn role_up(&mut self) {
        if self.role_index > 0 {
            self.role_index -= 1;
        }
    }

    pub fn role_down(&mut self) {
        if self.role_index < self.visible_roles().len().saturating_sub(1) {
            self.role_index += 1;
        }
    }

    pub async fn load_roles(&mut self) {
        self.is_loading = true;
        self.last_error = None;

        match self.service.list_roles(&self.query, self.pagination).await {
            Ok(page) => {
                self.pagination.page = page.page;
                self.role_index = self.role_index.min(page.items.len().saturating_sub(1));
                self.page = Some(page);
            }
            Err(e) => {
                self.last_error = Some(format!("Failed to load roles: {}", e));
            }
        }
        self.is_loading = false;
    }

    pub async fn next_page(&mut self) {
        if self.page.as_ref().is_some_and(|p| p.has_next()) {
            self.pagination = self.pagination.next();
            self.role_index = 0;
            self.load_roles().await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.page.as_ref().is_some_and(|p| p.has_prev()) {
            self.pagination = self.pagination.prev();
            self.role_index = 0;
            self.load_roles().await;
        }
    }

    pub fn begin_search(&mut self) {
        self.query_input = self.query.clone();
        self.screen = Screen::Search;
    }

    pub async fn apply_search(&mut self) {
        self.query = self.query_input.trim().to_string();
        self.pagination.page = 1;
        self.role_index = 0;
        self.screen = Screen::RoleList;
        self.load_roles().await;
    }

    pub fn request_delete_role(&mut self) {
        if let Some(role) = self.selected_role() {
            self.screen = Screen::ConfirmDeleteRole {
                id: role.id.clone(),
                name: role.name.clone(),
            };
        }
    }

    pub async fn delete_role(&mut self, id: &str, name: &str) {
        match self.service.delete_role(id).await {
            Ok(()) => {
                self.load_roles().await;
                self.show_message(format!("Deleted role: {}", name), false);
            }
            Err(e) => self.show_message(e.to_string(), true),
        }
    }

    pub async fn open_selected(&mut self) {
        let Some(id) = self.selected_role().map(|r| r.id.clone()) else {
            return;
        };
        match self.service.open_role(&id).await {
            Ok(session) => self.enter_editor(session),
            Err(e) => self.show_message(e.to_string(), true),
        }
    }

    pub fn new_role(&mut self) {
        let session = self.service.new_role();
        self.enter_editor(session);
        self.begin_rename();
    }

    fn enter_editor(&mut self, session: EditSession) {
        info!(role = session.role_id().unwrap_or("<new>"), "Editing role");
        self.session = Some(session);
        self.cursor = 0;
        self.form = None;
        self.status = None;
        self.screen = Screen::Editor;
    }

    // ------------------------------------------------------------------
    // Editor navigation
    // ------------------------------------------------------------------

    pub fn rows(&self) -> Vec<FlatRow> {
        self.session
            .as_ref()
            .map(|s| s.forest().flatten())
            .unwrap_or_default()
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.rows().get(self.cursor).map(|row| row.id)
    }

    fn focus(&mut self, id: NodeId) {
        if let Some(index) = self.rows().iter().position(|row| row.id == id) {
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.rows().len().saturating_sub(1));
    }

    pub fn cursor_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn cursor_down(&mut self) {
        if self.cursor < self.rows().len().saturating_sub(1) {
            self.cursor += 1;
        }
    }

    // ------------------------------------------------------------------
    // Editor actions
    // ------------------------------------------------------------------

    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_node() {
            self.with_session(|s| s.toggle(id));
        }
    }

    /// Insert under the cursor node, or at root level with `at_root`.
    pub fn insert_node(&mut self, at_root: bool) {
        let parent = if at_root { None } else { self.current_node() };
        if !at_root && parent.is_none() && !self.rows().is_empty() {
            return;
        }
        if let Some(id) = self.with_session(|s| s.insert(parent)) {
            self.focus(id);
            self.status = Some("Added \"New Menu\"; press e to edit it".into());
        }
    }

    pub fn grab_current(&mut self) {
        if let Some(id) = self.current_node() {
            self.with_session(|s| s.begin_drag(id));
        }
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.session.as_ref().and_then(|s| s.dragging())
    }

    pub fn step_grabbed(&mut self, direction: Direction) {
        let Some(id) = self.dragging() else {
            return;
        };
        if self.with_session(|s| s.step(id, direction)).is_some() {
            self.focus(id);
        }
    }

    pub fn drop_grabbed(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.end_drag();
        }
    }

    pub fn begin_edit(&mut self) {
        let Some(id) = self.current_node() else {
            return;
        };
        let Some(entry) = self.session.as_ref().and_then(|s| s.forest().get(id)) else {
            return;
        };
        let form = NodeForm {
            id,
            field: EditField::Name,
            name: entry.name.clone(),
            path: entry.path.clone(),
            icon: entry.icon,
        };
        if self.with_session(|s| s.begin_edit(id)).is_some() {
            self.form = Some(form);
            self.screen = Screen::EditNode;
        }
    }

    /// Apply the form through the session. On a validation error the form
    /// stays open and the node keeps its old values.
    pub fn commit_edit(&mut self) {
        let Some(form) = self.form.clone() else {
            return;
        };
        let Some(entry) = self.session.as_ref().and_then(|s| s.forest().get(form.id)) else {
            self.blur_edit();
            return;
        };

        let patch = MenuPatch {
            name: (form.name != entry.name).then(|| form.name.clone()),
            path: (form.path != entry.path).then(|| form.path.clone()),
            icon: (form.icon != entry.icon).then(|| form.icon.as_str().to_string()),
            tooltip: None,
        };
        if patch.is_empty() {
            self.blur_edit();
            return;
        }

        if let Some(warnings) = self.with_session(|s| s.update(form.id, &patch)) {
            self.status = (!warnings.is_empty()).then(|| {
                warnings.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
            });
            self.blur_edit();
        }
    }

    /// Close the form without committing. Keys go through `commit_edit`,
    /// which ends here once the form is applied or unchanged.
    pub fn blur_edit(&mut self) {
        self.form = None;
        if let Some(session) = self.session.as_mut() {
            session.end_edit();
        }
        self.screen = Screen::Editor;
    }

    pub fn request_remove(&mut self) {
        if let Some(id) = self.current_node() {
            self.screen = Screen::ConfirmDeleteNode(id);
        }
    }

    pub fn remove_node(&mut self, id: NodeId) {
        self.screen = Screen::Editor;
        if self.with_session(|s| s.remove(id)).is_some() {
            self.clamp_cursor();
        }
    }

    pub fn begin_rename(&mut self) {
        self.rename_input = self
            .session
            .as_ref()
            .map(|s| s.role_name().to_string())
            .unwrap_or_default();
        self.screen = Screen::RenameRole;
    }

    pub fn commit_rename(&mut self) {
        let name = self.rename_input.trim().to_string();
        if let Some(session) = self.session.as_mut() {
            session.rename_role(name);
        }
        self.screen = Screen::Editor;
    }

    pub fn cancel_edits(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.cancel();
        }
        self.form = None;
        self.status = Some("Changes discarded".into());
        self.clamp_cursor();
    }

    pub async fn save(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match self.service.save(session).await {
            Ok(role) => {
                self.clamp_cursor();
                self.status = None;
                self.show_message(format!("Saved role: {}", role.name), false);
            }
            Err(e) => self.show_message(e.to_string(), true),
        }
    }

    pub async fn leave_editor(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(dirty = session.is_dirty(), "Leaving editor");
        }
        self.form = None;
        self.status = None;
        self.screen = Screen::RoleList;
        self.load_roles().await;
    }
}
