// ============================================================================
// RBAC Core - Edit Session
// File: crates/rbac-core/src/services/edit_session.rs
// ============================================================================
//! In-memory editing state for one role's menu.
//!
//! The session owns the current forest and swaps it for the result of each
//! operation. A failed operation leaves the session exactly as it was. Nothing
//! is sent anywhere until [`RoleService::save`](super::RoleService::save).

use rbac_shared::config::EditorSettings;

use crate::domain::{MenuForest, MenuForestDto, MenuPatch, NodeId, PermissionMatrix, Role, RoleUpsert};
use crate::error::DomainError;
use crate::operations::{
    filter_selected, insert_child, move_node, remove_node, step_node, toggle_selection,
    update_field, Direction, EditRules, EditWarning, FilterDepth,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionOptions {
    pub rules: EditRules,
    pub filter: FilterDepth,
}

impl SessionOptions {
    pub fn from_settings(settings: &EditorSettings) -> Result<Self, DomainError> {
        Ok(Self {
            rules: EditRules {
                path_scope: settings.path_scope.parse()?,
                tooltip_follows_name: settings.tooltip_follows_name,
            },
            filter: FilterDepth::from_setting(settings.filter_depth),
        })
    }
}

#[derive(Debug, Clone)]
struct Snapshot {
    name: String,
    permissions: PermissionMatrix,
    forest: MenuForest,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    role_id: Option<String>,
    role_name: String,
    permissions: PermissionMatrix,
    forest: MenuForest,
    seed: Snapshot,
    /// At most one node is in inline-edit mode.
    editing: Option<NodeId>,
    dragging: Option<NodeId>,
    options: SessionOptions,
    dirty: bool,
}

impl EditSession {
    /// Session for a role that does not exist yet, seeded from a copy of `template`.
    pub fn new_role(template: &MenuForest, options: SessionOptions) -> Self {
        Self::seeded(None, String::new(), PermissionMatrix::for_new_role(), template.clone(), options)
    }

    pub fn from_role(role: &Role, options: SessionOptions) -> Self {
        Self::seeded(
            Some(role.id.clone()),
            role.name.clone(),
            role.permissions.clone(),
            role.menu_forest(),
            options,
        )
    }

    fn seeded(
        role_id: Option<String>,
        role_name: String,
        permissions: PermissionMatrix,
        forest: MenuForest,
        options: SessionOptions,
    ) -> Self {
        Self {
            role_id,
            seed: Snapshot {
                name: role_name.clone(),
                permissions: permissions.clone(),
                forest: forest.clone(),
            },
            role_name,
            permissions,
            forest,
            editing: None,
            dragging: None,
            options,
            dirty: false,
        }
    }

    pub fn role_id(&self) -> Option<&str> {
        self.role_id.as_deref()
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn permissions(&self) -> &PermissionMatrix {
        &self.permissions
    }

    pub fn permissions_mut(&mut self) -> &mut PermissionMatrix {
        self.dirty = true;
        &mut self.permissions
    }

    pub fn forest(&self) -> &MenuForest {
        &self.forest
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn is_new(&self) -> bool {
        self.role_id.is_none()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn rename_role(&mut self, name: impl Into<String>) {
        self.role_name = name.into();
        self.dirty = true;
    }

    fn commit(&mut self, forest: MenuForest) {
        self.forest = forest;
        self.dirty = true;
    }

    // ------------------------------------------------------------------
    // Tree operations
    // ------------------------------------------------------------------

    pub fn toggle(&mut self, id: NodeId) -> Result<(), DomainError> {
        let next = toggle_selection(&self.forest, id)?;
        self.commit(next);
        Ok(())
    }

    pub fn insert(&mut self, parent: Option<NodeId>) -> Result<NodeId, DomainError> {
        let (next, id) = insert_child(&self.forest, parent)?;
        self.commit(next);
        Ok(id)
    }

    pub fn update(&mut self, id: NodeId, patch: &MenuPatch) -> Result<Vec<EditWarning>, DomainError> {
        let update = update_field(&self.forest, id, patch, &self.options.rules)?;
        self.commit(update.forest);
        Ok(update.warnings)
    }

    /// Remove `id` and its subtree. Callers confirm with the user first.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomainError> {
        let next = remove_node(&self.forest, id)?;
        self.commit(next);
        if self.editing.is_some_and(|n| !self.forest.contains(n)) {
            self.editing = None;
        }
        if self.dragging.is_some_and(|n| !self.forest.contains(n)) {
            self.dragging = None;
        }
        Ok(())
    }

    pub fn move_within(
        &mut self,
        parent: Option<NodeId>,
        drag_index: usize,
        hover_index: usize,
    ) -> Result<(), DomainError> {
        let next = move_node(&self.forest, parent, drag_index, hover_index)?;
        if next.children_of(parent) != self.forest.children_of(parent) {
            self.commit(next);
        }
        Ok(())
    }

    pub fn step(&mut self, id: NodeId, direction: Direction) -> Result<(), DomainError> {
        let before = self.forest.position(id);
        let next = step_node(&self.forest, id, direction)?;
        if next.position(id) != before {
            self.commit(next);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Per-node UI flags
    // ------------------------------------------------------------------

    pub fn begin_edit(&mut self, id: NodeId) -> Result<(), DomainError> {
        if !self.forest.contains(id) {
            return Err(DomainError::NodeNotFound(id));
        }
        self.editing = Some(id);
        Ok(())
    }

    pub fn end_edit(&mut self) {
        self.editing = None;
    }

    pub fn editing(&self) -> Option<NodeId> {
        self.editing
    }

    pub fn is_editing(&self, id: NodeId) -> bool {
        self.editing == Some(id)
    }

    pub fn begin_drag(&mut self, id: NodeId) -> Result<(), DomainError> {
        if !self.forest.contains(id) {
            return Err(DomainError::NodeNotFound(id));
        }
        self.dragging = Some(id);
        Ok(())
    }

    pub fn end_drag(&mut self) {
        self.dragging = None;
    }

    pub fn dragging(&self) -> Option<NodeId> {
        self.dragging
    }

    pub fn is_dragging(&self, id: NodeId) -> bool {
        self.dragging == Some(id)
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Drop every edit since the session was seeded or last saved.
    pub fn cancel(&mut self) {
        self.role_name = self.seed.name.clone();
        self.permissions = self.seed.permissions.clone();
        self.forest = self.seed.forest.clone();
        self.editing = None;
        self.dragging = None;
        self.dirty = false;
    }

    /// Payload for the role API: the selection-filtered forest plus name and permissions.
    pub fn build_upsert(&self) -> Result<RoleUpsert, DomainError> {
        let menu = MenuForestDto::from_nodes(&filter_selected(&self.forest, self.options.filter));
        RoleUpsert::new(self.role_id.clone(), &self.role_name, self.permissions.clone(), menu)
    }

    /// Reseed from the role the server stored.
    pub fn mark_saved(&mut self, role: &Role) {
        *self = Self::from_role(role, self.options);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{default_template, Icon, MenuNode};
    use crate::validation::PathScope;

    fn session() -> EditSession {
        let mut session = EditSession::new_role(&default_template(), SessionOptions::default());
        session.rename_role("Depot Supervisor");
        session
    }

    #[test]
    fn test_template_is_copied_not_shared() {
        let template = default_template();
        let mut session = EditSession::new_role(&template, SessionOptions::default());
        let first = session.forest().roots()[0];
        session.remove(first).unwrap();

        assert_eq!(template.roots()[0], first);
        assert_eq!(template, default_template());
    }

    #[test]
    fn test_failed_update_keeps_state() {
        let mut session = session();
        let id = session.forest().roots()[0];
        let before = session.forest().clone();

        let err = session.update(id, &MenuPatch::path("no-slash")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPath(_)));
        assert_eq!(session.forest(), &before);
    }

    #[test]
    fn test_update_reports_icon_warning() {
        let mut session = session();
        let id = session.forest().roots()[0];
        let warnings = session.update(id, &MenuPatch::icon("Sparkles")).unwrap();

        assert_eq!(warnings.len(), 1);
        assert_eq!(session.forest().get(id).unwrap().icon, Icon::Circle);
    }

    #[test]
    fn test_cancel_restores_seed() {
        let mut session = session();
        let seeded = session.forest().clone();
        let id = session.insert(None).unwrap();
        session.begin_edit(id).unwrap();
        session.rename_role("Other");
        assert!(session.is_dirty());

        session.cancel();
        assert_eq!(session.forest(), &seeded);
        assert_eq!(session.role_name(), "");
        assert!(session.editing().is_none());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_remove_clears_flags_inside_subtree() {
        let mut session = session();
        let fleet = session.forest().find_by_path("/dashboard/fleet").unwrap();
        let vehicles = session.forest().find_by_path("/dashboard/fleet/vehicles").unwrap();
        session.begin_edit(vehicles).unwrap();
        session.begin_drag(vehicles).unwrap();

        session.remove(fleet).unwrap();
        assert!(session.editing().is_none());
        assert!(session.dragging().is_none());
    }

    #[test]
    fn test_step_noop_at_edge_stays_clean() {
        let template = default_template();
        let mut session = EditSession::new_role(&template, SessionOptions::default());
        let first = session.forest().roots()[0];
        session.step(first, Direction::Up).unwrap();
        assert!(!session.is_dirty());

        session.step(first, Direction::Down).unwrap();
        assert!(session.is_dirty());
        assert_eq!(session.forest().position(first), Some((None, 1)));
    }

    #[test]
    fn test_build_upsert_filters_selection() {
        let mut session = session();
        let drivers = session.forest().find_by_path("/dashboard/drivers").unwrap();
        session.toggle(drivers).unwrap();

        let upsert = session.build_upsert().unwrap();
        assert!(upsert.is_new());
        assert_eq!(upsert.name, "Depot Supervisor");
        assert!(upsert.menu.items.iter().all(|item| item.nav != "/dashboard/drivers"));
        assert_eq!(upsert.menu.items.len(), session.forest().roots().len() - 1);
    }

    #[test]
    fn test_build_upsert_requires_name() {
        let session = EditSession::new_role(&default_template(), SessionOptions::default());
        assert!(matches!(session.build_upsert(), Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_options_from_settings() {
        let settings = EditorSettings {
            filter_depth: 0,
            path_scope: "siblings".into(),
            tooltip_follows_name: false,
            page_size: 20,
        };
        let options = SessionOptions::from_settings(&settings).unwrap();
        assert_eq!(options.filter, FilterDepth::Unbounded);
        assert_eq!(options.rules.path_scope, PathScope::Siblings);
        assert!(!options.rules.tooltip_follows_name);

        let bad = EditorSettings { path_scope: "everywhere".into(), ..settings };
        assert!(SessionOptions::from_settings(&bad).is_err());
    }

    #[test]
    fn test_mark_saved_reseeds_from_server_copy() {
        let mut session = session();
        let role = Role {
            id: "role-7".into(),
            name: "Depot Supervisor".into(),
            permissions: PermissionMatrix::for_new_role(),
            menu: MenuForestDto::from_nodes(&[MenuNode::new("/dashboard", Icon::LayoutDashboard, "Dashboard")]),
            created_at: None,
            updated_at: None,
        };

        session.mark_saved(&role);
        assert_eq!(session.role_id(), Some("role-7"));
        assert_eq!(session.forest().len(), 1);
        assert!(!session.is_dirty());

        session.cancel();
        assert_eq!(session.forest().len(), 1);
    }
}
