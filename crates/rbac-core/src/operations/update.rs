//! Field edits with path and icon validation

use std::fmt;

use tracing::{debug, warn};

use crate::domain::{Icon, MenuForest, MenuPatch, NodeId};
use crate::error::DomainError;
use crate::validation::{check_path, PathScope};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditRules {
    pub path_scope: PathScope,
    /// A name edit without an explicit tooltip also sets the tooltip.
    pub tooltip_follows_name: bool,
}

impl Default for EditRules {
    fn default() -> Self {
        Self {
            path_scope: PathScope::Forest,
            tooltip_follows_name: true,
        }
    }
}

/// Non-fatal problems found while applying a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditWarning {
    UnknownIcon(String),
}

impl fmt::Display for EditWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditWarning::UnknownIcon(key) => {
                write!(f, "Unknown icon '{}', using {}", key, Icon::default())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldUpdate {
    pub forest: MenuForest,
    pub warnings: Vec<EditWarning>,
}

/// Shallow-merge `patch` onto node `id`. Children are never touched.
///
/// A bad or duplicate path rejects the whole patch; an unknown icon is
/// replaced by the default and reported as a warning.
pub fn update_field(
    forest: &MenuForest,
    id: NodeId,
    patch: &MenuPatch,
    rules: &EditRules,
) -> Result<FieldUpdate, DomainError> {
    if !forest.contains(id) {
        return Err(DomainError::NodeNotFound(id));
    }
    if patch.is_empty() {
        return Ok(FieldUpdate { forest: forest.clone(), warnings: Vec::new() });
    }
    if let Some(path) = &patch.path {
        check_path(forest, id, path, rules.path_scope).inspect_err(|e| {
            warn!(node = %id, "rejected menu path: {}", e);
        })?;
    }

    let mut warnings = Vec::new();
    let icon = patch.icon.as_deref().map(|key| {
        let (icon, coerced) = Icon::coerce(key);
        if coerced {
            warn!(node = %id, "unknown icon '{}', using {}", key, icon);
            warnings.push(EditWarning::UnknownIcon(key.to_string()));
        }
        icon
    });

    let mut next = forest.clone();
    let entry = next.entry_mut(id).ok_or(DomainError::NodeNotFound(id))?;
    if let Some(path) = &patch.path {
        entry.path = path.clone();
    }
    if let Some(icon) = icon {
        entry.icon = icon;
    }
    if let Some(name) = &patch.name {
        entry.name = name.clone();
    }
    match (&patch.tooltip, &patch.name) {
        (Some(tooltip), _) => entry.tooltip = tooltip.clone(),
        (None, Some(name)) if rules.tooltip_follows_name => entry.tooltip = name.clone(),
        _ => {}
    }

    debug!(node = %id, "updated menu fields");
    Ok(FieldUpdate { forest: next, warnings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::fixtures::{fleet_forest, id_of};

    #[test]
    fn test_valid_path_is_applied() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/dashboard");
        let update = update_field(&forest, id, &MenuPatch::path("/valid-path"), &EditRules::default()).unwrap();

        assert_eq!(update.forest.get(id).unwrap().path, "/valid-path");
        assert!(update.warnings.is_empty());
        assert_eq!(forest.get(id).unwrap().path, "/dashboard");
    }

    #[test]
    fn test_bad_path_is_rejected() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/dashboard");
        let err = update_field(&forest, id, &MenuPatch::path("bad path!"), &EditRules::default()).unwrap_err();

        assert_eq!(err, DomainError::InvalidPath("bad path!".into()));
        assert_eq!(forest.get(id).unwrap().path, "/dashboard");
    }

    #[test]
    fn test_duplicate_path_rejects_whole_patch() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/dashboard");
        let patch = MenuPatch {
            path: Some("/fleet/walkarounds".into()),
            name: Some("Home".into()),
            ..MenuPatch::default()
        };
        let err = update_field(&forest, id, &patch, &EditRules::default()).unwrap_err();
        assert_eq!(err, DomainError::DuplicatePath("/fleet/walkarounds".into()));
    }

    #[test]
    fn test_sibling_scope_allows_cousin_path() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/dashboard");
        let rules = EditRules { path_scope: PathScope::Siblings, ..EditRules::default() };

        assert!(update_field(&forest, id, &MenuPatch::path("/fleet/walkarounds"), &rules).is_ok());
        assert!(update_field(&forest, id, &MenuPatch::path("/fleet"), &rules).is_err());
    }

    #[test]
    fn test_unknown_icon_falls_back_with_warning() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/fleet");
        let update = update_field(&forest, id, &MenuPatch::icon("NotARealIcon"), &EditRules::default()).unwrap();

        assert_eq!(update.forest.get(id).unwrap().icon, Icon::Circle);
        assert_eq!(update.warnings, vec![EditWarning::UnknownIcon("NotARealIcon".into())]);
    }

    #[test]
    fn test_name_drives_tooltip_when_enabled() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/fleet");

        let synced = update_field(&forest, id, &MenuPatch::name("Armada"), &EditRules::default()).unwrap();
        assert_eq!(synced.forest.get(id).unwrap().tooltip, "Armada");

        let relaxed = EditRules { tooltip_follows_name: false, ..EditRules::default() };
        let kept = update_field(&forest, id, &MenuPatch::name("Armada"), &relaxed).unwrap();
        assert_eq!(kept.forest.get(id).unwrap().tooltip, "Fleet");
    }

    #[test]
    fn test_children_untouched() {
        let forest = fleet_forest();
        let id = id_of(&forest, "/fleet");
        let update = update_field(&forest, id, &MenuPatch::name("Armada"), &EditRules::default()).unwrap();

        assert_eq!(update.forest.get(id).unwrap().children, forest.get(id).unwrap().children);
        assert!(update.forest.shares_entry(&forest, id_of(&forest, "/fleet/vehicles")));
    }
}
