//! Menu path rules

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::{MenuForest, NodeId};
use crate::error::DomainError;

static NAV_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^/[a-zA-Z0-9\-_/]*$").expect("nav path pattern compiles"));

pub fn is_valid_path(path: &str) -> bool {
    NAV_PATH.is_match(path)
}

/// Which nodes a new path must not collide with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathScope {
    /// Every other node in the forest.
    #[default]
    Forest,
    /// Only the edited node's siblings.
    Siblings,
}

impl PathScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathScope::Forest => "forest",
            PathScope::Siblings => "siblings",
        }
    }
}

impl FromStr for PathScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forest" | "global" => Ok(PathScope::Forest),
            "siblings" | "sibling" => Ok(PathScope::Siblings),
            other => Err(DomainError::ValidationError(format!("unknown path scope '{other}'"))),
        }
    }
}

/// Check `path` as the new path of `id`.
pub fn check_path(forest: &MenuForest, id: NodeId, path: &str, scope: PathScope) -> Result<(), DomainError> {
    if !is_valid_path(path) {
        return Err(DomainError::InvalidPath(path.to_string()));
    }

    let taken = match scope {
        PathScope::Forest => forest.entries().any(|e| e.id != id && e.path == path),
        PathScope::Siblings => {
            let parent = forest.get(id).ok_or(DomainError::NodeNotFound(id))?.parent;
            forest
                .children_of(parent)
                .unwrap_or_default()
                .iter()
                .filter(|sibling| **sibling != id)
                .any(|sibling| forest.get(*sibling).is_some_and(|e| e.path == path))
        }
    };

    if taken {
        return Err(DomainError::DuplicatePath(path.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Icon, MenuNode};

    #[test]
    fn test_path_pattern() {
        assert!(is_valid_path("/"));
        assert!(is_valid_path("/dashboard/fleet_2/walk-arounds"));
        assert!(!is_valid_path("dashboard"));
        assert!(!is_valid_path("bad path!"));
        assert!(!is_valid_path("/with space"));
        assert!(!is_valid_path(""));
    }

    #[test]
    fn test_scope_parsing() {
        assert_eq!("Forest".parse::<PathScope>().unwrap(), PathScope::Forest);
        assert_eq!("siblings".parse::<PathScope>().unwrap(), PathScope::Siblings);
        assert!("tree".parse::<PathScope>().is_err());
    }

    #[test]
    fn test_sibling_scope_ignores_cousins() {
        let forest = MenuForest::from_nodes(vec![
            MenuNode::new("/a", Icon::Circle, "A")
                .with_children(vec![MenuNode::new("/a/x", Icon::Circle, "X")]),
            MenuNode::new("/b", Icon::Circle, "B")
                .with_children(vec![MenuNode::new("/b/y", Icon::Circle, "Y")]),
        ]);
        let y = forest.find_by_path("/b/y").unwrap();

        assert!(check_path(&forest, y, "/a/x", PathScope::Siblings).is_ok());
        assert_eq!(
            check_path(&forest, y, "/a/x", PathScope::Forest),
            Err(DomainError::DuplicatePath("/a/x".into()))
        );
        assert!(check_path(&forest, y, "/b/y", PathScope::Forest).is_ok());
    }
}
