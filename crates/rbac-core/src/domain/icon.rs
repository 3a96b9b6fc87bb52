// ============================================================================
// RBAC Core - Menu Icon
// File: crates/rbac-core/src/domain/icon.rs
// Description: Closed set of icon identifiers a menu node may reference
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

/// Icon identifiers known to the dashboard front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Icon {
    LayoutDashboard,
    Truck,
    Car,
    Users,
    UserCog,
    CalendarClock,
    MapPin,
    Building2,
    ClipboardCheck,
    ShieldCheck,
    Settings,
    FileText,
    Bell,
    BarChart3,
    Wrench,
    Fuel,
    #[default]
    Circle,
}

impl Icon {
    /// Picker order.
    pub const ALL: [Icon; 17] = [
        Icon::LayoutDashboard,
        Icon::Truck,
        Icon::Car,
        Icon::Users,
        Icon::UserCog,
        Icon::CalendarClock,
        Icon::MapPin,
        Icon::Building2,
        Icon::ClipboardCheck,
        Icon::ShieldCheck,
        Icon::Settings,
        Icon::FileText,
        Icon::Bell,
        Icon::BarChart3,
        Icon::Wrench,
        Icon::Fuel,
        Icon::Circle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::LayoutDashboard => "LayoutDashboard",
            Icon::Truck => "Truck",
            Icon::Car => "Car",
            Icon::Users => "Users",
            Icon::UserCog => "UserCog",
            Icon::CalendarClock => "CalendarClock",
            Icon::MapPin => "MapPin",
            Icon::Building2 => "Building2",
            Icon::ClipboardCheck => "ClipboardCheck",
            Icon::ShieldCheck => "ShieldCheck",
            Icon::Settings => "Settings",
            Icon::FileText => "FileText",
            Icon::Bell => "Bell",
            Icon::BarChart3 => "BarChart3",
            Icon::Wrench => "Wrench",
            Icon::Fuel => "Fuel",
            Icon::Circle => "Circle",
        }
    }

    pub fn from_key(key: &str) -> Option<Icon> {
        Icon::ALL.iter().copied().find(|icon| icon.as_str() == key)
    }

    /// Resolve `key`, falling back to the default icon.
    /// The flag is `true` when the fallback was used.
    pub fn coerce(key: &str) -> (Icon, bool) {
        match Icon::from_key(key) {
            Some(icon) => (icon, false),
            None => (Icon::default(), true),
        }
    }

    fn position(&self) -> usize {
        Icon::ALL.iter().position(|icon| icon == self).unwrap_or(0)
    }

    pub fn next(&self) -> Icon {
        Icon::ALL[(self.position() + 1) % Icon::ALL.len()]
    }

    pub fn prev(&self) -> Icon {
        let len = Icon::ALL.len();
        Icon::ALL[(self.position() + len - 1) % len]
    }

    /// Single-glyph stand-in used by the terminal editor.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::LayoutDashboard => "▦",
            Icon::Truck | Icon::Car => "⛟",
            Icon::Users | Icon::UserCog => "☺",
            Icon::CalendarClock => "◷",
            Icon::MapPin => "⌖",
            Icon::Building2 => "▥",
            Icon::ClipboardCheck => "☑",
            Icon::ShieldCheck => "⛨",
            Icon::Settings | Icon::Wrench => "⚙",
            Icon::FileText => "☰",
            Icon::Bell => "♪",
            Icon::BarChart3 => "▤",
            Icon::Fuel => "⛽",
            Icon::Circle => "○",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_key_is_exact() {
        assert_eq!(Icon::from_key("Truck"), Some(Icon::Truck));
        assert_eq!(Icon::from_key("truck"), None);
    }

    #[test]
    fn test_coerce_unknown_to_default() {
        assert_eq!(Icon::coerce("NotARealIcon"), (Icon::Circle, true));
        assert_eq!(Icon::coerce("MapPin"), (Icon::MapPin, false));
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(Icon::Circle.next(), Icon::LayoutDashboard);
        assert_eq!(Icon::LayoutDashboard.prev(), Icon::Circle);
        assert_eq!(Icon::Truck.next().prev(), Icon::Truck);
    }
}
