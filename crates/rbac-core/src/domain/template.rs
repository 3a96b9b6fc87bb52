//! Default menu for a newly created role.
//!
//! The template is a constant; [`default_template`] builds a fresh forest
//! from it each time, so a session can never leak edits back into it.

use crate::domain::{Icon, MenuForest, MenuNode};

#[derive(Debug)]
pub struct TemplateItem {
    pub nav: &'static str,
    pub icon: Icon,
    pub name: &'static str,
    pub children: &'static [TemplateItem],
}

const fn leaf(nav: &'static str, icon: Icon, name: &'static str) -> TemplateItem {
    TemplateItem { nav, icon, name, children: &[] }
}

pub const DEFAULT_MENU: &[TemplateItem] = &[
    leaf("/dashboard", Icon::LayoutDashboard, "Dashboard"),
    TemplateItem {
        nav: "/dashboard/fleet",
        icon: Icon::Truck,
        name: "Fleet",
        children: &[
            leaf("/dashboard/fleet/vehicles", Icon::Car, "Vehicles"),
            leaf("/dashboard/fleet/walkarounds", Icon::ClipboardCheck, "Walkarounds"),
        ],
    },
    leaf("/dashboard/drivers", Icon::Users, "Drivers"),
    TemplateItem {
        nav: "/dashboard/staff",
        icon: Icon::UserCog,
        name: "Staff",
        children: &[
            leaf("/dashboard/staff/shifts", Icon::CalendarClock, "Shifts"),
            leaf("/dashboard/staff/timesheets", Icon::FileText, "Timesheets"),
        ],
    },
    leaf("/dashboard/sites", Icon::MapPin, "Sites"),
    leaf("/dashboard/reports", Icon::BarChart3, "Reports"),
    TemplateItem {
        nav: "/dashboard/access",
        icon: Icon::ShieldCheck,
        name: "Access Control",
        children: &[
            leaf("/dashboard/rbac", Icon::ShieldCheck, "Roles"),
            leaf("/dashboard/users", Icon::Users, "Users"),
        ],
    },
    leaf("/dashboard/settings", Icon::Settings, "Settings"),
];

impl TemplateItem {
    pub fn to_node(&self) -> MenuNode {
        MenuNode::new(self.nav, self.icon, self.name)
            .with_children(self.children.iter().map(TemplateItem::to_node).collect())
    }
}

/// A fresh, fully selected copy of [`DEFAULT_MENU`].
pub fn default_template() -> MenuForest {
    MenuForest::from_nodes(DEFAULT_MENU.iter().map(TemplateItem::to_node).collect())
}
