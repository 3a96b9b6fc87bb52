use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use rbac_core::repositories::RoleRepository;
use rbac_core::{MenuEntry, NodeId};
use rbac_shared::utils::truncate;

use crate::app::{App, EditField, NodeForm, Screen};
use crate::theme::Theme;

pub fn render<R: RoleRepository>(frame: &mut Frame, app: &App<R>) {
    let theme = Theme::default();

    match &app.screen {
        Screen::RoleList => render_role_list(frame, app, &theme),
        Screen::Search => {
            render_role_list(frame, app, &theme);
            render_input(frame, " 🔍 Search Roles ", &app.query_input, &theme);
        }
        Screen::ConfirmDeleteRole { name, .. } => {
            render_role_list(frame, app, &theme);
            render_confirm_delete(frame, "Role", name, &theme);
        }
        Screen::Editor => render_editor(frame, app, &theme),
        Screen::EditNode => {
            render_editor(frame, app, &theme);
            if let Some(form) = &app.form {
                render_node_form(frame, form, &theme);
            }
        }
        Screen::RenameRole => {
            render_editor(frame, app, &theme);
            render_input(frame, " ✏️  Role Name ", &app.rename_input, &theme);
        }
        Screen::ConfirmDeleteNode(id) => {
            render_editor(frame, app, &theme);
            let label = node_label(app, *id);
            render_confirm_delete(frame, "Menu (and its children)", &label, &theme);
        }
        Screen::Message(msg, is_error) => {
            if app.session.is_some() {
                render_editor(frame, app, &theme);
            } else {
                render_role_list(frame, app, &theme);
            }
            render_message(frame, msg, *is_error, &theme);
        }
    }
}

fn node_label<R: RoleRepository>(app: &App<R>, id: NodeId) -> String {
    app.session
        .as_ref()
        .and_then(|s| s.forest().get(id))
        .map(|e| format!("{} ({})", e.name, e.path))
        .unwrap_or_default()
}

fn render_role_list<R: RoleRepository>(frame: &mut Frame, app: &App<R>, theme: &Theme) {
    let area = frame.area();

    let title = match &app.page {
        Some(page) => format!(" 🛡️  Roles ({}) ", page.total),
        None => " 🛡️  Roles ".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Length(1), // Filter / page info
            Constraint::Min(5),    // List
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 2));

    let info = match &app.page {
        Some(page) => format!(
            "Filter: {}   Page {}/{}",
            if app.query.is_empty() { "(none)" } else { app.query.as_str() },
            page.page,
            page.total_pages
        ),
        None => String::new(),
    };
    frame.render_widget(Paragraph::new(info).style(theme.muted), inner[0]);

    let roles = app.visible_roles();
    if roles.is_empty() {
        let msg = if app.is_loading {
            "Loading..."
        } else if let Some(err) = &app.last_error {
            err.as_str()
        } else {
            "(No roles) press n to create one"
        };
        let p = Paragraph::new(msg)
            .style(theme.muted)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(p, inner[1]);
    } else {
        let items: Vec<ListItem> = roles
            .iter()
            .enumerate()
            .map(|(i, role)| {
                let prefix = if i == app.role_index { "▸ " } else { "  " };
                let style = if i == app.role_index {
                    theme.selected
                } else {
                    theme.normal
                };
                let updated = role
                    .updated_at
                    .map(|t| t.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "-".into());
                ListItem::new(format!(
                    "{}{:<32} {:>3} menus  {:>2} resources  {}",
                    prefix,
                    truncate(&role.name, 32),
                    role.menu.items.len(),
                    role.permissions.granted(),
                    updated
                ))
                .style(style)
            })
            .collect();

        frame.render_widget(List::new(items), inner[1]);
    }

    let footer = Paragraph::new(Line::from(vec![
        Span::styled(" Enter ", theme.key_hint),
        Span::styled("Open", theme.muted),
        Span::raw("  "),
        Span::styled(" n ", theme.key_hint),
        Span::styled("New", theme.muted),
        Span::raw("  "),
        Span::styled(" / ", theme.key_hint),
        Span::styled("Search", theme.muted),
        Span::raw("  "),
        Span::styled(" d ", theme.key_hint),
        Span::styled("Delete", theme.muted),
        Span::raw("  "),
        Span::styled(" PgUp/PgDn ", theme.key_hint),
        Span::styled("Page", theme.muted),
        Span::raw("  "),
        Span::styled(" r ", theme.key_hint),
        Span::styled("Refresh", theme.muted),
        Span::raw("  "),
        Span::styled(" q ", theme.key_hint),
        Span::styled("Quit", theme.muted),
    ]))
    .alignment(Alignment::Center);

    frame.render_widget(footer, inner[2]);
}

fn render_editor<R: RoleRepository>(frame: &mut Frame, app: &App<R>, theme: &Theme) {
    let area = frame.area();
    let Some(session) = &app.session else {
        return;
    };

    let name = if session.role_name().is_empty() {
        "(unnamed role)"
    } else {
        session.role_name()
    };
    let title = format!(
        " 🧭 {}{} ",
        name,
        if session.is_dirty() { " *" } else { "" }
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = Layout::default()
        .constraints([
            Constraint::Min(5),    // Tree
            Constraint::Length(1), // Status
            Constraint::Length(2), // Footer
        ])
        .split(inner_rect(area, 1));

    let forest = session.forest();
    let rows = forest.flatten();
    let items: Vec<ListItem> = rows
        .iter()
        .filter_map(|row| forest.get(row.id).map(|entry| (row, entry)))
        .map(|(row, entry)| {
            let style = if session.is_dragging(row.id) {
                theme.grabbed
            } else {
                theme.normal
            };
            ListItem::new(tree_line(entry, row.depth, session.is_editing(row.id), theme)).style(style)
        })
        .collect();

    let list = List::new(items).highlight_style(theme.selected);
    let mut state = ListState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(list, inner[0], &mut state);

    let status = match (&app.status, session.dragging()) {
        (_, Some(_)) => Span::styled("Moving: ↑/↓ to reorder, Enter to drop", theme.key_hint),
        (Some(status), None) => Span::styled(status.as_str(), theme.muted),
        (None, None) => Span::raw(""),
    };
    frame.render_widget(Paragraph::new(Line::from(status)), inner[1]);

    let footer = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" Space ", theme.key_hint),
            Span::styled("Toggle", theme.muted),
            Span::raw("  "),
            Span::styled(" e ", theme.key_hint),
            Span::styled("Edit", theme.muted),
            Span::raw("  "),
            Span::styled(" a/A ", theme.key_hint),
            Span::styled("Add child/root", theme.muted),
            Span::raw("  "),
            Span::styled(" m ", theme.key_hint),
            Span::styled("Move", theme.muted),
            Span::raw("  "),
            Span::styled(" x ", theme.key_hint),
            Span::styled("Remove", theme.muted),
        ]),
        Line::from(vec![
            Span::styled(" R ", theme.key_hint),
            Span::styled("Rename role", theme.muted),
            Span::raw("  "),
            Span::styled(" s ", theme.key_hint),
            Span::styled("Save", theme.muted),
            Span::raw("  "),
            Span::styled(" c ", theme.key_hint),
            Span::styled("Discard", theme.muted),
            Span::raw("  "),
            Span::styled(" Esc ", theme.key_hint),
            Span::styled("Back", theme.muted),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(footer, inner[2]);
}

fn tree_line<'a>(entry: &'a MenuEntry, depth: usize, editing: bool, theme: &Theme) -> Line<'a> {
    let indent = "   ".repeat(depth.saturating_sub(1));
    let (checkbox, checkbox_style) = if entry.selected {
        ("[x]", theme.checked)
    } else {
        ("[ ]", theme.unchecked)
    };

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(checkbox, checkbox_style),
        Span::raw(format!(" {} ", entry.icon.glyph())),
        Span::raw(entry.name.as_str()),
        Span::raw("  "),
        Span::styled(entry.path.as_str(), theme.path),
    ];
    if editing {
        spans.push(Span::styled("  ✎", theme.key_hint));
    }
    Line::from(spans)
}

fn render_node_form(frame: &mut Frame, form: &NodeForm, theme: &Theme) {
    let area = center_rect(frame.area(), 60, 9);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(" ✎ Edit Menu ")
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);

    let field_line = |field: EditField, value: String| {
        let style = if form.field == field {
            theme.field_focus
        } else {
            theme.normal
        };
        Line::from(vec![
            Span::styled(format!(" {:<5} ", field.label()), theme.muted),
            Span::styled(value, style),
        ])
    };

    let cursor = |field: EditField| if form.field == field { "_" } else { "" };

    let text = Paragraph::new(vec![
        field_line(EditField::Name, format!("{}{}", form.name, cursor(EditField::Name))),
        field_line(EditField::Path, format!("{}{}", form.path, cursor(EditField::Path))),
        field_line(
            EditField::Icon,
            format!("◂ {} {} ▸", form.icon.glyph(), form.icon.as_str()),
        ),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" Tab ", theme.key_hint),
            Span::styled("Field", theme.muted),
            Span::raw("  "),
            Span::styled(" ←/→ ", theme.key_hint),
            Span::styled("Icon", theme.muted),
            Span::raw("  "),
            Span::styled(" Enter ", theme.key_hint),
            Span::styled("Apply", theme.muted),
            Span::raw("  "),
            Span::styled(" Esc ", theme.key_hint),
            Span::styled("Apply & close", theme.muted),
        ]),
    ]);

    frame.render_widget(text, inner);
}

fn render_input(frame: &mut Frame, title: &str, value: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 6);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.title)
        .title(title)
        .title_style(theme.title);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(format!("{}_", value), theme.title)),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" Enter ", theme.key_hint),
            Span::styled("Confirm", theme.muted),
            Span::raw("  "),
            Span::styled(" Esc ", theme.key_hint),
            Span::styled("Cancel", theme.muted),
        ]),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(text, inner);
}

fn render_confirm_delete(frame: &mut Frame, kind: &str, label: &str, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 8);

    // Clear background
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.danger)
        .title(format!(" ⚠️  Delete {} ", kind))
        .title_style(theme.danger);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 2);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(truncate(label, 40), theme.title)),
        Line::raw(""),
        Line::from(vec![
            Span::styled(" [Y] ", theme.key_hint),
            Span::styled("Yes, Delete", theme.danger),
            Span::raw("    "),
            Span::styled(" [N] ", theme.key_hint),
            Span::raw("Cancel"),
        ]),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner);
}

fn render_message(frame: &mut Frame, msg: &str, is_error: bool, theme: &Theme) {
    let area = center_rect(frame.area(), 50, 7);

    frame.render_widget(Clear, area);

    let style = if is_error {
        theme.danger
    } else {
        theme.success
    };
    let title = if is_error {
        " ❌ Error "
    } else {
        " ✅ Success "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
        .title_style(style);

    frame.render_widget(block, area);

    let inner = inner_rect(area, 1);

    let text = Paragraph::new(vec![
        Line::raw(""),
        Line::raw(msg),
        Line::raw(""),
        Line::from(Span::styled("Press any key to continue", theme.muted)),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    frame.render_widget(text, inner);
}

// Helper: shrink rect by margin
fn inner_rect(area: Rect, margin: u16) -> Rect {
    Rect {
        x: area.x + margin,
        y: area.y + margin,
        width: area.width.saturating_sub(margin * 2),
        height: area.height.saturating_sub(margin * 2),
    }
}

// Helper: center a popup
fn center_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100).min(u32::from(area.width)) as u16;
    let height = height.min(area.height);
    let x = (area.width - width) / 2;
    let y = (area.height - height) / 2;
    Rect {
        x: area.x + x,
        y: area.y + y,
        width,
        height,
    }
}
