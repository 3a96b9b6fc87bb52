use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;

use rbac_core::operations::Direction;
use rbac_core::repositories::RoleRepository;

use crate::app::{App, EditField, Screen};

/// Poll for keyboard events with timeout
pub fn poll_event(timeout_ms: u64) -> anyhow::Result<Option<Event>> {
    if event::poll(Duration::from_millis(timeout_ms))? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle keyboard input
pub async fn handle_event<R: RoleRepository>(app: &mut App<R>, event: Event) -> anyhow::Result<()> {
    let Event::Key(key) = event else {
        // Resize handled by ratatui automatically
        return Ok(());
    };
    // Only handle key press events (not release)
    if key.kind != KeyEventKind::Press {
        return Ok(());
    }

    match app.screen.clone() {
        Screen::RoleList => handle_role_list(app, key.code).await,
        Screen::Search => handle_search(app, key.code).await,
        Screen::ConfirmDeleteRole { id, name } => {
            handle_confirm_delete_role(app, key.code, &id, &name).await
        }
        Screen::Editor => handle_editor(app, key.code).await,
        Screen::EditNode => handle_edit_node(app, key.code),
        Screen::RenameRole => handle_rename(app, key.code),
        Screen::ConfirmDeleteNode(id) => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.remove_node(id),
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.screen = Screen::Editor,
                _ => {}
            }
        }
        Screen::Message(_, _) => {
            // Any key dismisses the message
            app.dismiss_message();
        }
    }
    Ok(())
}

async fn handle_role_list<R: RoleRepository>(app: &mut App<R>, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.role_up(),
        KeyCode::Down | KeyCode::Char('j') => app.role_down(),
        KeyCode::PageDown => app.next_page().await,
        KeyCode::PageUp => app.prev_page().await,
        KeyCode::Enter => app.open_selected().await,
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('n') => app.new_role(),
        KeyCode::Char('d') | KeyCode::Delete => app.request_delete_role(),
        KeyCode::Char('r') => app.load_roles().await,
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

async fn handle_search<R: RoleRepository>(app: &mut App<R>, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.query_input.push(c),
        KeyCode::Backspace => {
            app.query_input.pop();
        }
        KeyCode::Enter => app.apply_search().await,
        KeyCode::Esc => app.screen = Screen::RoleList,
        _ => {}
    }
}

async fn handle_confirm_delete_role<R: RoleRepository>(
    app: &mut App<R>,
    code: KeyCode,
    id: &str,
    name: &str,
) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.delete_role(id, name).await,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.screen = Screen::RoleList,
        _ => {}
    }
}

async fn handle_editor<R: RoleRepository>(app: &mut App<R>, code: KeyCode) {
    // A grabbed node captures the arrows until it is dropped
    if app.dragging().is_some() {
        match code {
            KeyCode::Up | KeyCode::Char('k') => app.step_grabbed(Direction::Up),
            KeyCode::Down | KeyCode::Char('j') => app.step_grabbed(Direction::Down),
            KeyCode::Enter | KeyCode::Char('m') | KeyCode::Esc => app.drop_grabbed(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => app.cursor_up(),
        KeyCode::Down | KeyCode::Char('j') => app.cursor_down(),
        KeyCode::Char(' ') => app.toggle_current(),
        KeyCode::Char('a') => app.insert_node(false),
        KeyCode::Char('A') => app.insert_node(true),
        KeyCode::Char('m') => app.grab_current(),
        KeyCode::Char('e') | KeyCode::Enter => app.begin_edit(),
        KeyCode::Char('x') | KeyCode::Delete => app.request_remove(),
        KeyCode::Char('R') => app.begin_rename(),
        KeyCode::Char('s') => app.save().await,
        KeyCode::Char('c') => app.cancel_edits(),
        KeyCode::Esc => app.leave_editor().await,
        _ => {}
    }
}

fn handle_edit_node<R: RoleRepository>(app: &mut App<R>, code: KeyCode) {
    match code {
        // Leaving the form applies it, as the dashboard applies edits live
        KeyCode::Enter | KeyCode::Esc => app.commit_edit(),
        KeyCode::Tab => {
            if let Some(form) = app.form.as_mut() {
                form.field = form.field.next();
            }
        }
        KeyCode::BackTab => {
            if let Some(form) = app.form.as_mut() {
                form.field = form.field.prev();
            }
        }
        KeyCode::Left | KeyCode::Right => {
            if let Some(form) = app.form.as_mut().filter(|f| f.field == EditField::Icon) {
                form.icon = match code {
                    KeyCode::Left => form.icon.prev(),
                    _ => form.icon.next(),
                };
            }
        }
        KeyCode::Char(c) => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.input_mut()) {
                input.push(c);
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.form.as_mut().and_then(|f| f.input_mut()) {
                input.pop();
            }
        }
        _ => {}
    }
}

fn handle_rename<R: RoleRepository>(app: &mut App<R>, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.rename_input.push(c),
        KeyCode::Backspace => {
            app.rename_input.pop();
        }
        KeyCode::Enter => app.commit_rename(),
        KeyCode::Esc => app.screen = Screen::Editor,
        _ => {}
    }
}
