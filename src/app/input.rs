use crossterm::event::{
    self, Event, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Model};
use crate::viewer::Direction;

impl App {
    pub(super) fn handle_event(event: Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(key, model),
            Event::Mouse(mouse) => Self::handle_mouse(mouse, model),
            Event::Resize(width, height) => Some(Message::Resize(width, height)),
            _ => None,
        }
    }

    /// Route a key event to a message.
    ///
    /// Branch order defines the binding scopes: help overlay, then the open
    /// viewer, then the focused search input, then the grid. A branch
    /// consumes every key bound in its scope; unbound keys fall out as
    /// `None` and are ignored.
    pub(super) fn handle_key(key: event::KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            let _ = key;
            return Some(Message::HideHelp);
        }

        if model.viewer.is_open() {
            return match key.code {
                KeyCode::Esc => Some(Message::CloseViewer),
                KeyCode::Left => Some(Message::Navigate(Direction::Prev)),
                KeyCode::Right => Some(Message::Navigate(Direction::Next)),
                // Space starts playback from paused only; either way it is
                // consumed here and never pages the grid behind the viewer.
                KeyCode::Char(' ') => {
                    if model.viewer.is_playing() {
                        None
                    } else {
                        Some(Message::Play)
                    }
                }
                KeyCode::Char('f' | 'F') => Some(Message::ToggleFullscreen),
                KeyCode::Char('s' | 'S') => Some(Message::Share),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(Message::Quit)
                }
                _ => None,
            };
        }

        if model.search_focused {
            return match key.code {
                KeyCode::Esc => Some(Message::ToggleSearch),
                KeyCode::Enter => Some(Message::SearchBlur),
                KeyCode::Backspace => {
                    let mut next = model.filter.search_term.clone();
                    next.pop();
                    Some(Message::SearchInput(next))
                }
                KeyCode::Char(c)
                    if !key.modifiers.contains(KeyModifiers::CONTROL)
                        && !key.modifiers.contains(KeyModifiers::ALT) =>
                {
                    let mut next = model.filter.search_term.clone();
                    next.push(c);
                    Some(Message::SearchInput(next))
                }
                _ => None,
            };
        }

        // Grid bindings
        match key.code {
            // Search
            KeyCode::Char('/') if !model.search_active => Some(Message::ToggleSearch),
            KeyCode::Esc if model.search_active => Some(Message::ToggleSearch),

            // Cursor
            KeyCode::Left | KeyCode::Char('h') => Some(Message::CursorLeft),
            KeyCode::Right | KeyCode::Char('l') => Some(Message::CursorRight),
            KeyCode::Up | KeyCode::Char('k') => Some(Message::CursorUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Message::CursorDown),
            KeyCode::Enter => Some(Message::OpenSelected),

            // Paging
            KeyCode::Char(' ') | KeyCode::PageDown => {
                if model.grid.can_scroll_down() {
                    Some(Message::GridPageDown)
                } else {
                    None
                }
            }
            KeyCode::Char('b') | KeyCode::PageUp => {
                if model.grid.can_scroll_up() {
                    Some(Message::GridPageUp)
                } else {
                    None
                }
            }

            // Filters
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }
            KeyCode::Char('c') => Some(Message::NextCategory),
            KeyCode::Char('C') => Some(Message::PrevCategory),
            KeyCode::Char('x') => Some(Message::ClearFilters),

            // Application
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),
            KeyCode::Char('q') => Some(Message::Quit),

            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left))
                .then_some(Message::HideHelp);
        }

        if model.viewer.is_open() {
            // Clicking the backdrop closes the viewer; clicks inside it and
            // wheel events are swallowed (the scroll lock is held).
            if matches!(mouse.kind, MouseEventKind::Up(MouseButton::Left)) {
                let frame = Rect::new(
                    0,
                    0,
                    model.grid.width(),
                    model.grid.height().saturating_add(1),
                );
                let popup = crate::ui::viewer_rect(frame, model.viewer.is_fullscreen());
                if !point_in_rect(mouse.column, mouse.row, popup) {
                    return Some(Message::CloseViewer);
                }
            }
            return None;
        }

        match mouse.kind {
            MouseEventKind::Up(MouseButton::Left) => {
                let area = crate::ui::grid_area(model);
                let index = model.grid.index_at(area, mouse.column, mouse.row)?;
                model.visible().get(index).copied().map(Message::Open)
            }
            MouseEventKind::ScrollDown => {
                if model.grid.can_scroll_down() {
                    Some(Message::GridScrollDown(2))
                } else {
                    None
                }
            }
            MouseEventKind::ScrollUp => {
                if model.grid.can_scroll_up() {
                    Some(Message::GridScrollUp(2))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}
