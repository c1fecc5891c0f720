use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui_image::{Resize, StatefulImage};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::Model;
use crate::catalog::ItemId;

use super::{overlays, status};

fn footer_rows(model: &Model) -> u16 {
    1 + u16::from(model.search_active) + u16::from(model.active_toast().is_some())
}

/// The rectangle the card grid occupies, for rendering and mouse routing.
///
/// The grid tracks the frame minus the status bar; the search and toast
/// bars shave additional rows off the bottom when present.
pub fn grid_area(model: &Model) -> Rect {
    let extra = footer_rows(model).saturating_sub(1);
    Rect::new(
        0,
        0,
        model.grid.width(),
        model.grid.height().saturating_sub(extra),
    )
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let search_active = model.search_active;
    let toast_active = model.active_toast().is_some();
    let search_area = Rect {
        y: area.y + area.height.saturating_sub(1 + u16::from(search_active)),
        height: 1,
        ..area
    };
    let toast_area = Rect {
        y: area.y
            + area
                .height
                .saturating_sub(1 + u16::from(search_active) + u16::from(toast_active)),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_grid(model, frame, grid_area(model));

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    if search_active {
        status::render_search_bar(model, frame, search_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.viewer.is_open() {
        overlays::render_viewer_overlay(model, frame, area);
    }
    if model.help_visible {
        overlays::render_help_overlay(frame, area);
    }
}

fn render_grid(model: &mut Model, frame: &mut Frame, area: Rect) {
    frame.render_widget(Clear, area);

    if model.visible_len() == 0 {
        render_empty_state(frame, area);
        return;
    }

    let ids: Vec<ItemId> = model.visible().to_vec();
    for (index, id) in ids.into_iter().enumerate() {
        let Some(rect) = model.grid.cell_rect(area, index) else {
            continue;
        };
        render_card(model, frame, rect, index, id);
    }
}

fn render_card(model: &mut Model, frame: &mut Frame, rect: Rect, index: usize, id: ItemId) {
    let Some(item) = model.catalog.get(id) else {
        return;
    };
    let title = item.title.clone();
    let category = item.category.to_uppercase();
    let description = item.description.clone();
    let selected = index == model.cursor;
    let failed = model.thumb_failed(id);

    let border_style = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(truncate_to_width(&title, rect.width.saturating_sub(4)));
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    // Bottom row of the card interior carries the category badge.
    let badge_area = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: 1,
        ..inner
    };
    let media_area = Rect {
        height: inner.height.saturating_sub(1),
        ..inner
    };

    if media_area.height > 0 {
        if failed {
            let placeholder = Paragraph::new("image unavailable")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center);
            frame.render_widget(placeholder, media_area);
        } else if let Some((protocol, _, _)) = model.thumbs.protocol_mut(id) {
            let image = StatefulImage::default().resize(Resize::Scale(None));
            image.render(media_area, frame.buffer_mut(), protocol);
        } else {
            // Remote thumbnail or images disabled: text card.
            let excerpt = Paragraph::new(description)
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true });
            frame.render_widget(excerpt, media_area);
        }
    }

    let badge = Paragraph::new(truncate_to_width(&category, badge_area.width))
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(badge, badge_area);
}

fn render_empty_state(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::raw(""),
        Line::styled(
            "No projects match your filters.",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled(
            "x clears filters \u{2502} / searches \u{2502} c cycles categories",
            Style::default().fg(Color::Indexed(245)),
        ),
    ];
    let message = Paragraph::new(lines).alignment(Alignment::Center);
    let centered = Rect {
        y: area.y + area.height / 3,
        height: area.height.saturating_sub(area.height / 3),
        ..area
    };
    frame.render_widget(message, centered);
}

/// Truncate a string to a display width, appending an ellipsis when cut.
pub fn truncate_to_width(text: &str, width: u16) -> String {
    let width = width as usize;
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('\u{2026}');
    out
}
