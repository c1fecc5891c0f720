use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::Model;
use crate::catalog::ALL_CATEGORY;

pub fn render_search_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let term = &model.filter.search_term;
    let match_info = if term.is_empty() {
        String::new()
    } else {
        format!("  [{} match(es)]", model.visible_len())
    };
    let hint = if model.search_focused {
        "Enter: done  Esc: clear"
    } else {
        "Esc: clear"
    };
    let text = format!("/{term}{match_info}  {hint}");
    let bar = Paragraph::new(text).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let category = if model.filter.category == ALL_CATEGORY {
        String::new()
    } else {
        format!("  [{}]", model.filter.category)
    };
    let viewing = model
        .viewer
        .counters(model.visible_len())
        .map_or_else(String::new, |(current, total)| {
            format!("  viewing {current}/{total}")
        });

    let status = format!(
        " {}/{} projects{}{}  ?:help",
        model.visible_len(),
        model.catalog.len(),
        category,
        viewing,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        crate::app::ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        crate::app::ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        crate::app::ToastLevel::Error => {
            ("[error]", Style::default().bg(Color::Red).fg(Color::White))
        }
    };
    let toast = Paragraph::new(format!("{} {}", prefix, message)).style(style);
    frame.render_widget(toast, area);
}
