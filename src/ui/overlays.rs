use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui_image::{Resize, StatefulImage};

use crate::app::Model;
use crate::embed::embed_url;

/// The rectangle the viewer occupies. Fullscreen covers the whole frame;
/// otherwise it is a centered popup over the grid.
pub fn viewer_rect(area: Rect, fullscreen: bool) -> Rect {
    if fullscreen {
        return area;
    }
    let popup_width = area.width.saturating_sub(10).max(50);
    let popup_height = area.height.saturating_sub(4).max(14);
    centered_popup_rect(popup_width, popup_height, area)
}

pub fn render_viewer_overlay(model: &mut Model, frame: &mut Frame, area: Rect) {
    let Some(item) = model.open_item() else {
        return;
    };
    let id = item.id;
    let title = item.title.clone();
    let category = item.category.to_uppercase();
    let description = item.description.clone();
    let video_url = item.video_url.clone();
    let client = item.client.clone();
    let director = item.director.clone();
    let year = item.year.clone();
    let location = item.location.clone();
    let camera = item.camera.clone();
    let lenses = item.lenses.clone();
    let format = item.format.clone();
    let aspect_ratio = item.aspect_ratio.clone();

    let fullscreen = model.viewer.is_fullscreen();
    let playing = model.viewer.is_playing();
    let (current, total) = model
        .viewer
        .counters(model.visible_len())
        .unwrap_or((0, 0));

    let popup = viewer_rect(area, fullscreen);
    let block = Block::default()
        .title(format!(" {current} / {total} "))
        .borders(Borders::ALL)
        .style(Style::default().bg(Color::Black).fg(Color::White));
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);
    if inner.height < 2 || inner.width == 0 {
        return;
    }

    let header_area = Rect { height: 1, ..inner };
    let body_area = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };

    let header = Line::from(vec![
        Span::styled(
            "\u{2190} \u{2192} navigate",
            Style::default().fg(Color::Indexed(245)),
        ),
        Span::raw("  "),
        Span::styled(
            "Space play \u{2502} F fullscreen \u{2502} S share \u{2502} Esc close",
            Style::default().fg(Color::Indexed(245)),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    // Fullscreen devotes the whole body to the media panel.
    let media_height = if fullscreen {
        body_area.height
    } else {
        (body_area.height / 2).max(4).min(body_area.height)
    };
    let media_area = Rect {
        height: media_height,
        ..body_area
    };
    let details_area = Rect {
        y: body_area.y + media_height,
        height: body_area.height.saturating_sub(media_height),
        ..body_area
    };

    if playing {
        let lines = vec![
            Line::raw(""),
            Line::styled(
                "\u{25b6} Playing in external player",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Line::styled(embed_url(&video_url), Style::default().fg(Color::Cyan)),
        ];
        let panel = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(panel, media_area);
    } else if model.thumb_failed(id) {
        let placeholder = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("image unavailable", Style::default().fg(Color::DarkGray)),
            Line::styled("Space to play", Style::default().fg(Color::Indexed(245))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(placeholder, media_area);
    } else if let Some((protocol, _, _)) = model.thumbs.protocol_mut(id) {
        let image = StatefulImage::default().resize(Resize::Scale(None));
        image.render(media_area, frame.buffer_mut(), protocol);
    } else {
        let placeholder = Paragraph::new(vec![
            Line::raw(""),
            Line::styled("\u{25b6}", Style::default().fg(Color::Yellow)),
            Line::styled("Space to play", Style::default().fg(Color::Indexed(245))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(placeholder, media_area);
    }

    if fullscreen || details_area.height == 0 {
        return;
    }

    let mut lines = vec![
        Line::styled(title, Style::default().add_modifier(Modifier::BOLD)),
        Line::styled(category, Style::default().fg(Color::Yellow)),
        Line::raw(""),
        Line::raw(description),
        Line::raw(""),
    ];
    let detail = |label: &str, value: &str| -> Option<Line<'static>> {
        if value.is_empty() {
            return None;
        }
        Some(Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.to_string()),
        ]))
    };
    lines.extend(detail("Client", &client));
    lines.extend(detail("Director", &director));
    lines.extend(detail("Year", &year));
    lines.extend(detail("Location", &location));
    lines.extend(detail("Camera", &camera));
    lines.extend(detail("Lenses", &lenses));
    lines.extend(detail("Format", &format));
    lines.extend(detail("Aspect Ratio", &aspect_ratio));

    let details = Paragraph::new(lines).wrap(Wrap { trim: true });
    frame.render_widget(details, details_area);
}

pub fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(6).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let all_lines: Vec<Line> = vec![
        Line::styled("Gallery", section_style),
        Line::raw("  Arrows or h/j/k/l  Move between cards"),
        Line::raw("  Enter or click     Open project"),
        Line::raw("  Space/PageDown     Page down"),
        Line::raw("  b/PageUp           Page up"),
        Line::raw(""),
        Line::styled("Search & filters", section_style),
        Line::raw("  /                  Search projects"),
        Line::raw("  Esc                Clear search"),
        Line::raw("  c / C              Next / previous category"),
        Line::raw("  x                  Clear all filters"),
        Line::raw(""),
        Line::styled("Viewer", section_style),
        Line::raw("  \u{2190} / \u{2192}              Previous / next project"),
        Line::raw("  Space              Play"),
        Line::raw("  f                  Toggle fullscreen"),
        Line::raw("  s                  Share"),
        Line::raw("  Esc                Close"),
        Line::raw(""),
        Line::styled("Other", section_style),
        Line::raw("  q / Ctrl-c         Quit"),
        Line::raw("  ? / F1             Toggle help"),
    ];

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(all_lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
