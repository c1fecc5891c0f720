use std::path::PathBuf;

use ratatui::Terminal;
use ratatui::backend::TestBackend;

use crate::app::{Message, Model, update};
use crate::catalog::{Catalog, ItemId};
use crate::thumbs::ThumbnailStore;

use super::render;

fn test_model() -> Model {
    let json = r#"{
        "categories": ["wedding", "film"],
        "items": [
            {"id": 1, "title": "Cinematic Journey", "category": "film",
             "description": "A breathtaking visual narrative.",
             "thumbnailUrl": "https://img.example/a.jpg", "videoUrl": "v1"},
            {"id": 2, "title": "Coastal Vows", "category": "wedding",
             "description": "A seaside ceremony.",
             "thumbnailUrl": "https://img.example/b.jpg", "videoUrl": "v2"},
            {"id": 3, "title": "Tuscany Wedding Trailer | Emma & James", "category": "wedding",
             "description": "A cinematic trailer.",
             "thumbnailUrl": "https://img.example/c.jpg", "videoUrl": "v3"}
        ]
    }"#;
    let catalog = Catalog::from_json(json, PathBuf::from("catalog.json")).unwrap();
    let thumbs = ThumbnailStore::new(catalog.base_dir(), None);
    Model::new(catalog, (100, 30), thumbs)
}

fn draw(model: &mut Model) -> Terminal<TestBackend> {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal
}

fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push_str(buffer[(x, y)].symbol());
        }
        content.push('\n');
    }
    content
}

#[test]
fn test_grid_renders_cards_and_status_bar() {
    let mut model = test_model();
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("Cinematic Journey"));
    assert!(text.contains("Coastal Vows"));
    assert!(text.contains("WEDDING"));
    assert!(text.contains("3/3 projects"));
}

#[test]
fn test_empty_state_offers_clear_filters() {
    let mut model = test_model();
    model = update(model, Message::ToggleSearch);
    model = update(model, Message::SearchInput("zzz".to_string()));
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("No projects match your filters."));
    assert!(text.contains("x clears filters"));
}

#[test]
fn test_search_bar_shows_term_and_match_count() {
    let mut model = test_model();
    model = update(model, Message::ToggleSearch);
    model = update(model, Message::SearchInput("emma".to_string()));
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("/emma"));
    assert!(text.contains("[1 match(es)]"));
}

#[test]
fn test_viewer_overlay_shows_counters_and_details() {
    let mut model = test_model();
    model = update(model, Message::Open(ItemId(2)));
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("2 / 3"));
    assert!(text.contains("Coastal Vows"));
    assert!(text.contains("A seaside ceremony."));
    assert!(text.contains("Esc close"));
    assert!(text.contains("viewing 2/3"));
}

#[test]
fn test_fullscreen_viewer_hides_details() {
    let mut model = test_model();
    model = update(model, Message::Open(ItemId(2)));
    model = update(model, Message::ToggleFullscreen);
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("2 / 3"));
    assert!(!text.contains("A seaside ceremony."));
}

#[test]
fn test_failed_thumbnail_renders_placeholder() {
    let mut model = test_model();
    model = update(model, Message::ThumbFailed(ItemId(1)));
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("image unavailable"));
}

#[test]
fn test_help_overlay_lists_bindings() {
    let mut model = test_model();
    model = update(model, Message::ToggleHelp);
    let terminal = draw(&mut model);
    let text = buffer_text(&terminal);

    assert!(text.contains("Search & filters"));
    assert!(text.contains("Toggle fullscreen"));
}

#[test]
fn test_truncate_to_width_appends_ellipsis() {
    use super::render::truncate_to_width;
    assert_eq!(truncate_to_width("short", 10), "short");
    assert_eq!(truncate_to_width("a long title here", 7), "a long\u{2026}");
    assert_eq!(truncate_to_width("abc", 0), "");
}
