use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::catalog::{Catalog, ItemId};
use crate::thumbs::ThumbnailStore;
use crate::viewer::Direction;

use super::{App, Message, Model, ToastLevel, update};

/// Five items, two tagged "wedding", mirroring a small portfolio.
fn sample_catalog() -> Catalog {
    let json = r#"{
        "site": "https://example.film",
        "categories": ["documentary", "wedding", "travel", "film"],
        "items": [
            {"id": 1, "title": "Cinematic Journey", "category": "film",
             "description": "A breathtaking visual narrative.",
             "thumbnailUrl": "a.jpg", "videoUrl": "https://www.youtube.com/embed/AAA"},
            {"id": 2, "title": "Brand Vision", "category": "commercial",
             "description": "A dynamic commercial piece.",
             "thumbnailUrl": "b.jpg", "videoUrl": "https://www.youtube.com/embed/BBB"},
            {"id": 3, "title": "Coastal Vows", "category": "wedding",
             "description": "A seaside ceremony.",
             "thumbnailUrl": "c.jpg", "videoUrl": "https://vimeo.com/CCC"},
            {"id": 4, "title": "Tuscany Wedding Trailer | Emma & James", "category": "wedding",
             "description": "A cinematic trailer of a wedding in the Tuscan hills.",
             "thumbnailUrl": "d.jpg", "videoUrl": "https://www.youtube.com/embed/DDD"},
            {"id": 5, "title": "Documentary Truth", "category": "documentary",
             "description": "Real stories and authentic experiences.",
             "thumbnailUrl": "e.jpg", "videoUrl": "https://example.com/v.mp4"}
        ]
    }"#;
    Catalog::from_json(json, PathBuf::from("catalog.json")).unwrap()
}

fn create_test_model() -> Model {
    let catalog = sample_catalog();
    let thumbs = ThumbnailStore::new(catalog.base_dir(), None);
    Model::new(catalog, (80, 24), thumbs)
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

// Viewer lifecycle

#[test]
fn test_open_records_position_and_acquires_lock() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(3)));

    assert_eq!(model.viewer.open_id(), Some(ItemId(3)));
    assert_eq!(model.viewer.index(), Some(2));
    assert!(!model.viewer.is_playing());
    assert!(model.is_scroll_locked());
}

#[test]
fn test_open_outside_visible_set_is_a_silent_no_op() {
    let model = create_test_model();
    let model = update(model, Message::SetCategory("wedding".to_string()));
    let before_viewer = model.viewer.clone();

    // Item 1 is a film; it is not in the wedding visible set.
    let model = update(model, Message::Open(ItemId(1)));
    assert_eq!(model.viewer, before_viewer);
    assert!(!model.is_scroll_locked());
    assert_eq!(model.scroll_lock_cycles(), (0, 0));
}

#[test]
fn test_close_is_idempotent_and_never_double_releases() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    assert!(model.is_scroll_locked());

    let model = update(model, Message::CloseViewer);
    let model = update(model, Message::CloseViewer);

    assert!(!model.viewer.is_open());
    assert!(!model.is_scroll_locked());
    assert_eq!(model.scroll_lock_cycles(), (1, 1));
}

#[test]
fn test_navigate_next_then_prev_restores_open_item() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(2)));
    let model = update(model, Message::Navigate(Direction::Next));
    let model = update(model, Message::Navigate(Direction::Prev));
    assert_eq!(model.viewer.open_id(), Some(ItemId(2)));
}

#[test]
fn test_navigate_wraps_at_both_ends() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(5)));
    assert_eq!(model.viewer.index(), Some(4));

    let model = update(model, Message::Navigate(Direction::Next));
    assert_eq!(model.viewer.index(), Some(0));

    let model = update(model, Message::Navigate(Direction::Prev));
    assert_eq!(model.viewer.index(), Some(4));
}

#[test]
fn test_navigate_resets_playback_and_keeps_fullscreen() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    let model = update(model, Message::Play);
    let model = update(model, Message::ToggleFullscreen);
    assert!(model.viewer.is_playing());

    let model = update(model, Message::Navigate(Direction::Next));
    assert!(!model.viewer.is_playing());
    assert!(model.viewer.is_fullscreen());
}

#[test]
fn test_navigate_is_a_no_op_with_a_single_visible_item() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchInput("emma".to_string()));
    assert_eq!(model.visible_len(), 1);

    let model = update(model, Message::Open(ItemId(4)));
    let model = update(model, Message::Navigate(Direction::Next));
    assert_eq!(model.viewer.index(), Some(0));
    assert_eq!(model.viewer.open_id(), Some(ItemId(4)));
}

#[test]
fn test_play_transitions_once() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    let model = update(model, Message::Play);
    assert!(model.viewer.is_playing());
    let model = update(model, Message::Play);
    assert!(model.viewer.is_playing());
}

// Filtering and reconciliation

#[test]
fn test_wedding_scenario_filters_opens_and_wraps() {
    // Catalog has 5 items, 2 tagged wedding. Filtering, opening the second
    // wedding item, and navigating next wraps to the first.
    let model = create_test_model();
    let model = update(model, Message::SetCategory("wedding".to_string()));
    assert_eq!(model.visible(), [ItemId(3), ItemId(4)]);

    let model = update(model, Message::Open(ItemId(4)));
    assert_eq!(model.viewer.index(), Some(1));
    assert_eq!(model.viewer.counters(model.visible_len()), Some((2, 2)));

    let model = update(model, Message::Navigate(Direction::Next));
    assert_eq!(model.viewer.index(), Some(0));
    assert_eq!(model.viewer.open_id(), Some(ItemId(3)));
    assert!(!model.viewer.is_playing());
}

#[test]
fn test_filter_change_that_excludes_open_item_closes_viewer() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    assert!(model.is_scroll_locked());

    let model = update(model, Message::SetCategory("wedding".to_string()));
    assert!(!model.viewer.is_open());
    assert!(!model.is_scroll_locked());
    assert_eq!(model.scroll_lock_cycles(), (1, 1));
}

#[test]
fn test_filter_change_that_keeps_open_item_reindexes_it() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(4)));
    assert_eq!(model.viewer.index(), Some(3));

    let model = update(model, Message::SetCategory("wedding".to_string()));
    assert!(model.viewer.is_open());
    assert_eq!(model.viewer.index(), Some(1));
    assert!(model.is_scroll_locked());
}

#[test]
fn test_unknown_category_is_ignored() {
    let model = create_test_model();
    let model = update(model, Message::SetCategory("nope".to_string()));
    assert_eq!(model.filter.category, "all");
    assert_eq!(model.visible_len(), 5);
}

#[test]
fn test_clear_filters_restores_full_set() {
    let model = create_test_model();
    let model = update(model, Message::SetCategory("wedding".to_string()));
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchInput("vows".to_string()));
    assert_eq!(model.visible_len(), 1);

    let model = update(model, Message::ClearFilters);
    assert_eq!(model.visible_len(), 5);
    assert!(model.filter.is_default());
}

#[test]
fn test_category_cycling_walks_the_options() {
    let model = create_test_model();
    let model = update(model, Message::NextCategory);
    assert_eq!(model.filter.category, "documentary");
    let model = update(model, Message::PrevCategory);
    assert_eq!(model.filter.category, "all");
    let model = update(model, Message::PrevCategory);
    assert_eq!(model.filter.category, "film");
}

// Search activation

#[test]
fn test_search_term_matches_title_regardless_of_category() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchInput("EMMA".to_string()));
    assert_eq!(model.visible(), [ItemId(4)]);

    let model = update(model, Message::SetCategory("wedding".to_string()));
    assert_eq!(model.visible(), [ItemId(4)]);
}

#[test]
fn test_search_blur_with_text_keeps_search_applied() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);
    assert!(model.search_active && model.search_focused);

    let model = update(model, Message::SearchInput("emma".to_string()));
    let model = update(model, Message::SearchBlur);
    assert!(model.search_active);
    assert!(!model.search_focused);
    assert_eq!(model.visible_len(), 1);
}

#[test]
fn test_search_blur_with_empty_term_deactivates() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchBlur);
    assert!(!model.search_active);
}

#[test]
fn test_deactivating_search_clears_the_term_and_rederives() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchInput("emma".to_string()));
    assert_eq!(model.visible_len(), 1);

    let model = update(model, Message::ToggleSearch);
    assert!(!model.search_active);
    assert!(model.filter.search_term.is_empty());
    assert_eq!(model.visible_len(), 5);
}

#[test]
fn test_search_narrowing_closes_viewer_when_item_drops_out() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchInput("emma".to_string()));
    assert!(!model.viewer.is_open());
    assert!(!model.is_scroll_locked());
}

// Scroll lock semantics

#[test]
fn test_grid_does_not_scroll_while_viewer_open() {
    let mut model = create_test_model();
    model.resize(40, 14); // 1 column, 1 visible row: plenty to scroll
    assert!(model.grid.can_scroll_down());

    let model = update(model, Message::Open(ItemId(1)));
    let offset = model.grid.offset_rows();
    let model = update(model, Message::GridScrollDown(3));
    assert_eq!(model.grid.offset_rows(), offset);

    let model = update(model, Message::GridPageDown);
    assert_eq!(model.grid.offset_rows(), offset);

    let model = update(model, Message::CloseViewer);
    let model = update(model, Message::GridScrollDown(1));
    assert_eq!(model.grid.offset_rows(), offset + 1);
}

// Image fallback

#[test]
fn test_thumb_failures_accumulate_and_survive_filter_changes() {
    let model = create_test_model();
    let model = update(model, Message::ThumbFailed(ItemId(2)));
    assert!(model.thumb_failed(ItemId(2)));

    let model = update(model, Message::SetCategory("wedding".to_string()));
    let model = update(model, Message::ClearFilters);
    assert!(model.thumb_failed(ItemId(2)));
}

// Keyboard dispatch

#[test]
fn test_slash_activates_search_only_when_inactive() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Char('/')), &model),
        Some(Message::ToggleSearch)
    );

    let model = update(model, Message::ToggleSearch);
    let model = update(model, Message::SearchBlur);
    let mut model = model;
    model.filter.search_term = "emma".to_string();
    model.search_active = true;
    assert_eq!(App::handle_key(key(KeyCode::Char('/')), &model), None);
}

#[test]
fn test_viewer_key_bindings() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));

    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::CloseViewer)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Left), &model),
        Some(Message::Navigate(Direction::Prev))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Right), &model),
        Some(Message::Navigate(Direction::Next))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char(' ')), &model),
        Some(Message::Play)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('f')), &model),
        Some(Message::ToggleFullscreen)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('F')), &model),
        Some(Message::ToggleFullscreen)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('s')), &model),
        Some(Message::Share)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('S')), &model),
        Some(Message::Share)
    );
    // Unbound keys pass through untouched.
    assert_eq!(App::handle_key(key(KeyCode::Char('z')), &model), None);
    assert_eq!(App::handle_key(key(KeyCode::Char('/')), &model), None);
}

#[test]
fn test_space_is_consumed_while_playing() {
    let mut model = create_test_model();
    model.resize(40, 14);
    let model = update(model, Message::Open(ItemId(1)));
    let model = update(model, Message::Play);

    // Space maps to nothing while playing; in particular it never becomes
    // a grid paging message.
    assert_eq!(App::handle_key(key(KeyCode::Char(' ')), &model), None);
}

#[test]
fn test_grid_key_bindings() {
    let model = create_test_model();
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::OpenSelected)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Right), &model),
        Some(Message::CursorRight)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('c')), &model),
        Some(Message::NextCategory)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('x')), &model),
        Some(Message::ClearFilters)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Char('q')), &model),
        Some(Message::Quit)
    );
    assert_eq!(
        App::handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &model
        ),
        Some(Message::Quit)
    );
}

#[test]
fn test_search_input_keys_edit_the_term() {
    let model = create_test_model();
    let model = update(model, Message::ToggleSearch);

    assert_eq!(
        App::handle_key(key(KeyCode::Char('e')), &model),
        Some(Message::SearchInput("e".to_string()))
    );

    let model = update(model, Message::SearchInput("em".to_string()));
    assert_eq!(
        App::handle_key(key(KeyCode::Backspace), &model),
        Some(Message::SearchInput("e".to_string()))
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Enter), &model),
        Some(Message::SearchBlur)
    );
    assert_eq!(
        App::handle_key(key(KeyCode::Esc), &model),
        Some(Message::ToggleSearch)
    );
}

// Mouse dispatch

#[test]
fn test_click_on_card_opens_it() {
    let model = create_test_model();
    let area = crate::ui::grid_area(&model);
    let rect = model.grid.cell_rect(area, 0).unwrap();
    let mouse = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column: rect.x + 1,
        row: rect.y + 1,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(
        App::handle_mouse(mouse, &model),
        Some(Message::Open(ItemId(1)))
    );
}

#[test]
fn test_click_outside_open_viewer_closes_it() {
    let model = create_test_model();
    let model = update(model, Message::Open(ItemId(1)));
    let mouse = MouseEvent {
        kind: MouseEventKind::Up(MouseButton::Left),
        column: 0,
        row: 0,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(App::handle_mouse(mouse, &model), Some(Message::CloseViewer));
}

#[test]
fn test_wheel_is_swallowed_while_viewer_open() {
    let mut model = create_test_model();
    model.resize(40, 14);
    let model = update(model, Message::Open(ItemId(1)));
    let mouse = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 5,
        row: 5,
        modifiers: KeyModifiers::NONE,
    };
    assert_eq!(App::handle_mouse(mouse, &model), None);
}

// Toast feedback

#[test]
fn test_toast_lifecycle() {
    let mut model = create_test_model();
    model.show_toast(ToastLevel::Warning, "share failed");
    let (msg, level) = model.active_toast().expect("toast should be set");
    assert_eq!(msg, "share failed");
    assert_eq!(level, ToastLevel::Warning);
    assert!(!model.expire_toast(Instant::now()));
    assert!(model.expire_toast(Instant::now() + Duration::from_secs(5)));
    assert!(model.active_toast().is_none());
}

// Invariants under arbitrary message sequences

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_message() -> impl Strategy<Value = Message> {
        prop_oneof![
            Just(Message::CursorLeft),
            Just(Message::CursorRight),
            Just(Message::CursorUp),
            Just(Message::CursorDown),
            Just(Message::OpenSelected),
            (0..7u64).prop_map(|id| Message::Open(ItemId(id))),
            Just(Message::CloseViewer),
            Just(Message::Navigate(Direction::Next)),
            Just(Message::Navigate(Direction::Prev)),
            Just(Message::Play),
            Just(Message::ToggleFullscreen),
            prop_oneof![
                Just("all"),
                Just("wedding"),
                Just("film"),
                Just("documentary"),
                Just("nope")
            ]
            .prop_map(|c| Message::SetCategory(c.to_string())),
            Just(Message::NextCategory),
            Just(Message::PrevCategory),
            Just(Message::ClearFilters),
            Just(Message::ToggleSearch),
            "[a-z]{0,5}".prop_map(Message::SearchInput),
            Just(Message::SearchBlur),
            (1..6u64).prop_map(|id| Message::ThumbFailed(ItemId(id))),
            (20..200u16, 8..60u16).prop_map(|(w, h)| Message::Resize(w, h)),
            Just(Message::GridScrollDown(1)),
            Just(Message::GridScrollUp(1)),
            Just(Message::GridPageDown),
            Just(Message::GridPageUp),
        ]
    }

    proptest! {
        #[test]
        fn viewer_always_references_a_visible_item(
            msgs in proptest::collection::vec(arb_message(), 0..40),
        ) {
            let mut model = create_test_model();
            for msg in msgs {
                model = update(model, msg);

                if let Some(id) = model.viewer.open_id() {
                    let index = model.viewer.index().unwrap();
                    prop_assert_eq!(model.visible().get(index).copied(), Some(id));
                }
                prop_assert_eq!(model.is_scroll_locked(), model.viewer.is_open());
                if model.visible_len() > 0 {
                    prop_assert!(model.cursor < model.visible_len());
                }
            }
        }

        #[test]
        fn scroll_lock_cycles_stay_paired(
            msgs in proptest::collection::vec(arb_message(), 0..40),
        ) {
            let mut model = create_test_model();
            for msg in msgs {
                model = update(model, msg);
            }
            model.close_viewer();
            let (acquired, released) = model.scroll_lock_cycles();
            prop_assert_eq!(acquired, released);
        }
    }
}
