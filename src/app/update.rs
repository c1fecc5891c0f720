use crate::app::Model;
use crate::catalog::ItemId;
use crate::gallery;
use crate::viewer::Direction;

/// All possible events and actions in the application.
///
/// These represent user input and internal actions. Pointer and keyboard
/// entry points produce the same messages, so both paths share one set of
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Grid
    /// Move the cursor left within the visible set
    CursorLeft,
    /// Move the cursor right within the visible set
    CursorRight,
    /// Move the cursor up one grid row
    CursorUp,
    /// Move the cursor down one grid row
    CursorDown,
    /// Scroll the grid by n rows (mouse wheel)
    GridScrollUp(usize),
    /// Scroll the grid down by n rows (mouse wheel)
    GridScrollDown(usize),
    /// Page the grid up
    GridPageUp,
    /// Page the grid down
    GridPageDown,

    // Viewer
    /// Open the item under the cursor
    OpenSelected,
    /// Open a specific item (mouse click on its card)
    Open(ItemId),
    /// Close the viewer
    CloseViewer,
    /// Move to the adjacent item, wrapping at both ends
    Navigate(Direction),
    /// Start playback (paused state only)
    Play,
    /// Flip the viewer's fullscreen flag
    ToggleFullscreen,
    /// Share the open item
    Share,

    // Filter & search
    /// Select a category filter
    SetCategory(String),
    /// Cycle to the next category option
    NextCategory,
    /// Cycle to the previous category option
    PrevCategory,
    /// Reset category and search term to defaults
    ClearFilters,
    /// Toggle search activation; deactivating clears the term
    ToggleSearch,
    /// Replace the search term
    SearchInput(String),
    /// Unfocus the search input; deactivates only when the term is empty
    SearchBlur,

    // Resources
    /// A thumbnail failed to load for an item
    ThumbFailed(ItemId),

    // Window
    /// Terminal resized
    Resize(u16, u16),

    // Application
    /// Toggle help overlay
    ToggleHelp,
    /// Hide help overlay
    HideHelp,
    /// Quit the application
    Quit,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here. Side
/// effects (share, playback hand-off, clipboard) are performed separately,
/// keyed on the message, after the transition.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Grid
        Message::CursorLeft => model.move_cursor(-1),
        Message::CursorRight => model.move_cursor(1),
        Message::CursorUp => {
            let cols = model.grid.columns() as isize;
            model.move_cursor(-cols);
        }
        Message::CursorDown => {
            let cols = model.grid.columns() as isize;
            model.move_cursor(cols);
        }
        Message::GridScrollUp(rows) => {
            let rows = isize::try_from(rows).unwrap_or(isize::MAX);
            model.scroll_grid(-rows);
        }
        Message::GridScrollDown(rows) => {
            let rows = isize::try_from(rows).unwrap_or(isize::MAX);
            model.scroll_grid(rows);
        }
        Message::GridPageUp => model.page_grid(false),
        Message::GridPageDown => model.page_grid(true),

        // Viewer
        Message::OpenSelected => {
            if let Some(id) = model.visible().get(model.cursor).copied() {
                model.open_viewer(id);
            }
        }
        Message::Open(id) => model.open_viewer(id),
        Message::CloseViewer => model.close_viewer(),
        Message::Navigate(direction) => model.navigate_viewer(direction),
        Message::Play => {
            model.viewer.play();
        }
        Message::ToggleFullscreen => {
            model.viewer.toggle_fullscreen();
        }
        // Share: no state transition; handled entirely in effects.
        Message::Share => {}

        // Filter & search
        Message::SetCategory(category) => {
            if model.category_options.contains(&category) {
                model.filter.category = category;
                model.refresh_visible_set();
            }
        }
        Message::NextCategory => {
            model.filter.category =
                gallery::next_category(&model.category_options, &model.filter.category);
            model.refresh_visible_set();
        }
        Message::PrevCategory => {
            model.filter.category =
                gallery::prev_category(&model.category_options, &model.filter.category);
            model.refresh_visible_set();
        }
        Message::ClearFilters => {
            model.filter.clear();
            model.refresh_visible_set();
        }
        Message::ToggleSearch => {
            if model.search_active {
                model.search_active = false;
                model.search_focused = false;
                model.filter.search_term.clear();
                model.refresh_visible_set();
            } else {
                model.search_active = true;
                model.search_focused = true;
            }
        }
        Message::SearchInput(term) => {
            if model.search_active {
                model.filter.search_term = term;
                model.refresh_visible_set();
            }
        }
        Message::SearchBlur => {
            model.search_focused = false;
            // Losing focus with text in the box leaves the search applied;
            // only an empty term deactivates the bar.
            if model.filter.search_term.is_empty() {
                model.search_active = false;
            }
        }

        // Resources
        Message::ThumbFailed(id) => model.mark_thumb_failed(id),

        // Window
        Message::Resize(width, height) => model.resize(width, height),

        // Application
        Message::ToggleHelp => model.help_visible = !model.help_visible,
        Message::HideHelp => model.help_visible = false,
        Message::Quit => model.should_quit = true,
    }
    model
}
