use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, update};
use crate::catalog::Catalog;
use crate::thumbs::ThumbnailStore;

impl App {
    /// Run the main event loop.
    ///
    /// The terminal session (raw mode, alternate screen, mouse capture) and
    /// the scroll lock are the two process-wide resources; both are
    /// acquired here and released on every way out, including errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded, terminal
    /// initialization fails, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Create the thumbnail picker BEFORE initializing the terminal
        // (it queries stdio).
        let picker = if self.images_enabled {
            crate::thumbs::create_picker()
        } else {
            None
        };

        let catalog = Catalog::load(&self.catalog_path)
            .with_context(|| format!("Failed to load catalog {}", self.catalog_path.display()))?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — showreel requires an interactive terminal")?;
        let size = terminal.size()?;

        let thumbs = ThumbnailStore::new(catalog.base_dir(), picker);
        let mut model = Model::new(catalog, (size.width, size.height), thumbs);
        model.share_cmd.clone_from(&self.share_cmd);
        if let Some(category) = &self.initial_category {
            let category = category.to_lowercase();
            if model.category_options.contains(&category) {
                model.filter.category = category;
                model.refresh_visible_set();
            }
        }

        let mouse = execute!(stdout(), EnableMouseCapture);
        let result = Self::event_loop(&mut terminal, &mut model);

        // Teardown counts as an exit path from Viewing: drop the viewer so
        // the scroll lock release stays paired no matter how the loop ended.
        model.close_viewer();
        if mouse.is_ok() {
            let _ = execute!(stdout(), DisableMouseCapture);
        }
        ratatui::restore();
        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;
        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(event::read()?, model) {
                    tracing::debug!(msg = ?msg, "transition");
                    let side_msg = msg.clone();
                    *model = update(std::mem::take(model), msg);
                    Self::handle_message_side_effects(model, &side_msg);
                    needs_render = true;
                }

                // Coalesce key-repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(event::read()?, model) {
                        let side_msg = msg.clone();
                        *model = update(std::mem::take(model), msg);
                        Self::handle_message_side_effects(model, &side_msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                model.load_visible_thumbs();
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
