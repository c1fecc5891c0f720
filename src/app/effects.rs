use std::io::{Write, stdout};
use std::process::{Command, Stdio};

use base64::Engine;

use crate::app::{App, Message, Model, ToastLevel};
use crate::embed::embed_url;

/// What gets handed to the share capability for the open item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl App {
    /// Perform the side effect a message calls for, after the pure update.
    ///
    /// Effects never feed state back into the controller: share and the
    /// playback hand-off are fire-and-forget, reported only as toasts.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        match msg {
            Message::Play => Self::hand_off_playback(model),
            Message::Share => Self::share_open_item(model),
            _ => {}
        }
    }

    fn hand_off_playback(model: &mut Model) {
        if !model.viewer.is_playing() {
            return;
        }
        let Some(item) = model.open_item() else {
            return;
        };
        let url = embed_url(&item.video_url);
        if url.is_empty() {
            model.show_toast(ToastLevel::Warning, "No video link for this item");
            return;
        }
        match open_external_link(&url) {
            Ok(()) => model.show_toast(ToastLevel::Info, format!("Playing via {url}")),
            Err(err) => {
                tracing::debug!(%url, %err, "player hand-off failed");
                model.show_toast(ToastLevel::Error, format!("Open failed: {err}"));
            }
        }
    }

    /// Share the open item: try the configured share command, fall back to
    /// copying the portfolio link to the clipboard. Never propagates an
    /// error to the caller.
    fn share_open_item(model: &mut Model) {
        let Some(item) = model.open_item() else {
            return;
        };
        let payload = SharePayload {
            title: item.title.clone(),
            text: item.description.clone(),
            url: model.catalog.share_link(),
        };

        if let Some(cmd) = model.share_cmd.clone() {
            // Fire-and-forget: the command's own outcome is ignored, only a
            // failure to spawn falls through to the clipboard.
            if spawn_share_command(&cmd, &payload).is_ok() {
                model.show_toast(ToastLevel::Info, format!("Shared via {cmd}"));
                return;
            }
            tracing::debug!(cmd, "share command unavailable, copying link");
        }

        match copy_to_clipboard(&payload.url) {
            Ok(()) => model.show_toast(ToastLevel::Info, "Link copied to clipboard"),
            Err(err) => model.show_toast(ToastLevel::Warning, format!("Share failed: {err}")),
        }
    }
}

fn spawn_share_command(cmd: &str, payload: &SharePayload) -> std::io::Result<()> {
    Command::new(cmd)
        .arg(&payload.title)
        .arg(&payload.text)
        .arg(&payload.url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}

fn open_external_link(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        return Ok(());
    }
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    {
        Command::new("xdg-open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
