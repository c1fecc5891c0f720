use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default flags persisted between sessions with `--save`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub no_images: bool,
    pub category: Option<String>,
    pub share_cmd: Option<String>,
}

impl ConfigFlags {
    /// Merge two flag sets; `other` wins for valued options.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            no_images: self.no_images || other.no_images,
            category: other.category.clone().or_else(|| self.category.clone()),
            share_cmd: other.share_cmd.clone().or_else(|| self.share_cmd.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("showreel").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("showreel")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("showreel").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("showreel")
                .join("config");
        }
    }

    PathBuf::from(".showreelrc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".showreelrc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# showreel defaults (saved with --save)".to_string());
    if flags.no_images {
        lines.push("--no-images".to_string());
    }
    if let Some(category) = &flags.category {
        lines.push(format!("--category {}", category));
    }
    if let Some(cmd) = &flags.share_cmd {
        lines.push(format!("--share-cmd {}", cmd));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--no-images" {
            flags.no_images = true;
        } else if token == "--category" {
            if let Some(next) = tokens.get(i + 1) {
                flags.category = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--category=") {
            flags.category = Some(value.to_string());
        } else if token == "--share-cmd" {
            if let Some(next) = tokens.get(i + 1) {
                flags.share_cmd = Some(next.clone());
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--share-cmd=") {
            flags.share_cmd = Some(value.to_string());
        }
        i += 1;
    }
    flags
}
