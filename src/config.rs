#[cfg(not(target_os = "windows"))]
use std::{env, path::Path};
use std::{fs, path::PathBuf};

use tips_terminal_ui::Palette;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Extra tip directories, searched after the built-in ones.
    pub tips_dirs: Vec<PathBuf>,
    pub palette: Palette,
}

impl AppConfig {
    /// Reads the config file if there is one; any problem means defaults.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => {
                log::debug!("loaded config from {}", path.display());
                Self::from_contents(&contents)
            }
            Err(err) => {
                if path.exists() {
                    log::warn!("failed to read config file {}: {}", path.display(), err);
                }
                Self::default()
            }
        }
    }

    pub fn from_contents(contents: &str) -> Self {
        let mut config = Self::default();
        for (line_number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                log::warn!("config line {}: expected 'key = value'", line_number + 1);
                continue;
            };
            let key = key.trim();

            if key.eq_ignore_ascii_case("tips_dir") {
                if let Some(dir) = parse_string_value(value) {
                    config.tips_dirs.push(expand_home(&dir));
                }
            } else if key.eq_ignore_ascii_case("highlight_fg") {
                match parse_string_value(value).and_then(|v| Palette::parse_color(&v)) {
                    Some(color) => config.palette.active_fg = color,
                    None => log::warn!(
                        "config line {}: invalid highlight_fg {:?}",
                        line_number + 1,
                        value.trim()
                    ),
                }
            } else if key.eq_ignore_ascii_case("highlight_bg") {
                match parse_string_value(value).and_then(|v| Palette::parse_color(&v)) {
                    Some(color) => config.palette.active_bg = color,
                    None => log::warn!(
                        "config line {}: invalid highlight_bg {:?}",
                        line_number + 1,
                        value.trim()
                    ),
                }
            } else {
                log::warn!("config line {}: unknown key '{}'", line_number + 1, key);
            }
        }

        config
    }
}

fn parse_string_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let unquoted = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };

    let unquoted = unquoted.trim();
    if unquoted.is_empty() {
        return None;
    }

    Some(unquoted.to_string())
}

/// Replaces a leading `~` with the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

pub fn config_path() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().map(|p| p.join("tips").join("config.txt"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        if let Ok(xdg_config_home) = env::var("XDG_CONFIG_HOME")
            && !xdg_config_home.trim().is_empty()
        {
            return Some(Path::new(&xdg_config_home).join("tips/config.txt"));
        }
        dirs::home_dir().map(|p| p.join(".config").join("tips").join("config.txt"))
    }
}
