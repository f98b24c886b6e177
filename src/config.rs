//! Configuration file support
//!
//! Loads settings from `$XDG_CONFIG_HOME/tagedit/config.toml`
//! (falling back to `~/.config/tagedit/config.toml`).
//!
//! Example:
//! ```toml
//! line-numbers = true
//! cursor-info = true
//! ignore-case = false
//! tab-width = 4
//! wheel-lines = 3
//! theme = "Night Mode"
//!
//! [tags]
//! keyword1 = "#ffa500"
//! match = { fg = "black", bg = "bright-yellow" }
//!
//! [keys]
//! "C-k" = "find-all"
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{EditorError, Result};
use crate::syntax::{Color, Style, Tag};

/// Named foreground/background pairs
pub const THEMES: &[(&str, &str, &str)] = &[
    ("Default", "default", "default"),
    ("Greygarious", "#83406A", "#D1D4D1"),
    ("Aquamarine", "#5B8340", "#D1E7E0"),
    ("Bold Beige", "#4B4620", "#FFF0E1"),
    ("Cobalt Blue", "#FFFFBB", "#3333AA"),
    ("Olive Green", "#D1E7E0", "#5B8340"),
    ("Night Mode", "#FFFFFF", "#000000"),
];

/// Look up a theme's base style by name
pub fn theme_style(name: &str) -> Option<Style> {
    THEMES
        .iter()
        .find(|(theme, _, _)| theme.eq_ignore_ascii_case(name))
        .and_then(|(_, fg, bg)| Some(Style::fg(Color::parse(fg)?).with_bg(Color::parse(bg)?)))
}

/// Configuration settings
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to show the line-number gutter
    pub show_line_numbers: bool,
    /// Whether to show the cursor location in the status line
    pub show_cursor_info: bool,
    /// Default for the find prompt's ignore-case toggle
    pub ignore_case: bool,
    /// Tab width for display
    pub tab_width: usize,
    /// Lines moved per wheel notch
    pub wheel_lines: usize,
    /// Theme name (see `THEMES`)
    pub theme: String,
    /// Per-tag style overrides
    pub tag_styles: HashMap<Tag, Style>,
    /// `key = command` binding overrides, checked when the key table is built
    pub key_bindings: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_line_numbers: true,
            show_cursor_info: true,
            ignore_case: false,
            tab_width: 4,
            wheel_lines: 3,
            theme: "Default".to_string(),
            tag_styles: HashMap::new(),
            key_bindings: Vec::new(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .map(|dir| dir.join("tagedit").join("config.toml"))
    }

    /// Load configuration
    ///
    /// An explicitly given file must exist and parse. Problems with the
    /// default file are logged and the defaults are used.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let contents = fs::read_to_string(path)
                .map_err(|e| EditorError::Config(format!("{}: {}", path.display(), e)))?;
            return Self::from_toml(&contents);
        }

        let Some(path) = Self::config_path() else {
            return Ok(Config::default());
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Self::from_toml(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring config file");
                Config::default()
            })),
            Err(_) => {
                debug!(path = %path.display(), "no config file");
                Ok(Config::default())
            }
        }
    }

    /// Build a config from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let table = Self::parse(contents)?;
        let mut config = Config::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Parse config file contents
    fn parse(contents: &str) -> Result<toml::Table> {
        contents
            .parse::<toml::Table>()
            .map_err(|e| EditorError::Config(e.to_string()))
    }

    /// Apply settings from a parsed config
    fn apply(&mut self, table: &toml::Table) -> Result<()> {
        if let Some(value) = get_bool(table, "line-numbers")? {
            self.show_line_numbers = value;
        }
        if let Some(value) = get_bool(table, "cursor-info")? {
            self.show_cursor_info = value;
        }
        if let Some(value) = get_bool(table, "ignore-case")? {
            self.ignore_case = value;
        }
        if let Some(value) = get_int(table, "tab-width")? {
            self.tab_width = value.clamp(1, 16) as usize;
        }
        if let Some(value) = get_int(table, "wheel-lines")? {
            self.wheel_lines = value.clamp(1, 50) as usize;
        }
        if let Some(value) = table.get("theme") {
            let name = value
                .as_str()
                .ok_or_else(|| EditorError::Config("theme must be a string".into()))?;
            if theme_style(name).is_none() {
                return Err(EditorError::Config(format!("unknown theme: {}", name)));
            }
            self.theme = name.to_string();
        }
        if let Some(value) = table.get("tags") {
            let tags = value
                .as_table()
                .ok_or_else(|| EditorError::Config("[tags] must be a table".into()))?;
            for (name, value) in tags {
                let tag = Tag::from_name(name)
                    .ok_or_else(|| EditorError::Config(format!("unknown tag: {}", name)))?;
                self.tag_styles.insert(tag, parse_style(name, value)?);
            }
        }
        if let Some(value) = table.get("keys") {
            let keys = value
                .as_table()
                .ok_or_else(|| EditorError::Config("[keys] must be a table".into()))?;
            for (key, command) in keys {
                let command = command
                    .as_str()
                    .ok_or_else(|| EditorError::Config(format!("{}: command must be a string", key)))?;
                self.key_bindings.push((key.clone(), command.to_string()));
            }
        }
        Ok(())
    }

    /// Style for a tag, honouring overrides
    pub fn style_for(&self, tag: Tag) -> Style {
        self.tag_styles
            .get(&tag)
            .copied()
            .unwrap_or_else(|| tag.default_style())
    }

    /// Base text style from the theme
    pub fn base_style(&self) -> Style {
        theme_style(&self.theme).unwrap_or_default()
    }
}

fn get_bool(table: &toml::Table, key: &str) -> Result<Option<bool>> {
    table
        .get(key)
        .map(|v| {
            v.as_bool()
                .ok_or_else(|| EditorError::Config(format!("{} must be true or false", key)))
        })
        .transpose()
}

fn get_int(table: &toml::Table, key: &str) -> Result<Option<i64>> {
    table
        .get(key)
        .map(|v| {
            v.as_integer()
                .ok_or_else(|| EditorError::Config(format!("{} must be an integer", key)))
        })
        .transpose()
}

fn parse_color(tag: &str, value: &str) -> Result<Color> {
    Color::parse(value).ok_or_else(|| EditorError::Config(format!("{}: bad color {:?}", tag, value)))
}

/// A tag style is either a foreground color string or a table
/// with `fg`, `bg`, `bold` and `underline` keys
fn parse_style(tag: &str, value: &toml::Value) -> Result<Style> {
    if let Some(color) = value.as_str() {
        return Ok(Style::fg(parse_color(tag, color)?));
    }
    let table = value
        .as_table()
        .ok_or_else(|| EditorError::Config(format!("{}: expected color or table", tag)))?;

    let mut style = Style::default();
    if let Some(fg) = table.get("fg").and_then(|v| v.as_str()) {
        style = style.with_fg(parse_color(tag, fg)?);
    }
    if let Some(bg) = table.get("bg").and_then(|v| v.as_str()) {
        style = style.with_bg(parse_color(tag, bg)?);
    }
    if get_bool(table, "bold")?.unwrap_or(false) {
        style = style.with_bold();
    }
    if get_bool(table, "underline")?.unwrap_or(false) {
        style = style.with_underline();
    }
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let contents = r#"
# Comment
line-numbers = false
cursor-info = false
ignore-case = true
tab-width = 2
wheel-lines = 5
theme = "Night Mode"
        "#;

        let config = Config::from_toml(contents).unwrap();
        assert!(!config.show_line_numbers);
        assert!(!config.show_cursor_info);
        assert!(config.ignore_case);
        assert_eq!(config.tab_width, 2);
        assert_eq!(config.wheel_lines, 5);
        assert_eq!(config.base_style().bg, Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_toml("").unwrap();
        assert!(config.show_line_numbers);
        assert!(config.show_cursor_info);
        assert_eq!(config.tab_width, 4);
        assert!(config.base_style().is_default());
        assert_eq!(config.style_for(Tag::Digit), Tag::Digit.default_style());
    }

    #[test]
    fn test_tag_overrides() {
        let contents = r##"
[tags]
digit = "cyan"
match = { fg = "black", bg = "#ffff00", bold = true }
"##;
        let config = Config::from_toml(contents).unwrap();
        assert_eq!(config.style_for(Tag::Digit), Style::fg(Color::Cyan));
        let style = config.style_for(Tag::Match);
        assert_eq!(style.fg, Color::Black);
        assert_eq!(style.bg, Color::Rgb(255, 255, 0));
        assert!(style.bold);
        assert_eq!(config.style_for(Tag::String), Tag::String.default_style());
    }

    #[test]
    fn test_key_bindings() {
        let config = Config::from_toml("[keys]\n\"C-k\" = \"find-all\"\n").unwrap();
        assert_eq!(
            config.key_bindings,
            vec![("C-k".to_string(), "find-all".to_string())]
        );
        assert!(Config::from_toml("[keys]\n\"C-k\" = 3\n").is_err());
    }

    #[test]
    fn test_values_are_clamped() {
        let config = Config::from_toml("tab-width = 99\nwheel-lines = 0").unwrap();
        assert_eq!(config.tab_width, 16);
        assert_eq!(config.wheel_lines, 1);
    }

    #[test]
    fn test_invalid_config() {
        assert!(Config::from_toml("line-numbers = \"yes\"").is_err());
        assert!(Config::from_toml("theme = \"Sepia\"").is_err());
        assert!(Config::from_toml("[tags]\nkeyword9 = \"red\"").is_err());
        assert!(Config::from_toml("[tags]\ndigit = \"octarine\"").is_err());
        assert!(Config::from_toml("not toml at all =").is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "line-numbers = false\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert!(!config.show_line_numbers);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(Config::load(Some(&missing)), Err(EditorError::Config(_))));
    }

    #[test]
    fn test_theme_lookup() {
        assert!(theme_style("night mode").is_some());
        assert_eq!(
            theme_style("Cobalt Blue").map(|s| s.bg),
            Some(Color::Rgb(0x33, 0x33, 0xaa))
        );
        assert!(theme_style("Nope").is_none());
    }
}
