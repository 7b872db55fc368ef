//! Stone configuration system
//!
//! This crate loads layout settings from `stone.toml`, with environment
//! variables layered on top for quick overrides.

use serde::{Deserialize, Serialize};
use std::path::Path;
use stone_text::{Direction, FontManager, PunctuationMode, Script, Size, TextConfig};
use thiserror::Error;

/// Default configuration file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "stone.toml";

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct StoneConfig {
    /// Text styling and layout switches
    pub text: TextConfig,
    /// Per-script font overrides
    pub fonts: FontsConfig,
    /// Render box settings
    pub render: RenderConfig,
}

/// Font fallback overrides, one optional entry per script
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FontsConfig {
    pub latin: Option<ScriptFonts>,
    pub japanese: Option<ScriptFonts>,
    pub emoji: Option<ScriptFonts>,
}

/// Candidate fonts and size scale for one script
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScriptFonts {
    /// Font names tried in order; empty keeps the stock list
    pub names: Vec<String>,
    /// Size multiplier applied to fonts of this script
    pub scale: Option<f32>,
}

/// Render box configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Box width in pixels
    pub width: f32,
    /// Box height in pixels
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 240.0,
        }
    }
}

impl RenderConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl FontsConfig {
    fn for_script(&self, script: Script) -> Option<&ScriptFonts> {
        match script {
            Script::Latin => self.latin.as_ref(),
            Script::Japanese => self.japanese.as_ref(),
            Script::Emoji => self.emoji.as_ref(),
        }
    }

    /// Apply the overrides to a font manager and refresh its font ids.
    pub fn apply(&self, fonts: &mut FontManager) {
        for script in Script::ALL {
            let Some(overrides) = self.for_script(script) else {
                continue;
            };
            if !overrides.names.is_empty() {
                fonts.set_font_names(script, overrides.names.iter().map(String::as_str));
            }
            if let Some(scale) = overrides.scale {
                fonts.set_font_scale(script, scale);
            }
        }
        fonts.refresh();
    }
}

fn parse_flag(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl StoneConfig {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the stone.toml configuration file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from the default location (stone.toml in the current directory)
    /// or return default configuration if the file doesn't exist or can't be parsed
    pub fn load_or_default() -> Self {
        Self::load_from_file(CONFIG_FILE).unwrap_or_default()
    }

    /// Merge configuration with environment variables
    ///
    /// Environment variables take precedence over configuration file values.
    /// Values that fail to parse are ignored.
    pub fn merge_with_env(&mut self) {
        // Text settings
        if let Ok(val) = std::env::var("STONE_FONT_SIZE") {
            if let Ok(size) = val.parse::<f32>() {
                self.text.font_size = size;
            }
        }
        if let Ok(val) = std::env::var("STONE_DIRECTION") {
            match val.to_ascii_lowercase().as_str() {
                "horizontal" => self.text.direction = Direction::Horizontal,
                "vertical" => self.text.direction = Direction::Vertical,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("STONE_PUNCTUATION") {
            match val.to_ascii_lowercase().as_str() {
                "whole" => self.text.punctuation = PunctuationMode::Whole,
                "half" => self.text.punctuation = PunctuationMode::Half,
                "stone" => self.text.punctuation = PunctuationMode::Stone,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("STONE_KINSOKU") {
            self.text.kinsoku = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("STONE_AUTO_SHRINK") {
            self.text.auto_shrink = parse_flag(&val);
        }
        if let Ok(val) = std::env::var("STONE_MIN_SCALE") {
            if let Ok(scale) = val.parse::<f32>() {
                self.text.min_scale = scale;
            }
        }

        // Render box
        if let Ok(val) = std::env::var("STONE_RENDER_WIDTH") {
            if let Ok(width) = val.parse::<f32>() {
                self.render.width = width;
            }
        }
        if let Ok(val) = std::env::var("STONE_RENDER_HEIGHT") {
            if let Ok(height) = val.parse::<f32>() {
                self.render.height = height;
            }
        }
    }

    /// Load configuration with environment variable overrides
    ///
    /// 1. Load from stone.toml (or use defaults if not found)
    /// 2. Override with environment variables if present
    pub fn load() -> Self {
        let mut config = Self::load_or_default();
        config.merge_with_env();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoneConfig::default();
        assert_eq!(config.text.font_size, 17.0);
        assert_eq!(config.text.punctuation, PunctuationMode::Stone);
        assert_eq!(config.render.size(), Size::new(320.0, 240.0));
        assert!(config.fonts.japanese.is_none());
    }

    #[test]
    fn test_toml_serialization() {
        let mut config = StoneConfig::default();
        config.text.direction = Direction::Vertical;
        config.fonts.latin = Some(ScriptFonts {
            names: vec!["Menlo-Regular".into()],
            scale: Some(0.9),
        });
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: StoneConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file() {
        let parsed: StoneConfig = toml::from_str(
            "[text]\nauto_shrink = true\nmin_scale = 0.5\n\n[render]\nwidth = 100.0\n",
        )
        .unwrap();
        assert!(parsed.text.auto_shrink);
        assert_eq!(parsed.text.min_scale, 0.5);
        assert_eq!(parsed.render.width, 100.0);
        assert_eq!(parsed.render.height, 240.0);
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = StoneConfig::load_from_file("does-not-exist/stone.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }

    #[test]
    fn test_load_or_default() {
        // Should not panic even if stone.toml doesn't exist
        let config = StoneConfig::load_or_default();
        assert!(config.render.width > 0.0);
    }

    #[test]
    fn test_apply_fonts() {
        let fonts_config = FontsConfig {
            japanese: Some(ScriptFonts {
                names: vec!["NotoSansJP".into(), "HiraginoSans-W3".into()],
                scale: Some(1.1),
            }),
            ..FontsConfig::default()
        };
        let mut fonts = FontManager::new();
        fonts_config.apply(&mut fonts);
        assert_eq!(&*fonts.font_names(Script::Japanese)[0], "NotoSansJP");
        assert_eq!(fonts.font_scale(Script::Japanese), 1.1);
        assert_eq!(&*fonts.font_name(1), "NotoSansJP");
        assert_eq!(&*fonts.font_names(Script::Latin)[0], "HelveticaNeue");
    }

    #[test]
    fn test_merge_with_env() {
        unsafe {
            std::env::set_var("STONE_DIRECTION", "Vertical");
            std::env::set_var("STONE_KINSOKU", "false");
            std::env::set_var("STONE_RENDER_WIDTH", "64");
            std::env::set_var("STONE_MIN_SCALE", "not-a-number");
        }

        let mut config = StoneConfig::default();
        config.merge_with_env();

        assert_eq!(config.text.direction, Direction::Vertical);
        assert!(!config.text.kinsoku);
        assert_eq!(config.render.width, 64.0);
        assert_eq!(config.text.min_scale, 0.0);

        unsafe {
            std::env::remove_var("STONE_DIRECTION");
            std::env::remove_var("STONE_KINSOKU");
            std::env::remove_var("STONE_RENDER_WIDTH");
            std::env::remove_var("STONE_MIN_SCALE");
        }
    }
}
