//! Style configuration
//!
//! YAML-based mapping from style category to font and colors, with
//! compile-time embedded built-in styles and user-defined styles from the
//! config directory.
//!
//! Style loading priority:
//! 1. User config: `~/.config/token-markdown/styles/{id}.yaml`
//! 2. Embedded: built-in styles compiled into the binary

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use super::{StyleCategory, StyleRun};

// Embed style YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../../styles/default-dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../../styles/default-light.yaml");

/// Registry of built-in styles as (id, yaml)
pub const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("default-dark", DEFAULT_DARK_YAML),
    ("default-light", DEFAULT_LIGHT_YAML),
];

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        if !s.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|e| e.to_string())
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Renderer-agnostic font reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FontRef {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub monospace: bool,
    /// Size relative to the base editor font
    pub scale: f32,
}

impl Default for FontRef {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            strikethrough: false,
            monospace: false,
            scale: 1.0,
        }
    }
}

/// Resolved font and colors for one category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryStyle {
    pub font: FontRef,
    pub foreground: Color,
    pub background: Color,
}

/// Replacement glyphs for list and task markers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSettings {
    pub enabled: bool,
    pub bullet: String,
    pub task_checked: String,
    pub task_unchecked: String,
}

impl Default for GlyphSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            bullet: "•".to_string(),
            task_checked: "☑".to_string(),
            task_unchecked: "☐".to_string(),
        }
    }
}

/// Raw style data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StyleData {
    pub version: u32,
    pub name: String,
    pub normal: CategoryStyleData,
    #[serde(default)]
    pub glyphs: GlyphData,
    #[serde(default)]
    pub categories: HashMap<StyleCategory, CategoryStyleData>,
}

/// Per-category overrides (raw strings from YAML); unset fields inherit
/// from the normal style
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryStyleData {
    #[serde(default)]
    pub foreground: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub underline: Option<bool>,
    #[serde(default)]
    pub strikethrough: Option<bool>,
    #[serde(default)]
    pub monospace: Option<bool>,
    #[serde(default)]
    pub scale: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GlyphData {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub bullet: Option<String>,
    #[serde(default)]
    pub task_checked: Option<String>,
    #[serde(default)]
    pub task_unchecked: Option<String>,
}

impl CategoryStyleData {
    fn resolve(&self, base: &CategoryStyle) -> Result<CategoryStyle, String> {
        Ok(CategoryStyle {
            font: FontRef {
                bold: self.bold.unwrap_or(base.font.bold),
                italic: self.italic.unwrap_or(base.font.italic),
                underline: self.underline.unwrap_or(base.font.underline),
                strikethrough: self.strikethrough.unwrap_or(base.font.strikethrough),
                monospace: self.monospace.unwrap_or(base.font.monospace),
                scale: self.scale.unwrap_or(base.font.scale),
            },
            foreground: self
                .foreground
                .as_deref()
                .map(Color::from_hex)
                .transpose()?
                .unwrap_or(base.foreground),
            background: self
                .background
                .as_deref()
                .map(Color::from_hex)
                .transpose()?
                .unwrap_or(base.background),
        })
    }
}

/// Category → style mapping consumed by the style projector.
///
/// Categories without an entry fall back to the normal-text style.
#[derive(Debug, Clone)]
pub struct StyleConfiguration {
    pub name: String,
    normal: CategoryStyle,
    styles: HashMap<StyleCategory, CategoryStyle>,
    pub glyphs: GlyphSettings,
}

impl StyleConfiguration {
    /// Load styles from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: StyleData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load styles from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read style file {}: {}", path.display(), e))?;
        Self::from_yaml(&content)
    }

    /// Load a built-in style by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let (_, yaml) = BUILTIN_STYLES
            .iter()
            .find(|(builtin_id, _)| *builtin_id == id)
            .ok_or_else(|| format!("Unknown style id: {}", id))?;
        Self::from_yaml(yaml)
    }

    /// Load styles by id with priority: user → builtin
    pub fn load(id: &str) -> Result<Self, String> {
        if let Some(user_dir) = crate::config_paths::styles_dir() {
            let user_path = user_dir.join(format!("{}.yaml", id));
            if user_path.exists() {
                tracing::info!("Loading user style from {}", user_path.display());
                return Self::from_file(&user_path);
            }
        }

        tracing::info!("Loading builtin style: {}", id);
        Self::from_builtin(id)
    }

    /// Convert raw style data to a resolved configuration
    pub fn from_data(data: StyleData) -> Result<Self, String> {
        let fallback = CategoryStyle {
            font: FontRef::default(),
            foreground: Color::rgb(0xD4, 0xD4, 0xD4),
            background: Color::TRANSPARENT,
        };
        let normal = data.normal.resolve(&fallback)?;

        let mut styles = HashMap::with_capacity(data.categories.len());
        for (category, style) in &data.categories {
            styles.insert(*category, style.resolve(&normal)?);
        }

        let defaults = GlyphSettings::default();
        let glyphs = GlyphSettings {
            enabled: data.glyphs.enabled.unwrap_or(defaults.enabled),
            bullet: data.glyphs.bullet.unwrap_or(defaults.bullet),
            task_checked: data.glyphs.task_checked.unwrap_or(defaults.task_checked),
            task_unchecked: data.glyphs.task_unchecked.unwrap_or(defaults.task_unchecked),
        };

        Ok(Self {
            name: data.name,
            normal,
            styles,
            glyphs,
        })
    }

    /// Default dark styles (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        match Self::from_yaml(DEFAULT_DARK_YAML) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Embedded default style failed to load: {}", e);
                Self {
                    name: "Default Dark".to_string(),
                    normal: CategoryStyle {
                        font: FontRef::default(),
                        foreground: Color::rgb(0xD4, 0xD4, 0xD4),
                        background: Color::TRANSPARENT,
                    },
                    styles: HashMap::new(),
                    glyphs: GlyphSettings::default(),
                }
            }
        }
    }

    /// The normal-text style used as the consumer's base fill
    pub fn normal(&self) -> &CategoryStyle {
        &self.normal
    }

    /// Style for `category`, falling back to normal text
    pub fn style_for(&self, category: StyleCategory) -> &CategoryStyle {
        if category == StyleCategory::Normal {
            return &self.normal;
        }
        self.styles.get(&category).unwrap_or(&self.normal)
    }

    /// Override the style of one category
    pub fn set_style(&mut self, category: StyleCategory, style: CategoryStyle) {
        if category == StyleCategory::Normal {
            self.normal = style;
        } else {
            self.styles.insert(category, style);
        }
    }

    /// Enable or disable marker glyph replacement
    pub fn set_glyphs_enabled(&mut self, enabled: bool) {
        self.glyphs.enabled = enabled;
    }

    /// Replacement glyph for a marker category, if replacement is enabled
    pub fn replacement_for(&self, category: StyleCategory) -> Option<String> {
        if !self.glyphs.enabled {
            return None;
        }
        match category {
            StyleCategory::ListBullet => Some(self.glyphs.bullet.clone()),
            StyleCategory::TaskChecked => Some(self.glyphs.task_checked.clone()),
            StyleCategory::TaskUnchecked => Some(self.glyphs.task_unchecked.clone()),
            _ => None,
        }
    }

    /// Build a run with this configuration's font and colors for `category`
    pub fn make_run(&self, offset: usize, length: usize, category: StyleCategory) -> StyleRun {
        let style = self.style_for(category);
        StyleRun {
            offset,
            length,
            category,
            font: style.font,
            foreground: style.foreground,
            background: style.background,
            language: None,
            url: None,
            replacement: None,
        }
    }
}

impl Default for StyleConfiguration {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_hex_6() {
        let color = Color::from_hex("#1E1E1E").unwrap();
        assert_eq!(color, Color::rgb(0x1E, 0x1E, 0x1E));
    }

    #[test]
    fn test_color_from_hex_8() {
        let color = Color::from_hex("#1E1E1E80").unwrap();
        assert_eq!(color.a, 0x80);
    }

    #[test]
    fn test_color_from_hex_invalid() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_color_to_hex() {
        assert_eq!(Color::rgb(0x56, 0x9C, 0xD6).to_hex(), "#569CD6");
        assert_eq!(Color::TRANSPARENT.to_hex(), "#00000000");
    }

    #[test]
    fn test_builtin_styles_parse() {
        for (id, yaml) in BUILTIN_STYLES {
            let config = StyleConfiguration::from_yaml(yaml)
                .unwrap_or_else(|e| panic!("Failed to parse style '{}': {}", id, e));
            assert!(!config.name.is_empty());
        }
    }

    #[test]
    fn test_missing_category_falls_back_to_normal() {
        let yaml = r##"
version: 1
name: Minimal
normal:
  foreground: "#101010"
categories:
  strong:
    bold: true
"##;
        let config = StyleConfiguration::from_yaml(yaml).unwrap();
        let strong = config.style_for(StyleCategory::Strong);
        assert!(strong.font.bold);
        assert_eq!(strong.foreground, Color::rgb(0x10, 0x10, 0x10));

        let link = config.style_for(StyleCategory::Link);
        assert_eq!(link, config.normal());
    }

    #[test]
    fn test_unknown_category_rejected() {
        let yaml = r##"
version: 1
name: Broken
normal: {}
categories:
  sparkles:
    bold: true
"##;
        assert!(StyleConfiguration::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_glyph_replacement_toggle() {
        let mut config = StyleConfiguration::default();
        assert_eq!(
            config.replacement_for(StyleCategory::ListBullet).as_deref(),
            Some("•")
        );
        assert_eq!(config.replacement_for(StyleCategory::Strong), None);

        config.set_glyphs_enabled(false);
        assert_eq!(config.replacement_for(StyleCategory::TaskChecked), None);
    }

    #[test]
    fn test_set_style_overrides() {
        let mut config = StyleConfiguration::default();
        let style = CategoryStyle {
            font: FontRef {
                italic: true,
                ..FontRef::default()
            },
            foreground: Color::rgb(1, 2, 3),
            background: Color::TRANSPARENT,
        };
        config.set_style(StyleCategory::Emphasis, style);
        assert_eq!(*config.style_for(StyleCategory::Emphasis), style);
    }

    #[test]
    fn test_unknown_builtin() {
        assert!(StyleConfiguration::from_builtin("nonexistent").is_err());
        assert!(StyleConfiguration::from_builtin("default-light").is_ok());
    }
}
