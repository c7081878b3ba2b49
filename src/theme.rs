//! Theme system for the viewer chrome
//!
//! Provides YAML-based theming with compile-time embedded themes and
//! user-defined themes from the config directory. Residue colors are not
//! themed; they come from the color scheme tables in `msa::scheme`.
//!
//! Theme loading priority:
//! 1. User config: `themes/{id}.yaml` in the msaboard directory
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "light")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[BuiltinTheme {
    id: "light",
    yaml: LIGHT_YAML,
}];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    if let Some(dirs) = crate::config::AppDirs::locate() {
        let user_path = dirs.theme_file(id);
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Return a new color with the specified alpha value
    pub const fn with_alpha(&self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let s = s.trim_start_matches('#');
        let channel = |i: usize| {
            s.get(i..i + 2)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|hex| u8::from_str_radix(hex, 16).map_err(|e| e.to_string()))
        };
        match s.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

/// UI theme colors (raw strings from YAML)
#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub canvas: CanvasThemeData,
    pub toolbar: ToolbarThemeData,
    pub panel: PanelThemeData,
    pub grid: GridThemeData,
    pub gutter: GutterThemeData,
    pub tooltip: TooltipThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CanvasThemeData {
    pub background: String,
    pub placeholder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolbarThemeData {
    pub button_background: String,
    pub button_hover: String,
    pub button_foreground: String,
    pub status_foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelThemeData {
    pub background: String,
    pub border: String,
    pub header_background: String,
    pub header_foreground: String,
    pub remove_foreground: String,
    pub resize_grip: String,
    #[serde(default)]
    pub drag_preview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GridThemeData {
    pub foreground: String,
    pub highlight: String,
    pub ruler_background: String,
    pub ruler_foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GutterThemeData {
    pub background: String,
    pub foreground: String,
    pub hover_background: String,
    pub border: String,
    pub handle: String,
    #[serde(default)]
    pub handle_active: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TooltipThemeData {
    pub background: String,
    pub foreground: String,
    pub secondary: String,
    pub border: String,
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: String,
    pub canvas: CanvasTheme,
    pub toolbar: ToolbarTheme,
    pub panel: PanelTheme,
    pub grid: GridTheme,
    pub gutter: GutterTheme,
    pub tooltip: TooltipTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasTheme {
    pub background: Color,
    /// Empty-state hint text
    pub placeholder: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarTheme {
    pub button_background: Color,
    pub button_hover: Color,
    pub button_foreground: Color,
    /// Transient status messages (rejected files)
    pub status_foreground: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelTheme {
    pub background: Color,
    pub border: Color,
    pub header_background: Color,
    pub header_foreground: Color,
    pub remove_foreground: Color,
    pub resize_grip: Color,
    /// Outline drawn at the target placement during a layout drag
    pub drag_preview: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridTheme {
    /// Residue glyph color
    pub foreground: Color,
    /// Blended over cells of the hovered column
    pub highlight: Color,
    pub ruler_background: Color,
    pub ruler_foreground: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GutterTheme {
    pub background: Color,
    pub foreground: Color,
    pub hover_background: Color,
    pub border: Color,
    pub handle: Color,
    pub handle_active: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipTheme {
    pub background: Color,
    pub foreground: Color,
    pub secondary: Color,
    pub border: Color,
}

fn optional(value: &Option<String>, fallback: Color) -> Result<Color, String> {
    value
        .as_ref()
        .map(|s| Color::from_hex(s))
        .transpose()
        .map(|c| c.unwrap_or(fallback))
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let ui = data.ui;
        Ok(Theme {
            name: data.name,
            canvas: CanvasTheme {
                background: Color::from_hex(&ui.canvas.background)?,
                placeholder: Color::from_hex(&ui.canvas.placeholder)?,
            },
            toolbar: ToolbarTheme {
                button_background: Color::from_hex(&ui.toolbar.button_background)?,
                button_hover: Color::from_hex(&ui.toolbar.button_hover)?,
                button_foreground: Color::from_hex(&ui.toolbar.button_foreground)?,
                status_foreground: Color::from_hex(&ui.toolbar.status_foreground)?,
            },
            panel: PanelTheme {
                background: Color::from_hex(&ui.panel.background)?,
                border: Color::from_hex(&ui.panel.border)?,
                header_background: Color::from_hex(&ui.panel.header_background)?,
                header_foreground: Color::from_hex(&ui.panel.header_foreground)?,
                remove_foreground: Color::from_hex(&ui.panel.remove_foreground)?,
                resize_grip: Color::from_hex(&ui.panel.resize_grip)?,
                drag_preview: optional(
                    &ui.panel.drag_preview,
                    Color::rgba(0x3B, 0x82, 0xF6, 0x33),
                )?,
            },
            grid: GridTheme {
                foreground: Color::from_hex(&ui.grid.foreground)?,
                highlight: Color::from_hex(&ui.grid.highlight)?,
                ruler_background: Color::from_hex(&ui.grid.ruler_background)?,
                ruler_foreground: Color::from_hex(&ui.grid.ruler_foreground)?,
            },
            gutter: GutterTheme {
                background: Color::from_hex(&ui.gutter.background)?,
                foreground: Color::from_hex(&ui.gutter.foreground)?,
                hover_background: Color::from_hex(&ui.gutter.hover_background)?,
                border: Color::from_hex(&ui.gutter.border)?,
                handle: Color::from_hex(&ui.gutter.handle)?,
                handle_active: optional(
                    &ui.gutter.handle_active,
                    Color::rgba(0x3B, 0x82, 0xF6, 0x66),
                )?,
            },
            tooltip: TooltipTheme {
                background: Color::from_hex(&ui.tooltip.background)?,
                foreground: Color::from_hex(&ui.tooltip.foreground)?,
                secondary: Color::from_hex(&ui.tooltip.secondary)?,
                border: Color::from_hex(&ui.tooltip.border)?,
            },
        })
    }

    /// Default light theme (YAML-backed with Rust fallback)
    pub fn default_light() -> Self {
        match Theme::from_yaml(LIGHT_YAML) {
            Ok(theme) => theme,
            Err(_) => Theme {
                name: "Light".to_string(),
                canvas: CanvasTheme {
                    background: Color::rgb(0xF9, 0xFA, 0xFB),
                    placeholder: Color::rgb(0x9C, 0xA3, 0xAF),
                },
                toolbar: ToolbarTheme {
                    button_background: Color::rgb(0xBB, 0xF7, 0xD0),
                    button_hover: Color::rgb(0x86, 0xEF, 0xAC),
                    button_foreground: Color::rgb(0x11, 0x18, 0x27),
                    status_foreground: Color::rgb(0xB9, 0x1C, 0x1C),
                },
                panel: PanelTheme {
                    background: Color::rgb(0xFF, 0xFF, 0xFF),
                    border: Color::rgb(0xD1, 0xD5, 0xDB),
                    header_background: Color::rgb(0xF3, 0xF4, 0xF6),
                    header_foreground: Color::rgb(0x11, 0x18, 0x27),
                    remove_foreground: Color::rgb(0xB9, 0x1C, 0x1C),
                    resize_grip: Color::rgb(0x9C, 0xA3, 0xAF),
                    drag_preview: Color::rgba(0x3B, 0x82, 0xF6, 0x33),
                },
                grid: GridTheme {
                    foreground: Color::rgb(0x11, 0x18, 0x27),
                    highlight: Color::rgba(0x00, 0x00, 0x00, 0x2E),
                    ruler_background: Color::rgb(0xFF, 0xFF, 0xFF),
                    ruler_foreground: Color::rgb(0x4B, 0x55, 0x63),
                },
                gutter: GutterTheme {
                    background: Color::rgb(0xFF, 0xFF, 0xFF),
                    foreground: Color::rgb(0x11, 0x18, 0x27),
                    hover_background: Color::rgb(0xFE, 0xF9, 0xC3),
                    border: Color::rgb(0xF3, 0xF4, 0xF6),
                    handle: Color::rgba(0x00, 0x00, 0x00, 0x05),
                    handle_active: Color::rgba(0x3B, 0x82, 0xF6, 0x66),
                },
                tooltip: TooltipTheme {
                    background: Color::rgb(0xF3, 0xF4, 0xF6),
                    foreground: Color::rgb(0x11, 0x18, 0x27),
                    secondary: Color::rgb(0x4B, 0x55, 0x63),
                    border: Color::rgb(0x9C, 0xA3, 0xAF),
                },
            },
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_light_parses() {
        let theme = Theme::from_builtin("light").expect("embedded theme parses");
        assert_eq!(theme.name, "Light");
        assert_eq!(theme.gutter.hover_background, Color::rgb(0xFE, 0xF9, 0xC3));
        assert_eq!(theme.grid.highlight.a, 0x2E);
    }

    #[test]
    fn test_unknown_builtin_is_error() {
        assert!(Theme::from_builtin("nope").is_err());
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#102030").unwrap(), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(Color::from_hex("10203040").unwrap(), Color::rgba(0x10, 0x20, 0x30, 0x40));
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zz0000").is_err());
    }

    #[test]
    fn test_argb_packing() {
        assert_eq!(Color::rgba(1, 2, 3, 4).to_argb_u32(), 0x04010203);
    }
}
