//! Pointer configuration loaded from `config/pointer.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use super::viewport::ViewportInsets;

const CONFIG_PATH: &str = "config/pointer.toml";
const MIN_INDICATOR_SIZE: f32 = 4.0;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawPointerConfig {
    #[serde(default)]
    indicator: RawIndicator,
    #[serde(default)]
    viewport: RawViewport,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawIndicator {
    width: f32,
    height: f32,
    body_color: [f32; 4],
    tip_color: [f32; 4],
    start_enabled: bool,
}

impl Default for RawIndicator {
    fn default() -> Self {
        Self {
            width: 40.0,
            height: 40.0,
            body_color: [0.95, 0.55, 0.1, 0.9],
            tip_color: [1.0, 1.0, 1.0, 1.0],
            start_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawViewport {
    inset_top: f32,
    inset_bottom: f32,
    inset_left: f32,
    inset_right: f32,
    keep_inside_edges: bool,
}

impl Default for RawViewport {
    fn default() -> Self {
        Self {
            inset_top: 0.0,
            inset_bottom: 0.0,
            inset_left: 0.0,
            inset_right: 0.0,
            keep_inside_edges: true,
        }
    }
}

/// Runtime configuration for the indicator and the viewport it lives in.
#[derive(Resource, Debug, Clone)]
pub struct PointerSettings {
    /// Indicator footprint in logical pixels.
    pub footprint: Vec2,
    pub body_color: Color,
    pub tip_color: Color,
    pub start_enabled: bool,
    pub insets: ViewportInsets,
    /// Shrinks the extent by half the footprint so clamped indicators stay on screen.
    pub keep_inside_edges: bool,
}

impl PointerSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPointerConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPointerConfig::default().into()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawPointerConfig>(data).map(Into::into)
    }

    /// Margin applied on every edge of the viewport extent.
    pub fn edge_margin(&self) -> Vec2 {
        if self.keep_inside_edges {
            self.footprint * 0.5
        } else {
            Vec2::ZERO
        }
    }
}

impl Default for PointerSettings {
    fn default() -> Self {
        RawPointerConfig::default().into()
    }
}

impl From<RawPointerConfig> for PointerSettings {
    fn from(value: RawPointerConfig) -> Self {
        let indicator = value.indicator;
        let viewport = value.viewport;

        Self {
            footprint: Vec2::new(
                sanitise_size(indicator.width),
                sanitise_size(indicator.height),
            ),
            body_color: rgba(indicator.body_color),
            tip_color: rgba(indicator.tip_color),
            start_enabled: indicator.start_enabled,
            insets: ViewportInsets {
                top: viewport.inset_top.max(0.0),
                bottom: viewport.inset_bottom.max(0.0),
                left: viewport.inset_left.max(0.0),
                right: viewport.inset_right.max(0.0),
            },
            keep_inside_edges: viewport.keep_inside_edges,
        }
    }
}

fn sanitise_size(value: f32) -> f32 {
    if value.is_finite() {
        value.max(MIN_INDICATOR_SIZE)
    } else {
        MIN_INDICATOR_SIZE
    }
}

fn rgba(channels: [f32; 4]) -> Color {
    let [r, g, b, a] = channels.map(|channel| channel.clamp(0.0, 1.0));
    Color::srgba(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_falls_back_to_defaults() {
        let settings = PointerSettings::default();
        assert_eq!(settings.footprint, Vec2::new(40.0, 40.0));
        assert_eq!(settings.edge_margin(), Vec2::new(20.0, 20.0));
        assert!(settings.start_enabled);
        assert_eq!(settings.insets, ViewportInsets::default());
    }

    #[test]
    fn partial_toml_overrides_sections() {
        let settings = PointerSettings::from_toml_str(
            r#"
            [indicator]
            width = 64.0

            [viewport]
            inset_top = 96.0
            inset_bottom = -10.0
            keep_inside_edges = false
            "#,
        )
        .expect("valid toml");

        assert_eq!(settings.footprint, Vec2::new(64.0, 40.0));
        assert_eq!(settings.insets.top, 96.0);
        assert_eq!(settings.insets.bottom, 0.0);
        assert_eq!(settings.edge_margin(), Vec2::ZERO);
    }

    #[test]
    fn tiny_or_invalid_sizes_are_raised() {
        let settings = PointerSettings::from_toml_str(
            r#"
            [indicator]
            width = 0.0
            height = -3.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(settings.footprint, Vec2::splat(MIN_INDICATOR_SIZE));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(PointerSettings::from_toml_str("[indicator\nwidth = ").is_err());
    }
}
