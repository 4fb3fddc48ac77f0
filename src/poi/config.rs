//! Point-of-interest layout and colours loaded from `config/poi.toml`.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

const CONFIG_PATH: &str = "config/poi.toml";
const MIN_RADIUS: f32 = 0.05;
/// Number keys 1-9 address points of interest.
pub const MAX_POINTS: usize = 9;

#[derive(Debug, Clone, Deserialize)]
struct RawPoiConfig {
    #[serde(default)]
    appearance: RawAppearance,
    #[serde(default = "default_points")]
    points: Vec<RawPoint>,
}

impl Default for RawPoiConfig {
    fn default() -> Self {
        Self {
            appearance: RawAppearance::default(),
            points: default_points(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawAppearance {
    radius: f32,
    idle_color: [f32; 3],
    selected_color: [f32; 3],
}

impl Default for RawAppearance {
    fn default() -> Self {
        Self {
            radius: 0.6,
            idle_color: [0.25, 0.45, 0.9],
            selected_color: [0.95, 0.55, 0.1],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawPoint {
    label: String,
    position: [f32; 3],
}

fn default_points() -> Vec<RawPoint> {
    [
        ("Well", [0.0, 1.0, 0.0]),
        ("Watchtower", [18.0, 4.0, -10.0]),
        ("Old oak", [-20.0, 1.5, -14.0]),
        ("Boathouse", [-16.0, 1.0, 24.0]),
        ("Behind the wall", [6.0, 1.0, -4.0]),
    ]
    .into_iter()
    .map(|(label, position)| RawPoint {
        label: label.to_string(),
        position,
    })
    .collect()
}

/// A point of interest to spawn.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiSpawn {
    pub label: String,
    pub position: Vec3,
}

/// Runtime configuration for points of interest.
#[derive(Resource, Debug, Clone)]
pub struct PoiSettings {
    pub radius: f32,
    pub idle_color: Color,
    pub selected_color: Color,
    pub points: Vec<PoiSpawn>,
}

impl PoiSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => Self::from_toml_str(&data).unwrap_or_else(|err| {
                warn!(
                    "Failed to parse {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPoiConfig::default().into()
            }),
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawPoiConfig::default().into()
            }
        }
    }

    pub fn from_toml_str(data: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<RawPoiConfig>(data).map(Into::into)
    }
}

impl Default for PoiSettings {
    fn default() -> Self {
        RawPoiConfig::default().into()
    }
}

impl From<RawPoiConfig> for PoiSettings {
    fn from(value: RawPoiConfig) -> Self {
        let appearance = value.appearance;
        if value.points.len() > MAX_POINTS {
            warn!(
                "{} points of interest configured; only the first {} are selectable",
                value.points.len(),
                MAX_POINTS
            );
        }

        let points = value
            .points
            .into_iter()
            .filter_map(sanitise_point)
            .take(MAX_POINTS)
            .collect();

        Self {
            radius: appearance.radius.max(MIN_RADIUS),
            idle_color: rgb(appearance.idle_color),
            selected_color: rgb(appearance.selected_color),
            points,
        }
    }
}

fn sanitise_point(point: RawPoint) -> Option<PoiSpawn> {
    let label = normalise_label(&point.label);
    let position = Vec3::from_array(point.position);
    if !position.is_finite() {
        warn!("Dropping point of interest '{}': non-finite position", label);
        return None;
    }
    Some(PoiSpawn { label, position })
}

fn normalise_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        "Unnamed".to_string()
    } else {
        trimmed.to_string()
    }
}

fn rgb(channels: [f32; 3]) -> Color {
    let [r, g, b] = channels.map(|channel| channel.clamp(0.0, 1.0));
    Color::srgb(r, g, b)
}
