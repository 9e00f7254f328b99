use crate::wheel::{Color, ItemLabel, Palette};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, DurationMilliSeconds, SerializeDisplay, serde_as};
use std::path::PathBuf;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// When a wheel reports that it started turning.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum StartedNotification {
    /// First non-zero rotation after a pointer-down or a spin request.
    #[default]
    #[strum(to_string = "OncePerGesture", serialize = "once")]
    OncePerGesture,
    /// Every non-zero rotation.
    #[strum(to_string = "EveryChange", serialize = "every")]
    EveryChange,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Behavior {
    pub started: StartedNotification,
    /// Report the selection when a drag that moved the wheel is released.
    pub notify_on_release: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct StrokeStyle {
    pub width: f64,
    /// `None` draws no stroke.
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextStyle {
    pub size: f64,
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 25.0,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ArrowStyle {
    pub enabled: bool,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl Default for ArrowStyle {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 50.0,
            height: 50.0,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelStyle {
    pub stroke: StrokeStyle,
    pub text: TextStyle,
    pub arrow: ArrowStyle,
}

#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpinConfig {
    pub max_angle: f64,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "interval_ms")]
    pub interval: Duration,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            max_angle: 50.0,
            duration: Duration::from_millis(3000),
            interval: Duration::from_millis(50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    pub palette: Vec<Color>,
    pub items: Vec<ItemLabel>,
    pub stroke: StrokeStyle,
    pub text: TextStyle,
    pub arrow: ArrowStyle,
    pub behavior: Behavior,
    pub spin: SpinConfig,
}

impl WheelConfig {
    pub fn style(&self) -> WheelStyle {
        WheelStyle {
            stroke: self.stroke,
            text: self.text,
            arrow: self.arrow,
        }
    }

    /// An empty palette means "use the default"; a short one falls back with a warning.
    pub fn palette(&self) -> Palette {
        if self.palette.is_empty() {
            Palette::default()
        } else {
            Palette::or_default(self.palette.clone())
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no home directory to keep the wheel config in")]
    NoConfigDir,
    #[error("invalid wheel config: {0}")]
    Invalid(#[from] config::ConfigError),
    #[error("cannot write wheel config: {0}")]
    Io(#[from] std::io::Error),
}

/// `<config dir>/spinwheel/wheel.toml`
pub fn config_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("org", "spinwheel", "spinwheel")
        .map(|dirs| dirs.config_dir().join("wheel.toml"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Reads the config file if present, with `SPINWHEEL_*` variables layered on top
/// (`SPINWHEEL_SPIN__MAX_ANGLE=80`).
pub fn load_config() -> Result<WheelConfig, ConfigError> {
    let wheel = config::Config::builder()
        .add_source(config::File::from(config_path()?).required(false))
        .add_source(
            config::Environment::with_prefix("SPINWHEEL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?
        .try_deserialize()?;
    Ok(wheel)
}

pub fn from_toml_str(toml: &str) -> Result<WheelConfig, ConfigError> {
    let wheel = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    Ok(wheel)
}

pub fn load_or_default() -> WheelConfig {
    load_config().unwrap_or_else(|e| {
        log::error!("{e}; spinning with the built-in wheel");
        WheelConfig::default()
    })
}

/// Seeds the config file with the commented defaults. An existing file is left alone.
pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    if path.exists() {
        log::info!("keeping existing config at {}", path.display());
        return Ok(path);
    }
    if let Some(dir) = path.parent() {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(&path, DEFAULT_CONFIG)?;
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_started_notification_deserialization() {
        let cases = vec![
            ("\"OncePerGesture\"", StartedNotification::OncePerGesture),
            ("\"oncepergesture\"", StartedNotification::OncePerGesture),
            ("\"once\"", StartedNotification::OncePerGesture),
            ("\"EVERY\"", StartedNotification::EveryChange),
            ("\"EveryChange\"", StartedNotification::EveryChange),
        ];

        for (json, expected) in cases {
            let deserialized: StartedNotification = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert_eq!(
            serde_json::to_string(&StartedNotification::EveryChange).unwrap(),
            "\"EveryChange\""
        );
    }

    #[test]
    fn test_default_config_file_parses() {
        let config = from_toml_str(DEFAULT_CONFIG).unwrap();

        assert_eq!(config.items.len(), 8);
        assert_eq!(config.palette().len(), 7);
        assert_eq!(config.spin, SpinConfig::default());
        assert_eq!(config.behavior, Behavior::default());
        assert!(config.arrow.enabled);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = from_toml_str(
            r##"
items = ["Red", "Black"]
palette = ["#000", "#fff"]

[spin]
duration_ms = 1500

[behavior]
started = "every"
notify_on_release = true

[arrow]
enabled = false
"##,
        )
        .unwrap();

        assert_eq!(config.items, vec![ItemLabel::new("Red"), ItemLabel::new("Black")]);
        assert_eq!(config.spin.duration, Duration::from_millis(1500));
        assert_eq!(config.spin.interval, Duration::from_millis(50));
        assert_eq!(config.spin.max_angle, 50.0);
        assert_eq!(config.behavior.started, StartedNotification::EveryChange);
        assert!(config.behavior.notify_on_release);
        assert!(!config.style().arrow.enabled);
        assert_eq!(config.text, TextStyle::default());
        // two colors are below the minimum
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn test_bad_color_is_rejected() {
        assert!(matches!(
            from_toml_str("palette = [\"#nothex\", \"#fff\", \"#000\"]"),
            Err(ConfigError::Invalid(_))
        ));
    }
}
