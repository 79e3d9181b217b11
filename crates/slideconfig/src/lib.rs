use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::{self, Deserializer};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Slideshow configuration file.
///
/// Style and fit names are kept as written; resolving them (and rejecting
/// unknown values) is up to the transition controller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlideConfig {
    pub version: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image_size: Option<String>,
    #[serde(default)]
    pub toggle_direction: Option<bool>,
    #[serde(default)]
    pub transition: Option<String>,
    /// Plain numbers are milliseconds.
    #[serde(default, deserialize_with = "deserialize_millis_opt")]
    pub duration: Option<Duration>,
    #[serde(default)]
    pub intensity: Option<f32>,
    #[serde(default)]
    pub scale_x: Option<f32>,
    #[serde(default)]
    pub scale_y: Option<f32>,
    #[serde(default)]
    pub width: Option<f32>,
    /// Plain numbers are seconds.
    #[serde(default, deserialize_with = "deserialize_seconds_opt")]
    pub autoplay: Option<Duration>,
    #[serde(default)]
    pub window: WindowSection,
    /// Directory of the file this config was read from; relative image paths
    /// resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WindowSection {
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Copy)]
enum NumericUnit {
    Millis,
    Seconds,
}

impl NumericUnit {
    fn duration<E>(self, value: f64) -> Result<Duration, E>
    where
        E: de::Error,
    {
        let seconds = match self {
            NumericUnit::Millis => value / 1000.0,
            NumericUnit::Seconds => value,
        };
        Duration::try_from_secs_f64(seconds).map_err(|_| E::custom("duration out of range"))
    }

    fn describe(self) -> &'static str {
        match self {
            NumericUnit::Millis => "milliseconds",
            NumericUnit::Seconds => "seconds",
        }
    }
}

fn deserialize_millis_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor(NumericUnit::Millis))
}

fn deserialize_seconds_opt<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DurationVisitor(NumericUnit::Seconds))
}

struct DurationVisitor(NumericUnit);

impl<'de> de::Visitor<'de> for DurationVisitor {
    type Value = Option<Duration>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "a duration as number of {} or human-readable string",
            self.0.describe()
        )
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        humantime::parse_duration(v.trim())
            .map(Some)
            .map_err(|err| E::custom(format!("invalid duration '{v}': {err}")))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.0.duration(v as f64).map(Some)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v < 0 {
            return Err(E::custom("duration must be non-negative"));
        }
        self.0.duration(v as f64).map(Some)
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v.is_nan() || v.is_sign_negative() || v.is_infinite() {
            return Err(E::custom("duration must be a finite non-negative number"));
        }
        self.0.duration(v).map(Some)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }
}

impl SlideConfig {
    /// Parses and checks everything except the image count, which is only
    /// known once command-line images have been merged in.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let raw: SlideConfig = toml::from_str(input)?;
        raw.validate_structure()?;
        Ok(raw)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&contents)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    pub fn validate_structure(&self) -> Result<(), ConfigError> {
        if self.version != 1 {
            return Err(ConfigError::Invalid(format!(
                "unsupported config version {}; expected 1",
                self.version
            )));
        }

        if let Some(index) = self.images.iter().position(|image| image.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "images[{index}] must not be empty"
            )));
        }

        if let Some(autoplay) = self.autoplay {
            if autoplay.is_zero() {
                return Err(ConfigError::Invalid(
                    "autoplay interval must be greater than zero".into(),
                ));
            }
        }

        let numeric = [
            ("intensity", self.intensity),
            ("scale_x", self.scale_x),
            ("scale_y", self.scale_y),
            ("width", self.width),
        ];
        for (name, value) in numeric {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(ConfigError::Invalid(format!("{name} must be finite")));
                }
            }
        }

        if let Some(size) = &self.window.size {
            if size.trim().is_empty() {
                return Err(ConfigError::Invalid("window.size must not be empty".into()));
            }
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_structure()?;
        if self.images.len() < 2 {
            return Err(ConfigError::Invalid(format!(
                "at least two images are required, found {}",
                self.images.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
version = 1
images = ["photos/a.jpg", "https://example.com/b.png"]
image_size = "contain"
toggle_direction = false
transition = "noise"
duration = 1500
intensity = 30.0
scale_x = 45.0
scale_y = 20.0
width = 0.35
autoplay = "8s"

[window]
size = "1280x720"
title = "Gallery"
"#;

    #[test]
    fn parses_sample_config() {
        let config = SlideConfig::from_toml_str(SAMPLE).expect("parse config");
        assert_eq!(config.images.len(), 2);
        assert_eq!(config.image_size.as_deref(), Some("contain"));
        assert_eq!(config.toggle_direction, Some(false));
        assert_eq!(config.transition.as_deref(), Some("noise"));
        assert_eq!(config.duration, Some(Duration::from_millis(1500)));
        assert_eq!(config.autoplay, Some(Duration::from_secs(8)));
        assert_eq!(config.width, Some(0.35));
        assert_eq!(config.window.title.as_deref(), Some("Gallery"));
        config.validate().expect("two images");
    }

    #[test]
    fn human_readable_and_numeric_durations() {
        let config = SlideConfig::from_toml_str(
            r#"
version = 1
duration = "750ms"
autoplay = 3
"#,
        )
        .expect("parse");
        assert_eq!(config.duration, Some(Duration::from_millis(750)));
        assert_eq!(config.autoplay, Some(Duration::from_secs(3)));
    }

    #[test]
    fn unknown_style_names_are_kept_verbatim() {
        let config = SlideConfig::from_toml_str(
            r#"
version = 1
transition = "swirl"
image_size = "stretch"
"#,
        )
        .expect("parse");
        assert_eq!(config.transition.as_deref(), Some("swirl"));
        assert_eq!(config.image_size.as_deref(), Some("stretch"));
    }

    #[test]
    fn rejects_wrong_version() {
        let err = SlideConfig::from_toml_str("version = 2").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_duration() {
        let err = SlideConfig::from_toml_str("version = 1\nduration = -5").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_out_of_range_durations() {
        for input in ["version = 1\nduration = 1e300", "version = 1\nautoplay = 1e300"] {
            let err = SlideConfig::from_toml_str(input).unwrap_err();
            assert!(matches!(err, ConfigError::Parse(_)), "{input}: {err}");
            assert!(err.to_string().contains("out of range"), "{input}: {err}");
        }
    }

    #[test]
    fn rejects_zero_autoplay() {
        let err = SlideConfig::from_toml_str("version = 1\nautoplay = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn full_validation_requires_two_images() {
        let config = SlideConfig::from_toml_str("version = 1\nimages = [\"a.png\"]").expect("parse");
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least two images"));
    }

    #[test]
    fn rejects_blank_image_entry() {
        let err = SlideConfig::from_toml_str("version = 1\nimages = [\"a.png\", \"\"]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn from_path_records_base_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("fadeshow.toml");
        let mut file = fs::File::create(&path).expect("create");
        file.write_all(SAMPLE.as_bytes()).expect("write");

        let config = SlideConfig::from_path(&path).expect("load");
        assert_eq!(config.base_dir.as_deref(), Some(dir.path()));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SlideConfig::from_path(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
