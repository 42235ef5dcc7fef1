//! Engine configuration
//!
//! Supports multiple profiles (debug, release) with different thresholds,
//! plus runtime option updates in which invalid values are ignored.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File, Map, Value, ValueKind};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::GestureError;
use crate::input::Millis;

/// Thresholds that drive gesture classification
///
/// Distances are logical pixels, times are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Max total displacement still counted as a tap
    pub tap_distance: f32,
    /// Kept for compatibility; the tap/press split uses `tap_long_time`
    pub tap_time: Millis,
    /// Min duration of a press (long tap)
    pub tap_long_time: Millis,
    /// Max gap between repeated taps
    pub double_tap_time: Millis,
    /// Min displacement of a swipe
    pub swipe_distance: f32,
    /// Duration boundary between flick (shorter) and swipe
    pub flick_time: Millis,
    /// Min displacement of a flick
    pub flick_distance: f32,
    /// Never report doubletap/multitap
    pub avoid_double_tap: bool,
    /// Never report swipe
    pub avoid_swipe: bool,
    /// Never report flick
    pub avoid_flick: bool,
    /// Report the base tap alongside a detected repeat
    pub get_all_taps: bool,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_distance: 10.0,
            tap_time: 100,
            tap_long_time: 1000,
            double_tap_time: 400,
            swipe_distance: 100.0,
            flick_time: 100,
            flick_distance: 50.0,
            avoid_double_tap: false,
            avoid_swipe: false,
            avoid_flick: false,
            get_all_taps: false,
        }
    }
}

/// Value supplied for a runtime option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl OptionValue {
    /// Strictly positive, finite number (text is parsed)
    fn positive(&self) -> Option<f64> {
        let n = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse().ok()?,
            Self::Bool(_) => return None,
        };
        (n.is_finite() && n > 0.0).then_some(n)
    }

    fn switch(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Number(n) if !n.is_nan() => Some(*n != 0.0),
            Self::Number(_) => None,
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl OptionValue {
    /// Converts a scalar read from a config source
    fn from_setting(value: Value) -> Option<Self> {
        match value.kind {
            ValueKind::Boolean(b) => Some(Self::Bool(b)),
            ValueKind::I64(n) => Some(Self::Number(n as f64)),
            ValueKind::I128(n) => Some(Self::Number(n as f64)),
            ValueKind::U64(n) => Some(Self::Number(n as f64)),
            ValueKind::U128(n) => Some(Self::Number(n as f64)),
            ValueKind::Float(n) => Some(Self::Number(n)),
            ValueKind::String(s) => Some(Self::Text(s)),
            ValueKind::Nil | ValueKind::Table(_) | ValueKind::Array(_) => None,
        }
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// How an option is validated and where it is stored
#[derive(Clone, Copy)]
enum Setting {
    Distance(fn(&mut GestureConfig) -> &mut f32),
    Duration(fn(&mut GestureConfig) -> &mut Millis),
    Switch(fn(&mut GestureConfig) -> &mut bool),
}

/// (option name, field name, setting)
const OPTIONS: [(&str, &str, Setting); 11] = [
    ("tapDistance", "tap_distance", Setting::Distance(|c| &mut c.tap_distance)),
    ("tapTime", "tap_time", Setting::Duration(|c| &mut c.tap_time)),
    ("tapLongTime", "tap_long_time", Setting::Duration(|c| &mut c.tap_long_time)),
    ("doubleTapTime", "double_tap_time", Setting::Duration(|c| &mut c.double_tap_time)),
    ("swipeDistance", "swipe_distance", Setting::Distance(|c| &mut c.swipe_distance)),
    ("flickTime", "flick_time", Setting::Duration(|c| &mut c.flick_time)),
    ("flickDistance", "flick_distance", Setting::Distance(|c| &mut c.flick_distance)),
    ("avoidDoubleTap", "avoid_double_tap", Setting::Switch(|c| &mut c.avoid_double_tap)),
    ("avoidSwipe", "avoid_swipe", Setting::Switch(|c| &mut c.avoid_swipe)),
    ("avoidFlick", "avoid_flick", Setting::Switch(|c| &mut c.avoid_flick)),
    ("getAllTaps", "get_all_taps", Setting::Switch(|c| &mut c.get_all_taps)),
];

impl GestureConfig {
    /// Applies runtime option changes
    ///
    /// Names may be given as `tapDistance` or `tap_distance`. Unknown names,
    /// non-numeric or non-positive numbers, and non-boolean switches are
    /// ignored and the current value is kept. Returns the field names that
    /// were changed.
    pub fn apply_options<'a, I>(&mut self, options: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = (&'a str, &'a OptionValue)>,
    {
        let mut applied = Vec::new();

        for (name, value) in options {
            let Some((_, field, setting)) = OPTIONS
                .iter()
                .find(|(option, field, _)| *option == name || *field == name)
            else {
                warn!(option = name, "unknown gesture option ignored");
                continue;
            };

            let accepted = match setting {
                Setting::Distance(slot) => value.positive().map(|n| *slot(self) = n as f32),
                Setting::Duration(slot) => value
                    .positive()
                    .map(|n| n as Millis)
                    .filter(|ms| *ms > 0)
                    .map(|ms| *slot(self) = ms),
                Setting::Switch(slot) => value.switch().map(|b| *slot(self) = b),
            };

            match accepted {
                Some(()) => {
                    debug!(option = *field, ?value, "gesture option applied");
                    applied.push(*field);
                }
                None => warn!(option = *field, ?value, "invalid gesture option ignored"),
            }
        }

        applied
    }

    /// Replaces every non-positive threshold with its default
    pub fn sanitized(mut self) -> Self {
        let mut defaults = Self::default();

        for (_, field, setting) in OPTIONS {
            let valid = match setting {
                Setting::Distance(slot) => {
                    let value = *slot(&mut self);
                    let valid = value.is_finite() && value > 0.0;
                    if !valid {
                        *slot(&mut self) = *slot(&mut defaults);
                    }
                    valid
                }
                Setting::Duration(slot) => {
                    let valid = *slot(&mut self) > 0;
                    if !valid {
                        *slot(&mut self) = *slot(&mut defaults);
                    }
                    valid
                }
                Setting::Switch(_) => true,
            };

            if !valid {
                warn!(option = field, "non-positive threshold replaced by default");
            }
        }

        self
    }
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Classification thresholds
    #[serde(default)]
    pub gestures: GestureConfig,
}

impl EngineConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix GESTURE_ (e.g. GESTURE_GESTURES__TAP_DISTANCE=15)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, GestureError> {
        Self::load_with(profile, Self::environment())
    }

    /// GESTURE_ prefix, __ between nested fields (e.g. GESTURE_GESTURES__FLICK_TIME)
    fn environment() -> Environment {
        Environment::with_prefix("GESTURE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(profile: &str, environment: Environment) -> Result<Self, GestureError> {
        let mut builder = Config::builder();

        builder = match Self::find_config_dir() {
            Some(dir) => {
                builder.add_source(File::from(dir.join(profile).as_path()).required(false))
            }
            None => builder.add_source(File::with_name(&format!("config/{}", profile)).required(false)),
        };

        let config = builder
            .add_source(environment)
            .set_override("profile", profile)?
            .build()?;

        // Thresholds go through option validation one by one, so a bad value
        // only costs its own field
        let table = match config.get_table("gestures") {
            Ok(table) => table,
            Err(ConfigError::NotFound(_)) => Map::new(),
            Err(e) => {
                warn!(error = %e, profile, "unreadable gestures table, using defaults");
                Map::new()
            }
        };
        let options: Vec<(String, OptionValue)> = table
            .into_iter()
            .filter_map(|(key, value)| match OptionValue::from_setting(value) {
                Some(value) => Some((key, value)),
                None => {
                    warn!(option = %key, "unsupported gesture setting ignored");
                    None
                }
            })
            .collect();

        let mut gestures = GestureConfig::default();
        gestures.apply_options(options.iter().map(|(name, value)| (name.as_str(), value)));

        debug!(profile, ?gestures, "configuration loaded");
        Ok(Self {
            profile: profile.to_string(),
            gestures,
        })
    }

    /// Loads the profile named by GESTURE_PROFILE, defaulting to "release"
    pub fn load_from_env() -> Result<Self, GestureError> {
        let profile = std::env::var("GESTURE_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Loads a profile, falling back to defaults if it cannot be read
    pub fn load_or_default(profile: &str) -> Self {
        Self::load(profile).unwrap_or_else(|e| {
            warn!(error = %e, profile, "failed to load config, using default configuration");
            Self::with_profile(profile)
        })
    }

    /// Default thresholds under the given profile name
    pub fn with_profile(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            gestures: GestureConfig::default(),
        }
    }

    /// Directory holding the profile files, if one can be found
    pub fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::with_profile("release")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = GestureConfig::default();
        assert_eq!(config.tap_distance, 10.0);
        assert_eq!(config.tap_long_time, 1000);
        assert_eq!(config.double_tap_time, 400);
        assert_eq!(config.flick_time, 100);
        assert!(!config.get_all_taps);
    }

    #[test]
    fn test_apply_camel_and_snake_names() {
        let mut config = GestureConfig::default();
        let tap = OptionValue::from(15.0);
        let flick = OptionValue::from("80");
        let all = OptionValue::from(true);
        let applied = config.apply_options([
            ("tapDistance", &tap),
            ("flick_time", &flick),
            ("getAllTaps", &all),
        ]);
        assert_eq!(applied, vec!["tap_distance", "flick_time", "get_all_taps"]);
        assert_eq!(config.tap_distance, 15.0);
        assert_eq!(config.flick_time, 80);
        assert!(config.get_all_taps);
    }

    #[test]
    fn test_invalid_values_keep_previous() {
        let mut config = GestureConfig::default();
        let options: HashMap<&str, OptionValue> = HashMap::from([
            ("tapDistance", OptionValue::from(-3.0)),
            ("doubleTapTime", OptionValue::from("soon")),
            ("swipeDistance", OptionValue::from(0.0)),
            ("flickTime", OptionValue::from(0.4)),
            ("avoidSwipe", OptionValue::from("maybe")),
            ("tapLongTime", OptionValue::from(false)),
            ("bogus", OptionValue::from(1.0)),
        ]);
        let applied = config.apply_options(options.iter().map(|(k, v)| (*k, v)));
        assert!(applied.is_empty());
        assert_eq!(config, GestureConfig::default());
    }

    #[test]
    fn test_switch_accepts_numbers() {
        let mut config = GestureConfig::default();
        let one = OptionValue::from(1.0);
        config.apply_options([("avoidFlick", &one)]);
        assert!(config.avoid_flick);
    }

    #[test]
    fn test_sanitized_restores_defaults() {
        let config = GestureConfig {
            tap_distance: -1.0,
            double_tap_time: 0,
            swipe_distance: f32::NAN,
            flick_distance: 75.0,
            ..GestureConfig::default()
        }
        .sanitized();
        assert_eq!(config.tap_distance, 10.0);
        assert_eq!(config.double_tap_time, 400);
        assert_eq!(config.swipe_distance, 100.0);
        assert_eq!(config.flick_distance, 75.0);
    }

    #[test]
    fn test_option_value_deserializes_untagged() {
        let values: Vec<OptionValue> = serde_json::from_str(r#"[true, 12.5, "40"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                OptionValue::Bool(true),
                OptionValue::Number(12.5),
                OptionValue::Text("40".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_profile_uses_defaults() {
        let config = EngineConfig::load_or_default("no-such-profile");
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.gestures, GestureConfig::default());
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let vars: Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EngineConfig::environment().source(Some(vars))
    }

    #[test]
    fn test_env_override_reaches_nested_field() {
        let config =
            EngineConfig::load_with("debug", env(&[("GESTURE_GESTURES__TAP_DISTANCE", "25")]))
                .unwrap();
        assert!((config.gestures.tap_distance - 25.0).abs() < 0.001);
        assert_eq!(config.profile, "debug");
    }

    #[test]
    fn test_bad_env_value_only_costs_its_field() {
        let config = EngineConfig::load_with(
            "debug",
            env(&[
                ("GESTURE_GESTURES__TAP_LONG_TIME", "soon"),
                ("GESTURE_GESTURES__TAP_DISTANCE", "25"),
                ("GESTURE_GESTURES__FLICK_TIME", "-5"),
            ]),
        )
        .unwrap();
        assert_eq!(config.gestures.tap_long_time, 1000);
        assert_eq!(config.gestures.flick_time, 100);
        assert!((config.gestures.tap_distance - 25.0).abs() < 0.001);
        assert!(config.gestures.get_all_taps);
    }

    #[test]
    fn test_scalar_settings_convert() {
        assert_eq!(
            OptionValue::from_setting(Value::new(None, ValueKind::I64(30))),
            Some(OptionValue::Number(30.0))
        );
        assert_eq!(
            OptionValue::from_setting(Value::new(None, ValueKind::Boolean(true))),
            Some(OptionValue::Bool(true))
        );
        assert_eq!(OptionValue::from_setting(Value::new(None, ValueKind::Nil)), None);
    }
}
