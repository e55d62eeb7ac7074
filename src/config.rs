use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::range_view::DEFAULT_MIN_VALUE;
use crate::style::RangeStyle;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{left_key} and {right_key} must be set together")]
    IncompleteSelection {
        left_key: &'static str,
        right_key: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub min_value: f32,
    pub max_value: f32,
    pub initial_values: Option<(f32, f32)>,
    pub style: RangeStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_value: DEFAULT_MIN_VALUE,
            max_value: 100.0,
            initial_values: None,
            style: RangeStyle::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let parse = |key: &'static str| parse_var::<f32>(&lookup, key);

        let min_value = parse("RANGEVIEW_MIN")?.unwrap_or(defaults.min_value);
        let max_value = parse("RANGEVIEW_MAX")?.unwrap_or(defaults.max_value);
        if min_value >= max_value {
            tracing::warn!(
                min_value,
                max_value,
                "min value is not below max value, values will be degenerate"
            );
        }

        let initial_values = match (parse("RANGEVIEW_LEFT")?, parse("RANGEVIEW_RIGHT")?) {
            (Some(left), Some(right)) => Some((left, right)),
            (None, None) => None,
            _ => {
                return Err(ConfigError::IncompleteSelection {
                    left_key: "RANGEVIEW_LEFT",
                    right_key: "RANGEVIEW_RIGHT",
                });
            }
        };

        let mut style = defaults.style;
        if let Some(width) = parse("RANGEVIEW_TOGGLE_WIDTH")? {
            style = style.toggle_width(width);
        }
        if let Some(margin) = parse("RANGEVIEW_MARGIN")? {
            style = style.horizontal_margin(margin);
        }
        if let Some(width) = parse("RANGEVIEW_STROKE_WIDTH")? {
            style = style.stroke_width(width);
        }
        if let Some(radius) = parse("RANGEVIEW_CORNER_RADIUS")? {
            style = style.corner_radius(radius);
        }

        Ok(Self {
            min_value,
            max_value,
            initial_values,
            style,
        })
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value }),
    }
}
