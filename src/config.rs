use serde::Deserialize;

use crate::error::{Error, Result};

/// Presentation settings for the ripple background.
///
/// Read from the `data-ripple` attribute on `<body>` as JSON. Missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RippleConfig {
    /// Id of the `<canvas>` to paint on.
    pub canvas_id: String,
    /// Low-opacity fill laid over the whole surface each frame.
    pub fill_style: String,
    pub stroke_style: String,
    pub line_width: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            canvas_id: "water-bg".into(),
            fill_style: "rgba(0, 102, 204, 0.1)".into(),
            stroke_style: "rgba(0, 102, 204, 0.5)".into(),
            line_width: 2.0,
        }
    }
}

impl RippleConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let non_empty = [
            ("canvas_id", &self.canvas_id),
            ("fill_style", &self.fill_style),
            ("stroke_style", &self.stroke_style),
        ];
        for (field, value) in non_empty {
            if value.trim().is_empty() {
                return Err(Error::InvalidConfig { field, reason: "must not be empty".into() });
            }
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "line_width",
                reason: format!("must be a positive number, got {}", self.line_width),
            });
        }
        Ok(())
    }
}
