use serde::{Deserialize, Serialize};

/// Tunables for the studio. Missing fields fall back to their defaults, so
/// older config files keep loading.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    pub canvas: CanvasConfig,
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub min_brush_size: f32,
    pub max_brush_size: f32,
    pub default_brush_size: f32,
    /// Stamp box size as a multiple of brush size.
    pub stamp_scale: f32,
    /// sRGB background, 0-255.
    pub default_background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            min_brush_size: 6.0,
            max_brush_size: 80.0,
            default_brush_size: 24.0,
            stamp_scale: 2.8,
            default_background: [255, 250, 235],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Arc-length distance between outline checkpoints.
    pub sample_spacing: f32,
    /// Checkpoint count of a "simple" letter; longer outlines need
    /// proportionally less coverage.
    pub reference_count: f32,
    /// Letter font size as a fraction of the smaller tracing-area side.
    pub letter_scale: f32,
    pub tile_pop_stagger: f64,
    pub advance_delay: f64,
    pub celebration_delay: f64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            sample_spacing: 20.0,
            reference_count: 30.0,
            letter_scale: 0.85,
            tile_pop_stagger: 0.4,
            advance_delay: 0.8,
            celebration_delay: 0.4,
        }
    }
}

impl StudioConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = StudioConfig::from_json(r#"{ "trace": { "reference_count": 40 } }"#).unwrap();
        assert_eq!(config.trace.reference_count, 40.0);
        assert_eq!(config.trace.sample_spacing, 20.0);
        assert_eq!(config.canvas, CanvasConfig::default());
    }
}
