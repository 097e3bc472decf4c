/// A recognized two-finger gesture on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Two fingers moved far enough apart (or together) to count as a pinch.
    PinchBegan { scale: f32 },
    /// Incremental scale since the previous update.
    Pinch { scale: f32 },
    PinchEnded,
}

/// Configuration for gesture recognition
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// How far the accumulated scale must leave 1.0 before a pinch is recognized
    pub min_pinch_scale: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_pinch_scale: 0.05,
        }
    }
}

/// Turns per-frame zoom deltas from a multi-touch source into pinch gestures.
#[derive(Debug, Default)]
pub struct PinchRecognizer {
    config: GestureConfig,
    touching: bool,
    pinching: bool,
    /// Scale accumulated while still inside the dead zone
    pending: f32,
}

impl PinchRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GestureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    /// `zoom_delta` is `None` when fewer than two touches are down.
    pub fn update(&mut self, zoom_delta: Option<f32>) -> Option<Gesture> {
        let Some(delta) = zoom_delta.filter(|d| d.is_finite() && *d > 0.0) else {
            let was_pinching = self.pinching;
            self.touching = false;
            self.pinching = false;
            return was_pinching.then_some(Gesture::PinchEnded);
        };

        if !self.touching {
            self.touching = true;
            self.pending = 1.0;
        }

        if self.pinching {
            return Some(Gesture::Pinch { scale: delta });
        }

        self.pending *= delta;
        if (self.pending - 1.0).abs() >= self.config.min_pinch_scale {
            self.pinching = true;
            Some(Gesture::PinchBegan {
                scale: self.pending,
            })
        } else {
            None
        }
    }
}
