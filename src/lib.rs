#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod brush;
pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod glyph;
pub mod history;
pub mod input;
pub mod jitter;
pub mod palette;
pub mod panels;
pub mod renderer;
pub mod schedule;
pub mod state;
pub mod stroke;
pub mod trace;

pub use app::StudioApp;
pub use brush::{BrushDescriptor, BrushPool, BrushStyle, PatternShape};
pub use config::StudioConfig;
pub use error::{PersistenceError, StudioError};
pub use event::{EventBus, EventHandler, StudioEvent};
pub use glyph::{GlyphFont, LetterGlyphPath};
pub use renderer::PaintCommand;
pub use state::{DrawingState, ToolMode};
pub use stroke::{StampPlacement, Stroke};
pub use trace::{TraceDifficulty, TracePhase, TraceSession};
