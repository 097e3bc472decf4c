mod drawing;
mod persistence;

pub use drawing::{CanvasSettings, DrawingState, ToolMode};
pub use persistence::{
    ColorRecord, DrawingSnapshot, DrawingStore, JsonStore, PointRecord, RestoredDrawing,
    SettingsRecord, StampRecord, StrokeRecord,
};
