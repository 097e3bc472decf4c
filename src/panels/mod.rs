mod canvas_panel;
mod tools_panel;
mod trace_panel;

pub use canvas_panel::canvas_panel;
pub use tools_panel::{BrushBuilder, tools_panel};
pub use trace_panel::{TracePanelState, trace_panel};
