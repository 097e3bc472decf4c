use crate::state::{DrawingState, ToolMode};

use super::PointerEvent;
use super::gestures::Gesture;

/// Routes a pointer event to the drawing state according to the active tool
pub fn route_event(event: PointerEvent, state: &mut DrawingState) {
    let stamping = state.settings().tool == ToolMode::Stamp;
    match event {
        PointerEvent::Down(pos) => {
            if !stamping {
                state.begin_stroke(pos);
            }
        }
        PointerEvent::Move(pos) => state.continue_stroke(pos),
        PointerEvent::Up(pos) => {
            if stamping {
                state.place_stamp(pos);
            } else {
                state.end_stroke();
            }
        }
        PointerEvent::Cancel => state.cancel_stroke(),
    }
}

/// A pinch resizes the brush. Whatever was being drawn when it began is dropped.
pub fn route_gesture(gesture: Gesture, state: &mut DrawingState) {
    match gesture {
        Gesture::PinchBegan { scale } => {
            state.cancel_stroke();
            state.scale_brush_size(scale);
        }
        Gesture::Pinch { scale } => state.scale_brush_size(scale),
        Gesture::PinchEnded => {
            log::debug!("Pinch ended at brush size {}", state.settings().brush_size);
        }
    }
}
