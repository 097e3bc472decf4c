use egui::{Pos2, Response};

mod gestures;
mod router;

pub use gestures::{Gesture, GestureConfig, PinchRecognizer};
pub use router::{route_event, route_gesture};

/// A pointer event in canvas-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Move(Pos2),
    Up(Pos2),
    /// The gesture was interrupted and nothing should be committed.
    Cancel,
}

/// Handles converting an egui drag response into [`PointerEvent`]s
#[derive(Debug, Default)]
pub struct CanvasInput {
    last_pos: Option<Pos2>,
    pinch: PinchRecognizer,
}

impl CanvasInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects this frame's pointer events for a widget sensing click and
    /// drag. `origin` is the canvas's top-left corner on screen.
    pub fn pointer_events(&mut self, response: &Response, origin: Pos2) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let local = |p: Pos2| (p - origin).to_pos2();
        let pos = response.interact_pointer_pos().map(local);

        if self.pinch.is_pinching() {
            self.last_pos = None;
            return events;
        }

        // A tap never becomes a drag
        if response.clicked() {
            if let Some(pos) = pos {
                events.push(PointerEvent::Down(pos));
                events.push(PointerEvent::Up(pos));
            }
            self.last_pos = None;
            return events;
        }

        if response.drag_started() {
            if let Some(pos) = pos {
                events.push(PointerEvent::Down(pos));
                self.last_pos = Some(pos);
            }
        } else if response.dragged() {
            if let Some(pos) = pos {
                if self.last_pos != Some(pos) {
                    events.push(PointerEvent::Move(pos));
                    self.last_pos = Some(pos);
                }
            }
        }

        if response.drag_stopped() {
            match pos.or(self.last_pos) {
                Some(pos) => events.push(PointerEvent::Up(pos)),
                None => events.push(PointerEvent::Cancel),
            }
            self.last_pos = None;
        }
        events
    }

    /// Feeds the frame's multi-touch zoom into the pinch recognizer.
    pub fn gesture(&mut self, ctx: &egui::Context) -> Option<Gesture> {
        let zoom = ctx.input(|i| i.multi_touch().map(|touch| touch.zoom_delta));
        self.pinch.update(zoom)
    }
}
