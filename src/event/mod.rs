mod bus;
mod events;

pub use bus::EventBus;
pub use events::StudioEvent;

/// Receives feedback events from the drawing and tracing cores, e.g. to play
/// a sound or start confetti. The cores never reach for audio themselves.
pub trait EventHandler {
    fn handle_event(&mut self, event: &StudioEvent);
}

impl<F: FnMut(&StudioEvent)> EventHandler for F {
    fn handle_event(&mut self, event: &StudioEvent) {
        self(event)
    }
}
