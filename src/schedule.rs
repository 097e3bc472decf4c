//! Deterministic delayed events.
//!
//! Animation sequencing (tile pop-in, "advance after the letter is spoken")
//! is queued here with explicit due times and released by [`Timeline::advance`],
//! so tests can step time instead of sleeping.

#[derive(Debug, Clone)]
struct Scheduled<E> {
    due: f64,
    order: u64,
    event: E,
}

#[derive(Debug, Clone)]
pub struct Timeline<E> {
    now: f64,
    next_order: u64,
    pending: Vec<Scheduled<E>>,
}

impl<E> Default for Timeline<E> {
    fn default() -> Self {
        Self {
            now: 0.0,
            next_order: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Timeline<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in seconds, as last passed to [`Timeline::advance`].
    pub fn now(&self) -> f64 {
        self.now
    }

    /// Queue `event` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f64, event: E) {
        let order = self.next_order;
        self.next_order += 1;
        self.pending.push(Scheduled {
            due: self.now + delay.max(0.0),
            order,
            event,
        });
    }

    /// Moves the clock to `now` and returns every event that became due,
    /// earliest first. Time never runs backwards.
    pub fn advance(&mut self, now: f64) -> Vec<E> {
        self.now = self.now.max(now);
        let mut due = Vec::new();
        let mut remaining = Vec::with_capacity(self.pending.len());
        for item in self.pending.drain(..) {
            if item.due <= self.now {
                due.push(item);
            } else {
                remaining.push(item);
            }
        }
        self.pending = remaining;
        due.sort_by(|a, b| a.due.total_cmp(&b.due).then(a.order.cmp(&b.order)));
        due.into_iter().map(|item| item.event).collect()
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_fire_in_due_order() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.8, "advance");
        timeline.schedule(0.4, "pop");
        timeline.schedule(0.4, "pop2");

        assert!(timeline.advance(0.3).is_empty());
        assert_eq!(timeline.advance(0.5), vec!["pop", "pop2"]);
        assert_eq!(timeline.advance(1.0), vec!["advance"]);
        assert!(timeline.is_idle());
    }

    #[test]
    fn test_clock_does_not_rewind() {
        let mut timeline = Timeline::new();
        timeline.advance(5.0);
        timeline.advance(1.0);
        assert_eq!(timeline.now(), 5.0);
        timeline.schedule(1.0, ());
        assert!(timeline.advance(5.5).is_empty());
        assert_eq!(timeline.advance(6.0).len(), 1);
    }

    #[test]
    fn test_cancel_all() {
        let mut timeline = Timeline::new();
        timeline.schedule(0.0, 1);
        timeline.cancel_all();
        assert!(timeline.advance(10.0).is_empty());
    }
}
