//! Mouse click tracking for double- and triple-click detection.

/// What a left click turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickKind {
    Single,
    Double,
    Triple,
}

/// Classifies clicks by the time elapsed since the previous one.
///
/// A click within the threshold of a single click is a double click; a click
/// within the threshold of a double click is a triple click, after which
/// tracking starts over.
#[derive(Debug, Default)]
pub(crate) struct ClickTracker {
    /// Time of the last single click.
    last_click: Option<u64>,
    /// Time of the last double click.
    last_double: Option<u64>,
}

impl ClickTracker {
    /// Classify a click at `now_ms` and record it.
    pub(crate) fn register(&mut self, now_ms: u64, threshold_ms: u64) -> ClickKind {
        let within = |t: Option<u64>| t.is_some_and(|t| now_ms.saturating_sub(t) < threshold_ms);

        if within(self.last_double) {
            self.reset();
            ClickKind::Triple
        } else if within(self.last_click) {
            self.last_click = None;
            self.last_double = Some(now_ms);
            ClickKind::Double
        } else {
            self.last_click = Some(now_ms);
            self.last_double = None;
            ClickKind::Single
        }
    }

    /// Reset click tracking.
    pub(crate) fn reset(&mut self) {
        self.last_click = None;
        self.last_double = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_sequence() {
        let mut tracker = ClickTracker::default();
        assert_eq!(tracker.register(1000, 500), ClickKind::Single);
        assert_eq!(tracker.register(1200, 500), ClickKind::Double);
        assert_eq!(tracker.register(1400, 500), ClickKind::Triple);
        assert_eq!(tracker.register(1500, 500), ClickKind::Single);
    }

    #[test]
    fn test_slow_clicks_stay_single() {
        let mut tracker = ClickTracker::default();
        assert_eq!(tracker.register(0, 500), ClickKind::Single);
        assert_eq!(tracker.register(600, 500), ClickKind::Single);
        assert_eq!(tracker.register(1000, 500), ClickKind::Double);
        // too late for a triple click, starts over
        assert_eq!(tracker.register(1600, 500), ClickKind::Single);
    }
}
