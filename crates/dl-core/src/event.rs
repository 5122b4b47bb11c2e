use serde::Serialize;

use crate::session::Mode;

/// What changed in a draw session.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawEventKind {
    // Options
    /// A label was appended.
    OptionAdded {
        /// The stored (trimmed) label.
        label: String,
    },
    /// A label was removed.
    OptionRemoved {
        /// Position it was removed from.
        index: usize,
        /// The removed label.
        label: String,
    },
    /// The whole set was redefined and shuffled.
    OptionsReplaced {
        /// Number of labels kept after de-duplication.
        count: usize,
    },
    /// The existing labels were put in a new random order.
    OptionsReshuffled,
    /// Every label was dropped.
    OptionsCleared,

    // Mode
    /// The presentation switched between jar and wheel.
    ModeChanged {
        /// The new mode.
        mode: Mode,
    },

    // Charge
    /// A press-and-hold gesture began.
    ChargeStarted,
    /// Power grew by one tick.
    PowerChanged {
        /// Power after the tick.
        power: u32,
    },
    /// Power hit the ceiling and charging stopped.
    ChargeSaturated {
        /// The ceiling value.
        power: u32,
    },
    /// The gesture ended.
    ChargeReleased {
        /// Power at release.
        power: u32,
        /// Whether the release started a spin.
        committed: bool,
    },

    // Draw
    /// A draw entered flight; the selection is already fixed.
    DrawStarted {
        /// Which presentation the draw uses.
        mode: Mode,
        /// How long the presentation lasts.
        duration: u64,
    },
    /// A wheel spin target was computed.
    SpinPlanned {
        /// Absolute rotation target.
        target: f64,
        /// Full revolutions in the spin.
        extra_rounds: u32,
    },
    /// The draw landed.
    DrawResolved {
        /// Index of the chosen option.
        index: usize,
        /// The chosen label.
        label: String,
    },
    /// A resolution from an earlier generation fired and was dropped.
    StaleResolutionIgnored {
        /// Generation the stale task belonged to.
        generation: u64,
    },

    // Lifecycle
    /// The result was cleared for another round.
    TriedAgain,
    /// The session returned to an empty setup.
    Reset,
}

/// A record of something that happened in a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawEvent {
    /// Virtual time of the change.
    pub at: u64,
    /// What changed.
    #[serde(flatten)]
    pub kind: DrawEventKind,
}

impl DrawEvent {
    /// Create an event at the given time.
    pub fn new(at: u64, kind: DrawEventKind) -> Self {
        Self { at, kind }
    }
}

/// Accumulates session events, with a read cursor for hosts.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<DrawEvent>,
    max_events: usize,
    unread: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
            unread: 0,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: DrawEvent) {
        self.events.push(event);
        self.unread += 1;
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
            self.unread = self.unread.min(self.events.len());
        }
    }

    /// Return a slice of all retained events.
    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    /// Return the events pushed since the last call, oldest first.
    pub fn take_unread(&mut self) -> Vec<DrawEvent> {
        let start = self.events.len() - self.unread;
        self.unread = 0;
        self.events[start..].to_vec()
    }

    /// Return the most recent event, if any.
    pub fn last(&self) -> Option<&DrawEvent> {
        self.events.last()
    }

    /// Return the number of retained events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events are retained.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all events.
    pub fn clear(&mut self) {
        self.events.clear();
        self.unread = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ev(at: u64) -> DrawEvent {
        DrawEvent::new(at, DrawEventKind::OptionsReshuffled)
    }

    #[test]
    fn event_log_push_and_len() {
        let mut log = EventLog::new(0);
        log.push(ev(1));
        log.push(ev(2));
        assert_eq!(log.len(), 2);
        assert_eq!(log.last().map(|e| e.at), Some(2));
    }

    #[test]
    fn event_log_max_capacity() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.push(ev(i));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.events()[0].at, 2);
    }

    #[test]
    fn take_unread_advances_cursor() {
        let mut log = EventLog::new(0);
        log.push(ev(1));
        log.push(ev(2));
        assert_eq!(log.take_unread().len(), 2);
        assert!(log.take_unread().is_empty());
        log.push(ev(3));
        let fresh = log.take_unread();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].at, 3);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn take_unread_after_overflow() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(ev(i));
        }
        let fresh = log.take_unread();
        assert_eq!(fresh.iter().map(|e| e.at).collect::<Vec<_>>(), vec![3, 4]);
    }

    #[test]
    fn event_serializes_flat() {
        let event = DrawEvent::new(
            40,
            DrawEventKind::DrawResolved {
                index: 1,
                label: "B".to_string(),
            },
        );
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["at"], 40);
        assert_eq!(json["kind"], "draw_resolved");
        assert_eq!(json["label"], "B");
    }
}
