//! Alert state types.

/// One detected accident, from arming to delivery.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incident {
    /// Monotonic id, unique per machine
    pub id: u32,
    /// When the countdown started (µs)
    pub armed_at_us: u64,
    /// Classifier confidence that triggered arming
    pub confidence: f32,
}

/// Outcome of the single send attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Handed to the modem, result not yet known
    InFlight,
    /// Modem accepted the message
    Delivered,
    /// Modem rejected the message or did not answer
    Failed,
}

/// Current position in the alert lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertState {
    Idle,
    Pending {
        incident: Incident,
        deadline_us: u64,
    },
    Sent {
        incident: Incident,
        fired_at_us: u64,
        delivery: Delivery,
    },
    Cancelled {
        incident: Incident,
        cancelled_at_us: u64,
    },
}

impl AlertState {
    pub fn is_idle(&self) -> bool {
        matches!(self, AlertState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, AlertState::Pending { .. })
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, AlertState::Sent { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, AlertState::Cancelled { .. })
    }

    /// The status indicator is lit only while a countdown runs.
    pub fn indicator_on(&self) -> bool {
        self.is_pending()
    }

    /// Incident attached to this state, if any.
    pub fn incident(&self) -> Option<&Incident> {
        match self {
            AlertState::Idle => None,
            AlertState::Pending { incident, .. }
            | AlertState::Sent { incident, .. }
            | AlertState::Cancelled { incident, .. } => Some(incident),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            AlertState::Idle => "idle",
            AlertState::Pending { .. } => "pending",
            AlertState::Sent { .. } => "sent",
            AlertState::Cancelled { .. } => "cancelled",
        }
    }
}
