//! Alert state machine.
//!
//! All transitions go through `&mut self`; callers that share the machine
//! wrap it in a [`SharedState`](crate::traits::SharedState) so a cancel and
//! a firing decision can never interleave.

use super::state::{AlertState, Delivery, Incident};
use crate::parameters::{DetectorConfig, RearmPolicy};
use crate::scorer::Verdict;

/// What a step did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertAction {
    None,
    /// Countdown started
    Armed(Incident),
    /// Countdown stopped by the user
    Cancelled(Incident),
    /// Deadline reached: the caller must send the alert now
    Fire(Incident),
    /// Cooldown elapsed, back to `Idle`
    Rearmed,
}

/// Arms, cancels and fires alerts.
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    state: AlertState,
    alert_delay_us: u64,
    rearm: RearmPolicy,
    next_incident_id: u32,
}

impl AlertStateMachine {
    pub fn new(alert_delay_us: u64, rearm: RearmPolicy) -> Self {
        Self {
            state: AlertState::Idle,
            alert_delay_us,
            rearm,
            next_incident_id: 1,
        }
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.alert_delay_us, config.rearm)
    }

    /// Take the timing fields of a replacement configuration.
    ///
    /// A countdown already running keeps its deadline.
    pub fn apply_config(&mut self, config: &DetectorConfig) {
        self.alert_delay_us = config.alert_delay_us;
        self.rearm = config.rearm;
    }

    pub fn state(&self) -> AlertState {
        self.state
    }

    pub fn alert_delay_us(&self) -> u64 {
        self.alert_delay_us
    }

    pub fn rearm_policy(&self) -> RearmPolicy {
        self.rearm
    }

    /// Advance one tick.
    ///
    /// Order within a tick: the deadline first, then a pending cancel, then
    /// the re-arm cooldown, then the verdict. Only a cancel observed on an
    /// earlier tick stops the alert; one first seen on the deadline tick
    /// finds the machine already `Sent` and is dropped.
    pub fn step(
        &mut self,
        now_us: u64,
        verdict: Option<Verdict>,
        cancel_requested: bool,
    ) -> AlertAction {
        if let Some(incident) = self.fire_if_due(now_us) {
            return AlertAction::Fire(incident);
        }

        if cancel_requested {
            if let Some(incident) = self.cancel(now_us) {
                return AlertAction::Cancelled(incident);
            }
        }

        if self.rearm_if_cooled(now_us) {
            return AlertAction::Rearmed;
        }

        match verdict {
            Some(v) if v.is_event => self
                .arm(now_us, v.confidence)
                .map_or(AlertAction::None, AlertAction::Armed),
            _ => AlertAction::None,
        }
    }

    /// Start a countdown. Only `Idle` arms; a detection in any other state
    /// leaves the machine untouched.
    pub fn arm(&mut self, now_us: u64, confidence: f32) -> Option<Incident> {
        if !self.state.is_idle() {
            return None;
        }
        let incident = Incident {
            id: self.next_incident_id,
            armed_at_us: now_us,
            confidence,
        };
        self.next_incident_id = self.next_incident_id.wrapping_add(1);
        self.state = AlertState::Pending {
            incident,
            deadline_us: now_us.saturating_add(self.alert_delay_us),
        };
        Some(incident)
    }

    /// Cancel a running countdown. No-op outside `Pending`.
    pub fn cancel(&mut self, now_us: u64) -> Option<Incident> {
        match self.state {
            AlertState::Pending { incident, .. } => {
                self.state = AlertState::Cancelled {
                    incident,
                    cancelled_at_us: now_us,
                };
                Some(incident)
            }
            _ => None,
        }
    }

    /// Move `Pending` to `Sent` once the deadline has passed.
    ///
    /// Returns the incident exactly once; the caller owns the send.
    pub fn fire_if_due(&mut self, now_us: u64) -> Option<Incident> {
        match self.state {
            AlertState::Pending {
                incident,
                deadline_us,
            } if now_us >= deadline_us => {
                self.state = AlertState::Sent {
                    incident,
                    fired_at_us: now_us,
                    delivery: Delivery::InFlight,
                };
                Some(incident)
            }
            _ => None,
        }
    }

    /// Record the result of the send attempt for `incident_id`.
    ///
    /// Ignored unless the machine is still `Sent` for that incident and the
    /// result has not been recorded yet.
    pub fn record_delivery(&mut self, incident_id: u32, delivered: bool) -> bool {
        match &mut self.state {
            AlertState::Sent {
                incident, delivery, ..
            } if incident.id == incident_id && *delivery == Delivery::InFlight => {
                *delivery = if delivered {
                    Delivery::Delivered
                } else {
                    Delivery::Failed
                };
                true
            }
            _ => false,
        }
    }

    /// Return to `Idle` from `Sent` or `Cancelled`.
    ///
    /// A running countdown is not discarded; cancel it first.
    pub fn reset(&mut self) -> bool {
        match self.state {
            AlertState::Sent { .. } | AlertState::Cancelled { .. } => {
                self.state = AlertState::Idle;
                true
            }
            _ => false,
        }
    }

    fn rearm_if_cooled(&mut self, now_us: u64) -> bool {
        let RearmPolicy::AfterCooldown { cooldown_us } = self.rearm else {
            return false;
        };
        let since = match self.state {
            AlertState::Sent { fired_at_us, .. } => fired_at_us,
            AlertState::Cancelled {
                cancelled_at_us, ..
            } => cancelled_at_us,
            _ => return false,
        };
        if now_us.saturating_sub(since) >= cooldown_us {
            self.state = AlertState::Idle;
            true
        } else {
            false
        }
    }
}

impl Default for AlertStateMachine {
    fn default() -> Self {
        Self::from_config(&DetectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{MockState, SharedState};

    const DELAY: u64 = 15_000_000;

    fn event(confidence: f32) -> Option<Verdict> {
        Some(Verdict {
            is_event: true,
            confidence,
        })
    }

    fn quiet() -> Option<Verdict> {
        Some(Verdict {
            is_event: false,
            confidence: 0.1,
        })
    }

    fn machine() -> AlertStateMachine {
        AlertStateMachine::new(DELAY, RearmPolicy::Manual)
    }

    #[test]
    fn non_event_keeps_idle() {
        let mut m = machine();
        for t in 0..100 {
            assert_eq!(m.step(t * 20_000, quiet(), false), AlertAction::None);
        }
        assert_eq!(m.step(0, None, false), AlertAction::None);
        assert!(m.state().is_idle());
    }

    #[test]
    fn event_arms_with_deadline() {
        let mut m = machine();
        let action = m.step(1_000, event(0.95), false);
        let AlertAction::Armed(incident) = action else {
            panic!("expected Armed, got {:?}", action);
        };
        assert_eq!(incident.armed_at_us, 1_000);
        assert_eq!(
            m.state(),
            AlertState::Pending {
                incident,
                deadline_us: 1_000 + DELAY
            }
        );
        assert!(m.state().indicator_on());
    }

    #[test]
    fn repeated_events_do_not_rearm_or_extend() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        let before = m.state();
        for t in 1..200u64 {
            assert_eq!(m.step(t * 20_000, event(0.99), false), AlertAction::None);
        }
        assert_eq!(m.state(), before);
    }

    #[test]
    fn cancel_only_affects_pending() {
        let mut m = machine();
        assert!(m.cancel(0).is_none());
        assert!(m.state().is_idle());

        m.step(0, event(0.9), false);
        assert!(m.cancel(5_000_000).is_some());
        assert!(m.state().is_cancelled());

        assert!(m.cancel(6_000_000).is_none());
        assert!(m.state().is_cancelled());

        m.reset();
        m.step(0, event(0.9), false);
        m.step(DELAY, None, false);
        assert!(m.state().is_sent());
        assert!(m.cancel(DELAY + 1).is_none());
        assert!(m.state().is_sent());
    }

    #[test]
    fn fires_exactly_at_deadline_once() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        assert_eq!(m.step(DELAY - 1, None, false), AlertAction::None);

        let action = m.step(DELAY, None, false);
        assert!(matches!(action, AlertAction::Fire(i) if i.id == 1));
        assert!(!m.state().indicator_on());

        for t in 1..10 {
            assert_eq!(m.step(DELAY + t, event(0.9), false), AlertAction::None);
        }
        assert!(m.fire_if_due(DELAY * 2).is_none());
    }

    #[test]
    fn cancel_first_seen_on_deadline_tick_is_too_late() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        let action = m.step(DELAY, None, true);
        assert!(matches!(action, AlertAction::Fire(i) if i.id == 1));
        assert!(m.state().is_sent());
    }

    #[test]
    fn cancel_one_tick_before_deadline_wins() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        let action = m.step(DELAY - 1, None, true);
        assert!(matches!(action, AlertAction::Cancelled(_)));
        assert_eq!(m.step(DELAY, None, false), AlertAction::None);
        assert!(m.state().is_cancelled());
    }

    #[test]
    fn cancel_request_outside_pending_is_ignored() {
        let mut m = machine();
        assert_eq!(m.step(0, quiet(), true), AlertAction::None);
        assert!(m.state().is_idle());
    }

    #[test]
    fn delivery_recorded_once_for_matching_incident() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        m.step(DELAY, None, false);

        assert!(!m.record_delivery(42, true));
        assert!(m.record_delivery(1, false));
        assert!(!m.record_delivery(1, true));
        assert!(matches!(
            m.state(),
            AlertState::Sent {
                delivery: Delivery::Failed,
                ..
            }
        ));
    }

    #[test]
    fn manual_policy_requires_reset() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        m.step(DELAY, None, false);
        assert_eq!(m.step(DELAY * 100, event(0.9), false), AlertAction::None);
        assert!(m.state().is_sent());

        assert!(m.reset());
        let action = m.step(DELAY * 100, event(0.9), false);
        assert!(matches!(action, AlertAction::Armed(i) if i.id == 2));
    }

    #[test]
    fn reset_does_not_drop_pending() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        assert!(!m.reset());
        assert!(m.state().is_pending());
    }

    #[test]
    fn cooldown_policy_rearms() {
        let mut m = AlertStateMachine::new(
            DELAY,
            RearmPolicy::AfterCooldown {
                cooldown_us: 60_000_000,
            },
        );
        m.step(0, event(0.9), false);
        m.cancel(1_000_000);

        assert_eq!(m.step(60_999_999, event(0.9), false), AlertAction::None);
        assert_eq!(m.step(61_000_000, event(0.9), false), AlertAction::Rearmed);
        assert!(matches!(
            m.step(61_020_000, event(0.9), false),
            AlertAction::Armed(_)
        ));
    }

    #[test]
    fn config_change_keeps_running_deadline() {
        let mut m = machine();
        m.step(0, event(0.9), false);
        let config = DetectorConfig {
            alert_delay_us: 1_000_000,
            ..DetectorConfig::default()
        };
        m.apply_config(&config);
        assert_eq!(m.step(1_000_000, None, false), AlertAction::None);
        assert!(matches!(m.step(DELAY, None, false), AlertAction::Fire(_)));
        assert_eq!(m.alert_delay_us(), 1_000_000);
    }

    #[test]
    fn shared_cancel_and_fire_resolve_once() {
        let state = MockState::new(machine());
        state.with_mut(|m| m.step(0, event(0.9), false));

        let cancelled = state.with_mut(|m| m.cancel(DELAY));
        let fired = state.with_mut(|m| m.fire_if_due(DELAY));

        assert!(cancelled.is_some());
        assert!(fired.is_none());
        assert!(state.with(|m| m.state().is_cancelled()));
    }
}
