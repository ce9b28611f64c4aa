//! Cancellable turn-step scheduler owned by a battle session.
//!
//! Turn progression is a chain of delayed steps. At most one step is pending
//! at a time; time is fed in by the session's update tick and `cancel` drops
//! whatever is outstanding.

/// A deferred stage of the turn chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStep {
    /// Current enemy fell and more remain: bring in the next one.
    AdvanceEnemy,
    /// Last enemy fell: fire the completion callback.
    StageClear,
    /// Resolve the enemy's attack.
    EnemyAttack,
    /// Hand control back to the player.
    ReturnTurn,
    /// Player hp hit zero: fire the defeat callback.
    SignalDefeat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingStep {
    step: TurnStep,
    remaining: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnScheduler {
    pending: Option<PendingStep>,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `step` to come due after `delay` seconds.
    pub fn schedule(&mut self, step: TurnStep, delay: f64) {
        if let Some(previous) = self.pending {
            tracing::warn!(previous = ?previous.step, next = ?step, "turn step replaced while pending");
        }
        tracing::debug!(?step, delay, "turn step scheduled");
        self.pending = Some(PendingStep {
            step,
            remaining: delay.max(0.0),
        });
    }

    /// Drop the pending step, if any.
    pub fn cancel(&mut self) -> Option<TurnStep> {
        self.pending.take().map(|p| p.step)
    }

    pub fn pending(&self) -> Option<TurnStep> {
        self.pending.map(|p| p.step)
    }

    #[cfg(test)]
    fn remaining(&self) -> Option<f64> {
        self.pending.map(|p| p.remaining)
    }

    #[cfg(test)]
    fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Let `dt` seconds pass. If the pending step came due it is removed and
    /// returned together with the unused part of `dt`.
    pub fn advance(&mut self, dt: f64) -> Option<(TurnStep, f64)> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining > 0.0 {
            return None;
        }
        let overshoot = -pending.remaining;
        let step = pending.step;
        self.pending = None;
        Some((step, overshoot))
    }
}
