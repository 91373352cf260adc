use std::time::Duration;

use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SPIN_DURATION, EXHAUSTED_BUTTON_COLOR, EXHAUSTED_BUTTON_TEXT};
use crate::error::{SessionError, SpinError};
use crate::outcome::resolve;
use crate::session::{SessionGate, UserSession};
use crate::storage::KeyValueStore;
use crate::validation::validate_spin_duration;
use crate::wheel_config::{WheelConfig, WheelItem};

/// Identifies the one spin waiting for its reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpinTicket(u64);

/// A resolved spin whose animation is still running.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSpin {
    pub ticket: SpinTicket,
    pub winner: WheelItem,
    /// Slice index the animation should stop on
    pub landing_index: usize,
    pub animation: Duration,
}

/// The prize shown to the member once the animation ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinReveal {
    pub email: String,
    pub prize: WheelItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinButton {
    pub label: String,
    pub color: String,
    pub enabled: bool,
}

/// Holds the live member session and allows one spin in flight at a time.
///
/// The winner is picked in `start_spin`, but the session is only marked spent
/// in `finish_spin`, together with the reveal. Logging out in between cancels
/// the spin and leaves nothing behind.
#[derive(Debug, Default)]
pub struct SpinController {
    session: Option<UserSession>,
    pending: Option<PendingSpin>,
    last_reveal: Option<SpinReveal>,
    next_ticket: u64,
}

impl SpinController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_session(&mut self, session: UserSession) {
        self.cancel_pending();
        self.last_reveal = None;
        self.session = Some(session);
    }

    /// Destroys the member session, cancelling any spin still animating.
    pub fn logout(&mut self) -> Option<UserSession> {
        self.cancel_pending();
        self.last_reveal = None;
        self.session.take()
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    pub fn pending(&self) -> Option<&PendingSpin> {
        self.pending.as_ref()
    }

    pub fn last_reveal(&self) -> Option<&SpinReveal> {
        self.last_reveal.as_ref()
    }

    pub fn is_spinning(&self) -> bool {
        self.pending.is_some()
    }

    pub fn can_spin(&self, config: &WheelConfig) -> bool {
        matches!(&self.session, Some(session) if !session.has_spun)
            && self.pending.is_none()
            && !config.items.is_empty()
    }

    pub fn button(&self, config: &WheelConfig) -> SpinButton {
        let spent = self.session.as_ref().is_some_and(|session| session.has_spun);
        if spent {
            return SpinButton {
                label: EXHAUSTED_BUTTON_TEXT.to_string(),
                color: EXHAUSTED_BUTTON_COLOR.to_string(),
                enabled: false,
            };
        }
        SpinButton {
            label: config.spin_button_text.clone(),
            color: config.spin_button_color.clone(),
            enabled: self.can_spin(config),
        }
    }

    pub fn start_spin_with_rng<R: Rng + ?Sized>(
        &mut self,
        config: &WheelConfig,
        rng: &mut R,
    ) -> Result<PendingSpin, SpinError> {
        let draw = rng.gen_range(0.0..1.0);
        self.start_spin(config, draw)
    }

    /// Resolves the winner for the signed-in member without marking the spin used.
    pub fn start_spin(&mut self, config: &WheelConfig, draw: f64) -> Result<PendingSpin, SpinError> {
        let session = self.session.as_ref().ok_or(SpinError::NotSignedIn)?;
        if session.has_spun {
            return Err(SessionError::AlreadySpun.into());
        }
        if self.pending.is_some() {
            return Err(SpinError::SpinInFlight);
        }

        let resolution = resolve(&config.items, config.override_result_id.as_deref(), draw)?;

        self.next_ticket += 1;
        let pending = PendingSpin {
            ticket: SpinTicket(self.next_ticket),
            winner: resolution.item.clone(),
            landing_index: resolution.index,
            animation: animation_length(config.spin_duration),
        };
        self.pending = Some(pending.clone());
        Ok(pending)
    }

    /// Marks the session spent and reveals the prize, as one step.
    ///
    /// A ticket that was cancelled or superseded fails with `StaleSpin` and
    /// changes nothing.
    pub fn finish_spin<S: KeyValueStore>(
        &mut self,
        gate: &SessionGate<S>,
        ticket: SpinTicket,
    ) -> Result<SpinReveal, SpinError> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {}
            _ => return Err(SpinError::StaleSpin),
        }
        let session = self.session.as_ref().ok_or(SpinError::StaleSpin)?;

        let spent = match gate.record_spin(session) {
            Ok(spent) => spent,
            Err(e) => {
                self.pending = None;
                return Err(e.into());
            }
        };
        let pending = self.pending.take().ok_or(SpinError::StaleSpin)?;

        info!("Member {} won {}", spent.email, pending.winner.label);
        let reveal = SpinReveal {
            email: spent.email.clone(),
            prize: pending.winner,
        };
        self.session = Some(spent);
        self.last_reveal = Some(reveal.clone());
        Ok(reveal)
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            warn!("Cancelled spin {:?} before reveal", pending.ticket);
        }
    }
}

fn animation_length(seconds: f64) -> Duration {
    validate_spin_duration(seconds)
        .ok()
        .and_then(|_| Duration::try_from_secs_f64(seconds).ok())
        .unwrap_or_else(|| Duration::from_secs_f64(DEFAULT_SPIN_DURATION))
}
