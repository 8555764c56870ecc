//! The guarded, multi-phase operations of the panel.
//!
//! Every operation either completes its mutations and recomputes the derived
//! fields, or rejects with a [`Rejection`] and leaves the state untouched.
//! Rejection precedence: the `operation_in_progress` busy guard, then the
//! operation-specific precondition, then (for closing) the interlock chain.
//!
//! The two travelling phases (`Closing`, `Tripping`) model mechanical delay:
//! once an `attempt_close`/`initiate_*` succeeds, only the matching
//! `finish_*` can move the breaker on. There is no cancellation path; a
//! moving mechanism cannot be arrested mid-travel.

use thiserror::Error;
use tracing::{info, warn};

use super::{derive::recompute, interlock, CloseInterlock, Panel};
use crate::domain::{BreakerState, K1Edge, LockoutState, PanelState, TripSource};

/// Why a command was refused. Commands never raise: the command surface maps
/// this to the boolean the driver sees, and the message goes to the log.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Rejection {
    #[error("an operation is already in progress")]
    Busy,
    #[error("breaker is not closed")]
    BreakerNotClosed,
    #[error("breaker is not closing")]
    BreakerNotClosing,
    #[error("breaker is not tripping")]
    BreakerNotTripping,
    #[error("dc control supply is absent")]
    DcAbsent,
    #[error("lockout relay is not latched")]
    LockoutNotLatched,
    #[error("no close command pulse is active")]
    NoClosePulse,
    #[error("closing interlocks not met: {0:?}")]
    InterlocksNotMet(Vec<CloseInterlock>),
}

impl Panel {
    fn guard_not_busy(&self) -> Result<(), Rejection> {
        if self.state.operation_in_progress {
            Err(Rejection::Busy)
        } else {
            Ok(())
        }
    }

    /// Spring motor runs whenever the spring is flat and DC is available.
    fn recharge_spring(&mut self) {
        if !self.state.spring_charged && self.state.dc_ok {
            self.state.spring_charged = true;
            info!("closing spring recharged");
        }
    }

    /// Begin the closing stroke. Requires an active close command pulse and
    /// the full interlock chain; on success the breaker is mid-travel and the
    /// driver must call [`Panel::finish_close`] after the travel time.
    pub fn attempt_close(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        if !self.state.remote_close_command_active {
            return Err(Rejection::NoClosePulse);
        }

        let blocking = interlock::blocking_conditions(&self.state);
        if !blocking.is_empty() {
            warn!(?blocking, "close blocked, interlocks not met");
            return Err(Rejection::InterlocksNotMet(blocking));
        }

        self.state.operation_in_progress = true;
        self.state.breaker_state = BreakerState::Closing;
        self.state.spring_charged = false;
        recompute(&mut self.state);
        info!("closing breaker");
        Ok(())
    }

    /// Complete the closing stroke: main contacts made, spring recharged.
    pub fn finish_close(&mut self) -> Result<(), Rejection> {
        if self.state.breaker_state != BreakerState::Closing {
            return Err(Rejection::BreakerNotClosing);
        }

        self.state.breaker_state = BreakerState::Closed;
        recompute(&mut self.state);
        self.recharge_spring();
        self.state.operation_in_progress = false;
        info!(breaker_state = %self.state.breaker_state, "close complete");
        Ok(())
    }

    fn guard_trip_preconditions(&self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        if self.state.breaker_state != BreakerState::Closed {
            return Err(Rejection::BreakerNotClosed);
        }
        if !self.state.dc_ok {
            return Err(Rejection::DcAbsent);
        }
        Ok(())
    }

    /// Begin a trip from one of the direct sources (manual, remote, ...).
    /// `label` is the human-readable name the driver shows for the source.
    pub fn initiate_direct_trip(
        &mut self,
        source: TripSource,
        label: &str,
    ) -> Result<(), Rejection> {
        self.guard_trip_preconditions()?;

        self.state.operation_in_progress = true;
        self.state.trip_signals.set(source, true);
        self.state.breaker_state = BreakerState::Tripping;
        recompute(&mut self.state);
        info!(%source, label, "trip command received");
        Ok(())
    }

    /// Complete a direct trip: contacts open, source flag drops out.
    pub fn finish_direct_trip(&mut self, source: TripSource) -> Result<(), Rejection> {
        if self.state.breaker_state != BreakerState::Tripping {
            return Err(Rejection::BreakerNotTripping);
        }

        self.state.trip_signals.set(source, false);
        self.state.breaker_state = BreakerState::Open;
        recompute(&mut self.state);
        self.state.operation_in_progress = false;
        info!(breaker_state = %self.state.breaker_state, "trip complete");
        Ok(())
    }

    /// Begin a protection trip: drives the K86 coil, so the lockout relay
    /// latches immediately and blocks re-closing until `reset_k86`.
    pub fn initiate_protection_trip(&mut self) -> Result<(), Rejection> {
        self.guard_trip_preconditions()?;

        self.state.operation_in_progress = true;
        self.state.trip_signals.protection = true;
        self.state.k86_state = LockoutState::Latched;
        self.state.breaker_state = BreakerState::Tripping;
        recompute(&mut self.state);
        info!("protection trip received, K86 latched");
        Ok(())
    }

    /// Complete a protection trip. K86 stays latched.
    pub fn finish_protection_trip(&mut self) -> Result<(), Rejection> {
        if self.state.breaker_state != BreakerState::Tripping {
            return Err(Rejection::BreakerNotTripping);
        }

        self.state.trip_signals.protection = false;
        self.state.breaker_state = BreakerState::Open;
        recompute(&mut self.state);
        self.state.operation_in_progress = false;
        info!(
            breaker_state = %self.state.breaker_state,
            k86_state = %self.state.k86_state,
            "protection trip complete"
        );
        Ok(())
    }

    /// Manually reset the latched lockout relay. Needs DC for the reset coil.
    pub fn reset_k86(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        if self.state.k86_state != LockoutState::Latched {
            return Err(Rejection::LockoutNotLatched);
        }
        if !self.state.dc_ok {
            return Err(Rejection::DcAbsent);
        }

        self.state.k86_state = LockoutState::Reset;
        recompute(&mut self.state);
        info!("K86 lockout relay reset");
        Ok(())
    }

    /// Restore the documented initial configuration, field for field.
    pub fn reset_simulation(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;

        self.state = PanelState::initial();
        recompute(&mut self.state);
        info!("simulation reset to initial configuration");
        Ok(())
    }

    /// Flip the K1 command relay and report the edge. A rising edge also
    /// starts the close command pulse; the command surface is the edge
    /// handler that invokes [`Panel::attempt_close`] on it, so the mutation
    /// and its triggered consequence stay two separate steps.
    pub fn toggle_k1(&mut self) -> Result<K1Edge, Rejection> {
        self.guard_not_busy()?;
        if !self.state.dc_ok {
            return Err(Rejection::DcAbsent);
        }

        self.state.k1_relay_energized = !self.state.k1_relay_energized;
        if self.state.k1_relay_energized {
            self.state.remote_close_command_active = true;
            recompute(&mut self.state);
            info!("K1 relay energized, close command pulse initiated");
            Ok(K1Edge::Rising)
        } else {
            self.state.remote_close_command_active = false;
            recompute(&mut self.state);
            info!("K1 relay de-energized");
            Ok(K1Edge::Falling)
        }
    }

    /// Drop the close command pulse after the driver-chosen pulse duration.
    /// Idempotent.
    pub fn end_k1_pulse(&mut self) {
        if self.state.remote_close_command_active {
            self.state.remote_close_command_active = false;
            info!("close command pulse ended");
        }
    }

    /// Flip the DC control supply. Losing DC drops every electrically held
    /// relay and trip signal; the mechanically latched K86 is unaffected.
    /// Restoring DC lets the spring motor recharge a flat spring.
    pub fn toggle_dc(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;

        self.state.dc_ok = !self.state.dc_ok;
        if !self.state.dc_ok {
            self.state.k1_relay_energized = false;
            self.state.remote_close_command_active = false;
            self.state.trip_signals.clear_all();
        }
        recompute(&mut self.state);
        if self.state.dc_ok {
            self.recharge_spring();
        }
        info!(dc_ok = self.state.dc_ok, "DC supply toggled");
        Ok(())
    }

    /// Flip trip-coil supervision. The supervision relay itself needs DC.
    pub fn toggle_tc_healthy(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        if !self.state.dc_ok {
            return Err(Rejection::DcAbsent);
        }

        self.state.tc_healthy = !self.state.tc_healthy;
        recompute(&mut self.state);
        info!(tc_healthy = self.state.tc_healthy, "trip coil supervision toggled");
        Ok(())
    }

    /// Rack the breaker between service and test/drawn position.
    pub fn toggle_service_pos(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        self.state.breaker_in_service = !self.state.breaker_in_service;
        recompute(&mut self.state);
        info!(
            breaker_in_service = self.state.breaker_in_service,
            "service position toggled"
        );
        Ok(())
    }

    /// Apply or remove the bus earth switch.
    pub fn toggle_bus_earth(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        self.state.bus_not_earthed = !self.state.bus_not_earthed;
        recompute(&mut self.state);
        info!(bus_not_earthed = self.state.bus_not_earthed, "bus earth toggled");
        Ok(())
    }

    /// Flip the bus-voltage supervision input.
    pub fn toggle_bus_v_healthy(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        self.state.bus_voltage_healthy = !self.state.bus_voltage_healthy;
        recompute(&mut self.state);
        info!(
            bus_voltage_healthy = self.state.bus_voltage_healthy,
            "bus voltage supervision toggled"
        );
        Ok(())
    }

    /// Flip the bus-coupler interlock contact.
    pub fn toggle_buscoupler_interlock(&mut self) -> Result<(), Rejection> {
        self.guard_not_busy()?;
        self.state.buscoupler_interlock_closed = !self.state.buscoupler_interlock_closed;
        recompute(&mut self.state);
        info!(
            buscoupler_interlock_closed = self.state.buscoupler_interlock_closed,
            "bus coupler interlock toggled"
        );
        Ok(())
    }
}
