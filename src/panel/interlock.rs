//! The closing-interlock chain.
//!
//! Mirrors the series contacts of the closing circuit: every condition must
//! hold for the close coil to see volts. Both functions are side-effect-free
//! and work on whatever snapshot they are given.

use serde::Serialize;
use strum_macros::Display;

use crate::domain::{BreakerState, LockoutState, PanelState};

/// One open contact in the closing circuit, named for the log and for the
/// rejection returned to the driver.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Display)]
pub enum CloseInterlock {
    /// DC control supply absent.
    DcAbsent,
    /// KTC de-energized: trip-coil supervision unhealthy.
    TripCoilUnhealthy,
    /// K1 command relay de-energized.
    K1DeEnergized,
    /// Breaker racked out to test/drawn position.
    NotInService,
    /// Bus earth switch applied.
    BusEarthed,
    /// Bus voltage low.
    BusVoltageLow,
    /// Bus-coupler interlock contact open.
    BuscouplerInterlockOpen,
    /// K86 lockout relay latched.
    LockoutLatched,
    /// K94 anti-pump relay energized: breaker already closed.
    AntiPumpEnergized,
    /// 52b auxiliary contact open: breaker not in the open position.
    BreakerNotOpen,
    /// Closing spring discharged.
    SpringDischarged,
}

/// Every condition currently blocking a close, in circuit order. Empty means
/// the closing path is complete.
pub fn blocking_conditions(state: &PanelState) -> Vec<CloseInterlock> {
    let mut blocking = Vec::new();

    if !state.dc_ok {
        blocking.push(CloseInterlock::DcAbsent);
    }
    if !state.ktc_state.is_energized() {
        blocking.push(CloseInterlock::TripCoilUnhealthy);
    }
    if !state.k1_state.is_energized() {
        blocking.push(CloseInterlock::K1DeEnergized);
    }
    if !state.breaker_in_service {
        blocking.push(CloseInterlock::NotInService);
    }
    if !state.bus_not_earthed {
        blocking.push(CloseInterlock::BusEarthed);
    }
    if !state.bus_voltage_healthy {
        blocking.push(CloseInterlock::BusVoltageLow);
    }
    if !state.buscoupler_interlock_closed {
        blocking.push(CloseInterlock::BuscouplerInterlockOpen);
    }
    if state.k86_state != LockoutState::Reset {
        blocking.push(CloseInterlock::LockoutLatched);
    }
    if state.k94_state.is_energized() {
        blocking.push(CloseInterlock::AntiPumpEnergized);
    }
    if state.breaker_state != BreakerState::Open {
        blocking.push(CloseInterlock::BreakerNotOpen);
    }
    if !state.spring_charged {
        blocking.push(CloseInterlock::SpringDischarged);
    }

    blocking
}

/// True iff all ten closing interlocks are met.
pub fn permits_close(state: &PanelState) -> bool {
    blocking_conditions(state).is_empty()
}
