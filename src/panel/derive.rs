//! Derivation of the auxiliary relay states from the primary fields.

use crate::domain::{BreakerState, CoilState, LockoutState, PanelState};

/// Recompute every derived field from the current primary fields.
///
/// Pure with respect to the primaries: no primary field is touched, and
/// applying it twice in a row is a no-op. The sequencer calls this after
/// every primary mutation, before any read of derived state.
pub fn recompute(state: &mut PanelState) {
    state.kdc_state = CoilState::from_bool(state.dc_ok);
    state.dc_fail_alarm = !state.dc_ok;
    state.ktc_state = CoilState::from_bool(state.tc_healthy && state.dc_ok);
    state.k94_state =
        CoilState::from_bool(state.breaker_state == BreakerState::Closed && state.dc_ok);
    state.k1_state = CoilState::from_bool(state.k1_relay_energized && state.dc_ok);
    state.trip_signal_k86_no = state.k86_state == LockoutState::Latched;
}
