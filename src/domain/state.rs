use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

use super::relay::{BreakerState, CoilState, LockoutState, TripSource};

/// Active/inactive flags for every trip path into the tripping circuit.
///
/// The direct sources form a closed table indexed by [`TripSource`]; the
/// protection path is separate because it also drives the K86 coil.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripSignals {
    direct: [bool; TripSource::COUNT],
    pub protection: bool,
}

impl TripSignals {
    pub const fn inactive() -> Self {
        Self {
            direct: [false; TripSource::COUNT],
            protection: false,
        }
    }

    pub fn get(&self, source: TripSource) -> bool {
        self.direct[source.index()]
    }

    pub fn set(&mut self, source: TripSource, active: bool) {
        self.direct[source.index()] = active;
    }

    /// Any direct-trip input currently asserted.
    pub fn any_direct_active(&self) -> bool {
        TripSource::iter().any(|source| self.get(source))
    }

    /// DC loss drops every electrically held trip signal at once.
    pub fn clear_all(&mut self) {
        self.direct = [false; TripSource::COUNT];
        self.protection = false;
    }
}

/// Complete state of one incomer panel: the primary fields the sequencer and
/// toggles mutate, plus the derived relay fields recomputed after every
/// mutation. One instance per simulation run; the driver reads it through
/// `Panel::snapshot` and never writes it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PanelState {
    // Primary fields.
    pub breaker_state: BreakerState,
    pub k86_state: LockoutState,
    pub spring_charged: bool,
    pub dc_ok: bool,
    pub tc_healthy: bool,
    pub breaker_in_service: bool,
    pub bus_not_earthed: bool,
    pub bus_voltage_healthy: bool,
    pub buscoupler_interlock_closed: bool,
    pub k1_relay_energized: bool,
    pub remote_close_command_active: bool,
    pub trip_signals: TripSignals,
    pub operation_in_progress: bool,

    // Derived fields, assigned only by `panel::derive::recompute`.
    pub kdc_state: CoilState,
    pub dc_fail_alarm: bool,
    pub ktc_state: CoilState,
    pub k94_state: CoilState,
    pub k1_state: CoilState,
    pub trip_signal_k86_no: bool,
}

impl PanelState {
    /// The fixed start-of-run configuration: breaker open, spring charged,
    /// all supervision healthy, K86 reset, no commands or trips active.
    /// `reset_simulation` restores exactly this value by assignment.
    pub const fn initial() -> Self {
        Self {
            breaker_state: BreakerState::Open,
            k86_state: LockoutState::Reset,
            spring_charged: true,
            dc_ok: true,
            tc_healthy: true,
            breaker_in_service: true,
            bus_not_earthed: true,
            bus_voltage_healthy: true,
            buscoupler_interlock_closed: true,
            k1_relay_energized: false,
            remote_close_command_active: false,
            trip_signals: TripSignals::inactive(),
            operation_in_progress: false,

            kdc_state: CoilState::Energized,
            dc_fail_alarm: false,
            ktc_state: CoilState::Energized,
            k94_state: CoilState::DeEnergized,
            k1_state: CoilState::DeEnergized,
            trip_signal_k86_no: false,
        }
    }

    /// Whether any input of the tripping circuit is asserted: a direct
    /// source, the protection path, or the K86 NO contact.
    pub fn any_trip_active(&self) -> bool {
        self.trip_signals.any_direct_active()
            || self.trip_signals.protection
            || self.trip_signal_k86_no
    }
}
