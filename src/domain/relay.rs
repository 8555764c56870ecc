use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter, EnumString};

/// Main contact position of the circuit breaker.
///
/// `Closing` and `Tripping` are the travelling states between the resting
/// positions; the mechanism cannot be arrested mid-travel, so each of them
/// has exactly one legal exit (`finish_close` / `finish_*_trip`).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum BreakerState {
    Open,
    Closing,
    Closed,
    Tripping,
}

/// K86 lockout relay. Mechanically latched: once `Latched` it survives DC
/// loss and only a manual `reset_k86` returns it to `Reset`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "UPPERCASE")]
pub enum LockoutState {
    Reset,
    Latched,
}

/// Coil state of an auxiliary relay (KDC, KTC, K94, K1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum CoilState {
    Energized,
    DeEnergized,
}

impl CoilState {
    pub const fn from_bool(energized: bool) -> Self {
        if energized {
            Self::Energized
        } else {
            Self::DeEnergized
        }
    }

    pub const fn is_energized(self) -> bool {
        matches!(self, Self::Energized)
    }
}

/// The closed set of direct-trip inputs wired into the tripping circuit.
///
/// The protection trip is not listed here: it runs through its own K86 coil
/// path and latches the lockout relay, see the sequencer.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Display, EnumIter, EnumString, EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TripSource {
    /// S2 manual trip pushbutton on the panel front.
    #[strum(serialize = "manual", serialize = "s2")]
    Manual,
    /// K2 remote trip command relay.
    #[strum(serialize = "remote", serialize = "k2")]
    Remote,
    /// Bus-coupler KT intertrip contact.
    #[strum(serialize = "buscoupler_kt", serialize = "kt")]
    BuscouplerKt,
    /// Bus-coupler synchronising-scheme trip.
    #[strum(serialize = "buscoupler_sync", serialize = "sync")]
    BuscouplerSync,
    /// P127 undervoltage element.
    #[strum(serialize = "undervoltage", serialize = "uv")]
    Undervoltage,
    /// 50BF breaker-failure scheme.
    #[strum(serialize = "breaker_failure", serialize = "bf")]
    BreakerFailure,
}

impl TripSource {
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Edge reported by `toggle_k1`. The command surface subscribes to the rising
/// edge and attempts the close there; the toggle itself only moves the relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum K1Edge {
    Rising,
    Falling,
}
