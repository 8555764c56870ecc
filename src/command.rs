//! The command surface the external driver talks to.
//!
//! A thin dispatch layer: parse a command word, forward to the sequencer,
//! map the result onto the boolean the driver expects. No logic of its own
//! beyond argument validation; an unknown command word or trip-source
//! identifier simply fails to parse and the driver drops it.

use std::str::FromStr;

use tracing::warn;

use crate::domain::{K1Edge, TripSource};
use crate::panel::{Panel, Rejection};

/// Every operation the driver can issue, with its arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ResetSimulation,
    FinishClose,
    InitiateDirectTrip { source: TripSource, label: String },
    FinishDirectTrip { source: TripSource },
    InitiateProtectionTrip,
    FinishProtectionTrip,
    ResetK86,
    ToggleDc,
    ToggleTcHealthy,
    ToggleK1,
    EndK1Pulse,
    ToggleServicePos,
    ToggleBusEarth,
    ToggleBusVHealthy,
    ToggleBuscouplerInterlock,
}

impl Command {
    /// Parse a driver input line. `None` for anything unrecognized,
    /// including a `trip`/`finish-trip` with an unknown source identifier.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let word = words.next()?;

        let cmd = match word {
            "reset" => Self::ResetSimulation,
            "finish-close" => Self::FinishClose,
            "trip" => {
                let ident = words.next()?;
                let source = TripSource::from_str(ident).ok()?;
                let label = words.next().unwrap_or(ident).to_string();
                Self::InitiateDirectTrip { source, label }
            }
            "finish-trip" => {
                let source = TripSource::from_str(words.next()?).ok()?;
                Self::FinishDirectTrip { source }
            }
            "prot-trip" => Self::InitiateProtectionTrip,
            "finish-prot-trip" => Self::FinishProtectionTrip,
            "reset-k86" => Self::ResetK86,
            "dc" => Self::ToggleDc,
            "tc" => Self::ToggleTcHealthy,
            "k1" => Self::ToggleK1,
            "pulse-end" => Self::EndK1Pulse,
            "service" => Self::ToggleServicePos,
            "earth" => Self::ToggleBusEarth,
            "busv" => Self::ToggleBusVHealthy,
            "coupler" => Self::ToggleBuscouplerInterlock,
            _ => return None,
        };
        Some(cmd)
    }
}

impl Panel {
    /// Execute one command. `true` means the operation took effect; `false`
    /// means it was rejected and the state is unchanged. Never panics.
    pub fn execute(&mut self, command: &Command) -> bool {
        let result = match command {
            Command::ResetSimulation => self.reset_simulation(),
            Command::FinishClose => self.finish_close(),
            Command::InitiateDirectTrip { source, label } => {
                self.initiate_direct_trip(*source, label)
            }
            Command::FinishDirectTrip { source } => self.finish_direct_trip(*source),
            Command::InitiateProtectionTrip => self.initiate_protection_trip(),
            Command::FinishProtectionTrip => self.finish_protection_trip(),
            Command::ResetK86 => self.reset_k86(),
            Command::ToggleDc => self.toggle_dc(),
            Command::ToggleTcHealthy => self.toggle_tc_healthy(),
            Command::ToggleServicePos => self.toggle_service_pos(),
            Command::ToggleBusEarth => self.toggle_bus_earth(),
            Command::ToggleBusVHealthy => self.toggle_bus_v_healthy(),
            Command::ToggleBuscouplerInterlock => self.toggle_buscoupler_interlock(),
            Command::EndK1Pulse => {
                self.end_k1_pulse();
                Ok(())
            }
            // Edge handler for the K1 toggle: a rising edge triggers exactly
            // one close attempt; a falling edge closes nothing.
            Command::ToggleK1 => match self.toggle_k1() {
                Ok(K1Edge::Rising) => self.attempt_close(),
                Ok(K1Edge::Falling) => Err(Rejection::NoClosePulse),
                Err(rejection) => Err(rejection),
            },
        };

        match result {
            Ok(()) => true,
            Err(rejection) => {
                warn!(?command, %rejection, "command rejected");
                false
            }
        }
    }
}
