//! The interlock/state engine of one incomer panel.
//!
//! [`Panel`] owns the single [`PanelState`] of a simulation run. All
//! mutation goes through the sequencer operations in [`sequencer`]; derived
//! relay fields are recomputed by [`derive`] after every primary mutation, so
//! a snapshot taken at any point is internally consistent.

pub mod derive;
pub mod interlock;
pub mod sequencer;

pub use interlock::CloseInterlock;
pub use sequencer::Rejection;

use crate::domain::PanelState;

/// One incomer panel instance. No ambient globals: every operation takes the
/// panel by reference and the driver polls `snapshot` on its own schedule.
pub struct Panel {
    state: PanelState,
}

impl Panel {
    pub fn new() -> Self {
        let mut state = PanelState::initial();
        derive::recompute(&mut state);
        Self { state }
    }

    /// Read-only snapshot of every primary and derived field.
    pub fn snapshot(&self) -> PanelState {
        self.state.clone()
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}
