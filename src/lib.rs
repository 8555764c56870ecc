//! Interlock and trip-logic model of a medium-voltage circuit-breaker
//! incomer panel: the conditions under which the breaker may close, the trip
//! paths that force it open, and the auxiliary relay states derived from the
//! supervision inputs. The core is synchronous and command-driven; an
//! external driver paces the begin/finish phases (see `src/main.rs` for the
//! bundled stdin driver).

pub mod command;
pub mod config;
pub mod domain;
pub mod panel;
pub mod telemetry;

pub use command::Command;
pub use panel::Panel;
