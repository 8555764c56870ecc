pub mod relay;
pub mod state;

pub use relay::*;
pub use state::*;
