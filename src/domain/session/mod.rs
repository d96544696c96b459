//! Record/play session state

mod state;
mod status;

pub use state::{InvalidStateTransition, Session, SessionState};
pub use status::SessionStatus;
