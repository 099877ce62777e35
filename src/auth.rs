//! Auth-domain identifiers, the persisted user record, and session phases.

pub mod id;
pub mod secret;
pub mod state;
pub mod user;

pub use id::*;
pub use secret::*;
pub use state::*;
pub use user::*;
