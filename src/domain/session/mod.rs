//! Session domain module.
//!
//! The assessment session aggregate, its workflow stages and the errors its
//! transitions can raise.

mod aggregate;
mod errors;
mod stage;

pub use aggregate::Session;
pub use errors::SessionError;
pub use stage::Stage;
