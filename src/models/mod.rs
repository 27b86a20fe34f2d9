//! Data models for the Litoral campaign gallery.
//!
//! These models match the admin frontend interfaces exactly for seamless interoperability.

mod campaign;
mod category;
mod session;
mod user;

pub use campaign::*;
pub use category::*;
pub use session::*;
pub use user::*;
