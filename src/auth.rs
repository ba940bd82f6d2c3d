//! Client credentials, Basic-auth encoding, and redacted token models.

pub mod basic;
pub mod credentials;
pub mod secret;
pub mod token;

pub use basic::*;
pub use credentials::*;
pub use secret::*;
pub use token::*;
