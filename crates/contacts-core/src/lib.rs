//! People records, the [`store::PersonStore`] gateway and the injected
//! [`clock::Clock`]. No HTTP or database code lives here.

pub mod clock;
pub mod error;
pub mod person;
pub mod store;

pub use error::{Error, Result};
