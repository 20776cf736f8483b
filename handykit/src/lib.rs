//! Small, independent utility helpers.
//!
//! - **[`core`]**: Pure helpers with no I/O: map convenience operations
//!   ([`core::map`]), named member lookup ([`core::member`]) and nullability
//!   classification ([`core::nullable`]).
//! - **[`io`]**: Process launch configuration ([`io::process`]) and the
//!   launch-profile file consumed by the `handykit` binary ([`io::config`]).
//!
//! The pieces do not depend on one another; each can be used on its own.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use error::MapError;
