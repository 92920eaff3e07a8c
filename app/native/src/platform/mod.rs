//! Platform helpers shared by the library and the CLI host.
//!
//! - [`path`] - shell-like path expansion for configuration values
//! - [`thread`] - named background thread spawning

pub mod path;
pub mod thread;
