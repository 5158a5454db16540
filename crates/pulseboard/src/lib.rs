//! # Pulseboard
//!
//! Application layer tying the pipeline together: a [`Pulseboard`] facade
//! holding configuration, localizer and per-user sessions, and the command
//! line launcher that prints dashboard documents as JSON.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::Pulseboard;
pub use cli::{render_json, run, Cli, Command};
pub use error::{AppError, AppResult};
