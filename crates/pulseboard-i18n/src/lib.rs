//! # Pulseboard I18n
//!
//! Localized panel titles and axis labels using the Fluent localization system.
//!
//! Message sources are embedded at compile time, one `main.ftl` per locale.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod locale;
pub mod localizer;
pub mod messages;

pub use locale::Locale;
pub use localizer::Localizer;
