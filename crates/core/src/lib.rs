//! Tagopts Core Library
//!
//! Declarative command line parsing. An options record describes its flags,
//! verbs and remainder through short tag strings, and a [`FlagSet`] built
//! from the record writes parsed values straight into its fields.
//!
//! # Key Features
//!
//! - **Tag Grammar**: `-s, --server, obligatory, description='Server'`
//! - **Flag Kinds**: booleans, integers, strings, string lists and counters
//! - **Verbs**: nested sub-command scopes with their own flags
//! - **Validation**: obligatory flags and mutually exclusive groups
//! - **Help Output**: aligned help text generated from the descriptors
//!
//! # Examples
//!
//! ```
//! use tagopts_core::{Field, Options};
//!
//! #[derive(Default)]
//! struct Settings {
//!     server: String,
//!     verbosity: i64,
//! }
//!
//! impl Options for Settings {
//!     fn fields(&mut self) -> Vec<Field<'_>> {
//!         vec![
//!             Field::flag("server", "-s, --server, obligatory", &mut self.server),
//!             Field::flag("verbosity", "-v, accumulate", &mut self.verbosity),
//!         ]
//!     }
//! }
//!
//! let mut settings = Settings::default();
//! tagopts_core::parse("tool", &mut settings, ["-s", "example.com", "-vv"])?;
//! assert_eq!(settings.server, "example.com");
//! assert_eq!(settings.verbosity, 2);
//! # Ok::<(), tagopts_core::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod field;
pub mod help;
mod matching;
pub mod registry;
pub mod tag;
mod validation;

pub use error::{Error, Result};
pub use field::{Field, Kind, Options, Role, Slot};
pub use help::Usage;
pub use registry::{Flag, FlagSet, Scope};
pub use tag::{parse_tag, Tag};

/// Builds a [`FlagSet`] for `options` and parses `args` into it.
///
/// # Errors
///
/// Returns any registration error from [`FlagSet::new`] and any matching or
/// validation error from [`FlagSet::parse`], including
/// [`Error::HelpRequested`].
pub fn parse<I, S>(name: &str, options: &mut impl Options, args: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    FlagSet::new(name, options)?.parse(args)
}
