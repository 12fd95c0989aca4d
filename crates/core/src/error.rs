use itertools::Itertools;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not a failure: a help flag was given and the caller should print help.
    #[error("Help requested")]
    HelpRequested,

    #[error("Invalid tag item `{}`: {}", .item, .reason)]
    TagSyntax { item: String, reason: String },

    #[error("Flag name `{}` is declared more than once", .0)]
    NameCollision(String),

    #[error("Invalid options declaration at field `{}`: {}", .field, .reason)]
    Structural { field: String, reason: String },

    #[error("Unknown flag: `{}`", .0)]
    UnknownFlag(String),

    #[error("Flag `{}` requires a value", .0)]
    MissingValue(String),

    #[error("Invalid {} value for flag `{}`: \"{}\"", .kind, .flag, .value)]
    ValueType {
        flag: String,
        kind: String,
        value: String,
    },

    #[error("Flag `{}` does not take a value, got \"{}\"", .flag, .value)]
    UnexpectedValue { flag: String, value: String },

    #[error("Invalid trailing arguments: {}", joined(.0, " "))]
    UnexpectedArguments(Vec<String>),

    #[error("{} must be specified", .0)]
    ObligatoryMissing(String),

    #[error("Only one of {} may be specified (mutex group `{}`)", joined(.members, ", "), .group)]
    MutexViolation { group: String, members: Vec<String> },
}

fn joined(items: &[String], separator: &str) -> String {
    items.iter().join(separator)
}

impl Error {
    pub fn tag_syntax(item: &str, reason: &str) -> Self {
        Self::TagSyntax {
            item: item.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn structural(field: &str, reason: &str) -> Self {
        Self::Structural {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// True for the help signal, which callers usually branch on separately.
    #[must_use]
    pub fn is_help_request(&self) -> bool {
        matches!(self, Self::HelpRequested)
    }
}
