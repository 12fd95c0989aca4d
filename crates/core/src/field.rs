//! Field declarations for options records.
//!
//! An options record describes its fields by implementing [`Options`]. Each
//! [`Field`] carries the field name, its tag string, a [`Role`] and a mutable
//! [`Slot`] the parser writes into.

use std::fmt::{Display, Formatter};

/// The structural role of a field within its record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// An ordinary flag, or a verb when its tag is a single bare word.
    Flag,
    /// The help flag. Giving it stops parsing with [`Error::HelpRequested`].
    ///
    /// [`Error::HelpRequested`]: crate::error::Error::HelpRequested
    Help,
    /// Marks the point after which verb fields may be declared.
    Verbs,
    /// Collects trailing arguments that are neither flags nor verbs.
    Remainder,
}

/// The semantic kind of a value slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    Integer,
    String,
    List,
}

impl Display for Kind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::String => "string",
            Kind::List => "list",
        })
    }
}

/// A mutable reference to the storage of one field.
#[derive(Debug)]
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(&'a mut i64),
    Str(&'a mut String),
    List(&'a mut Vec<String>),
    /// The fields of a nested record, used for verbs.
    Record(Vec<Field<'a>>),
    /// No storage, e.g. a verbs marker that does not record the chosen verb.
    Empty,
}

impl Slot<'_> {
    /// The value kind of this slot, or `None` for records and empty slots.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Slot::Bool(_) => Some(Kind::Boolean),
            Slot::Int(_) => Some(Kind::Integer),
            Slot::Str(_) => Some(Kind::String),
            Slot::List(_) => Some(Kind::List),
            Slot::Record(_) | Slot::Empty => None,
        }
    }
}

impl<'a> From<&'a mut bool> for Slot<'a> {
    fn from(value: &'a mut bool) -> Self {
        Slot::Bool(value)
    }
}

impl<'a> From<&'a mut i64> for Slot<'a> {
    fn from(value: &'a mut i64) -> Self {
        Slot::Int(value)
    }
}

impl<'a> From<&'a mut String> for Slot<'a> {
    fn from(value: &'a mut String) -> Self {
        Slot::Str(value)
    }
}

impl<'a> From<&'a mut Vec<String>> for Slot<'a> {
    fn from(value: &'a mut Vec<String>) -> Self {
        Slot::List(value)
    }
}

/// One declared field of an options record.
#[derive(Debug)]
pub struct Field<'a> {
    pub name: &'static str,
    pub tag: &'static str,
    pub role: Role,
    pub slot: Slot<'a>,
}

impl<'a> Field<'a> {
    /// An ordinary flag bound to `slot`.
    pub fn flag(name: &'static str, tag: &'static str, slot: impl Into<Slot<'a>>) -> Self {
        Self {
            name,
            tag,
            role: Role::Flag,
            slot: slot.into(),
        }
    }

    /// The help flag of the enclosing record.
    pub fn help(name: &'static str, tag: &'static str, slot: &'a mut bool) -> Self {
        Self {
            name,
            tag,
            role: Role::Help,
            slot: Slot::Bool(slot),
        }
    }

    /// The verbs marker. The selected verb's name is stored in `slot`.
    pub fn verbs(name: &'static str, slot: &'a mut String) -> Self {
        Self {
            name,
            tag: "",
            role: Role::Verbs,
            slot: Slot::Str(slot),
        }
    }

    /// A verbs marker without storage for the selected verb.
    pub fn verbs_marker(name: &'static str) -> Self {
        Self {
            name,
            tag: "",
            role: Role::Verbs,
            slot: Slot::Empty,
        }
    }

    /// A verb named by `tag`, whose flags are the fields of `record`.
    pub fn verb(name: &'static str, tag: &'static str, record: &'a mut impl Options) -> Self {
        Self {
            name,
            tag,
            role: Role::Flag,
            slot: Slot::Record(record.fields()),
        }
    }

    /// The remainder collector of the enclosing record.
    pub fn remainder(name: &'static str, slot: &'a mut Vec<String>) -> Self {
        Self {
            name,
            tag: "",
            role: Role::Remainder,
            slot: Slot::List(slot),
        }
    }
}

/// Exposes the fields of an options record to the parser.
///
/// # Examples
///
/// ```
/// use tagopts_core::field::{Field, Options};
///
/// #[derive(Default)]
/// struct Create {
///     name: String,
/// }
///
/// impl Options for Create {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![Field::flag("name", "--name, -n", &mut self.name)]
///     }
/// }
///
/// #[derive(Default)]
/// struct Cli {
///     server: String,
///     verb: String,
///     create: Create,
/// }
///
/// impl Options for Cli {
///     fn fields(&mut self) -> Vec<Field<'_>> {
///         vec![
///             Field::flag("server", "--server, -s", &mut self.server),
///             Field::verbs("verb", &mut self.verb),
///             Field::verb("create", "create", &mut self.create),
///         ]
///     }
/// }
///
/// let mut cli = Cli::default();
/// tagopts_core::parse("cli", &mut cli, ["-s", "127.0.0.1", "create", "-n", "doc"]).unwrap();
/// assert_eq!(cli.server, "127.0.0.1");
/// assert_eq!(cli.verb, "create");
/// assert_eq!(cli.create.name, "doc");
/// ```
pub trait Options {
    /// Returns the record's fields in declaration order.
    fn fields(&mut self) -> Vec<Field<'_>>;
}
