//! Descriptor registry.
//!
//! Turns the fields of an options record into a tree of [`Scope`]s: the root
//! scope holds the global flags, and every verb adds a nested scope holding
//! the flags of its own record.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, warn};

use crate::error::{Error, Result};
use crate::field::{Field, Kind, Options, Role, Slot};
use crate::tag::{is_verb_tag, parse_tag, Tag};

/// A flag descriptor bound to its value slot.
#[derive(Debug)]
pub struct Flag<'a> {
    pub(crate) field: &'static str,
    pub(crate) tag: Tag,
    pub(crate) kind: Kind,
    pub(crate) slot: Slot<'a>,
    pub(crate) specified: bool,
}

impl<'a> Flag<'a> {
    fn build(field: Field<'a>) -> Result<Self> {
        let tag = parse_tag(field.tag)?;

        if tag.is_anonymous() {
            return Err(Error::structural(field.name, "flag declares no names"));
        }

        let Some(kind) = field.slot.kind() else {
            return Err(Error::structural(field.name, "flag has no value slot"));
        };

        if field.role == Role::Help && kind != Kind::Boolean {
            return Err(Error::structural(field.name, "help flag must be boolean"));
        }

        if tag.accumulate && kind == Kind::String {
            return Err(Error::structural(
                field.name,
                "accumulate is not supported for string flags",
            ));
        }

        Ok(Self {
            field: field.name,
            tag,
            kind,
            slot: field.slot,
            specified: false,
        })
    }

    /// The field this flag was declared on.
    #[must_use]
    pub fn field(&self) -> &'static str {
        self.field
    }

    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Name used in messages, e.g. `--server`.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.tag.display_name()
    }

    /// Whether the flag occurred during the last parse.
    #[must_use]
    pub fn was_specified(&self) -> bool {
        self.specified
    }

    /// Nullary flags take no value and may appear in short-flag clusters.
    #[must_use]
    pub fn is_nullary(&self) -> bool {
        match self.kind {
            Kind::Boolean => true,
            Kind::Integer => self.tag.accumulate,
            Kind::String | Kind::List => false,
        }
    }
}

/// The flags, verbs and remainder of one record level.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    pub(crate) flags: Vec<Flag<'a>>,
    pub(crate) help: Option<usize>,
    pub(crate) remainder: Option<&'a mut Vec<String>>,
    pub(crate) verb_bearing: bool,
    pub(crate) selected_verb: Option<&'a mut String>,
    pub(crate) verbs: IndexMap<String, Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub(crate) fn build(fields: Vec<Field<'a>>) -> Result<Self> {
        let mut scope = Scope::default();
        let mut names = HashSet::new();

        for field in fields {
            match field.role {
                Role::Help => {
                    if scope.help.is_some() {
                        return Err(Error::structural(field.name, "more than one help flag"));
                    }
                    scope.help = Some(scope.flags.len());
                    scope.register(Flag::build(field)?, &mut names)?;
                }
                Role::Verbs => {
                    if scope.verb_bearing {
                        return Err(Error::structural(field.name, "more than one verbs marker"));
                    }
                    scope.verb_bearing = true;
                    match field.slot {
                        Slot::Str(selected) => scope.selected_verb = Some(selected),
                        Slot::Empty => {}
                        _ => {
                            return Err(Error::structural(
                                field.name,
                                "verbs marker must be a string or empty slot",
                            ))
                        }
                    }
                }
                Role::Remainder => {
                    if scope.remainder.is_some() {
                        return Err(Error::structural(field.name, "more than one remainder"));
                    }
                    match field.slot {
                        Slot::List(remainder) => scope.remainder = Some(remainder),
                        _ => {
                            return Err(Error::structural(
                                field.name,
                                "remainder must be a list slot",
                            ))
                        }
                    }
                }
                Role::Flag => scope.add_flag_or_verb(field, &mut names)?,
            }
        }

        Ok(scope)
    }

    fn add_flag_or_verb(&mut self, field: Field<'a>, names: &mut HashSet<String>) -> Result<()> {
        let declares_verb = matches!(field.slot, Slot::Record(_)) || is_verb_tag(field.tag);
        if !declares_verb {
            return self.register(Flag::build(field)?, names);
        }

        if !self.verb_bearing {
            return Err(Error::structural(
                field.name,
                "verb declared without a preceding verbs marker",
            ));
        }

        let Slot::Record(fields) = field.slot else {
            return Err(Error::structural(field.name, "verb must be a nested record"));
        };

        if !is_verb_tag(field.tag) {
            return Err(Error::structural(
                field.name,
                "verb tag must be a single bare word",
            ));
        }

        let verb = field.tag.trim().to_string();
        if self.verbs.contains_key(&verb) {
            return Err(Error::NameCollision(verb));
        }

        let child = Scope::build(fields)?;
        self.verbs.insert(verb, child);
        Ok(())
    }

    fn register(&mut self, flag: Flag<'a>, names: &mut HashSet<String>) -> Result<()> {
        for name in flag.tag.prefixed_names() {
            if !names.insert(name.clone()) {
                return Err(Error::NameCollision(name));
            }
        }

        self.flags.push(flag);
        Ok(())
    }

    /// Flags in declaration order, including the help flag.
    #[must_use]
    pub fn flags(&self) -> &[Flag<'a>] {
        &self.flags
    }

    #[must_use]
    pub fn help_flag(&self) -> Option<&Flag<'a>> {
        self.help.and_then(|index| self.flags.get(index))
    }

    #[must_use]
    pub fn has_remainder(&self) -> bool {
        self.remainder.is_some()
    }

    #[must_use]
    pub fn is_verb_bearing(&self) -> bool {
        self.verb_bearing
    }

    /// Verb names and their scopes in declaration order.
    pub fn verbs(&self) -> impl Iterator<Item = (&str, &Scope<'a>)> {
        self.verbs.iter().map(|(name, scope)| (name.as_str(), scope))
    }

    #[must_use]
    pub fn verb(&self, name: &str) -> Option<&Scope<'a>> {
        self.verbs.get(name)
    }

    pub(crate) fn find_long(&self, name: &str) -> Option<usize> {
        self.flags.iter().position(|flag| flag.tag.long.contains(name))
    }

    pub(crate) fn find_short(&self, name: char) -> Option<usize> {
        self.flags.iter().position(|flag| flag.tag.short.contains(&name))
    }

    pub(crate) fn declares(&self, token: &str) -> bool {
        self.flags.iter().any(|flag| flag.tag.matches(token))
    }

    pub(crate) fn is_help_token(&self, token: &str) -> bool {
        self.help_flag().is_some_and(|help| help.tag.matches(token))
    }

    pub(crate) fn reset(&mut self) {
        for flag in &mut self.flags {
            flag.specified = false;
        }
        for child in self.verbs.values_mut() {
            child.reset();
        }
    }

    fn warn_shadowed_remainders(&self, path: &str) {
        for (verb, child) in &self.verbs {
            if self.has_remainder() && child.has_remainder() {
                warn!("Remainder of verb `{verb}` is ignored, `{path}` collects trailing arguments");
            }
            child.warn_shadowed_remainders(verb);
        }
    }
}

/// A parser built from one options record.
///
/// The flag set borrows every slot of the record mutably, so the record can
/// only be read again once the flag set is dropped.
#[derive(Debug)]
pub struct FlagSet<'a> {
    pub(crate) name: String,
    pub(crate) root: Scope<'a>,
}

impl<'a> FlagSet<'a> {
    /// Builds the scope tree for `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if a tag is malformed ([`Error::TagSyntax`]), a name
    /// is declared twice in one scope ([`Error::NameCollision`]), or the
    /// record's structure is invalid ([`Error::Structural`]).
    pub fn new(name: &str, options: &'a mut impl Options) -> Result<Self> {
        let root = Scope::build(options.fields())?;

        debug!(
            "Registered `{}`: {} global flags, {} verbs",
            name,
            root.flags.len(),
            root.verbs.len()
        );
        root.warn_shadowed_remainders(name);

        Ok(Self {
            name: name.to_string(),
            root,
        })
    }

    /// The display name used in usage output.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn root(&self) -> &Scope<'a> {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Record {
        name: String,
        fast: bool,
        help: bool,
        verb: String,
        rest: Vec<String>,
        create: Create,
    }

    #[derive(Default)]
    struct Create {
        force: bool,
        rest: Vec<String>,
    }

    impl Options for Create {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("force", "-f, --force", &mut self.force),
                Field::remainder("rest", &mut self.rest),
            ]
        }
    }

    impl Options for Record {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("name", "--name, -n", &mut self.name),
                Field::flag("fast", "-f", &mut self.fast),
                Field::help("help", "-h, --help", &mut self.help),
                Field::remainder("rest", &mut self.rest),
                Field::verbs("verb", &mut self.verb),
                Field::verb("create", "create", &mut self.create),
            ]
        }
    }

    #[test]
    fn test_build_scope_tree() {
        let mut record = Record::default();
        let flag_set = FlagSet::new("test", &mut record).unwrap();
        let root = flag_set.root();

        assert_eq!(root.flags().len(), 3);
        assert_eq!(root.help_flag().unwrap().field(), "help");
        assert!(root.has_remainder());
        assert!(root.is_verb_bearing());
        assert_eq!(root.verbs().map(|(name, _)| name).collect::<Vec<_>>(), vec!["create"]);

        // Short names only need to be unique within one scope.
        let create = root.verb("create").unwrap();
        assert_eq!(create.flags()[0].display_name(), "--force");
        assert!(create.has_remainder());
        assert!(!create.is_verb_bearing());
    }

    #[test]
    fn test_flag_kinds_and_nullary() {
        let mut count: i64 = 0;
        let mut limit: i64 = 0;
        let mut items: Vec<String> = Vec::new();

        let counter = Flag::build(Field::flag("count", "-v, accumulate", &mut count)).unwrap();
        assert_eq!(counter.kind(), Kind::Integer);
        assert!(counter.is_nullary());

        let limit = Flag::build(Field::flag("limit", "-l", &mut limit)).unwrap();
        assert!(!limit.is_nullary());

        let list = Flag::build(Field::flag("items", "-i, accumulate", &mut items)).unwrap();
        assert_eq!(list.kind(), Kind::List);
        assert!(!list.is_nullary());
    }

    struct Colliding {
        a: bool,
        b: bool,
    }

    impl Options for Colliding {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("a", "-a, --all", &mut self.a),
                Field::flag("b", "-b, --all", &mut self.b),
            ]
        }
    }

    #[test]
    fn test_name_collision() {
        let mut record = Colliding { a: false, b: false };
        let error = FlagSet::new("test", &mut record).unwrap_err();
        assert_eq!(error, Error::NameCollision("--all".to_string()));
    }

    struct SharedShort {
        all: bool,
        append: bool,
    }

    impl Options for SharedShort {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("all", "-a, --all", &mut self.all),
                Field::flag("append", "-a, --append", &mut self.append),
            ]
        }
    }

    #[test]
    fn test_short_name_collision() {
        let mut record = SharedShort {
            all: false,
            append: false,
        };
        let error = FlagSet::new("test", &mut record).unwrap_err();
        assert_eq!(error, Error::NameCollision("-a".to_string()));
    }

    struct VerbWithoutMarker {
        create: Create,
    }

    impl Options for VerbWithoutMarker {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::verb("create", "create", &mut self.create)]
        }
    }

    #[test]
    fn test_verb_without_marker_is_structural_error() {
        let mut record = VerbWithoutMarker {
            create: Create::default(),
        };
        let error = FlagSet::new("test", &mut record).unwrap_err();
        assert!(matches!(error, Error::Structural { field, .. } if field == "create"));
    }

    struct BadTag {
        name: String,
    }

    impl Options for BadTag {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![Field::flag("name", "--name, description='oops", &mut self.name)]
        }
    }

    #[test]
    fn test_tag_syntax_error_propagates() {
        let mut record = BadTag {
            name: String::new(),
        };
        let error = FlagSet::new("test", &mut record).unwrap_err();
        assert!(matches!(error, Error::TagSyntax { .. }));
    }

    struct Nameless {
        name: String,
        value: String,
    }

    impl Options for Nameless {
        fn fields(&mut self) -> Vec<Field<'_>> {
            vec![
                Field::flag("name", "description='No names'", &mut self.name),
                Field::flag("value", "--value, accumulate", &mut self.value),
            ]
        }
    }

    #[test]
    fn test_flag_without_names_is_structural_error() {
        let mut record = Nameless {
            name: String::new(),
            value: String::new(),
        };
        let error = FlagSet::new("test", &mut record).unwrap_err();
        assert!(matches!(error, Error::Structural { field, .. } if field == "name"));
    }

    #[test]
    fn test_accumulate_string_is_structural_error() {
        let mut value = String::new();
        let error = Flag::build(Field::flag("value", "--value, accumulate", &mut value)).unwrap_err();
        assert!(matches!(error, Error::Structural { field, .. } if field == "value"));
    }
}
