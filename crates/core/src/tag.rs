//! Tag grammar for per-field flag metadata.
//!
//! A tag is a comma-separated list of items:
//!
//! - `--<name>` adds a long name, `-<char>` adds a short name
//! - `description='<text>'` sets the help description (`\'` escapes a quote)
//! - `mutexgroup='<id>'` puts the flag into a mutual-exclusion group
//! - `obligatory` and `accumulate` set the respective properties
//!
//! Whitespace around items is ignored and item order does not matter, except
//! that repeated names keep their first-occurrence order.

use indexmap::IndexSet;
use itertools::Itertools;

use crate::error::{Error, Result};

/// Metadata parsed from one tag string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    pub long: IndexSet<String>,
    pub short: IndexSet<char>,
    pub description: String,
    pub mutex_group: Option<String>,
    pub obligatory: bool,
    pub accumulate: bool,
}

impl Tag {
    /// Returns true when the tag declares neither a long nor a short name.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.long.is_empty() && self.short.is_empty()
    }

    /// The name used to refer to this flag in messages: the first long name,
    /// falling back to the first short name.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(long) = self.long.first() {
            format!("--{long}")
        } else if let Some(short) = self.short.first() {
            format!("-{short}")
        } else {
            String::new()
        }
    }

    /// All names with their dash prefixes, short names first.
    pub fn prefixed_names(&self) -> impl Iterator<Item = String> + '_ {
        self.short
            .iter()
            .map(|short| format!("-{short}"))
            .chain(self.long.iter().map(|long| format!("--{long}")))
    }

    /// Renders the names the way help output lists them, e.g. `-s, --server`.
    #[must_use]
    pub fn rendered_names(&self) -> String {
        self.prefixed_names().join(", ")
    }

    /// Returns true if `token` is exactly one of this tag's prefixed names.
    #[must_use]
    pub fn matches(&self, token: &str) -> bool {
        if let Some(long) = token.strip_prefix("--") {
            return self.long.contains(long);
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some('-'), Some(short), None) => self.short.contains(&short),
            _ => false,
        }
    }
}

/// Returns true if the tag is a single bare word, which declares a verb.
#[must_use]
pub fn is_verb_tag(tag: &str) -> bool {
    let tag = tag.trim();
    !tag.is_empty()
        && !tag.starts_with('-')
        && !matches!(tag, "obligatory" | "accumulate")
        && tag
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}

/// Parses one tag string.
///
/// # Errors
///
/// Returns [`Error::TagSyntax`] naming the offending item if an item is
/// unknown, a quoted string is not terminated, or a name is missing after
/// `-` or `--`.
///
/// # Examples
///
/// ```
/// use tagopts_core::tag::parse_tag;
///
/// let tag = parse_tag("--name, -n, description='Some name', obligatory").unwrap();
/// assert!(tag.long.contains("name"));
/// assert!(tag.short.contains(&'n'));
/// assert_eq!(tag.description, "Some name");
/// assert!(tag.obligatory);
/// ```
pub fn parse_tag(tag: &str) -> Result<Tag> {
    let mut parsed = Tag::default();

    for item in split_items(tag)? {
        apply_item(&mut parsed, item.trim())?;
    }

    Ok(parsed)
}

/// Splits a tag on commas that are not inside a quoted string.
fn split_items(tag: &str) -> Result<Vec<&str>> {
    let mut items = Vec::new();
    let mut start = 0;
    let mut quoted = false;
    let mut escaped = false;

    for (index, c) in tag.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }

        match c {
            '\\' if quoted => escaped = true,
            '\'' => quoted = !quoted,
            ',' if !quoted => {
                items.push(&tag[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }

    let last = &tag[start..];
    if quoted {
        return Err(Error::tag_syntax(last.trim(), "unterminated quoted string"));
    }

    // A blank tag declares nothing.
    if items.is_empty() && last.trim().is_empty() {
        return Ok(items);
    }
    items.push(last);

    Ok(items)
}

fn apply_item(tag: &mut Tag, item: &str) -> Result<()> {
    if let Some(long) = item.strip_prefix("--") {
        if long.is_empty() {
            return Err(Error::tag_syntax(item, "missing long flag name"));
        }
        if long.contains(char::is_whitespace) {
            return Err(Error::tag_syntax(item, "flag names may not contain spaces"));
        }
        tag.long.insert(long.to_string());
        return Ok(());
    }

    if let Some(short) = item.strip_prefix('-') {
        let mut chars = short.chars();
        return match (chars.next(), chars.next()) {
            (None, _) => Err(Error::tag_syntax(item, "missing short flag name")),
            (Some(c), None) if !c.is_whitespace() => {
                tag.short.insert(c);
                Ok(())
            }
            _ => Err(Error::tag_syntax(
                item,
                "short flag names must be a single character",
            )),
        };
    }

    if let Some((key, value)) = item.split_once('=') {
        let value = unquote(item, value.trim())?;
        match key.trim() {
            "description" => tag.description = value,
            "mutexgroup" => tag.mutex_group = Some(value),
            _ => return Err(Error::tag_syntax(item, "unknown item")),
        }
        return Ok(());
    }

    match item {
        "obligatory" => tag.obligatory = true,
        "accumulate" => tag.accumulate = true,
        "" => return Err(Error::tag_syntax(item, "empty item")),
        _ => return Err(Error::tag_syntax(item, "unknown item")),
    }

    Ok(())
}

/// Strips the surrounding quotes of a `key='value'` item and unescapes `\'`.
fn unquote(item: &str, value: &str) -> Result<String> {
    let inner = value
        .strip_prefix('\'')
        .and_then(|v| v.strip_suffix('\''))
        .ok_or_else(|| Error::tag_syntax(item, "value must be enclosed in single quotes"))?;

    Ok(inner.replace("\\'", "'"))
}
