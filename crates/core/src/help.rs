//! Help output.
//!
//! Renders the usage line, the global flags and every verb's flags from the
//! descriptors alone. Within one block the descriptions start in a common
//! column, one space after the longest rendered name list.

use std::fmt::{self, Display, Formatter};
use std::io::Write;

use log::warn;

use crate::config::{GLOBAL_USAGE, HELP_INDENT, OBLIGATORY_MARKER, VERB_USAGE};
use crate::registry::{Flag, FlagSet, Scope};

/// Help text of a [`FlagSet`], rendered through [`Display`].
pub struct Usage<'s, 'a> {
    flag_set: &'s FlagSet<'a>,
}

impl<'a> FlagSet<'a> {
    #[must_use]
    pub fn usage(&self) -> Usage<'_, 'a> {
        Usage { flag_set: self }
    }

    #[must_use]
    pub fn help_text(&self) -> String {
        self.usage().to_string()
    }

    /// Writes the help text to `out`. Write failures are logged, not
    /// returned.
    pub fn print_help(&self, out: &mut impl Write) {
        if let Err(e) = write!(out, "{}", self.usage()).and_then(|()| out.flush()) {
            warn!("Failed to write help text: {e}");
        }
    }
}

impl Display for Usage<'_, '_> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let root = &self.flag_set.root;

        write!(formatter, "Usage: {} {GLOBAL_USAGE}", self.flag_set.name)?;
        if root.verbs().next().is_some() {
            write!(formatter, " {VERB_USAGE}")?;
        }
        writeln!(formatter)?;

        writeln!(formatter)?;
        writeln!(formatter, "Global options:")?;
        write_flags(formatter, root.flags(), 1)?;

        if root.verbs().next().is_some() {
            writeln!(formatter)?;
            writeln!(formatter, "Verbs:")?;
            write_verbs(formatter, root, 1)?;
        }

        Ok(())
    }
}

fn write_verbs(formatter: &mut Formatter<'_>, scope: &Scope<'_>, level: usize) -> fmt::Result {
    for (name, verb) in scope.verbs() {
        writeln!(formatter, "{}{name}:", HELP_INDENT.repeat(level))?;
        write_flags(formatter, verb.flags(), level + 1)?;
        write_verbs(formatter, verb, level + 1)?;
    }

    Ok(())
}

fn write_flags(formatter: &mut Formatter<'_>, flags: &[Flag<'_>], level: usize) -> fmt::Result {
    // Long-only names are shifted right to line up with `-x, ` prefixes, but
    // only when the block has short names at all.
    let any_short = flags.iter().any(|flag| !flag.tag().short.is_empty());
    let names: Vec<String> = flags
        .iter()
        .map(|flag| rendered_names(flag, any_short))
        .collect();
    let width = names
        .iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0);
    let indent = HELP_INDENT.repeat(level);

    for (flag, names) in flags.iter().zip(names) {
        let mut description = flag.tag().description.clone();
        if flag.tag().obligatory {
            if !description.is_empty() {
                description.push(' ');
            }
            description.push_str(OBLIGATORY_MARKER);
        }

        let line = format!("{indent}{names:<width$} {description}");
        writeln!(formatter, "{}", line.trim_end())?;
    }

    Ok(())
}

fn rendered_names(flag: &Flag<'_>, pad_long_only: bool) -> String {
    let names = flag.tag().rendered_names();
    if pad_long_only && flag.tag().short.is_empty() {
        format!("{HELP_INDENT}{names}")
    } else {
        names
    }
}
