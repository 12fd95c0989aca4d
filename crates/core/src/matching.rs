//! Argument matching.
//!
//! Walks the argument list left to right against the active scope. Long flags
//! (`--name`, `--name=value`), short flags (`-n value`, `-nvalue`) and short
//! clusters (`-fqc`) bind values into the record; a verb name switches to the
//! verb's scope; the first argument that is neither starts the remainder.
//! A bare `--` ends flag matching and sends everything after it to the
//! remainder.

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::registry::{Flag, FlagSet, Scope};
use crate::field::Slot;
use crate::tag::Tag;

type Arguments = std::vec::IntoIter<String>;

impl Flag<'_> {
    /// Applies one occurrence of the flag, taking its value from `inline` or
    /// the next argument.
    pub(crate) fn apply(
        &mut self,
        used_name: &str,
        inline: Option<&str>,
        arguments: &mut Arguments,
    ) -> Result<()> {
        if self.is_nullary() {
            if let Some(value) = inline {
                return Err(Error::UnexpectedValue {
                    flag: used_name.to_string(),
                    value: value.to_string(),
                });
            }
            return self.apply_nullary();
        }

        let value = match inline {
            Some(value) => value.to_string(),
            None => arguments
                .next()
                .ok_or_else(|| Error::MissingValue(used_name.to_string()))?,
        };

        match &mut self.slot {
            Slot::Int(slot) => {
                **slot = value.parse().map_err(|_| Error::ValueType {
                    flag: used_name.to_string(),
                    kind: self.kind.to_string(),
                    value: value.clone(),
                })?;
            }
            Slot::Str(slot) => **slot = value,
            Slot::List(slot) => slot.push(value),
            Slot::Bool(_) | Slot::Record(_) | Slot::Empty => {
                return Err(Error::structural(self.field, "flag has no value slot"));
            }
        }

        debug!("Flag `{used_name}` set");
        self.specified = true;
        Ok(())
    }

    /// Sets a boolean flag, or counts one more occurrence of an accumulating
    /// integer flag.
    pub(crate) fn apply_nullary(&mut self) -> Result<()> {
        match &mut self.slot {
            Slot::Bool(slot) => **slot = true,
            Slot::Int(slot) => **slot = slot.saturating_add(1),
            _ => return Err(Error::structural(self.field, "flag requires a value")),
        }

        debug!("Flag `{}` set", self.display_name());
        self.specified = true;
        Ok(())
    }
}

impl FlagSet<'_> {
    /// Parses `args` into the record.
    ///
    /// On success every value the arguments named is stored and the
    /// obligation and mutex rules of every entered scope hold.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HelpRequested`] as soon as a help flag is seen; no
    /// validation runs in that case. Otherwise returns the first matching or
    /// validation error. The record may be partially written on error.
    pub fn parse<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut arguments: Arguments = args
            .into_iter()
            .map(|arg| arg.as_ref().to_string())
            .collect::<Vec<_>>()
            .into_iter();

        self.root.reset();

        let mut entered = Vec::new();
        match_scope(&mut self.root, &mut arguments, &[], None, &mut entered)?;

        self.validate(&entered)
    }
}

/// Matches arguments against `scope` until they run out, a verb takes over,
/// or the remainder is captured.
///
/// `inherited_help` holds the help flags of enclosing scopes and `outer_remainder`
/// the remainder slot of the closest enclosing scope that declares one.
fn match_scope(
    scope: &mut Scope<'_>,
    arguments: &mut Arguments,
    inherited_help: &[Tag],
    outer_remainder: Option<&mut Vec<String>>,
    entered: &mut Vec<String>,
) -> Result<()> {
    while let Some(token) = arguments.next() {
        trace!("Matching argument `{token}`");

        if scope.is_help_token(&token) {
            if let Some(Slot::Bool(help)) = scope
                .help
                .and_then(|index| scope.flags.get_mut(index))
                .map(|flag| &mut flag.slot)
            {
                **help = true;
            }
            debug!("Help requested via `{token}`");
            return Err(Error::HelpRequested);
        }

        // A verb's own flags may reuse the help names of enclosing scopes.
        if !scope.declares(&token) && inherited_help.iter().any(|help| help.matches(&token)) {
            debug!("Help requested via `{token}`");
            return Err(Error::HelpRequested);
        }

        if token == "--" {
            let rest: Vec<String> = arguments.collect();
            if rest.is_empty() {
                return Ok(());
            }
            return capture_remainder(scope, outer_remainder, rest);
        }

        if let Some(long) = token.strip_prefix("--") {
            match_long(scope, &token, long, arguments)?;
            continue;
        }

        if token.starts_with('-') && token.chars().count() > 1 {
            match_short(scope, &token, arguments)?;
            continue;
        }

        if scope.verb_bearing && scope.verbs.contains_key(&token) {
            return enter_verb(scope, token, arguments, inherited_help, outer_remainder, entered);
        }

        let rest = std::iter::once(token).chain(arguments.by_ref()).collect();
        return capture_remainder(scope, outer_remainder, rest);
    }

    Ok(())
}

fn match_long(
    scope: &mut Scope<'_>,
    token: &str,
    long: &str,
    arguments: &mut Arguments,
) -> Result<()> {
    let (name, inline) = match long.split_once('=') {
        Some((name, value)) => (name, Some(value)),
        None => (long, None),
    };

    let index = scope
        .find_long(name)
        .ok_or_else(|| Error::UnknownFlag(token.to_string()))?;

    scope.flags[index].apply(&format!("--{name}"), inline, arguments)
}

fn match_short(scope: &mut Scope<'_>, token: &str, arguments: &mut Arguments) -> Result<()> {
    let shorts = &token[1..];

    if shorts.chars().count() > 1 {
        let cluster: Option<Vec<usize>> = shorts
            .chars()
            .map(|short| {
                scope
                    .find_short(short)
                    .filter(|&index| Some(index) != scope.help)
                    .filter(|&index| scope.flags[index].is_nullary())
            })
            .collect();

        if let Some(cluster) = cluster {
            trace!("Argument `{token}` is a flag cluster");
            for index in cluster {
                scope.flags[index].apply_nullary()?;
            }
            return Ok(());
        }
    }

    // Not a cluster: the first character names the flag and anything after it
    // is an attached value.
    let mut chars = shorts.chars();
    let index = chars
        .next()
        .and_then(|short| scope.find_short(short))
        .ok_or_else(|| Error::UnknownFlag(token.to_string()))?;
    let attached = chars.as_str();

    let flag = &mut scope.flags[index];
    if attached.is_empty() {
        flag.apply(token, None, arguments)
    } else if flag.is_nullary() {
        Err(Error::UnknownFlag(token.to_string()))
    } else {
        flag.apply(&token[..token.len() - attached.len()], Some(attached), arguments)
    }
}

fn enter_verb(
    scope: &mut Scope<'_>,
    verb: String,
    arguments: &mut Arguments,
    inherited_help: &[Tag],
    outer_remainder: Option<&mut Vec<String>>,
    entered: &mut Vec<String>,
) -> Result<()> {
    debug!("Entering verb `{verb}`");

    let Scope {
        flags,
        help,
        remainder,
        selected_verb,
        verbs,
        ..
    } = scope;

    if let Some(selected) = selected_verb {
        **selected = verb.clone();
    }

    let mut help_flags = inherited_help.to_vec();
    if let Some(flag) = help.and_then(|index| flags.get(index)) {
        help_flags.push(flag.tag.clone());
    }

    // The outermost remainder wins over the ones of nested verbs.
    let remainder = match outer_remainder {
        Some(outer) => Some(outer),
        None => remainder.as_deref_mut(),
    };

    let Some(child) = verbs.get_mut(&verb) else {
        return Err(Error::UnknownFlag(verb));
    };
    entered.push(verb);

    match_scope(child, arguments, &help_flags, remainder, entered)
}

fn capture_remainder(
    scope: &mut Scope<'_>,
    outer_remainder: Option<&mut Vec<String>>,
    rest: Vec<String>,
) -> Result<()> {
    let target = match outer_remainder {
        Some(outer) => Some(outer),
        None => scope.remainder.as_deref_mut(),
    };

    match target {
        Some(remainder) => {
            debug!("Captured {} trailing arguments", rest.len());
            *remainder = rest;
            Ok(())
        }
        None => Err(Error::UnexpectedArguments(rest)),
    }
}
