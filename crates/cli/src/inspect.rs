//! Descriptor printing for `tagopts inspect`.

use itertools::Itertools;
use tagopts_core::error::Result;
use tagopts_core::tag::{is_verb_tag, parse_tag, Tag};

/// Parses `tag` and renders the resulting descriptor, one property per line.
///
/// A tag that is a single bare word is reported as a verb name.
///
/// # Errors
///
/// Returns the tag syntax error for malformed tags.
pub fn describe(tag: &str) -> Result<String> {
    if is_verb_tag(tag) {
        return Ok(format!("{tag}\n  verb: {}\n", tag.trim()));
    }

    let parsed = parse_tag(tag)?;
    Ok(format!("{tag}\n{}", render(&parsed)))
}

fn render(tag: &Tag) -> String {
    let lines = [
        ("long", tag.long.iter().join(", ")),
        ("short", tag.short.iter().join(", ")),
        ("description", tag.description.clone()),
        ("mutex group", tag.mutex_group.clone().unwrap_or_default()),
        ("obligatory", yes_no(tag.obligatory).to_string()),
        ("accumulate", yes_no(tag.accumulate).to_string()),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("  {label}: {value}").trim_end().to_string() + "\n")
        .collect()
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
