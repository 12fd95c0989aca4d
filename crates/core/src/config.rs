//! Layout defaults and program name resolution.
//!
//! This module holds the fixed pieces of the help layout and resolves the
//! program name shown in usage lines.

use std::path::Path;

/// Program name used when neither an explicit name nor `argv[0]` is usable
pub const DEFAULT_PROGRAM_NAME: &str = "program";

/// Indentation added per nesting level in help output
pub const HELP_INDENT: &str = "    ";
/// Appended to the description of obligatory flags
pub const OBLIGATORY_MARKER: &str = "(*)";
/// Usage suffix for global flags
pub const GLOBAL_USAGE: &str = "[global options]";
/// Usage suffix added when the root scope has verbs
pub const VERB_USAGE: &str = "<verb> [verb options]";

/// Resolves the program name shown in usage output.
///
/// A path such as `argv[0]` is reduced to its file name. If no name is given,
/// or the path has no file name, the default program name is used.
///
/// # Examples
///
/// ```
/// use tagopts_core::config::program_name;
///
/// assert_eq!(program_name(Some("/usr/local/bin/tool")), "tool");
/// assert_eq!(program_name(Some("tool")), "tool");
/// assert_eq!(program_name(None), "program");
/// ```
pub fn program_name(name_or_path: Option<&str>) -> String {
    let name = name_or_path
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| Path::new(name).file_name())
        .map(|name| name.to_string_lossy().to_string());

    match name {
        Some(name) => name,
        None => DEFAULT_PROGRAM_NAME.to_string(),
    }
}
