//! The options record behind `tagopts demo`.
//!
//! A small client for a remote file store: global connection flags plus
//! `create` and `delete` verbs. Running it shows how arguments are bound,
//! validated and rendered as help.

use std::fmt::{self, Display, Formatter};
use std::io::Write;

use log::debug;
use tagopts_core::{Error, Field, FlagSet, Options, Result};

#[derive(Debug, Default)]
pub struct CreateOptions {
    pub name: String,
    pub directory: bool,
    pub file: bool,
}

impl Options for CreateOptions {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::flag(
                "name",
                "-n, --name, obligatory, description='Name of the entity to be created'",
                &mut self.name,
            ),
            Field::flag(
                "directory",
                "--directory, mutexgroup='type', description='Create a directory'",
                &mut self.directory,
            ),
            Field::flag(
                "file",
                "--file, mutexgroup='type', description='Create a file'",
                &mut self.file,
            ),
        ]
    }
}

#[derive(Debug, Default)]
pub struct DeleteOptions {
    pub name: String,
    pub directory: bool,
    pub file: bool,
}

impl Options for DeleteOptions {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::flag(
                "name",
                "-n, --name, obligatory, description='Name of the entity to be deleted'",
                &mut self.name,
            ),
            Field::flag(
                "directory",
                "--directory, mutexgroup='type', description='Delete a directory'",
                &mut self.directory,
            ),
            Field::flag(
                "file",
                "--file, mutexgroup='type', description='Delete a file'",
                &mut self.file,
            ),
        ]
    }
}

/// Global demo options.
#[derive(Debug, Default)]
pub struct DemoOptions {
    pub server: String,
    pub password: String,
    pub verbosity: i64,
    pub help: bool,
    pub rest: Vec<String>,
    pub verb: String,
    pub create: CreateOptions,
    pub delete: DeleteOptions,
}

impl Options for DemoOptions {
    fn fields(&mut self) -> Vec<Field<'_>> {
        vec![
            Field::flag(
                "server",
                "-s, --server, obligatory, description='Server to connect to'",
                &mut self.server,
            ),
            Field::flag(
                "password",
                "-p, --password, description='Don\\'t prompt for password'",
                &mut self.password,
            ),
            Field::flag(
                "verbosity",
                "-v, --verbose, accumulate, description='Set output threshold level'",
                &mut self.verbosity,
            ),
            Field::help("help", "-h, --help, description='Show this help'", &mut self.help),
            Field::remainder("rest", &mut self.rest),
            Field::verbs("verb", &mut self.verb),
            Field::verb("create", "create", &mut self.create),
            Field::verb("delete", "delete", &mut self.delete),
        ]
    }
}

impl Display for DemoOptions {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "server: {}", self.server)?;
        writeln!(formatter, "password: {}", self.password)?;
        writeln!(formatter, "verbosity: {}", self.verbosity)?;

        let (name, directory, file) = match self.verb.as_str() {
            "create" => (&self.create.name, self.create.directory, self.create.file),
            "delete" => (&self.delete.name, self.delete.directory, self.delete.file),
            _ => {
                writeln!(formatter, "verb: (none)")?;
                return write_remainder(formatter, &self.rest);
            }
        };

        writeln!(formatter, "verb: {}", self.verb)?;
        writeln!(formatter, "  name: {name}")?;
        writeln!(formatter, "  directory: {directory}")?;
        writeln!(formatter, "  file: {file}")?;
        write_remainder(formatter, &self.rest)
    }
}

fn write_remainder(formatter: &mut Formatter<'_>, rest: &[String]) -> fmt::Result {
    if rest.is_empty() {
        return Ok(());
    }
    writeln!(formatter, "remainder: {}", rest.join(" "))
}

/// Parses `args` against [`DemoOptions`].
///
/// Returns the bound options, or `None` when help was requested and written
/// to `help_out`.
///
/// # Errors
///
/// Returns the first matching or validation error.
pub fn run(
    program_name: &str,
    args: &[String],
    help_out: &mut impl Write,
) -> Result<Option<DemoOptions>> {
    let mut options = DemoOptions::default();

    {
        let mut flag_set = FlagSet::new(program_name, &mut options)?;
        match flag_set.parse(args) {
            Ok(()) => {}
            Err(Error::HelpRequested) => {
                flag_set.print_help(help_out);
                return Ok(None);
            }
            Err(e) => return Err(e),
        }
    }

    debug!("Demo options parsed: {options:?}");
    Ok(Some(options))
}
