use std::env;
use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use tagopts_core::config::program_name;
use tagopts_core::error::Result;

use tagopts_cli::cli_args::{Args, Command};
use tagopts_cli::{demo, inspect};

/// Exit code for arguments the demo parser rejected
const USAGE_ERROR: u8 = 2;

fn inspect_tags(tags: &[String]) -> Result<()> {
    for (index, tag) in tags.iter().enumerate() {
        if index > 0 {
            println!();
        }
        print!("{}", inspect::describe(tag)?);
    }

    Ok(())
}

fn run_demo(name: Option<&str>, args: &[String]) -> Result<()> {
    let arg0 = env::args().next();
    let name = program_name(name.or(arg0.as_deref()));
    debug!("Running demo as `{name}` with {} arguments", args.len());

    match demo::run(&name, args, &mut stdout())? {
        Some(options) => print!("{options}"),
        None => info!("Help printed, nothing parsed"),
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level().as_str()))
        .init();

    let result = match &args.command {
        Command::Inspect { tags } => inspect_tags(tags),
        Command::Demo {
            program_name,
            args,
        } => run_demo(program_name.as_deref(), args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if matches!(args.command, Command::Demo { .. }) {
                eprintln!("Run with `--help` for usage.");
                return ExitCode::from(USAGE_ERROR);
            }
            ExitCode::FAILURE
        }
    }
}
