//! Tagopts CLI Library
//!
//! This crate provides `tagopts`, a developer tool around `tagopts-core`. It
//! prints the descriptors behind tag strings and runs a demo options record
//! against arbitrary arguments.
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`inspect`]: Tag string inspection
//! - [`demo`]: The demo options record and its runner
//!
//! # Examples
//!
//! ```bash
//! # Show how a tag is understood
//! tagopts inspect "-s, --server, obligatory, description='Server to connect to'"
//!
//! # Parse arguments with the demo record
//! tagopts demo -s files.local -vv create --name report --file
//!
//! # Print the demo help
//! tagopts demo --help
//! ```

pub mod cli_args;
pub mod demo;
pub mod inspect;
