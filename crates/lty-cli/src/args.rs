use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::tracing_config::LogFormat;

/// CLI arguments for the lty binary.
#[derive(Parser, Debug)]
#[command(
    name = "lty",
    version,
    about = "Class-type queries over an annotated Lua project index"
)]
pub struct CliArgs {
    /// Path to the JSON project index.
    #[arg(short = 'p', long = "project", value_name = "FILE")]
    pub project: PathBuf,

    /// Do not treat a bare global name as a type name.
    #[arg(long = "no-global-name-as-type")]
    pub no_global_name_as_type: bool,

    /// Only follow inheritance declared in FILE when deciding protected
    /// visibility.
    #[arg(long = "scope-file", value_name = "FILE")]
    pub scope_file: Option<String>,

    /// Print results as JSON.
    #[arg(long)]
    pub json: bool,

    /// Disable colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Log engine decisions to stderr (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log output format [default: LTY_LOG_FORMAT, then text].
    #[arg(long = "log-format", value_enum, value_name = "FORMAT")]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List declared classes.
    Classes,

    /// Superclasses and interfaces of a class, in visit order.
    Supers {
        #[arg(value_name = "CLASS")]
        class: String,
    },

    /// Interfaces of a class, depth first.
    Interfaces {
        #[arg(value_name = "CLASS")]
        class: String,
    },

    /// Members of a class.
    Members {
        #[arg(value_name = "CLASS")]
        class: String,

        /// Include one generation of members from every ancestor.
        #[arg(long)]
        deep: bool,

        /// Only members accessible from code inside this class (implies --deep).
        #[arg(long = "visible-from", value_name = "CLASS")]
        visible_from: Option<String>,
    },

    /// Look up one member, own members first.
    Member {
        #[arg(value_name = "CLASS")]
        class: String,
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// Type of `CLASS[KEY]`. Numeric keys are number keys, anything else a string key.
    Index {
        #[arg(value_name = "CLASS")]
        class: String,
        #[arg(value_name = "KEY")]
        key: String,
    },

    /// Whether SOURCE can be used where TARGET is expected.
    ///
    /// Types use annotation syntax: `Foo`, `number[]`, `A|nil`, `table<string, Foo>`.
    Subtype {
        #[arg(value_name = "SOURCE")]
        source: String,
        #[arg(value_name = "TARGET")]
        target: String,

        /// Do not accept nil, any or unknown as sources.
        #[arg(long)]
        strict: bool,
    },

    /// Alias names of a class and the type its name recovers to.
    Alias {
        #[arg(value_name = "CLASS")]
        class: String,
    },

    /// Type of a global variable.
    Global {
        #[arg(value_name = "NAME")]
        name: String,

        /// The global is being assigned rather than read.
        #[arg(long)]
        store: bool,
    },

    /// Encode a class identity as a hex stub.
    Encode {
        #[arg(value_name = "CLASS")]
        class: String,
    },

    /// Decode a hex stub.
    Decode {
        #[arg(value_name = "HEX")]
        hex: String,
    },
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
