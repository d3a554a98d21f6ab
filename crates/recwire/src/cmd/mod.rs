use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod decode;
pub mod encode;
pub mod layout;
pub mod list;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered record types.
    List(ListArgs),
    /// Print the resolved field offsets of a record type.
    Layout(LayoutArgs),
    /// Encode a JSON record into its binary form.
    Encode(EncodeArgs),
    /// Decode a binary record and print it as JSON.
    Decode(DecodeArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::List(args) => list::run(args, format),
        Command::Layout(args) => layout::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only show records of one domain (identity, organization, ...).
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Args, Debug)]
pub struct LayoutArgs {
    /// Record type name (see `recwire list`).
    pub record: String,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Record type name (see `recwire list`).
    pub record: String,
    /// JSON record.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON record from a file.
    #[arg(long, conflicts_with = "json")]
    pub file: Option<PathBuf>,
    /// Prefix the record with a 4-byte little-endian length header.
    #[arg(long)]
    pub framed: bool,
    /// Zeroed bytes to reserve ahead of the stack region.
    #[arg(long, env = "RECWIRE_HEADER", default_value_t = 0)]
    pub reserved: u32,
    /// Write the binary record to a file instead of printing hex.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Record type name (see `recwire list`).
    pub record: String,
    /// Hex-encoded binary record.
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the binary record from a file.
    #[arg(long, conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Input carries a 4-byte little-endian length header.
    #[arg(long)]
    pub framed: bool,
    /// Offset of the stack region within the input.
    #[arg(long, env = "RECWIRE_HEADER", default_value_t = 0)]
    pub reserved: u32,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
