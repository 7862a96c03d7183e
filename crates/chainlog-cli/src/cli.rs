use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "chainlog",
    about = "Chainlog: append-only hash-linked ledger",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with genesis settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Genesis seed; overrides the config file
    #[arg(long, global = true)]
    pub seed: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build a chain and print every block
    Demo(ChainArgs),
    /// Build a chain, optionally tamper with it, and verify it
    Verify(VerifyArgs),
    /// Like verify, but list every violation
    Audit(VerifyArgs),
}

#[derive(Args, Clone, Debug)]
pub struct ChainArgs {
    /// Number of blocks to append after genesis
    #[arg(short = 'n', long, default_value = "20")]
    pub blocks: usize,
    /// Payload for every appended block
    #[arg(long, default_value = "Hello, I am block :)")]
    pub data: String,
}

#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub chain: ChainArgs,
    /// Overwrite a payload before verifying, as INDEX=PAYLOAD (repeatable)
    #[arg(long, value_parser = parse_tamper)]
    pub tamper: Vec<TamperSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TamperSpec {
    pub index: u64,
    pub payload: String,
}

fn parse_tamper(s: &str) -> Result<TamperSpec, String> {
    let (index, payload) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=PAYLOAD, got {s:?}"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|e| format!("invalid index {index:?}: {e}"))?;
    Ok(TamperSpec {
        index,
        payload: payload.to_string(),
    })
}
