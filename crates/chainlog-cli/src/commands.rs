use std::process::ExitCode;

use anyhow::Context;
use chainlog_ledger::{ChainAudit, Ledger, LedgerConfig, Record, SystemClock, Verification};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = load_config(&cli)?;
    match cli.command {
        Command::Demo(args) => cmd_demo(&config, &args, cli.format),
        Command::Verify(args) => cmd_verify(&config, &args, cli.format),
        Command::Audit(args) => cmd_audit(&config, &args, cli.format),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<LedgerConfig> {
    let config = match &cli.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };
    Ok(match &cli.seed {
        Some(seed) => config.with_seed(seed.clone()),
        None => config,
    })
}

/// Genesis plus `args.blocks` records, then every requested tamper.
fn build_ledger(
    config: &LedgerConfig,
    args: &ChainArgs,
    tampers: &[TamperSpec],
) -> anyhow::Result<Ledger> {
    let mut ledger = Ledger::from_config(config, SystemClock);
    for _ in 0..args.blocks {
        ledger.append(args.data.clone());
    }
    info!(records = ledger.record_count(), "chain built");

    for t in tampers {
        ledger
            .try_tamper(t.index, t.payload.clone())
            .with_context(|| format!("tampering #{}", t.index))?;
    }
    Ok(ledger)
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    intact: bool,
    compromised_at: Option<u64>,
    records: &'a [Record],
}

#[derive(Serialize)]
struct AuditReport<'a> {
    compromised_at: Option<u64>,
    audit: &'a ChainAudit,
}

fn cmd_demo(
    config: &LedgerConfig,
    args: &ChainArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let ledger = build_ledger(config, args, &[])?;
    match format {
        OutputFormat::Text => {
            println!("{}", "Creating test blockchain...".bold());
            println!("{ledger}");
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(ledger.records())?);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_verify(
    config: &LedgerConfig,
    args: &VerifyArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let ledger = build_ledger(config, &args.chain, &args.tamper)?;
    let verification = ledger.verify();

    match format {
        OutputFormat::Text => match verification {
            Verification::Ok => println!(
                "{} chain intact ({} records)",
                "✓".green().bold(),
                ledger.record_count()
            ),
            Verification::Compromised(index) => {
                println!(
                    "{} chain compromised at {}",
                    "✗".red().bold(),
                    format!("#{index}").yellow()
                );
                if let Some(record) = ledger.get(index) {
                    println!("\n{record}");
                }
            }
        },
        OutputFormat::Json => {
            let report = VerifyReport {
                intact: verification.is_ok(),
                compromised_at: verification.compromised_at(),
                records: ledger.records(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(exit_code(verification))
}

fn cmd_audit(
    config: &LedgerConfig,
    args: &VerifyArgs,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let ledger = build_ledger(config, &args.chain, &args.tamper)?;
    let verification = ledger.verify();
    let audit = ledger.audit();

    match format {
        OutputFormat::Text => {
            println!("Audited {} records", audit.record_count.to_string().bold());
            if audit.is_intact() {
                println!("{} No violations.", "✓".green().bold());
            }
            for v in &audit.violations {
                println!(
                    "  {} {:<16} {}",
                    format!("#{}", v.index).yellow(),
                    format!("{:?}", v.kind).red(),
                    v.description
                );
            }
        }
        OutputFormat::Json => {
            let report = AuditReport {
                compromised_at: verification.compromised_at(),
                audit: &audit,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(exit_code(verification))
}

fn exit_code(verification: Verification) -> ExitCode {
    if verification.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
