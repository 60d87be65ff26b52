use anyhow::Context;
use check_fxz::audit::{audit, Snapshot};
use check_fxz::command::SystemCommandRunner;
use check_fxz::ip_tool::IpTool;
use check_fxz::{config, logging};
use clap::Parser;
use std::path::PathBuf;
use std::process::exit;

/// Check & fix routing when using FXZ VPN.
///
/// Finds local network routes captured by the VPN tunnel and prints `ip` commands restoring them.
#[derive(Parser, Debug)]
#[command(name = "check-fxz")]
pub struct Cli {
    #[arg(long, short)]
    /// Show debug info on stderr.
    pub debug: bool,
    #[arg(long, short)]
    /// Print fix routing commands instead of the summary.
    pub fix: bool,
    #[arg(long, short = 'i', value_name = "INTERFACE")]
    /// Target network interface (auto-detected if omitted).
    pub netif: Option<String>,
    #[arg(long, short, value_name = "PATH")]
    /// JSON config file overriding the ip command, interfaces and local networks.
    pub config: Option<PathBuf>,
    #[arg(long, conflicts_with = "fix")]
    /// Print the full JSON report instead of the summary.
    pub json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let config = config::load(cli.config.as_deref()).context("failed to load config")?;
    let ip = IpTool::new(SystemCommandRunner, config.ip_command.clone());

    let snapshot = match Snapshot::collect(&ip, &config, cli.netif.as_deref()) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            println!("{error}");
            exit(1)
        }
    };
    let report = audit(snapshot, &config);

    if cli.debug {
        for line in report.debug_lines() {
            eprintln!("{line}");
        }
    }

    if cli.fix {
        for command in report.fix_commands() {
            println!("{command}");
        }
    } else if cli.json {
        println!("{}", serde_json::to_string_pretty(&report).context("failed to serialize report")?);
    } else {
        for line in report.summary_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
