pub mod cli;
pub mod config;
pub mod logging;
pub mod model;
pub mod model_gateway;
pub mod narrate;
pub mod params;
pub mod providers;
pub mod repl;
pub mod sci;
pub mod workload;

use anyhow::{Context, Result};
use reqwest::Client;
use std::env;
use std::io::{self, Write};
use std::time::Duration;
use tracing::info;

use cli::{Command, parse_command, render_assessment, usage};
use config::Config;
use model_gateway::HostModelGateway;
use narrate::narrate_report;
use params::{parse_assignments, resolve_input};
use repl::run_repl;
use workload::{Report, build_report, load_workload};

pub async fn run() -> Result<()> {
    let cfg = Config::from_env();
    info!(
        model_provider = %cfg.model_provider,
        model = %cfg.model,
        grid_intensity = ?cfg.sci_defaults.grid_intensity,
        embodied_coef = ?cfg.sci_defaults.embodied_coef,
        "loaded runtime configuration"
    );

    let args: Vec<String> = env::args().skip(1).collect();
    match parse_command(&args)? {
        Command::Repl => run_repl(&cfg),
        Command::Help => {
            println!("{}", usage());
            Ok(())
        }
        Command::Calc(words) => {
            let assignments = parse_assignments(&words)?;
            let input = resolve_input(&assignments, &cfg.sci_defaults)?;
            let assessment = sci::assess(&input)?;
            println!("{}", render_assessment(&assessment));
            Ok(())
        }
        Command::Report(path) => {
            let workload = load_workload(&path)?;
            let report = build_report(&workload, &cfg.sci_defaults)?;
            println!("{}", render_report(&report)?);
            Ok(())
        }
        Command::Explain(path) => {
            let workload = load_workload(&path)?;
            let report = build_report(&workload, &cfg.sci_defaults)?;
            // The report stays on stdout even when the model is unreachable.
            println!("{}\n", render_report(&report)?);
            io::stdout().flush().context("Failed to flush stdout")?;

            let client = Client::builder()
                .timeout(Duration::from_secs(cfg.model_timeout_secs))
                .build()
                .context("Failed to initialize HTTP client")?;
            let gateway = HostModelGateway::new(&client, &cfg);
            let narration = narrate_report(&gateway, &cfg, &report).await?;
            println!("{narration}");
            Ok(())
        }
    }
}

fn render_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize SCI report")
}
