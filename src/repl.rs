use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::cli::render_assessment;
use crate::config::{Config, SciDefaults};
use crate::params::{parse_assignments, resolve_input};
use crate::sci;

pub fn run_repl(cfg: &Config) -> Result<()> {
    let stdin = io::stdin();
    repl_loop(cfg, stdin.lock(), io::stdout())
}

fn score_line(line: &str, defaults: &SciDefaults) -> Result<String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let assignments = parse_assignments(&words)?;
    let input = resolve_input(&assignments, defaults)?;
    let assessment = sci::assess(&input)?;
    Ok(render_assessment(&assessment))
}

fn describe(value: Option<f64>) -> String {
    value.map_or_else(|| "(unset)".to_string(), |v| v.to_string())
}

fn print_defaults(out: &mut impl Write, defaults: &SciDefaults) -> Result<()> {
    writeln!(out, "grid_intensity:  {}", describe(defaults.grid_intensity))?;
    writeln!(out, "embodied_coef:   {}", describe(defaults.embodied_coef))?;
    writeln!(out, "platform_memory: {}", describe(defaults.platform_memory))?;
    writeln!(out, "platform_cpu:    {}\n", describe(defaults.platform_cpu))?;
    Ok(())
}

fn repl_loop(cfg: &Config, mut input: impl BufRead, mut out: impl Write) -> Result<()> {
    writeln!(out, "sci-meter calculator")?;
    writeln!(
        out,
        "enter key=value parameters, '/defaults' to show configured defaults, or 'exit' to quit"
    )?;

    loop {
        write!(out, "> ")?;
        out.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read stdin")?;
        if read == 0 {
            break;
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }
        if line.eq_ignore_ascii_case("/defaults") {
            print_defaults(&mut out, &cfg.sci_defaults)?;
            continue;
        }

        match score_line(line, &cfg.sci_defaults) {
            Ok(rendered) => writeln!(out, "{rendered}\n")?,
            Err(err) => {
                debug!(error = %err, "rejected calculator input");
                writeln!(out, "error: {err:#}\n")?;
            }
        }
    }

    Ok(())
}
