use anyhow::{Result, anyhow, bail};
use std::path::PathBuf;

use crate::params::PARAMETER_NAMES;
use crate::sci::SciAssessment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Repl,
    Help,
    Calc(Vec<String>),
    Report(PathBuf),
    Explain(PathBuf),
}

pub fn usage() -> String {
    format!(
        "usage:
  sci-meter                       interactive calculator
  sci-meter calc key=value...     score one service
  sci-meter report <file.json>    score every component of a workload
  sci-meter explain <file.json>   score a workload and ask the model to explain it
  sci-meter help                  show this message

parameters: {}
defaults for grid_intensity, embodied_coef, platform_memory and platform_cpu
come from SCI_GRID_INTENSITY, SCI_EMBODIED_COEF, SCI_PLATFORM_MEMORY and SCI_PLATFORM_CPU.",
        PARAMETER_NAMES.join(", ")
    )
}

pub fn render_assessment(assessment: &SciAssessment) -> String {
    [
        format!("memory coefficient: {}", assessment.memory_coefficient),
        format!("cpu coefficient:    {}", assessment.cpu_coefficient),
        format!("energy:             {:.5} kWh", assessment.energy_kwh),
        format!("embodied:           {:.6} gCO2eq", assessment.embodied_gco2eq),
        format!("SCI:                {:.4} gCO2eq/hour", assessment.sci),
    ]
    .join("\n")
}

fn single_path(command: &str, rest: &[String]) -> Result<PathBuf> {
    match rest {
        [path] => Ok(PathBuf::from(path)),
        _ => Err(anyhow!(
            "'{}' expects exactly one workload file\n\n{}",
            command,
            usage()
        )),
    }
}

pub fn parse_command(args: &[String]) -> Result<Command> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Repl);
    };

    match command.as_str() {
        "help" | "-h" | "--help" => Ok(Command::Help),
        "calc" => {
            if rest.is_empty() {
                bail!("'calc' expects key=value parameters\n\n{}", usage());
            }
            Ok(Command::Calc(rest.to_vec()))
        }
        "report" => single_path("report", rest).map(Command::Report),
        "explain" => single_path("explain", rest).map(Command::Explain),
        other => bail!("unknown command '{}'\n\n{}", other, usage()),
    }
}
