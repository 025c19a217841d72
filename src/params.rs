use anyhow::{Result, anyhow, bail};
use std::collections::BTreeMap;

use crate::config::{SciDefaults, parse_finite_f64};
use crate::sci::{ResourceAllocation, SciInput};

pub const PARAMETER_NAMES: [&str; 8] = [
    "memory_utilization",
    "cpu_utilization",
    "grid_intensity",
    "embodied_coef",
    "instance_memory",
    "platform_memory",
    "instance_cpu",
    "platform_cpu",
];

pub type Assignments = BTreeMap<String, f64>;

/// Parses `key=value` words into a map of known SCI parameters.
pub fn parse_assignments<S: AsRef<str>>(words: &[S]) -> Result<Assignments> {
    let mut assignments = Assignments::new();

    for word in words {
        let word = word.as_ref().trim();
        let (key, raw) = word
            .split_once('=')
            .ok_or_else(|| anyhow!("expected key=value, got '{}'", word))?;
        let key = key.trim();
        if !PARAMETER_NAMES.contains(&key) {
            bail!(
                "unknown parameter '{}'. Known parameters: {}",
                key,
                PARAMETER_NAMES.join(", ")
            );
        }
        let value = parse_finite_f64(Some(raw)).ok_or_else(|| {
            anyhow!("parameter '{}' is not a finite number: '{}'", key, raw.trim())
        })?;
        if assignments.insert(key.to_string(), value).is_some() {
            bail!("parameter '{}' given more than once", key);
        }
    }

    Ok(assignments)
}

/// Builds an engine input, filling gaps from the configured defaults.
pub fn resolve_input(assignments: &Assignments, defaults: &SciDefaults) -> Result<SciInput> {
    let lookup = |key: &str, fallback: Option<f64>| -> Result<f64> {
        assignments
            .get(key)
            .copied()
            .or(fallback)
            .ok_or_else(|| anyhow!("missing required parameter '{}'", key))
    };

    Ok(SciInput {
        memory_utilization: lookup("memory_utilization", None)?,
        cpu_utilization: lookup("cpu_utilization", None)?,
        grid_intensity: lookup("grid_intensity", defaults.grid_intensity)?,
        embodied_coef: lookup("embodied_coef", defaults.embodied_coef)?,
        allocation: ResourceAllocation {
            instance_memory: lookup("instance_memory", None)?,
            platform_memory: lookup("platform_memory", defaults.platform_memory)?,
            instance_cpu: lookup("instance_cpu", None)?,
            platform_cpu: lookup("platform_cpu", defaults.platform_cpu)?,
        },
    })
}
