use serde::{Deserialize, Serialize};

use super::error::{SciError, SciResult};

/// Hours in the three-year hardware lifecycle. Leap days are not counted.
pub const LIFECYCLE_HOURS: f64 = (3 * 365 * 24) as f64;

/// Share of the platform consumed by an instance. Platform values are the
/// normalization baselines and must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub instance_memory: f64,
    pub platform_memory: f64,
    pub instance_cpu: f64,
    pub platform_cpu: f64,
}

impl ResourceAllocation {
    fn memory_ratio(&self) -> SciResult<f64> {
        ratio(self.instance_memory, self.platform_memory, "platform_memory")
    }

    fn cpu_ratio(&self) -> SciResult<f64> {
        ratio(self.instance_cpu, self.platform_cpu, "platform_cpu")
    }
}

fn ratio(instance: f64, platform: f64, field: &str) -> SciResult<f64> {
    if platform == 0.0 {
        return Err(SciError::invalid_input(format!("{field} must be non-zero")));
    }
    Ok(instance / platform)
}

/// Amortized embodied emissions (gCO2eq) for one hour of use.
pub fn embodied_emissions(embodied_coef: f64, allocation: &ResourceAllocation) -> SciResult<f64> {
    ensure_embodied_coef(embodied_coef)?;
    amortized_emissions(embodied_coef, allocation)
}

/// Same as `embodied_emissions` for a coefficient that already passed
/// `ensure_embodied_coef`. Only the platform baselines are checked here.
pub(crate) fn amortized_emissions(
    embodied_coef: f64,
    allocation: &ResourceAllocation,
) -> SciResult<f64> {
    let factor = 1.0 / LIFECYCLE_HOURS;
    let memory = embodied_coef * factor * allocation.memory_ratio()?;
    let cpu = embodied_coef * factor * allocation.cpu_ratio()?;
    Ok(memory + cpu)
}

pub(crate) fn ensure_embodied_coef(embodied_coef: f64) -> SciResult<()> {
    // NaN fails this comparison too.
    if embodied_coef > 0.0 {
        Ok(())
    } else {
        Err(SciError::invalid_input(format!(
            "the embodied coefficient must be greater than zero, got {embodied_coef}"
        )))
    }
}
