use serde::{Deserialize, Serialize};
use tracing::debug;

use super::coefficient::coefficient_for;
use super::embodied::{ResourceAllocation, amortized_emissions, ensure_embodied_coef};
use super::energy::total_energy;
use super::error::SciResult;

/// Everything needed to score one service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SciInput {
    pub memory_utilization: f64,
    pub cpu_utilization: f64,
    /// gCO2eq per kWh.
    pub grid_intensity: f64,
    pub embodied_coef: f64,
    #[serde(flatten)]
    pub allocation: ResourceAllocation,
}

/// The SCI score along with the intermediate values it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SciAssessment {
    pub memory_coefficient: f64,
    pub cpu_coefficient: f64,
    pub energy_kwh: f64,
    pub embodied_gco2eq: f64,
    /// gCO2eq per hour.
    pub sci: f64,
}

/// Scores `input` as `SCI = E * I + M`.
pub fn assess(input: &SciInput) -> SciResult<SciAssessment> {
    ensure_embodied_coef(input.embodied_coef)?;

    let memory_coefficient = coefficient_for(input.memory_utilization)?;
    let cpu_coefficient = coefficient_for(input.cpu_utilization)?;
    let energy_kwh = total_energy(memory_coefficient, cpu_coefficient);
    let embodied_gco2eq = amortized_emissions(input.embodied_coef, &input.allocation)?;
    let sci = energy_kwh * input.grid_intensity + embodied_gco2eq;

    debug!(
        memory_utilization = input.memory_utilization,
        cpu_utilization = input.cpu_utilization,
        grid_intensity = input.grid_intensity,
        energy_kwh,
        embodied_gco2eq,
        sci,
        "computed software carbon intensity"
    );

    Ok(SciAssessment {
        memory_coefficient,
        cpu_coefficient,
        energy_kwh,
        embodied_gco2eq,
        sci,
    })
}

pub fn calculate_sci(input: &SciInput) -> SciResult<f64> {
    assess(input).map(|assessment| assessment.sci)
}
