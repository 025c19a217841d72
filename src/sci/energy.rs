/// Reference memory draw, scaled by the memory energy coefficient (kWh).
pub const MEMORY_REFERENCE_KWH: f64 = 0.38;
/// Reference CPU draw, scaled by the CPU energy coefficient (kWh).
pub const CPU_REFERENCE_KWH: f64 = 270.0;

pub fn memory_energy(memory_coef: f64) -> f64 {
    MEMORY_REFERENCE_KWH * memory_coef
}

pub fn cpu_energy(cpu_coef: f64) -> f64 {
    CPU_REFERENCE_KWH * cpu_coef
}

/// Total energy draw in kWh for the given memory and CPU coefficients.
pub fn total_energy(memory_coef: f64, cpu_coef: f64) -> f64 {
    memory_energy(memory_coef) + cpu_energy(cpu_coef)
}
