//! Software Carbon Intensity (SCI) calculation.
//!
//! Pure, stateless functions: a utilization-to-coefficient step table, an
//! energy model, an embodied-emissions model, and the engine that combines
//! them with grid carbon intensity into gCO2eq per hour.

mod coefficient;
mod embodied;
mod energy;
mod engine;
mod error;

pub use coefficient::{MAX_UTILIZATION, MIN_UTILIZATION, coefficient_for};
pub use embodied::{LIFECYCLE_HOURS, ResourceAllocation, embodied_emissions};
pub use energy::{CPU_REFERENCE_KWH, MEMORY_REFERENCE_KWH, cpu_energy, memory_energy, total_energy};
pub use engine::{SciAssessment, SciInput, assess, calculate_sci};
pub use error::{SciError, SciResult};
