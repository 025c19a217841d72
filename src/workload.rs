use anyhow::{Context, Result, anyhow, bail};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::config::SciDefaults;
use crate::sci::{self, ResourceAllocation, SciAssessment, SciInput};

/// A deployment made of several components scored against a shared grid.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workload {
    #[serde(default)]
    pub grid_intensity: Option<f64>,
    #[serde(default)]
    pub embodied_coef: Option<f64>,
    #[serde(default)]
    pub platform_memory: Option<f64>,
    #[serde(default)]
    pub platform_cpu: Option<f64>,
    pub components: Vec<Component>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Component {
    pub name: String,
    pub memory_utilization: f64,
    pub cpu_utilization: f64,
    pub instance_memory: f64,
    pub instance_cpu: f64,
    #[serde(default)]
    pub platform_memory: Option<f64>,
    #[serde(default)]
    pub platform_cpu: Option<f64>,
    #[serde(default)]
    pub grid_intensity: Option<f64>,
    #[serde(default)]
    pub embodied_coef: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ComponentReport {
    pub name: String,
    #[serde(flatten)]
    pub assessment: SciAssessment,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub computed_at: String,
    pub components: Vec<ComponentReport>,
    /// gCO2eq per hour across all components.
    pub total_sci: f64,
}

impl Workload {
    pub fn from_json(text: &str) -> Result<Self> {
        let workload: Self =
            serde_json::from_str(text).context("Failed to parse workload JSON")?;
        if workload.components.is_empty() {
            bail!("workload must list at least one component");
        }
        Ok(workload)
    }
}

pub fn load_workload(path: &Path) -> Result<Workload> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read workload file '{}'", path.display()))?;
    Workload::from_json(&text).with_context(|| format!("Invalid workload '{}'", path.display()))
}

fn pick(
    key: &str,
    component: Option<f64>,
    workload: Option<f64>,
    default: Option<f64>,
) -> Result<f64> {
    component
        .or(workload)
        .or(default)
        .ok_or_else(|| anyhow!("missing required parameter '{}'", key))
}

fn component_input(
    component: &Component,
    workload: &Workload,
    defaults: &SciDefaults,
) -> Result<SciInput> {
    Ok(SciInput {
        memory_utilization: component.memory_utilization,
        cpu_utilization: component.cpu_utilization,
        grid_intensity: pick(
            "grid_intensity",
            component.grid_intensity,
            workload.grid_intensity,
            defaults.grid_intensity,
        )?,
        embodied_coef: pick(
            "embodied_coef",
            component.embodied_coef,
            workload.embodied_coef,
            defaults.embodied_coef,
        )?,
        allocation: ResourceAllocation {
            instance_memory: component.instance_memory,
            platform_memory: pick(
                "platform_memory",
                component.platform_memory,
                workload.platform_memory,
                defaults.platform_memory,
            )?,
            instance_cpu: component.instance_cpu,
            platform_cpu: pick(
                "platform_cpu",
                component.platform_cpu,
                workload.platform_cpu,
                defaults.platform_cpu,
            )?,
        },
    })
}

/// Scores every component. The first failing component aborts the report.
pub fn build_report(workload: &Workload, defaults: &SciDefaults) -> Result<Report> {
    let mut components = Vec::with_capacity(workload.components.len());
    let mut total_sci = 0.0;

    for component in &workload.components {
        let assessment = component_input(component, workload, defaults)
            .and_then(|input| sci::assess(&input).map_err(anyhow::Error::from))
            .with_context(|| format!("component '{}'", component.name))?;
        debug!(component = %component.name, sci = assessment.sci, "scored component");

        total_sci += assessment.sci;
        components.push(ComponentReport {
            name: component.name.clone(),
            assessment,
        });
    }

    info!(
        component_count = components.len(),
        total_sci, "built workload report"
    );

    Ok(Report {
        computed_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        components,
        total_sci,
    })
}
