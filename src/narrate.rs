use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::model::Message;
use crate::model_gateway::{ModelGateway, ModelGatewayRequest};
use crate::workload::Report;

fn narration_messages(cfg: &Config, report_json: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(2);
    if !cfg.system_prompt.trim().is_empty() {
        messages.push(Message::system(cfg.system_prompt.clone()));
    }
    messages.push(Message::user(format!(
        "Here is a Software Carbon Intensity report. Scores are in gCO2eq per hour, \
energy in kWh and embodied emissions in gCO2eq.\n\n{report_json}\n\n\
Explain what drives the total and how it could be reduced."
    )));
    messages
}

/// Asks the model for a plain-language explanation of `report`.
pub async fn narrate_report<G>(gateway: &G, cfg: &Config, report: &Report) -> Result<String>
where
    G: ModelGateway + ?Sized,
{
    let report_json =
        serde_json::to_string_pretty(report).context("Failed to serialize SCI report")?;
    let messages = narration_messages(cfg, &report_json);
    info!(
        model = %cfg.model,
        component_count = report.components.len(),
        "requesting report narration"
    );

    let response = gateway
        .chat(ModelGatewayRequest { messages })
        .await
        .context("Failed to narrate SCI report")?;
    Ok(response.content.trim().to_string())
}
