use std::env;

const DEFAULT_MODEL_PROVIDER: &str = "ollama";
const DEFAULT_MODEL: &str = "qwen2.5:3b";
const DEFAULT_MODEL_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_SYSTEM_PROMPT: &str = "You are a sustainability assistant. \
Explain Software Carbon Intensity (SCI) results to developers in plain language, \
point out which components dominate the score, and suggest practical ways to reduce it.";
const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 60;

/// Fallback values for SCI parameters that rarely change between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SciDefaults {
    pub grid_intensity: Option<f64>,
    pub embodied_coef: Option<f64>,
    pub platform_memory: Option<f64>,
    pub platform_cpu: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_provider: String,
    pub model: String,
    pub model_base_url: String,
    pub system_prompt: String,
    pub model_timeout_secs: u64,
    pub sci_defaults: SciDefaults,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok())
    }

    pub(crate) fn from_env_with(mut get_var: impl FnMut(&str) -> Option<String>) -> Self {
        let model_base_url =
            get_var("MODEL_BASE_URL").unwrap_or_else(|| DEFAULT_MODEL_BASE_URL.to_string());
        let model_timeout_secs = parse_model_timeout_secs(get_var("MODEL_TIMEOUT_SECS").as_deref());
        let sci_defaults = SciDefaults {
            grid_intensity: parse_finite_f64(get_var("SCI_GRID_INTENSITY").as_deref()),
            embodied_coef: parse_finite_f64(get_var("SCI_EMBODIED_COEF").as_deref()),
            platform_memory: parse_finite_f64(get_var("SCI_PLATFORM_MEMORY").as_deref()),
            platform_cpu: parse_finite_f64(get_var("SCI_PLATFORM_CPU").as_deref()),
        };

        Self {
            model_provider: get_var("MODEL_PROVIDER")
                .unwrap_or_else(|| DEFAULT_MODEL_PROVIDER.to_string()),
            model: get_var("MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_base_url,
            system_prompt: get_var("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            model_timeout_secs,
            sci_defaults,
        }
    }
}

fn parse_positive_u64(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

fn parse_model_timeout_secs(raw: Option<&str>) -> u64 {
    parse_positive_u64(raw, DEFAULT_MODEL_TIMEOUT_SECS)
}

pub(crate) fn parse_finite_f64(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
