use anyhow::anyhow;
use std::error::Error as StdError;
use std::io::ErrorKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransportFailure {
    TimedOut,
    Refused,
    Unreachable,
    Other,
}

/// Walks the source chain looking for an I/O error of `kind` or a message
/// containing `needle`.
fn chain_mentions(err: &(dyn StdError + 'static), kind: ErrorKind, needle: &str) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(source) = current {
        if let Some(io_err) = source.downcast_ref::<std::io::Error>()
            && io_err.kind() == kind
        {
            return true;
        }

        if source.to_string().to_ascii_lowercase().contains(needle) {
            return true;
        }

        current = source.source();
    }

    false
}

fn classify(err: &reqwest::Error) -> TransportFailure {
    if err.is_timeout() || chain_mentions(err, ErrorKind::TimedOut, "timed out") {
        TransportFailure::TimedOut
    } else if err.is_connect() {
        if chain_mentions(err, ErrorKind::ConnectionRefused, "connection refused") {
            TransportFailure::Refused
        } else {
            TransportFailure::Unreachable
        }
    } else {
        TransportFailure::Other
    }
}

/// Turns a failed narration request into a message that says what to fix.
pub(crate) fn model_api_request_error(
    err: reqwest::Error,
    api_url: &str,
    timeout_secs: u64,
) -> anyhow::Error {
    match classify(&err) {
        TransportFailure::TimedOut => anyhow!(
            "Model request timed out after {}s while calling '{}'. \
             Increase MODEL_TIMEOUT_SECS or use a smaller model for narration.",
            timeout_secs,
            api_url
        ),
        TransportFailure::Refused => anyhow!(
            "Connection refused by model API at '{}'. \
             Start Ollama or point MODEL_BASE_URL at a running server.",
            api_url
        ),
        TransportFailure::Unreachable => anyhow!(
            "Failed to connect to model API at '{}'. \
             Check MODEL_BASE_URL and network connectivity.",
            api_url
        ),
        TransportFailure::Other => anyhow!("Failed to call model API at '{}': {}", api_url, err),
    }
}
