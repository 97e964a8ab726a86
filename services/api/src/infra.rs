use metrics_exporter_prometheus::PrometheusHandle;
use morphbox::config::ExplorerConfig;
use morphbox::domain::MorphologicalBox;
use morphbox::error::AppError;
use morphbox::explorer::ExplorerService;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const DEMO_BOX: &str = include_str!("../data/demo_box.json");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn explorer_service(config: &ExplorerConfig) -> ExplorerService {
    ExplorerService::new(config.generator_config(), config.seed)
}

pub(crate) fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Bundled sample box used by the demo command and route tests.
pub(crate) fn demo_box() -> Result<MorphologicalBox, AppError> {
    let explorer_box: MorphologicalBox = serde_json::from_str(DEMO_BOX)?;
    explorer_box.validate()?;
    Ok(explorer_box)
}

pub(crate) fn parse_probability(raw: &str) -> Result<f64, String> {
    match raw.trim().parse::<f64>() {
        Ok(value) if (0.0..=1.0).contains(&value) => Ok(value),
        Ok(value) => Err(format!("probability {value} must be between 0 and 1")),
        Err(err) => Err(format!("failed to parse '{raw}' as a number ({err})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morphbox::explorer::combination_space;

    #[test]
    fn bundled_demo_box_is_valid() {
        let explorer_box = demo_box().expect("demo box loads");
        assert_eq!(explorer_box.parameters.len(), 6);
        assert_eq!(combination_space(&explorer_box.parameters).to_string(), "729");
    }

    #[test]
    fn probability_parser_enforces_range() {
        assert_eq!(parse_probability(" 0.25 "), Ok(0.25));
        assert!(parse_probability("1.2").is_err());
        assert!(parse_probability("often").is_err());
    }
}
