pub mod json;
pub mod md;

use crate::error::PulseError;
use crate::types::insights::{DeveloperActivity, PulseReport};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &PulseReport, format: OutputFormat) -> Result<String, PulseError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PulseError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn render_developers(
    developers: &[DeveloperActivity],
    format: OutputFormat,
) -> Result<String, PulseError> {
    match format {
        OutputFormat::Json => json::to_json(developers).map_err(PulseError::Json),
        OutputFormat::Md => Ok(md::developers_markdown(developers)),
    }
}
