use std::path::PathBuf;

use serde::Serialize;

use crate::{ElaConfig, ElaResult, batch::FileOutcome};

#[derive(Serialize)]
pub struct ElaJsonReport {
    pub quality: f32,
    pub threshold: i32,
    pub mask_color: [u8; 3],
    pub channel_max: [u8; 3],
    pub max_difference: u8,
    pub scale: f64,
    pub flagged_pixels: u64,
    pub flagged_fraction: f64,
}

impl ElaJsonReport {
    pub fn new(config: &ElaConfig, result: &ElaResult) -> Self {
        Self {
            quality: config.quality,
            threshold: config.threshold,
            mask_color: config.mask_color.rgb(),
            channel_max: result.difference.channel_max,
            max_difference: result.difference.max_difference,
            scale: result.difference.scale,
            flagged_pixels: result.masked.flagged_pixels,
            flagged_fraction: result.flagged_fraction(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[derive(Serialize)]
pub struct BatchJsonReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files: Vec<FileReportSection>,
}

#[derive(Serialize)]
pub struct FileReportSection {
    pub input: PathBuf,
    pub difference_path: Option<PathBuf>,
    pub masked_path: Option<PathBuf>,
    pub max_difference: Option<u8>,
    pub flagged_pixels: Option<u64>,
    pub error: Option<String>,
}

impl From<&[FileOutcome]> for BatchJsonReport {
    fn from(outcomes: &[FileOutcome]) -> Self {
        let files: Vec<FileReportSection> = outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(processed) => FileReportSection {
                    input: outcome.input.clone(),
                    difference_path: Some(processed.difference_path.clone()),
                    masked_path: Some(processed.masked_path.clone()),
                    max_difference: Some(processed.max_difference),
                    flagged_pixels: Some(processed.flagged_pixels),
                    error: None,
                },
                Err(err) => FileReportSection {
                    input: outcome.input.clone(),
                    difference_path: None,
                    masked_path: None,
                    max_difference: None,
                    flagged_pixels: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();

        let succeeded = files.iter().filter(|f| f.error.is_none()).count();

        Self {
            total: files.len(),
            succeeded,
            failed: files.len() - succeeded,
            files,
        }
    }
}

impl BatchJsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
