use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    ElaAnalyzer, ElaConfig,
    error::{ElaError, Result},
};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Kind of input the caller pointed at, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    File(PathBuf),
    Folder(PathBuf),
}

impl InputTarget {
    pub fn resolve<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if path.is_file() {
            Ok(InputTarget::File(path.to_path_buf()))
        } else if path.is_dir() {
            Ok(InputTarget::Folder(path.to_path_buf()))
        } else {
            Err(ElaError::NotFound(path.to_path_buf()))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedFile {
    pub input: PathBuf,
    pub difference_path: PathBuf,
    pub masked_path: PathBuf,
    pub max_difference: u8,
    pub flagged_pixels: u64,
}

#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<ProcessedFile>,
}

pub fn run(
    target: &InputTarget,
    config: &ElaConfig,
    out_dir: Option<&Path>,
) -> Result<Vec<FileOutcome>> {
    match target {
        InputTarget::File(path) => {
            let result = process_file(path, config, out_dir);

            Ok(vec![FileOutcome {
                input: path.clone(),
                result,
            }])
        }
        InputTarget::Folder(path) => process_folder(path, config, out_dir),
    }
}

/// Full pipeline over one file, persisting `<stem>_difference.jpg` and
/// `<stem>_masked.jpg` next to the input (or under `out_dir`).
pub fn process_file(
    path: &Path,
    config: &ElaConfig,
    out_dir: Option<&Path>,
) -> Result<ProcessedFile> {
    info!("Examining file {}", path.display());

    let result = ElaAnalyzer::new(path)?
        .with_config(config.clone())
        .analyze()?;

    let base = output_base(path, out_dir)?;

    let mut difference_path = base.clone().into_os_string();
    difference_path.push("_difference.jpg");
    let difference_path = PathBuf::from(difference_path);

    let mut masked_path = base.into_os_string();
    masked_path.push("_masked.jpg");
    let masked_path = PathBuf::from(masked_path);

    result.save_difference(&difference_path)?;
    result.save_masked(&masked_path)?;

    Ok(ProcessedFile {
        input: path.to_path_buf(),
        difference_path,
        masked_path,
        max_difference: result.difference.max_difference,
        flagged_pixels: result.masked.flagged_pixels,
    })
}

/// Independent per-file pipelines over every image in `dir`. One file
/// failing is recorded in its outcome and never sinks the rest.
pub fn process_folder(
    dir: &Path,
    config: &ElaConfig,
    out_dir: Option<&Path>,
) -> Result<Vec<FileOutcome>> {
    let files = image_files(dir)?;

    info!("Examining {} image files in {}", files.len(), dir.display());

    let outcome_of = |path: &PathBuf| FileOutcome {
        input: path.clone(),
        result: process_file(path, config, out_dir),
    };

    let outcomes: Vec<FileOutcome> = if config.parallel {
        files.par_iter().map(outcome_of).collect()
    } else {
        files.iter().map(outcome_of).collect()
    };

    for outcome in &outcomes {
        if let Err(err) = &outcome.result {
            warn!("Analysis failed for {}: {}", outcome.input.display(), err);
        }
    }

    Ok(outcomes)
}

fn image_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }

    files.sort();

    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

fn output_base(path: &Path, out_dir: Option<&Path>) -> Result<PathBuf> {
    let stem = path.file_stem().ok_or_else(|| {
        ElaError::InvalidParameter(format!("No file name in {}", path.display()))
    })?;

    let dir = match out_dir {
        Some(dir) => dir.to_path_buf(),
        None => path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    Ok(dir.join(stem))
}
