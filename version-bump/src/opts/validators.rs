use crate::common::{
    constants::IMAGE_LIST_DECORATIONS,
    error::{
        Error::{EmptyImageList, NotADirectory, ReadingVersionFile, RegexCompile, ValidateDirPath},
        Result,
    },
};
use regex::Regex;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Checks that the chart's working directory exists and is a directory.
pub(crate) fn validate_working_dir(path: &Path) -> Result<()> {
    let is_dir = fs::metadata(path)
        .map(|m| m.is_dir())
        .map_err(|e| ValidateDirPath {
            source: e,
            path: path.to_path_buf(),
        })?;
    if !is_dir {
        return Err(NotADirectory {
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Returns the trimmed `literal` version if it is non-empty, else the trimmed first line of
/// `file`. An empty result counts as no version.
pub(crate) fn resolve_version(
    literal: Option<String>,
    file: Option<PathBuf>,
) -> Result<Option<String>> {
    let non_empty = |version: &str| -> Option<String> {
        let version = version.trim();
        (!version.is_empty()).then(|| version.to_string())
    };

    if let Some(version) = literal.as_deref().and_then(non_empty) {
        return Ok(Some(version));
    }

    match file {
        Some(filepath) => {
            let contents = fs::read_to_string(&filepath)
                .map_err(|e| ReadingVersionFile { source: e, filepath })?;
            Ok(contents.lines().next().and_then(non_empty))
        }
        None => Ok(None),
    }
}

/// Parses the --image option. Surrounding brackets and quotes are stripped, e.g.
/// `["repo/app", 'ghcr.io/org/app']` and `repo/app,ghcr.io/org/app` give the same list.
pub(crate) fn parse_image_list(input: &str) -> Result<Vec<String>> {
    let decorations = Regex::new(IMAGE_LIST_DECORATIONS).map_err(|e| RegexCompile {
        source: e,
        expression: IMAGE_LIST_DECORATIONS.to_string(),
    })?;

    let images: Vec<String> = decorations
        .replace_all(input, "")
        .split(',')
        .map(str::trim)
        .filter(|image| !image.is_empty())
        .map(ToString::to_string)
        .collect();

    if images.is_empty() {
        return Err(EmptyImageList {
            input: input.to_string(),
        });
    }

    Ok(images)
}
