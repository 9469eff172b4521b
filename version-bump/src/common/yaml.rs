use crate::common::error::{
    Error::{OpeningFile, WritingFile, YamlParseFromFile, YamlSerialize},
    Result,
};
use serde::Serialize;
use serde_yaml::Value;
use std::{fmt::Debug, fs, io::Write, path::Path};
use tempfile::NamedTempFile;
use tracing::debug;

/// Reads and parses the YAML document at `filepath`.
pub(crate) fn load_yaml_file(filepath: &Path) -> Result<Value> {
    let file = fs::File::open(filepath).map_err(|e| OpeningFile {
        source: e,
        filepath: filepath.to_path_buf(),
    })?;
    let document: Value = serde_yaml::from_reader(file).map_err(|e| YamlParseFromFile {
        source: e,
        filepath: filepath.to_path_buf(),
    })?;

    debug!(file = %filepath.display(), "Loaded YAML document");
    Ok(document)
}

/// Serializes `document` and replaces the contents of `filepath` with it. The contents are
/// written to a temporary file next to `filepath`, which is then renamed over it, so a failed
/// write leaves the original file intact.
pub(crate) fn save_yaml_file(filepath: &Path, document: &Value) -> Result<()> {
    let contents = serde_yaml::to_string(document).map_err(|e| YamlSerialize {
        source: e,
        filepath: filepath.to_path_buf(),
    })?;
    let writing_file = |e: std::io::Error| WritingFile {
        source: e,
        filepath: filepath.to_path_buf(),
    };

    let parent = match filepath.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(parent).map_err(writing_file)?;
    file.write_all(contents.as_bytes()).map_err(writing_file)?;
    file.as_file().sync_all().map_err(writing_file)?;
    file.persist(filepath).map_err(|e| writing_file(e.error))?;

    debug!(file = %filepath.display(), "Saved YAML document");
    Ok(())
}

/// Renders a YAML subtree for use in error messages.
pub(crate) fn render_yaml<T: Serialize + Debug>(value: &T) -> String {
    serde_yaml::to_string(value).unwrap_or_else(|_| format!("{:?}", value))
}

/// Returns the text of a non-empty string or of a number. Tags and chart versions are often
/// written unquoted, e.g. `tag: 1.0`, which YAML reads as a number. Numbers are rendered from
/// their parsed value, not their source text, so `tag: 1.10` reads as `1.1` and only the numeric
/// value takes part in comparisons.
pub(crate) fn scalar_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Returns the text of a non-empty string value.
pub(crate) fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|text| !text.is_empty())
}
