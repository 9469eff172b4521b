use crate::common::{
    constants::{APP_VERSION_KEY, CHART_VERSION_KEY},
    error::{Error::ChartNotAMapping, Result},
    yaml::{load_yaml_file, save_yaml_file, scalar_string},
};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::info;

/// Sets `version` and `appVersion` in the Chart.yaml at `chart_path`. The file is written only
/// when one of them changed, and the return value says whether it was.
pub(crate) fn bump_chart(
    chart_path: &Path,
    chart_version: Option<&str>,
    app_version: Option<&str>,
) -> Result<bool> {
    info!(file = %chart_path.display(), "Loading chart");
    let mut document = load_yaml_file(chart_path)?;
    let chart = document.as_mapping_mut().ok_or_else(|| ChartNotAMapping {
        filepath: chart_path.to_path_buf(),
    })?;

    let mut changed = false;
    if let Some(version) = chart_version {
        changed |= set_version(chart, CHART_VERSION_KEY, version);
    }
    if let Some(version) = app_version {
        changed |= set_version(chart, APP_VERSION_KEY, version);
    }

    if changed {
        info!(file = %chart_path.display(), "Saving chart");
        save_yaml_file(chart_path, &document)?;
    }

    Ok(changed)
}

fn set_version(chart: &mut Mapping, key: &str, version: &str) -> bool {
    if scalar_string(chart.get(key)).as_deref() == Some(version) {
        info!(key, version, "No changes to version, skipping");
        return false;
    }

    info!(key, version, "Updating version");
    chart.insert(Value::from(key), Value::from(version));
    true
}
