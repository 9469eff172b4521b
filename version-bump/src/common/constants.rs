/// This is the tracing-subscriber filter directive used when RUST_LOG is unset.
pub(crate) const DEFAULT_TRACING_FILTER: &str = "info";

/// Default Helm chart metadata filename, relative to the working directory.
pub(crate) const CHART_FILE_NAME: &str = "Chart.yaml";

/// Default Helm chart values filename, relative to the working directory.
pub(crate) const VALUES_FILE_NAME: &str = "values.yaml";

/// Key of the Chart.yaml chart version.
pub(crate) const CHART_VERSION_KEY: &str = "version";

/// Key of the Chart.yaml application version.
pub(crate) const APP_VERSION_KEY: &str = "appVersion";

/// HelmRelease-style documents nest the chart values under this key.
pub(crate) const VALUES_KEY: &str = "values";

pub(crate) const IMAGE_KEY: &str = "image";
pub(crate) const REGISTRY_KEY: &str = "registry";
pub(crate) const REPOSITORY_KEY: &str = "repository";
pub(crate) const TAG_KEY: &str = "tag";

/// Characters stripped from the --image list before it is split on commas.
pub(crate) const IMAGE_LIST_DECORATIONS: &str = r#"[\[\]"']"#;
