use crate::common::constants::{CHART_FILE_NAME, VALUES_FILE_NAME};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Validation and resolution helpers for the cli arguments.
pub(crate) mod validators;

/// These are the supported cli configuration options for the version bump. Every option may also
/// be set through a `PLUGIN_`-prefixed environment variable.
#[derive(Parser)]
#[command(name = "version-bump", author, about, long_about = None)]
pub(crate) struct CliArgs {
    /// This is the directory containing the Helm chart.
    #[arg(long, env = "PLUGIN_WORKING_DIR")]
    working_dir: PathBuf,

    /// This is the Chart.yaml path, relative to the working directory.
    #[arg(long, env = "PLUGIN_CHART_FILE", default_value = CHART_FILE_NAME)]
    chart_file: PathBuf,

    /// This is the version to set as the chart's 'version'.
    #[arg(long, env = "PLUGIN_CHART_VERSION")]
    chart_version: Option<String>,

    /// The chart version is read from the first line of this file, if --chart-version is unset.
    #[arg(long, env = "PLUGIN_CHART_VERSION_FILE")]
    chart_version_file: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_SKIP_CHART_VERSION",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    skip_chart_version: bool,

    /// This is the version to set as the chart's 'appVersion'.
    #[arg(long, env = "PLUGIN_APP_VERSION")]
    app_version: Option<String>,

    /// The app version is read from the first line of this file, if --app-version is unset.
    #[arg(long, env = "PLUGIN_APP_VERSION_FILE")]
    app_version_file: Option<PathBuf>,

    #[arg(
        long,
        env = "PLUGIN_SKIP_APP_VERSION",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    skip_app_version: bool,

    /// This is the values.yaml path, relative to the working directory.
    #[arg(long, env = "PLUGIN_VALUES_FILE", default_value = VALUES_FILE_NAME)]
    values_file: PathBuf,

    /// These are the images whose tag may be bumped, e.g. '[repo/app,ghcr.io/org/app]'. The
    /// image tag is only bumped if this is set.
    #[arg(long, env = "PLUGIN_IMAGE")]
    image: Option<String>,

    /// This is the image tag to set.
    #[arg(long, alias = "version", env = "PLUGIN_IMAGE_VERSION")]
    image_version: Option<String>,

    /// The image tag is read from the first line of this file, if --image-version is unset.
    #[arg(long, alias = "version-file", env = "PLUGIN_IMAGE_VERSION_FILE")]
    image_version_file: Option<PathBuf>,

    /// Fail if no chart version is given.
    #[arg(
        long,
        env = "PLUGIN_ERROR_NO_CHART_VERSION",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    error_no_chart_version: bool,

    /// Fail if no app version is given.
    #[arg(
        long,
        env = "PLUGIN_ERROR_NO_APP_VERSION",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    error_no_app_version: bool,

    /// Fail if images are given but no image version is.
    #[arg(
        long,
        env = "PLUGIN_ERROR_NO_IMAGE_VERSION",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    error_no_image_version: bool,

    /// Fail if neither the chart file nor the values file was changed.
    #[arg(
        long,
        env = "PLUGIN_ERROR_NO_RELEASE",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    error_no_release: bool,

    /// Fail if no matching image tag is found in the values file.
    #[arg(
        long,
        env = "PLUGIN_ERROR_NO_TAGS",
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    error_no_tags: bool,
}

impl CliArgs {
    /// This is the directory containing the Helm chart.
    pub(crate) fn working_dir(&self) -> PathBuf {
        self.working_dir.clone()
    }

    /// This is the Chart.yaml path, resolved against the working directory.
    pub(crate) fn chart_file(&self) -> PathBuf {
        self.working_dir.join(&self.chart_file)
    }

    /// This is the values.yaml path, resolved against the working directory.
    pub(crate) fn values_file(&self) -> PathBuf {
        self.working_dir.join(&self.values_file)
    }

    pub(crate) fn chart_version(&self) -> Option<String> {
        self.chart_version.clone()
    }

    pub(crate) fn chart_version_file(&self) -> Option<PathBuf> {
        self.chart_version_file.clone()
    }

    pub(crate) fn skip_chart_version(&self) -> bool {
        self.skip_chart_version
    }

    pub(crate) fn app_version(&self) -> Option<String> {
        self.app_version.clone()
    }

    pub(crate) fn app_version_file(&self) -> Option<PathBuf> {
        self.app_version_file.clone()
    }

    pub(crate) fn skip_app_version(&self) -> bool {
        self.skip_app_version
    }

    pub(crate) fn image(&self) -> Option<String> {
        self.image.clone()
    }

    pub(crate) fn image_version(&self) -> Option<String> {
        self.image_version.clone()
    }

    pub(crate) fn image_version_file(&self) -> Option<PathBuf> {
        self.image_version_file.clone()
    }

    pub(crate) fn error_no_chart_version(&self) -> bool {
        self.error_no_chart_version
    }

    pub(crate) fn error_no_app_version(&self) -> bool {
        self.error_no_app_version
    }

    pub(crate) fn error_no_image_version(&self) -> bool {
        self.error_no_image_version
    }

    pub(crate) fn error_no_release(&self) -> bool {
        self.error_no_release
    }

    pub(crate) fn error_no_tags(&self) -> bool {
        self.error_no_tags
    }
}
