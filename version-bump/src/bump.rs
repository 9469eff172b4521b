use crate::{
    chart::bump_chart,
    common::error::{
        Error::{MissingVersion, NoRelease},
        ErrorKind, Result,
    },
    opts::{
        validators::{parse_image_list, resolve_version},
        CliArgs,
    },
    values::{pipeline::DocumentPipeline, rewrite::TagState},
};
use tracing::{info, warn};

/// Resolves a version from its literal and file options. A missing version is an error when
/// `required`, and is otherwise logged and skipped.
fn version_or_skip(
    name: &str,
    literal: Option<String>,
    file: Option<std::path::PathBuf>,
    required: bool,
) -> Result<Option<String>> {
    let version = resolve_version(literal, file)?;
    if version.is_none() {
        if required {
            return Err(MissingVersion {
                name: name.to_string(),
            });
        }
        warn!("No {} found, skipping...", name);
    }
    Ok(version)
}

/// Bumps the chart's version and appVersion in Chart.yaml, and the image tag in values.yaml.
pub(crate) fn bump(opts: &CliArgs) -> Result<()> {
    let chart_version = if opts.skip_chart_version() {
        None
    } else {
        version_or_skip(
            "chart-version",
            opts.chart_version(),
            opts.chart_version_file(),
            opts.error_no_chart_version(),
        )?
    };
    let app_version = if opts.skip_app_version() {
        None
    } else {
        version_or_skip(
            "app-version",
            opts.app_version(),
            opts.app_version_file(),
            opts.error_no_app_version(),
        )?
    };

    // The image tag is only bumped when the images to look for are given.
    let image_bump = match opts.image() {
        Some(image) => {
            let images = parse_image_list(image.as_str())?;
            version_or_skip(
                "image-version",
                opts.image_version(),
                opts.image_version_file(),
                opts.error_no_image_version(),
            )?
            .map(|version| (images, version))
        }
        None => None,
    };

    info!(working_dir = %opts.working_dir().display(), "Initializing version bump...");
    let mut release_found = false;

    if chart_version.is_some() || app_version.is_some() {
        release_found |= bump_chart(
            opts.chart_file().as_path(),
            chart_version.as_deref(),
            app_version.as_deref(),
        )?;
    }

    if let Some((images, version)) = image_bump {
        info!("Images to search: [{}]", images.join(", "));
        match DocumentPipeline::new(images).run(opts.values_file().as_path(), version.as_str()) {
            Ok(TagState::Updated) => {
                info!(version = %version, "Image tag updated");
                release_found = true;
            }
            Ok(TagState::Found) => {}
            Err(error)
                if error.kind() == ErrorKind::UnrecognizedShape && !opts.error_no_tags() =>
            {
                warn!(%error, "No image tags found, skipping due to error-no-tags option");
            }
            Err(error) => return Err(error),
        }
    }

    if opts.error_no_release() && !release_found {
        return Err(NoRelease {
            working_dir: opts.working_dir(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::Error;
    use clap::Parser;
    use serde_yaml::Value;
    use std::fs;
    use tempfile::TempDir;

    fn chart_dir(values: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("Chart.yaml"),
            "apiVersion: v2\nname: app\nversion: 0.1.0\nappVersion: 1.0.0\n",
        )
        .unwrap();
        fs::write(dir.path().join("values.yaml"), values).unwrap();
        dir
    }

    fn opts(dir: &TempDir, args: &[&str]) -> CliArgs {
        let working_dir = dir.path().to_string_lossy().to_string();
        let mut argv = vec!["version-bump", "--working-dir", working_dir.as_str()];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap()
    }

    fn read(dir: &TempDir, file: &str) -> Value {
        serde_yaml::from_str(&fs::read_to_string(dir.path().join(file)).unwrap()).unwrap()
    }

    #[test]
    fn chart_and_image_are_bumped_together() {
        let dir = chart_dir("image:\n  repository: repo/app\n  tag: 1.0.0\n");
        let opts = opts(
            &dir,
            &[
                "--chart-version",
                "0.2.0",
                "--app-version",
                "1.1.0",
                "--image",
                "[repo/app]",
                "--image-version",
                "1.1.0",
                "--error-no-release",
            ],
        );

        bump(&opts).unwrap();

        let chart = read(&dir, "Chart.yaml");
        assert_eq!(chart["version"], "0.2.0");
        assert_eq!(chart["appVersion"], "1.1.0");
        assert_eq!(read(&dir, "values.yaml")["image"]["tag"], "1.1.0");
    }

    #[test]
    fn image_version_is_read_from_file() {
        let dir = chart_dir("image: repo/app:1.0.0\n");
        let version_file = dir.path().join("VERSION");
        fs::write(&version_file, "3.0.0\n").unwrap();
        let version_file = version_file.to_string_lossy().to_string();
        let opts = opts(
            &dir,
            &["--image", "repo/app", "--version-file", version_file.as_str()],
        );

        bump(&opts).unwrap();
        assert_eq!(read(&dir, "values.yaml")["image"], "repo/app:3.0.0");
    }

    #[test]
    fn unrecognized_values_fail_unless_tags_are_optional() {
        let dir = chart_dir("replicas: 1\n");

        let strict = opts(&dir, &["--image", "repo/app", "--image-version", "2.0.0"]);
        let error = bump(&strict).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::UnrecognizedShape);

        let lenient = opts(
            &dir,
            &[
                "--image",
                "repo/app",
                "--image-version",
                "2.0.0",
                "--error-no-tags",
                "false",
            ],
        );
        bump(&lenient).unwrap();
    }

    #[test]
    fn nothing_changed_is_an_error_when_a_release_is_required() {
        let dir = chart_dir("image: repo/app:1.0.0\n");
        let opts = opts(
            &dir,
            &[
                "--chart-version",
                "0.1.0",
                "--image",
                "repo/app",
                "--image-version",
                "1.0.0",
                "--error-no-release",
            ],
        );

        let error = bump(&opts).unwrap_err();
        assert!(matches!(error, Error::NoRelease { .. }));
        assert_eq!(error.kind().exit_code(), 1);
    }

    #[test]
    fn missing_required_image_version_is_a_usage_error() {
        let dir = chart_dir("image: repo/app:1.0.0\n");
        let opts = opts(&dir, &["--image", "repo/app", "--error-no-image-version"]);

        let error = bump(&opts).unwrap_err();
        assert!(matches!(error, Error::MissingVersion { .. }));
        assert_eq!(error.kind(), ErrorKind::Usage);
    }

    #[test]
    fn skipped_chart_version_leaves_chart_untouched() {
        let dir = chart_dir("image: repo/app:1.0.0\n");
        let original = fs::read_to_string(dir.path().join("Chart.yaml")).unwrap();
        let opts = opts(
            &dir,
            &[
                "--chart-version",
                "9.9.9",
                "--skip-chart-version",
                "--error-no-chart-version",
            ],
        );

        bump(&opts).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("Chart.yaml")).unwrap(),
            original
        );
    }
}
