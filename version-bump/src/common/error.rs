use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub(crate) enum Error {
    /// Error for when cli args are parsed.
    #[snafu(display("Failed to parse cli args: {}", source))]
    CliArgsParse { source: clap::error::Error },

    /// Error for use when parsing invalid tracing-subscriber filter directive.
    #[snafu(display(
        "Failed to create tracing-subscriber filter with directive {}: {}",
        filter,
        source
    ))]
    TracingSubscriberFilter {
        source: tracing_subscriber::filter::ParseError,
        filter: String,
    },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    #[snafu(display("Failed to read version from file {}: {}", filepath.display(), source))]
    ReadingVersionFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when a version is required by the --error-no-* options but none was given.
    #[snafu(display("No {} found", name))]
    MissingVersion { name: String },

    #[snafu(display("No valid images specified in '{}'", input))]
    EmptyImageList { input: String },

    #[snafu(display("Failed to open file {}: {}", filepath.display(), source))]
    OpeningFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    #[snafu(display("Chart file {} is not a YAML mapping", filepath.display()))]
    ChartNotAMapping { filepath: PathBuf },

    /// Error for when none of the supported image reference layouts matches.
    #[snafu(display(
        "No image tag found in {}, unrecognized image layout:\n{}",
        filepath.display(),
        subtree
    ))]
    UnrecognizedShape { filepath: PathBuf, subtree: String },

    #[snafu(display(
        "Image {} in {} is not one of the requested images {:?}",
        image,
        filepath.display(),
        images
    ))]
    ImageNotListed {
        filepath: PathBuf,
        image: String,
        images: Vec<String>,
    },

    #[snafu(display("Failed to serialize YAML for {}: {}", filepath.display(), source))]
    YamlSerialize {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    #[snafu(display("Failed to write file {}: {}", filepath.display(), source))]
    WritingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    #[snafu(display(
        "No changes found in chart, app or image versions in {}",
        working_dir.display()
    ))]
    NoRelease { working_dir: PathBuf },
}

/// The failure categories reported back to the caller of the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorKind {
    /// Invalid options or a missing required version.
    Usage,
    /// The document could not be read or parsed.
    UnreadableDocument,
    /// None of the supported image layouts matched.
    UnrecognizedShape,
    /// The document could not be serialized or persisted.
    UnwritableDocument,
    /// Nothing was changed while --error-no-release was set.
    NoRelease,
    Other,
}

impl ErrorKind {
    /// Process exit status, following sysexits.h where a code exists.
    pub(crate) fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Usage => 64,
            ErrorKind::UnreadableDocument | ErrorKind::UnrecognizedShape => 65,
            ErrorKind::UnwritableDocument => 74,
            ErrorKind::NoRelease | ErrorKind::Other => 1,
        }
    }
}

impl Error {
    pub(crate) fn kind(&self) -> ErrorKind {
        match self {
            Error::CliArgsParse { .. }
            | Error::ValidateDirPath { .. }
            | Error::NotADirectory { .. }
            | Error::ReadingVersionFile { .. }
            | Error::MissingVersion { .. }
            | Error::EmptyImageList { .. } => ErrorKind::Usage,
            Error::OpeningFile { .. }
            | Error::YamlParseFromFile { .. }
            | Error::ChartNotAMapping { .. } => ErrorKind::UnreadableDocument,
            Error::UnrecognizedShape { .. } | Error::ImageNotListed { .. } => {
                ErrorKind::UnrecognizedShape
            }
            Error::YamlSerialize { .. } | Error::WritingFile { .. } => {
                ErrorKind::UnwritableDocument
            }
            Error::NoRelease { .. } => ErrorKind::NoRelease,
            Error::TracingSubscriberFilter { .. } | Error::RegexCompile { .. } => ErrorKind::Other,
        }
    }
}

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;

pub(crate) fn must<T>(output: Result<T>) -> T {
    match output {
        Ok(value) => value,
        Err(error) => {
            tracing::error!(%error, "Failed to bump versions");
            std::process::exit(error.kind().exit_code());
        }
    }
}
