/// Contains constant values which are used as arguments to functions and in log messages.
pub(crate) mod constants;

/// Contains the error handling tooling.
pub(crate) mod error;

/// Contains the YAML file helpers shared by the Chart.yaml and values.yaml bumps.
pub(crate) mod yaml;
