use crate::common::constants::VALUES_KEY;
use serde_yaml::{Mapping, Value};

/// The DocumentPipeline, which loads, bumps and saves a values document.
pub(crate) mod pipeline;

/// Replaces the tag of a classified image reference.
pub(crate) mod rewrite;

/// Classifies image references into the supported layouts.
pub(crate) mod shape;

/// Returns the mapping holding the chart values. HelmRelease-style documents keep them under a
/// top-level `values` mapping, a chart's values.yaml is the mapping itself.
pub(crate) fn values_subtree_mut(document: &mut Value) -> Option<&mut Mapping> {
    let root = document.as_mapping_mut()?;
    if matches!(root.get(VALUES_KEY), Some(Value::Mapping(_))) {
        return root.get_mut(VALUES_KEY).and_then(Value::as_mapping_mut);
    }
    Some(root)
}
