use crate::{
    common::constants::{IMAGE_KEY, TAG_KEY},
    values::shape::{MatchedImage, Shape},
};
use serde_yaml::{Mapping, Value};

/// Outcome of bumping a single image tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagState {
    /// The tag already carries the requested version.
    Found,
    /// The tag was replaced.
    Updated,
}

/// Replaces the tag of the image reference `matched` was classified from. Only the tag
/// component is written; keys keep their position in the mapping.
pub(crate) fn rewrite(values: &mut Mapping, matched: &MatchedImage, new_tag: &str) -> TagState {
    if matched.reference.tag().trim() == new_tag {
        return TagState::Found;
    }

    match matched.shape {
        Shape::InlineTagged => {
            let image = format!("{}:{}", matched.reference.repository(), new_tag);
            values.insert(Value::from(IMAGE_KEY), Value::String(image));
        }
        Shape::SplitTag | Shape::SplitRegistryTag => {
            values.insert(Value::from(TAG_KEY), Value::from(new_tag));
        }
        Shape::NestedObject | Shape::NestedObjectWithRegistry => {
            if let Some(Value::Mapping(image)) = values.get_mut(IMAGE_KEY) {
                image.insert(Value::from(TAG_KEY), Value::from(new_tag));
            }
        }
    }

    TagState::Updated
}
