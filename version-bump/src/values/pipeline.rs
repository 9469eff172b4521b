use crate::{
    common::{
        error::{
            Error::{ImageNotListed, UnrecognizedShape},
            Result,
        },
        yaml::{load_yaml_file, render_yaml, save_yaml_file},
    },
    values::{
        rewrite::{rewrite, TagState},
        shape::match_shape,
        values_subtree_mut,
    },
};
use serde_yaml::Value;
use std::path::Path;
use tracing::info;

/// Bumps the image tag of a single values document.
pub(crate) struct DocumentPipeline {
    /// When non-empty, only an image whose name is in this list is bumped.
    images: Vec<String>,
}

impl DocumentPipeline {
    pub(crate) fn new(images: Vec<String>) -> Self {
        Self { images }
    }

    /// Loads the document at `document_path`, sets its image tag to `new_tag` and writes it
    /// back. The file is only written when the tag changed, and never when an error is returned.
    pub(crate) fn run(&self, document_path: &Path, new_tag: &str) -> Result<TagState> {
        let new_tag = new_tag.trim();
        info!(file = %document_path.display(), "Loading values");
        let mut document = load_yaml_file(document_path)?;

        let state = self.bump(&mut document, document_path, new_tag)?;
        match state {
            TagState::Updated => {
                info!(file = %document_path.display(), "Saving values");
                save_yaml_file(document_path, &document)?;
            }
            TagState::Found => {
                info!(version = %new_tag, "Image tag is already at the requested version");
            }
        }

        Ok(state)
    }

    /// Applies the tag bump to a parsed document in place.
    pub(crate) fn bump(
        &self,
        document: &mut Value,
        document_path: &Path,
        new_tag: &str,
    ) -> Result<TagState> {
        let Some(values) = values_subtree_mut(document) else {
            return Err(UnrecognizedShape {
                filepath: document_path.to_path_buf(),
                subtree: render_yaml(&*document),
            });
        };

        let matched = match_shape(values).ok_or_else(|| UnrecognizedShape {
            filepath: document_path.to_path_buf(),
            subtree: render_yaml(&*values),
        })?;

        let image = matched.reference.name();
        if !self.images.is_empty() && !self.images.contains(&image) {
            return Err(ImageNotListed {
                filepath: document_path.to_path_buf(),
                image,
                images: self.images.clone(),
            });
        }

        info!(
            image = %image,
            shape = ?matched.shape,
            tag = %matched.reference.tag(),
            version = %new_tag,
            "Found image reference"
        );

        Ok(rewrite(values, &matched, new_tag))
    }
}
