use crate::common::{
    constants::{IMAGE_KEY, REGISTRY_KEY, REPOSITORY_KEY, TAG_KEY},
    yaml::{non_empty_str, scalar_string},
};
use serde_yaml::{Mapping, Value};

/// The layouts in which a chart's values may express an image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    /// `image: repo/image:version`
    InlineTagged,
    /// `image: repo/image` next to `tag: version`
    SplitTag,
    /// `registry: host`, `image: repo/image` and `tag: version` siblings
    SplitRegistryTag,
    /// `image: {repository, tag}`
    NestedObject,
    /// `image: {registry, repository, tag}`
    NestedObjectWithRegistry,
}

/// The normalized form of an image reference, whichever layout it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImageReference {
    registry: Option<String>,
    repository: String,
    tag: String,
}

impl ImageReference {
    pub(crate) fn new(registry: Option<&str>, repository: &str, tag: String) -> Self {
        Self {
            registry: registry.map(ToString::to_string),
            repository: repository.to_string(),
            tag,
        }
    }

    pub(crate) fn registry(&self) -> Option<&str> {
        self.registry.as_deref()
    }

    pub(crate) fn repository(&self) -> &str {
        self.repository.as_str()
    }

    pub(crate) fn tag(&self) -> &str {
        self.tag.as_str()
    }

    /// The image name without its tag, `registry/repository` when a registry is set. Trailing
    /// slashes are stripped from each part before joining.
    pub(crate) fn name(&self) -> String {
        match self.registry() {
            Some(registry) => format!(
                "{}/{}",
                registry.trim_end_matches('/'),
                self.repository.trim_end_matches('/')
            ),
            None => self.repository.trim_end_matches('/').to_string(),
        }
    }
}

/// A classified image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchedImage {
    pub(crate) shape: Shape,
    pub(crate) reference: ImageReference,
}

impl MatchedImage {
    fn new(shape: Shape, reference: ImageReference) -> Self {
        Self { shape, reference }
    }
}

/// Splits `repo/image:version` into repository and tag on the last colon. A colon before the
/// last slash is a registry port, and a digest reference has no tag.
pub(crate) fn split_inline_tag(image: &str) -> Option<(&str, &str)> {
    if image.contains('@') {
        return None;
    }
    let name_start = image.rfind('/').map_or(0, |slash| slash + 1);
    let colon = name_start + image[name_start..].rfind(':')?;
    let (repository, tag) = (&image[..colon], &image[colon + 1..]);
    if repository.is_empty() || tag.is_empty() {
        return None;
    }
    Some((repository, tag))
}

/// Classifies the image reference held by `values`, looking at its `image` key and, for the
/// split layouts, the sibling `registry` and `tag` keys. Rules are tried in order and the first
/// one satisfied wins. An inline tag alongside a sibling `tag` or `registry` is ambiguous and
/// matches nothing.
pub(crate) fn match_shape(values: &Mapping) -> Option<MatchedImage> {
    let sibling_registry = non_empty_str(values.get(REGISTRY_KEY));
    let sibling_tag = scalar_string(values.get(TAG_KEY));

    match values.get(IMAGE_KEY)? {
        Value::String(image) if !image.is_empty() => {
            if let Some((repository, tag)) = split_inline_tag(image) {
                if sibling_tag.is_some() || sibling_registry.is_some() {
                    return None;
                }
                return Some(MatchedImage::new(
                    Shape::InlineTagged,
                    ImageReference::new(None, repository, tag.to_string()),
                ));
            }

            let tag = sibling_tag?;
            let shape = match sibling_registry {
                Some(_) => Shape::SplitRegistryTag,
                None => Shape::SplitTag,
            };
            Some(MatchedImage::new(
                shape,
                ImageReference::new(sibling_registry, image, tag),
            ))
        }
        Value::Mapping(image) => {
            let repository = non_empty_str(image.get(REPOSITORY_KEY))?;
            let tag = scalar_string(image.get(TAG_KEY))?;
            let registry = non_empty_str(image.get(REGISTRY_KEY));
            let shape = match registry {
                Some(_) => Shape::NestedObjectWithRegistry,
                None => Shape::NestedObject,
            };
            Some(MatchedImage::new(
                shape,
                ImageReference::new(registry, repository, tag),
            ))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn inline_tagged_splits_on_last_colon() {
        let matched = match_shape(&values("image: repo/image:1.0.0\n")).unwrap();
        assert_eq!(matched.shape, Shape::InlineTagged);
        assert_eq!(matched.reference.repository(), "repo/image");
        assert_eq!(matched.reference.tag(), "1.0.0");
        assert_eq!(matched.reference.registry(), None);
    }

    #[test]
    fn registry_port_is_not_a_tag() {
        let matched =
            match_shape(&values("image: localhost:5000/team/app:v2\n")).unwrap();
        assert_eq!(matched.shape, Shape::InlineTagged);
        assert_eq!(matched.reference.repository(), "localhost:5000/team/app");
        assert_eq!(matched.reference.tag(), "v2");

        assert_eq!(match_shape(&values("image: localhost:5000/team/app\n")), None);

        let matched =
            match_shape(&values("image: localhost:5000/team/app\ntag: v3\n")).unwrap();
        assert_eq!(matched.shape, Shape::SplitTag);
        assert_eq!(matched.reference.repository(), "localhost:5000/team/app");
    }

    #[test]
    fn split_tag_and_split_registry_tag() {
        let matched = match_shape(&values("image: repo/image\ntag: 1.0.0\n")).unwrap();
        assert_eq!(matched.shape, Shape::SplitTag);
        assert_eq!(matched.reference.tag(), "1.0.0");

        let matched = match_shape(&values(
            "registry: quay.io\nimage: repo/image\ntag: 1.0.0\n",
        ))
        .unwrap();
        assert_eq!(matched.shape, Shape::SplitRegistryTag);
        assert_eq!(matched.reference.registry(), Some("quay.io"));
        assert_eq!(matched.reference.name(), "quay.io/repo/image");
    }

    #[test]
    fn nested_objects_with_and_without_registry() {
        let matched = match_shape(&values(
            "image:\n  repository: repo/image\n  tag: 1.0.0\n  pullPolicy: Always\n",
        ))
        .unwrap();
        assert_eq!(matched.shape, Shape::NestedObject);
        assert_eq!(matched.reference.name(), "repo/image");

        let matched = match_shape(&values(
            "image:\n  registry: docker.io/\n  repository: bitnami/redis\n  tag: '7.2'\n",
        ))
        .unwrap();
        assert_eq!(matched.shape, Shape::NestedObjectWithRegistry);
        assert_eq!(matched.reference.name(), "docker.io/bitnami/redis");
        assert_eq!(matched.reference.tag(), "7.2");
    }

    #[test]
    fn unquoted_numeric_tag_is_a_scalar() {
        let matched = match_shape(&values("image:\n  repository: app\n  tag: 1.5\n")).unwrap();
        assert_eq!(matched.shape, Shape::NestedObject);
        assert_eq!(matched.reference.tag(), "1.5");
    }

    #[test]
    fn inline_tag_with_sibling_tag_or_registry_is_ambiguous() {
        assert_eq!(match_shape(&values("image: repo/image:1.0\ntag: 2.0.0\n")), None);
        assert_eq!(
            match_shape(&values("image: repo/image:1.0\nregistry: quay.io\n")),
            None
        );
    }

    #[test]
    fn unrecognized_layouts() {
        assert_eq!(match_shape(&values("replicas: 1\n")), None);
        assert_eq!(match_shape(&values("image: repo/image\n")), None);
        assert_eq!(match_shape(&values("image: ''\ntag: 1.0.0\n")), None);
        assert_eq!(match_shape(&values("image: repo/image\ntag: ''\n")), None);
        assert_eq!(match_shape(&values("image:\n  repository: repo/image\n")), None);
        assert_eq!(match_shape(&values("image:\n  tag: 1.0.0\n")), None);
        assert_eq!(match_shape(&values("image: [a, b]\ntag: 1.0.0\n")), None);
        assert_eq!(
            match_shape(&values("registry: quay.io\nimage: repo/image\n")),
            None
        );
    }

    #[test]
    fn digest_references_carry_no_tag() {
        assert_eq!(split_inline_tag("repo/image@sha256:abcdef"), None);
        assert_eq!(match_shape(&values("image: repo/image@sha256:abcdef\n")), None);
    }

    #[test]
    fn split_inline_tag_edge_cases() {
        assert_eq!(split_inline_tag("nginx:1.25"), Some(("nginx", "1.25")));
        assert_eq!(split_inline_tag("nginx:"), None);
        assert_eq!(split_inline_tag(":1.25"), None);
        assert_eq!(split_inline_tag("nginx"), None);
    }
}
