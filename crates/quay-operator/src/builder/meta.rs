use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

/// A builder to build [`ObjectMeta`] objects.
#[derive(Clone, Debug, Default)]
pub struct ObjectMetaBuilder {
    name: Option<String>,
    namespace: Option<String>,
    labels: Option<BTreeMap<String, String>>,
}

impl ObjectMetaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn namespace_opt(&mut self, namespace: impl Into<Option<String>>) -> &mut Self {
        self.namespace = namespace.into();
        self
    }

    /// This adds multiple labels to the existing labels.
    /// Any existing label with a key that is contained in `labels` will be overwritten
    pub fn with_labels(&mut self, labels: BTreeMap<String, String>) -> &mut Self {
        self.labels.get_or_insert_with(BTreeMap::new).extend(labels);
        self
    }

    /// This will replace all existing labels
    pub fn labels(&mut self, labels: BTreeMap<String, String>) -> &mut Self {
        self.labels = Some(labels);
        self
    }

    pub fn build(&self) -> ObjectMeta {
        ObjectMeta {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            labels: self.labels.clone(),
            ..ObjectMeta::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn objectmeta_builder() {
        let meta = ObjectMetaBuilder::new()
            .name("example-quay")
            .namespace_opt(Some("quay-enterprise".to_owned()))
            .with_labels(BTreeMap::from([("app".to_owned(), "quay-operator".to_owned())]))
            .with_labels(BTreeMap::from([(
                "quay-enterprise-component".to_owned(),
                "app".to_owned(),
            )]))
            .build();

        assert_eq!(meta.name.as_deref(), Some("example-quay"));
        assert_eq!(meta.namespace.as_deref(), Some("quay-enterprise"));
        assert_eq!(meta.labels.as_ref().map(BTreeMap::len), Some(2));
        assert_eq!(meta.annotations, None);
    }

    #[test]
    fn objectmeta_builder_replaces_labels() {
        let meta = ObjectMetaBuilder::new()
            .with_labels(BTreeMap::from([("stale".to_owned(), "true".to_owned())]))
            .labels(BTreeMap::from([("app".to_owned(), "quay".to_owned())]))
            .namespace_opt(None)
            .build();

        assert_eq!(
            meta.labels,
            Some(BTreeMap::from([("app".to_owned(), "quay".to_owned())]))
        );
        assert_eq!(meta.namespace, None);
    }
}
