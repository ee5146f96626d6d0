//! The `QuayEcosystem` custom resource.
//!
//! Every field is optional. Unset values (including empty strings and zero numbers) are replaced by
//! component defaults during synthesis, see [`crate::defaults`].
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::defaults::Unset;

/// Desired state of a Quay registry together with its Redis cache and PostgreSQL database.
#[derive(Clone, CustomResource, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[kube(
    group = "redhatcop.redhat.io",
    version = "v1alpha1",
    kind = "QuayEcosystem",
    plural = "quayecosystems",
    namespaced,
    derive = "PartialEq",
    crates(
        kube_core = "kube::core",
        k8s_openapi = "k8s_openapi",
        schemars = "schemars"
    )
)]
#[serde(rename_all = "camelCase")]
pub struct QuayEcosystemSpec {
    /// Name of a Secret used to pull all images of the ecosystem.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_secret_name: Option<String>,

    #[serde(default)]
    pub quay: QuaySpec,

    #[serde(default)]
    pub redis: RedisSpec,
}

/// CPU and memory overrides of a component. Both are Kubernetes quantities, e.g. `500m` or `1Gi`.
///
/// A configured value is used as request and limit at the same time.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeResources {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuaySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Name of the Secret holding the password of the config app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_secret_name: Option<String>,

    /// Skips the deployment of the config app.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_setup: Option<bool>,

    #[serde(flatten)]
    pub resources: ComputeResources,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_storage: Option<RegistryStorage>,

    #[serde(default)]
    pub database: DatabaseSpec,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStorage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_volume: Option<PersistentVolumeRegistryStorage>,

    /// Directory inside the Quay container the registry data is written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_directory: Option<String>,
}

/// Backs the registry storage by a PersistentVolumeClaim.
#[derive(Clone, Debug, Default, Deserialize, Eq, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistentVolumeRegistryStorage {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub access_modes: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class_name: Option<String>,
}

/// A persistent volume without any settings is the same as no persistent volume.
impl Unset for PersistentVolumeRegistryStorage {
    fn is_unset(&self) -> bool {
        self.access_modes.is_unset()
            && self.capacity.is_unset()
            && self.storage_class_name.is_unset()
    }
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Passed to the Deployment as is, Kubernetes defaults it to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    /// Secret with the keys `database-username`, `database-password` and `database-name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_secret_name: Option<String>,

    /// Size of the database volume. Without it the database runs on ephemeral storage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume_size: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,

    /// Address of an externally managed database. No database is deployed if this is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,

    #[serde(flatten)]
    pub resources: ComputeResources,
}

#[derive(Clone, Debug, Default, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedisSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<i32>,

    #[serde(flatten)]
    pub resources: ComputeResources,
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use kube::CustomResourceExt;

    use super::*;

    #[test]
    fn deserialize_ecosystem() {
        let ecosystem: QuayEcosystem = serde_yaml::from_str(indoc! {"
            apiVersion: redhatcop.redhat.io/v1alpha1
            kind: QuayEcosystem
            metadata:
              name: example
            spec:
              imagePullSecretName: redhat-pull-secret
              quay:
                replicas: 2
                memory: 4Gi
                registryStorage:
                  persistentVolume:
                    accessModes:
                      - ReadWriteOnce
                    capacity: 10Gi
                  storageDirectory: /datastorage/registry
                database:
                  volumeSize: 10Gi
                  cpu: 500m
        "})
        .unwrap();

        let spec = ecosystem.spec;
        assert_eq!(
            spec.image_pull_secret_name.as_deref(),
            Some("redhat-pull-secret")
        );
        assert_eq!(spec.quay.replicas, Some(2));
        assert_eq!(spec.quay.resources.memory.as_deref(), Some("4Gi"));
        assert_eq!(spec.quay.database.resources.cpu.as_deref(), Some("500m"));
        assert_eq!(spec.quay.database.volume_size.as_deref(), Some("10Gi"));
        assert_eq!(spec.redis, RedisSpec::default());

        let persistent_volume = spec
            .quay
            .registry_storage
            .and_then(|storage| storage.persistent_volume)
            .unwrap();
        assert_eq!(persistent_volume.access_modes, vec!["ReadWriteOnce"]);
        assert!(!persistent_volume.is_unset());
    }

    #[test]
    fn empty_persistent_volume_is_unset() {
        assert!(PersistentVolumeRegistryStorage::default().is_unset());
        assert!(
            PersistentVolumeRegistryStorage {
                storage_class_name: Some(String::new()),
                ..Default::default()
            }
            .is_unset()
        );
    }

    #[test]
    fn crd_names() {
        let crd = QuayEcosystem::crd();
        assert_eq!(
            crd.metadata.name.as_deref(),
            Some("quayecosystems.redhatcop.redhat.io")
        );
        assert_eq!(crd.spec.names.kind, "QuayEcosystem");
        assert_eq!(crd.spec.scope, "Namespaced");
    }
}
