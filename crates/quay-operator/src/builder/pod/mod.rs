use indexmap::IndexMap;
use k8s_openapi::{
    api::core::v1::{Container, LocalObjectReference, PodSpec, PodTemplateSpec, Volume},
    apimachinery::pkg::apis::meta::v1::ObjectMeta,
};
use snafu::Snafu;

pub mod container;
pub mod env;
pub mod probe;
pub mod resources;
pub mod volume;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum Error {
    #[snafu(display(
        "Colliding volume name {colliding_volume_name:?} in volumes with different content"
    ))]
    VolumeNameCollision { colliding_volume_name: String },
}

/// A builder to build [`PodTemplateSpec`] objects.
///
/// Volumes are kept in an [`IndexMap`] so they come out in insertion order, which keeps the
/// rendered Deployments stable between runs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PodBuilder {
    containers: Vec<Container>,
    image_pull_secrets: Option<Vec<LocalObjectReference>>,
    metadata: Option<ObjectMeta>,
    service_account_name: Option<String>,
    volumes: IndexMap<String, Volume>,
}

impl PodBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn service_account_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.service_account_name = Some(value.into());
        self
    }

    pub fn metadata(&mut self, metadata: impl Into<ObjectMeta>) -> &mut Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn add_container(&mut self, container: Container) -> &mut Self {
        self.containers.push(container);
        self
    }

    /// Adds a [`Volume`] to the pod.
    ///
    /// Adding the exact same volume twice is a no-op, adding a different volume under an already
    /// used name is an error.
    pub fn add_volume(&mut self, volume: Volume) -> Result<&mut Self> {
        if let Some(existing_volume) = self.volumes.get(&volume.name) {
            if existing_volume != &volume {
                let colliding_volume_name = &volume.name;
                // We don't want to include the details in the error message, but instead trace them
                tracing::error!(
                    colliding_volume_name,
                    ?existing_volume,
                    "Colliding volume name in volumes with different content"
                );

                VolumeNameCollisionSnafu {
                    colliding_volume_name,
                }
                .fail()?;
            }
        } else {
            self.volumes.insert(volume.name.clone(), volume);
        }

        Ok(self)
    }

    /// Orders the volumes by name, independent of the order they were added in.
    pub fn sort_volumes(&mut self) -> &mut Self {
        self.volumes.sort_keys();
        self
    }

    pub fn volume_names(&self) -> impl Iterator<Item = &str> {
        self.volumes.keys().map(String::as_str)
    }

    pub fn image_pull_secrets(&mut self, secrets: impl IntoIterator<Item = String>) -> &mut Self {
        self.image_pull_secrets
            .get_or_insert_with(Vec::new)
            .extend(secrets.into_iter().map(|name| LocalObjectReference { name }));
        self
    }

    /// Returns a [`PodTemplateSpec`], usable for building a
    /// [`Deployment`](`k8s_openapi::api::apps::v1::Deployment`)
    pub fn build_template(&self) -> PodTemplateSpec {
        PodTemplateSpec {
            metadata: self.metadata.clone(),
            spec: Some(self.build_spec()),
        }
    }

    fn build_spec(&self) -> PodSpec {
        let volumes = if self.volumes.is_empty() {
            None
        } else {
            Some(self.volumes.values().cloned().collect())
        };

        PodSpec {
            containers: self.containers.clone(),
            volumes,
            service_account_name: self.service_account_name.clone(),
            image_pull_secrets: self.image_pull_secrets.clone(),
            ..PodSpec::default()
        }
    }
}
