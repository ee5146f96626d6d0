use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::api::core::v1::{EnvVar, PodTemplateSpec, Volume};
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::{
    builder::{
        meta::ObjectMetaBuilder,
        pod::{
            PodBuilder,
            container::ContainerBuilder,
            env::env_var_from_secret,
            resources::ResourceRequirementsBuilder,
            volume::{VolumeBuilder, VolumeMountBuilder},
        },
    },
    configuration::QuayConfiguration,
    crd::ComputeResources,
    defaults::present,
    quantity::{CpuQuantity, MemoryQuantity},
    workload::{
        AddVolumeSnafu, Component, DanglingVolumeSnafu, InvalidResourceQuantitySnafu,
        MissingVolumeSnafu, MountPathCollisionSnafu, ResourceField, Result,
    },
};

/// An optional part of a Pod template, enabled by the configuration.
///
/// Features only ever add to a [`PodTemplateDraft`] and never look at what other features did, so
/// the order in which they are applied does not matter.
#[derive(Clone, Debug, PartialEq)]
pub enum Feature {
    /// Pull all images with the given Secret.
    ImagePullSecret { secret_name: String },

    /// Mount an existing PersistentVolumeClaim.
    PersistentStorage {
        volume_name: String,
        claim_name: String,
        mount_path: String,
    },

    /// Mount all keys of a Secret.
    ProjectedSecret {
        volume_name: String,
        secret_name: String,
        mount_path: String,
    },

    /// Request and limit CPU and memory. At least one of both is set.
    ResourceLimits {
        cpu: Option<CpuQuantity>,
        memory: Option<MemoryQuantity>,
    },

    /// Environment variables read from keys of a Secret, given as `(variable, key)` pairs.
    SecretEnvVars {
        secret_name: String,
        variables: Vec<(String, String)>,
    },
}

impl Feature {
    /// The pull secret feature, if the ecosystem has a pull secret configured.
    pub fn image_pull_secret(config: &QuayConfiguration) -> Option<Self> {
        config
            .image_pull_secret_name()
            .map(|secret_name| Self::ImagePullSecret {
                secret_name: secret_name.to_owned(),
            })
    }

    /// The resource limits feature, if CPU or memory is overridden.
    ///
    /// Both quantities are validated here, a malformed value is reported with the component and
    /// field it was configured for.
    pub fn resource_limits(
        component: Component,
        resources: &ComputeResources,
    ) -> Result<Option<Self>> {
        let cpu = present(resources.cpu.as_deref())
            .map(|value| {
                value.parse::<CpuQuantity>().context(InvalidResourceQuantitySnafu {
                    component,
                    field: ResourceField::Cpu,
                    value,
                })
            })
            .transpose()?;

        let memory = present(resources.memory.as_deref())
            .map(|value| {
                value
                    .parse::<MemoryQuantity>()
                    .context(InvalidResourceQuantitySnafu {
                        component,
                        field: ResourceField::Memory,
                        value,
                    })
            })
            .transpose()?;

        if cpu.is_none() && memory.is_none() {
            return Ok(None);
        }

        Ok(Some(Self::ResourceLimits { cpu, memory }))
    }

    pub fn apply(&self, draft: &mut PodTemplateDraft) -> Result<()> {
        debug!(component = %draft.component, feature = ?self, "applying feature");

        match self {
            Self::ImagePullSecret { secret_name } => {
                draft.pod.image_pull_secrets([secret_name.clone()]);
            }
            Self::PersistentStorage {
                volume_name,
                claim_name,
                mount_path,
            } => {
                let volume = VolumeBuilder::new(volume_name)
                    .with_persistent_volume_claim(claim_name)
                    .build();
                draft.add_volume_with_mount(volume, mount_path)?;
            }
            Self::ProjectedSecret {
                volume_name,
                secret_name,
                mount_path,
            } => {
                let volume = VolumeBuilder::new(volume_name)
                    .with_projected_secret(secret_name)
                    .build();
                draft.add_volume_with_mount(volume, mount_path)?;
            }
            Self::ResourceLimits { cpu, memory } => {
                if let Some(cpu) = cpu {
                    draft.resources.with_cpu(cpu.clone());
                }
                if let Some(memory) = memory {
                    draft.resources.with_memory(memory.clone());
                }
            }
            Self::SecretEnvVars {
                secret_name,
                variables,
            } => {
                draft.add_env_vars(
                    variables
                        .iter()
                        .map(|(name, key)| env_var_from_secret(name, secret_name, key)),
                );
            }
        }

        Ok(())
    }
}

/// A Pod template under construction.
///
/// Volumes can only be added together with their mount on the primary container. [`Self::finish`]
/// additionally verifies that no volume or mount was left without its counterpart.
#[derive(Clone, Debug)]
pub struct PodTemplateDraft {
    component: Component,
    container: ContainerBuilder,
    pod: PodBuilder,
    resources: ResourceRequirementsBuilder,
    volume_mounts: BTreeMap<String, String>,
}

impl PodTemplateDraft {
    pub fn new(component: Component, container: ContainerBuilder) -> Self {
        Self {
            component,
            container,
            pod: PodBuilder::new(),
            resources: ResourceRequirementsBuilder::new(),
            volume_mounts: BTreeMap::new(),
        }
    }

    pub fn service_account_name(&mut self, service_account_name: impl Into<String>) -> &mut Self {
        self.pod.service_account_name(service_account_name);
        self
    }

    pub fn add_env_vars(&mut self, env_vars: impl IntoIterator<Item = EnvVar>) -> &mut Self {
        self.container.add_env_vars(env_vars);
        self
    }

    /// Adds `volume` to the pod and mounts it at `mount_path` in the primary container.
    pub fn add_volume_with_mount(
        &mut self,
        volume: Volume,
        mount_path: impl Into<String>,
    ) -> Result<&mut Self> {
        let component = self.component;
        let volume_name = volume.name.clone();
        let mount_path = mount_path.into();

        if let Some(existing_mount_path) = self.volume_mounts.get(&volume_name) {
            ensure!(
                existing_mount_path == &mount_path,
                MountPathCollisionSnafu {
                    component,
                    volume: &volume_name,
                    existing_mount_path,
                    mount_path,
                }
            );
        }

        self.pod.add_volume(volume).context(AddVolumeSnafu {
            component,
            volume: &volume_name,
        })?;
        self.volume_mounts.insert(volume_name, mount_path);

        Ok(self)
    }

    /// Builds the [`PodTemplateSpec`] labelled with `labels`.
    ///
    /// Volumes and mounts are ordered by name.
    pub fn finish(mut self, labels: &BTreeMap<String, String>) -> Result<PodTemplateSpec> {
        for (volume_name, mount_path) in &self.volume_mounts {
            self.container
                .add_volume_mount(VolumeMountBuilder::new(volume_name, mount_path).build());
        }

        if !self.resources.is_empty() {
            self.container.resources(self.resources.build());
        }

        self.check_volume_pairing()?;

        self.pod
            .sort_volumes()
            .metadata(ObjectMetaBuilder::new().with_labels(labels.clone()).build())
            .add_container(self.container.build());

        Ok(self.pod.build_template())
    }

    fn check_volume_pairing(&self) -> Result<()> {
        let component = self.component;
        let mounted = self
            .container
            .volume_mounts()
            .iter()
            .map(|mount| mount.name.as_str())
            .collect::<BTreeSet<_>>();
        let volumes = self.pod.volume_names().collect::<BTreeSet<_>>();

        if let Some(volume) = mounted.difference(&volumes).next() {
            return MissingVolumeSnafu { component, volume: *volume }.fail();
        }

        if let Some(volume) = volumes.difference(&mounted).next() {
            return DanglingVolumeSnafu { component, volume: *volume }.fail();
        }

        Ok(())
    }
}
