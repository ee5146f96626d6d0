use k8s_openapi::api::core::v1::{
    PersistentVolumeClaimVolumeSource, ProjectedVolumeSource, SecretProjection, Volume,
    VolumeMount, VolumeProjection,
};

/// A builder to build [`Volume`] objects. May only contain one `volume_source`
/// at a time. E.g. a call like `with_projected_secret` after
/// `with_persistent_volume_claim` will overwrite the claim.
#[derive(Clone, Debug, Default)]
pub struct VolumeBuilder {
    name: String,
    volume_source: VolumeSource,
}

#[derive(Clone, Debug)]
pub enum VolumeSource {
    PersistentVolumeClaim(PersistentVolumeClaimVolumeSource),
    Projected(ProjectedVolumeSource),
}

impl Default for VolumeSource {
    fn default() -> Self {
        Self::Projected(ProjectedVolumeSource::default())
    }
}

impl VolumeBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Binds the volume to an existing claim. The claim is mounted read-write, `readOnly` is left
    /// unset.
    pub fn with_persistent_volume_claim(&mut self, claim_name: impl Into<String>) -> &mut Self {
        self.volume_source =
            VolumeSource::PersistentVolumeClaim(PersistentVolumeClaimVolumeSource {
                claim_name: claim_name.into(),
                read_only: None,
            });
        self
    }

    /// Projects every key of the given Secret into the volume.
    pub fn with_projected_secret(&mut self, secret_name: impl Into<String>) -> &mut Self {
        self.volume_source = VolumeSource::Projected(ProjectedVolumeSource {
            sources: Some(vec![VolumeProjection {
                secret: Some(SecretProjection {
                    name: secret_name.into(),
                    ..SecretProjection::default()
                }),
                ..VolumeProjection::default()
            }]),
            ..ProjectedVolumeSource::default()
        });
        self
    }

    pub fn build(&self) -> Volume {
        let name = self.name.clone();
        match &self.volume_source {
            VolumeSource::PersistentVolumeClaim(pvc) => Volume {
                name,
                persistent_volume_claim: Some(pvc.clone()),
                ..Volume::default()
            },
            VolumeSource::Projected(projected) => Volume {
                name,
                projected: Some(projected.clone()),
                ..Volume::default()
            },
        }
    }
}

/// A builder to build [`VolumeMount`] objects. Mounts are read-write, `readOnly` is never set.
#[derive(Clone, Debug, Default)]
pub struct VolumeMountBuilder {
    mount_path: String,
    name: String,
}

impl VolumeMountBuilder {
    pub fn new(name: impl Into<String>, mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            name: name.into(),
        }
    }

    pub fn build(&self) -> VolumeMount {
        VolumeMount {
            mount_path: self.mount_path.clone(),
            name: self.name.clone(),
            ..VolumeMount::default()
        }
    }
}
