use std::time::Duration;

use k8s_openapi::api::core::v1::PodTemplateSpec;
use tracing::warn;

use crate::{
    builder::pod::{
        container::{ContainerBuilder, ContainerPortBuilder},
        probe::ProbeBuilder,
    },
    configuration::QuayConfiguration,
    constants::{
        CONFIG_VOLUME_MOUNT_PATH, CONFIG_VOLUME_NAME, DATABASE_CREDENTIALS_DATABASE_KEY,
        DATABASE_CREDENTIALS_PASSWORD_KEY, DATABASE_CREDENTIALS_USERNAME_KEY,
        DATABASE_READINESS_COMMAND, DATABASE_VOLUME_MOUNT_PATH, DATABASE_VOLUME_NAME,
        DEFAULT_QUAY_REPLICAS, DEFAULT_REDIS_REPLICAS, DEFAULT_REGISTRY_STORAGE_DIRECTORY,
        POSTGRESQL_DATABASE_ENV, POSTGRESQL_PASSWORD_ENV, POSTGRESQL_PORT, POSTGRESQL_USER_ENV,
        QUAY_APP_CONTAINER_NAME, QUAY_CONFIG_CONTAINER_NAME, QUAY_CONFIG_PASSWORD_ENV,
        QUAY_CONFIG_PASSWORD_KEY, QUAY_ENTRY_CONFIG_VALUE, QUAY_ENTRY_ENV, QUAY_HEALTH_PATH,
        QUAY_HTTPS_PORT, QUAY_HTTPS_PORT_NAME, QUAY_HTTP_PORT, QUAY_HTTP_PORT_NAME,
        QUAY_SERVICE_ACCOUNT, REDIS_PORT, REDIS_SERVICE_ACCOUNT, REGISTRY_VOLUME_NAME,
    },
    crd::ComputeResources,
    defaults::{present, resolve},
    naming,
    workload::{Component, ComponentIdentity, Feature, PodTemplateDraft, Result},
};

/// Declarative description of one component workload.
///
/// [`Self::new`] holds the fixed per component policy: container definition, probes, ports,
/// service account and which features the configuration turns on.
#[derive(Clone, Debug)]
pub struct WorkloadTemplate {
    pub component: Component,
    pub container: ContainerBuilder,
    pub service_account_name: Option<&'static str>,

    /// `None` leaves the replica count to Kubernetes.
    pub replicas: Option<i32>,
    pub features: Vec<Feature>,
}

impl WorkloadTemplate {
    pub fn new(
        component: Component,
        identity: &ComponentIdentity,
        config: &QuayConfiguration,
    ) -> Result<Self> {
        match component {
            Component::Redis => Self::redis(identity, config),
            Component::Database => Self::database(identity, config),
            Component::QuayConfig => Ok(Self::quay_config(config)),
            Component::Quay => Self::quay(config),
        }
    }

    fn redis(identity: &ComponentIdentity, config: &QuayConfiguration) -> Result<Self> {
        let spec = &config.spec().redis;

        let mut container = ContainerBuilder::new(&identity.name);
        container
            .image(&config.redis_image)
            .add_container_ports([ContainerPortBuilder::new(REDIS_PORT).build()]);

        Ok(Self {
            component: Component::Redis,
            container,
            service_account_name: Some(REDIS_SERVICE_ACCOUNT),
            replicas: Some(replicas_or_default(
                Component::Redis,
                spec.replicas,
                DEFAULT_REDIS_REPLICAS,
            )),
            features: common_features(Component::Redis, config, &spec.resources)?,
        })
    }

    fn database(identity: &ComponentIdentity, config: &QuayConfiguration) -> Result<Self> {
        let spec = &config.spec().quay.database;

        let mut container = ContainerBuilder::new(&identity.name);
        container
            .image(&config.database_image)
            .add_container_ports([ContainerPortBuilder::new(POSTGRESQL_PORT.into()).build()])
            .liveness_probe(
                ProbeBuilder::default()
                    .with_tcp_socket_action_helper(POSTGRESQL_PORT)
                    .with_initial_delay(Duration::from_secs(5))
                    .with_timeout(Duration::from_secs(1))
                    .build(),
            )
            .readiness_probe(
                ProbeBuilder::default()
                    .with_exec_action_helper(DATABASE_READINESS_COMMAND)
                    .with_initial_delay(Duration::from_secs(5))
                    .with_timeout(Duration::from_secs(1))
                    .build(),
            );

        let mut features = common_features(Component::Database, config, &spec.resources)?;
        features.push(Feature::SecretEnvVars {
            secret_name: config.database_credentials_secret.clone(),
            variables: [
                (POSTGRESQL_USER_ENV, DATABASE_CREDENTIALS_USERNAME_KEY),
                (POSTGRESQL_PASSWORD_ENV, DATABASE_CREDENTIALS_PASSWORD_KEY),
                (POSTGRESQL_DATABASE_ENV, DATABASE_CREDENTIALS_DATABASE_KEY),
            ]
            .map(|(name, key)| (name.to_owned(), key.to_owned()))
            .to_vec(),
        });

        if present(spec.volume_size.as_deref()).is_some() {
            features.push(Feature::PersistentStorage {
                volume_name: DATABASE_VOLUME_NAME.to_owned(),
                claim_name: naming::database_name(config.name()),
                mount_path: DATABASE_VOLUME_MOUNT_PATH.to_owned(),
            });
        }

        Ok(Self {
            component: Component::Database,
            container,
            service_account_name: None,
            replicas: spec.replicas,
            features,
        })
    }

    fn quay_config(config: &QuayConfiguration) -> Self {
        let mut container = quay_container(QUAY_CONFIG_CONTAINER_NAME, config);
        container
            .add_env_var(QUAY_ENTRY_ENV, QUAY_ENTRY_CONFIG_VALUE)
            .readiness_probe(
                ProbeBuilder::default()
                    .with_tcp_socket_action_helper(QUAY_HTTPS_PORT)
                    .with_failure_threshold(3)
                    .with_initial_delay(Duration::from_secs(10))
                    .build(),
            );

        let mut features = vec![config_bundle(config)];
        features.extend(Feature::image_pull_secret(config));
        features.push(Feature::SecretEnvVars {
            secret_name: config.quay_config_password_secret.clone(),
            variables: vec![(
                QUAY_CONFIG_PASSWORD_ENV.to_owned(),
                QUAY_CONFIG_PASSWORD_KEY.to_owned(),
            )],
        });

        Self {
            component: Component::QuayConfig,
            container,
            service_account_name: Some(QUAY_SERVICE_ACCOUNT),
            replicas: None,
            features,
        }
    }

    fn quay(config: &QuayConfiguration) -> Result<Self> {
        let spec = &config.spec().quay;

        let mut container = quay_container(QUAY_APP_CONTAINER_NAME, config);
        container.readiness_probe(
            ProbeBuilder::default()
                .with_http_get_action_helper(QUAY_HTTP_PORT, QUAY_HEALTH_PATH, Some("HTTP"))
                .with_failure_threshold(3)
                .with_initial_delay(Duration::from_secs(10))
                .build(),
        );

        let mut features = common_features(Component::Quay, config, &spec.resources)?;
        features.push(config_bundle(config));

        let registry_storage = spec.registry_storage.as_ref();
        if present(registry_storage.and_then(|storage| storage.persistent_volume.as_ref())).is_some()
        {
            let storage_directory = registry_storage
                .and_then(|storage| storage.storage_directory.as_deref());

            features.push(Feature::PersistentStorage {
                volume_name: REGISTRY_VOLUME_NAME.to_owned(),
                claim_name: naming::registry_storage_name(config.name()),
                mount_path: resolve(storage_directory, DEFAULT_REGISTRY_STORAGE_DIRECTORY)
                    .to_owned(),
            });
        }

        Ok(Self {
            component: Component::Quay,
            container,
            service_account_name: Some(QUAY_SERVICE_ACCOUNT),
            replicas: Some(replicas_or_default(
                Component::Quay,
                spec.replicas,
                DEFAULT_QUAY_REPLICAS,
            )),
            features,
        })
    }

    /// Applies all features and builds the Pod template labelled with the identity's labels.
    pub fn build_pod_template(&self, identity: &ComponentIdentity) -> Result<PodTemplateSpec> {
        let mut draft = PodTemplateDraft::new(self.component, self.container.clone());
        if let Some(service_account_name) = self.service_account_name {
            draft.service_account_name(service_account_name);
        }

        for feature in &self.features {
            feature.apply(&mut draft)?;
        }

        draft.finish(&identity.labels)
    }
}

/// The Quay image with the HTTP and HTTPS ports, shared by Quay and its config app.
fn quay_container(name: &str, config: &QuayConfiguration) -> ContainerBuilder {
    let mut container = ContainerBuilder::new(name);
    container
        .image(&config.quay_image)
        .add_container_port(QUAY_HTTP_PORT_NAME, QUAY_HTTP_PORT.into())
        .add_container_port(QUAY_HTTPS_PORT_NAME, QUAY_HTTPS_PORT.into());
    container
}

fn config_bundle(config: &QuayConfiguration) -> Feature {
    Feature::ProjectedSecret {
        volume_name: CONFIG_VOLUME_NAME.to_owned(),
        secret_name: config.config_secret_name.clone(),
        mount_path: CONFIG_VOLUME_MOUNT_PATH.to_owned(),
    }
}

/// Pull secret and resource limits, which every component with resource overrides shares.
fn common_features(
    component: Component,
    config: &QuayConfiguration,
    resources: &ComputeResources,
) -> Result<Vec<Feature>> {
    let mut features = Vec::new();
    features.extend(Feature::image_pull_secret(config));
    features.extend(Feature::resource_limits(component, resources)?);
    Ok(features)
}

fn replicas_or_default(component: Component, replicas: Option<i32>, default: i32) -> i32 {
    if replicas == Some(0) {
        warn!(
            %component,
            default,
            "A replica count of 0 can not be distinguished from an unset one, using the default"
        );
    }

    resolve(replicas, default)
}
