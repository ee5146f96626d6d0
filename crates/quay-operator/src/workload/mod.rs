//! Synthesis of the Deployments that make up a Quay ecosystem.
//!
//! Every component goes through the same pipeline:
//!
//! 1. [`ComponentIdentity::for_component`] derives the name and labels of the Deployment from the
//!    identity supplied by the caller.
//! 2. A [`WorkloadTemplate`] describes the component: its container, service account, replica
//!    count and the list of optional [`Feature`]s the configuration enables.
//! 3. The features are applied to a [`PodTemplateDraft`], which guarantees that every volume is
//!    mounted by the container and every mount is backed by a volume.
//! 4. [`assemble`] wraps the finished Pod template into a [`Deployment`].
//!
//! All functions are pure. The same configuration always produces the same Deployments.
use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::Deployment;
use snafu::Snafu;
use strum::{Display, EnumIter};
use tracing::{debug, instrument};

use crate::{builder, configuration::QuayConfiguration, naming, quantity::ParseQuantityError};

mod assembler;
mod components;
mod features;

pub use assembler::assemble;
pub use components::WorkloadTemplate;
pub use features::{Feature, PodTemplateDraft};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("invalid {field} quantity {value:?} configured for the {component} component"))]
    InvalidResourceQuantity {
        source: ParseQuantityError,
        component: Component,
        field: ResourceField,
        value: String,
    },

    #[snafu(display("failed to add volume {volume:?} to the {component} pod"))]
    AddVolume {
        source: builder::pod::Error,
        component: Component,
        volume: String,
    },

    #[snafu(display(
        "volume {volume:?} of the {component} pod is mounted at {existing_mount_path:?} and {mount_path:?}"
    ))]
    MountPathCollision {
        component: Component,
        volume: String,
        existing_mount_path: String,
        mount_path: String,
    },

    #[snafu(display("the {component} container mounts {volume:?}, but the pod has no such volume"))]
    MissingVolume { component: Component, volume: String },

    #[snafu(display("volume {volume:?} of the {component} pod is not mounted by its container"))]
    DanglingVolume { component: Component, volume: String },
}

/// The components of a Quay ecosystem. The string form is the value of the
/// `quay-enterprise-component` label.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq)]
#[strum(serialize_all = "kebab-case")]
pub enum Component {
    Redis,
    Database,
    QuayConfig,
    #[strum(serialize = "app")]
    Quay,
}

/// The resource dimensions that can be overridden per component.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum ResourceField {
    Cpu,
    Memory,
}

/// Name, namespace and labels of a Deployment.
///
/// The caller supplies the identity of the ecosystem. The identity of a single component is derived
/// from it with [`Self::for_component`], which never modifies the original.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ComponentIdentity {
    pub name: String,
    pub namespace: Option<String>,
    pub labels: BTreeMap<String, String>,
}

impl ComponentIdentity {
    pub fn new(
        name: impl Into<String>,
        namespace: Option<String>,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace,
            labels,
        }
    }

    /// The identity of the ecosystem itself: its name and namespace with the shared ecosystem
    /// labels.
    pub fn for_ecosystem(config: &QuayConfiguration) -> Self {
        Self::new(
            config.name(),
            config.namespace().map(ToOwned::to_owned),
            naming::ecosystem_labels(config.name()),
        )
    }

    /// Derives the identity of `component`.
    ///
    /// Redis and both Quay Deployments get a canonical name derived from the ecosystem name. The
    /// database keeps the name supplied by the caller and only falls back to the canonical
    /// database name if that is empty. All components get the component label added.
    pub fn for_component(&self, component: Component, config: &QuayConfiguration) -> Self {
        let name = match component {
            Component::Redis => naming::redis_name(config.name()),
            Component::QuayConfig => naming::quay_config_name(config.name()),
            Component::Quay => naming::quay_name(config.name()),
            Component::Database if self.name.is_empty() => naming::database_name(config.name()),
            Component::Database => self.name.clone(),
        };

        Self {
            name,
            namespace: self.namespace.clone(),
            labels: naming::component_labels(&self.labels, component.to_string()),
        }
    }
}

/// Synthesizes the Redis Deployment.
#[instrument(skip_all, fields(ecosystem = config.name()))]
pub fn redis_deployment(
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Deployment> {
    synthesize(Component::Redis, identity, config)
}

/// Synthesizes the PostgreSQL Deployment.
///
/// Unlike the other components the database Deployment is named after `identity`.
#[instrument(skip_all, fields(ecosystem = config.name()))]
pub fn database_deployment(
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Deployment> {
    synthesize(Component::Database, identity, config)
}

/// Synthesizes the Deployment of the Quay config app.
#[instrument(skip_all, fields(ecosystem = config.name()))]
pub fn quay_config_deployment(
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Deployment> {
    synthesize(Component::QuayConfig, identity, config)
}

/// Synthesizes the Quay Deployment.
#[instrument(skip_all, fields(ecosystem = config.name()))]
pub fn quay_deployment(
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Deployment> {
    synthesize(Component::Quay, identity, config)
}

/// Synthesizes all Deployments the configuration asks for, in the order Redis, database, config
/// app and Quay.
///
/// The database is skipped if an external database server is configured, the config app if
/// `skipSetup` is set. The database Deployment gets its canonical name.
#[instrument(skip_all, fields(ecosystem = config.name()))]
pub fn synthesize_all(
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Vec<Deployment>> {
    let mut deployments = vec![redis_deployment(identity, config)?];

    if config.has_external_database() {
        debug!("external database configured, skipping database deployment");
    } else {
        let database_identity = ComponentIdentity {
            name: naming::database_name(config.name()),
            ..identity.clone()
        };
        deployments.push(database_deployment(&database_identity, config)?);
    }

    if config.skip_setup() {
        debug!("setup is skipped, skipping config app deployment");
    } else {
        deployments.push(quay_config_deployment(identity, config)?);
    }

    deployments.push(quay_deployment(identity, config)?);

    Ok(deployments)
}

fn synthesize(
    component: Component,
    identity: &ComponentIdentity,
    config: &QuayConfiguration,
) -> Result<Deployment> {
    let identity = identity.for_component(component, config);
    let template = WorkloadTemplate::new(component, &identity, config)?;
    let pod_template = template.build_pod_template(&identity)?;

    debug!(%component, deployment = %identity.name, "synthesized deployment");
    Ok(assemble(&identity, pod_template, template.replicas))
}
