use k8s_openapi::{
    api::{
        apps::v1::{Deployment, DeploymentSpec},
        core::v1::PodTemplateSpec,
    },
    apimachinery::pkg::apis::meta::v1::LabelSelector,
};

use crate::{builder::meta::ObjectMetaBuilder, workload::ComponentIdentity};

/// Wraps a finished Pod template into a [`Deployment`] described by `identity`.
///
/// The selector matches exactly the labels of `identity`, which are also the labels of the Pod
/// template. Any labels the template carried before are replaced.
pub fn assemble(
    identity: &ComponentIdentity,
    mut pod_template: PodTemplateSpec,
    replicas: Option<i32>,
) -> Deployment {
    pod_template
        .metadata
        .get_or_insert_with(Default::default)
        .labels = Some(identity.labels.clone());

    Deployment {
        metadata: ObjectMetaBuilder::new()
            .name(&identity.name)
            .namespace_opt(identity.namespace.clone())
            .labels(identity.labels.clone())
            .build(),
        spec: Some(DeploymentSpec {
            replicas,
            selector: LabelSelector {
                match_labels: Some(identity.labels.clone()),
                ..LabelSelector::default()
            },
            template: pod_template,
            ..DeploymentSpec::default()
        }),
        ..Deployment::default()
    }
}
