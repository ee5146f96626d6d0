use std::collections::BTreeMap;

use indoc::indoc;
use k8s_openapi::{
    api::{apps::v1::Deployment, core::v1::Container},
    apimachinery::pkg::{api::resource::Quantity, util::intstr::IntOrString},
};
use quay_operator::{
    configuration::QuayConfiguration,
    crd::QuayEcosystem,
    naming,
    workload::{
        self, Component, ComponentIdentity, Error, Feature, PodTemplateDraft, ResourceField,
        WorkloadTemplate,
    },
};
use rstest::{fixture, rstest};

const MINIMAL: &str = indoc! {"
    apiVersion: redhatcop.redhat.io/v1alpha1
    kind: QuayEcosystem
    metadata:
      name: example
      namespace: quay-enterprise
    spec: {}
"};

const FULL: &str = indoc! {"
    apiVersion: redhatcop.redhat.io/v1alpha1
    kind: QuayEcosystem
    metadata:
      name: example
      namespace: quay-enterprise
    spec:
      imagePullSecretName: redhat-pull-secret
      quay:
        replicas: 2
        cpu: '2'
        memory: 4Gi
        configSecretName: my-config-password
        registryStorage:
          persistentVolume:
            accessModes:
              - ReadWriteOnce
            capacity: 50Gi
          storageDirectory: /datastorage/registry
        database:
          replicas: 1
          volumeSize: 10Gi
          credentialsSecretName: my-db-credentials
          cpu: 500m
          memory: 256Mi
      redis:
        replicas: 3
        memory: 512Mi
"};

fn config(yaml: &str) -> QuayConfiguration {
    let ecosystem: QuayEcosystem = serde_yaml::from_str(yaml).unwrap();
    QuayConfiguration::new(ecosystem).unwrap()
}

#[fixture]
fn full() -> QuayConfiguration {
    config(FULL)
}

#[fixture]
fn minimal() -> QuayConfiguration {
    config(MINIMAL)
}

fn identity(config: &QuayConfiguration) -> ComponentIdentity {
    ComponentIdentity::for_ecosystem(config)
}

fn database_identity(config: &QuayConfiguration) -> ComponentIdentity {
    ComponentIdentity {
        name: naming::database_name(config.name()),
        ..identity(config)
    }
}

fn container(deployment: &Deployment) -> &Container {
    &deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap().containers[0]
}

fn volume_names(deployment: &Deployment) -> Vec<String> {
    deployment
        .spec
        .as_ref()
        .unwrap()
        .template
        .spec
        .as_ref()
        .unwrap()
        .volumes
        .iter()
        .flatten()
        .map(|volume| volume.name.clone())
        .collect()
}

fn mount_names(deployment: &Deployment) -> Vec<String> {
    container(deployment)
        .volume_mounts
        .iter()
        .flatten()
        .map(|mount| mount.name.clone())
        .collect()
}

#[rstest]
#[case::minimal(MINIMAL)]
#[case::full(FULL)]
fn synthesis_is_idempotent(#[case] yaml: &str) {
    let config = config(yaml);
    let identity = identity(&config);

    let first = workload::synthesize_all(&identity, &config).unwrap();
    let second = workload::synthesize_all(&identity, &config).unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case::minimal(MINIMAL)]
#[case::full(FULL)]
fn selector_equals_template_labels(#[case] yaml: &str) {
    let config = config(yaml);

    for deployment in workload::synthesize_all(&identity(&config), &config).unwrap() {
        let spec = deployment.spec.as_ref().unwrap();
        let template_labels = spec.template.metadata.as_ref().unwrap().labels.clone();

        assert_eq!(spec.selector.match_labels, template_labels);
        assert_eq!(deployment.metadata.labels, template_labels);
    }
}

#[rstest]
#[case::minimal(MINIMAL)]
#[case::full(FULL)]
fn volumes_and_mounts_are_paired(#[case] yaml: &str) {
    let config = config(yaml);

    for deployment in workload::synthesize_all(&identity(&config), &config).unwrap() {
        assert_eq!(volume_names(&deployment), mount_names(&deployment));
    }
}

#[rstest]
fn synthesize_all_order(minimal: QuayConfiguration) {
    let names = workload::synthesize_all(&identity(&minimal), &minimal)
        .unwrap()
        .into_iter()
        .map(|deployment| deployment.metadata.name.unwrap())
        .collect::<Vec<_>>();

    assert_eq!(
        names,
        vec![
            "example-redis",
            "example-quay-postgresql",
            "example-quay-config",
            "example-quay"
        ]
    );
}

#[test]
fn synthesize_all_skips_external_database_and_setup() {
    let config = config(indoc! {"
        apiVersion: redhatcop.redhat.io/v1alpha1
        kind: QuayEcosystem
        metadata:
          name: example
        spec:
          quay:
            skipSetup: true
            database:
              server: postgres.example.com
    "});

    let names = workload::synthesize_all(&identity(&config), &config)
        .unwrap()
        .into_iter()
        .map(|deployment| deployment.metadata.name.unwrap())
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["example-redis", "example-quay"]);
}

#[test]
fn zero_replicas_resolve_to_default() {
    let config = config(indoc! {"
        apiVersion: redhatcop.redhat.io/v1alpha1
        kind: QuayEcosystem
        metadata:
          name: example
        spec:
          quay:
            replicas: 0
          redis:
            replicas: 0
    "});
    let identity = identity(&config);

    let quay = workload::quay_deployment(&identity, &config).unwrap();
    let redis = workload::redis_deployment(&identity, &config).unwrap();

    assert_eq!(quay.spec.unwrap().replicas, Some(1));
    assert_eq!(redis.spec.unwrap().replicas, Some(1));
}

#[test]
fn database_scenario_resources_without_storage() {
    let config = config(indoc! {"
        apiVersion: redhatcop.redhat.io/v1alpha1
        kind: QuayEcosystem
        metadata:
          name: example
        spec:
          quay:
            database:
              cpu: 500m
              memory: 256Mi
    "});

    let deployment = workload::database_deployment(&database_identity(&config), &config).unwrap();

    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    assert_eq!(pod_spec.image_pull_secrets, None);
    assert_eq!(pod_spec.volumes, None);
    assert_eq!(pod_spec.service_account_name, None);

    let expected = BTreeMap::from([
        ("cpu".to_owned(), Quantity("500m".to_owned())),
        ("memory".to_owned(), Quantity("256Mi".to_owned())),
    ]);
    let resources = container(&deployment).resources.clone().unwrap();
    assert_eq!(resources.requests, Some(expected.clone()));
    assert_eq!(resources.limits, Some(expected));
}

#[rstest]
fn database_wire_contract(full: QuayConfiguration) {
    let deployment = workload::database_deployment(&database_identity(&full), &full).unwrap();
    let container = container(&deployment);

    assert_eq!(container.name, "example-quay-postgresql");
    assert_eq!(
        container.image.as_deref(),
        Some("registry.access.redhat.com/rhscl/postgresql-96-rhel7:1")
    );
    assert_eq!(container.ports.as_ref().unwrap()[0].container_port, 5432);

    let env = container
        .env
        .iter()
        .flatten()
        .map(|env_var| {
            let selector = env_var
                .value_from
                .as_ref()
                .and_then(|source| source.secret_key_ref.as_ref())
                .unwrap();
            (
                env_var.name.as_str(),
                selector.name.as_str(),
                selector.key.as_str(),
            )
        })
        .collect::<Vec<_>>();
    assert_eq!(
        env,
        vec![
            ("POSTGRESQL_USER", "my-db-credentials", "database-username"),
            ("POSTGRESQL_PASSWORD", "my-db-credentials", "database-password"),
            ("POSTGRESQL_DATABASE", "my-db-credentials", "database-name"),
        ]
    );

    let liveness = container.liveness_probe.as_ref().unwrap();
    assert_eq!(
        liveness.tcp_socket.as_ref().map(|tcp| &tcp.port),
        Some(&IntOrString::Int(5432))
    );
    assert_eq!(liveness.initial_delay_seconds, Some(5));
    assert_eq!(liveness.timeout_seconds, Some(1));

    let readiness = container.readiness_probe.as_ref().unwrap();
    assert_eq!(
        readiness.exec.as_ref().and_then(|exec| exec.command.clone()),
        Some(vec![
            "/usr/libexec/check-container".to_owned(),
            "--live".to_owned()
        ])
    );

    let volume = &deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap().volumes
        .as_ref()
        .unwrap()[0];
    assert_eq!(volume.name, "data");
    assert_eq!(
        volume
            .persistent_volume_claim
            .as_ref()
            .map(|pvc| pvc.claim_name.as_str()),
        Some("example-quay-postgresql")
    );
    assert_eq!(
        container.volume_mounts.as_ref().unwrap()[0].mount_path,
        "/var/lib/pgsql/data"
    );
    assert_eq!(deployment.spec.unwrap().replicas, Some(1));
}

#[test]
fn database_default_credentials_secret() {
    let config = config(MINIMAL);
    let deployment = workload::database_deployment(&database_identity(&config), &config).unwrap();

    for env_var in container(&deployment).env.iter().flatten() {
        let selector = env_var
            .value_from
            .as_ref()
            .and_then(|source| source.secret_key_ref.as_ref())
            .unwrap();
        assert_eq!(selector.name, "example-quay-postgresql");
    }
    assert_eq!(deployment.spec.unwrap().replicas, None);
}

#[test]
fn quay_scenario_registry_storage() {
    let config = config(indoc! {"
        apiVersion: redhatcop.redhat.io/v1alpha1
        kind: QuayEcosystem
        metadata:
          name: example
        spec:
          quay:
            registryStorage:
              persistentVolume:
                accessModes:
                  - ReadWriteOnce
                capacity: 10Gi
              storageDirectory: /datastorage/registry
    "});

    let deployment = workload::quay_deployment(&identity(&config), &config).unwrap();
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();

    let registry_volume = pod_spec
        .volumes
        .iter()
        .flatten()
        .find(|volume| volume.name == "registryvolume")
        .unwrap();
    assert_eq!(
        registry_volume
            .persistent_volume_claim
            .as_ref()
            .map(|pvc| pvc.claim_name.as_str()),
        Some("example-quay-registry")
    );

    let registry_mount = container(&deployment)
        .volume_mounts
        .iter()
        .flatten()
        .find(|mount| mount.name == "registryvolume")
        .unwrap();
    assert_eq!(registry_mount.mount_path, "/datastorage/registry");
    assert_eq!(container(&deployment).resources, None);
}

#[rstest]
fn quay_wire_contract(full: QuayConfiguration) {
    let deployment = workload::quay_deployment(&identity(&full), &full).unwrap();
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    let container = container(&deployment);

    assert_eq!(deployment.metadata.name.as_deref(), Some("example-quay"));
    assert_eq!(
        deployment.metadata.namespace.as_deref(),
        Some("quay-enterprise")
    );
    assert_eq!(
        deployment
            .metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get("quay-enterprise-component"))
            .map(String::as_str),
        Some("app")
    );
    assert_eq!(container.name, "quay-app");
    assert_eq!(container.image.as_deref(), Some("quay.io/redhat/quay:v3.0.4"));
    assert_eq!(pod_spec.service_account_name.as_deref(), Some("quay"));
    assert_eq!(
        pod_spec
            .image_pull_secrets
            .iter()
            .flatten()
            .map(|secret| secret.name.as_str())
            .collect::<Vec<_>>(),
        vec!["redhat-pull-secret"]
    );

    let ports = container
        .ports
        .iter()
        .flatten()
        .map(|port| (port.name.as_deref(), port.container_port))
        .collect::<Vec<_>>();
    assert_eq!(ports, vec![(Some("http"), 8080), (Some("https"), 8443)]);

    let readiness = container.readiness_probe.as_ref().unwrap();
    let http_get = readiness.http_get.as_ref().unwrap();
    assert_eq!(http_get.path.as_deref(), Some("/health/instance"));
    assert_eq!(http_get.port, IntOrString::Int(8080));
    assert_eq!(http_get.scheme.as_deref(), Some("HTTP"));
    assert_eq!(readiness.failure_threshold, Some(3));
    assert_eq!(readiness.initial_delay_seconds, Some(10));

    assert_eq!(
        volume_names(&deployment),
        vec!["configvolume", "registryvolume"]
    );
    let config_volume = &pod_spec.volumes.as_ref().unwrap()[0];
    assert_eq!(
        config_volume
            .projected
            .as_ref()
            .and_then(|projected| projected.sources.as_ref())
            .and_then(|sources| sources[0].secret.as_ref())
            .map(|secret| secret.name.as_str()),
        Some("example-quay-config-secret")
    );

    let resources = container.resources.as_ref().unwrap();
    assert_eq!(resources.limits, resources.requests);
    assert_eq!(
        resources.limits.as_ref().and_then(|limits| limits.get("memory")),
        Some(&Quantity("4Gi".to_owned()))
    );
    assert_eq!(deployment.spec.as_ref().unwrap().replicas, Some(2));
}

#[rstest]
fn quay_config_wire_contract(full: QuayConfiguration) {
    let deployment = workload::quay_config_deployment(&identity(&full), &full).unwrap();
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    let container = container(&deployment);

    assert_eq!(
        deployment.metadata.name.as_deref(),
        Some("example-quay-config")
    );
    assert_eq!(container.name, "quay-config");
    assert_eq!(pod_spec.service_account_name.as_deref(), Some("quay"));
    assert_eq!(deployment.spec.as_ref().unwrap().replicas, None);
    assert_eq!(container.resources, None);

    let env = container.env.as_ref().unwrap();
    assert_eq!(env[0].name, "QUAYENTRY");
    assert_eq!(env[0].value.as_deref(), Some("config"));
    assert_eq!(env[1].name, "CONFIG_APP_PASSWORD");
    let selector = env[1]
        .value_from
        .as_ref()
        .and_then(|source| source.secret_key_ref.as_ref())
        .unwrap();
    assert_eq!(selector.name, "my-config-password");
    assert_eq!(selector.key, "password");

    let readiness = container.readiness_probe.as_ref().unwrap();
    assert_eq!(
        readiness.tcp_socket.as_ref().map(|tcp| &tcp.port),
        Some(&IntOrString::Int(8443))
    );
    assert_eq!(readiness.failure_threshold, Some(3));
    assert_eq!(readiness.initial_delay_seconds, Some(10));

    assert_eq!(volume_names(&deployment), vec!["configvolume"]);
    assert_eq!(
        container.volume_mounts.as_ref().unwrap()[0].mount_path,
        "/conf/stack"
    );
}

#[rstest]
fn redis_wire_contract(full: QuayConfiguration) {
    let deployment = workload::redis_deployment(&identity(&full), &full).unwrap();
    let pod_spec = deployment.spec.as_ref().unwrap().template.spec.as_ref().unwrap();
    let container = container(&deployment);

    assert_eq!(container.name, "example-redis");
    assert_eq!(
        container.image.as_deref(),
        Some("registry.access.redhat.com/rhscl/redis-32-rhel7:latest")
    );
    assert_eq!(container.readiness_probe, None);
    assert_eq!(container.liveness_probe, None);
    let port = &container.ports.as_ref().unwrap()[0];
    assert_eq!(port.container_port, 6379);
    assert_eq!(port.name, None);
    assert_eq!(pod_spec.service_account_name.as_deref(), Some("redis"));
    assert_eq!(pod_spec.volumes, None);
    assert_eq!(
        container
            .resources
            .as_ref()
            .and_then(|resources| resources.requests.clone()),
        Some(BTreeMap::from([(
            "memory".to_owned(),
            Quantity("512Mi".to_owned())
        )]))
    );
    assert_eq!(deployment.spec.as_ref().unwrap().replicas, Some(3));
}

#[rstest]
#[case::database_cpu(Component::Database, "quay:\n  database:\n    cpu: fast\n", ResourceField::Cpu)]
#[case::quay_memory(Component::Quay, "quay:\n  memory: 4Gx\n", ResourceField::Memory)]
#[case::redis_cpu(Component::Redis, "redis:\n  cpu: 1.2.3\n", ResourceField::Cpu)]
#[case::quay_cpu_fractional_exponent(Component::Quay, "quay:\n  cpu: \"1e1.5\"\n", ResourceField::Cpu)]
#[case::redis_memory_infinite_exponent(Component::Redis, "redis:\n  memory: \"1einf\"\n", ResourceField::Memory)]
fn malformed_quantities_abort_synthesis(
    #[case] component: Component,
    #[case] spec: &str,
    #[case] field: ResourceField,
) {
    let mut yaml = String::from(indoc! {"
        apiVersion: redhatcop.redhat.io/v1alpha1
        kind: QuayEcosystem
        metadata:
          name: example
        spec:
    "});
    for line in spec.lines() {
        yaml.push_str("  ");
        yaml.push_str(line);
        yaml.push('\n');
    }
    let config = config(&yaml);

    let error = workload::synthesize_all(&identity(&config), &config).unwrap_err();

    match error {
        Error::InvalidResourceQuantity {
            component: actual_component,
            field: actual_field,
            ..
        } => {
            assert_eq!(actual_component, component);
            assert_eq!(actual_field, field);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[rstest]
fn feature_order_does_not_matter(full: QuayConfiguration) {
    let identity = identity(&full).for_component(Component::Quay, &full);
    let template = WorkloadTemplate::new(Component::Quay, &identity, &full).unwrap();
    assert!(template.features.len() >= 3);

    let build = |features: &[Feature]| {
        let mut draft = PodTemplateDraft::new(template.component, template.container.clone());
        for feature in features {
            feature.apply(&mut draft).unwrap();
        }
        draft.finish(&identity.labels).unwrap()
    };

    let mut reversed = template.features.clone();
    reversed.reverse();

    assert_eq!(build(&template.features), build(&reversed));
}
