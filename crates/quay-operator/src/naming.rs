//! Names and labels of the objects derived from a `QuayEcosystem`.
//!
//! All helpers are pure. Other resources reference each other only by these names, so they have to
//! stay stable.
use std::collections::BTreeMap;

use crate::constants::{APP_LABEL, APP_LABEL_VALUE, COMPONENT_LABEL, ECOSYSTEM_LABEL};

pub fn redis_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-redis")
}

pub fn quay_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay")
}

pub fn quay_config_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay-config")
}

/// Name of the database Deployment, its PersistentVolumeClaim and its default credentials Secret.
pub fn database_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay-postgresql")
}

pub fn registry_storage_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay-registry")
}

/// The Secret holding the generated Quay `config.yaml` bundle.
pub fn config_secret_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay-config-secret")
}

pub fn config_password_secret_name(ecosystem_name: &str) -> String {
    format!("{ecosystem_name}-quay-config-password")
}

/// Labels shared by every object belonging to one `QuayEcosystem`.
pub fn ecosystem_labels(ecosystem_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (APP_LABEL.to_owned(), APP_LABEL_VALUE.to_owned()),
        (ECOSYSTEM_LABEL.to_owned(), ecosystem_name.to_owned()),
    ])
}

/// Returns a copy of `labels` extended by the component role label.
pub fn component_labels(
    labels: &BTreeMap<String, String>,
    component: impl Into<String>,
) -> BTreeMap<String, String> {
    let mut labels = labels.clone();
    labels.insert(COMPONENT_LABEL.to_owned(), component.into());
    labels
}
