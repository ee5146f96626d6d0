//! Fixed values shared by the synthesized workloads.

pub const DEFAULT_QUAY_IMAGE: &str = "quay.io/redhat/quay:v3.0.4";
pub const DEFAULT_REDIS_IMAGE: &str = "registry.access.redhat.com/rhscl/redis-32-rhel7:latest";
pub const DEFAULT_DATABASE_IMAGE: &str =
    "registry.access.redhat.com/rhscl/postgresql-96-rhel7:1";

pub const DEFAULT_QUAY_REPLICAS: i32 = 1;
pub const DEFAULT_REDIS_REPLICAS: i32 = 1;

pub const DEFAULT_REGISTRY_STORAGE_DIRECTORY: &str = "/datastorage/registry";

pub const REDIS_SERVICE_ACCOUNT: &str = "redis";
pub const QUAY_SERVICE_ACCOUNT: &str = "quay";

pub const QUAY_APP_CONTAINER_NAME: &str = "quay-app";
pub const QUAY_CONFIG_CONTAINER_NAME: &str = "quay-config";

pub const QUAY_ENTRY_ENV: &str = "QUAYENTRY";
pub const QUAY_ENTRY_CONFIG_VALUE: &str = "config";
pub const QUAY_CONFIG_PASSWORD_ENV: &str = "CONFIG_APP_PASSWORD";
pub const QUAY_CONFIG_PASSWORD_KEY: &str = "password";

pub const REDIS_PORT: i32 = 6379;
pub const POSTGRESQL_PORT: u16 = 5432;
pub const QUAY_HTTP_PORT: u16 = 8080;
pub const QUAY_HTTPS_PORT: u16 = 8443;
pub const QUAY_HTTP_PORT_NAME: &str = "http";
pub const QUAY_HTTPS_PORT_NAME: &str = "https";
pub const QUAY_HEALTH_PATH: &str = "/health/instance";

pub const CONFIG_VOLUME_NAME: &str = "configvolume";
pub const CONFIG_VOLUME_MOUNT_PATH: &str = "/conf/stack";
pub const REGISTRY_VOLUME_NAME: &str = "registryvolume";
pub const DATABASE_VOLUME_NAME: &str = "data";
pub const DATABASE_VOLUME_MOUNT_PATH: &str = "/var/lib/pgsql/data";

pub const POSTGRESQL_USER_ENV: &str = "POSTGRESQL_USER";
pub const POSTGRESQL_PASSWORD_ENV: &str = "POSTGRESQL_PASSWORD";
pub const POSTGRESQL_DATABASE_ENV: &str = "POSTGRESQL_DATABASE";
pub const DATABASE_CREDENTIALS_USERNAME_KEY: &str = "database-username";
pub const DATABASE_CREDENTIALS_PASSWORD_KEY: &str = "database-password";
pub const DATABASE_CREDENTIALS_DATABASE_KEY: &str = "database-name";
pub const DATABASE_READINESS_COMMAND: [&str; 2] = ["/usr/libexec/check-container", "--live"];

pub const COMPONENT_LABEL: &str = "quay-enterprise-component";
pub const APP_LABEL: &str = "app";
pub const APP_LABEL_VALUE: &str = "quay-operator";
pub const ECOSYSTEM_LABEL: &str = "quay-enterprise-cr";
