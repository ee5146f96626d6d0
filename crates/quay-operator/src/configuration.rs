use snafu::{OptionExt, Snafu};

use crate::{
    constants::{DEFAULT_DATABASE_IMAGE, DEFAULT_QUAY_IMAGE, DEFAULT_REDIS_IMAGE},
    crd::{QuayEcosystem, QuayEcosystemSpec},
    defaults::{present, resolve},
    naming,
};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum Error {
    #[snafu(display("QuayEcosystem has no name"))]
    MissingName,
}

/// A `QuayEcosystem` together with the values derived from it that several components share.
///
/// Built once per synthesis run and only read afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct QuayConfiguration {
    ecosystem: QuayEcosystem,
    name: String,

    pub quay_image: String,
    pub redis_image: String,
    pub database_image: String,

    /// Secret holding the password of the config app.
    pub quay_config_password_secret: String,

    /// Secret holding the Quay configuration bundle, mounted into both Quay Deployments.
    pub config_secret_name: String,

    /// Secret the database credentials are read from.
    pub database_credentials_secret: String,
}

impl QuayConfiguration {
    pub fn new(ecosystem: QuayEcosystem) -> Result<Self> {
        let name = present(ecosystem.metadata.name.clone()).context(MissingNameSnafu)?;
        let spec = &ecosystem.spec;

        let quay_image = resolve(spec.quay.image.as_deref(), DEFAULT_QUAY_IMAGE).to_owned();
        let redis_image = resolve(spec.redis.image.as_deref(), DEFAULT_REDIS_IMAGE).to_owned();
        let database_image =
            resolve(spec.quay.database.image.as_deref(), DEFAULT_DATABASE_IMAGE).to_owned();

        let quay_config_password_secret = resolve(
            spec.quay.config_secret_name.clone(),
            naming::config_password_secret_name(&name),
        );
        let config_secret_name = naming::config_secret_name(&name);
        let database_credentials_secret = resolve(
            spec.quay.database.credentials_secret_name.clone(),
            naming::database_name(&name),
        );

        Ok(Self {
            quay_image,
            redis_image,
            database_image,
            quay_config_password_secret,
            config_secret_name,
            database_credentials_secret,
            name,
            ecosystem,
        })
    }

    /// The name of the `QuayEcosystem`, which prefixes all derived object names.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.ecosystem.metadata.namespace.as_deref()
    }

    pub fn spec(&self) -> &QuayEcosystemSpec {
        &self.ecosystem.spec
    }

    /// The pull secret shared by all components, if one is configured.
    pub fn image_pull_secret_name(&self) -> Option<&str> {
        present(self.spec().image_pull_secret_name.as_deref())
    }

    /// An external database replaces the database Deployment.
    pub fn has_external_database(&self) -> bool {
        present(self.spec().quay.database.server.as_deref()).is_some()
    }

    pub fn skip_setup(&self) -> bool {
        present(self.spec().quay.skip_setup).is_some()
    }
}
