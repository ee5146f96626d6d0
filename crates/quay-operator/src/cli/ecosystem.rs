use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use snafu::{ResultExt, Snafu};

use crate::crd::QuayEcosystem;

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("failed to read QuayEcosystem file {path:?}"))]
    ReadEcosystem {
        source: std::io::Error,
        path: PathBuf,
    },

    #[snafu(display("failed to parse QuayEcosystem file {path:?}"))]
    ParseEcosystem {
        source: serde_yaml::Error,
        path: PathBuf,
    },

    #[snafu(display(
        "failed to locate a required file in any of the following locations: {search_path:?}"
    ))]
    RequiredFileMissing { search_path: Vec<PathBuf> },
}

/// A path to a file containing one `QuayEcosystem`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EcosystemPath {
    path: Option<PathBuf>,
}

impl From<&OsStr> for EcosystemPath {
    fn from(s: &OsStr) -> Self {
        Self {
            // clap doesn't let us hook in to see the underlying `Option<&str>`, so we treat the
            // otherwise-invalid `""` as a sentinel for using the default instead.
            path: if s.is_empty() { None } else { Some(s.into()) },
        }
    }
}

impl EcosystemPath {
    /// The path given by the user, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Load the [`QuayEcosystem`] from the given path, falling back to the first
    /// path that exists from `default_search_paths` if none is given by the user.
    pub fn load(&self, default_search_paths: &[impl AsRef<Path>]) -> Result<QuayEcosystem> {
        let resolved_path = Self::resolve_path(self.path.as_deref(), default_search_paths)?;
        tracing::debug!(path = %resolved_path.display(), "loading QuayEcosystem");

        let contents =
            std::fs::read_to_string(resolved_path).context(ReadEcosystemSnafu {
                path: resolved_path,
            })?;
        serde_yaml::from_str(&contents).context(ParseEcosystemSnafu {
            path: resolved_path,
        })
    }

    /// Check if the path can be found anywhere
    ///
    /// 1. User provides path `user_provided_path` to file. Return [`Error`] if not existing.
    /// 2. User does not provide path to file -> search in `default_paths` and
    ///    take the first existing file.
    /// 3. Return [`Error`] if nothing was found.
    fn resolve_path<'a>(
        user_provided_path: Option<&'a Path>,
        default_paths: &'a [impl AsRef<Path> + 'a],
    ) -> Result<&'a Path> {
        // Use override if specified by the user, otherwise search through defaults given
        let search_paths = if let Some(path) = user_provided_path {
            vec![path]
        } else {
            default_paths.iter().map(AsRef::as_ref).collect()
        };
        for path in &search_paths {
            if path.exists() {
                return Ok(path);
            }
        }
        RequiredFileMissingSnafu {
            search_path: search_paths
                .into_iter()
                .map(PathBuf::from)
                .collect::<Vec<_>>(),
        }
        .fail()
    }
}
