//! Command line interface of the `quay-operator` binary.
//!
//! ```rust
//! use clap::Parser;
//! use quay_operator::cli::Command;
//!
//! let command = Command::parse_from(["quay-operator", "render", "--ecosystem", "quay.yaml"]);
//! assert!(matches!(command, Command::Render(_)));
//! ```
use clap::{Args, Parser, ValueEnum};

mod ecosystem;

pub use ecosystem::*;

/// Locations searched for the `QuayEcosystem` if no file is given explicitly.
pub const DEFAULT_ECOSYSTEM_SEARCH_PATHS: &[&str] = &[
    "quayecosystem.yaml",
    "deploy/quayecosystem.yaml",
    "/etc/quay-operator/quayecosystem.yaml",
];

#[derive(Debug, PartialEq, Eq, Parser)]
#[command(author, version, about)]
pub enum Command {
    /// Print the QuayEcosystem CRD.
    Crd,

    /// Print the Deployments synthesized for a QuayEcosystem.
    Render(RenderArguments),
}

#[derive(Debug, PartialEq, Eq, Args)]
pub struct RenderArguments {
    /// Provides the path to a QuayEcosystem file
    #[arg(
        long,
        short = 'e',
        value_name = "FILE",
        default_value = "",
        env = "QUAY_ECOSYSTEM_FILE"
    )]
    pub ecosystem: EcosystemPath,

    /// Renders into this namespace instead of the one of the QuayEcosystem
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    #[arg(long, short = 'o', value_enum, default_value_t)]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// A stream of YAML documents
    #[default]
    Yaml,

    /// A JSON array
    Json,
}
