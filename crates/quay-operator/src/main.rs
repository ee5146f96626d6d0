use clap::Parser;
use k8s_openapi::api::apps::v1::Deployment;
use kube::CustomResourceExt;
use quay_operator::{
    cli::{self, Command, DEFAULT_ECOSYSTEM_SEARCH_PATHS, OutputFormat, RenderArguments},
    configuration::{self, QuayConfiguration},
    crd::QuayEcosystem,
    logging,
    workload::{self, ComponentIdentity},
};
use snafu::{ResultExt, Snafu};

const APP_NAME: &str = "quay-operator";

#[derive(Debug, Snafu)]
enum Error {
    #[snafu(display("failed to initialize logging"))]
    InitializeLogging { source: logging::Error },

    #[snafu(display("failed to load QuayEcosystem"))]
    LoadEcosystem { source: cli::Error },

    #[snafu(display("invalid QuayEcosystem"))]
    InvalidEcosystem { source: configuration::Error },

    #[snafu(display("failed to synthesize deployments"))]
    SynthesizeDeployments { source: workload::Error },

    #[snafu(display("failed to serialize the CRD"))]
    SerializeCrd { source: serde_yaml::Error },

    #[snafu(display("failed to serialize deployments to YAML"))]
    SerializeYaml { source: serde_yaml::Error },

    #[snafu(display("failed to serialize deployments to JSON"))]
    SerializeJson { source: serde_json::Error },
}

#[derive(Parser)]
#[clap(about, author)]
struct Opts {
    #[clap(subcommand)]
    cmd: Command,
}

#[snafu::report]
fn main() -> Result<(), Error> {
    let opts = Opts::parse();
    logging::initialize_logging("QUAY_OPERATOR_LOG", APP_NAME).context(InitializeLoggingSnafu)?;

    match opts.cmd {
        Command::Crd => {
            let crd = serde_yaml::to_string(&QuayEcosystem::crd()).context(SerializeCrdSnafu)?;
            print!("{crd}");
        }
        Command::Render(arguments) => {
            let output = arguments.output;
            let deployments = render(arguments)?;
            print!("{}", serialize(&deployments, output)?);
        }
    }

    Ok(())
}

fn render(arguments: RenderArguments) -> Result<Vec<Deployment>, Error> {
    let mut ecosystem = arguments
        .ecosystem
        .load(DEFAULT_ECOSYSTEM_SEARCH_PATHS)
        .context(LoadEcosystemSnafu)?;
    if let Some(namespace) = arguments.namespace {
        ecosystem.metadata.namespace = Some(namespace);
    }

    let config = QuayConfiguration::new(ecosystem).context(InvalidEcosystemSnafu)?;
    let identity = ComponentIdentity::for_ecosystem(&config);
    let deployments =
        workload::synthesize_all(&identity, &config).context(SynthesizeDeploymentsSnafu)?;

    tracing::info!(
        ecosystem = config.name(),
        deployments = deployments.len(),
        "rendered deployments"
    );
    Ok(deployments)
}

fn serialize(deployments: &[Deployment], output: OutputFormat) -> Result<String, Error> {
    match output {
        OutputFormat::Yaml => {
            let mut stream = String::new();
            for deployment in deployments {
                stream.push_str("---\n");
                stream.push_str(&serde_yaml::to_string(deployment).context(SerializeYamlSnafu)?);
            }
            Ok(stream)
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(deployments).context(SerializeJsonSnafu)?;
            json.push('\n');
            Ok(json)
        }
    }
}
