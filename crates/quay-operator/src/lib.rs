//! Synthesis of the Kubernetes Deployments that run a Quay registry ecosystem.
//!
//! A [`QuayEcosystem`](crd::QuayEcosystem) describes the desired stack. It is wrapped into a
//! [`QuayConfiguration`](configuration::QuayConfiguration), from which the functions in
//! [`workload`] produce one Deployment per component: Redis, PostgreSQL, the Quay config app and
//! Quay itself.
pub mod builder;
pub mod cli;
pub mod configuration;
pub mod constants;
pub mod crd;
pub mod defaults;
pub mod logging;
pub mod naming;
pub mod quantity;
pub mod workload;

pub use k8s_openapi;
pub use kube;
