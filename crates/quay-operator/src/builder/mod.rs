//! This module provides builders for the Kubernetes objects the operator synthesizes.
//!
//! They are often not _pure_ builders but contain extra logic to keep the produced objects
//! consistent, e.g. rejecting two different volumes with the same name.
pub mod meta;
pub mod pod;
