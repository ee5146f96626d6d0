use std::{fmt::Display, ops::Deref, str::FromStr};

use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;

use crate::quantity::{ParseQuantityError, ParsedQuantity};

/// A memory (or storage) quantity such as `256Mi` or `10Gi`.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryQuantity(ParsedQuantity);

impl Deref for MemoryQuantity {
    type Target = ParsedQuantity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for MemoryQuantity {
    type Err = ParseQuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let quantity = ParsedQuantity::from_str(input)?;
        Ok(Self(quantity))
    }
}

impl Display for MemoryQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<MemoryQuantity> for K8sQuantity {
    fn from(value: MemoryQuantity) -> Self {
        value.0.into()
    }
}
