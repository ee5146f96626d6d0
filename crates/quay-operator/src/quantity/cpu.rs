use std::{fmt::Display, ops::Deref, str::FromStr};

use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;

use crate::quantity::{ParseQuantityError, ParsedQuantity};

/// A CPU quantity such as `500m` or `2`.
#[derive(Clone, Debug, PartialEq)]
pub struct CpuQuantity(ParsedQuantity);

impl Deref for CpuQuantity {
    type Target = ParsedQuantity;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for CpuQuantity {
    type Err = ParseQuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let quantity = ParsedQuantity::from_str(input)?;
        Ok(Self(quantity))
    }
}

impl Display for CpuQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl From<CpuQuantity> for K8sQuantity {
    fn from(value: CpuQuantity) -> Self {
        value.0.into()
    }
}
