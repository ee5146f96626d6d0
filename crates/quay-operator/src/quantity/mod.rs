//! Validation of Kubernetes resource quantities.
//!
//! Resource overrides arrive as plain strings in the `QuayEcosystem` resource. Before they are
//! placed into a [`ResourceRequirements`](k8s_openapi::api::core::v1::ResourceRequirements) they
//! are parsed according to the [Kubernetes serialization format][k8s-serialization-format], so
//! that a typo fails synthesis instead of producing a Deployment the API server rejects.
//!
//! The parsed value is only used for validation. The emitted [`K8sQuantity`] always carries the
//! exact user input, which keeps the produced objects stable across reconciliations.
//!
//! [k8s-serialization-format]: https://github.com/kubernetes/apimachinery/blob/8c60292e48e46c4faa1e92acb232ce6adb37512c/pkg/api/resource/quantity.go#L37-L59
use std::{
    fmt::{Display, Write},
    num::ParseFloatError,
    str::FromStr,
};

use k8s_openapi::apimachinery::pkg::api::resource::Quantity as K8sQuantity;
use snafu::{ResultExt as _, Snafu, ensure};

mod cpu;
mod memory;
mod suffix;

pub use cpu::*;
pub use memory::*;
pub use suffix::*;

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum ParseQuantityError {
    #[snafu(display("input is either empty or contains non-ascii characters"))]
    InvalidFormat,

    #[snafu(display("failed to parse floating point number"))]
    InvalidFloat { source: ParseFloatError },

    #[snafu(display("failed to parse suffix"))]
    InvalidSuffix { source: ParseSuffixError },
}

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Quantity {
    /// The numeric value of the quantity, parsed from `<signedNumber>`.
    ///
    /// Unlike Kubernetes apimachinery we don't use arbitrary-precision arithmetic, the value is only
    /// needed to reject malformed input.
    value: f64,

    /// The optional suffix of the quantity, parsed from `<suffix>`.
    suffix: Option<Suffix>,
}

impl FromStr for Quantity {
    type Err = ParseQuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        ensure!(!input.is_empty() && input.is_ascii(), InvalidFormatSnafu);

        if input == "0" {
            return Ok(Self {
                value: 0.0,
                suffix: None,
            });
        }

        let (sign, unsigned) = match input.strip_prefix('-') {
            Some(rest) => (-1.0, rest),
            None => (1.0, input.strip_prefix('+').unwrap_or(input)),
        };

        match unsigned.find(|c: char| c != '.' && !c.is_ascii_digit()) {
            Some(suffix_index) => {
                let (number, suffix) = unsigned.split_at(suffix_index);
                let value = f64::from_str(number).context(InvalidFloatSnafu)?;
                let suffix = Suffix::from_str(suffix).context(InvalidSuffixSnafu)?;

                Ok(Self {
                    value: sign * value,
                    suffix: Some(suffix),
                })
            }
            None => {
                let value = f64::from_str(unsigned).context(InvalidFloatSnafu)?;
                Ok(Self {
                    value: sign * value,
                    suffix: None,
                })
            }
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value == 0.0 {
            return f.write_char('0');
        }

        match &self.suffix {
            Some(suffix) => write!(f, "{value}{suffix}", value = self.value),
            None => write!(f, "{value}", value = self.value),
        }
    }
}

impl Quantity {
    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn suffix(&self) -> Option<Suffix> {
        self.suffix
    }
}

/// A validated quantity that remembers the exact text it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedQuantity {
    raw: String,
    quantity: Quantity,
}

impl FromStr for ParsedQuantity {
    type Err = ParseQuantityError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let quantity = Quantity::from_str(input)?;
        Ok(Self {
            raw: input.to_owned(),
            quantity,
        })
    }
}

impl Display for ParsedQuantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<ParsedQuantity> for K8sQuantity {
    fn from(value: ParsedQuantity) -> Self {
        K8sQuantity(value.raw)
    }
}

impl ParsedQuantity {
    pub fn quantity(&self) -> &Quantity {
        &self.quantity
    }
}
