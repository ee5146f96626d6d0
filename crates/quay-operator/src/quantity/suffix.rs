use std::{fmt::Display, ops::Deref, str::FromStr};

use snafu::Snafu;

#[derive(Debug, PartialEq, Eq, Snafu)]
#[snafu(display("failed to parse {input:?} as quantity suffix"))]
pub struct ParseSuffixError {
    input: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub enum Suffix {
    DecimalByteMultiple(DecimalByteMultiple),
    BinaryByteMultiple(BinaryByteMultiple),
    DecimalExponent(DecimalExponent),
}

impl FromStr for Suffix {
    type Err = ParseSuffixError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if let Ok(binary_si) = BinaryByteMultiple::from_str(input) {
            return Ok(Self::BinaryByteMultiple(binary_si));
        }

        if let Ok(decimal_si) = DecimalByteMultiple::from_str(input) {
            return Ok(Self::DecimalByteMultiple(decimal_si));
        }

        if let Some(exponent) = input.strip_prefix(['e', 'E']) {
            // Only whole exponents are valid. This rejects inf, NaN and fractional or nested exponents.
            if let Ok(decimal_exponent) = i32::from_str(exponent) {
                return Ok(Self::DecimalExponent(DecimalExponent(decimal_exponent)));
            }
        }

        ParseSuffixSnafu { input }.fail()
    }
}

impl Display for Suffix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DecimalByteMultiple(decimal) => write!(f, "{decimal}"),
            Self::BinaryByteMultiple(binary) => write!(f, "{binary}"),
            Self::DecimalExponent(exponent) => write!(f, "e{exponent}"),
        }
    }
}

/// Supported byte-multiples based on powers of 2.
///
/// These units are defined in IEC 80000-13. Kubernetes adopted them with a shortened notation
/// (mentioned in parentheses).
///
/// ```plain
/// - 1024^1, KiB (Ki), Kibibyte
/// - 1024^2, MiB (Mi), Mebibyte
/// - 1024^3, GiB (Gi), Gibibyte
/// - 1024^4, TiB (Ti), Tebibyte
/// - 1024^5, PiB (Pi), Pebibyte
/// - 1024^6, EiB (Ei), Exbibyte
/// ```
///
/// All units bigger than Exbibyte are not a valid suffix according to the [Kubernetes serialization
/// format][k8s-serialization-format].
///
/// [k8s-serialization-format]: https://github.com/kubernetes/apimachinery/blob/8c60292e48e46c4faa1e92acb232ce6adb37512c/pkg/api/resource/quantity.go#L37-L59
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, strum::Display, strum::EnumString)]
pub enum BinaryByteMultiple {
    #[strum(serialize = "Ki")]
    Kibi,

    #[strum(serialize = "Mi")]
    Mebi,

    #[strum(serialize = "Gi")]
    Gibi,

    #[strum(serialize = "Ti")]
    Tebi,

    #[strum(serialize = "Pi")]
    Pebi,

    #[strum(serialize = "Ei")]
    Exbi,
}

/// Supported multiples based on powers of 10.
///
/// Note that Kubernetes uses a lowercase `k` for kilo, everything above is uppercase.
///
/// ```plain
/// - 1000^-1, (m): milli (Kubernetes only)
/// - 1000^ 1, (k): kilo
/// - 1000^ 2, (M): mega
/// - 1000^ 3, (G): giga
/// - 1000^ 4, (T): tera
/// - 1000^ 5, (P): peta
/// - 1000^ 6, (E): exa
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, strum::Display, strum::EnumString)]
pub enum DecimalByteMultiple {
    #[strum(serialize = "m")]
    Milli,

    #[strum(serialize = "k")]
    Kilo,

    #[strum(serialize = "M")]
    Mega,

    #[strum(serialize = "G")]
    Giga,

    #[strum(serialize = "T")]
    Tera,

    #[strum(serialize = "P")]
    Peta,

    #[strum(serialize = "E")]
    Exa,
}

/// Scientific (also known as E) notation of numbers.
///
/// ### See
///
/// - <https://en.wikipedia.org/wiki/Scientific_notation#E_notation>
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd)]
pub struct DecimalExponent(i32);

impl Deref for DecimalExponent {
    type Target = i32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for DecimalExponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for DecimalExponent {
    fn from(value: i32) -> Self {
        Self(value)
    }
}
