//! Two-operand arithmetic module
//!
//! Maps an operator symbol to its binary function and renders the result
//! the way the `calculator` binary prints it.

use clap::ValueEnum;

/// Binary arithmetic function applied to two operands
type BinaryOp = fn(f64, f64) -> f64;

/// Supported operators, named on the command line by their symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Operation {
    #[value(name = "+")]
    Add,
    #[value(name = "-")]
    Sub,
    #[value(name = "*")]
    Mul,
    #[value(name = "/")]
    Div,
}

fn add(x: f64, y: f64) -> f64 {
    x + y
}

fn sub(x: f64, y: f64) -> f64 {
    x - y
}

fn mul(x: f64, y: f64) -> f64 {
    x * y
}

// No zero check: x / 0.0 yields an infinity and 0.0 / 0.0 yields NaN.
fn div(x: f64, y: f64) -> f64 {
    x / y
}

impl Operation {
    /// Look up the function bound to this operator
    fn function(self) -> BinaryOp {
        match self {
            Self::Add => add,
            Self::Sub => sub,
            Self::Mul => mul,
            Self::Div => div,
        }
    }

    /// Apply the operator to both operands
    pub fn apply(self, x: f64, y: f64) -> f64 {
        (self.function())(x, y)
    }
}

/// Format a result as a shortest round-trip decimal string
///
/// Integral values keep a trailing `.0`, special values print as `inf`,
/// `-inf` and `nan`, and exponents carry an explicit sign with at least
/// two digits.
///
/// # Examples
/// ```
/// use cors_preview::calc::format_result;
/// assert_eq!(format_result(12.0), "12.0");
/// assert_eq!(format_result(2.5), "2.5");
/// assert_eq!(format_result(1e16), "1e+16");
/// assert_eq!(format_result(f64::NAN), "nan");
/// ```
pub fn format_result(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }

    let repr = format!("{value:?}");
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |d| ("-", d));
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => repr,
    }
}
