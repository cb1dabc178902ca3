/// Errors from resolving or evaluating an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OperationError {
    #[error("unknown operation: {0}")]
    Unknown(String),
    #[error("division by zero")]
    DivisionByZero,
    #[error("zero-degree root")]
    ZeroDegreeRoot,
    #[error("even root of a negative number")]
    EvenRootOfNegative,
}

/// A named binary operation with its user-facing help line.
///
/// Entries live in the static [`OPERATIONS`] table; there is no runtime
/// registration.
#[derive(Debug)]
pub struct Operation {
    /// Command name typed at the prompt.
    pub name: &'static str,
    /// One-line description shown by `help`.
    pub help: &'static str,
    apply: fn(f64, f64) -> Result<f64, OperationError>,
}

impl Operation {
    /// Evaluate the operation and round the result to `precision` decimal
    /// places. Rounding happens after computation, not on the inputs.
    pub fn execute(&self, a: f64, b: f64, precision: u32) -> Result<f64, OperationError> {
        (self.apply)(a, b).map(|value| round_to(value, precision))
    }
}

/// All registered operations, ordered by name.
pub static OPERATIONS: &[Operation] = &[
    Operation {
        name: "abs_diff",
        help: "Absolute difference between a and b",
        apply: abs_diff,
    },
    Operation {
        name: "add",
        help: "Add two numbers",
        apply: add,
    },
    Operation {
        name: "divide",
        help: "Divide a by b",
        apply: divide,
    },
    Operation {
        name: "int_divide",
        help: "Floored integer division of a by b",
        apply: int_divide,
    },
    Operation {
        name: "modulus",
        help: "Remainder of a modulo b (sign follows b)",
        apply: modulus,
    },
    Operation {
        name: "multiply",
        help: "Multiply two numbers",
        apply: multiply,
    },
    Operation {
        name: "percent",
        help: "Percentage of a with respect to b ((a/b)*100)",
        apply: percent,
    },
    Operation {
        name: "power",
        help: "Raise a to the power b",
        apply: power,
    },
    Operation {
        name: "root",
        help: "b-th root of a",
        apply: root,
    },
    Operation {
        name: "subtract",
        help: "Subtract b from a",
        apply: subtract,
    },
];

/// Look up an operation by name.
pub fn resolve(name: &str) -> Result<&'static Operation, OperationError> {
    OPERATIONS
        .iter()
        .find(|op| op.name == name)
        .ok_or_else(|| OperationError::Unknown(name.to_string()))
}

fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

fn add(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b)
}

fn power(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok(a.powf(b))
}

fn root(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::ZeroDegreeRoot);
    }
    // Degree is truncated toward zero for the parity check, so root(-8, 3.0)
    // is valid while root(-4, 2.0) is not.
    if a < 0.0 && (b.trunc() as i64) % 2 == 0 {
        return Err(OperationError::EvenRootOfNegative);
    }
    Ok(a.abs().powf(1.0 / b).copysign(a))
}

fn modulus(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    // Floored modulus: the result carries the divisor's sign.
    Ok(a - b * (a / b).floor())
}

fn int_divide(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok((a / b).floor())
}

fn percent(a: f64, b: f64) -> Result<f64, OperationError> {
    if b == 0.0 {
        return Err(OperationError::DivisionByZero);
    }
    Ok(a / b * 100.0)
}

fn abs_diff(a: f64, b: f64) -> Result<f64, OperationError> {
    Ok((a - b).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exec(name: &str, a: f64, b: f64) -> Result<f64, OperationError> {
        resolve(name).unwrap().execute(a, b, 6)
    }

    #[test]
    fn registry_is_sorted_by_name() {
        let names: Vec<&str> = OPERATIONS.iter().map(|op| op.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
    }

    #[test]
    fn resolve_unknown_name_fails() {
        assert_eq!(
            resolve("cbrt").unwrap_err(),
            OperationError::Unknown("cbrt".to_string())
        );
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(exec("add", 1.5, 2.5), Ok(4.0));
        assert_eq!(exec("subtract", 5.0, 2.0), Ok(3.0));
        assert_eq!(exec("multiply", 3.0, 4.0), Ok(12.0));
        assert_eq!(exec("divide", 7.0, 2.0), Ok(3.5));
        assert_eq!(exec("abs_diff", 2.0, 9.0), Ok(7.0));
    }

    #[test]
    fn divide_by_zero_fails() {
        assert_eq!(exec("divide", 1.0, 0.0), Err(OperationError::DivisionByZero));
        assert_eq!(
            exec("int_divide", 1.0, 0.0),
            Err(OperationError::DivisionByZero)
        );
        assert_eq!(exec("percent", 1.0, 0.0), Err(OperationError::DivisionByZero));
        assert_eq!(exec("modulus", 1.0, 0.0), Err(OperationError::DivisionByZero));
    }

    #[test]
    fn power_and_root() {
        assert_eq!(exec("power", 2.0, 10.0), Ok(1024.0));
        assert_eq!(exec("root", 27.0, 3.0), Ok(3.0));
        assert_eq!(exec("root", -8.0, 3.0), Ok(-2.0));
    }

    #[test]
    fn root_error_cases() {
        assert_eq!(exec("root", 4.0, 0.0), Err(OperationError::ZeroDegreeRoot));
        assert_eq!(
            exec("root", -4.0, 2.0),
            Err(OperationError::EvenRootOfNegative)
        );
    }

    #[test]
    fn modulus_sign_follows_divisor() {
        assert_eq!(exec("modulus", -7.0, 3.0), Ok(2.0));
        assert_eq!(exec("modulus", 7.0, -3.0), Ok(-2.0));
    }

    #[test]
    fn int_divide_floors() {
        assert_eq!(exec("int_divide", 7.0, 2.0), Ok(3.0));
        assert_eq!(exec("int_divide", -7.0, 2.0), Ok(-4.0));
    }

    #[test]
    fn percent_of_quarter() {
        assert_eq!(exec("percent", 1.0, 4.0), Ok(25.0));
    }

    #[test]
    fn results_are_rounded_to_precision() {
        let op = resolve("divide").unwrap();
        assert_eq!(op.execute(1.0, 3.0, 2), Ok(0.33));
        assert_eq!(op.execute(2.0, 3.0, 4), Ok(0.6667));
    }

    #[test]
    fn rounding_applies_after_computation() {
        // 0.1234 + 0.0006 rounds to 0.123 only at the end.
        let op = resolve("add").unwrap();
        assert_eq!(op.execute(0.1234, 0.0006, 3), Ok(0.124));
    }
}
