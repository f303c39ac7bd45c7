use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};

/// Multiplies two dynamically typed values that must both be integers.
///
/// Both inputs are checked for presence before either is checked for type.
/// Floats, strings, booleans, arrays and objects are rejected even when they
/// hold an integral value.
///
/// Operands and product are limited to the `i64` range. Integers outside it
/// are rejected, even when the product would fit (`2^63 * 0` fails), and an
/// overflowing product is an error instead of wrapping.
pub fn multiply_two_nums(num1: Option<&JsonValue>, num2: Option<&JsonValue>) -> AppResult<i64> {
    let (Some(a), Some(b)) = (present(num1), present(num2)) else {
        return Err(AppError::invalid_argument(
            "num",
            "Input number cannot be null",
        ));
    };

    let a = as_integer("num1", a)?;
    let b = as_integer("num2", b)?;

    a.checked_mul(b).ok_or_else(|| {
        AppError::invalid_argument("num", format!("{} * {} overflows a 64-bit integer", a, b))
    })
}

fn present(value: Option<&JsonValue>) -> Option<&JsonValue> {
    value.filter(|v| !v.is_null())
}

fn as_integer(name: &str, value: &JsonValue) -> AppResult<i64> {
    match value {
        JsonValue::Number(n) if n.is_f64() => Err(AppError::invalid_argument(
            name,
            format!("Both inputs have to be of type int, got float {}", n),
        )),
        JsonValue::Number(n) => n.as_i64().ok_or_else(|| {
            AppError::invalid_argument(name, format!("{} does not fit in a 64-bit integer", n))
        }),
        other => Err(AppError::invalid_argument(
            name,
            format!("Both inputs have to be of type int, got {}", type_name(other)),
        )),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "bool",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
