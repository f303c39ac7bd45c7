//! Multiply command handler

use serde_json::Value as JsonValue;

use crate::error::AppResult;
use crate::utils::multiply_two_nums;

pub struct MultiplyCommandHandler;

impl MultiplyCommandHandler {
    /// Multiplies the operands and prints the product
    pub fn execute(a: &JsonValue, b: &JsonValue) -> AppResult<i64> {
        let product = multiply_two_nums(Some(a), Some(b))?;
        println!("{}", product);
        Ok(product)
    }
}
