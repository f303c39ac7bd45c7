pub mod arithmetic;
pub mod validate;

pub use arithmetic::multiply_two_nums;
pub use validate::validate_email_address;
