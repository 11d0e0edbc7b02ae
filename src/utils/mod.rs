pub mod env;
pub mod test_utils;
