#![allow(dead_code)]

pub use rundag_test_utils::builders;
pub use rundag_test_utils::{init_tracing, with_timeout};
