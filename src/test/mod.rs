//! Test support.


pub(crate) use context::{TestContext, test_address};
