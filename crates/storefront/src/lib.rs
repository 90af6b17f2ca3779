pub mod debounce;
pub mod error;
pub mod gallery;
pub mod offline;
pub mod services;

/// Test utilities for unit and integration testing.
/// Only available with cfg(test) or feature "testing".
#[cfg(any(test, feature = "testing"))]
pub mod testing;
