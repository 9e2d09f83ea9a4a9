//! Windows utility functions
//!
//! Everything here is plain data handling and builds on every platform.

pub mod error_codes;
pub mod nt_status;
pub mod string_conv;

// Re-export commonly used utilities
pub use error_codes::ErrorCode;
pub use nt_status::{nt_success, NtStatus};
pub use string_conv::{string_to_wide, wide_to_string};
