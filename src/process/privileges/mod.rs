//! Token privilege management

pub mod debug;
pub mod token;

pub use debug::{has_debug_privilege, set_debug_privilege, DebugPrivilegeGuard, SE_DEBUG_NAME};
pub use token::{open_thread_token, set_privilege};
