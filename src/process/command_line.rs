//! Command lines and creation flags for new processes

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// `dwCreationFlags` for `CreateProcessW`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreationFlags(u32);

impl CreationFlags {
    pub const NONE: Self = CreationFlags(0);
    pub const DEBUG_PROCESS: Self = CreationFlags(0x0000_0001);
    pub const CREATE_SUSPENDED: Self = CreationFlags(0x0000_0004);
    pub const CREATE_NEW_CONSOLE: Self = CreationFlags(0x0000_0010);
    pub const CREATE_NO_WINDOW: Self = CreationFlags(0x0800_0000);

    pub const fn from_bits(bits: u32) -> Self {
        CreationFlags(bits)
    }

    pub const fn bits(&self) -> u32 {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for CreationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        CreationFlags(self.0 | rhs.0)
    }
}

/// `"<exe> <args>"`, quoting the executable when it contains whitespace
pub fn build_command_line(exe_path: &str, args: &str) -> String {
    let exe = if exe_path.chars().any(char::is_whitespace) && !exe_path.starts_with('"') {
        format!("\"{}\"", exe_path)
    } else {
        exe_path.to_string()
    };

    if args.is_empty() {
        exe
    } else {
        format!("{} {}", exe, args)
    }
}
