// src/exit.rs
//! Process exit codes, kept stable for scripts that wrap the CLI.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum FractureExit {
    /// Operation completed.
    Success = 0,
    /// Runtime failure (I/O, serialization).
    Error = 1,
    /// The input or configuration was rejected before any work ran
    /// (malformed edge list, strict-mode duplicate, missing seed).
    InvalidInput = 2,
}

impl FractureExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }
}

impl Termination for FractureExit {
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(u8::try_from(self.code()).unwrap_or(1))
    }
}
