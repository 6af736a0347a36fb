#![forbid(unsafe_code)]

pub mod index;
pub mod validate;

pub const CRATE_NAME: &str = "docpack-core";

/// Process exit codes shared by every docpack subcommand.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success = 0,
    Validation = 1,
    Internal = 2,
}

impl ExitCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }
}
