//! Interactive TCP listener for driving a reverse-shell-style connection
//! by hand: bind, accept one peer, relay typed lines out and echo peer
//! output back until the operator types `quit`.

use std::io;

use thiserror::Error;

pub mod config;
pub mod listener;
pub mod session;

/// Process-fatal failures. Session-scoped endings (quit, stdin closing,
/// a failed send) are not errors; they are [`session::SessionEnd`] and
/// still lead to a normal exit after both sockets close.
#[derive(Debug, Error)]
pub enum Error {
    /// A socket setup step failed. The stage name matches the syscall
    /// that failed so the diagnostic reads like `bind: Address in use`.
    #[error("{stage}: {source}")]
    Setup {
        stage: &'static str,
        source: io::Error,
    },

    /// The operator's terminal went bad mid-session (a genuine stdin or
    /// stdout fault, not end-of-input).
    #[error("stdio: {0}")]
    Stdio(io::Error),
}

impl Error {
    pub(crate) fn setup(stage: &'static str, source: io::Error) -> Self {
        Error::Setup { stage, source }
    }

    /// Exit status for the process: setup failures propagate the OS error
    /// code when one exists, everything else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Setup { source, .. } => source.raw_os_error().unwrap_or(1),
            Error::Stdio(_) => 1,
        }
    }
}
