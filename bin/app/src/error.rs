//! Error types for the application shell.

use std::fmt;

/// Errors from composing and mounting the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The host document has no element with the configured id.
    /// Fatal at startup; the application cannot render.
    MountTargetMissing { id: String },
    /// A capability failed during installation.
    CapabilityInstallFailed { capability: String, reason: String },
    /// Navigation was requested but no router capability was installed.
    RouterNotInstalled,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MountTargetMissing { id } => {
                write!(f, "mount target '#{id}' not found in host document")
            }
            Self::CapabilityInstallFailed { capability, reason } => {
                write!(f, "failed to install capability '{capability}': {reason}")
            }
            Self::RouterNotInstalled => {
                write!(f, "no router capability installed")
            }
        }
    }
}

impl std::error::Error for ShellError {}
