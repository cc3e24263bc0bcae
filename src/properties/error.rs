use std::fmt;

/// Host status code for a failed property query (`'who?'`).
///
/// The host's property contract has a single failure category: unknown,
/// unsupported and too-small-buffer all collapse into this status.
pub const HOST_STATUS_UNKNOWN_PROPERTY: u32 = 0x7768_6F3F;

/// Error type for property resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyError {
    /// Selector unrecognized, intentionally unimplemented, or the requested
    /// value is absent for this object
    UnknownProperty,
    /// Caller-supplied size hint is smaller than the value's encoded size
    WouldOverflow { needed: u32, available: u32 },
}

impl PropertyError {
    /// The status code reported to the host. Both variants collapse into the
    /// same outward code; the distinction only survives in logs and tests.
    pub fn host_status(&self) -> u32 {
        HOST_STATUS_UNKNOWN_PROPERTY
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::UnknownProperty => write!(f, "unknown or unsupported property"),
            PropertyError::WouldOverflow { needed, available } => write!(
                f,
                "value needs {} bytes but only {} are available",
                needed, available
            ),
        }
    }
}

impl std::error::Error for PropertyError {}
