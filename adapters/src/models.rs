//! Generic data models for the `adapters` crate.
//!
//! These models describe a repository host's reply independently of the
//! HTTP client used to obtain it.

/// Raw reply from a repository host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostResponse {
    pub status: u16,
    pub body: String,
}

impl HostResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Only an exact `200 OK` counts; redirects and other 2xx codes do not.
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
