//! Sub-object key taxonomy.
//!
//! Request keys are serialized in the order of [`RequestKey::ALL`], which keeps
//! the wire output of identical envelopes byte-identical.

use std::fmt;

pub const MESSAGE: &str = "message";
pub const VERSION: &str = "version";
pub const AUTHENTICATION: &str = "authentication";
pub const BUGS: &str = "bugs";
pub const BLUETOOTH: &str = "bluetooth";
pub const LOCATION: &str = "location";
pub const CERTIFICATE: &str = "certificate";
pub const REVOCATION: &str = "revocation";
pub const FOLLOWER: &str = "follower";
pub const STATISTIC: &str = "statistic";
pub const NOTIFICATION: &str = "notification";
pub const STATUS: &str = "status";

/// Top-level keys of an outbound envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RequestKey {
    Version,
    Authentication,
    Bugs,
    Bluetooth,
    Location,
    Certificate,
    Revocation,
    Follower,
    Statistic,
}

impl RequestKey {
    /// Wire order of the request keys
    pub const ALL: [RequestKey; 9] = [
        RequestKey::Version,
        RequestKey::Authentication,
        RequestKey::Bugs,
        RequestKey::Bluetooth,
        RequestKey::Location,
        RequestKey::Certificate,
        RequestKey::Revocation,
        RequestKey::Follower,
        RequestKey::Statistic,
    ];

    /// Literal key name on the wire
    pub fn name(self) -> &'static str {
        match self {
            RequestKey::Version => VERSION,
            RequestKey::Authentication => AUTHENTICATION,
            RequestKey::Bugs => BUGS,
            RequestKey::Bluetooth => BLUETOOTH,
            RequestKey::Location => LOCATION,
            RequestKey::Certificate => CERTIFICATE,
            RequestKey::Revocation => REVOCATION,
            RequestKey::Follower => FOLLOWER,
            RequestKey::Statistic => STATISTIC,
        }
    }

    /// Whether an envelope without this key is invalid for transmission
    pub fn is_mandatory(self) -> bool {
        matches!(self, RequestKey::Version | RequestKey::Authentication)
    }
}

impl fmt::Display for RequestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional sub-objects a full response may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKey {
    Bluetooth,
    Location,
    Certificate,
    Revocation,
    Follower,
    Notification,
}

impl ResponseKey {
    /// Extraction order of the optional response keys
    pub const OPTIONAL: [ResponseKey; 6] = [
        ResponseKey::Bluetooth,
        ResponseKey::Location,
        ResponseKey::Certificate,
        ResponseKey::Revocation,
        ResponseKey::Follower,
        ResponseKey::Notification,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResponseKey::Bluetooth => BLUETOOTH,
            ResponseKey::Location => LOCATION,
            ResponseKey::Certificate => CERTIFICATE,
            ResponseKey::Revocation => REVOCATION,
            ResponseKey::Follower => FOLLOWER,
            ResponseKey::Notification => NOTIFICATION,
        }
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_order_starts_with_mandatory_keys() {
        assert_eq!(RequestKey::ALL[0], RequestKey::Version);
        assert_eq!(RequestKey::ALL[1], RequestKey::Authentication);
        let mandatory: Vec<_> = RequestKey::ALL
            .iter()
            .filter(|k| k.is_mandatory())
            .collect();
        assert_eq!(mandatory.len(), 2);
    }

    #[test]
    fn test_wire_names() {
        let names: Vec<_> = RequestKey::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            [
                "version",
                "authentication",
                "bugs",
                "bluetooth",
                "location",
                "certificate",
                "revocation",
                "follower",
                "statistic"
            ]
        );
        assert_eq!(ResponseKey::Notification.to_string(), "notification");
    }
}
