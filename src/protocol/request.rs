//! Request envelope builder.
//!
//! Each setter replaces whatever was stored for its key. [`RequestEnvelope::assemble`]
//! fails closed when `version` or `authentication` is missing.

use crate::core::keys::{RequestKey, AUTHENTICATION, VERSION};
use crate::core::serialization::FormBody;
use crate::error::{ProtocolError, Result};
use crate::protocol::sub_object::{SubObject, SubObjectProducer};
use serde::Serialize;
use tracing::debug;

/// Mutable collection of request sub-objects for one round trip
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestEnvelope {
    version: Option<i64>,
    authentication: Option<SubObject>,
    bugs: Option<SubObject>,
    bluetooth: Option<SubObject>,
    location: Option<SubObject>,
    certificate: Option<SubObject>,
    revocation: Option<SubObject>,
    follower: Option<SubObject>,
    statistic: Option<SubObject>,
}

impl RequestEnvelope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_version(&mut self, version: i64) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn set_authentication(&mut self, value: SubObject) -> &mut Self {
        self.authentication = Some(value);
        self
    }

    pub fn set_bugs(&mut self, value: SubObject) -> &mut Self {
        self.bugs = Some(value);
        self
    }

    pub fn set_bluetooth(&mut self, value: SubObject) -> &mut Self {
        self.bluetooth = Some(value);
        self
    }

    pub fn set_location(&mut self, value: SubObject) -> &mut Self {
        self.location = Some(value);
        self
    }

    pub fn set_certificate(&mut self, value: SubObject) -> &mut Self {
        self.certificate = Some(value);
        self
    }

    pub fn set_revocation(&mut self, value: SubObject) -> &mut Self {
        self.revocation = Some(value);
        self
    }

    pub fn set_follower(&mut self, value: SubObject) -> &mut Self {
        self.follower = Some(value);
        self
    }

    pub fn set_statistic(&mut self, value: SubObject) -> &mut Self {
        self.statistic = Some(value);
        self
    }

    pub fn version(&self) -> Option<i64> {
        self.version
    }

    /// Storage slot for a sub-object key. `version` is not a sub-object.
    fn slot_mut(&mut self, key: RequestKey) -> Option<&mut Option<SubObject>> {
        match key {
            RequestKey::Version => None,
            RequestKey::Authentication => Some(&mut self.authentication),
            RequestKey::Bugs => Some(&mut self.bugs),
            RequestKey::Bluetooth => Some(&mut self.bluetooth),
            RequestKey::Location => Some(&mut self.location),
            RequestKey::Certificate => Some(&mut self.certificate),
            RequestKey::Revocation => Some(&mut self.revocation),
            RequestKey::Follower => Some(&mut self.follower),
            RequestKey::Statistic => Some(&mut self.statistic),
        }
    }

    /// Store a sub-object under `key`, replacing any previous value.
    pub fn set(&mut self, key: RequestKey, value: SubObject) -> Result<()> {
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value);
                Ok(())
            }
            None => Err(ProtocolError::InvalidField {
                field: VERSION,
                reason: "version is set with set_version".to_string(),
            }),
        }
    }

    /// Ask a producer for `key` and store its value if it has one.
    ///
    /// Returns whether a value was stored. An absent value leaves any earlier
    /// value for the key untouched.
    pub fn collect<P>(&mut self, key: RequestKey, producer: &P) -> bool
    where
        P: SubObjectProducer + ?Sized,
    {
        let Some(value) = producer.produce() else {
            debug!(key = %key, "Producer has no value");
            return false;
        };
        match self.slot_mut(key) {
            Some(slot) => {
                *slot = Some(value);
                true
            }
            None => false,
        }
    }

    /// Drop the value stored for `key`
    pub fn clear(&mut self, key: RequestKey) {
        match self.slot_mut(key) {
            Some(slot) => *slot = None,
            None => self.version = None,
        }
    }

    /// Whether a value is stored for `key`
    pub fn contains(&self, key: RequestKey) -> bool {
        match key {
            RequestKey::Version => self.version.is_some(),
            RequestKey::Authentication => self.authentication.is_some(),
            RequestKey::Bugs => self.bugs.is_some(),
            RequestKey::Bluetooth => self.bluetooth.is_some(),
            RequestKey::Location => self.location.is_some(),
            RequestKey::Certificate => self.certificate.is_some(),
            RequestKey::Revocation => self.revocation.is_some(),
            RequestKey::Follower => self.follower.is_some(),
            RequestKey::Statistic => self.statistic.is_some(),
        }
    }

    /// Build the outbound envelope from the stored sub-objects
    pub fn assemble(&self) -> Result<Envelope> {
        let version = self
            .version
            .ok_or(ProtocolError::MissingMandatoryField(VERSION))?;
        let authentication = self
            .authentication
            .clone()
            .ok_or(ProtocolError::MissingMandatoryField(AUTHENTICATION))?;

        Ok(Envelope {
            version,
            authentication,
            bugs: self.bugs.clone(),
            bluetooth: self.bluetooth.clone(),
            location: self.location.clone(),
            certificate: self.certificate.clone(),
            revocation: self.revocation.clone(),
            follower: self.follower.clone(),
            statistic: self.statistic.clone(),
        })
    }
}

/// An assembled request, valid for transmission.
///
/// Field declaration order is the wire key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub version: i64,
    pub authentication: SubObject,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bugs: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bluetooth: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revocation: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub follower: Option<SubObject>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistic: Option<SubObject>,
}

impl Envelope {
    /// Keys present in this envelope, in wire order
    pub fn keys(&self) -> Vec<RequestKey> {
        RequestKey::ALL
            .into_iter()
            .filter(|key| match key {
                RequestKey::Version | RequestKey::Authentication => true,
                RequestKey::Bugs => self.bugs.is_some(),
                RequestKey::Bluetooth => self.bluetooth.is_some(),
                RequestKey::Location => self.location.is_some(),
                RequestKey::Certificate => self.certificate.is_some(),
                RequestKey::Revocation => self.revocation.is_some(),
                RequestKey::Follower => self.follower.is_some(),
                RequestKey::Statistic => self.statistic.is_some(),
            })
            .collect()
    }

    /// Textual document for the `message` form field
    pub fn to_form_body(&self) -> Result<FormBody> {
        FormBody::from_document(self)
    }
}
