//! # Envelope Client
//!
//! Sequences one round trip: assemble the request, hand it to a [`Transport`],
//! decode the reply, and expose the decoded sub-objects through typed
//! accessors.
//!
//! A client is one logical conversation. [`EnvelopeClient::send`] takes
//! `&mut self`, so a client can never have two requests in flight or be read
//! while a reply is being decoded. Share a client across threads behind a
//! `Mutex`, or give each request its own client.
//!
//! ```ignore
//! let mut client = EnvelopeClient::new(3, authentication);
//! client.request_mut().set_revocation(SubObject::revocation_query(local_version));
//! client.send(&transport, &config.server_url)?;
//! let revoked = client.revocation_list()?;
//! ```

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::config::{ClientConfig, ProtocolConfig};
use crate::core::keys::ResponseKey;
use crate::error::{ProtocolError, Result};
use crate::protocol::payloads::{
    AuthenticationReply, BluetoothReply, CertificateReply, FollowerKey, FollowerReply,
    LocationReply, RevocationListEntry, RevocationReply,
};
use crate::protocol::request::RequestEnvelope;
use crate::protocol::response::{Response, ResponseKind, ResponseParser};
use crate::protocol::sub_object::SubObject;
use crate::transport::Transport;
use crate::utils::metrics::{Metrics, Timer};

/// Orchestrates request assembly, transport and response decoding
#[derive(Debug)]
pub struct EnvelopeClient {
    request: RequestEnvelope,
    response: Option<Response>,
    metrics: Arc<Metrics>,
    log_bodies: bool,
}

impl Default for EnvelopeClient {
    fn default() -> Self {
        Self::empty()
    }
}

impl EnvelopeClient {
    /// A client whose request already carries both mandatory fields
    pub fn new(version: i64, authentication: SubObject) -> Self {
        let mut client = Self::empty();
        client
            .request
            .set_version(version)
            .set_authentication(authentication);
        client
    }

    /// A client using the configured protocol version
    pub fn from_config(config: &ClientConfig, authentication: SubObject) -> Self {
        Self::new(config.protocol_version, authentication)
    }

    /// A client using the configured protocol version and body-logging flag
    pub fn from_protocol_config(config: &ProtocolConfig, authentication: SubObject) -> Self {
        Self::from_config(&config.client, authentication)
            .with_body_logging(config.logging.log_bodies)
    }

    /// A client with nothing set; `send` fails until the mandatory fields are added
    pub fn empty() -> Self {
        Self {
            request: RequestEnvelope::new(),
            response: None,
            metrics: Arc::new(Metrics::new()),
            log_bodies: false,
        }
    }

    /// Record into a shared metrics collector
    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Log full request and reply documents at debug level
    pub fn with_body_logging(mut self, enabled: bool) -> Self {
        self.log_bodies = enabled;
        self
    }

    pub fn request(&self) -> &RequestEnvelope {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut RequestEnvelope {
        &mut self.request
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    /// Run one blocking round trip against `address`.
    ///
    /// Any previously decoded reply is discarded first, so accessors only ever
    /// describe the latest round trip.
    #[instrument(skip(self, transport))]
    pub fn send<T>(&mut self, transport: &T, address: &str) -> Result<ResponseKind>
    where
        T: Transport + ?Sized,
    {
        let _timer = Timer::start("round_trip");
        self.response = None;
        self.metrics.round_trip_started();

        match self.round_trip(transport, address) {
            Ok(response) => {
                let kind = response.kind();
                self.metrics.round_trip_succeeded(&response);
                info!(?kind, "Round trip completed");
                self.response = Some(response);
                Ok(kind)
            }
            Err(e) => {
                self.metrics.round_trip_failed(&e);
                error!(error = %e, "Round trip failed");
                Err(e)
            }
        }
    }

    /// Run one round trip against the configured server URL
    pub fn send_with_config<T>(
        &mut self,
        transport: &T,
        config: &ClientConfig,
    ) -> Result<ResponseKind>
    where
        T: Transport + ?Sized,
    {
        self.send(transport, &config.server_url)
    }

    fn round_trip<T>(&self, transport: &T, address: &str) -> Result<Response>
    where
        T: Transport + ?Sized,
    {
        let envelope = self.request.assemble()?;
        let body = envelope.to_form_body()?;
        if self.log_bodies {
            debug!(document = body.document(), "Request envelope");
        }
        self.metrics.request_sent(body.len() as u64);

        let raw = transport.post_form(address, &body)?;
        self.metrics.reply_received(raw.len() as u64);
        if raw.trim().is_empty() {
            return Err(ProtocolError::EmptyResponse);
        }
        if self.log_bodies {
            debug!(document = %raw, "Reply envelope");
        }

        ResponseParser::new(envelope.version).disassemble(&raw)
    }

    /// The decoded reply of the last successful round trip
    pub fn last_response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    fn response(&self, field: &'static str) -> Result<&Response> {
        self.response
            .as_ref()
            .ok_or(ProtocolError::FieldNotAvailable(field))
    }

    fn optional(&self, key: ResponseKey) -> Result<&SubObject> {
        self.response(key.name())?.optional(key)
    }

    /// Status of a bug-report acknowledgment
    pub fn bug_status(&self) -> Result<&str> {
        self.response("status")?.bug_status()
    }

    pub fn authentication(&self) -> Result<&SubObject> {
        self.response("authentication")?.authentication()
    }

    /// Identifier the server authenticated this client as
    pub fn authenticated_id(&self) -> Result<String> {
        let reply: AuthenticationReply = self.authentication()?.decode("authentication")?;
        Ok(reply.twitter_id)
    }

    pub fn bluetooth(&self) -> Result<&SubObject> {
        self.optional(ResponseKey::Bluetooth)
    }

    /// MAC addresses of peers returned by the server
    pub fn bluetooth_peers(&self) -> Result<Vec<String>> {
        let reply: BluetoothReply = self.bluetooth()?.decode("bluetooth")?;
        Ok(reply.neighbors)
    }

    pub fn location(&self) -> Result<&SubObject> {
        self.optional(ResponseKey::Location)
    }

    pub fn location_status(&self) -> Result<i64> {
        let reply: LocationReply = self.location()?.decode("location")?;
        Ok(reply.status)
    }

    fn certificate_reply(&self) -> Result<CertificateReply> {
        self.optional(ResponseKey::Certificate)?.decode("certificate")
    }

    /// PEM certificate issued for the signing request
    pub fn certificate(&self) -> Result<String> {
        self.certificate_reply()?
            .certificate
            .ok_or_else(|| ProtocolError::InvalidField {
                field: "certificate",
                reason: "no certificate issued".to_string(),
            })
    }

    pub fn certificate_status(&self) -> Result<i64> {
        Ok(self.certificate_reply()?.status)
    }

    pub fn revocation(&self) -> Result<&SubObject> {
        self.optional(ResponseKey::Revocation)
    }

    fn revocation_reply(&self) -> Result<RevocationReply> {
        self.revocation()?.decode("revocation")
    }

    pub fn revocation_list(&self) -> Result<Vec<RevocationListEntry>> {
        Ok(self.revocation_reply()?.list)
    }

    pub fn revocation_version(&self) -> Result<i64> {
        Ok(self.revocation_reply()?.version)
    }

    pub fn follower(&self) -> Result<&SubObject> {
        self.optional(ResponseKey::Follower)
    }

    fn follower_reply(&self) -> Result<FollowerReply> {
        self.follower()?.decode("follower")
    }

    /// Public keys of followers changed since the queried update
    pub fn followers(&self) -> Result<Vec<FollowerKey>> {
        Ok(self.follower_reply()?.followers)
    }

    pub fn follower_last_update(&self) -> Result<i64> {
        Ok(self.follower_reply()?.last_update)
    }

    pub fn notification(&self) -> Result<&SubObject> {
        self.optional(ResponseKey::Notification)
    }
}
