//! Async adapter for the blocking round trip.
//!
//! The round trip itself stays synchronous. [`send_detached`] moves the client
//! onto tokio's blocking pool and hands it back once the reply is decoded, so
//! executor threads never wait on the network.

use std::sync::Arc;
use tracing::{error, instrument};

use crate::error::{constants, ProtocolError, Result};
use crate::protocol::response::ResponseKind;
use crate::service::client::EnvelopeClient;
use crate::transport::Transport;

/// Run `client.send(transport, address)` on the blocking pool.
///
/// The outer `Result` fails only if the blocking task itself died; the client
/// is lost in that case. The inner `Result` is the round-trip outcome.
#[instrument(skip(client, transport))]
pub async fn send_detached<T>(
    mut client: EnvelopeClient,
    transport: Arc<T>,
    address: String,
) -> Result<(EnvelopeClient, Result<ResponseKind>)>
where
    T: Transport + Send + Sync + ?Sized + 'static,
{
    tokio::task::spawn_blocking(move || {
        let outcome = client.send(transport.as_ref(), &address);
        (client, outcome)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "Blocking round trip task failed");
        ProtocolError::TaskFailed(format!("{}: {e}", constants::ERR_BLOCKING_TASK))
    })
}
