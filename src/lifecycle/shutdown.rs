//! Ordered release of the session and its transport.

use crate::gateway::GatewaySession;
use crate::net::TransportHandle;

/// Close `session`, then `transport`.
///
/// Both are consumed, so neither can be closed twice or used afterwards.
pub fn release<S, T>(session: S, transport: T)
where
    S: GatewaySession,
    T: TransportHandle,
{
    session.close();
    transport.close();
    tracing::debug!("Resources released");
}
