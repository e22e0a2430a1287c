use std::ops::Deref;

use tracing::debug;

use super::AdminGateway;

/// Exclusive ownership of a gateway handle for the duration of one pipeline invocation.
///
/// The handle is closed exactly once, when the lease is dropped. This covers normal
/// completion, early returns and unwinding alike.
#[derive(Debug)]
pub struct GatewayLease<G>
where
    G: AdminGateway,
{
    gateway: G,
}

impl<G> GatewayLease<G>
where
    G: AdminGateway,
{
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

impl<G> Deref for GatewayLease<G>
where
    G: AdminGateway,
{
    type Target = G;

    fn deref(&self) -> &Self::Target {
        &self.gateway
    }
}

impl<G> Drop for GatewayLease<G>
where
    G: AdminGateway,
{
    fn drop(&mut self) {
        debug!("releasing admin gateway");
        self.gateway.close();
    }
}
