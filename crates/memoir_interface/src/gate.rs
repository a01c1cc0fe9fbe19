//! Admission control trait.

use std::sync::Arc;

/// Decides whether a client may make another request right now.
///
/// Each call counts as a request attempt by `client_id`.
pub trait RequestGate: Send + Sync {
    /// Returns true when the client has exceeded its allowance.
    fn is_limited(&self, client_id: &str) -> bool;
}

impl<G> RequestGate for Arc<G>
where
    G: RequestGate + ?Sized,
{
    fn is_limited(&self, client_id: &str) -> bool {
        (**self).is_limited(client_id)
    }
}
