use am_core::device::PublicKey;
use am_core::ports::IdentityPort;

use crate::session::StoredSession;

/// Identity of the running session, fixed for its whole lifetime.
pub struct SessionIdentity {
    public_key: PublicKey,
}

impl SessionIdentity {
    pub fn new(public_key: PublicKey) -> Self {
        Self { public_key }
    }

    pub fn from_session(session: &StoredSession) -> Self {
        Self::new(session.public_key.clone())
    }
}

impl IdentityPort for SessionIdentity {
    fn public_key(&self) -> PublicKey {
        self.public_key.clone()
    }
}
