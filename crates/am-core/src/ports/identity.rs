use crate::device::PublicKey;

/// The credential behind the current session.
pub trait IdentityPort: Send + Sync {
    fn public_key(&self) -> PublicKey;
}
