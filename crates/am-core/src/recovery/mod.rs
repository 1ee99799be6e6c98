//! Recovery posture of an anchor.

pub mod posture;

pub use posture::{RecoveryPosture, RECOVERY_NAG_MESSAGE, RECOVERY_NAG_TITLE};
