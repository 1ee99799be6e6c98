//! Waits for a tentative device registration to be resolved.
//!
//! Only the store decides when a registration is over. A record past its
//! expiration keeps being polled until the store drops it.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use am_core::ports::{ConnectionPort, TentativeDevicePollerPort};
use am_core::Anchor;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct RegistrationPoller {
    connection: Arc<dyn ConnectionPort>,
    interval: Duration,
}

impl RegistrationPoller {
    /// A zero interval falls back to [`DEFAULT_POLL_INTERVAL`].
    pub fn new(connection: Arc<dyn ConnectionPort>, interval: Duration) -> Self {
        let interval = if interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        Self {
            connection,
            interval,
        }
    }
}

#[async_trait]
impl TentativeDevicePollerPort for RegistrationPoller {
    async fn poll_for_tentative_device(&self, anchor: &Anchor) -> anyhow::Result<()> {
        let mut ticker = interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut lapse_reported = false;

        loop {
            ticker.tick().await;
            let info = self
                .connection
                .get_anchor_info(anchor)
                .await
                .with_context(|| format!("poll registration of anchor {anchor} failed"))?;

            match info.device_registration {
                None => {
                    info!(%anchor, "tentative registration resolved");
                    return Ok(());
                }
                Some(registration) if registration.is_expired_at(Utc::now()) => {
                    if !lapse_reported {
                        warn!(
                            %anchor,
                            expiration = %registration.expiration,
                            "tentative registration expired, waiting for the store to drop it"
                        );
                        lapse_reported = true;
                    }
                }
                Some(registration) => {
                    debug!(
                        %anchor,
                        has_tentative_device = registration.tentative_device.is_some(),
                        "tentative registration still pending"
                    );
                }
            }
        }
    }
}
