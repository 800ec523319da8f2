//! Periodic crowd refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::info;

use crate::domain::current_hour;
use crate::network::SharedNetwork;

use super::estimator::CrowdEstimator;

/// How often crowd estimates are recomputed by default.
pub const CROWD_REFRESH_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Apply crowd estimates for `hour` to the shared network.
pub async fn refresh_crowds(network: &SharedNetwork, estimator: &CrowdEstimator, hour: u32) -> usize {
    network.update(|n| estimator.apply(n, hour)).await
}

/// Spawn a task that applies crowd estimates now and then every `period`,
/// using the local hour at each tick.
pub fn spawn_crowd_updates(
    network: SharedNetwork,
    estimator: Arc<CrowdEstimator>,
    period: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            // first tick completes immediately
            interval.tick().await;
            let hour = current_hour();
            let updated = refresh_crowds(&network, &estimator, hour).await;
            info!(hour, updated, "Refreshed crowd estimates");
        }
    })
}
