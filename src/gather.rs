//! Gather orchestration: fetch, parse, deliver
//!
//! Every selected service is gathered independently. The futures are
//! issued together and joined on one task, so one slow or failing
//! upstream neither delays nor suppresses the others; indicators reach
//! the consumer in completion order, not directory order.

use crate::errors::Result;
use crate::indicator::Indicator;
use crate::sources::StatusSource;
use crate::transport::HttpTransport;
use crate::visibility::VisibilityConfig;
use futures::future::join_all;
use tracing::{debug, error, info};

/// Fetch one service's status payload, parse it, and deliver the
/// resulting indicator to the consumer exactly once.
pub async fn gather_report<F>(
    transport: &HttpTransport,
    consumer: &F,
    service: &dyn StatusSource,
) -> Result<()>
where
    F: Fn(Indicator),
{
    debug!("Gathering report for {}", service.key());

    let payload = transport
        .fetch_status(service.base_url(), service.status_path())
        .await?;
    let indicator = service.parse(&payload)?;

    consumer(indicator);
    Ok(())
}

/// Gather every service the config selects out of the directory.
///
/// A failed gather is logged and isolated to its own service; sibling
/// indicators are still delivered.
pub async fn select_and_gather_all<F>(
    transport: &HttpTransport,
    config: &VisibilityConfig,
    directory: &[Box<dyn StatusSource>],
    consumer: &F,
) where
    F: Fn(Indicator),
{
    let selected = config.select_for_gathering(directory);

    info!(
        "Gathering {} of {} known services",
        selected.len(),
        directory.len()
    );

    let gathers = selected.into_iter().map(|service| async move {
        if let Err(e) = gather_report(transport, consumer, service).await {
            error!("Failed to gather report for {}: {}", service.key(), e);
        }
    });

    join_all(gathers).await;
}
