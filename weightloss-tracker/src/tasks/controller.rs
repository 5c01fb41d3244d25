//! Controller task
//!
//! Ticks the controller at a fixed interval: redraw when due, apply at most
//! one pending input message, queue the outbox on the link and push what
//! the frontend pipe has room for. Nothing here waits on the frontend.

use embassy_time::{Duration, Instant, Timer};
use log::{error, info, warn};
use thiserror::Error;

use weightloss_core::{Controller, ControllerError, Flow};

use crate::channels::{ExitReason, APP_EXIT, TO_CONTROLLER, TO_FRONTEND};
use crate::link::{ControllerLink, LinkError};

/// Ticks spent pushing the last frames out after shutdown
const EXIT_DRAIN_TICKS: u32 = 10;

#[derive(Debug, Error)]
pub(crate) enum ControllerTaskError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error(transparent)]
    Controller(#[from] ControllerError),
}

#[embassy_executor::task]
pub async fn controller_task(controller: Controller) {
    info!("controller task started");
    let mut controller = controller;
    let mut link = ControllerLink::new(&TO_FRONTEND, &TO_CONTROLLER);

    let reason = match run(&mut controller, &mut link).await {
        Ok(()) => ExitReason::Shutdown,
        Err(e) => {
            error!("controller stopped: {}", e);
            ExitReason::ControllerFailed
        }
    };
    APP_EXIT.signal(reason);
}

pub(crate) async fn run(
    controller: &mut Controller,
    link: &mut ControllerLink<'_>,
) -> Result<(), ControllerTaskError> {
    let interval = Duration::from_millis(controller.settings().tick_interval_ms);
    let start = Instant::now();

    loop {
        let step = link
            .try_receive()
            .map_err(ControllerTaskError::from)
            .and_then(|inbound| {
                let now_ms = start.elapsed().as_millis();
                controller.tick(now_ms, inbound).map_err(ControllerTaskError::from)
            });

        let flow = match step {
            Ok(flow) => flow,
            Err(e) => {
                controller.shutdown();
                queue_outbox(controller, link);
                drain(link, interval).await?;
                return Err(e);
            }
        };

        queue_outbox(controller, link);
        if flow == Flow::Shutdown {
            drain(link, interval).await?;
            info!("controller finished");
            return Ok(());
        }
        link.pump()?;
        Timer::after(interval).await;
    }
}

fn queue_outbox(controller: &mut Controller, link: &mut ControllerLink<'_>) {
    for message in controller.drain_outbox() {
        link.queue(message);
    }
}

/// Give the frontend a bounded chance to take the last messages
async fn drain(link: &mut ControllerLink<'_>, interval: Duration) -> Result<(), LinkError> {
    for _ in 0..EXIT_DRAIN_TICKS {
        link.pump()?;
        if link.is_flushed() {
            return Ok(());
        }
        Timer::after(interval).await;
    }
    warn!("frontend did not take the final frames");
    Ok(())
}
