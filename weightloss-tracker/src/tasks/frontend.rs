//! Frontend task
//!
//! Presents whatever the controller sends and forwards input events from
//! the input thread. Messages that arrive together share one flush.

use embassy_futures::select::{select, Either};
use log::{debug, error, info};
use thiserror::Error;

use weightloss_display::{present, DisplayBackend, DisplayError};
use weightloss_protocol::{FrontendMessage, InputEvent};

use crate::channels::{
    ExitReason, InputChannel, APP_EXIT, INPUT_CHANNEL, TO_CONTROLLER, TO_FRONTEND,
};
use crate::link::{FrontendLink, LinkError};

#[derive(Debug, Error)]
pub(crate) enum FrontendTaskError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("display: {0}")]
    Display(#[from] DisplayError),
}

#[embassy_executor::task]
pub async fn frontend_task(backend: Box<dyn DisplayBackend>) {
    info!("frontend task started");
    let mut backend = backend;
    let mut link = FrontendLink::new(&TO_CONTROLLER, &TO_FRONTEND);

    if let Err(e) = run(backend.as_mut(), &mut link, &INPUT_CHANNEL).await {
        error!("frontend stopped: {}", e);
        APP_EXIT.signal(ExitReason::FrontendFailed);
    }
}

pub(crate) async fn run(
    backend: &mut dyn DisplayBackend,
    link: &mut FrontendLink<'_>,
    input: &InputChannel,
) -> Result<(), FrontendTaskError> {
    loop {
        let next = select(input.receive(), link.receive()).await;
        match next {
            Either::First(event) => {
                debug!("forwarding {:?}", event);
                link.send(FrontendMessage::Input(event)).await?;
                if event == InputEvent::Shutdown {
                    info!("shutdown forwarded to controller");
                }
            }
            Either::Second(message) => {
                present(backend, &message?)?;
                // one flush for everything already waiting
                while let Some(message) = link.try_receive()? {
                    present(backend, &message)?;
                }
                backend.flush()?;
            }
        }
    }
}
