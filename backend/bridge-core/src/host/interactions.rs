//! The button-clicked capability.

use crate::catalog::ChannelPayload;
use crate::host::state::{HostCommand, HostState};
use crate::registry::{Dispatch, HandlerFn};

use futures_util::FutureExt;
use log::info;

/// Handler bound to the button-clicked channel: logs the interaction
/// and records it in host state.
pub(crate) fn button_clicked_handler(state: HostState) -> HandlerFn {
    Box::new(move |context, payload| {
        let state = state.clone();

        async move {
            let ChannelPayload::ButtonClicked(message) = payload else {
                return Dispatch::Err(String::from(
                    "button-clicked handler received a foreign payload",
                ));
            };

            info!("Interaction from {}: {message}", context.sender);

            match state.update(HostCommand::RecordInteraction(message)).await {
                Ok(()) => Dispatch::Pending,
                Err(e) => Dispatch::Err(e.to_string()),
            }
        }
        .boxed()
    })
}
