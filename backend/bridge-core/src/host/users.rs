//! The create-user capability.

use crate::catalog::ChannelPayload;
use crate::host::state::{HostCommand, HostState, UserRecord};
use crate::registry::{Dispatch, HandlerFn, ValidatorFn};

use common::RedactedEmail;

use futures_util::FutureExt;
use log::info;

/// Handler bound to the create-user channel: records the user in host
/// state. Payload shape is guaranteed by dispatch-time decoding.
pub(crate) fn create_user_handler(state: HostState) -> HandlerFn {
    Box::new(move |context, payload| {
        let state = state.clone();

        async move {
            let ChannelPayload::CreateUser(data) = payload else {
                return Dispatch::Err(String::from(
                    "create-user handler received a foreign payload",
                ));
            };

            info!(
                "Recording user {} ({}) requested by {}",
                data.name,
                RedactedEmail::new(data.email.as_str()),
                context.sender
            );

            let record = UserRecord {
                email: data.email,
                name: data.name,
            };

            match state.update(HostCommand::RecordUser(record)).await {
                Ok(()) => Dispatch::Pending,
                Err(e) => Dispatch::Err(e.to_string()),
            }
        }
        .boxed()
    })
}

/// Validator for the create-user channel: the email must at least
/// carry a local part and a domain before the handler sees it.
pub(crate) fn create_user_validator() -> ValidatorFn {
    Box::new(|payload| {
        let ChannelPayload::CreateUser(data) = payload else {
            return Err(String::from("wrong payload variant"));
        };

        match data.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
            _ => Err(format!(
                "\"{}\" is not a plausible email address",
                RedactedEmail::new(data.email.as_str())
            )),
        }
    })
}
