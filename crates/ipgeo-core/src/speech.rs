//! Speech responses and the fixed templates the skill speaks.

use serde::{Deserialize, Serialize};

use crate::geo::Place;

const EXAMPLES: &str = "where is eight. dot eight. dot eight. dot eight. located. \
                        or, lookup four. dot four. dot four. dot four.";

pub const GOODBYE_TEXT: &str = "Goodbye!";
pub const INVALID_ADDRESS_TEXT: &str = "Sorry, I don't understand that address. Please try again.";
pub const PRIVATE_ADDRESS_TEXT: &str = "Sorry, you have requested an address in a private network. \
                                        Please try again with a public address.";
pub const PRIVATE_ADDRESS_REPROMPT: &str = "Please try again with a public address.";
pub const NOT_FOUND_TEXT: &str = "Sorry, that address wasn't found in the database. \
                                  Please try your command again with a different address.";
pub const RETRY_REPROMPT: &str = "Please try your command again with a different address.";
pub const UNRECOGNIZED_TEXT: &str = "Sorry, I didn't understand that request.";

/// What the skill says for one invocation, before it is rendered onto the
/// wire envelope.
///
/// `reprompt` is `Some` exactly when the session stays open and the user is
/// expected to try again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechResponse {
    pub title: String,
    pub text: String,
    pub reprompt: Option<String>,
    pub should_end_session: bool,
}

impl SpeechResponse {
    /// A turn that keeps the session open and offers a reprompt.
    pub fn retry(
        title: impl Into<String>,
        text: impl Into<String>,
        reprompt: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            reprompt: Some(reprompt.into()),
            should_end_session: false,
        }
    }

    /// A turn that ends the session.
    pub fn terminal(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            reprompt: None,
            should_end_session: true,
        }
    }

    pub fn welcome() -> Self {
        Self::retry(
            "Welcome",
            format!("Welcome to the IP GeoLocator service. You can say things like: {EXAMPLES}"),
            command_reprompt(),
        )
    }

    pub fn help() -> Self {
        Self::retry(
            "Help",
            format!("You can say things like: {EXAMPLES}"),
            command_reprompt(),
        )
    }

    pub fn session_ended() -> Self {
        Self::terminal("Session Ended", GOODBYE_TEXT)
    }

    pub fn invalid_address() -> Self {
        Self::invalid_address_titled("Invalid Request")
    }

    /// Invalid-address wording under a caller-chosen title, used when the
    /// database itself rejects an address.
    pub fn invalid_address_titled(title: impl Into<String>) -> Self {
        Self::retry(title, INVALID_ADDRESS_TEXT, INVALID_ADDRESS_TEXT)
    }

    pub fn private_address(address: &str) -> Self {
        Self::retry(address, PRIVATE_ADDRESS_TEXT, PRIVATE_ADDRESS_REPROMPT)
    }

    pub fn not_found(address: &str) -> Self {
        Self::retry(address, NOT_FOUND_TEXT, RETRY_REPROMPT)
    }

    pub fn resolved(address: &str, place: &Place) -> Self {
        Self::terminal(
            address,
            format!(
                "That address is in {}, {}, {}",
                place.city, place.state, place.country
            ),
        )
    }

    /// Generic reply for intents the skill does not know, when configured
    /// to answer instead of failing.
    pub fn unrecognized() -> Self {
        Self::retry("Unrecognized Request", UNRECOGNIZED_TEXT, command_reprompt())
    }
}

fn command_reprompt() -> String {
    format!("Please say a command. You can say things like: {EXAMPLES}")
}
