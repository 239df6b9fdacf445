//! Voice-platform envelopes.
//!
//! The schema is dictated by the platform; these types only mirror it.

mod request;
mod response;

pub use request::{
    Application, Intent, IntentName, Request, RequestEnvelope, RequestKind, Session, Slot,
};
pub use response::{
    Card, CardType, ENVELOPE_VERSION, OutputSpeech, Reprompt, RepromptSpeech, ResponseEnvelope,
    SpeechType, SpeechletResponse,
};
