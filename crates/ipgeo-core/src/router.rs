//! # Skill Router
//!
//! Single-pass decision tree from an inbound envelope to exactly one
//! response:
//!
//! ```text
//! envelope ── LaunchRequest ───────────────────────────── Welcome
//!          ├─ SessionEndedRequest ─────────────────────── Session Ended
//!          └─ IntentRequest ── AMAZON.HelpIntent ──────── Help
//!                           ├─ AMAZON.StopIntent ──────── Session Ended
//!                           └─ LookupCityIntent ── resolve slots
//!                                 ├─ malformed ─────────── Invalid Request
//!                                 ├─ non-routable ──────── Private Address
//!                                 └─ public ── oracle ──── Resolved / Not Found / Invalid
//! ```
//!
//! Nothing survives between invocations. "Try again" only ever happens by
//! the platform sending a new envelope.

use tracing::{debug, info, warn};

use crate::address::{self, Resolution};
use crate::config::SkillConfig;
use crate::envelope::{Intent, IntentName, RequestEnvelope, RequestKind, ResponseEnvelope};
use crate::error::{SkillError, SkillResult};
use crate::geo::{GeoOracle, OracleError, Place};
use crate::speech::SpeechResponse;

/// Which response shape an invocation produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Welcome,
    Help,
    SessionEnded,
    Resolved,
    NotFound,
    TimedOut,
    InvalidAddress,
    PrivateAddress,
    Fallback,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Welcome => "welcome",
            Outcome::Help => "help",
            Outcome::SessionEnded => "session_ended",
            Outcome::Resolved => "resolved",
            Outcome::NotFound => "not_found",
            Outcome::TimedOut => "timed_out",
            Outcome::InvalidAddress => "invalid_address",
            Outcome::PrivateAddress => "private_address",
            Outcome::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One routed turn: the response and how it was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub outcome: Outcome,
    pub speech: SpeechResponse,
}

impl Turn {
    fn new(outcome: Outcome, speech: SpeechResponse) -> Self {
        Self { outcome, speech }
    }
}

/// What the oracle made of a public address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Resolved(Place),
    NotFound,
    /// The oracle did not answer within the configured timeout.
    TimedOut,
    Malformed,
}

pub struct SkillRouter<O> {
    oracle: O,
    config: SkillConfig,
}

impl<O: GeoOracle> SkillRouter<O> {
    pub fn new(oracle: O, config: SkillConfig) -> Self {
        Self { oracle, config }
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }

    /// Decode a raw envelope and handle it.
    pub async fn handle_json(&self, body: &[u8]) -> SkillResult<(Outcome, ResponseEnvelope)> {
        let envelope = RequestEnvelope::from_slice(body)?;
        let turn = self.route(&envelope).await?;
        Ok((turn.outcome, self.render(&turn)))
    }

    /// Handle one envelope and render the wire response.
    pub async fn handle(&self, envelope: &RequestEnvelope) -> SkillResult<ResponseEnvelope> {
        let turn = self.route(envelope).await?;
        Ok(self.render(&turn))
    }

    pub fn render(&self, turn: &Turn) -> ResponseEnvelope {
        ResponseEnvelope::render(&turn.speech, &self.config.card_title_prefix)
    }

    /// Classify the envelope by request kind and dispatch.
    pub async fn route(&self, envelope: &RequestEnvelope) -> SkillResult<Turn> {
        let session = &envelope.session;
        let request = &envelope.request;

        info!(
            application_id = %session.application.application_id,
            "Envelope received"
        );
        if let Some(expected) = &self.config.expected_application_id {
            if expected != &session.application.application_id {
                return Err(SkillError::ApplicationMismatch {
                    actual: session.application.application_id.clone(),
                });
            }
        }

        if session.new {
            info!(
                request_id = %request.request_id,
                session_id = %session.session_id,
                "Session started"
            );
        }

        let kind = envelope.kind()?;
        info!(
            request_id = %request.request_id,
            session_id = %session.session_id,
            kind = %kind,
            "Dispatching request"
        );

        match kind {
            RequestKind::Launch => Ok(Turn::new(Outcome::Welcome, SpeechResponse::welcome())),
            RequestKind::Intent => {
                let intent = request.intent.as_ref().ok_or_else(|| {
                    SkillError::MalformedEnvelope("IntentRequest without an intent".to_string())
                })?;
                self.on_intent(intent).await
            }
            RequestKind::SessionEnded => {
                debug!(reason = ?request.reason, "Session ended by platform");
                Ok(Turn::new(
                    Outcome::SessionEnded,
                    SpeechResponse::session_ended(),
                ))
            }
        }
    }

    /// Classify by intent name and dispatch to exactly one handler.
    pub async fn on_intent(&self, intent: &Intent) -> SkillResult<Turn> {
        let name = match intent.name.parse::<IntentName>() {
            Ok(name) => name,
            Err(SkillError::UnrecognizedIntent(name)) if self.config.unknown_intent_fallback => {
                warn!(intent = %name, "Unrecognized intent, answering with fallback");
                return Ok(Turn::new(Outcome::Fallback, SpeechResponse::unrecognized()));
            }
            Err(e) => return Err(e),
        };

        match name {
            IntentName::LookupCity => self.lookup_city(intent).await,
            IntentName::Help => Ok(Turn::new(Outcome::Help, SpeechResponse::help())),
            IntentName::Stop => Ok(Turn::new(
                Outcome::SessionEnded,
                SpeechResponse::session_ended(),
            )),
        }
    }

    /// Resolve the octet slots and, for public addresses, ask the oracle.
    pub async fn lookup_city(&self, intent: &Intent) -> SkillResult<Turn> {
        self.on_resolution(address::resolve(|slot| intent.slot_value(slot))).await
    }

    /// Same path as the lookup intent, for an address typed as one string.
    pub async fn lookup_dotted(&self, address: &str) -> SkillResult<Turn> {
        self.on_resolution(address::resolve_dotted(address)).await
    }

    async fn on_resolution(&self, resolution: Resolution) -> SkillResult<Turn> {
        match resolution {
            Resolution::Malformed(e) => {
                info!(error = %e, "Rejecting malformed address");
                Ok(Turn::new(
                    Outcome::InvalidAddress,
                    SpeechResponse::invalid_address(),
                ))
            }
            Resolution::NonRoutable { address, range } => {
                info!(address = %address, range = %range, "Rejecting non-routable address");
                Ok(Turn::new(
                    Outcome::PrivateAddress,
                    SpeechResponse::private_address(&address),
                ))
            }
            Resolution::Public(address) => self.lookup_address(&address).await,
        }
    }

    /// Look up an already validated public address and phrase the result.
    pub async fn lookup_address(&self, address: &str) -> SkillResult<Turn> {
        let turn = match self.query_oracle(address).await? {
            LookupResult::Resolved(place) => Turn::new(
                Outcome::Resolved,
                SpeechResponse::resolved(address, &place),
            ),
            LookupResult::NotFound => {
                Turn::new(Outcome::NotFound, SpeechResponse::not_found(address))
            }
            LookupResult::TimedOut => {
                Turn::new(Outcome::TimedOut, SpeechResponse::not_found(address))
            }
            LookupResult::Malformed => Turn::new(
                Outcome::InvalidAddress,
                SpeechResponse::invalid_address_titled(address),
            ),
        };
        info!(address, outcome = %turn.outcome, "Lookup finished");
        Ok(turn)
    }

    /// Query the oracle under the configured timeout.
    ///
    /// Only an unusable database is an error; every other oracle signal is
    /// a result the user hears about.
    pub async fn query_oracle(&self, address: &str) -> SkillResult<LookupResult> {
        let timeout = self.config.lookup_timeout;
        match tokio::time::timeout(timeout, self.oracle.lookup(address)).await {
            Ok(Ok(record)) => Ok(LookupResult::Resolved(Place::from(record))),
            Ok(Err(OracleError::NotFound(_))) => Ok(LookupResult::NotFound),
            Ok(Err(OracleError::MalformedInput(_))) => Ok(LookupResult::Malformed),
            Ok(Err(e @ OracleError::Unavailable(_))) => Err(SkillError::Oracle(e)),
            Err(_) => {
                warn!(
                    address,
                    timeout_ms = timeout.as_millis() as u64,
                    oracle = %self.oracle.describe(),
                    "Geolocation lookup timed out"
                );
                Ok(LookupResult::TimedOut)
            }
        }
    }
}
