//! Inbound envelope as sent by the voice platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::SkillError;

/// One skill invocation as delivered by the voice platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub session: Session,
    pub request: Request,
}

impl RequestEnvelope {
    /// Decode an envelope from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, SkillError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// The closed request kind, or a fatal error for an unknown tag.
    pub fn kind(&self) -> Result<RequestKind, SkillError> {
        self.request.kind.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    pub session_id: String,
    pub application: Application,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Raw request-kind tag; see [`RequestKind`].
    #[serde(rename = "type")]
    pub kind: String,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Only present on session-ended requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<HashMap<String, Slot>>,
}

impl Intent {
    /// Spoken value of a slot. A slot the platform sent without a value
    /// counts as absent.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots
            .as_ref()
            .and_then(|slots| slots.get(name))
            .and_then(|slot| slot.value.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Request kinds this skill handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Launch,
    Intent,
    SessionEnded,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::Launch => "LaunchRequest",
            RequestKind::Intent => "IntentRequest",
            RequestKind::SessionEnded => "SessionEndedRequest",
        }
    }
}

impl FromStr for RequestKind {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LaunchRequest" => Ok(RequestKind::Launch),
            "IntentRequest" => Ok(RequestKind::Intent),
            "SessionEndedRequest" => Ok(RequestKind::SessionEnded),
            other => Err(SkillError::UnrecognizedRequestKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for RequestKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intents this skill handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentName {
    LookupCity,
    Help,
    Stop,
}

impl IntentName {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntentName::LookupCity => "LookupCityIntent",
            IntentName::Help => "AMAZON.HelpIntent",
            IntentName::Stop => "AMAZON.StopIntent",
        }
    }
}

impl FromStr for IntentName {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LookupCityIntent" => Ok(IntentName::LookupCity),
            "AMAZON.HelpIntent" => Ok(IntentName::Help),
            "AMAZON.StopIntent" => Ok(IntentName::Stop),
            other => Err(SkillError::UnrecognizedIntent(other.to_string())),
        }
    }
}

impl std::fmt::Display for IntentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
