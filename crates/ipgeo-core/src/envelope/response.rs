//! Outbound envelope returned to the voice platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::speech::SpeechResponse;

pub const ENVELOPE_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_attributes: Map<String, Value>,
    pub response: SpeechletResponse,
}

impl ResponseEnvelope {
    /// Render a speech response onto the wire schema. Every card title
    /// carries `card_title_prefix`.
    pub fn render(speech: &SpeechResponse, card_title_prefix: &str) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: SpeechletResponse {
                output_speech: OutputSpeech::plain_text(speech.text.clone()),
                card: Card {
                    kind: CardType::Simple,
                    title: format!("{card_title_prefix}{}", speech.title),
                    content: speech.text.clone(),
                },
                reprompt: Reprompt {
                    output_speech: RepromptSpeech {
                        kind: SpeechType::PlainText,
                        text: speech.reprompt.clone(),
                    },
                },
                should_end_session: speech.should_end_session,
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.response.output_speech.text
    }

    pub fn reprompt(&self) -> Option<&str> {
        self.response.reprompt.output_speech.text.as_deref()
    }

    pub fn should_end_session(&self) -> bool {
        self.response.should_end_session
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechletResponse {
    pub output_speech: OutputSpeech,
    pub card: Card,
    pub reprompt: Reprompt,
    pub should_end_session: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechType {
    PlainText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardType {
    Simple,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: SpeechType,
    pub text: String,
}

impl OutputSpeech {
    pub fn plain_text(text: impl Into<String>) -> Self {
        Self {
            kind: SpeechType::PlainText,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "type")]
    pub kind: CardType,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: RepromptSpeech,
}

/// Reprompt speech; `text` is `null` on the wire when no reprompt applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepromptSpeech {
    #[serde(rename = "type")]
    pub kind: SpeechType,
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_matches_wire_schema() {
        let speech = SpeechResponse {
            title: "8.8.8.8".to_string(),
            text: "That address is in Mountain View, California, United States".to_string(),
            reprompt: None,
            should_end_session: true,
        };

        let envelope = ResponseEnvelope::render(&speech, "IP Geo Lookup - ");
        let wire = serde_json::to_value(&envelope).unwrap();

        assert_eq!(
            wire,
            json!({
                "version": "1.0",
                "sessionAttributes": {},
                "response": {
                    "outputSpeech": {
                        "type": "PlainText",
                        "text": "That address is in Mountain View, California, United States"
                    },
                    "card": {
                        "type": "Simple",
                        "title": "IP Geo Lookup - 8.8.8.8",
                        "content": "That address is in Mountain View, California, United States"
                    },
                    "reprompt": {
                        "outputSpeech": { "type": "PlainText", "text": null }
                    },
                    "shouldEndSession": true
                }
            })
        );
    }

    #[test]
    fn test_render_with_reprompt_and_empty_prefix() {
        let speech = SpeechResponse {
            title: "Help".to_string(),
            text: "You can say things like".to_string(),
            reprompt: Some("Please say a command.".to_string()),
            should_end_session: false,
        };

        let envelope = ResponseEnvelope::render(&speech, "");
        assert_eq!(envelope.response.card.title, "Help");
        assert_eq!(envelope.reprompt(), Some("Please say a command."));
        assert!(!envelope.should_end_session());
    }
}
