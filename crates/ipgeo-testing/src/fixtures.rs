//! Inbound envelope fixtures.

use ipgeo_core::RequestEnvelope;
use serde_json::{Value, json};

pub const APPLICATION_ID: &str = "amzn1.ask.skill.ipgeo-test";
pub const SESSION_ID: &str = "amzn1.echo-api.session.fixture";
pub const REQUEST_ID: &str = "amzn1.echo-api.request.fixture";

/// Wrap a `request` object in a session, as raw JSON.
pub fn envelope_json(request: Value) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": true,
            "sessionId": SESSION_ID,
            "application": { "applicationId": APPLICATION_ID },
            "attributes": {}
        },
        "request": request
    })
}

pub fn envelope(request: Value) -> RequestEnvelope {
    serde_json::from_value(envelope_json(request)).expect("fixture envelope must decode")
}

pub fn launch_request() -> RequestEnvelope {
    envelope(json!({
        "type": "LaunchRequest",
        "requestId": REQUEST_ID,
        "locale": "en-US"
    }))
}

pub fn session_ended_request() -> RequestEnvelope {
    envelope(json!({
        "type": "SessionEndedRequest",
        "requestId": REQUEST_ID,
        "reason": "USER_INITIATED"
    }))
}

/// Intent request with the given slot values; `None` leaves the slot
/// unfilled.
pub fn intent_request(name: &str, slots: &[(&str, Option<&str>)]) -> RequestEnvelope {
    envelope(intent_request_json(name, slots))
}

pub fn intent_request_json(name: &str, slots: &[(&str, Option<&str>)]) -> Value {
    let slots: serde_json::Map<String, Value> = slots
        .iter()
        .map(|(slot, value)| {
            let mut entry = json!({ "name": slot });
            if let Some(value) = value {
                entry["value"] = json!(value);
            }
            (slot.to_string(), entry)
        })
        .collect();

    json!({
        "type": "IntentRequest",
        "requestId": REQUEST_ID,
        "intent": { "name": name, "slots": slots }
    })
}

/// `LookupCityIntent` with all four octet slots filled.
pub fn lookup_request(octets: [&str; 4]) -> RequestEnvelope {
    intent_request(
        "LookupCityIntent",
        &[
            ("One", Some(octets[0])),
            ("Two", Some(octets[1])),
            ("Three", Some(octets[2])),
            ("Four", Some(octets[3])),
        ],
    )
}

pub fn help_request() -> RequestEnvelope {
    intent_request("AMAZON.HelpIntent", &[])
}

pub fn stop_request() -> RequestEnvelope {
    intent_request("AMAZON.StopIntent", &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipgeo_core::RequestKind;

    #[test]
    fn test_fixtures_decode() {
        assert_eq!(launch_request().kind().unwrap(), RequestKind::Launch);
        assert_eq!(
            session_ended_request().kind().unwrap(),
            RequestKind::SessionEnded
        );

        let lookup = lookup_request(["8", "8", "4", "4"]);
        let intent = lookup.request.intent.unwrap();
        assert_eq!(intent.slot_value("Three"), Some("4"));
    }

    #[test]
    fn test_unfilled_slot_has_no_value() {
        let request = intent_request("LookupCityIntent", &[("One", Some("1")), ("Two", None)]);
        let intent = request.request.intent.unwrap();
        assert_eq!(intent.slot_value("One"), Some("1"));
        assert_eq!(intent.slot_value("Two"), None);
    }
}
