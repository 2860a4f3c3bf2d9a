//! Request envelope decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{KindgateError, Result};
use crate::event::Event;

/// Event payload as found in the envelope. Object is tried first, then a
/// string holding JSON; both end up as the same `Event`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum EventPayload {
    Object(Map<String, Value>),
    Encoded(String),
}

impl EventPayload {
    pub fn into_event(self) -> Result<Event> {
        let obj = match self {
            EventPayload::Object(obj) => obj,
            EventPayload::Encoded(s) => serde_json::from_str::<Map<String, Value>>(&s)
                .map_err(|e| KindgateError::Decode(e.to_string()))?,
        };
        Ok(Event::from_map(obj))
    }
}

/// Host-provided metadata. Diagnostics only; a field with an unexpected type is
/// dropped rather than failing the request.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct RequestMeta {
    /// Request type (`"new"` for strfry write policies).
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub req_type: Option<String>,
    /// Unix seconds at which the relay received the event.
    #[serde(rename = "receivedAt", default, deserialize_with = "lenient")]
    pub received_at: Option<u64>,
    /// Where the event came from (`IP4`, `IP6`, `Import`, `Stream`, `Sync`).
    #[serde(rename = "sourceType", default, deserialize_with = "lenient")]
    pub source_type: Option<String>,
    /// Source detail (peer address or upstream relay url).
    #[serde(rename = "sourceInfo", default, deserialize_with = "lenient")]
    pub source_info: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    event: EventPayload,
    #[serde(flatten)]
    meta: RequestMeta,
}

/// One decoded request. Unknown envelope fields are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub meta: RequestMeta,
    pub event: Event,
}

impl Request {
    /// Decode one input line (without its terminator). Envelope and embedded
    /// string failures share the same error path.
    pub fn decode(line: &[u8]) -> Result<Request> {
        let env: Envelope =
            serde_json::from_slice(line).map_err(|e| KindgateError::Decode(e.to_string()))?;
        let event = env.event.into_event()?;
        Ok(Request {
            meta: env.meta,
            event,
        })
    }
}

fn lenient<'de, D, T>(d: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(d)?;
    Ok(serde_json::from_value(v).ok())
}
