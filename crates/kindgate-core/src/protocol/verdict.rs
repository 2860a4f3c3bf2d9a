//! Verdicts and their wire encoding.

/// Reason sent when a reject carries no usable message; a reject never goes
/// out with an empty `msg`.
pub const DEFAULT_REJECT_MSG: &str = "rejected";

/// Outcome of admitting one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accept,
    Reject { msg: String },
}

impl Verdict {
    pub fn reject(msg: impl Into<String>) -> Self {
        Verdict::Reject { msg: msg.into() }
    }

    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept)
    }

    pub fn action(&self) -> &'static str {
        match self {
            Verdict::Accept => "accept",
            Verdict::Reject { .. } => "reject",
        }
    }

    /// Message as sent on the wire. Blank reject reasons are replaced here so
    /// the rule holds for verdicts built directly from the variant too.
    pub fn msg(&self) -> &str {
        match self {
            Verdict::Accept => "",
            Verdict::Reject { msg } if msg.trim().is_empty() => DEFAULT_REJECT_MSG,
            Verdict::Reject { msg } => msg,
        }
    }

    /// Encode as one output line (no terminator).
    pub fn to_line(&self) -> String {
        serde_json::json!({
            "action": self.action(),
            "msg": self.msg(),
        })
        .to_string()
    }
}
