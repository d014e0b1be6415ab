//! Map transport and signer failures onto [`WriteError`].

use crate::error::WriteError;

const REJECTION_MARKERS: &[&str] = &[
    "user rejected",
    "user denied",
    "rejected by user",
    "action_rejected",
    "signing failed",
    "failed to sign",
];

const REVERT_MARKER: &str = "execution reverted";

/// Classify an error raised while sending `method`.
pub fn classify_send_error(method: &'static str, message: &str) -> WriteError {
    let lower = message.to_ascii_lowercase();

    if REJECTION_MARKERS.iter().any(|marker| lower.contains(marker)) {
        return WriteError::UserRejected(message.to_string());
    }

    if let Some(idx) = lower.find(REVERT_MARKER) {
        return WriteError::Reverted {
            reason: revert_reason(&message[idx + REVERT_MARKER.len()..]),
            tx_hash: None,
        };
    }

    WriteError::RpcFailure {
        method,
        reason: message.to_string(),
    }
}

/// Extract `reason` from a `": reason, data: ..."` style suffix.
fn revert_reason(rest: &str) -> Option<String> {
    let rest = rest.trim_start_matches(|c: char| c == ':' || c.is_whitespace());
    let end = rest
        .find(", data")
        .or_else(|| rest.find('\n'))
        .unwrap_or(rest.len());
    let reason = rest[..end].trim().trim_matches('"').trim();
    (!reason.is_empty()).then(|| reason.to_string())
}
