//! Ticket identifiers.
//!
//! Tickets use a human-readable `TCK-<unix seconds>` identifier. Two tickets
//! created within the same second collide; callers creating several tickets
//! at once must offset the timestamp themselves (see [`ticket_id_for_unix`]).

/// Prefix shared by every ticket identifier.
pub const TICKET_ID_PREFIX: &str = "TCK-";

/// Identifier for a ticket created at the given Unix time in seconds.
pub fn ticket_id_for_unix(unix_secs: i64) -> String {
    format!("{TICKET_ID_PREFIX}{unix_secs}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_prefix_and_seconds() {
        assert_eq!(ticket_id_for_unix(1_700_000_000), "TCK-1700000000");
    }

    #[test]
    fn consecutive_seconds_differ() {
        assert_ne!(ticket_id_for_unix(1_700_000_000), ticket_id_for_unix(1_700_000_001));
    }
}
