// src/domain/audit/cursor_tests.rs
#[cfg(test)]
mod tests {
    use crate::domain::audit::cursor::AuditLogCursor;
    use crate::domain::errors::DomainError;
    use chrono::{TimeZone, Utc};

    #[test]
    fn cursor_survives_encoding() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let token = AuditLogCursor::new(at, 42).encode();
        let decoded = AuditLogCursor::decode(&token).expect("decode should succeed");
        assert_eq!(decoded.id, 42);
        assert_eq!(decoded.timestamp, at);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        for token in ["", "not base64!", "bm8tc2VwYXJhdG9y"] {
            assert!(matches!(
                AuditLogCursor::decode(token),
                Err(DomainError::Validation(_))
            ));
        }
    }
}
