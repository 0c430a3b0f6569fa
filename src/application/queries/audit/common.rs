use crate::application::error::{ApplicationError, ApplicationResult};
use chrono::{DateTime, Utc};

pub(super) fn normalize_limit(limit: u32) -> u32 {
    const DEFAULT_LIMIT: u32 = 20;
    const MAX_LIMIT: u32 = 100;

    if limit == 0 {
        DEFAULT_LIMIT
    } else {
        limit.min(MAX_LIMIT)
    }
}

pub(super) fn ensure_window(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> ApplicationResult<()> {
    match (from, to) {
        (Some(from), Some(to)) if from >= to => Err(ApplicationError::validation(
            "`from` must be earlier than `to`",
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn limits_are_clamped() {
        assert_eq!(normalize_limit(0), 20);
        assert_eq!(normalize_limit(5), 5);
        assert_eq!(normalize_limit(1000), 100);
    }

    #[test]
    fn empty_windows_are_rejected() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(ensure_window(Some(at), Some(at)).is_err());
        assert!(ensure_window(Some(at), None).is_ok());
    }
}
