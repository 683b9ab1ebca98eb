//! Row parsing helpers shared across repositories.

use chrono::{DateTime, Utc};
use qclip_models::{ClipStatus, VideoStatus};

use crate::error::{DbError, DbResult};

pub fn parse_datetime(raw: &str) -> DbResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::corrupt(format!("invalid timestamp '{raw}': {e}")))
}

pub fn parse_video_status(raw: &str) -> DbResult<VideoStatus> {
    raw.parse()
        .map_err(|e| DbError::corrupt(format!("invalid video status: {e}")))
}

pub fn parse_clip_status(raw: &str) -> DbResult<ClipStatus> {
    raw.parse()
        .map_err(|e| DbError::corrupt(format!("invalid clip status: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_datetime_roundtrip() {
        let now = Utc::now();
        let parsed = parse_datetime(&now.to_rfc3339()).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(matches!(
            parse_datetime("not a date"),
            Err(DbError::Corrupt(_))
        ));
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(parse_video_status("processing").unwrap(), VideoStatus::Processing);
        assert_eq!(parse_clip_status("completed").unwrap(), ClipStatus::Completed);
        assert!(parse_video_status("bogus").is_err());
    }
}
