//! Clip repository.

use qclip_models::{ClipId, ClipRecord, VideoId};
use rusqlite::{params, Connection, Row};

use crate::connection::Database;
use crate::error::DbResult;
use crate::helpers::{parse_clip_status, parse_datetime};

fn row_to_clip(row: &Row) -> DbResult<ClipRecord> {
    let id: String = row.get("id")?;
    let video_id: String = row.get("video_id")?;
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;

    Ok(ClipRecord {
        id: ClipId::from(id),
        video_id: VideoId::from(video_id),
        url: row.get("url")?,
        start_time: row.get("start_time")?,
        end_time: row.get("end_time")?,
        text: row.get("text")?,
        status: parse_clip_status(&status)?,
        created_at: parse_datetime(&created_at)?,
    })
}

pub(crate) fn clips_for_video(conn: &Connection, video_id: &str) -> DbResult<Vec<ClipRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, video_id, url, start_time, end_time, text, status, created_at
         FROM video_clips
         WHERE video_id = ?1
         ORDER BY start_time ASC",
    )?;

    let mut rows = stmt.query(params![video_id])?;
    let mut clips = Vec::new();
    while let Some(row) = rows.next()? {
        clips.push(row_to_clip(row)?);
    }

    Ok(clips)
}

impl Database {
    pub async fn insert_clip(&self, clip: &ClipRecord) -> DbResult<()> {
        let record = clip.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO video_clips (id, video_id, url, start_time, end_time, text, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    record.id.as_str(),
                    record.video_id.as_str(),
                    record.url,
                    record.start_time,
                    record.end_time,
                    record.text,
                    record.status.as_str(),
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn list_clips_for_video(&self, video_id: &VideoId) -> DbResult<Vec<ClipRecord>> {
        let video_id = video_id.clone();
        self.execute(move |conn| clips_for_video(conn, video_id.as_str()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qclip_models::{UploadedClip, VideoRecord};
    use tempfile::TempDir;

    async fn open_db(dir: &TempDir) -> Database {
        Database::new(dir.path().join("test.db")).unwrap()
    }

    fn uploaded(start: f64, end: f64) -> UploadedClip {
        UploadedClip {
            url: format!("https://example.com/clip_{start}.mp4"),
            start,
            end,
            text: "Some words.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_list_clips() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir).await;

        let video = VideoRecord::new(VideoId::new(), "user-1", "talk.mp4");
        db.insert_video(&video).await.unwrap();

        // Insert out of order to verify ordering by start time.
        db.insert_clip(&ClipRecord::from_upload(video.id.clone(), &uploaded(30.0, 45.0)))
            .await
            .unwrap();
        db.insert_clip(&ClipRecord::from_upload(video.id.clone(), &uploaded(0.0, 15.0)))
            .await
            .unwrap();

        let clips = db.list_clips_for_video(&video.id).await.unwrap();
        assert_eq!(clips.len(), 2);
        assert!((clips[0].start_time - 0.0).abs() < 0.001);
        assert!((clips[1].start_time - 30.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_insert_clip_requires_video() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir).await;

        let orphan = ClipRecord::from_upload(VideoId::new(), &uploaded(0.0, 10.0));
        assert!(db.insert_clip(&orphan).await.is_err());
    }

    #[tokio::test]
    async fn test_list_clips_empty() {
        let dir = TempDir::new().unwrap();
        let db = open_db(&dir).await;

        let video = VideoRecord::new(VideoId::new(), "user-1", "talk.mp4");
        db.insert_video(&video).await.unwrap();

        let clips = db.list_clips_for_video(&video.id).await.unwrap();
        assert!(clips.is_empty());
    }
}
