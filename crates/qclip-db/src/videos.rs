//! Video repository.

use qclip_models::{VideoId, VideoRecord, VideoStatus, VideoWithClips};
use rusqlite::{params, Row};

use crate::clips::clips_for_video;
use crate::connection::Database;
use crate::error::DbResult;
use crate::helpers::{parse_datetime, parse_video_status};

fn row_to_video(row: &Row) -> DbResult<VideoRecord> {
    let id: String = row.get("id")?;
    let status: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;

    Ok(VideoRecord {
        id: VideoId::from(id),
        user_id: row.get("user_id")?,
        filename: row.get("filename")?,
        status: parse_video_status(&status)?,
        error_message: row.get("error_message")?,
        processed_count: row.get("processed_count")?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl Database {
    pub async fn insert_video(&self, video: &VideoRecord) -> DbResult<()> {
        let record = video.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO videos (id, user_id, filename, status, error_message, processed_count, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id.as_str(),
                    record.user_id,
                    record.filename,
                    record.status.as_str(),
                    record.error_message,
                    record.processed_count,
                    record.created_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn mark_video_completed(
        &self,
        video_id: &VideoId,
        processed_count: u32,
    ) -> DbResult<()> {
        let video_id = video_id.clone();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE videos
                 SET status = ?1,
                     processed_count = ?2,
                     error_message = NULL
                 WHERE id = ?3",
                params![
                    VideoStatus::Completed.as_str(),
                    processed_count,
                    video_id.as_str(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn mark_video_failed(&self, video_id: &VideoId, error: &str) -> DbResult<()> {
        let video_id = video_id.clone();
        let error = error.to_string();
        self.execute(move |conn| {
            conn.execute(
                "UPDATE videos
                 SET status = ?1,
                     error_message = ?2
                 WHERE id = ?3",
                params![VideoStatus::Failed.as_str(), error, video_id.as_str()],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_video(&self, video_id: &VideoId) -> DbResult<Option<VideoRecord>> {
        let video_id = video_id.clone();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, filename, status, error_message, processed_count, created_at
                 FROM videos
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![video_id.as_str()])?;
            let video = match rows.next()? {
                Some(row) => Some(row_to_video(row)?),
                None => None,
            };
            Ok(video)
        })
        .await
    }

    /// List a user's videos, newest first, each with its clips.
    pub async fn list_videos_with_clips(&self, user_id: &str) -> DbResult<Vec<VideoWithClips>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, user_id, filename, status, error_message, processed_count, created_at
                 FROM videos
                 WHERE user_id = ?1
                 ORDER BY created_at DESC",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let mut videos = Vec::new();
            while let Some(row) = rows.next()? {
                videos.push(row_to_video(row)?);
            }

            let mut result = Vec::with_capacity(videos.len());
            for video in videos {
                let clips = clips_for_video(conn, video.id.as_str())?;
                result.push(VideoWithClips { video, clips });
            }

            Ok(result)
        })
        .await
    }

    /// Delete a user's video. Clips go with it through the cascade.
    ///
    /// Returns false when no video matched the ID and user.
    pub async fn delete_video(&self, video_id: &VideoId, user_id: &str) -> DbResult<bool> {
        let video_id = video_id.clone();
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM videos WHERE id = ?1 AND user_id = ?2",
                params![video_id.as_str(), user_id],
            )?;
            Ok(rows_affected > 0)
        })
        .await
    }
}
