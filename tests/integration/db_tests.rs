//! SQLite persistence integration tests.
//!
//! Each test opens a fresh database file in a temp directory, so no
//! external services are involved.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use qclip_db::Database;
use qclip_models::{ClipRecord, UploadedClip, VideoId, VideoRecord, VideoStatus};

fn open_db(dir: &TempDir) -> Database {
    Database::new(dir.path().join("qclip.db")).unwrap()
}

/// Full video lifecycle: insert, attach clips, complete, list, delete.
#[tokio::test]
async fn test_video_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let video_id = VideoId::new();
    let record = VideoRecord::new(video_id.clone(), "user-1", "talk.mp4");
    db.insert_video(&record).await.unwrap();

    let stored = db.get_video(&video_id).await.unwrap().unwrap();
    assert_eq!(stored.user_id, "user-1");
    assert_eq!(stored.filename, "talk.mp4");
    assert_eq!(stored.status, VideoStatus::Processing);

    let clip = ClipRecord::from_upload(
        video_id.clone(),
        &UploadedClip {
            url: "https://cdn.example/clip0.mp4".to_string(),
            start: 0.0,
            end: 20.0,
            text: "First sentence.".to_string(),
        },
    );
    db.insert_clip(&clip).await.unwrap();
    db.mark_video_completed(&video_id, 1).await.unwrap();

    let videos = db.list_videos_with_clips("user-1").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].video.status, VideoStatus::Completed);
    assert_eq!(videos[0].video.processed_count, 1);
    assert_eq!(videos[0].clips.len(), 1);
    assert_eq!(videos[0].clips[0].url, "https://cdn.example/clip0.mp4");

    // Ownership check: another user cannot delete the video.
    assert!(!db.delete_video(&video_id, "someone-else").await.unwrap());
    assert!(db.get_video(&video_id).await.unwrap().is_some());

    assert!(db.delete_video(&video_id, "user-1").await.unwrap());
    assert!(db.get_video(&video_id).await.unwrap().is_none());
    assert!(db.list_videos_with_clips("user-1").await.unwrap().is_empty());

    // Clips go with the video.
    assert!(db.list_clips_for_video(&video_id).await.unwrap().is_empty());
}

/// Videos list newest first.
#[tokio::test]
async fn test_list_orders_newest_first() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let mut older = VideoRecord::new(VideoId::new(), "user-2", "older.mp4");
    older.created_at = Utc::now() - Duration::seconds(90);
    let newer = VideoRecord::new(VideoId::new(), "user-2", "newer.mp4");

    db.insert_video(&older).await.unwrap();
    db.insert_video(&newer).await.unwrap();

    let videos = db.list_videos_with_clips("user-2").await.unwrap();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].video.filename, "newer.mp4");
    assert_eq!(videos[1].video.filename, "older.mp4");
}

/// Users only see their own videos.
#[tokio::test]
async fn test_list_is_scoped_to_user() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    db.insert_video(&VideoRecord::new(VideoId::new(), "alice", "a.mp4"))
        .await
        .unwrap();
    db.insert_video(&VideoRecord::new(VideoId::new(), "bob", "b.mp4"))
        .await
        .unwrap();

    let videos = db.list_videos_with_clips("alice").await.unwrap();
    assert_eq!(videos.len(), 1);
    assert_eq!(videos[0].video.filename, "a.mp4");
}

/// Failure marks keep the error message for later inspection.
#[tokio::test]
async fn test_mark_failed_records_error() {
    let dir = TempDir::new().unwrap();
    let db = open_db(&dir);

    let video_id = VideoId::new();
    db.insert_video(&VideoRecord::new(video_id.clone(), "user-3", "bad.mp4"))
        .await
        .unwrap();
    db.mark_video_failed(&video_id, "clip upload failed")
        .await
        .unwrap();

    let stored = db.get_video(&video_id).await.unwrap().unwrap();
    assert_eq!(stored.status, VideoStatus::Failed);
    assert_eq!(stored.error_message.as_deref(), Some("clip upload failed"));
    assert_eq!(stored.processed_count, 0);
}
