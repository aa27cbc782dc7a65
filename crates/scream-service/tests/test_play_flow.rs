//! Voice playback through the service.

mod common;

use std::time::Duration;

use common::{quick_config, RecordingSession, ScriptedFrames};
use pretty_assertions::assert_eq;
use scream_encoding::EncodeError;
use scream_service::{ScreamService, ServiceConfig, ServiceError};
use scream_voice::{cancel_pair, CancelToken, PlaybackError, Player, SILENCE_FRAME_COUNT};

fn service_with(session: RecordingSession) -> ScreamService<RecordingSession> {
    ScreamService::with_player(quick_config(), Player::new(session)).unwrap()
}

fn dry_run_config() -> ServiceConfig {
    ServiceConfig {
        dry_run: true,
        ..quick_config()
    }
}

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test]
async fn test_missing_guild_id() {
    let service = service_with(RecordingSession::default());
    let err = service
        .play(&CancelToken::never(), "", "channel")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::MissingGuildId));
}

#[tokio::test]
async fn test_no_player_without_dry_run() {
    let service = ScreamService::new(quick_config()).unwrap();
    let err = service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NoPlayer));
}

#[tokio::test]
async fn test_pre_cancelled_never_joins() {
    let service = service_with(RecordingSession::default());
    let err = service
        .play(&CancelToken::cancelled_now(), "guild", "channel")
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(service.player().unwrap().session().joins().is_empty());
}

#[test]
fn test_unknown_preset_rejected_at_construction() {
    let config = ServiceConfig {
        preset: Some("opera".into()),
        ..quick_config()
    };
    assert!(matches!(
        ScreamService::new(config),
        Err(ServiceError::Config(_))
    ));
}

// ============================================================================
// Dry run
// ============================================================================

#[tokio::test]
async fn test_dry_run_encodes_without_player() {
    let service = ScreamService::new(dry_run_config()).unwrap();
    service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_dry_run_skips_configured_player() {
    let service = ScreamService::with_player(
        dry_run_config(),
        Player::new(RecordingSession::default()),
    )
    .unwrap()
    .with_frame_encoder(ScriptedFrames::ok(4));

    service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap();
    assert!(service.player().unwrap().session().joins().is_empty());
}

#[tokio::test]
async fn test_dry_run_reports_encoder_error() {
    let service = ScreamService::new(dry_run_config())
        .unwrap()
        .with_frame_encoder(ScriptedFrames::failing(2));
    let err = service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Encode(EncodeError::WorkerLost)));
}

#[tokio::test]
async fn test_dry_run_cancelled_while_draining() {
    let service = ScreamService::new(dry_run_config())
        .unwrap()
        .with_frame_encoder(ScriptedFrames::stalled(3));
    let (handle, token) = cancel_pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = service.play(&token, "guild", "channel").await.unwrap_err();
    assert!(err.is_cancelled());
}

// ============================================================================
// Playback
// ============================================================================

#[tokio::test]
async fn test_plays_real_opus_frames() {
    let service = service_with(RecordingSession::default());
    service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap();

    let session = service.player().unwrap().session();
    assert_eq!(session.joins(), vec![("guild".to_string(), "channel".to_string())]);
    assert_eq!(session.disconnects(), 1);

    // 200 ms at 20 ms per frame, then the silence tail.
    let frames = session.frames();
    assert_eq!(frames.len(), 10 + SILENCE_FRAME_COUNT);
    assert!(frames[..10].iter().all(|f| !f.is_empty()));
}

#[tokio::test]
async fn test_scripted_frames_forwarded_in_order() {
    let service =
        service_with(RecordingSession::default()).with_frame_encoder(ScriptedFrames::ok(3));
    service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap();

    let frames = service.player().unwrap().session().frames();
    assert_eq!(
        frames[..3].to_vec(),
        vec![vec![0u8; 12], vec![1u8; 12], vec![2u8; 12]]
    );
}

#[tokio::test]
async fn test_encoder_error_after_clean_playback() {
    let service =
        service_with(RecordingSession::default()).with_frame_encoder(ScriptedFrames::failing(2));
    let err = service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Encode(EncodeError::WorkerLost)));
    assert_eq!(service.player().unwrap().session().disconnects(), 1);
}

#[tokio::test]
async fn test_playback_error_wins_over_encoder_error() {
    let service = service_with(RecordingSession::failing_join("no permission"))
        .with_frame_encoder(ScriptedFrames::failing(2));
    let err = service
        .play(&CancelToken::never(), "guild", "channel")
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Play(PlaybackError::JoinFailed(_))));
}

#[tokio::test]
async fn test_cancel_during_playback() {
    let service =
        service_with(RecordingSession::default()).with_frame_encoder(ScriptedFrames::stalled(2));
    let (handle, token) = cancel_pair();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        handle.cancel();
    });

    let err = service.play(&token, "guild", "channel").await.unwrap_err();
    assert!(err.is_cancelled());

    let session = service.player().unwrap().session();
    assert_eq!(session.disconnects(), 1);
    assert_eq!(session.frames().len(), 2 + SILENCE_FRAME_COUNT);
}
