//! Test doubles for service playback.

#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use scream_encoding::{Completion, EncodeError, EncodeResult, EncodedFrames, FrameEncoder};
use scream_service::ServiceConfig;
use scream_voice::{TransportError, VoiceConnection, VoiceSession, VoiceState};
use tokio::sync::mpsc;

/// Short, deterministic config so tests stay fast.
pub fn quick_config() -> ServiceConfig {
    ServiceConfig {
        preset: Some("classic".into()),
        duration: Some(Duration::from_millis(200)),
        ..ServiceConfig::default()
    }
}

/// Voice session recording what the player did.
#[derive(Default)]
pub struct RecordingSession {
    pub join_error: Option<&'static str>,
    joins: Arc<Mutex<Vec<(String, String)>>>,
    sink: Arc<Mutex<Option<mpsc::Receiver<Vec<u8>>>>>,
    disconnects: Arc<Mutex<usize>>,
}

impl RecordingSession {
    pub fn failing_join(err: &'static str) -> Self {
        Self {
            join_error: Some(err),
            ..Self::default()
        }
    }

    pub fn joins(&self) -> Vec<(String, String)> {
        self.joins.lock().unwrap().clone()
    }

    /// Frames pushed into the most recent connection.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        if let Some(rx) = self.sink.lock().unwrap().as_mut() {
            while let Ok(frame) = rx.try_recv() {
                frames.push(frame);
            }
        }
        frames
    }

    pub fn disconnects(&self) -> usize {
        *self.disconnects.lock().unwrap()
    }
}

impl VoiceSession for RecordingSession {
    type Connection = RecordingConnection;

    fn join(
        &self,
        guild_id: &str,
        channel_id: &str,
        _mute: bool,
        _deaf: bool,
    ) -> Result<RecordingConnection, TransportError> {
        self.joins
            .lock()
            .unwrap()
            .push((guild_id.to_string(), channel_id.to_string()));
        if let Some(err) = self.join_error {
            return Err(err.into());
        }

        let (tx, rx) = mpsc::channel(4096);
        *self.sink.lock().unwrap() = Some(rx);
        Ok(RecordingConnection {
            tx,
            disconnects: Arc::clone(&self.disconnects),
        })
    }

    fn guild_voice_states(&self, _guild_id: &str) -> Result<Vec<VoiceState>, TransportError> {
        Ok(Vec::new())
    }
}

pub struct RecordingConnection {
    tx: mpsc::Sender<Vec<u8>>,
    disconnects: Arc<Mutex<usize>>,
}

impl VoiceConnection for RecordingConnection {
    fn speaking(&self, _speaking: bool) -> Result<(), TransportError> {
        Ok(())
    }

    fn opus_sender(&self) -> mpsc::Sender<Vec<u8>> {
        self.tx.clone()
    }

    fn disconnect(&self) -> Result<(), TransportError> {
        *self.disconnects.lock().unwrap() += 1;
        Ok(())
    }
}

/// Frame encoder emitting fixed frames, then a scripted result.
pub struct ScriptedFrames {
    pub count: usize,
    pub result: fn() -> EncodeResult<()>,
    /// Keep the frame stream open after the last frame.
    pub stall: bool,
    held: Mutex<Option<mpsc::Sender<Vec<u8>>>>,
}

impl ScriptedFrames {
    pub fn ok(count: usize) -> Self {
        Self::new(count, || Ok(()), false)
    }

    pub fn failing(count: usize) -> Self {
        Self::new(count, || Err(EncodeError::WorkerLost), false)
    }

    pub fn stalled(count: usize) -> Self {
        Self::new(count, || Ok(()), true)
    }

    fn new(count: usize, result: fn() -> EncodeResult<()>, stall: bool) -> Self {
        Self {
            count,
            result,
            stall,
            held: Mutex::new(None),
        }
    }
}

impl FrameEncoder for ScriptedFrames {
    fn encode_frames(
        &self,
        _src: Box<dyn Read + Send>,
        _sample_rate: u32,
        _channels: u16,
    ) -> EncodedFrames {
        let (tx, frames) = mpsc::channel(self.count.max(1));
        for i in 0..self.count {
            tx.try_send(vec![i as u8; 12]).unwrap();
        }
        if self.stall {
            *self.held.lock().unwrap() = Some(tx);
        }
        EncodedFrames {
            frames,
            completion: Completion::ready((self.result)()),
        }
    }
}
