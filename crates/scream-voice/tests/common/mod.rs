//! In-memory voice transport for protocol tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use scream_voice::{TransportError, VoiceConnection, VoiceSession, VoiceState};
use tokio::sync::mpsc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Join {
        guild: String,
        channel: String,
        mute: bool,
        deaf: bool,
    },
    /// `frames_sent` counts frames already in the sink when the flag changed.
    Speaking { on: bool, frames_sent: usize },
    Disconnect,
}

/// What the mock transport should do.
#[derive(Debug, Clone)]
pub struct Script {
    pub join_error: Option<&'static str>,
    pub speaking_on_error: Option<&'static str>,
    pub disconnect_error: Option<&'static str>,
    pub states: Vec<VoiceState>,
    pub states_error: Option<&'static str>,
    pub sink_capacity: usize,
    /// Drop the sink's receiving end right after joining.
    pub close_sink: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            join_error: None,
            speaking_on_error: None,
            disconnect_error: None,
            states: Vec::new(),
            states_error: None,
            sink_capacity: 64,
            close_sink: false,
        }
    }
}

pub struct MockSession {
    script: Script,
    log: Arc<Mutex<Vec<Event>>>,
    sink: Arc<Mutex<Option<mpsc::Receiver<Vec<u8>>>>>,
}

impl MockSession {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            log: Arc::default(),
            sink: Arc::default(),
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn joined(&self) -> bool {
        self.events()
            .iter()
            .any(|e| matches!(e, Event::Join { .. }))
    }

    /// Everything the player pushed into the sink, in order.
    pub fn sent_frames(&self) -> Vec<Vec<u8>> {
        let mut frames = Vec::new();
        if let Some(rx) = self.sink.lock().unwrap().as_mut() {
            while let Ok(frame) = rx.try_recv() {
                frames.push(frame);
            }
        }
        frames
    }
}

impl VoiceSession for MockSession {
    type Connection = MockConnection;

    fn join(
        &self,
        guild_id: &str,
        channel_id: &str,
        mute: bool,
        deaf: bool,
    ) -> Result<MockConnection, TransportError> {
        self.log.lock().unwrap().push(Event::Join {
            guild: guild_id.to_string(),
            channel: channel_id.to_string(),
            mute,
            deaf,
        });
        if let Some(err) = self.script.join_error {
            return Err(err.into());
        }

        let (tx, rx) = mpsc::channel(self.script.sink_capacity);
        if !self.script.close_sink {
            *self.sink.lock().unwrap() = Some(rx);
        }
        Ok(MockConnection {
            tx,
            capacity: self.script.sink_capacity,
            script: self.script.clone(),
            log: Arc::clone(&self.log),
        })
    }

    fn guild_voice_states(&self, _guild_id: &str) -> Result<Vec<VoiceState>, TransportError> {
        match self.script.states_error {
            Some(err) => Err(err.into()),
            None => Ok(self.script.states.clone()),
        }
    }
}

pub struct MockConnection {
    tx: mpsc::Sender<Vec<u8>>,
    capacity: usize,
    script: Script,
    log: Arc<Mutex<Vec<Event>>>,
}

impl VoiceConnection for MockConnection {
    fn speaking(&self, on: bool) -> Result<(), TransportError> {
        let frames_sent = self.capacity - self.tx.capacity();
        self.log
            .lock()
            .unwrap()
            .push(Event::Speaking { on, frames_sent });
        match self.script.speaking_on_error {
            Some(err) if on => Err(err.into()),
            _ => Ok(()),
        }
    }

    fn opus_sender(&self) -> mpsc::Sender<Vec<u8>> {
        self.tx.clone()
    }

    fn disconnect(&self) -> Result<(), TransportError> {
        self.log.lock().unwrap().push(Event::Disconnect);
        match self.script.disconnect_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }
}

/// A closed frame stream holding `n` distinct data frames.
pub fn data_frames(n: usize) -> mpsc::Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel(n.max(1));
    for i in 0..n {
        tx.try_send(vec![i as u8; 20]).unwrap();
    }
    rx
}

pub fn voice_state(user: &str, channel: &str) -> VoiceState {
    VoiceState {
        user_id: user.to_string(),
        channel_id: channel.to_string(),
        guild_id: "guild".to_string(),
    }
}
