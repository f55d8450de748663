//! Dedicated thread for 30-second preview playback. Owns the audio
//! output and writes position/finished updates back into shared state.

use std::{
    sync::{Arc, RwLock},
    time::Duration,
};

use crate::AppState;

pub enum PreviewMessage {
    Play { data: Vec<u8>, track_name: String },
    Toggle,
    Stop,
}

pub struct PreviewThread {
    tx: PreviewSendHandle,
    _handle: std::thread::JoinHandle<()>,
}

#[derive(Clone)]
pub struct PreviewSendHandle(std::sync::mpsc::Sender<PreviewMessage>);
impl PreviewSendHandle {
    pub fn send(&self, message: PreviewMessage) {
        // The thread only exits when the process does.
        let _ = self.0.send(message);
    }
}

impl PreviewThread {
    pub fn new(state: Arc<RwLock<AppState>>) -> Self {
        let (tx, rx) = std::sync::mpsc::channel::<PreviewMessage>();
        let handle = std::thread::spawn(move || Self::run(rx, state));
        Self {
            tx: PreviewSendHandle(tx),
            _handle: handle,
        }
    }

    pub fn send(&self, message: PreviewMessage) {
        self.tx.send(message);
    }

    pub fn sender(&self) -> PreviewSendHandle {
        self.tx.clone()
    }

    fn run(rx: std::sync::mpsc::Receiver<PreviewMessage>, state: Arc<RwLock<AppState>>) {
        let stream_handle = match rodio::OutputStreamBuilder::open_default_stream() {
            Ok(stream_handle) => stream_handle,
            Err(e) => {
                tracing::error!("failed to open audio output: {e}");
                let mut state = state.write().unwrap();
                state.preview.error = Some("Audio output unavailable".to_string());
                return;
            }
        };
        let sink = rodio::Sink::connect_new(stream_handle.mixer());
        sink.set_volume(1.0);

        fn build_decoder(
            data: Vec<u8>,
        ) -> Result<rodio::decoder::Decoder<std::io::Cursor<Vec<u8>>>, rodio::decoder::DecoderError>
        {
            rodio::decoder::DecoderBuilder::new()
                .with_byte_len(data.len() as u64)
                .with_data(std::io::Cursor::new(data))
                .build()
        }

        loop {
            // Process all available messages without blocking
            while let Ok(msg) = rx.try_recv() {
                match msg {
                    PreviewMessage::Play { data, track_name } => {
                        sink.clear();
                        match build_decoder(data) {
                            Ok(decoder) => {
                                sink.append(decoder);
                                sink.play();
                                let mut state = state.write().unwrap();
                                state.preview.track_name = Some(track_name);
                                state.preview.playing = true;
                                state.preview.position = Duration::ZERO;
                                state.preview.error = None;
                            }
                            Err(e) => {
                                tracing::warn!("failed to decode preview: {e}");
                                let mut state = state.write().unwrap();
                                state.preview.error =
                                    Some("Could not decode preview audio".to_string());
                                state.preview.playing = false;
                            }
                        }
                    }
                    PreviewMessage::Toggle => {
                        let playing = if sink.is_paused() && !sink.empty() {
                            sink.play();
                            true
                        } else {
                            sink.pause();
                            false
                        };
                        state.write().unwrap().preview.playing = playing && !sink.empty();
                    }
                    PreviewMessage::Stop => {
                        sink.clear();
                        let mut state = state.write().unwrap();
                        state.preview.playing = false;
                        state.preview.position = Duration::ZERO;
                        state.preview.track_name = None;
                    }
                }
            }

            {
                let mut state = state.write().unwrap();
                if sink.empty() && state.preview.playing {
                    // Preview ran to its end.
                    state.preview.playing = false;
                    state.preview.position = Duration::ZERO;
                } else if state.preview.playing {
                    state.preview.position = sink.get_pos();
                }
            }

            // Sleep for 10ms between iterations
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
    }
}
