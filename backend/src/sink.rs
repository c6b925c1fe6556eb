//! Where outgoing messages go
//!
//! The driver and the command handler never talk to a transport directly;
//! they hand every [`ServerMessage`] to an [`EventSink`]. The binary writes
//! JSON lines to stdout, and tests collect messages in memory.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::error;

use crate::protocol::ServerMessage;

pub trait EventSink: Send + Sync {
    fn emit(&self, message: ServerMessage);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, message: ServerMessage) {
        (**self).emit(message)
    }
}

/// Writes one JSON object per line
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        JsonLinesSink {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn emit(&self, message: ServerMessage) {
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                error!("[SINK] failed to encode message: {}", e);
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            error!("[SINK] failed to write message: {}", e);
        }
    }
}

/// Keeps every message in memory
#[derive(Default)]
pub struct CollectingSink {
    messages: Mutex<Vec<ServerMessage>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far
    pub fn take(&self) -> Vec<ServerMessage> {
        std::mem::take(&mut *self.messages.lock())
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, message: ServerMessage) {
        self.messages.lock().push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_lines_one_message_per_line() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.emit(ServerMessage::CancelAck {
            game_id: "AAAAAA".into(),
        });
        sink.emit(ServerMessage::Error {
            message: "bad".into(),
        });

        let text = String::from_utf8(sink.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], r#"{"type":"cancelack","gameId":"AAAAAA"}"#);
    }

    #[test]
    fn test_collecting_sink_take_drains() {
        let sink = Arc::new(CollectingSink::new());
        let shared: Arc<dyn EventSink> = sink.clone();
        shared.emit(ServerMessage::Error {
            message: "x".into(),
        });

        assert_eq!(sink.len(), 1);
        assert_eq!(sink.take().len(), 1);
        assert!(sink.is_empty(), "take() leaves the sink empty");
    }
}
