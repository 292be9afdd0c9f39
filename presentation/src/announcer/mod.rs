//! Console announcer
//!
//! Implements [`Announcer`] by printing announcements to a writer (stdout in
//! the CLI). Delayed announcements are scheduled on the current tokio runtime
//! so the caller never waits for the reveal pause.

use colored::Colorize;
use serde_json::json;
use showrunner_application::Announcer;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Announcer that prints to the console
#[derive(Clone)]
pub struct ConsoleAnnouncer {
    writer: SharedWriter,
    json: bool,
}

impl ConsoleAnnouncer {
    /// Print to stdout, as colored text or JSON lines
    pub fn stdout(json: bool) -> Self {
        Self::with_writer(Box::new(io::stdout()), json)
    }

    pub fn with_writer(writer: Box<dyn Write + Send>, json: bool) -> Self {
        Self {
            writer: Arc::new(Mutex::new(writer)),
            json,
        }
    }

    fn render(&self, text: &str) -> String {
        if self.json {
            json!({ "announcement": text }).to_string()
        } else {
            format!("{} {}", "📣".bold(), text.bold())
        }
    }

    fn emit(writer: &SharedWriter, line: &str) {
        let Ok(mut writer) = writer.lock() else {
            warn!("Announcer writer lock poisoned, dropping announcement");
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Failed to deliver announcement: {}", e);
        }
    }
}

impl Announcer for ConsoleAnnouncer {
    fn announce(&self, text: &str) {
        Self::emit(&self.writer, &self.render(text));
    }

    fn announce_after_delay(&self, text: &str, delay: Duration) {
        let line = self.render(text);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let writer = Arc::clone(&self.writer);
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    Self::emit(&writer, &line);
                });
            }
            Err(_) => {
                warn!("No async runtime for delayed announcement, delivering now");
                Self::emit(&self.writer, &line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_announce_json_line() {
        let buffer = SharedBuffer::default();
        let announcer = ConsoleAnnouncer::with_writer(Box::new(buffer.clone()), true);

        announcer.announce("Bob has been evicted");

        assert_eq!(
            buffer.contents(),
            "{\"announcement\":\"Bob has been evicted\"}\n"
        );
    }

    #[test]
    fn test_delay_without_runtime_delivers_immediately() {
        let buffer = SharedBuffer::default();
        let announcer = ConsoleAnnouncer::with_writer(Box::new(buffer.clone()), true);

        announcer.announce_after_delay("The winner is...", Duration::from_secs(3));

        assert!(buffer.contents().contains("The winner is..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_announcement_waits() {
        let buffer = SharedBuffer::default();
        let announcer = ConsoleAnnouncer::with_writer(Box::new(buffer.clone()), true);

        announcer.announce_after_delay("Alice wins season 1", Duration::from_secs(3));
        tokio::task::yield_now().await;
        assert!(buffer.contents().is_empty());

        tokio::time::sleep(Duration::from_secs(3)).await;
        tokio::task::yield_now().await;
        assert!(buffer.contents().contains("Alice wins season 1"));
    }
}
