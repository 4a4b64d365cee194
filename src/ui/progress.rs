use console::{style, Term};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const FRAME_INTERVAL: Duration = Duration::from_millis(80);

/// Spinner drawn on stderr while a blocking call runs. Stops when dropped.
///
/// Nothing is drawn when stderr is not a terminal.
pub struct Spinner {
    stopped: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    pub fn start(message: impl Into<String>) -> Self {
        let stopped = Arc::new(AtomicBool::new(false));
        let term = Term::stderr();
        if !term.is_term() {
            return Self {
                stopped,
                handle: None,
            };
        }

        let message = message.into();
        let flag = Arc::clone(&stopped);
        let handle = thread::spawn(move || {
            let mut frame = 0;
            while !flag.load(Ordering::SeqCst) {
                let _ = term.clear_line();
                let _ = term.write_str(&format!(
                    "{} {}",
                    style(FRAMES[frame % FRAMES.len()]).cyan(),
                    message
                ));
                frame += 1;
                thread::sleep(FRAME_INTERVAL);
            }
            let _ = term.clear_line();
        });

        Self {
            stopped,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some() && !self.stopped.load(Ordering::SeqCst)
    }

    pub fn stop(&mut self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.stop();
    }
}
