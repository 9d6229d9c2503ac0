//! Terminal spinner shown while the model is generating

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Braille spinner frames for smooth animation
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Spinner update interval (ms)
const SPINNER_INTERVAL_MS: u64 = 120;

/// Spinner for showing thinking state
pub struct Spinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
    start_time: Instant,
    is_tty: bool,
}

impl Spinner {
    /// Start a new spinner with message
    pub fn new(message: &str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let is_tty = io::stdout().is_terminal();

        // Piped output: one plain line on stderr so stdout holds only answers
        if !is_tty {
            eprintln!("[sage]  ... {}", message);
            return Self {
                message: message.to_string(),
                running,
                handle: None,
                start_time: Instant::now(),
                is_tty: false,
            };
        }

        let running_clone = running.clone();
        let label = message.to_string();
        let handle = std::thread::spawn(move || {
            let mut frame = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!(
                    "\r{}  {} {}",
                    "[sage]".bright_cyan(),
                    SPINNER_FRAMES[frame].bright_yellow(),
                    label.dimmed()
                );
                let _ = io::stdout().flush();
                frame = (frame + 1) % SPINNER_FRAMES.len();
                std::thread::sleep(Duration::from_millis(SPINNER_INTERVAL_MS));
            }
        });

        Self {
            message: message.to_string(),
            running,
            handle: Some(handle),
            start_time: Instant::now(),
            is_tty,
        }
    }

    /// Stop spinner and clear its line
    pub fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        if self.is_tty {
            print!("\r{}\r", " ".repeat(80));
            let _ = io::stdout().flush();
        }

        debug!("{} took {} ms", self.message, self.start_time.elapsed().as_millis());
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}
