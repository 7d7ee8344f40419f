//! Copy-to-clipboard with a transient "copied" flag.
//!
//! Copy buttons show a confirmation for a short while after a successful
//! copy. [`ClipboardCopy`] raises the flag on every copy and clears it once
//! the delay has passed since the most recent copy.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::config::CopyOptions;
use crate::error::{Result, WeftError};

/// A clipboard backend.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// In-process clipboard, mostly for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|g| g.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| WeftError::Clipboard("clipboard lock poisoned".to_string()))?;
        *guard = Some(text.to_string());
        Ok(())
    }
}

/// Clipboard writer with a self-clearing `copied` flag.
pub struct ClipboardCopy<C: Clipboard> {
    backend: C,
    reset_after: Duration,
    copied: Arc<AtomicBool>,
    /// Bumped on every copy; a timer only clears the flag for its own copy.
    generation: Arc<AtomicU64>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl<C: Clipboard> ClipboardCopy<C> {
    pub fn new(backend: C) -> Self {
        Self::with_options(backend, CopyOptions::default())
    }

    pub fn with_options(backend: C, options: CopyOptions) -> Self {
        Self {
            backend,
            reset_after: options.reset_after(),
            copied: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            timer: Mutex::new(None),
        }
    }

    pub fn backend(&self) -> &C {
        &self.backend
    }

    /// Whether a copy happened within the reset delay.
    pub fn copied(&self) -> bool {
        self.copied.load(Ordering::SeqCst)
    }

    /// Write `text` and raise the flag, restarting the reset delay.
    ///
    /// Without a tokio runtime the flag stays raised until [`reset`](Self::reset).
    pub fn copy(&self, text: &str) -> Result<()> {
        self.backend.write_text(text)?;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.copied.store(true, Ordering::SeqCst);
        self.restart_timer(generation);
        Ok(())
    }

    /// Lower the flag now and cancel any pending reset.
    pub fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_timer();
        self.copied.store(false, Ordering::SeqCst);
    }

    fn cancel_timer(&self) {
        if let Ok(mut guard) = self.timer.lock()
            && let Some(handle) = guard.take()
        {
            handle.abort();
        }
    }

    fn restart_timer(&self, generation: u64) {
        self.cancel_timer();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("[clipboard] no tokio runtime; copied flag will not auto-reset");
            return;
        };

        let copied = Arc::clone(&self.copied);
        let current = Arc::clone(&self.generation);
        let delay = self.reset_after;
        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if current.load(Ordering::SeqCst) == generation {
                copied.store(false, Ordering::SeqCst);
            }
        });

        if let Ok(mut guard) = self.timer.lock() {
            *guard = Some(handle);
        }
    }
}

impl<C: Clipboard> Drop for ClipboardCopy<C> {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

impl<C: Clipboard + std::fmt::Debug> std::fmt::Debug for ClipboardCopy<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClipboardCopy")
            .field("backend", &self.backend)
            .field("reset_after", &self.reset_after)
            .field("copied", &self.copied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl Clipboard for Broken {
        fn write_text(&self, _text: &str) -> Result<()> {
            Err(WeftError::Clipboard("denied".to_string()))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_flag_clears_after_delay() {
        let copy = ClipboardCopy::new(MemoryClipboard::new());
        copy.copy("hello").unwrap();
        assert!(copy.copied());
        assert_eq!(copy.backend().contents(), Some("hello".to_string()));

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert!(!copy.copied());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_copy_restarts_delay() {
        let copy = ClipboardCopy::new(MemoryClipboard::new());
        copy.copy("a").unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;

        copy.copy("b").unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(copy.copied());

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert!(!copy.copied());
    }

    #[test]
    fn test_failed_write_leaves_flag_down() {
        let copy = ClipboardCopy::new(Broken);
        assert!(copy.copy("x").is_err());
        assert!(!copy.copied());
    }

    #[test]
    fn test_without_runtime_flag_stays_until_reset() {
        let copy = ClipboardCopy::new(MemoryClipboard::new());
        copy.copy("x").unwrap();
        assert!(copy.copied());
        copy.reset();
        assert!(!copy.copied());
    }
}
