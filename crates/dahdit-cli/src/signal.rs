//! Ctrl-C handling.
//!
//! An interrupt prints a short message and exits with status 0 instead of
//! the signal's default non-zero status. Exiting skips destructors, so
//! temporary files that must not outlive the process are registered with a
//! [`CleanupGuard`] and removed by the handler before it exits.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Message printed when the user interrupts.
pub const EXIT_MESSAGE: &str = "Exiting ... ";

static PENDING_CLEANUP: Mutex<Vec<PathBuf>> = Mutex::new(Vec::new());

fn pending() -> MutexGuard<'static, Vec<PathBuf>> {
    PENDING_CLEANUP
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Keeps a file registered for removal on interrupt while alive.
#[derive(Debug)]
pub struct CleanupGuard {
    path: PathBuf,
}

impl CleanupGuard {
    /// Registers `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        pending().push(path.clone());
        Self { path }
    }

    /// The registered path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let mut paths = pending();
        if let Some(index) = paths.iter().position(|p| *p == self.path) {
            paths.swap_remove(index);
        }
    }
}

/// Removes every registered file and returns how many were deleted.
pub fn run_cleanup() -> usize {
    let paths = std::mem::take(&mut *pending());
    paths.iter().filter(|p| fs::remove_file(p).is_ok()).count()
}

/// Spawns a background thread that waits for SIGINT and exits cleanly.
pub fn install_interrupt_handler() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build signal runtime")?;

    std::thread::Builder::new()
        .name("dahdit-sigint".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if let Ok(()) = tokio::signal::ctrl_c().await {
                    run_cleanup();
                    eprintln!();
                    eprintln!("{}", EXIT_MESSAGE);
                    std::process::exit(0);
                }
            });
        })
        .context("Failed to spawn signal thread")?;

    Ok(())
}
