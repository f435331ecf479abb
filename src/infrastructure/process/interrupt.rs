//! Ctrl-C handling.
//!
//! While the sync tool runs, an interrupt is recorded so the caller can abort
//! cleanly once the child exits. Outside of a sync, an interrupt ends the
//! process right away with the abort message.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use tracing::warn;

use crate::common::error::USER_ABORT_MSG;
use crate::common::style::{paint, Style};

static SYNC_RUNNING: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static INSTALL: Once = Once::new();

/// Install the process-wide Ctrl-C handler. Safe to call more than once.
pub fn install_handler() {
    INSTALL.call_once(|| {
        let installed = ctrlc::set_handler(|| {
            if SYNC_RUNNING.load(Ordering::SeqCst) {
                INTERRUPTED.store(true, Ordering::SeqCst);
            } else {
                eprintln!("{}", paint(Style::Fail, &format!("\n{}\n", USER_ABORT_MSG)));
                std::process::exit(130);
            }
        });
        if let Err(e) = installed {
            warn!("Could not install Ctrl-C handler: {}", e);
        }
    });
}

/// Mark the start of a sync subprocess
pub fn begin_sync() {
    INTERRUPTED.store(false, Ordering::SeqCst);
    SYNC_RUNNING.store(true, Ordering::SeqCst);
}

/// Mark the end of a sync subprocess; returns whether it was interrupted
pub fn end_sync() -> bool {
    SYNC_RUNNING.store(false, Ordering::SeqCst);
    INTERRUPTED.swap(false, Ordering::SeqCst)
}
