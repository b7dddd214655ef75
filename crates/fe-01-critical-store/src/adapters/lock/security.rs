//! # Lock Security
//!
//! Stale-lock detection for data directories left behind by a crashed
//! process.

use std::path::Path;

/// Maximum number of stale-lock cleanups attempted in one acquisition.
pub const MAX_STALE_RECLAIMS: u32 = 1;

/// Checks if a process with the given PID is still running.
pub fn is_process_running(pid: u32) -> bool {
    #[cfg(unix)]
    {
        Path::new(&format!("/proc/{}", pid)).exists()
    }

    #[cfg(not(unix))]
    {
        // Without /proc, assume the holder is alive.
        let _ = pid;
        true
    }
}

/// PID recorded in an existing lock file.
pub fn read_holder_pid(lock_path: &Path) -> Option<u32> {
    std::fs::read_to_string(lock_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
}
