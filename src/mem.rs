//! Periodic allocator release.
//!
//! File content and intermediate pipeline buffers can be large, and glibc's
//! malloc does not always return freed pages to the OS on its own. The
//! driver calls [`release_transient`] every few processed records to keep
//! peak RSS near one file's working set. Resource hygiene only — skipping
//! it never affects correctness.

/// Ask the allocator to return free pages to the OS.
#[cfg(all(target_os = "linux", target_env = "gnu"))]
pub fn release_transient() {
    unsafe {
        libc::malloc_trim(0);
    }
}

/// No-op on platforms without `malloc_trim`.
#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
pub fn release_transient() {}
