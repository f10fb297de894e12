//! Tokio Runtime Bridge
//!
//! Datasource fetches are futures; the cache session itself stays
//! synchronous and single-threaded. Fetches are spawned on a tokio runtime
//! and report back through a channel drained by the session's owner.
//!
//! ## Pattern
//!
//! ```text
//! InfiniteDataSource::load(block)
//!       │  (in-flight marker set first)
//!       ▼
//! spawn_named(handle, "fetch", async { datasource.get_rows(..).await })
//!       │
//!       ▼
//! crossbeam Sender<LoadCompletion>  ──►  drain_completions()
//! ```

use std::future::Future;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::error::Result;

/// Build the multi-threaded runtime fetches run on
pub fn build_runtime() -> Result<Runtime> {
    let runtime = Builder::new_multi_thread()
        .thread_name("grid-fetch")
        .enable_all()
        .build()?;
    Ok(runtime)
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named<F>(handle: &Handle, name: &'static str, future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::trace!("Spawning tokio task: {}", name);
    handle.spawn(async move {
        future.await;
        tracing::trace!("Tokio task completed: {}", name);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_named() {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        let runtime = build_runtime().expect("runtime");
        let flag = Arc::new(AtomicBool::new(false));
        let flag_clone = flag.clone();

        spawn_named(runtime.handle(), "flag", async move {
            flag_clone.store(true, Ordering::SeqCst);
        });

        // Give the task time to complete
        std::thread::sleep(std::time::Duration::from_millis(100));
        assert!(flag.load(Ordering::SeqCst));
    }
}
