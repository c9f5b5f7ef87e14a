//! Runtime abstraction layer for async operations
//!
//! Map search itself is synchronous; the only asynchronous work is waiting
//! on the device location service. This module lets that wait run on
//! whatever runtime the host application provides.

use crate::prelude::{Future, Pin};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Box<dyn AsyncHandle>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Convenience function for spawning with type safety
pub fn spawn<F>(future: F) -> Box<dyn AsyncHandle>
where
    F: Future<Output = ()> + Send + 'static,
{
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;
    use crate::prelude::Arc;
    use futures::future::{abortable, AbortHandle};
    use std::sync::atomic::{AtomicBool, Ordering};

    /// Drives each future on its own OS thread.
    /// Used when no async runtime is available, so `spawn` never blocks
    /// the caller.
    pub struct ThreadSpawner;

    impl AsyncSpawner for ThreadSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Box<dyn AsyncHandle> {
            let (task, abort) = abortable(future);
            let finished = Arc::new(AtomicBool::new(false));
            let done = Arc::clone(&finished);

            let spawned = std::thread::Builder::new()
                .name("staymap-task".to_string())
                .spawn(move || {
                    if futures::executor::block_on(task).is_err() {
                        log::debug!("background task cancelled");
                    }
                    done.store(true, Ordering::Release);
                });

            // On failure the closure, and the future inside it, is dropped here
            if let Err(err) = spawned {
                log::error!("failed to start background task thread: {}", err);
                finished.store(true, Ordering::Release);
            }

            Box::new(ThreadHandle { finished, abort })
        }
    }

    struct ThreadHandle {
        finished: Arc<AtomicBool>,
        abort: AbortHandle,
    }

    impl AsyncHandle for ThreadHandle {
        fn is_finished(&self) -> bool {
            self.finished.load(Ordering::Acquire)
        }

        fn cancel(&self) {
            self.abort.abort();
        }
    }

    #[cfg(feature = "tokio-runtime")]
    pub mod tokio_impl {
        use super::*;
        use ::tokio::task::JoinHandle;

        /// Tokio-based async spawner. Outside a tokio context it falls back
        /// to a dedicated thread.
        pub struct TokioSpawner;

        impl AsyncSpawner for TokioSpawner {
            fn spawn_boxed(
                &self,
                future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
            ) -> Box<dyn AsyncHandle> {
                match ::tokio::runtime::Handle::try_current() {
                    Ok(handle) => Box::new(TokioHandle(handle.spawn(future))),
                    Err(_) => {
                        log::debug!("no tokio runtime in scope, running task on its own thread");
                        ThreadSpawner.spawn_boxed(future)
                    }
                }
            }
        }

        struct TokioHandle(JoinHandle<()>);

        impl AsyncHandle for TokioHandle {
            fn is_finished(&self) -> bool {
                self.0.is_finished()
            }

            fn cancel(&self) {
                self.0.abort();
            }
        }
    }
}

/// Global runtime instance
static RUNTIME: once_cell::sync::OnceCell<Box<dyn AsyncSpawner>> = once_cell::sync::OnceCell::new();

/// Initialize the runtime with a specific spawner. Only the first call wins;
/// returns `false` if a spawner was already installed.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) -> bool {
    if RUNTIME.set(spawner).is_err() {
        log::warn!("async runtime already initialized, keeping the existing spawner");
        return false;
    }
    true
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME.get_or_init(default_spawner).as_ref()
}

fn default_spawner() -> Box<dyn AsyncSpawner> {
    #[cfg(feature = "tokio-runtime")]
    return Box::new(spawners::tokio_impl::TokioSpawner);

    #[cfg(not(feature = "tokio-runtime"))]
    return Box::new(spawners::ThreadSpawner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn wait_until(flag: impl Fn() -> bool) -> bool {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if flag() {
                return true;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_thread_spawner_runs_off_caller() {
        let ran = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&ran);
        let handle = spawners::ThreadSpawner.spawn_boxed(Box::pin(async move {
            flag.store(true, Ordering::SeqCst);
        }));
        assert!(wait_until(|| handle.is_finished()));
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_thread_spawner_returns_before_pending_future() {
        let started = Instant::now();
        let handle = spawners::ThreadSpawner.spawn_boxed(Box::pin(futures::future::pending::<()>()));
        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(!handle.is_finished());

        handle.cancel();
        assert!(wait_until(|| handle.is_finished()));
    }

    #[test]
    fn test_second_init_is_rejected() {
        // Whichever spawner got installed first, a later one is refused
        runtime();
        assert!(!init_runtime(Box::new(spawners::ThreadSpawner)));
    }

    #[cfg(feature = "tokio-runtime")]
    #[::tokio::test]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        });

        // Should not be finished immediately
        assert!(!handle.is_finished());

        // Wait a bit and check again
        ::tokio::time::sleep(::tokio::time::Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }
}
