use anyhow::{Context, Result};
use tokio::runtime::{Builder, Handle, Runtime};

/// Owns the tokio runtime that request tasks are spawned on. Dropping it
/// shuts down whatever requests are still in flight.
pub struct BackendRuntime {
    runtime: Runtime,
}

impl BackendRuntime {
    pub fn start() -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("converter-backend")
            .enable_all()
            .build()
            .context("backend worker startup failure: failed to build runtime")?;
        tracing::debug!("backend runtime started");
        Ok(Self { runtime })
    }

    pub fn handle(&self) -> Handle {
        self.runtime.handle().clone()
    }
}
