//! Manages multiple independent router instances in a single process
//! (spec.md §1, §5 "no cross-router shared state"). Each router gets its
//! own [`RouterContext`] and its own [`ArpWorker`] thread; tearing down a
//! handle or the manager always stops its worker thread first.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::RouterConfig;
use crate::context::{FrameSink, RouterContext};
use crate::worker::ArpWorker;

/// A running router instance: its shared context plus the worker thread
/// keeping its ARP state alive. Dropping a handle stops the worker.
pub struct RouterHandle {
    pub ctx: Arc<RouterContext>,
    worker: ArpWorker,
}

impl RouterHandle {
    pub fn process_frame(&self, frame: crate::frame::InboundFrame<'_>) -> crate::error::ProcessOutcome {
        crate::classifier::process_frame(&self.ctx, frame)
    }

    pub fn shutdown(&mut self) {
        self.worker.shutdown();
    }
}

/// Owns a set of named router instances.
#[derive(Default)]
pub struct RouterManager {
    routers: HashMap<String, RouterHandle>,
}

impl RouterManager {
    pub fn new() -> Self {
        Self {
            routers: HashMap::new(),
        }
    }

    /// Constructs a router from `config`, starts its ARP worker thread at
    /// the configured retry interval, and registers it under `name`.
    pub fn spawn_router(
        &mut self,
        name: impl Into<String>,
        config: RouterConfig,
        sink: Arc<dyn FrameSink>,
    ) -> &RouterHandle {
        let name = name.into();
        let interval = config.worker.retry_interval;
        let ctx = Arc::new(RouterContext::new(name.clone(), config, sink));
        let worker = ArpWorker::spawn(Arc::clone(&ctx), interval);

        self.routers.insert(name.clone(), RouterHandle { ctx, worker });
        self.routers.get(&name).unwrap()
    }

    pub fn router(&self, name: &str) -> Option<&RouterHandle> {
        self.routers.get(name)
    }

    /// Shuts down and removes every router's worker thread.
    pub fn shutdown_all(&mut self) {
        for handle in self.routers.values_mut() {
            handle.shutdown();
        }
    }
}
