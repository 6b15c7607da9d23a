//! Transport collaborator boundary.
//!
//! How render tasks reach the renderer (HTTP, IPC, files) is outside this
//! crate; the compiler only asks for the next task. One fetch corresponds
//! to one render.

use std::collections::VecDeque;

use anyhow::Result;
use plotforge_protocol::RenderTask;

/// Source of render tasks, one per render round trip.
pub trait TaskSource {
    fn fetch_render_task(&mut self) -> Result<RenderTask>;
}

/// In-memory task source for tests and local drivers.
#[derive(Debug, Default)]
pub struct QueuedTasks {
    queue: VecDeque<RenderTask>,
}

impl QueuedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, task: RenderTask) {
        self.queue.push_back(task);
    }
}

impl TaskSource for QueuedTasks {
    fn fetch_render_task(&mut self) -> Result<RenderTask> {
        self.queue
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("no pending render task"))
    }
}
