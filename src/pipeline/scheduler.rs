//! Layout Scheduler - coalesces layout requests into frames.
//!
//! An effect observes the tree's request counter and flags a pending frame.
//! Any number of requests between two frames cost one layout run.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use spark_signals::effect;

use crate::engine::FlexTree;

pub struct LayoutScheduler {
    pending: Rc<Cell<bool>>,
    frames: u64,
    stop: Option<Box<dyn FnOnce()>>,
}

impl LayoutScheduler {
    /// Start observing a tree's layout requests.
    ///
    /// The effect runs once on creation, so the first frame always lays out.
    pub fn new(tree: &FlexTree) -> Self {
        let requests = tree.layout_request_signal();
        let pending = Rc::new(Cell::new(false));

        let flag = pending.clone();
        let stop = effect(move || {
            // Read the counter (creates dependency)
            let _ = requests.get();
            flag.set(true);
        });

        Self {
            pending,
            frames: 0,
            stop: Some(Box::new(stop)),
        }
    }

    /// Whether requests arrived since the last frame.
    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Number of frames that ran a layout.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run the pending layout work, if any. Returns whether layout ran.
    pub fn frame(&mut self, tree: &mut FlexTree) -> bool {
        if !self.pending.replace(false) {
            return false;
        }
        let roots = tree.layout();
        self.frames += 1;
        debug!("frame {}: {roots} layout roots", self.frames);
        true
    }

    /// Stop observing the tree.
    pub fn stop(mut self) {
        self.dispose();
    }

    fn dispose(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop();
        }
    }
}

impl Drop for LayoutScheduler {
    fn drop(&mut self) {
        self.dispose();
    }
}
