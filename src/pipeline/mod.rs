//! Reactive Pipeline
//!
//! Connects the layout engine to a frame loop.
//!
//! ```text
//! tree mutation → request_layout → request signal → scheduler effect → frame() → layout()
//! ```
//!
//! Mutations never lay out directly. They publish on the tree's request
//! signal; the scheduler's effect marks a frame as pending and the host's
//! frame loop runs the layout once per frame.

pub mod scheduler;

pub use scheduler::LayoutScheduler;
