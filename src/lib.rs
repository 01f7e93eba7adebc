//! # spark-flex
//!
//! Incremental flexbox layout for retained scene graphs.
//!
//! ## Architecture
//!
//! Nodes live in one arena ([`FlexTree`]) and are addressed by [`NodeId`].
//! Each node carries its host data (children, visibility, source geometry)
//! and a layout target (flex configs, recalc bits, resolved geometry).
//!
//! Mutations only mark dirty bits. A change travels up the flex-parent chain
//! as long as it may change an ancestor's size, then issues one layout
//! request. [`FlexTree::layout`] lays out the highest dirty container of each
//! request:
//! ```text
//! mutation → recalc bits → bottom-up propagation → request → layout()
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Flex enums, geometry, recalc flags
//! - [`engine`] - Node arena, enablement, dirty propagation
//! - [`layout`] - Container/item configs and the flex pass
//! - [`pipeline`] - Reactive frame scheduling on spark-signals
//!
//! ## Example
//!
//! ```
//! use spark_flex::{FlexTree, JustifyContent};
//!
//! let mut tree = FlexTree::new();
//! let root = tree.create_node();
//! tree.set_container_enabled(root, true).unwrap();
//! tree.set_source_w(root, 100.0).unwrap();
//! tree.update_container(root, |c| c.justify_content = JustifyContent::Center).unwrap();
//!
//! let item = tree.create_node();
//! tree.set_parent(item, Some(root)).unwrap();
//! tree.set_source_w(item, 20.0).unwrap();
//! tree.set_source_h(item, 10.0).unwrap();
//!
//! tree.layout();
//! assert_eq!(tree.layout_geometry(item).unwrap().x, 40.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{LayoutConfig, LayoutFlags};
pub use engine::{AxisFn, FlexTree, LayoutTarget, NodeId, SceneNode};
pub use error::{Result, TreeError};
pub use layout::{get_spacing, reference_layout, Distribution, FlexContainer, FlexItem, Spacing};
pub use pipeline::LayoutScheduler;
