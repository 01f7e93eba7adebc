//! SceneNode - the host-side view of a node.
//!
//! This is the narrow interface the layout engine consumes from the render
//! tree: children, parent, visibility, source geometry with optional override
//! functions, and the resolved layout geometry the renderer reads back.

use std::rc::Rc;

use log::trace;

use super::{FlexTree, NodeId};
use crate::error::{Result, TreeError};
use crate::types::Geometry;

/// Override function of the parent's resolved axis size.
pub type AxisFn = Rc<dyn Fn(f32) -> f32>;

/// Host node data.
pub struct SceneNode {
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) visible: bool,

    /// Geometry the node has absent any flex parent.
    pub(crate) source: Geometry,
    pub(crate) func_x: Option<AxisFn>,
    pub(crate) func_y: Option<AxisFn>,
    pub(crate) func_w: Option<AxisFn>,
    pub(crate) func_h: Option<AxisFn>,

    /// Resolved geometry, as read by the renderer.
    pub(crate) layout: Geometry,

    /// Set while the node takes part in flex layout (as container or item).
    pub(crate) flex_managed: bool,
}

impl SceneNode {
    pub(crate) fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            visible: true,
            source: Geometry::default(),
            func_x: None,
            func_y: None,
            func_w: None,
            func_h: None,
            layout: Geometry::default(),
            flex_managed: false,
        }
    }
}

impl FlexTree {
    // =========================================================================
    // Structure
    // =========================================================================

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.check(id)?;
        Ok(self.node(id).scene.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        self.check(id)?;
        Ok(&self.node(id).scene.children)
    }

    /// Move `child` under `parent` (appended last), or detach it with `None`.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> Result<()> {
        self.check(child)?;
        if let Some(parent) = parent {
            self.check(parent)?;
            if parent == child {
                return Err(TreeError::SelfParent(child));
            }
            if self.config.check_cycles() && self.is_ancestor(child, parent) {
                return Err(TreeError::Cycle { child, parent });
            }
        }

        let from = self.node(child).scene.parent;
        if from == parent {
            return Ok(());
        }

        if let Some(from) = from {
            self.node_mut(from).scene.children.retain(|&c| c != child);
        }
        if let Some(to) = parent {
            self.node_mut(to).scene.children.push(child);
        }
        self.node_mut(child).scene.parent = parent;
        trace!("reparented {child:?}: {from:?} -> {parent:?}");

        self.on_reparent(child, from, parent);
        Ok(())
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.node(node).scene.parent;
        }
        false
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    pub fn is_visible(&self, id: NodeId) -> Result<bool> {
        self.check(id)?;
        Ok(self.node(id).scene.visible)
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.check(id)?;
        if self.node(id).scene.visible != visible {
            self.node_mut(id).scene.visible = visible;
            self.update_visible(id);
        }
        Ok(())
    }

    // =========================================================================
    // Source geometry
    // =========================================================================

    pub fn source(&self, id: NodeId) -> Result<Geometry> {
        self.check(id)?;
        Ok(self.node(id).scene.source)
    }

    pub fn set_source_x(&mut self, id: NodeId, x: f32) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.source.x = x;
        self.refresh_offsets(id);
        Ok(())
    }

    pub fn set_source_y(&mut self, id: NodeId, y: f32) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.source.y = y;
        self.refresh_offsets(id);
        Ok(())
    }

    pub fn set_source_w(&mut self, id: NodeId, w: f32) -> Result<()> {
        self.check(id)?;
        if self.node(id).scene.source.w != w {
            self.node_mut(id).scene.source.w = w;
            self.updated_source_w(id);
        }
        Ok(())
    }

    pub fn set_source_h(&mut self, id: NodeId, h: f32) -> Result<()> {
        self.check(id)?;
        if self.node(id).scene.source.h != h {
            self.node_mut(id).scene.source.h = h;
            self.updated_source_h(id);
        }
        Ok(())
    }

    /// Set all four source values at once.
    pub fn set_source(&mut self, id: NodeId, source: Geometry) -> Result<()> {
        self.set_source_x(id, source.x)?;
        self.set_source_y(id, source.y)?;
        self.set_source_w(id, source.w)?;
        self.set_source_h(id, source.h)
    }

    pub fn set_func_x(&mut self, id: NodeId, func: Option<AxisFn>) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.func_x = func;
        self.refresh_offsets(id);
        Ok(())
    }

    pub fn set_func_y(&mut self, id: NodeId, func: Option<AxisFn>) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.func_y = func;
        self.refresh_offsets(id);
        Ok(())
    }

    pub fn set_func_w(&mut self, id: NodeId, func: Option<AxisFn>) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.func_w = func;
        self.updated_source_w(id);
        Ok(())
    }

    pub fn set_func_h(&mut self, id: NodeId, func: Option<AxisFn>) -> Result<()> {
        self.check(id)?;
        self.node_mut(id).scene.func_h = func;
        self.updated_source_h(id);
        Ok(())
    }

    // =========================================================================
    // Resolved geometry
    // =========================================================================

    /// Geometry as seen by the renderer.
    pub fn layout_geometry(&self, id: NodeId) -> Result<Geometry> {
        self.check(id)?;
        Ok(self.node(id).scene.layout)
    }

    /// Whether the node currently takes part in flex layout.
    pub fn is_flex_managed(&self, id: NodeId) -> Result<bool> {
        self.check(id)?;
        Ok(self.node(id).scene.flex_managed)
    }

    /// Resolved size of the parent along an axis, the argument of the
    /// override functions.
    pub(crate) fn parent_axis_size(&self, id: NodeId, horizontal: bool) -> f32 {
        let Some(parent) = self.node(id).scene.parent else {
            return 0.0;
        };
        let parent = self.node(parent);
        if parent.target.container.is_some() {
            parent.target.geom.size(horizontal)
        } else {
            parent.scene.layout.size(horizontal)
        }
    }

    /// Source offset along an axis, honoring the override function.
    pub(crate) fn source_offset(&self, id: NodeId, horizontal: bool) -> f32 {
        let scene = &self.node(id).scene;
        let func = if horizontal { &scene.func_x } else { &scene.func_y };
        match func {
            Some(func) => func(self.parent_axis_size(id, horizontal)),
            None if horizontal => scene.source.x,
            None => scene.source.y,
        }
    }

    /// Whether the node has a size of its own along an axis.
    pub(crate) fn has_explicit_size(&self, id: NodeId, horizontal: bool) -> bool {
        let scene = &self.node(id).scene;
        let func = if horizontal { &scene.func_w } else { &scene.func_h };
        func.is_some() || scene.source.size(horizontal) > 0.0
    }

    /// Explicit size along an axis, or `None` when it fits its contents.
    pub(crate) fn explicit_size(&self, id: NodeId, horizontal: bool) -> Option<f32> {
        let scene = &self.node(id).scene;
        let func = if horizontal { &scene.func_w } else { &scene.func_h };
        match func {
            Some(func) => Some(func(self.parent_axis_size(id, horizontal))),
            None => {
                let size = scene.source.size(horizontal);
                (size > 0.0).then_some(size)
            }
        }
    }

    /// Write resolved geometry to the host node.
    ///
    /// Flex items are offset by their source position; other nodes keep their
    /// source position. Returns whether anything changed.
    pub(crate) fn apply_layout(&mut self, id: NodeId, x: f32, y: f32, w: f32, h: f32) -> bool {
        let source_x = self.source_offset(id, true);
        let source_y = self.source_offset(id, false);

        let mut layout = if self.node(id).target.role.is_item() {
            Geometry::new(x + source_x, y + source_y, w, h)
        } else {
            Geometry::new(source_x, source_y, w, h)
        };
        if self.config.round_layout() {
            layout = Geometry::new(layout.x.round(), layout.y.round(), layout.w.round(), layout.h.round());
        }

        let scene = &mut self.node_mut(id).scene;
        let changed = scene.layout != layout;
        scene.layout = layout;
        changed
    }

    /// Re-apply source offsets after x/y (or their functions) changed.
    fn refresh_offsets(&mut self, id: NodeId) {
        let node = self.node(id);
        if node.scene.flex_managed {
            let g = node.target.geom;
            self.apply_layout(id, g.x, g.y, g.w, g.h);
        } else {
            let x = self.source_offset(id, true);
            let y = self.source_offset(id, false);
            let layout = &mut self.node_mut(id).scene.layout;
            layout.x = x;
            layout.y = y;
        }
    }

    /// Restore the host geometry to its un-managed source values.
    pub(crate) fn restore_source_layout(&mut self, id: NodeId) {
        let x = self.source_offset(id, true);
        let y = self.source_offset(id, false);
        let w = self.explicit_size(id, true).unwrap_or(0.0);
        let h = self.explicit_size(id, false).unwrap_or(0.0);
        self.node_mut(id).scene.layout = Geometry::new(x, y, w, h);
    }
}
