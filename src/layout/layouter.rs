//! Per-container flex pass.
//!
//! # Algorithm
//!
//! 1. **Measure**: basis and natural cross size of every visible item
//!    (nested containers are measured under no constraints)
//! 2. **Wrap**: split items into lines against the definite main size
//! 3. **Resolve main axis**: grow/shrink per line
//! 4. **Nested containers**: lay out with their resolved main size
//! 5. **Position**: justify-content per line
//! 6. **Align**: align-content over lines, align-items per line
//! 7. **Mirror** reverse directions, write geometry
//!
//! # Caching
//!
//! A container without the CHANGED bit that is laid out again under the same
//! constraints returns its previous size without visiting its items.

use log::{debug, trace};
use taffy::geometry::Size;

use super::container::LayoutCache;
use super::content_aligner::ContentAligner;
use super::item::ItemState;
use super::line::build_lines;
use crate::engine::{FlexTree, NodeId};
use crate::types::{FlexBasis, FlexWrap, Geometry};

pub(crate) const UNCONSTRAINED: Size<Option<f32>> = Size { width: None, height: None };

// =============================================================================
// Axis helpers
// =============================================================================

pub(crate) fn axis<T: Copy>(size: Size<T>, horizontal: bool) -> T {
    if horizontal { size.width } else { size.height }
}

pub(crate) fn pack<T>(horizontal: bool, main: T, cross: T) -> Size<T> {
    if horizontal {
        Size { width: main, height: cross }
    } else {
        Size { width: cross, height: main }
    }
}

impl FlexTree {
    /// Lay out a container and its sub-tree.
    ///
    /// `avail` fixes the outer size on an axis; `None` means the explicit
    /// size, or fit to contents without one. Returns the resolved outer size.
    pub(crate) fn layout_container(&mut self, id: NodeId, avail: Size<Option<f32>>) -> Size<f32> {
        let Some(container) = self.node(id).target.container.clone() else {
            self.clear_recalc(id);
            return Size {
                width: avail.width.or_else(|| self.explicit_size(id, true)).unwrap_or(0.0),
                height: avail.height.or_else(|| self.explicit_size(id, false)).unwrap_or(0.0),
            };
        };

        if self.is_layout_reusable(id) {
            if let Some(cache) = container.cache.filter(|cache| cache.avail == avail) {
                trace!("layout cache hit for {id:?}");
                return cache.size;
            }
        } else if let Some(container) = self.node_mut(id).target.container.as_mut() {
            container.natural = None;
        }

        let horizontal = container.horizontal();
        let padding = container.padding;
        let main_padding = padding.sum(horizontal);
        let cross_padding = padding.sum(!horizontal);

        let own_main = axis(avail, horizontal).or_else(|| self.explicit_size(id, horizontal));
        let own_cross = axis(avail, !horizontal).or_else(|| self.explicit_size(id, !horizontal));
        let content_main = own_main.map(|size| (size - main_padding).max(0.0));
        let content_cross = own_cross.map(|size| (size - cross_padding).max(0.0));

        // Measure
        let ids = self.flex_items(id);
        let mut items: Vec<ItemState> = ids
            .iter()
            .map(|&item| self.measure_item(item, horizontal))
            .collect();

        // Wrap and resolve the main axis
        let mut lines = build_lines(&items, content_main, container.wrap.is_wrapping());
        let mut shrunk = false;
        for line in lines.iter_mut() {
            line.set_main_space(content_main, &items);
            shrunk |= line.resolve_main_axis(&mut items);
        }

        // Nested containers settle their cross size for the resolved main size
        for item in items.iter_mut().filter(|item| item.is_container) {
            self.layout_item_container(item, None);
        }

        let single_line = !container.wrap.is_wrapping();
        for line in lines.iter_mut() {
            line.cross_size = match content_cross {
                Some(cross) if single_line => cross,
                _ => line.natural_cross_size(&items),
            };
            line.set_item_positions(&mut items, container.justify_content);
        }

        // Align
        let mut aligner = ContentAligner::new(&container);
        aligner.init(&lines);
        let content_cross = content_cross.unwrap_or_else(|| aligner.total_cross_size());
        aligner.align(self, &mut lines, &mut items, content_cross);

        let content_main = content_main.unwrap_or_else(|| {
            lines
                .iter()
                .map(|line| line.main_used(&items))
                .fold(0.0, f32::max)
        });

        // Mirror
        let reverse = container.direction.is_reverse();
        let wrap_reverse = container.wrap == FlexWrap::WrapReverse;
        for item in items.iter_mut() {
            if reverse {
                item.main_pos = content_main - item.main_pos - item.main_size;
            }
            if wrap_reverse {
                item.cross_pos = content_cross - item.cross_pos - item.cross_size;
            }
        }

        // Write out
        for item in &items {
            let pos = pack(horizontal, item.main_pos, item.cross_pos);
            let size = pack(horizontal, item.main_size, item.cross_size);
            let geom = Geometry::new(
                padding.left + pos.width,
                padding.top + pos.height,
                size.width,
                size.height,
            );
            self.node_mut(item.id).target.geom = geom;
            self.apply_layout(item.id, geom.x, geom.y, geom.w, geom.h);
            if !item.is_container {
                self.clear_recalc(item.id);
            }
        }

        let size = pack(horizontal, content_main + main_padding, content_cross + cross_padding);
        if let Some(container) = self.node_mut(id).target.container.as_mut() {
            container.shrunk = shrunk;
            container.cache = Some(LayoutCache { avail, size });
            if avail == UNCONSTRAINED {
                container.natural = Some(size);
            }
        }
        self.clear_recalc(id);

        debug!(
            "laid out {id:?}: {} items in {} lines -> {}x{}{}",
            items.len(),
            lines.len(),
            size.width,
            size.height,
            if shrunk { " (shrunk)" } else { "" }
        );
        size
    }

    /// Whether a previous result of this node may be reused.
    fn is_layout_reusable(&self, id: NodeId) -> bool {
        let node = self.node(id);
        !node.target.is_changed() && node.scene.func_w.is_none() && node.scene.func_h.is_none()
    }

    /// Size of a container under no external constraints.
    fn measure_container(&mut self, id: NodeId) -> Size<f32> {
        if self.is_layout_reusable(id) {
            let natural = self.node(id).target.container.as_ref().and_then(|c| c.natural);
            if let Some(natural) = natural {
                return natural;
            }
        }
        self.layout_container(id, UNCONSTRAINED)
    }

    fn measure_item(&mut self, id: NodeId, horizontal: bool) -> ItemState {
        let config = self.node(id).target.item.clone().unwrap_or_default();
        let is_container = self.node(id).target.is_flex_enabled();

        let explicit_main = self.explicit_size(id, horizontal);
        let explicit_cross = self.explicit_size(id, !horizontal);
        let natural = match (explicit_main, explicit_cross) {
            (Some(main), Some(cross)) => pack(horizontal, main, cross),
            _ if is_container => self.measure_container(id),
            (main, cross) => pack(horizontal, main.unwrap_or(0.0), cross.unwrap_or(0.0)),
        };
        let natural_main = axis(natural, horizontal);

        let basis = match config.basis {
            FlexBasis::Auto => natural_main,
            FlexBasis::Fixed(basis) => basis,
        };
        let basis = config.clamp_size(basis, horizontal);
        let cross_size = config.clamp_size(axis(natural, !horizontal), !horizontal);

        ItemState {
            id,
            config,
            horizontal,
            basis,
            natural_main,
            cross_auto: explicit_cross.is_none(),
            is_container,
            main_size: basis,
            cross_size,
            main_pos: 0.0,
            cross_pos: 0.0,
        }
    }

    /// Lay out a nested container item for its resolved sizes.
    ///
    /// The main size is passed down only when flexing changed it. With
    /// `cross` unset the item's own cross size is taken (clamped). Returns
    /// whether the item's main size changed.
    pub(crate) fn layout_item_container(&mut self, item: &mut ItemState, cross: Option<f32>) -> bool {
        let horizontal = item.horizontal;
        let main = item.main_is_flexed().then_some(item.main_size);

        let mut size = self.layout_container(item.id, pack(horizontal, main, cross));
        if cross.is_none() {
            let natural_cross = axis(size, !horizontal);
            let clamped = item.config.clamp_size(natural_cross, !horizontal);
            if clamped != natural_cross {
                size = self.layout_container(item.id, pack(horizontal, main, Some(clamped)));
            }
            item.cross_size = clamped;
        }

        let new_main = axis(size, horizontal);
        let resized = main.is_none() && new_main != item.main_size;
        if resized {
            trace!("recursive resize of {:?}: {} -> {}", item.id, item.main_size, new_main);
            item.main_size = new_main;
            item.natural_main = new_main;
        }
        resized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edges, FlexDirection, JustifyContent};

    fn assert_close(actual: f32, expected: f32) {
        assert!((actual - expected).abs() < 0.01, "expected {expected}, got {actual}");
    }

    /// Fit-to-contents row container with three 10x10 leaves.
    fn setup() -> (FlexTree, NodeId, Vec<NodeId>) {
        let mut tree = FlexTree::new();
        let root = tree.create_node();
        tree.set_container_enabled(root, true).unwrap();

        let leaves = (0..3)
            .map(|_| {
                let leaf = tree.create_node();
                tree.set_parent(leaf, Some(root)).unwrap();
                tree.set_source_w(leaf, 10.0).unwrap();
                tree.set_source_h(leaf, 10.0).unwrap();
                leaf
            })
            .collect();
        (tree, root, leaves)
    }

    #[test]
    fn test_fit_to_contents_row() {
        let (mut tree, root, leaves) = setup();

        let size = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(size, Size { width: 30.0, height: 10.0 });
        assert_eq!(tree.resolved(leaves[2]).unwrap(), Geometry::new(20.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_padding_offsets_items() {
        let (mut tree, root, leaves) = setup();
        tree.update_container(root, |c| {
            c.direction = FlexDirection::Column;
            c.padding = Edges::new(1.0, 2.0, 3.0, 4.0);
        })
        .unwrap();

        let size = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(size, Size { width: 16.0, height: 34.0 });
        assert_eq!(tree.resolved(leaves[1]).unwrap(), Geometry::new(4.0, 11.0, 10.0, 10.0));
    }

    #[test]
    fn test_row_reverse_mirrors() {
        let (mut tree, root, leaves) = setup();
        tree.set_source_w(root, 100.0).unwrap();
        tree.update_container(root, |c| c.direction = FlexDirection::RowReverse).unwrap();

        tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(tree.resolved(leaves[0]).unwrap().x, 90.0);
        assert_eq!(tree.resolved(leaves[2]).unwrap().x, 70.0);
    }

    #[test]
    fn test_wrap_reverse_mirrors_lines() {
        let (mut tree, root, leaves) = setup();
        tree.set_source_w(root, 25.0).unwrap();
        tree.update_container(root, |c| c.wrap = FlexWrap::WrapReverse).unwrap();

        let size = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(size.height, 20.0);
        assert_eq!(tree.resolved(leaves[0]).unwrap().y, 10.0);
        assert_eq!(tree.resolved(leaves[2]).unwrap().y, 0.0);
    }

    #[test]
    fn test_cache_reuses_clean_container() {
        let (mut tree, root, leaves) = setup();
        let first = tree.layout_container(root, UNCONSTRAINED);

        // Tamper with a resolved child: a cache hit leaves it alone
        tree.node_mut(leaves[0]).target.geom.x = 99.0;
        let second = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(first, second);
        assert_eq!(tree.resolved(leaves[0]).unwrap().x, 99.0);

        let fixed = tree.layout_container(root, Size { width: Some(50.0), height: None });
        assert_eq!(fixed.width, 50.0);
        assert_eq!(tree.resolved(leaves[0]).unwrap().x, 0.0);
    }

    #[test]
    fn test_nested_container_is_stretched() {
        let mut tree = FlexTree::new();
        let root = tree.create_node();
        tree.set_container_enabled(root, true).unwrap();
        tree.set_source_w(root, 100.0).unwrap();
        tree.set_source_h(root, 40.0).unwrap();

        let column = tree.create_node();
        tree.set_parent(column, Some(root)).unwrap();
        tree.set_container_enabled(column, true).unwrap();
        tree.update_container(column, |c| c.direction = FlexDirection::Column).unwrap();
        tree.update_item(column, |i| i.grow = 1.0).unwrap();

        let leaf = tree.create_node();
        tree.set_parent(leaf, Some(column)).unwrap();
        tree.set_source_h(leaf, 10.0).unwrap();

        tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(tree.resolved(column).unwrap(), Geometry::new(0.0, 0.0, 100.0, 40.0));
        // Stretched across the column's cross axis
        assert_eq!(tree.resolved(leaf).unwrap(), Geometry::new(0.0, 0.0, 100.0, 10.0));
        assert!(tree.recalc(leaf).unwrap().is_empty());
        assert!(tree.recalc(column).unwrap().is_empty());
    }

    #[test]
    fn test_stretched_wrapping_container_resizes_main() {
        let mut tree = FlexTree::new();
        let root = tree.create_node();
        tree.set_container_enabled(root, true).unwrap();
        tree.update_container(root, |c| c.direction = FlexDirection::Column).unwrap();
        tree.set_source_w(root, 20.0).unwrap();

        // Row that wraps once it gets a definite width from stretching
        let row = tree.create_node();
        tree.set_parent(row, Some(root)).unwrap();
        tree.set_container_enabled(row, true).unwrap();
        tree.update_container(row, |c| c.wrap = FlexWrap::Wrap).unwrap();
        let after = tree.create_node();
        tree.set_parent(after, Some(root)).unwrap();
        tree.set_source_h(after, 5.0).unwrap();

        for _ in 0..3 {
            let leaf = tree.create_node();
            tree.set_parent(leaf, Some(row)).unwrap();
            tree.set_source_w(leaf, 10.0).unwrap();
            tree.set_source_h(leaf, 10.0).unwrap();
        }

        let size = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(tree.resolved(row).unwrap().w, 20.0);
        assert_eq!(tree.resolved(row).unwrap().h, 20.0);
        // The next item moved down with the resized row
        assert_close(tree.resolved(after).unwrap().y, 20.0);
        assert_eq!(size.height, 25.0);
    }

    #[test]
    fn test_resized_item_keeps_centered_line_inside() {
        let mut tree = FlexTree::new();
        let root = tree.create_node();
        tree.set_container_enabled(root, true).unwrap();
        tree.update_container(root, |c| {
            c.direction = FlexDirection::Column;
            c.justify_content = JustifyContent::Center;
        })
        .unwrap();
        tree.set_source_w(root, 20.0).unwrap();

        let row = tree.create_node();
        tree.set_parent(row, Some(root)).unwrap();
        tree.set_container_enabled(row, true).unwrap();
        tree.update_container(row, |c| c.wrap = FlexWrap::Wrap).unwrap();
        for _ in 0..3 {
            let leaf = tree.create_node();
            tree.set_parent(leaf, Some(row)).unwrap();
            tree.set_source_w(leaf, 10.0).unwrap();
            tree.set_source_h(leaf, 10.0).unwrap();
        }
        let after = tree.create_node();
        tree.set_parent(after, Some(root)).unwrap();
        tree.set_source_h(after, 5.0).unwrap();

        let size = tree.layout_container(root, UNCONSTRAINED);

        assert_eq!(size.height, 25.0);
        assert_eq!(tree.resolved(row).unwrap().y, 0.0);
        assert_eq!(tree.resolved(row).unwrap().h, 20.0);
        assert_eq!(tree.resolved(after).unwrap().y, 20.0);
    }

}
