//! Cross-axis alignment of the items of one line.

use super::item::ItemState;
use super::line::LineLayout;
use crate::engine::FlexTree;
use crate::types::AlignItems;

pub(crate) struct ItemAligner<'a> {
    line: &'a LineLayout,
    align_items: AlignItems,
    cross_size: f32,
    cross_offset: f32,
    /// Set when a nested container changed its main size after being
    /// stretched. The line's main positions are stale then.
    pub recursive_resize_occurred: bool,
}

impl<'a> ItemAligner<'a> {
    pub fn new(line: &'a LineLayout, align_items: AlignItems) -> Self {
        Self {
            line,
            align_items,
            cross_size: line.cross_size,
            cross_offset: 0.0,
            recursive_resize_occurred: false,
        }
    }

    pub fn set_cross_axis_layout_size(&mut self, size: f32) {
        self.cross_size = size;
    }

    pub fn set_cross_axis_layout_offset(&mut self, offset: f32) {
        self.cross_offset = offset;
    }

    pub fn align(&mut self, tree: &mut FlexTree, items: &mut [ItemState]) {
        for item in self.line.items_mut(items) {
            let align = item.config.resolve_align(self.align_items);

            if align == AlignItems::Stretch && item.cross_auto {
                let size = (self.cross_size - item.cross_margin()).max(0.0);
                let size = item.config.clamp_size(size, !item.horizontal);
                if size != item.cross_size {
                    item.cross_size = size;
                    if item.is_container && tree.layout_item_container(item, Some(size)) {
                        self.recursive_resize_occurred = true;
                    }
                }
            }

            let margin = &item.config.margin;
            let leading = margin.start(!item.horizontal);
            item.cross_pos = self.cross_offset
                + match align {
                    AlignItems::Stretch | AlignItems::FlexStart => leading,
                    AlignItems::Center => leading + (self.cross_size - item.cross_footprint()) / 2.0,
                    AlignItems::FlexEnd => {
                        self.cross_size - item.cross_size - margin.end(!item.horizontal)
                    }
                };
        }
    }
}
