//! Cross-axis distribution of lines.

use super::item::ItemState;
use super::item_aligner::ItemAligner;
use super::line::LineLayout;
use super::spacing::get_spacing;
use super::FlexContainer;
use crate::engine::FlexTree;
use crate::types::AlignContent;

/// Spreads lines over the container's cross axis per align-content and runs
/// each line's [`ItemAligner`].
pub(crate) struct ContentAligner<'a> {
    container: &'a FlexContainer,
    total_cross_size: f32,
}

impl<'a> ContentAligner<'a> {
    pub fn new(container: &'a FlexContainer) -> Self {
        Self { container, total_cross_size: 0.0 }
    }

    pub fn init(&mut self, lines: &[LineLayout]) {
        self.total_cross_size = lines.iter().map(|line| line.cross_size).sum();
    }

    pub fn total_cross_size(&self) -> f32 {
        self.total_cross_size
    }

    pub fn align(&self, tree: &mut FlexTree, lines: &mut [LineLayout], items: &mut [ItemState], cross_size: f32) {
        let remaining = cross_size - self.total_cross_size;
        let mode = self.container.align_content;
        let spacing = get_spacing(mode, lines.len(), remaining);

        let grow = if mode == AlignContent::Stretch && !lines.is_empty() && remaining > 0.0 {
            remaining / lines.len() as f32
        } else {
            0.0
        };

        let mut pos = spacing.before;
        for line in lines.iter_mut() {
            let size = line.cross_size + grow;

            let mut aligner = ItemAligner::new(line, self.container.align_items);
            aligner.set_cross_axis_layout_size(size);
            aligner.set_cross_axis_layout_offset(pos);
            aligner.align(tree, items);
            let resized = aligner.recursive_resize_occurred;

            line.cross_size = size;
            if resized {
                line.update_available_space(items);
                line.set_item_positions(items, self.container.justify_content);
            }

            pos += size + spacing.between;
        }
    }
}
