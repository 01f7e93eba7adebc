//! Flex lines: wrapping, main-axis resolution and main-axis positioning.

use super::item::ItemState;
use super::spacing::get_spacing;
use crate::types::JustifyContent;

/// A contiguous run of items sharing one main-axis row or column.
///
/// Rebuilt every pass. `start..end` indexes the container's visible items.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LineLayout {
    pub start: usize,
    pub end: usize,
    /// Main-axis space the line is laid out in.
    pub main_space: f32,
    /// Whether `main_space` comes from the container. Otherwise the line
    /// is as long as its items.
    pub definite_main: bool,
    /// Main-axis space left after item sizes. Negative on overflow.
    pub available_space: f32,
    /// Resolved cross-axis size of the line.
    pub cross_size: f32,
}

impl LineLayout {
    fn new(start: usize, end: usize) -> Self {
        Self { start, end, main_space: 0.0, definite_main: false, available_space: 0.0, cross_size: 0.0 }
    }

    pub fn count(&self) -> usize {
        self.end - self.start
    }

    pub fn items<'a>(&self, items: &'a [ItemState]) -> &'a [ItemState] {
        &items[self.start..self.end]
    }

    pub fn items_mut<'a>(&self, items: &'a mut [ItemState]) -> &'a mut [ItemState] {
        &mut items[self.start..self.end]
    }

    /// Sum of item basis footprints.
    pub fn basis_size(&self, items: &[ItemState]) -> f32 {
        self.items(items).iter().map(ItemState::basis_footprint).sum()
    }

    /// Sum of resolved item footprints.
    pub fn main_used(&self, items: &[ItemState]) -> f32 {
        self.items(items).iter().map(ItemState::main_footprint).sum()
    }

    /// Distribute free space by grow factors, or take overflow away by
    /// weighted shrink factors.
    ///
    /// Results are clamped to each item's min/max; clamped-off space is not
    /// redistributed. Returns whether any item ended below its basis.
    pub fn resolve_main_axis(&mut self, items: &mut [ItemState]) -> bool {
        let free = self.main_space - self.basis_size(items);
        let line = self.items_mut(items);

        for item in line.iter_mut() {
            item.main_size = item.basis;
        }

        if free > 0.0 {
            let total_grow: f32 = line.iter().map(|i| i.config.grow).sum();
            if total_grow > 0.0 {
                for item in line.iter_mut().filter(|i| i.config.grow > 0.0) {
                    let size = item.basis + free * item.config.grow / total_grow;
                    item.main_size = item.config.clamp_size(size, item.horizontal);
                }
            }
        } else if free < 0.0 {
            let total_weight: f32 = line.iter().map(|i| i.config.shrink * i.basis).sum();
            if total_weight > 0.0 {
                for item in line.iter_mut() {
                    let weight = item.config.shrink * item.basis;
                    if weight > 0.0 {
                        let size = item.basis + free * weight / total_weight;
                        item.main_size = item.config.clamp_size(size, item.horizontal);
                    }
                }
            }
        }

        let shrunk = line.iter().any(|i| i.main_size < i.basis);
        self.update_available_space(items);
        shrunk
    }

    /// Fix the main-axis space, or size the line to its item bases.
    pub fn set_main_space(&mut self, space: Option<f32>, items: &[ItemState]) {
        self.definite_main = space.is_some();
        self.main_space = space.unwrap_or_else(|| self.basis_size(items));
    }

    pub fn update_available_space(&mut self, items: &[ItemState]) {
        if !self.definite_main {
            self.main_space = self.main_used(items);
        }
        self.available_space = self.main_space - self.main_used(items);
    }

    /// Largest cross footprint in the line.
    pub fn natural_cross_size(&self, items: &[ItemState]) -> f32 {
        self.items(items)
            .iter()
            .map(ItemState::cross_footprint)
            .fold(0.0, f32::max)
    }

    pub fn set_item_positions(&self, items: &mut [ItemState], justify: JustifyContent) {
        ItemPositioner::new(self, justify).position(items);
    }
}

/// Split items into lines.
///
/// A new line starts when the next item would overflow `limit`. Without a
/// limit, or without wrapping, everything goes into one line.
pub(crate) fn build_lines(items: &[ItemState], limit: Option<f32>, wrap: bool) -> Vec<LineLayout> {
    let limit = match limit {
        Some(limit) if wrap => limit,
        _ => return vec![LineLayout::new(0, items.len())],
    };

    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0.0;
    for (index, item) in items.iter().enumerate() {
        let footprint = item.basis_footprint();
        if index > start && used + footprint > limit {
            lines.push(LineLayout::new(start, index));
            start = index;
            used = 0.0;
        }
        used += footprint;
    }
    lines.push(LineLayout::new(start, items.len()));
    lines
}

// =============================================================================
// ItemPositioner
// =============================================================================

/// Places the items of one line along the main axis.
pub(crate) struct ItemPositioner<'a> {
    line: &'a LineLayout,
    justify: JustifyContent,
}

impl<'a> ItemPositioner<'a> {
    pub fn new(line: &'a LineLayout, justify: JustifyContent) -> Self {
        Self { line, justify }
    }

    pub fn position(&self, items: &mut [ItemState]) {
        let spacing = get_spacing(self.justify, self.line.count(), self.line.available_space);

        let mut pos = spacing.before;
        for item in self.line.items_mut(items) {
            item.main_pos = pos + item.config.margin.start(item.horizontal);
            pos += item.main_footprint() + spacing.between;
        }
    }
}
