//! Core types for spark-flex.
//!
//! Flex enums, geometry, the recalc bitmask and the enablement state of a node.

// =============================================================================
// Flex Enums - Container configuration
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl FlexDirection {
    /// Check if the main axis is horizontal (Row or RowReverse).
    pub const fn is_row(&self) -> bool {
        matches!(self, Self::Row | Self::RowReverse)
    }

    /// Check if this is a reverse direction (RowReverse or ColumnReverse).
    pub const fn is_reverse(&self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// Flex wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub const fn is_wrapping(&self) -> bool {
        !matches!(self, Self::NoWrap)
    }
}

/// Justify content (main axis distribution inside a line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

/// Align items (cross axis alignment inside a line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignItems {
    #[default]
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
}

/// Align self (item override for align items).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignSelf {
    #[default]
    Auto,
    Stretch,
    FlexStart,
    Center,
    FlexEnd,
}

impl AlignSelf {
    /// Convert to AlignItems, returning None if Auto.
    pub const fn to_align_items(&self) -> Option<AlignItems> {
        match self {
            Self::Auto => None,
            Self::Stretch => Some(AlignItems::Stretch),
            Self::FlexStart => Some(AlignItems::FlexStart),
            Self::Center => Some(AlignItems::Center),
            Self::FlexEnd => Some(AlignItems::FlexEnd),
        }
    }
}

/// Align content (distribution of lines along the cross axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    Stretch,
}

/// Initial main size of an item before grow/shrink.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FlexBasis {
    /// Use the item's own main-axis size.
    #[default]
    Auto,
    /// Fixed size in layout units.
    Fixed(f32),
}

// =============================================================================
// Geometry
// =============================================================================

/// Four-sided spacing (padding or margin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const ZERO: Edges = Edges { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Same value on all four sides.
    pub const fn all(v: f32) -> Self {
        Self { top: v, right: v, bottom: v, left: v }
    }

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Leading edge along an axis (left when horizontal, top otherwise).
    pub const fn start(&self, horizontal: bool) -> f32 {
        if horizontal { self.left } else { self.top }
    }

    /// Trailing edge along an axis (right when horizontal, bottom otherwise).
    pub const fn end(&self, horizontal: bool) -> f32 {
        if horizontal { self.right } else { self.bottom }
    }

    /// Sum of both edges along an axis.
    pub fn sum(&self, horizontal: bool) -> f32 {
        self.start(horizontal) + self.end(horizontal)
    }
}

/// Position and size of a node, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Geometry {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Size along an axis.
    pub const fn size(&self, horizontal: bool) -> f32 {
        if horizontal { self.w } else { self.h }
    }
}

// =============================================================================
// Recalc Flags
// =============================================================================

bitflags::bitflags! {
    /// Per-node dirty flags.
    ///
    /// `CHANGED` means the node or one of its descendants changed. `WIDTH` and
    /// `HEIGHT` mean the node's own resolved size on that axis may have changed.
    /// Bits are only ever added by invalidation; a layout pass clears them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Recalc: u8 {
        const CHANGED = 1 << 0;
        const WIDTH = 1 << 1;
        const HEIGHT = 1 << 2;
    }
}

impl Recalc {
    /// Build the flags for a change, always including `CHANGED`.
    pub fn for_change(width: bool, height: bool) -> Self {
        let mut recalc = Self::CHANGED;
        recalc.set(Self::WIDTH, width);
        recalc.set(Self::HEIGHT, height);
        recalc
    }

    /// Axis flag for width (horizontal) or height.
    pub const fn axis(horizontal: bool) -> Self {
        if horizontal { Self::WIDTH } else { Self::HEIGHT }
    }

    pub const fn is_changed(&self) -> bool {
        self.contains(Self::CHANGED)
    }

    /// Whether these (new) flags carry information about external size.
    pub const fn affects_size(&self) -> bool {
        self.intersects(Self::WIDTH.union(Self::HEIGHT))
    }
}

// =============================================================================
// Flex Role - tagged enablement state
// =============================================================================

/// Which flex roles a node currently plays.
///
/// A node is a container iff it holds a container config, and an item iff its
/// parent is an enabled container and it has not opted out. Both may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexRole {
    #[default]
    NotFlex,
    ContainerOnly,
    ItemOnly,
    Both,
}

impl FlexRole {
    pub const fn new(container: bool, item: bool) -> Self {
        match (container, item) {
            (false, false) => Self::NotFlex,
            (true, false) => Self::ContainerOnly,
            (false, true) => Self::ItemOnly,
            (true, true) => Self::Both,
        }
    }

    pub const fn is_enabled(&self) -> bool {
        !matches!(self, Self::NotFlex)
    }

    pub const fn is_container(&self) -> bool {
        matches!(self, Self::ContainerOnly | Self::Both)
    }

    pub const fn is_item(&self) -> bool {
        matches!(self, Self::ItemOnly | Self::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flex_direction_axes() {
        assert!(FlexDirection::Row.is_row());
        assert!(FlexDirection::RowReverse.is_row());
        assert!(!FlexDirection::Column.is_row());
        assert!(FlexDirection::ColumnReverse.is_reverse());
        assert!(!FlexDirection::Row.is_reverse());
    }

    #[test]
    fn test_edges_axis_helpers() {
        let e = Edges::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(e.start(true), 4.0);
        assert_eq!(e.end(true), 2.0);
        assert_eq!(e.start(false), 1.0);
        assert_eq!(e.sum(false), 4.0);
        assert_eq!(Edges::all(5.0).sum(true), 10.0);
    }

    #[test]
    fn test_recalc_for_change() {
        assert_eq!(Recalc::for_change(false, false), Recalc::CHANGED);
        assert_eq!(Recalc::for_change(true, true), Recalc::all());
        assert_eq!(Recalc::for_change(false, true).bits(), 5);
        assert!(!Recalc::CHANGED.affects_size());
        assert!(Recalc::HEIGHT.affects_size());
    }

    #[test]
    fn test_flex_role_tagging() {
        assert_eq!(FlexRole::new(false, false), FlexRole::NotFlex);
        assert_eq!(FlexRole::new(true, true), FlexRole::Both);
        assert!(FlexRole::ItemOnly.is_item());
        assert!(!FlexRole::ItemOnly.is_container());
        assert!(!FlexRole::NotFlex.is_enabled());
    }
}
