//! Spacing calculator.
//!
//! Maps a distribution mode, an item (or line) count and the remaining space
//! to the offset before the first item and the gap between items. Negative
//! remaining space is not clamped: items overlap.

use crate::types::{AlignContent, JustifyContent};

/// How remaining space is distributed along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    /// Growth is applied to sizes by the caller; spacing is zero.
    Stretch,
}

impl From<JustifyContent> for Distribution {
    fn from(value: JustifyContent) -> Self {
        match value {
            JustifyContent::FlexStart => Self::Start,
            JustifyContent::Center => Self::Center,
            JustifyContent::FlexEnd => Self::End,
            JustifyContent::SpaceBetween => Self::SpaceBetween,
            JustifyContent::SpaceAround => Self::SpaceAround,
            JustifyContent::SpaceEvenly => Self::SpaceEvenly,
        }
    }
}

impl From<AlignContent> for Distribution {
    fn from(value: AlignContent) -> Self {
        match value {
            AlignContent::FlexStart => Self::Start,
            AlignContent::Center => Self::Center,
            AlignContent::FlexEnd => Self::End,
            AlignContent::SpaceBetween => Self::SpaceBetween,
            AlignContent::SpaceAround => Self::SpaceAround,
            AlignContent::SpaceEvenly => Self::SpaceEvenly,
            AlignContent::Stretch => Self::Stretch,
        }
    }
}

/// Offset before the first item and gap between consecutive items.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    pub before: f32,
    pub between: f32,
}

impl Spacing {
    const fn new(before: f32, between: f32) -> Self {
        Self { before, between }
    }
}

pub fn get_spacing(mode: impl Into<Distribution>, count: usize, remaining: f32) -> Spacing {
    let n = count as f32;
    match mode.into() {
        Distribution::Start | Distribution::Stretch => Spacing::default(),
        Distribution::End => Spacing::new(remaining, 0.0),
        Distribution::Center => Spacing::new(remaining / 2.0, 0.0),
        Distribution::SpaceBetween if count > 1 => Spacing::new(0.0, remaining / (n - 1.0)),
        Distribution::SpaceBetween => Spacing::default(),
        Distribution::SpaceAround if count > 0 => Spacing::new(remaining / (2.0 * n), remaining / n),
        Distribution::SpaceAround => Spacing::default(),
        Distribution::SpaceEvenly => {
            let gap = remaining / (n + 1.0);
            Spacing::new(gap, gap)
        }
    }
}
