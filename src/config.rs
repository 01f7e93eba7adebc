//! Layout configuration.

bitflags::bitflags! {
    /// Behaviour switches for a [`FlexTree`](crate::engine::FlexTree).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct LayoutFlags: u32 {
        /// Round resolved coordinates and dimensions to whole units on write-out.
        const ROUND_LAYOUT = 1 << 0;
        /// Reject reparenting that would create a cycle.
        const CHECK_CYCLES = 1 << 1;
    }
}

impl Default for LayoutFlags {
    fn default() -> Self {
        Self::CHECK_CYCLES
    }
}

/// Configuration for a layout tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutConfig {
    pub flags: LayoutFlags,
}

impl LayoutConfig {
    pub fn new(flags: LayoutFlags) -> Self {
        Self { flags }
    }

    pub fn round_layout(&self) -> bool {
        self.flags.contains(LayoutFlags::ROUND_LAYOUT)
    }

    pub fn check_cycles(&self) -> bool {
        self.flags.contains(LayoutFlags::CHECK_CYCLES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert!(config.check_cycles());
        assert!(!config.round_layout());
    }

    #[test]
    fn test_custom_flags() {
        let config = LayoutConfig::new(LayoutFlags::ROUND_LAYOUT);
        assert!(config.round_layout());
        assert!(!config.check_cycles());
    }
}
