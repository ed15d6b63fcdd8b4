//! Collision layer masks for filtering spatial queries and line casts
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.8:
//! "Most games need to filter collisions... This is typically done via
//! collision layers or groups."
//!
//! The sensor treats masks as opaque: bits it has no name for are carried
//! through unchanged.

use bitflags::bitflags;

bitflags! {
    /// Bitmask of collision layers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    #[serde(transparent)]
    pub struct LayerMask: u32 {
        /// Default layer for untagged objects
        const DEFAULT = 1 << 0;
        /// Player character layer
        const PLAYER = 1 << 1;
        /// Enemy and NPC layer
        const ENEMY = 1 << 2;
        /// Static environment geometry (walls, terrain)
        const ENVIRONMENT = 1 << 3;
        /// Trigger volumes
        const TRIGGER = 1 << 4;
        /// Pickups and collectibles
        const PICKUP = 1 << 5;
        /// Climbable ledges and grab points
        const CLIMB_POINT = 1 << 6;
        /// Dynamic props that can hide things
        const PROP = 1 << 7;

        // Opaque bits from the host are kept as-is
        const _ = !0;
    }
}

impl LayerMask {
    /// Mask matching every layer
    pub const ALL: Self = Self::from_bits_retain(u32::MAX);

    /// Mask matching no layer
    pub const NONE: Self = Self::empty();

    /// Build a mask from a raw host bitmask without dropping unknown bits
    pub const fn from_raw(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }

    /// Build a mask from layer indices (0..32)
    ///
    /// Indices out of range are ignored.
    pub fn from_indices(indices: &[u32]) -> Self {
        indices
            .iter()
            .filter(|&&index| index < 32)
            .fold(Self::empty(), |acc, &index| acc | Self::from_bits_retain(1 << index))
    }

    /// True if this mask shares at least one layer with `layer`
    pub const fn matches(self, layer: Self) -> bool {
        self.bits() & layer.bits() != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}
