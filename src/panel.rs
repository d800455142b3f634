//! Betting lane identity.

/// One of the two betting lanes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Panel {
    /// The left panel.
    Left,
    /// The right panel.
    Right,
}

impl Panel {
    /// Both panels, in settlement order.
    pub const ALL: [Self; PANEL_COUNT] = [Self::Left, Self::Right];

    /// Returns the slot index of this panel.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Returns the lowercase name of this panel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl core::fmt::Display for Panel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Number of betting lanes.
pub const PANEL_COUNT: usize = 2;
