//! Align overlays against their origin.

/// Alignment on the axis of an origin or an overlay.
///
/// `Start` and `End` are physical: on the horizontal axis `Start` is the left
/// edge regardless of the layout direction. Right to left placements are
/// obtained with [`Alignment::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align at the start of the axis.
    Start,

    /// Align at the center of the axis.
    Center,

    /// Align at the end of the axis.
    End,
}

impl Alignment {
    /// Returns the mirrored alignment: `Start` and `End` swap, `Center` stays.
    #[must_use]
    pub fn flip(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::Center => Self::Center,
            Self::End => Self::Start,
        }
    }
}
