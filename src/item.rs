/// Measured geometry for one item, taken from the rendered strip after layout.
///
/// `width` is the item's full horizontal footprint (content plus any spacing
/// baked into the layout). `offset` is the left edge in the unlooped row.
/// `translate` is a pre-existing horizontal translation in pixels, usually
/// zero unless the host measured an already-shifted element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemMeasure {
    pub width: f32,
    pub offset: f32,
    pub translate: f32,
}

impl ItemMeasure {
    pub fn new(width: f32, offset: f32) -> Self {
        Self { width, offset, translate: 0.0 }
    }

    /// Builds measures from bare content widths, spacing items `gap` pixels
    /// apart. The gap is folded into each item's footprint so the looped
    /// strip stays evenly spaced across the wrap point.
    pub fn from_widths(widths: &[f32], gap: f32) -> Vec<ItemMeasure> {
        let mut offset = 0.0;
        widths
            .iter()
            .map(|&w| {
                let m = ItemMeasure { width: w + gap, offset, translate: 0.0 };
                offset += m.width;
                m
            })
            .collect()
    }
}

/// One repeated content unit inside a built loop.
///
/// `display_percent` is the item's current horizontal shift expressed as a
/// percentage of its own width. It is the only field that changes during
/// playback; everything else is fixed until the loop is rebuilt.
#[derive(Debug, Clone, Copy)]
pub struct Item {
    pub index: usize,
    pub width: f32,
    pub offset: f32,
    pub display_percent: f32,
}

impl Item {
    /// Current left edge on screen, offset plus the percentage shift.
    pub fn screen_x(&self) -> f32 {
        self.offset + self.display_percent / 100.0 * self.width
    }
}
