use raylib::prelude::*;

use crate::item::ItemMeasure;

// --- Measure rendered label widths into loop geometry ---
//
// The loop is built from post-layout pixel geometry, so measurement has to
// happen after the window (and its default font) exists. The handle is taken
// to enforce that ordering.
pub fn measure_labels(
    rl: &RaylibHandle,
    labels: &[String],
    font_size: i32,
    gap: f32,
) -> Vec<ItemMeasure> {
    let widths: Vec<f32> = labels
        .iter()
        .map(|label| rl.measure_text(label, font_size) as f32)
        .collect();
    ItemMeasure::from_widths(&widths, gap)
}
