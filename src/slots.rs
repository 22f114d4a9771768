use crate::patterns::rules::SLOT;
use tracing::warn;

/// Slots in the largest menu grid (six rows of nine).
pub const MENU_SLOTS: u32 = 54;

/// Expands a slot expression such as `0, (9..11), 4` into `[0, 9, 10, 11, 4]`.
///
/// Order and repetition are kept as written since menu slots are positional.
/// A reversed range contributes nothing, as does a range wider than
/// [`MENU_SLOTS`]. An expression without any number resolves to an empty list.
pub fn resolve(expression: &str) -> Vec<u32> {
    let mut slots = Vec::new();
    for record in SLOT.matches(expression) {
        if let Some(single) = record.get("single") {
            if let Ok(slot) = single.parse::<u32>() {
                slots.push(slot);
            }
            continue;
        }
        let (Ok(lo), Ok(hi)) = (
            record.text("lo").parse::<u32>(),
            record.text("hi").parse::<u32>(),
        ) else {
            continue;
        };
        if hi >= lo && hi - lo >= MENU_SLOTS {
            warn!(expression = expression, lo = lo, hi = hi, "Skipping slot range wider than a menu");
            continue;
        }
        slots.extend(lo..=hi);
    }
    slots
}
