// ==========================================
// SubOuts Tracker - load / pallet auto-numbering
// ==========================================
// OUT-### / IN-### per SubOut per direction, P-### per SubOut.
// Next number = highest existing suffix + 1, so gaps left by
// deletions are never reused.
// ==========================================

use crate::domain::load::{Load, Pallet};
use crate::domain::types::LoadDirection;

pub const PALLET_PREFIX: &str = "P";

/// Numeric suffix of "PREFIX-###"; None when the prefix differs.
fn suffix_of(number: &str, prefix: &str) -> Option<u32> {
    number
        .strip_prefix(prefix)?
        .strip_prefix('-')?
        .parse::<u32>()
        .ok()
}

fn format_number(prefix: &str, n: u32) -> String {
    format!("{}-{:03}", prefix, n)
}

pub fn next_load_number(loads: &[Load], direction: LoadDirection) -> String {
    let prefix = direction.prefix();
    let max = loads
        .iter()
        .filter(|l| l.direction == direction)
        .filter_map(|l| suffix_of(&l.load_number, prefix))
        .max()
        .unwrap_or(0);
    format_number(prefix, max.saturating_add(1))
}

pub fn next_pallet_number(pallets: &[Pallet]) -> String {
    let max = pallets
        .iter()
        .filter_map(|p| suffix_of(&p.pallet_number, PALLET_PREFIX))
        .max()
        .unwrap_or(0);
    format_number(PALLET_PREFIX, max.saturating_add(1))
}
