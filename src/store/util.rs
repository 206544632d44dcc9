use crate::model::{Shift, ShiftId};
use chrono::NaiveDateTime;

/// Intervalles semi-ouverts : le contact en bordure n'est pas un chevauchement.
pub(super) fn overlaps(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

pub(super) fn find_shift_index(shifts: &[Shift], shift_id: &ShiftId) -> Option<usize> {
    shifts.iter().position(|s| &s.id == shift_id)
}
