use super::{conflicts, util, RosterError, ShiftDraft, ShiftPatch, ShiftStore, WriteOptions};
use crate::directory::StaffDirectory;
use crate::model::{Shift, ShiftId, ShiftStatus};

pub(super) fn create(
    store: &mut ShiftStore,
    directory: &StaffDirectory,
    draft: ShiftDraft,
    opts: WriteOptions,
) -> Result<ShiftId, RosterError> {
    let shift = Shift {
        id: ShiftId::random(),
        staff_id: draft.staff_id,
        ward: draft.ward,
        department: draft.department,
        date: draft.date,
        start: draft.start,
        end: draft.end,
        shift_type: draft.shift_type,
        status: draft.status,
        notes: draft.notes,
        color_tag: draft.color_tag,
    };

    validate_fields(&shift)?;
    conflicts::check_candidate(directory, store.shifts(), &shift, None, opts)?;

    let id = shift.id.clone();
    store.shifts_mut().push(shift);
    tracing::debug!(shift = %id, "shift created");
    Ok(id)
}

pub(super) fn update(
    store: &mut ShiftStore,
    directory: &StaffDirectory,
    id: &ShiftId,
    patch: ShiftPatch,
    opts: WriteOptions,
) -> Result<(), RosterError> {
    let Some(pos) = util::find_shift_index(store.shifts(), id) else {
        return Err(RosterError::UnknownShift(id.to_string()));
    };

    let mut candidate = store.shifts()[pos].clone();
    if let Some(staff_id) = patch.staff_id {
        candidate.staff_id = staff_id;
    }
    if let Some(ward) = patch.ward {
        candidate.ward = ward;
    }
    if let Some(department) = patch.department {
        candidate.department = department;
    }
    if let Some(date) = patch.date {
        candidate.date = date;
    }
    if let Some(start) = patch.start {
        candidate.start = start;
    }
    if let Some(end) = patch.end {
        candidate.end = end;
    }
    if let Some(shift_type) = patch.shift_type {
        candidate.shift_type = shift_type;
    }
    if let Some(status) = patch.status {
        check_transition(candidate.status, status)?;
        candidate.status = status;
    }
    if let Some(notes) = patch.notes {
        candidate.notes = Some(notes);
    }
    if let Some(color_tag) = patch.color_tag {
        candidate.color_tag = Some(color_tag);
    }

    validate_fields(&candidate)?;
    conflicts::check_candidate(directory, store.shifts(), &candidate, Some(id), opts)?;

    store.shifts_mut()[pos] = candidate;
    tracing::debug!(shift = %id, "shift updated");
    Ok(())
}

pub(super) fn delete(store: &mut ShiftStore, id: &ShiftId) -> Result<(), RosterError> {
    let Some(pos) = util::find_shift_index(store.shifts(), id) else {
        return Err(RosterError::UnknownShift(id.to_string()));
    };
    store.shifts_mut().remove(pos);
    tracing::debug!(shift = %id, "shift deleted");
    Ok(())
}

pub(super) fn set_status(
    store: &mut ShiftStore,
    id: &ShiftId,
    status: ShiftStatus,
) -> Result<(), RosterError> {
    let Some(pos) = util::find_shift_index(store.shifts(), id) else {
        return Err(RosterError::UnknownShift(id.to_string()));
    };
    check_transition(store.shifts()[pos].status, status)?;
    store.shifts_mut()[pos].status = status;
    tracing::debug!(shift = %id, %status, "status changed");
    Ok(())
}

/// Scheduled → Confirmed → Completed, annulation depuis tout état non
/// terminal ; réécrire le même statut est un no-op accepté.
fn check_transition(from: ShiftStatus, to: ShiftStatus) -> Result<(), RosterError> {
    use ShiftStatus::{Cancelled, Completed, Confirmed, Scheduled};
    let allowed = from == to
        || matches!(
            (from, to),
            (Scheduled, Confirmed)
                | (Confirmed, Completed)
                | (Scheduled, Cancelled)
                | (Confirmed, Cancelled)
        );
    if allowed {
        Ok(())
    } else {
        Err(RosterError::Validation(format!(
            "invalid status transition: {from} -> {to}"
        )))
    }
}

fn validate_fields(shift: &Shift) -> Result<(), RosterError> {
    if shift.ward.trim().is_empty() {
        return Err(RosterError::Validation("ward cannot be empty".into()));
    }
    if shift.department.trim().is_empty() {
        return Err(RosterError::Validation(
            "department cannot be empty".into(),
        ));
    }
    if shift.start == shift.end {
        return Err(RosterError::Validation(
            "start and end clocks cannot be equal".into(),
        ));
    }
    Ok(())
}
