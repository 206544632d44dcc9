use super::{util, Conflict, RosterError, ShiftStore, WriteOptions};
use crate::directory::StaffDirectory;
use crate::model::{Shift, ShiftId, ShiftStatus};
use std::collections::BTreeSet;

/// Valide un candidat contre l'annuaire et les gardes existantes de la même
/// personne. `exclude` désigne la garde en cours de mise à jour.
pub(super) fn check_candidate(
    directory: &StaffDirectory,
    shifts: &[Shift],
    candidate: &Shift,
    exclude: Option<&ShiftId>,
    opts: WriteOptions,
) -> Result<(), RosterError> {
    let member = directory
        .get(&candidate.staff_id)
        .ok_or_else(|| RosterError::UnknownStaff(candidate.staff_id.to_string()))?;

    if !member.available && candidate.status != ShiftStatus::Cancelled {
        return Err(RosterError::Unavailable(member.id.clone()));
    }

    if !candidate.status.is_active() {
        return Ok(());
    }

    if let Some(other) = first_collision(shifts, candidate, exclude) {
        if opts.force_override {
            tracing::warn!(
                candidate = %candidate.id,
                existing = %other.id,
                staff = %candidate.staff_id,
                "conflict override: committing overlapping shift"
            );
        } else {
            return Err(RosterError::Conflict(other.id.clone()));
        }
    }

    Ok(())
}

fn first_collision<'a>(
    shifts: &'a [Shift],
    candidate: &Shift,
    exclude: Option<&ShiftId>,
) -> Option<&'a Shift> {
    let (c_start, c_end) = candidate.normalized_interval();
    shifts.iter().find(|s| {
        if s.staff_id != candidate.staff_id || !s.status.is_active() {
            return false;
        }
        if exclude == Some(&s.id) {
            return false;
        }
        let (s_start, s_end) = s.normalized_interval();
        util::overlaps(c_start, c_end, s_start, s_end)
    })
}

/// Balayage complet : toutes les paires de gardes actives qui se chevauchent
/// pour une même personne. Utile après des écritures forcées.
pub(super) fn detect_conflicts(store: &ShiftStore) -> Vec<Conflict> {
    let mut out = Vec::new();

    let staff_ids: BTreeSet<&str> = store
        .shifts()
        .iter()
        .map(|s| s.staff_id.as_str())
        .collect();

    for staff in staff_ids {
        let mut shifts: Vec<&Shift> = store
            .shifts()
            .iter()
            .filter(|s| s.staff_id.as_str() == staff && s.status.is_active())
            .collect();
        shifts.sort_by_key(|s| s.normalized_interval().0);

        for (idx, a) in shifts.iter().enumerate() {
            let (a_start, a_end) = a.normalized_interval();
            for b in shifts.iter().skip(idx + 1) {
                let (b_start, b_end) = b.normalized_interval();
                if util::overlaps(a_start, a_end, b_start, b_end) {
                    out.push(Conflict {
                        staff: a.staff_id.clone(),
                        shift_a: a.id.clone(),
                        shift_b: b.id.clone(),
                    });
                }
            }
        }
    }

    out
}
