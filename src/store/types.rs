use crate::model::{ShiftId, ShiftStatus, ShiftType, StaffId};
use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

/// Options d'écriture
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Passe outre le contrôle de conflits (jamais la validation des champs).
    /// L'écriture forcée est tracée pour audit côté hôte.
    pub force_override: bool,
}

/// Champs d'une garde à créer ; l'identifiant est attribué par le store.
#[derive(Debug, Clone)]
pub struct ShiftDraft {
    pub staff_id: StaffId,
    pub ward: String,
    pub department: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub shift_type: ShiftType,
    pub status: ShiftStatus,
    pub notes: Option<String>,
    pub color_tag: Option<String>,
}

impl ShiftDraft {
    pub fn new<W: Into<String>, D: Into<String>>(
        staff_id: StaffId,
        ward: W,
        department: D,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        shift_type: ShiftType,
    ) -> Self {
        Self {
            staff_id,
            ward: ward.into(),
            department: department.into(),
            date,
            start,
            end,
            shift_type,
            status: ShiftStatus::Scheduled,
            notes: None,
            color_tag: None,
        }
    }
}

/// Mise à jour partielle : seuls les champs renseignés changent.
#[derive(Debug, Clone, Default)]
pub struct ShiftPatch {
    pub staff_id: Option<StaffId>,
    pub ward: Option<String>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub shift_type: Option<ShiftType>,
    pub status: Option<ShiftStatus>,
    pub notes: Option<String>,
    pub color_tag: Option<String>,
}

/// Filtre de listing ; tous les critères sont optionnels et cumulatifs.
#[derive(Debug, Clone, Default)]
pub struct ShiftFilter {
    pub staff_id: Option<StaffId>,
    pub ward: Option<String>,
    pub department: Option<String>,
    pub status: Option<ShiftStatus>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ShiftFilter {
    pub fn matches(&self, shift: &crate::model::Shift) -> bool {
        if let Some(staff_id) = &self.staff_id {
            if &shift.staff_id != staff_id {
                return false;
            }
        }
        if let Some(ward) = &self.ward {
            if &shift.ward != ward {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if &shift.department != department {
                return false;
            }
        }
        if let Some(status) = self.status {
            if shift.status != status {
                return false;
            }
        }
        if let Some(from) = self.from {
            if shift.date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if shift.date > to {
                return false;
            }
        }
        true
    }
}

/// Chevauchement constaté entre deux gardes actives d'une même personne.
#[derive(Debug, Clone)]
pub struct Conflict {
    pub staff: StaffId,
    pub shift_a: ShiftId,
    pub shift_b: ShiftId,
}

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid shift: {0}")]
    Validation(String),
    #[error("overlaps shift {0} of the same staff member")]
    Conflict(ShiftId),
    #[error("staff member {0} is marked unavailable")]
    Unavailable(StaffId),
    #[error("unknown shift: {0}")]
    UnknownShift(String),
    #[error("unknown staff member: {0}")]
    UnknownStaff(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
