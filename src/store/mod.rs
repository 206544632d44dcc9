mod conflicts;
mod mutate;
mod types;
mod util;

pub use types::{Conflict, RosterError, ShiftDraft, ShiftFilter, ShiftPatch, WriteOptions};

use crate::directory::StaffDirectory;
use crate::model::{Shift, ShiftId, ShiftStatus};

/// Magasin des gardes : propriétaire exclusif des enregistrements.
///
/// Toute écriture exige `&mut self`, toute lecture `&self` : le contrôle de
/// conflits et le commit sont donc atomiques au sein d'un même appel. Un hôte
/// multi-threads enveloppe le store dans un unique `RwLock`.
#[derive(Debug, Default)]
pub struct ShiftStore {
    shifts: Vec<Shift>,
}

impl ShiftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_shifts(shifts: Vec<Shift>) -> Self {
        Self { shifts }
    }

    pub fn shifts(&self) -> &[Shift] {
        &self.shifts
    }

    pub(crate) fn shifts_mut(&mut self) -> &mut Vec<Shift> {
        &mut self.shifts
    }

    /// Valide les champs, contrôle disponibilité et conflits, attribue un
    /// identifiant et insère.
    pub fn create(
        &mut self,
        directory: &StaffDirectory,
        draft: ShiftDraft,
        opts: WriteOptions,
    ) -> Result<ShiftId, RosterError> {
        mutate::create(self, directory, draft, opts)
    }

    /// Applique un patch partiel puis revalide contre toutes les autres
    /// gardes de la même personne.
    pub fn update(
        &mut self,
        directory: &StaffDirectory,
        id: &ShiftId,
        patch: ShiftPatch,
        opts: WriteOptions,
    ) -> Result<(), RosterError> {
        mutate::update(self, directory, id, patch, opts)
    }

    /// Suppression définitive.
    pub fn delete(&mut self, id: &ShiftId) -> Result<(), RosterError> {
        mutate::delete(self, id)
    }

    /// Transition de statut seule (la table des transitions s'applique).
    pub fn set_status(&mut self, id: &ShiftId, status: ShiftStatus) -> Result<(), RosterError> {
        mutate::set_status(self, id, status)
    }

    pub fn get(&self, id: &ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| &s.id == id)
    }

    /// Gardes filtrées, triées par (date, heure de début).
    pub fn list(&self, filter: &ShiftFilter) -> Vec<&Shift> {
        let mut out: Vec<&Shift> = self.shifts.iter().filter(|s| filter.matches(s)).collect();
        out.sort_by_key(|s| (s.date, s.start));
        out
    }

    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        conflicts::detect_conflicts(self)
    }
}
