use crate::model::{StaffId, StaffMember};

/// Annuaire du personnel.
///
/// Le drapeau `available` est lu au moment de chaque contrôle, jamais mis en
/// cache : une modification est visible dès l'écriture suivante.
#[derive(Debug, Clone, Default)]
pub struct StaffDirectory {
    staff: Vec<StaffMember>,
}

impl StaffDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_staff(staff: Vec<StaffMember>) -> Self {
        Self { staff }
    }

    pub fn staff(&self) -> &[StaffMember] {
        &self.staff
    }

    pub fn add(&mut self, member: StaffMember) {
        self.staff.push(member);
    }

    pub fn get(&self, id: &StaffId) -> Option<&StaffMember> {
        self.staff.iter().find(|m| &m.id == id)
    }

    /// Recherche par nom exact.
    pub fn find_by_name(&self, name: &str) -> Option<&StaffMember> {
        self.staff.iter().find(|m| m.name == name)
    }

    /// Bascule la disponibilité ; renvoie `false` si l'identifiant est inconnu.
    pub fn set_available(&mut self, id: &StaffId, available: bool) -> bool {
        match self.staff.iter_mut().find(|m| &m.id == id) {
            Some(member) => {
                member.available = available;
                true
            }
            None => false,
        }
    }
}
