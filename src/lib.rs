#![forbid(unsafe_code)]
//! Garde — bibliothèque de planification de gardes hospitalières (sans BD).
//!
//! - Magasin de gardes avec refus des affectations en conflit.
//! - Grilles calendaires jour / semaine / mois, navigation, layout horaire.
//! - Statistiques de couverture et projection tabulaire pour export.
//! - Stockage fichiers (JSON/CSV) ; dates et heures civiles naïves,
//!   l'affichage localisé reste en dehors de la lib.

pub mod calendar;
pub mod directory;
pub mod io;
pub mod layout;
pub mod model;
pub mod query;
pub mod storage;
pub mod store;

pub use calendar::{Direction, Granularity, GridDay};
pub use directory::StaffDirectory;
pub use layout::{LayoutBox, LayoutConfig};
pub use model::{Roster, Shift, ShiftId, ShiftStatus, ShiftType, StaffId, StaffMember};
pub use query::{
    flat_rows, shifts_for_view, statistics, FlatRow, RosterView, Statistics, ViewQuery,
};
pub use storage::{JsonStorage, Storage};
pub use store::{
    Conflict, RosterError, ShiftDraft, ShiftFilter, ShiftPatch, ShiftStore, WriteOptions,
};
