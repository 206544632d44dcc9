//! Façade de lecture : vues calendaires filtrées et statistiques.

use crate::calendar::{self, Granularity, GridDay};
use crate::directory::StaffDirectory;
use crate::layout::{self, LayoutBox, LayoutConfig};
use crate::model::{Shift, ShiftStatus, ShiftType};
use crate::store::{ShiftFilter, ShiftStore};
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Critères d'une vue : ward/département en égalité stricte, nom du
/// personnel en sous-chaîne insensible à la casse.
#[derive(Debug, Clone)]
pub struct ViewQuery {
    pub granularity: Granularity,
    pub anchor: NaiveDate,
    pub ward: Option<String>,
    pub department: Option<String>,
    pub staff_name: Option<String>,
}

impl ViewQuery {
    pub fn new(granularity: Granularity, anchor: NaiveDate) -> Self {
        Self {
            granularity,
            anchor,
            ward: None,
            department: None,
            staff_name: None,
        }
    }
}

/// Résultat d'une vue : instantané cohérent, les gardes sont clonées.
///
/// Chaque date de la grille est présente dans `shifts_by_date`, vide au
/// besoin ; les entrées gardent l'ordre (date, heure de début).
#[derive(Debug, Clone)]
pub struct RosterView {
    pub dates: Vec<GridDay>,
    pub shifts_by_date: BTreeMap<NaiveDate, Vec<(Shift, Option<LayoutBox>)>>,
}

impl RosterView {
    pub fn all_shifts(&self) -> impl Iterator<Item = &Shift> {
        self.shifts_by_date
            .values()
            .flatten()
            .map(|(shift, _)| shift)
    }
}

/// Gardes visibles pour une vue donnée. Le filtrage précède le calcul de
/// layout ; l'empilement visuel de boîtes qui se recouvrent reste à la
/// charge de la présentation.
pub fn shifts_for_view(
    store: &ShiftStore,
    directory: &StaffDirectory,
    query: &ViewQuery,
    cfg: &LayoutConfig,
) -> RosterView {
    let dates = calendar::grid(query.granularity, query.anchor);

    let filter = ShiftFilter {
        ward: query.ward.clone(),
        department: query.department.clone(),
        ..ShiftFilter::default()
    };
    let name_query = query.staff_name.as_ref().map(|q| q.to_lowercase());

    let visible: Vec<&Shift> = store
        .list(&filter)
        .into_iter()
        .filter(|s| match &name_query {
            Some(q) => directory
                .get(&s.staff_id)
                .map(|m| m.name.to_lowercase().contains(q))
                .unwrap_or(false),
            None => true,
        })
        .collect();

    let mut shifts_by_date = BTreeMap::new();
    for cell in &dates {
        let entries: Vec<(Shift, Option<LayoutBox>)> = visible
            .iter()
            .filter(|s| s.date == cell.date)
            .map(|s| ((*s).clone(), layout::compute(s, cell.date, cfg)))
            .collect();
        shifts_by_date.insert(cell.date, entries);
    }

    RosterView {
        dates,
        shifts_by_date,
    }
}

/// Compteurs de couverture d'un ensemble filtré.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub total: usize,
    pub confirmed: usize,
    pub scheduled: usize,
    /// Personnes distinctes, tous statuts confondus.
    pub distinct_staff: usize,
}

pub fn statistics<'a, I>(shifts: I) -> Statistics
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut stats = Statistics::default();
    let mut seen = HashSet::new();
    for shift in shifts {
        stats.total += 1;
        match shift.status {
            ShiftStatus::Confirmed => stats.confirmed += 1,
            ShiftStatus::Scheduled => stats.scheduled += 1,
            _ => {}
        }
        seen.insert(shift.staff_id.clone());
    }
    stats.distinct_staff = seen.len();
    stats
}

/// Projection tabulaire plate d'une vue, pour export externe (PDF/Excel).
#[derive(Debug, Clone, Serialize)]
pub struct FlatRow {
    pub date: NaiveDate,
    pub staff: String,
    pub ward: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub shift_type: ShiftType,
    pub status: ShiftStatus,
}

pub fn flat_rows<'a, I>(shifts: I, directory: &StaffDirectory) -> Vec<FlatRow>
where
    I: IntoIterator<Item = &'a Shift>,
{
    shifts
        .into_iter()
        .map(|s| FlatRow {
            date: s.date,
            staff: directory
                .get(&s.staff_id)
                .map(|m| m.name.clone())
                .unwrap_or_else(|| s.staff_id.to_string()),
            ward: s.ward.clone(),
            start: s.start,
            end: s.end,
            shift_type: s.shift_type,
            status: s.status,
        })
        .collect()
}
