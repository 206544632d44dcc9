//! Placement d'une garde sur l'axe horaire d'une vue calendaire.

use crate::model::Shift;
use chrono::{NaiveDate, Timelike};

/// Échelle heures → longueur d'affichage.
#[derive(Debug, Clone, Copy)]
pub struct LayoutConfig {
    pub hour_unit: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { hour_unit: 1.0 }
    }
}

/// Position et étendue d'une garde sur la colonne d'un jour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

/// Boîte de layout de `shift` pour `display_date`.
///
/// Une garde n'occupe que son jour de début : pour toute autre date le
/// résultat est `None`, y compris le lendemain d'une garde de nuit. La
/// hauteur couvre la durée normalisée complète, même au-delà de minuit.
pub fn compute(shift: &Shift, display_date: NaiveDate, cfg: &LayoutConfig) -> Option<LayoutBox> {
    if display_date != shift.date {
        return None;
    }

    let start_offset =
        f64::from(shift.start.hour()) + f64::from(shift.start.minute()) / 60.0;
    let duration_hours = shift.duration_minutes() as f64 / 60.0;

    Some(LayoutBox {
        top: start_offset * cfg.hour_unit,
        height: duration_hours * cfg.hour_unit,
    })
}
