//! Grilles calendaires jour / semaine / mois et navigation.
//!
//! Fonctions pures : mêmes entrées, mêmes dates. Les semaines commencent le
//! lundi quel que soit le réglage locale de l'hôte.

use chrono::{Datelike, Days, Months, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// Résolution d'affichage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Day,
    Week,
    Month,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
        };
        f.write_str(s)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            other => Err(format!("unknown granularity: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Cellule de grille ; `in_current_month` distingue les jours de bordure du
/// mois précédent/suivant dans la vue mensuelle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

pub fn day(anchor: NaiveDate) -> Vec<NaiveDate> {
    vec![anchor]
}

/// Les 7 jours de la semaine contenant `anchor`, à partir du lundi.
pub fn week(anchor: NaiveDate) -> Vec<NaiveDate> {
    let monday = anchor - Days::new(u64::from(anchor.weekday().num_days_from_monday()));
    (0..7).map(|i| monday + Days::new(i)).collect()
}

/// 42 jours (6 semaines pleines) à partir du lundi précédant ou égal au 1er
/// du mois de `anchor`.
pub fn month(anchor: NaiveDate) -> Vec<GridDay> {
    let first = anchor.with_day(1).expect("day 1 always exists");
    let grid_start = first - Days::new(u64::from(first.weekday().num_days_from_monday()));
    (0..42)
        .map(|i| {
            let date = grid_start + Days::new(i);
            GridDay {
                date,
                in_current_month: date.month() == anchor.month() && date.year() == anchor.year(),
            }
        })
        .collect()
}

/// Grille uniforme pour les vues ; en jour/semaine toutes les cellules sont
/// dans le mois courant par construction.
pub fn grid(granularity: Granularity, anchor: NaiveDate) -> Vec<GridDay> {
    match granularity {
        Granularity::Day => day(anchor)
            .into_iter()
            .map(|date| GridDay {
                date,
                in_current_month: true,
            })
            .collect(),
        Granularity::Week => week(anchor)
            .into_iter()
            .map(|date| GridDay {
                date,
                in_current_month: true,
            })
            .collect(),
        Granularity::Month => month(anchor),
    }
}

/// Décale l'ancre de ±1 jour, ±7 jours ou ±1 mois ; le pas mensuel borne le
/// quantième au dernier jour valide (31 janv. → 29 févr.).
pub fn navigate(anchor: NaiveDate, direction: Direction, granularity: Granularity) -> NaiveDate {
    match (granularity, direction) {
        (Granularity::Day, Direction::Next) => anchor + Days::new(1),
        (Granularity::Day, Direction::Previous) => anchor - Days::new(1),
        (Granularity::Week, Direction::Next) => anchor + Days::new(7),
        (Granularity::Week, Direction::Previous) => anchor - Days::new(7),
        (Granularity::Month, Direction::Next) => anchor
            .checked_add_months(Months::new(1))
            .expect("date overflow"),
        (Granularity::Month, Direction::Previous) => anchor
            .checked_sub_months(Months::new(1))
            .expect("date overflow"),
    }
}
