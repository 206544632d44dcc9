use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifiant fort pour StaffMember
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StaffId(String);

impl StaffId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Membre du personnel soignant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub specialty: String,
    pub department: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl StaffMember {
    pub fn new<N: Into<String>, S: Into<String>, D: Into<String>>(
        name: N,
        specialty: S,
        department: D,
    ) -> Self {
        Self {
            id: StaffId::random(),
            name: name.into(),
            specialty: specialty.into(),
            department: department.into(),
            phone: String::new(),
            email: String::new(),
            available: true,
        }
    }
}

/// Identifiant fort pour Shift
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftId(String);

impl ShiftId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type de garde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftType {
    Morning,
    Evening,
    Night,
    FullDay,
    OnCall,
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Morning => "morning",
            Self::Evening => "evening",
            Self::Night => "night",
            Self::FullDay => "full-day",
            Self::OnCall => "on-call",
        };
        f.write_str(s)
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            "full-day" | "fullday" => Ok(Self::FullDay),
            "on-call" | "oncall" => Ok(Self::OnCall),
            other => Err(format!("unknown shift type: {other}")),
        }
    }
}

/// Statut d'une garde
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
}

impl ShiftStatus {
    /// Les statuts actifs participent au contrôle de conflits.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for ShiftStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("unknown shift status: {other}")),
        }
    }
}

/// Garde planifiée.
///
/// `date` est le jour civil de début ; `end <= start` signifie que la garde
/// franchit minuit et se termine le lendemain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub staff_id: StaffId,
    pub ward: String,
    pub department: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub shift_type: ShiftType,
    pub status: ShiftStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_tag: Option<String>,
}

impl Shift {
    /// Intervalle absolu semi-ouvert `[start, end)` de la garde.
    pub fn normalized_interval(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self.date.and_time(self.start);
        let end_date = if self.end <= self.start {
            self.date.succ_opt().expect("date overflow")
        } else {
            self.date
        };
        (start, end_date.and_time(self.end))
    }

    /// Durée normalisée en minutes (toujours > 0, au plus 24 h).
    pub fn duration_minutes(&self) -> i64 {
        let (start, end) = self.normalized_interval();
        (end - start).num_minutes()
    }

    pub fn crosses_midnight(&self) -> bool {
        self.end <= self.start
    }
}

/// Instantané sérialisable du service : personnel + gardes
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    #[serde(default)]
    pub staff: Vec<StaffMember>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
}
