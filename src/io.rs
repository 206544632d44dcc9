use crate::directory::StaffDirectory;
use crate::model::{Roster, ShiftStatus, ShiftType, StaffMember};
use crate::query::FlatRow;
use crate::store::ShiftDraft;
use anyhow::{bail, Context};
use chrono::{NaiveDate, NaiveTime};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::Path;

/// Import de personnel depuis CSV: header
/// `name,specialty,department,phone,email[,available]`
pub fn import_staff_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<StaffMember>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let specialty = rec.get(1).context("missing specialty")?.trim();
        let department = rec.get(2).context("missing department")?.trim();
        if name.is_empty() || department.is_empty() {
            bail!("invalid staff row (empty name or department)");
        }
        let mut member = StaffMember::new(name, specialty, department);
        if let Some(phone) = rec.get(3) {
            member.phone = phone.trim().to_string();
        }
        if let Some(email) = rec.get(4) {
            member.email = email.trim().to_string();
        }
        if let Some(flag) = rec.get(5) {
            let flag = flag.trim();
            if !flag.is_empty() {
                member.available = parse_bool(flag)
                    .with_context(|| format!("invalid available value for {name}"))?;
            }
        }
        out.push(member);
    }
    Ok(out)
}

fn parse_bool(s: &str) -> anyhow::Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "y" | "oui" => Ok(true),
        "false" | "0" | "no" | "n" | "non" => Ok(false),
        _ => bail!("expected boolean"),
    }
}

/// Heure `HH:MM` (les secondes sont tolérées).
pub fn parse_clock(raw: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .with_context(|| format!("invalid clock value: {raw}"))
}

/// Import de gardes: header `staff,ward,department,date,start,end,type[,status]`.
/// `staff` est le nom exact d'un membre de l'annuaire ; `date` au format
/// `YYYY-MM-DD`.
pub fn import_shifts_csv<P: AsRef<Path>>(
    path: P,
    directory: &StaffDirectory,
) -> anyhow::Result<Vec<ShiftDraft>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let staff_name = rec.get(0).context("missing staff")?.trim();
        let member = directory
            .find_by_name(staff_name)
            .with_context(|| format!("unknown staff member: {staff_name}"))?;
        let ward = rec.get(1).context("missing ward")?.trim().to_string();
        let department = rec.get(2).context("missing department")?.trim().to_string();
        let date: NaiveDate = rec
            .get(3)
            .context("missing date")?
            .trim()
            .parse()
            .context("date YYYY-MM-DD")?;
        let start = parse_clock(rec.get(4).context("missing start")?.trim())?;
        let end = parse_clock(rec.get(5).context("missing end")?.trim())?;
        let shift_type: ShiftType = rec
            .get(6)
            .context("missing type")?
            .trim()
            .parse()
            .map_err(anyhow::Error::msg)?;

        let mut draft = ShiftDraft::new(
            member.id.clone(),
            ward,
            department,
            date,
            start,
            end,
            shift_type,
        );
        if let Some(status) = rec.get(7) {
            let status = status.trim();
            if !status.is_empty() {
                draft.status = status
                    .parse::<ShiftStatus>()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("invalid status for {staff_name}"))?;
            }
        }
        out.push(draft);
    }
    Ok(out)
}

/// Export JSON du roster (jolie mise en forme)
pub fn export_roster_json<P: AsRef<Path>>(path: P, roster: &Roster) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(roster)?;
    fs::write(path, s)?;
    Ok(())
}

/// Export CSV plat d'une vue: header `date,staff,ward,start,end,type,status`
pub fn export_shifts_csv<P: AsRef<Path>>(path: P, rows: &[FlatRow]) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["date", "staff", "ward", "start", "end", "type", "status"])?;
    for row in rows {
        w.write_record([
            row.date.to_string().as_str(),
            row.staff.as_str(),
            row.ward.as_str(),
            row.start.format("%H:%M").to_string().as_str(),
            row.end.format("%H:%M").to_string().as_str(),
            row.shift_type.to_string().as_str(),
            row.status.to_string().as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}
