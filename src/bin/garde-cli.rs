#![forbid(unsafe_code)]
use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};
use garde::{
    calendar, flat_rows, io,
    model::{Roster, ShiftId, ShiftStatus, ShiftType, StaffMember},
    query::{shifts_for_view, statistics, ViewQuery},
    storage::{JsonStorage, Storage},
    store::{ShiftDraft, ShiftFilter, ShiftPatch, ShiftStore, WriteOptions},
    Granularity, LayoutConfig, StaffDirectory,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de planification de gardes (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON de roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ajouter un membre du personnel
    AddStaff {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        specialty: String,
        #[arg(long)]
        department: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
    },

    /// Basculer la disponibilité d'un membre (par nom exact)
    SetAvailable {
        #[arg(long)]
        name: String,
        #[arg(long, action = ArgAction::Set)]
        available: bool,
    },

    /// Importer du personnel depuis un CSV
    ImportStaff {
        #[arg(long)]
        csv: String,
    },

    /// Importer des gardes depuis un CSV (contrôle de conflits appliqué)
    ImportShifts {
        #[arg(long)]
        csv: String,
    },

    /// Créer une garde
    CreateShift {
        /// Nom exact du membre
        #[arg(long)]
        staff: String,
        #[arg(long)]
        ward: String,
        #[arg(long)]
        department: String,
        /// YYYY-MM-DD (jour civil de début)
        #[arg(long)]
        date: String,
        /// HH:MM
        #[arg(long)]
        start: String,
        /// HH:MM ; inférieur ou égal à start = garde de nuit
        #[arg(long)]
        end: String,
        /// morning|evening|night|full-day|on-call
        #[arg(long = "type")]
        shift_type: String,
        /// scheduled|confirmed|completed|cancelled
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Passe outre le contrôle de conflits (action auditée)
        #[arg(long)]
        force: bool,
    },

    /// Modifier une garde existante (champs omis inchangés)
    UpdateShift {
        #[arg(long)]
        id: String,
        #[arg(long)]
        staff: Option<String>,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long = "type")]
        shift_type: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        force: bool,
    },

    /// Changer le statut d'une garde
    SetStatus {
        #[arg(long)]
        id: String,
        #[arg(long)]
        status: String,
    },

    /// Supprimer une garde
    DeleteShift {
        #[arg(long)]
        id: String,
    },

    /// Lister et optionnellement exporter
    List {
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
    },

    /// Vue calendaire (day|week|month) autour d'une date d'ancrage
    View {
        #[arg(long, default_value = "week")]
        granularity: String,
        /// YYYY-MM-DD
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        department: Option<String>,
        /// Sous-chaîne du nom, insensible à la casse
        #[arg(long)]
        staff: Option<String>,
        /// Échelle heures → longueur
        #[arg(long, default_value_t = 1.0)]
        unit: f64,
    },

    /// Statistiques de couverture sur la même sélection que `view`
    Stats {
        #[arg(long, default_value = "week")]
        granularity: String,
        #[arg(long)]
        anchor: String,
        #[arg(long)]
        ward: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        staff: Option<String>,
    },

    /// Date d'ancrage précédente/suivante pour une granularité
    Navigate {
        #[arg(long)]
        anchor: String,
        /// previous|next
        #[arg(long)]
        direction: String,
        #[arg(long, default_value = "week")]
        granularity: String,
    },

    /// Balayage complet des conflits (utile après des écritures forcées)
    Check {
        /// Export CSV des conflits (optionnel)
        #[arg(long)]
        report: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let storage = JsonStorage::open(&cli.roster)?;
    // fichier absent = roster vierge ; fichier illisible = erreur franche
    let (mut directory, mut store) = if std::path::Path::new(&cli.roster).exists() {
        let r = storage.load()?;
        (
            StaffDirectory::from_staff(r.staff),
            ShiftStore::from_shifts(r.shifts),
        )
    } else {
        (StaffDirectory::new(), ShiftStore::new())
    };

    let code = match cli.cmd {
        Commands::AddStaff {
            name,
            specialty,
            department,
            phone,
            email,
        } => {
            let mut member = StaffMember::new(name, specialty, department);
            member.phone = phone;
            member.email = email;
            directory.add(member);
            save(&storage, &directory, &store)?;
            0
        }
        Commands::SetAvailable { name, available } => {
            let id = directory
                .find_by_name(&name)
                .map(|m| m.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown staff member: {}", name))?;
            directory.set_available(&id, available);
            save(&storage, &directory, &store)?;
            0
        }
        Commands::ImportStaff { csv } => {
            let staff = io::import_staff_csv(csv)?;
            for member in staff {
                directory.add(member);
            }
            save(&storage, &directory, &store)?;
            0
        }
        Commands::ImportShifts { csv } => {
            let drafts = io::import_shifts_csv(csv, &directory)?;
            for draft in drafts {
                store.create(&directory, draft, WriteOptions::default())?;
            }
            save(&storage, &directory, &store)?;
            0
        }
        Commands::CreateShift {
            staff,
            ward,
            department,
            date,
            start,
            end,
            shift_type,
            status,
            notes,
            color,
            force,
        } => {
            let staff_id = directory
                .find_by_name(&staff)
                .map(|m| m.id.clone())
                .ok_or_else(|| anyhow::anyhow!("unknown staff member: {}", staff))?;
            let mut draft = ShiftDraft::new(
                staff_id,
                ward,
                department,
                date.parse::<NaiveDate>()?,
                io::parse_clock(&start)?,
                io::parse_clock(&end)?,
                shift_type
                    .parse::<ShiftType>()
                    .map_err(anyhow::Error::msg)?,
            );
            if let Some(status) = status {
                draft.status = status
                    .parse::<ShiftStatus>()
                    .map_err(anyhow::Error::msg)?;
            }
            draft.notes = notes;
            draft.color_tag = color;
            let id = store.create(
                &directory,
                draft,
                WriteOptions {
                    force_override: force,
                },
            )?;
            save(&storage, &directory, &store)?;
            println!("{id}");
            0
        }
        Commands::UpdateShift {
            id,
            staff,
            ward,
            department,
            date,
            start,
            end,
            shift_type,
            status,
            notes,
            color,
            force,
        } => {
            let sid = ShiftId::new(id);
            let staff_id = match staff {
                Some(name) => Some(
                    directory
                        .find_by_name(&name)
                        .map(|m| m.id.clone())
                        .ok_or_else(|| anyhow::anyhow!("unknown staff member: {}", name))?,
                ),
                None => None,
            };
            let patch = ShiftPatch {
                staff_id,
                ward,
                department,
                date: date.map(|d| d.parse::<NaiveDate>()).transpose()?,
                start: start.as_deref().map(io::parse_clock).transpose()?,
                end: end.as_deref().map(io::parse_clock).transpose()?,
                shift_type: shift_type
                    .map(|t| t.parse::<ShiftType>().map_err(anyhow::Error::msg))
                    .transpose()?,
                status: status
                    .map(|s| s.parse::<ShiftStatus>().map_err(anyhow::Error::msg))
                    .transpose()?,
                notes,
                color_tag: color,
            };
            store.update(
                &directory,
                &sid,
                patch,
                WriteOptions {
                    force_override: force,
                },
            )?;
            save(&storage, &directory, &store)?;
            0
        }
        Commands::SetStatus { id, status } => {
            let sid = ShiftId::new(id);
            let status = status
                .parse::<ShiftStatus>()
                .map_err(anyhow::Error::msg)?;
            store.set_status(&sid, status)?;
            save(&storage, &directory, &store)?;
            0
        }
        Commands::DeleteShift { id } => {
            store.delete(&ShiftId::new(id))?;
            save(&storage, &directory, &store)?;
            0
        }
        Commands::List {
            ward,
            department,
            status,
            from,
            to,
            out_json,
            out_csv,
        } => {
            let filter = ShiftFilter {
                ward,
                department,
                status: status
                    .map(|s| s.parse::<ShiftStatus>().map_err(anyhow::Error::msg))
                    .transpose()?,
                from: from.map(|d| d.parse::<NaiveDate>()).transpose()?,
                to: to.map(|d| d.parse::<NaiveDate>()).transpose()?,
                ..ShiftFilter::default()
            };
            let shifts = store.list(&filter);
            if let Some(path) = out_json {
                let roster = Roster {
                    staff: directory.staff().to_vec(),
                    shifts: shifts.iter().map(|s| (*s).clone()).collect(),
                };
                io::export_roster_json(path, &roster)?;
            }
            if let Some(path) = out_csv {
                let rows = flat_rows(shifts.iter().copied(), &directory);
                io::export_shifts_csv(path, &rows)?;
            }
            // impression compacte
            for s in &shifts {
                let staff = directory
                    .get(&s.staff_id)
                    .map(|m| m.name.as_str())
                    .unwrap_or("-");
                println!(
                    "{} | {} {}–{} | {} | {} | {} | {}",
                    s.id,
                    s.date,
                    s.start.format("%H:%M"),
                    s.end.format("%H:%M"),
                    staff,
                    s.ward,
                    s.shift_type,
                    s.status
                );
            }
            0
        }
        Commands::View {
            granularity,
            anchor,
            ward,
            department,
            staff,
            unit,
        } => {
            let query = ViewQuery {
                granularity: granularity
                    .parse::<Granularity>()
                    .map_err(anyhow::Error::msg)?,
                anchor: anchor.parse::<NaiveDate>()?,
                ward,
                department,
                staff_name: staff,
            };
            let cfg = LayoutConfig { hour_unit: unit };
            let view = shifts_for_view(&store, &directory, &query, &cfg);
            for cell in &view.dates {
                let marker = if cell.in_current_month { " " } else { "·" };
                let entries = &view.shifts_by_date[&cell.date];
                println!("{}{}", marker, cell.date);
                for (shift, layout) in entries {
                    let staff = directory
                        .get(&shift.staff_id)
                        .map(|m| m.name.as_str())
                        .unwrap_or("-");
                    let geometry = layout
                        .map(|b| format!("top={:.2} height={:.2}", b.top, b.height))
                        .unwrap_or_default();
                    println!(
                        "   {}–{} | {} | {} | {}",
                        shift.start.format("%H:%M"),
                        shift.end.format("%H:%M"),
                        staff,
                        shift.ward,
                        geometry
                    );
                }
            }
            0
        }
        Commands::Stats {
            granularity,
            anchor,
            ward,
            department,
            staff,
        } => {
            let query = ViewQuery {
                granularity: granularity
                    .parse::<Granularity>()
                    .map_err(anyhow::Error::msg)?,
                anchor: anchor.parse::<NaiveDate>()?,
                ward,
                department,
                staff_name: staff,
            };
            let view = shifts_for_view(&store, &directory, &query, &LayoutConfig::default());
            let stats = statistics(view.all_shifts());
            println!(
                "total={} confirmed={} scheduled={} distinct_staff={}",
                stats.total, stats.confirmed, stats.scheduled, stats.distinct_staff
            );
            0
        }
        Commands::Navigate {
            anchor,
            direction,
            granularity,
        } => {
            let direction = match direction.to_ascii_lowercase().as_str() {
                "previous" | "prev" => calendar::Direction::Previous,
                "next" => calendar::Direction::Next,
                other => bail!("unknown direction: {other}"),
            };
            let date = calendar::navigate(
                anchor.parse::<NaiveDate>()?,
                direction,
                granularity
                    .parse::<Granularity>()
                    .map_err(anyhow::Error::msg)?,
            );
            println!("{date}");
            0
        }
        Commands::Check { report } => {
            let conflicts = store.detect_conflicts();
            if conflicts.is_empty() {
                println!("OK: no conflicts");
                0
            } else {
                eprintln!("Found {} conflict(s)", conflicts.len());
                if let Some(path) = report {
                    // CSV simple
                    let mut w = csv::Writer::from_path(path)?;
                    w.write_record(["staff_id", "shift_a", "shift_b"])?;
                    for c in &conflicts {
                        w.write_record([c.staff.as_str(), c.shift_a.as_str(), c.shift_b.as_str()])?;
                    }
                    w.flush()?;
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
    };

    std::process::exit(code);
}

fn save(storage: &JsonStorage, directory: &StaffDirectory, store: &ShiftStore) -> Result<()> {
    storage.save(&Roster {
        staff: directory.staff().to_vec(),
        shifts: store.shifts().to_vec(),
    })
}
