#![forbid(unsafe_code)]
use chrono::{NaiveDate, NaiveTime};
use garde::{
    RosterError, ShiftDraft, ShiftPatch, ShiftStatus, ShiftStore, ShiftType, StaffDirectory,
    StaffId, StaffMember, WriteOptions,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn staffed_directory() -> (StaffDirectory, StaffId, StaffId) {
    let mut directory = StaffDirectory::new();
    let a = StaffMember::new("Alice Dupont", "cardiology", "medicine");
    let b = StaffMember::new("Bob Martin", "surgery", "surgery");
    let (id_a, id_b) = (a.id.clone(), b.id.clone());
    directory.add(a);
    directory.add(b);
    (directory, id_a, id_b)
}

fn draft(staff: &StaffId, d: NaiveDate, start: NaiveTime, end: NaiveTime) -> ShiftDraft {
    ShiftDraft::new(
        staff.clone(),
        "ICU",
        "medicine",
        d,
        start,
        end,
        ShiftType::Morning,
    )
}

#[test]
fn create_get_and_list_ordering() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let later = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 22), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();
    let earlier = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    assert_eq!(store.get(&earlier).unwrap().date, date(2024, 11, 21));

    let listed = store.list(&Default::default());
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, earlier);
    assert_eq!(listed[1].id, later);
}

#[test]
fn overlapping_shifts_conflict() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let first = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    let err = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(15, 0), clock(23, 0)),
            WriteOptions::default(),
        )
        .unwrap_err();

    match err {
        RosterError::Conflict(id) => assert_eq!(id, first),
        other => panic!("expected conflict, got {other:?}"),
    }
    assert_eq!(store.shifts().len(), 1);
}

#[test]
fn boundary_touch_is_not_a_conflict() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();
    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(16, 0), clock(23, 59)),
            WriteOptions::default(),
        )
        .unwrap();

    assert_eq!(store.shifts().len(), 2);
}

#[test]
fn overnight_shift_conflicts_across_midnight() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    // 21 nov. 22:00 → 22 nov. 06:00
    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(22, 0), clock(6, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    let err = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 22), clock(5, 0), clock(9, 0)),
            WriteOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, RosterError::Conflict(_)));

    // le lendemain à 06:00 pile, en bordure : accepté
    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 22), clock(6, 0), clock(14, 0)),
            WriteOptions::default(),
        )
        .unwrap();
}

#[test]
fn different_staff_may_overlap() {
    let (directory, alice, bob) = staffed_directory();
    let mut store = ShiftStore::new();

    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();
    store
        .create(
            &directory,
            draft(&bob, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    assert_eq!(store.shifts().len(), 2);
}

#[test]
fn terminal_statuses_are_conflict_exempt() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let mut cancelled = draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0));
    cancelled.status = ShiftStatus::Cancelled;
    store
        .create(&directory, cancelled, WriteOptions::default())
        .unwrap();

    // chevauche la garde annulée : autorisé
    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(10, 0), clock(18, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    // candidat déjà terminé : exempt lui aussi
    let mut completed = draft(&alice, date(2024, 11, 21), clock(11, 0), clock(15, 0));
    completed.status = ShiftStatus::Completed;
    store
        .create(&directory, completed, WriteOptions::default())
        .unwrap();

    assert_eq!(store.shifts().len(), 3);
}

#[test]
fn unavailable_staff_rejected_unless_cancelled() {
    let (mut directory, alice, _) = staffed_directory();
    directory.set_available(&alice, false);
    let mut store = ShiftStore::new();

    let err = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, RosterError::Unavailable(id) if id == alice));

    let mut cancelled = draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0));
    cancelled.status = ShiftStatus::Cancelled;
    store
        .create(&directory, cancelled, WriteOptions::default())
        .unwrap();
}

#[test]
fn availability_flag_is_read_live() {
    let (mut directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    directory.set_available(&alice, false);
    assert!(store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .is_err());

    directory.set_available(&alice, true);
    store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();
}

#[test]
fn force_override_commits_and_scan_reports_pair() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let a = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();
    let b = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(12, 0), clock(20, 0)),
            WriteOptions {
                force_override: true,
            },
        )
        .unwrap();

    let conflicts = store.detect_conflicts();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].staff, alice);
    let pair = [conflicts[0].shift_a.clone(), conflicts[0].shift_b.clone()];
    assert!(pair.contains(&a) && pair.contains(&b));
}

#[test]
fn update_excludes_itself_from_conflict_check() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let id = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    // ne change que les notes : la garde ne doit pas se heurter à elle-même
    store
        .update(
            &directory,
            &id,
            ShiftPatch {
                notes: Some("relève tardive possible".into()),
                ..ShiftPatch::default()
            },
            WriteOptions::default(),
        )
        .unwrap();

    assert_eq!(
        store.get(&id).unwrap().notes.as_deref(),
        Some("relève tardive possible")
    );
}

#[test]
fn update_into_overlap_fails() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let first = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(12, 0)),
            WriteOptions::default(),
        )
        .unwrap();
    let second = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(14, 0), clock(18, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    let err = store
        .update(
            &directory,
            &second,
            ShiftPatch {
                start: Some(clock(11, 0)),
                ..ShiftPatch::default()
            },
            WriteOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, RosterError::Conflict(id) if id == first));

    // l'écriture refusée n'a rien modifié
    assert_eq!(store.get(&second).unwrap().start, clock(14, 0));
}

#[test]
fn status_transition_table() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    let id = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0)),
            WriteOptions::default(),
        )
        .unwrap();

    // Scheduled -> Completed sans confirmation : refusé
    assert!(matches!(
        store.set_status(&id, ShiftStatus::Completed),
        Err(RosterError::Validation(_))
    ));

    store.set_status(&id, ShiftStatus::Confirmed).unwrap();
    // réécrire le même statut est un no-op accepté
    store.set_status(&id, ShiftStatus::Confirmed).unwrap();
    store.set_status(&id, ShiftStatus::Completed).unwrap();

    // état terminal : plus aucune transition
    assert!(matches!(
        store.set_status(&id, ShiftStatus::Cancelled),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn validation_and_not_found_errors() {
    let (directory, alice, _) = staffed_directory();
    let mut store = ShiftStore::new();

    // bornes égales
    let err = store
        .create(
            &directory,
            draft(&alice, date(2024, 11, 21), clock(8, 0), clock(8, 0)),
            WriteOptions::default(),
        )
        .unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));

    // ward vide
    let mut blank = draft(&alice, date(2024, 11, 21), clock(8, 0), clock(16, 0));
    blank.ward = "  ".into();
    assert!(matches!(
        store.create(&directory, blank, WriteOptions::default()),
        Err(RosterError::Validation(_))
    ));

    // personnel inconnu
    let ghost = draft(
        &StaffId::new("nobody"),
        date(2024, 11, 21),
        clock(8, 0),
        clock(16, 0),
    );
    assert!(matches!(
        store.create(&directory, ghost, WriteOptions::default()),
        Err(RosterError::UnknownStaff(_))
    ));

    // identifiants inconnus
    let missing = garde::ShiftId::new("missing");
    assert!(matches!(
        store.delete(&missing),
        Err(RosterError::UnknownShift(_))
    ));
    assert!(matches!(
        store.update(
            &directory,
            &missing,
            ShiftPatch::default(),
            WriteOptions::default()
        ),
        Err(RosterError::UnknownShift(_))
    ));
    assert!(store.get(&missing).is_none());
}
