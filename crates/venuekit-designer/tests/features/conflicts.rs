use std::cell::Cell;
use venuekit_core::{AreaKind, Scope, TableType};
use venuekit_designer::conflicts::{
    active_boundary, conflicts_per_table, detect_conflicts, table_usage, ConflictCache,
    ConflictInput, ConflictKind, ConflictSubject,
};
use venuekit_designer::model::{Area, Assignment, Guest, Seat, Table};
use venuekit_designer::{DesignerState, Point};
use venuekit_settings::VenueSettings;

fn round(id: u32, x: f64, y: f64) -> Table {
    Table::from_template(id, TableType::Round, Point::new(x, y))
}

fn rect_area(kind: AreaKind, x0: f64, y0: f64, x1: f64, y1: f64) -> Area {
    let mut area = Area::new(
        kind,
        vec![
            Point::new(x0, y0),
            Point::new(x1, y0),
            Point::new(x1, y1),
            Point::new(x0, y1),
        ],
    );
    if kind == AreaKind::Boundary {
        area.close();
    }
    area
}

fn seated(id: &str, companions: u32, table_id: u32) -> Guest {
    let mut guest = Guest::new(id, id);
    guest.companions = companions;
    guest
        .assignments
        .insert(Scope::Banquet, Assignment::table(table_id));
    guest
}

fn run(areas: &[Area], tables: &[Table], seats: &[Seat], guests: &[Guest]) -> Vec<(ConflictKind, ConflictSubject)> {
    let venue = VenueSettings::default();
    detect_conflicts(&ConflictInput {
        scope: Scope::Banquet,
        venue: &venue,
        areas,
        tables,
        seats,
        guests,
    })
    .into_iter()
    .map(|c| (c.kind, c.subject))
    .collect()
}

#[test]
fn test_clean_layout() {
    let areas = vec![rect_area(AreaKind::Boundary, 0.0, 0.0, 1000.0, 1000.0)];
    let tables = vec![round(1, 200.0, 200.0), round(2, 600.0, 600.0)];
    assert!(run(&areas, &tables, &[], &[]).is_empty());
}

#[test]
fn test_perimeter_suppresses_other_checks() {
    let areas = vec![rect_area(AreaKind::Boundary, 0.0, 0.0, 1000.0, 1000.0)];
    let tables = vec![round(1, 990.0, 500.0), round(2, 800.0, 500.0)];
    let found = run(&areas, &tables, &[], &[]);
    assert_eq!(found, vec![(ConflictKind::Perimeter, ConflictSubject::Table(1))]);
}

#[test]
fn test_spacing_reported_for_both_tables() {
    // 100 cm gap against a 120 cm minimum aisle
    let tables = vec![round(1, 300.0, 300.0), round(2, 580.0, 300.0)];
    let found = run(&[], &tables, &[], &[]);
    assert_eq!(
        found,
        vec![
            (ConflictKind::Spacing, ConflictSubject::Table(1)),
            (ConflictKind::Spacing, ConflictSubject::Table(2)),
        ]
    );

    let apart = vec![round(1, 300.0, 300.0), round(2, 610.0, 300.0)];
    assert!(run(&[], &apart, &[], &[]).is_empty());
}

#[test]
fn test_obstacle_and_door_clearance() {
    let areas = vec![
        rect_area(AreaKind::Obstacle, 500.0, 500.0, 600.0, 600.0),
        rect_area(AreaKind::Door, 0.0, 0.0, 100.0, 20.0),
    ];
    let tables = vec![round(1, 400.0, 550.0), round(2, 150.0, 150.0), round(3, 1200.0, 1200.0)];
    let found = run(&areas, &tables, &[], &[]);
    assert!(found.contains(&(ConflictKind::Obstacle, ConflictSubject::Table(1))));
    assert!(found.contains(&(ConflictKind::Obstacle, ConflictSubject::Table(2))));
    assert!(!found.iter().any(|(_, s)| *s == ConflictSubject::Table(3)));
}

#[test]
fn test_aisles_and_freeform_are_not_exclusions() {
    let areas = vec![
        rect_area(AreaKind::Aisle, 0.0, 0.0, 1000.0, 1000.0),
        rect_area(AreaKind::Freeform, 0.0, 0.0, 1000.0, 1000.0),
    ];
    let tables = vec![round(1, 500.0, 500.0)];
    assert!(run(&areas, &tables, &[], &[]).is_empty());
}

#[test]
fn test_seat_checks() {
    let areas = vec![
        rect_area(AreaKind::Boundary, 0.0, 0.0, 1000.0, 1000.0),
        rect_area(AreaKind::Obstacle, 400.0, 400.0, 500.0, 500.0),
    ];
    let seats = vec![
        Seat::new(1, Point::new(100.0, 100.0), 0, 0),
        Seat::new(2, Point::new(450.0, 450.0), 0, 1),
        Seat::new(3, Point::new(1100.0, 100.0), 0, 2),
    ];
    let found = run(&areas, &[], &seats, &[]);
    assert_eq!(
        found,
        vec![
            (ConflictKind::Obstacle, ConflictSubject::Seat(2)),
            (ConflictKind::Perimeter, ConflictSubject::Seat(3)),
        ]
    );
}

#[test]
fn test_open_boundary_is_ignored() {
    let areas = vec![Area::new(
        AreaKind::Boundary,
        vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0), Point::new(100.0, 100.0)],
    )];
    assert!(active_boundary(&areas).is_none());
    let tables = vec![round(1, 5000.0, 5000.0)];
    assert!(run(&areas, &tables, &[], &[]).is_empty());
}

#[test]
fn test_last_boundary_wins() {
    let areas = vec![
        rect_area(AreaKind::Boundary, 0.0, 0.0, 100.0, 100.0),
        rect_area(AreaKind::Boundary, 0.0, 0.0, 2000.0, 2000.0),
    ];
    let boundary = active_boundary(&areas).unwrap();
    assert_eq!(boundary.bounds().unwrap().max_x, 2000.0);
    let tables = vec![round(1, 500.0, 500.0)];
    assert!(run(&areas, &tables, &[], &[]).is_empty());
}

#[test]
fn test_overbooking_at_capacity() {
    let tables = vec![
        Table::from_template(1, TableType::Cocktail, Point::new(200.0, 200.0)),
        Table::from_template(2, TableType::Cocktail, Point::new(800.0, 200.0)),
    ];
    let guests = vec![seated("a", 3, 1), seated("b", 2, 2), seated("ghost", 9, 42)];
    let found = run(&[], &tables, &[], &guests);
    assert_eq!(found, vec![(ConflictKind::Overbooking, ConflictSubject::Table(1))]);

    let usage = table_usage(Scope::Banquet, &tables, &guests);
    assert_eq!(usage.get(&1), Some(&4));
    assert_eq!(usage.get(&2), Some(&3));
    assert!(!usage.contains_key(&42));
}

#[test]
fn test_disabled_entities_skipped() {
    let mut a = round(1, 300.0, 300.0);
    a.enabled = false;
    let b = round(2, 320.0, 300.0);
    assert!(run(&[], &[a, b], &[], &[]).is_empty());
}

#[test]
fn test_conflicts_per_table() {
    let tables = vec![round(1, 300.0, 300.0), round(2, 400.0, 300.0), round(3, 500.0, 300.0)];
    let venue = VenueSettings::default();
    let conflicts = detect_conflicts(&ConflictInput {
        scope: Scope::Banquet,
        venue: &venue,
        areas: &[],
        tables: &tables,
        seats: &[],
        guests: &[],
    });
    let counts = conflicts_per_table(&conflicts);
    assert_eq!(counts.get(&2), Some(&2));
    assert_eq!(counts.get(&1), Some(&2));
}

#[test]
fn test_cache_recomputes_on_new_revision() {
    let calls = Cell::new(0);
    let mut cache = ConflictCache::new();
    let compute = || {
        calls.set(calls.get() + 1);
        Vec::new()
    };
    cache.get_or_compute(Scope::Banquet, 1, compute);
    cache.get_or_compute(Scope::Banquet, 1, compute);
    assert_eq!(calls.get(), 1);
    cache.get_or_compute(Scope::Ceremony, 1, compute);
    cache.get_or_compute(Scope::Ceremony, 2, compute);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_state_conflicts_follow_edits() {
    let mut state = DesignerState::new();
    let a = state.add_table(TableType::Round, Some(Point::new(300.0, 300.0))).unwrap();
    let b = state.add_table(TableType::Round, Some(Point::new(400.0, 300.0))).unwrap();
    assert_eq!(state.conflicts().len(), 2);

    state.commit_move(b, Point::new(900.0, 300.0)).unwrap();
    assert!(state.conflicts().is_empty());

    state.undo();
    assert!(state.conflicts().iter().any(|c| c.table_id() == Some(a)));
}
