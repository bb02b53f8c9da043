use venuekit_core::TableType;
use venuekit_designer::generators::{banquet_grid, seat_grid};
use venuekit_designer::Point;
use venuekit_settings::{BanquetLayoutSettings, CeremonyLayoutSettings};

#[test]
fn test_seat_grid_ids_and_rows() {
    let settings = CeremonyLayoutSettings::default();
    let seats = seat_grid(&settings);
    assert_eq!(seats.len(), 80);

    let ids: Vec<u32> = seats.iter().map(|s| s.id).collect();
    assert_eq!(ids, (1..=80).collect::<Vec<u32>>());

    let seat = &seats[9];
    assert_eq!((seat.row, seat.col), (1, 1));
    assert_eq!(seat.id, 10);
    assert_eq!(seat.label(), "R2C2");
}

#[test]
fn test_seat_grid_aisle_shift() {
    let settings = CeremonyLayoutSettings::default();
    let seats = seat_grid(&settings);

    assert_eq!(seats[0].position, Point::new(300.0, 400.0));
    assert_eq!(seats[3].position.x, 300.0 + 3.0 * 55.0);
    // the fifth column starts after the aisle
    assert_eq!(seats[4].position.x, 300.0 + 4.0 * 55.0 + 150.0);
    assert_eq!(seats[8].position.y, 400.0 + 90.0);
}

#[test]
fn test_seat_grid_out_of_range_aisle_ignored() {
    let settings = CeremonyLayoutSettings {
        rows: 1,
        cols: 4,
        aisle_after_col: Some(4),
        ..CeremonyLayoutSettings::default()
    };
    let seats = seat_grid(&settings);
    assert_eq!(seats[3].position.x, 300.0 + 3.0 * 55.0);

    let no_aisle = CeremonyLayoutSettings {
        aisle_after_col: None,
        ..CeremonyLayoutSettings::default()
    };
    assert_eq!(seat_grid(&no_aisle)[7].position.x, 300.0 + 7.0 * 55.0);
}

#[test]
fn test_seat_grid_vip_rows() {
    let settings = CeremonyLayoutSettings {
        vip_rows: 2,
        ..CeremonyLayoutSettings::default()
    };
    let seats = seat_grid(&settings);
    for seat in &seats {
        let front = seat.row < 2;
        assert_eq!(seat.locked, front, "seat {}", seat.id);
        assert_eq!(seat.is_reserved(), front, "seat {}", seat.id);
    }
    assert_eq!(seats[0].reservation.as_deref(), Some("VIP"));

    let unlocked = CeremonyLayoutSettings {
        lock_vip_seats: false,
        ..CeremonyLayoutSettings::default()
    };
    let seats = seat_grid(&unlocked);
    assert!(seats[0].is_reserved());
    assert!(!seats[0].locked);
}

#[test]
fn test_empty_grid() {
    let settings = CeremonyLayoutSettings {
        rows: 0,
        ..CeremonyLayoutSettings::default()
    };
    assert!(seat_grid(&settings).is_empty());
}

#[test]
fn test_banquet_grid() {
    let settings = BanquetLayoutSettings::default();
    let tables = banquet_grid(&settings);
    assert_eq!(tables.len(), 12);
    assert_eq!(tables[0].id, 1);
    assert_eq!(tables[11].id, 12);
    assert_eq!(tables[0].position, Point::new(300.0, 300.0));
    assert_eq!(tables[5].position, Point::new(300.0 + 350.0, 300.0 + 350.0));
    assert!(tables.iter().all(|t| t.table_type == Some(TableType::Round)));
    assert!(tables.iter().all(|t| t.seats == 9));
}

#[test]
fn test_banquet_grid_other_template() {
    let settings = BanquetLayoutSettings {
        rows: 1,
        cols: 2,
        table_type: TableType::Imperial,
        ..BanquetLayoutSettings::default()
    };
    let tables = banquet_grid(&settings);
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1].seats, 10);
    assert_eq!(tables[1].name, "Table 2");
}
