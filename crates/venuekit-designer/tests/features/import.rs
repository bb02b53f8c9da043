use venuekit_core::{Scope, Side, TableType};
use venuekit_designer::import::table_hints_from_name;
use venuekit_designer::model::Table;
use venuekit_designer::{DesignerState, GuestImporter, Point, RawGuest};

fn raw(id: &str, name: &str) -> RawGuest {
    RawGuest {
        id: id.to_string(),
        name: name.to_string(),
        ..RawGuest::default()
    }
}

fn banquet_tables() -> Vec<Table> {
    let mut head = Table::from_template(1, TableType::Imperial, Point::new(500.0, 200.0));
    head.name = "Head Table".to_string();
    let round = Table::from_template(7, TableType::Round, Point::new(500.0, 600.0));
    vec![head, round]
}

#[test]
fn test_table_reference_by_id_then_name() {
    let banquet = banquet_tables();
    let importer = GuestImporter::new(&[], &banquet);

    assert_eq!(importer.resolve_table(Scope::Banquet, "7"), Some(7));
    assert_eq!(importer.resolve_table(Scope::Banquet, " head table "), Some(1));
    assert_eq!(importer.resolve_table(Scope::Banquet, "Table 7"), Some(7));
    assert_eq!(importer.resolve_table(Scope::Banquet, "42"), None);
    assert_eq!(importer.resolve_table(Scope::Banquet, ""), None);
    assert_eq!(importer.resolve_table(Scope::Ceremony, "7"), None);
}

#[test]
fn test_numeric_name_falls_back_to_name_match() {
    let mut tables = banquet_tables();
    tables[1].name = "12".to_string();
    let importer = GuestImporter::new(&[], &tables);
    assert_eq!(importer.resolve_table(Scope::Banquet, "12"), Some(7));
}

#[test]
fn test_import_normalizes_fields() {
    let banquet = banquet_tables();
    let importer = GuestImporter::new(&[], &banquet);

    let mut row = raw(" g1 ", " Ana ");
    row.companions = "2".to_string();
    row.notes = "Prima de la novia".to_string();
    row.tags = vec!["  ".to_string(), "Padrino".to_string()];
    row.table = Some("Head Table".to_string());

    let guest = importer.import(&row);
    assert_eq!(guest.id, "g1");
    assert_eq!(guest.name, "Ana");
    assert_eq!(guest.companions, 2);
    assert_eq!(guest.side, Some(Side::Bride));
    assert!(guest.vip);
    assert_eq!(guest.tags.len(), 1);
    assert_eq!(guest.table_in(Scope::Banquet), Some(1));
}

#[test]
fn test_import_side_precedence() {
    let importer = GuestImporter::new(&[], &[]);

    let mut explicit = raw("a", "A");
    explicit.side = Some("Groom".to_string());
    explicit.notes = "bride's cousin".to_string();
    assert_eq!(importer.import(&explicit).side, Some(Side::Groom));

    let mut from_group = raw("b", "B");
    from_group.group = Some("Amigos del novio".to_string());
    assert_eq!(importer.import(&from_group).side, Some(Side::Groom));

    let mut unknown = raw("c", "C");
    unknown.side = Some("other".to_string());
    assert_eq!(importer.import(&unknown).side, None);
}

#[test]
fn test_import_lenient_values() {
    let importer = GuestImporter::new(&[], &[]);
    let mut row = raw("a", "A");
    row.companions = "two".to_string();
    row.table = Some("Nowhere".to_string());
    let guest = importer.import(&row);
    assert_eq!(guest.companions, 0);
    assert!(guest.assignments.is_empty());
    assert!(!guest.vip);
}

#[test]
fn test_ceremony_scope_reference() {
    let ceremony = vec![Table::from_template(3, TableType::Square, Point::new(100.0, 100.0))];
    let importer = GuestImporter::new(&ceremony, &[]);
    let mut row = raw("a", "A");
    row.table = Some("3".to_string());
    row.scope = Some(Scope::Ceremony);
    let guest = importer.import(&row);
    assert_eq!(guest.table_in(Scope::Ceremony), Some(3));
    assert_eq!(guest.table_in(Scope::Banquet), None);
}

#[test]
fn test_import_all_skips_blank_ids() {
    let importer = GuestImporter::new(&[], &[]);
    let guests = importer.import_all(&[raw("a", "A"), raw("  ", "Nobody"), raw("b", "B")]);
    let ids: Vec<&str> = guests.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_table_name_hints() {
    assert_eq!(table_hints_from_name("Mesa Presidencial"), (None, true));
    assert_eq!(table_hints_from_name("Novios"), (Some(Side::Groom), false));
    assert_eq!(table_hints_from_name("Bride & Groom"), (Some(Side::Shared), false));
}

#[test]
fn test_state_import_resolves_against_tables() {
    let mut state = DesignerState::new();
    state.add_table(TableType::Round, None).unwrap();
    state
        .update_table_field(1, venuekit_designer::TableField::Name, "Familia Novia")
        .unwrap();
    assert_eq!(state.table(1).unwrap().side_hint, Some(Side::Bride));

    let mut row = raw("a", "Ana");
    row.table = Some("familia novia".to_string());
    let count = state.import_guests(&[row, raw("b", "Luis"), raw("", "Blank")]);
    assert_eq!(count, 2);
    assert_eq!(state.guest("a").unwrap().table_in(Scope::Banquet), Some(1));
    assert!(state.dangling_assignments().is_empty());
}
