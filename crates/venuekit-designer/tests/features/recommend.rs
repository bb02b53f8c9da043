use proptest::prelude::*;
use std::collections::HashMap;
use venuekit_core::{Scope, Side, TableType};
use venuekit_designer::conflicts::{Conflict, ConflictKind, ConflictSubject};
use venuekit_designer::model::{Assignment, Guest, Table};
use venuekit_designer::recommend::{recommend, RecommendationInput, ScoringContext, MAX_CANDIDATES};
use venuekit_designer::{DesignerState, Point, Recommendation};
use venuekit_settings::ScoringWeights;

fn table(id: u32, kind: TableType) -> Table {
    Table::from_template(id, kind, Point::new(300.0 * id as f64, 300.0))
}

fn guest(id: &str, companions: u32) -> Guest {
    let mut g = Guest::new(id, id.to_uppercase());
    g.companions = companions;
    g
}

fn at(mut g: Guest, table_id: u32) -> Guest {
    g.assignments
        .insert(Scope::Banquet, Assignment::table(table_id));
    g
}

fn run_with(
    tables: &[Table],
    guests: &[Guest],
    conflicts: &[Conflict],
    locks: &HashMap<u32, String>,
    weights: ScoringWeights,
) -> Vec<Recommendation> {
    recommend(RecommendationInput {
        scope: Scope::Banquet,
        tables,
        guests,
        conflicts,
        remote_locks: locks,
        weights,
    })
}

fn run(tables: &[Table], guests: &[Guest]) -> Vec<Recommendation> {
    run_with(tables, guests, &[], &HashMap::new(), ScoringWeights::default())
}

fn best_for(recs: &[Recommendation], guest_id: &str) -> Option<u32> {
    recs.iter()
        .find(|r| r.guest_id == guest_id)
        .and_then(|r| r.candidates.first())
        .map(|c| c.table_id)
}

fn candidate_ids(recs: &[Recommendation], guest_id: &str) -> Vec<u32> {
    recs.iter()
        .find(|r| r.guest_id == guest_id)
        .map(|r| r.candidates.iter().map(|c| c.table_id).collect())
        .unwrap_or_default()
}

#[test]
fn test_party_never_placed_where_it_does_not_fit() {
    let tables = vec![table(1, TableType::Cocktail), table(2, TableType::Round)];
    // the cocktail table keeps 2 of its 4 seats free
    let guests = vec![at(guest("x", 1), 1), guest("g", 2)];
    let recs = run(&tables, &guests);
    assert_eq!(candidate_ids(&recs, "g"), vec![2]);
    assert_eq!(recs.len(), 1);
}

#[test]
fn test_exact_fit_preferred() {
    let tables = vec![table(1, TableType::Round), table(2, TableType::Cocktail)];
    let recs = run(&tables, &[guest("g", 3)]);
    assert_eq!(best_for(&recs, "g"), Some(2));
    assert_eq!(recs[0].candidates[0].free_seats, 4);
    assert_eq!(recs[0].party_size, 4);
}

#[test]
fn test_side_affinity() {
    let mut tables = vec![table(1, TableType::Round), table(2, TableType::Round)];
    tables[1].side_hint = Some(Side::Bride);
    let mut g = guest("g", 0);
    g.side = Some(Side::Bride);
    assert_eq!(best_for(&run(&tables, &[g.clone()]), "g"), Some(2));

    // a shared table suits either side
    tables[1].side_hint = Some(Side::Shared);
    assert_eq!(best_for(&run(&tables, &[g.clone()]), "g"), Some(2));
    let mut groom = guest("h", 0);
    groom.side = Some(Side::Groom);
    assert_eq!(best_for(&run(&tables, &[groom]), "h"), Some(2));

    tables[1].side_hint = Some(Side::Groom);
    assert_eq!(best_for(&run(&tables, &[g]), "g"), Some(1));
}

#[test]
fn test_avoidance_in_both_directions() {
    let tables = vec![table(1, TableType::Round), table(2, TableType::Round)];
    let x = at(guest("x", 0), 1);

    // without constraints the tighter table wins
    assert_eq!(best_for(&run(&tables, &[x.clone(), guest("g", 0)]), "g"), Some(1));

    let mut g = guest("g", 0);
    g.avoids.push("x".to_string());
    assert_eq!(best_for(&run(&tables, &[x.clone(), g]), "g"), Some(2));

    let mut x_avoids = x;
    x_avoids.avoids.push("g".to_string());
    assert_eq!(best_for(&run(&tables, &[x_avoids, guest("g", 0)]), "g"), Some(2));
}

#[test]
fn test_wants_and_groups() {
    let tables = vec![table(1, TableType::Round), table(2, TableType::Round)];
    let y = at(guest("y", 0), 2);
    let mut g = guest("g", 0);
    g.wants.push("y".to_string());
    assert_eq!(best_for(&run(&tables, &[y.clone(), g]), "g"), Some(2));

    let mut y_group = y;
    y_group.group = Some("College".to_string());
    let mut h = guest("h", 0);
    h.tags.insert("College".to_string());
    assert_eq!(best_for(&run(&tables, &[y_group, h]), "h"), Some(2));
}

#[test]
fn test_vip_matching() {
    let mut tables = vec![table(1, TableType::Round), table(2, TableType::Round)];
    tables[1].vip = true;

    let mut vip = guest("v", 0);
    vip.vip = true;
    assert_eq!(best_for(&run(&tables, &[vip]), "v"), Some(2));
    assert_eq!(best_for(&run(&tables, &[guest("g", 0)]), "g"), Some(1));
}

#[test]
fn test_locks_disabled_and_conflicts() {
    let mut tables = vec![
        table(1, TableType::Round),
        table(2, TableType::Round),
        table(3, TableType::Round),
        table(4, TableType::Round),
    ];
    tables[0].enabled = false;
    tables[2].locked = true;
    let mut locks = HashMap::new();
    locks.insert(2, "ana".to_string());
    let conflicts = vec![Conflict {
        kind: ConflictKind::Spacing,
        subject: ConflictSubject::Table(4),
        message: String::new(),
    }];

    let recs = run_with(
        &tables,
        &[guest("g", 0)],
        &conflicts,
        &locks,
        ScoringWeights::default(),
    );
    // locked costs more than one conflict
    assert_eq!(candidate_ids(&recs, "g"), vec![4, 3]);
}

#[test]
fn test_zero_weight_disables_penalties() {
    let tables = vec![table(1, TableType::Round), table(2, TableType::Round)];
    let x = at(guest("x", 0), 1);
    let mut g = guest("g", 0);
    g.avoids.push("x".to_string());
    let weights = ScoringWeights {
        avoid: 0.0,
        ..ScoringWeights::default()
    };
    let recs = run_with(&tables, &[x, g], &[], &HashMap::new(), weights);
    assert_eq!(best_for(&recs, "g"), Some(1));
}

#[test]
fn test_candidates_are_capped_and_sorted() {
    let tables: Vec<Table> = (1..=5).map(|id| table(id, TableType::Round)).collect();
    let recs = run(&tables, &[guest("g", 0)]);
    let ids = candidate_ids(&recs, "g");
    assert_eq!(ids.len(), MAX_CANDIDATES);
    // equal scores fall back to table id
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn test_only_unplaced_guests_are_scored() {
    let tables = vec![table(1, TableType::Round)];
    let mut seated_elsewhere = guest("s", 0);
    seated_elsewhere
        .assignments
        .insert(Scope::Ceremony, Assignment::Seat { seat_id: 3 });
    let guests = vec![
        at(guest("placed", 0), 1),
        at(guest("orphan", 0), 99),
        seated_elsewhere,
    ];
    let recs = run(&tables, &guests);
    let ids: Vec<&str> = recs.iter().map(|r| r.guest_id.as_str()).collect();
    assert_eq!(ids, vec!["orphan", "s"]);
}

#[test]
fn test_guests_without_candidates_sort_last() {
    let tables = vec![table(1, TableType::Cocktail)];
    let guests = vec![guest("big", 10), guest("a", 0), guest("b", 3)];
    let recs = run(&tables, &guests);
    let ids: Vec<&str> = recs.iter().map(|r| r.guest_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a", "big"]);
    assert!(recs[2].candidates.is_empty());
    assert_eq!(recs[2].best_score(), None);
}

#[test]
fn test_state_accepts_best_recommendation() {
    let mut state = DesignerState::new();
    let first = state.add_table(TableType::Round, Some(Point::new(300.0, 300.0))).unwrap();
    let second = state.add_table(TableType::Cocktail, Some(Point::new(900.0, 300.0))).unwrap();
    state.set_guests(vec![guest("g", 3), guest("h", 0)]);

    state.set_remote_lock(second, Some("ana".to_string()));
    assert_eq!(state.accept_best_recommendation("g").unwrap(), Some(first));

    state.set_remote_lock(second, None);
    assert_eq!(state.accept_best_recommendation("h").unwrap(), Some(second));
    assert!(state.recommendations().is_empty());
    assert!(state.accept_best_recommendation("nobody").is_err());
}

proptest! {
    #[test]
    fn eligible_tables_always_fit_the_party(used in 0u32..10, companions in 0u32..10) {
        let tables = vec![table(1, TableType::Round)];
        let guests = vec![at(guest("x", used.saturating_sub(1)), 1), guest("g", companions)];
        let guests = if used == 0 { vec![guests[1].clone()] } else { guests };
        let locks = HashMap::new();
        let ctx = ScoringContext::new(RecommendationInput {
            scope: Scope::Banquet,
            tables: &tables,
            guests: &guests,
            conflicts: &[],
            remote_locks: &locks,
            weights: ScoringWeights::default(),
        });
        let g = guests.last().unwrap();
        for candidate in ctx.candidates_for(g) {
            prop_assert!(candidate.free_seats >= g.party_size());
        }
        let fits = ctx.free_seats(&tables[0]) >= g.party_size();
        prop_assert_eq!(!ctx.candidates_for(g).is_empty(), fits);
    }
}
