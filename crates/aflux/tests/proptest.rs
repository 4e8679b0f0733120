//! Property-based tests for cursor arithmetic and matchbook assembly.

use std::rc::Rc;

use aflux::catalog::{self, ALL};
use aflux::control::{Cursor, PageSlot};
use aflux::{Dir, Field, Query};
use aflux_test::FixtureTransport;
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn field_strategy() -> impl Strategy<Value = Field> {
    prop::sample::select(ALL.to_vec())
}

#[derive(Debug, Clone)]
enum Step {
    Filter(Field, i64),
    Select(Field),
    Exclude(Field),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (field_strategy(), any::<i64>()).prop_map(|(f, v)| Step::Filter(f, v)),
        field_strategy().prop_map(Step::Select),
        field_strategy().prop_map(Step::Exclude),
    ]
}

fn apply(query: Query, step: &Step) -> Query {
    match step {
        Step::Filter(field, v) => query.filter(field.gt(*v)),
        Step::Select(field) => query.select([*field]),
        Step::Exclude(field) => query.exclude([*field]),
    }
    .unwrap()
}

fn matchbook_of(steps: &[Step]) -> String {
    let query = Query::new(Rc::new(FixtureTransport::new()));
    let mut query = steps.iter().fold(query, apply);
    query.matchbook().unwrap()
}

// Stable sort by kind keeps the relative order within each kind.
fn kind(step: &Step) -> u8 {
    match step {
        Step::Select(_) => 0,
        Step::Filter(..) => 1,
        Step::Exclude(_) => 2,
    }
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A position is recovered from its page slot in both directions.
    #[test]
    fn slot_round_trips(i in 0usize..1_000_000, k in 1usize..500, desc in any::<bool>()) {
        let dir = Dir::from_reverse(desc);
        let slot = PageSlot::locate(i, k, dir);

        prop_assert!(slot.offset < k);
        prop_assert!(slot.page != 0);
        prop_assert_eq!(slot.page < 0, desc);
        prop_assert_eq!(slot.ordinal(k), i + 1);
    }

    /// A bounded cursor visits exactly `remaining` positions.
    #[test]
    fn cursor_visits_remaining(
        start in 0usize..200,
        len in 0usize..200,
        step in 1usize..7,
        total in 0usize..300,
    ) {
        let mut cursor = Cursor::bounded(start, Some(start + len), step);
        let expected = cursor.remaining(total);

        let mut visited = 0;
        while !cursor.is_exhausted(total) {
            visited += 1;
            cursor.advance();
        }
        prop_assert_eq!(visited, expected);
    }

    /// Grouping by kind happens regardless of call order.
    #[test]
    fn matchbook_groups_by_kind(steps in prop::collection::vec(step_strategy(), 0..8)) {
        let mut grouped = steps.clone();
        grouped.sort_by_key(kind);
        prop_assert_eq!(matchbook_of(&steps), matchbook_of(&grouped));
    }

    /// The order-by keyword leads and is never repeated as a select.
    #[test]
    fn orderby_leads(fields in prop::collection::vec(field_strategy(), 1..6), desc in any::<bool>()) {
        let order = fields[0];
        let mut query = Query::new(Rc::new(FixtureTransport::new()))
            .select(fields.iter().copied())
            .unwrap()
            .orderby(order, Dir::from_reverse(desc))
            .unwrap();
        let matchbook = query.matchbook().unwrap();

        let parts: Vec<&str> = matchbook.split(',').collect();
        prop_assert_eq!(parts[0], order.name());
        prop_assert_eq!(parts.iter().filter(|p| **p == order.name()).count(), 1);
    }
}

#[test]
fn catalog_fields_render_bare_in_selects() {
    let mut query = Query::new(Rc::new(FixtureTransport::new()))
        .select([catalog::SPECIES, catalog::GEOMETRY])
        .unwrap();
    assert_eq!(query.matchbook().unwrap(), "species,geometry");
}
