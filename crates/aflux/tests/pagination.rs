//! Lazy pagination against canned AFLUX pages.

use std::rc::Rc;

use aflux::catalog::{AGL_THERMAL_CONDUCTIVITY_300K as KAPPA, EGAP};
use aflux::{ClientConfig, Dir, Entry, Query, QueryError};
use aflux_test::{page, paper_fixture, paging, FixtureTransport, PAPER_BATCH_SIZE, PAPER_TOTAL};

// ============================================================================
// Test helpers
// ============================================================================

fn paper(fixture: &Rc<FixtureTransport>) -> Query {
    let config = ClientConfig::default().with_batch_size(PAPER_BATCH_SIZE);
    Query::from_config(&config, fixture.clone())
        .select([KAPPA])
        .unwrap()
        .filter(EGAP.gt(6))
        .unwrap()
        .orderby(KAPPA, Dir::Desc)
        .unwrap()
}

fn collect(query: Query) -> Vec<Entry> {
    query.collect::<Result<Vec<_>, _>>().unwrap()
}

// ============================================================================
// The heat-sink search
// ============================================================================

#[test]
fn paper_query_matchbook() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);
    assert_eq!(
        query.matchbook().unwrap(),
        "agl_thermal_conductivity_300K,Egap(!*6)"
    );
    assert_eq!(fixture.request_count(), 0);
}

#[test]
fn paper_query_length() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);
    assert_eq!(query.len().unwrap(), PAPER_TOTAL);
    assert_eq!(
        fixture.requests(),
        ["http://aflowlib.duke.edu/search/API/?agl_thermal_conductivity_300K,Egap(!*6),paging(-1,20)"]
    );

    // The total is cached.
    assert_eq!(query.len().unwrap(), PAPER_TOTAL);
    assert_eq!(fixture.request_count(), 1);
}

#[test]
fn paper_query_iterates_across_pages() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    let entries = collect(query.slice(..40).unwrap());
    assert_eq!(entries.len(), 40);

    for (i, entry) in entries.iter().enumerate() {
        let expected = aflux_test::material(i + 1);
        assert_eq!(entry.raw(), expected.as_object().unwrap(), "record {i}");
    }

    let pages: Vec<i64> = fixture
        .requests()
        .iter()
        .filter_map(|url| paging(url).map(|(n, _)| n))
        .collect();
    assert_eq!(pages, [-1, -2]);
}

#[test]
fn records_come_from_the_page_of_their_rank() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    let first_page = page(1..=20, PAPER_TOTAL);
    let second_page = page(21..=40, PAPER_TOTAL);

    for (i, entry) in query.slice(..40).unwrap().enumerate() {
        let entry = entry.unwrap();
        let key = format!("{} of {}", i + 1, PAPER_TOTAL);
        let source = if i < 20 { &first_page } else { &second_page };
        assert_eq!(Some(&serde_json::Value::Object(entry.raw().clone())), source.get(&key));
    }
}

#[test]
fn seeded_pages_need_no_requests() {
    let fixture = Rc::new(FixtureTransport::new());
    let mut query = paper(&fixture);
    query.insert_page(-1, page(1..=20, PAPER_TOTAL)).unwrap();
    query.insert_page(-2, page(21..=40, PAPER_TOTAL)).unwrap();

    assert_eq!(query.len().unwrap(), PAPER_TOTAL);
    let entries = collect(query.slice(..40).unwrap());
    assert_eq!(entries.len(), 40);
    assert_eq!(fixture.request_count(), 0);
}

#[test]
fn reslicing_reuses_cached_pages() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    let first = collect(query.slice(0..40).unwrap());
    let requests = fixture.request_count();
    assert_eq!(requests, 2);

    let second = collect(query.slice(0..40).unwrap());
    assert_eq!(first, second);
    assert_eq!(fixture.request_count(), requests);

    let tail = collect(query.slice(25..30).unwrap());
    assert_eq!(tail.len(), 5);
    assert_eq!(tail[0], first[25]);
    assert_eq!(fixture.request_count(), requests);
}

#[test]
fn indexing_shares_the_cache() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    let e25 = query.get(25).unwrap().unwrap();
    assert_eq!(e25.raw(), aflux_test::material(26).as_object().unwrap());
    assert_eq!(query.cached_pages(), 2);

    // The original cursor did not move.
    assert_eq!(query.position(), 0);
    let e0 = query.get(0).unwrap().unwrap();
    assert_eq!(e0.raw(), aflux_test::material(1).as_object().unwrap());
    assert_eq!(fixture.request_count(), 2);
}

#[test]
fn direct_iteration_and_rewind() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    let first: Vec<Entry> = query.by_ref().take(40).map(Result::unwrap).collect();
    assert_eq!(first.len(), 40);
    assert_eq!(query.position(), 40);

    query.rewind();
    assert_eq!(query.position(), 0);
    let again: Vec<Entry> = query.by_ref().take(40).map(Result::unwrap).collect();
    assert_eq!(first, again);
    assert_eq!(fixture.request_count(), 2);
}

#[test]
fn past_the_cached_pages_is_a_fetch_error() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);

    // Page -3 is not part of the fixture.
    match query.get(40) {
        Err(QueryError::Fetch(err)) => {
            assert!(err.url().unwrap().ends_with("paging(-3,20)"));
        }
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

#[test]
fn beyond_the_total_is_end_of_sequence() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);
    assert!(query.get(PAPER_TOTAL).unwrap().is_none());
    assert!(query.slice(PAPER_TOTAL..).unwrap().next().is_none());
}

// ============================================================================
// Ascending queries and small pages
// ============================================================================

#[test]
fn ascending_queries_request_positive_pages() {
    let fixture = Rc::new(
        FixtureTransport::new()
            .with_page(1, page(1..=2, 5))
            .with_page(2, page(3..=4, 5))
            .with_page(3, page(5..=5, 5)),
    );
    let config = ClientConfig::default().with_batch_size(2);
    let query = Query::from_config(&config, fixture.clone())
        .filter(EGAP.gt(6))
        .unwrap();

    let entries = collect(query);
    assert_eq!(entries.len(), 5);

    let pages: Vec<i64> = fixture
        .requests()
        .iter()
        .filter_map(|url| paging(url).map(|(n, _)| n))
        .collect();
    assert_eq!(pages, [1, 2, 3]);
}

#[test]
fn malformed_pages_surface_url_and_body() {
    let fixture = Rc::new(FixtureTransport::new().with_page_text(1, "<html>busy</html>"));
    let mut query = Query::new(fixture.clone()).filter(EGAP.gt(6)).unwrap();

    match query.len() {
        Err(QueryError::Fetch(err)) => {
            assert_eq!(err.body(), Some("<html>busy</html>"));
            assert!(err.url().unwrap().contains("Egap(!*6)"));
        }
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn finalized_queries_reject_mutation() {
    let fixture = Rc::new(paper_fixture());
    let mut query = paper(&fixture);
    let before = query.matchbook().unwrap();
    let first = query.next().unwrap().unwrap();

    let rejected = query.filter(EGAP.lt(7)).unwrap_err();
    assert!(matches!(rejected.error, QueryError::Finalized { op: "filter" }));

    // The same query comes back with its cursor and cache intact.
    let mut query = rejected.into_query();
    assert_eq!(query.matchbook().unwrap(), before);
    assert_eq!(query.position(), 1);
    let second = query.next().unwrap().unwrap();
    assert_eq!(second.raw(), aflux_test::material(2).as_object().unwrap());
    assert_ne!(first, second);
    assert_eq!(fixture.request_count(), 1);
}

#[test]
fn a_failed_page_is_requested_once() {
    let fixture = Rc::new(paper_fixture());
    let query = paper(&fixture);

    // Pages -3 and -4 are not part of the fixture.
    let results: Vec<_> = query.take(42).collect();
    let errors = results.iter().filter(|r| r.is_err()).count();
    assert_eq!(errors, 2);

    let pages: Vec<i64> = fixture
        .requests()
        .iter()
        .filter_map(|url| paging(url).map(|(n, _)| n))
        .collect();
    assert_eq!(pages, [-1, -2, -3, -4]);
}
