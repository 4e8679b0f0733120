//! Entries materialized by queries: decoding, lazy keywords and files.

use std::collections::HashSet;
use std::rc::Rc;

use aflux::catalog::{AGL_THERMAL_CONDUCTIVITY_300K as KAPPA, EGAP, FILES, SPECIES, VOLUME_CELL};
use aflux::{ClientConfig, Dir, FileError, Query, Value};
use aflux_test::{material, paper_fixture, FixtureTransport, PAPER_BATCH_SIZE};

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

fn aurl(ordinal: usize) -> String {
    material(ordinal)["aurl"].as_str().unwrap().to_string()
}

fn keyword_url(ordinal: usize, keyword: &str) -> String {
    format!("http://{}?{keyword}", aurl(ordinal).replace(".edu:", ".edu/"))
}

#[test]
fn fetched_attributes_are_typed() {
    let fixture = Rc::new(paper_fixture());
    let query = paper(&fixture);

    for entry in query.take(40) {
        let entry = entry.unwrap();
        let gap = entry.get(EGAP).and_then(Value::as_f64).unwrap();
        assert!(gap > 6.0);
        assert!(entry.get(KAPPA).and_then(Value::as_f64).is_some());
    }
}

#[test]
fn descending_order_is_preserved() {
    let fixture = Rc::new(paper_fixture());
    let query = paper(&fixture);

    let kappas: Vec<f64> = query
        .take(40)
        .map(|e| e.unwrap().get(KAPPA).and_then(Value::as_f64).unwrap())
        .collect();
    assert!(kappas.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn entries_are_distinct_by_auid() {
    let fixture = Rc::new(paper_fixture());
    let query = paper(&fixture);
    let unique: HashSet<_> = query.take(40).map(Result::unwrap).collect();
    assert_eq!(unique.len(), 40);
}

#[test]
fn lazy_keywords_use_the_query_transport() {
    let fixture = Rc::new(
        paper_fixture()
            .with_resource(keyword_url(1, "volume_cell"), "56.9766")
            .with_resource(keyword_url(1, "species"), "Be,O\n"),
    );
    let mut query = paper(&fixture);
    let mut entry = query.get(0).unwrap().unwrap();
    let transport = query.transport().clone();

    let volume = entry.load(VOLUME_CELL, &*transport).unwrap().cloned();
    assert_eq!(volume.and_then(|v| v.as_f64()), Some(56.9766));

    let species = entry.load(SPECIES, &*transport).unwrap().cloned();
    assert_eq!(
        species.as_ref().and_then(Value::as_texts),
        Some(&["Be".to_string(), "O".to_string()][..])
    );

    // Loaded keywords are kept.
    let before = fixture.request_count();
    entry.load(VOLUME_CELL, &*transport).unwrap();
    assert_eq!(fixture.request_count(), before);
}

#[test]
fn files_are_listed_and_downloaded() {
    let file_url = format!(
        "http://{}/CONTCAR.relax2",
        aurl(1).replace(':', "/")
    );
    let fixture = Rc::new(
        paper_fixture()
            .with_resource(
                keyword_url(1, "files"),
                "CONTCAR.relax,CONTCAR.relax1,CONTCAR.relax2,aflowlib.json",
            )
            .with_resource(file_url.clone(), "Be O\n1.0\n"),
    );
    let mut query = paper(&fixture);
    let mut entry = query.get(0).unwrap().unwrap();
    let transport = query.transport().clone();

    let files = entry.files(&*transport).unwrap();
    assert_eq!(files.len(), 4);
    assert!(entry.get(FILES).is_some());

    assert!(matches!(
        files.find("CONTCAR.relax*"),
        Err(FileError::Ambiguous { ref matches, .. }) if matches.len() == 3
    ));

    let contcar = files.find("CONTCAR.relax2").unwrap();
    assert_eq!(contcar.url(), file_url);

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("CONTCAR");
    let written = contcar.download(&*transport, &target).unwrap();
    assert!(written.is_absolute());
    assert_eq!(std::fs::read_to_string(written).unwrap(), "Be O\n1.0\n");
}

#[test]
fn missing_files_keyword_gives_an_empty_listing() {
    let fixture = Rc::new(paper_fixture().with_resource(keyword_url(2, "files"), ""));
    let mut query = paper(&fixture);
    let mut entry = query.get(1).unwrap().unwrap();
    let transport = query.transport().clone();

    let files = entry.files(&*transport).unwrap();
    assert!(files.is_empty());
    assert!(matches!(files.find("*"), Err(FileError::NoMatch { .. })));
}
