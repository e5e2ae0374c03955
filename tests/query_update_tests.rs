use studyquery::prelude::*;

fn p(s: &str) -> Phrase {
    Phrase::plain(s)
}

#[test]
fn test_remove_and_add() {
    let current = vec![
        SearchClause::and(vec![p("x"), p("y")]),
        SearchClause::not(p("z")),
    ];
    let update = QueryUpdate::from_parts(vec![SearchClause::not(p("x"))], vec![p("y")]);
    assert_eq!(
        apply_query_update(&current, &update),
        vec![
            SearchClause::and(vec![p("x")]),
            SearchClause::not(p("z")),
            SearchClause::not(p("x")),
        ]
    );
}

#[test]
fn test_add_existing_clause() {
    let q = Query::new(vec![SearchClause::not(p("x"))]);
    let q2 = q.apply_update(&QueryUpdate::new().add(SearchClause::not(p("x"))));
    assert_eq!(q2.clauses(), &[SearchClause::not(p("x"))]);
    assert_eq!(q2.len(), 1);
}

#[test]
fn test_remove_last_phrase() {
    let q = Query::new(vec![SearchClause::and(vec![p("x")])]);
    assert!(q.apply_update(&QueryUpdate::new().remove(p("x"))).is_empty());
    // The original is untouched.
    assert_eq!(q.len(), 1);
}

#[test]
fn test_remove_is_idempotent() {
    let q: Query = "a b -c -d study:e".parse().unwrap();
    for removed in [p("a"), p("c"), Phrase::scoped(FieldTag::StudyId, "e"), p("e")] {
        let u = QueryUpdate::new().remove(removed);
        let once = q.apply_update(&u);
        let twice = once.apply_update(&u);
        assert_eq!(once.clauses(), twice.clauses());
    }
}

#[test]
fn test_no_contradiction_after_edit() {
    // Turning "x" into "- x": remove the phrase and add the negation.
    let q: Query = "x y".parse().unwrap();
    let q = q.apply_update(&QueryUpdate::new().remove(p("x")).add(SearchClause::not(p("x"))));
    assert_eq!(q.to_string(), "y - x");

    // And back.
    let q = q.apply_update(
        &QueryUpdate::new()
            .remove(p("x"))
            .add(SearchClause::and(vec![p("x")])),
    );
    assert_eq!(q.to_string(), "y x");
    assert_eq!(q.phrases().filter(|ph| **ph == p("x")).count(), 1);
}

#[test]
fn test_filtering_with_updates() {
    let studies: Vec<StudyRecord> = vec![
        [(FieldTag::Name, "Breast Cancer (METABRIC)"), (FieldTag::ReferenceGenome, "hg19")].into(),
        [(FieldTag::Name, "Breast Cancer (MSK, 2018)"), (FieldTag::ReferenceGenome, "hg38")].into(),
        [(FieldTag::Name, "Lung Cancer (MSK)"), (FieldTag::ReferenceGenome, "hg19")].into(),
    ];
    let hits = |q: &Query| studies.iter().filter(|s| q.matches(*s)).count();

    let q: Query = "breast".parse().unwrap();
    assert_eq!(hits(&q), 2);

    let q = q.apply_update(&QueryUpdate::new().add(SearchClause::not(p("msk"))));
    assert_eq!(hits(&q), 1);

    let q = q.apply_update(
        &QueryUpdate::new()
            .remove(p("breast"))
            .add(SearchClause::and(vec![Phrase::scoped(FieldTag::ReferenceGenome, "hg19")])),
    );
    assert_eq!(q.to_string(), "- msk reference-genome:hg19");
    assert_eq!(hits(&q), 1);

    let q = q.apply_update(&QueryUpdate::new().remove(p("msk")));
    assert_eq!(hits(&q), 2);
}
