#[cfg(feature = "send")]
use studyquery::prelude::*;

#[cfg(feature = "send")]
fn assert_send_sync<T: Send + Sync>() {}

#[test]
#[cfg(feature = "send")]
fn test_send_sync() {
    assert_send_sync::<Phrase>();
    assert_send_sync::<SearchClause>();
    assert_send_sync::<Query>();
    assert_send_sync::<QueryUpdate>();
    assert_send_sync::<StudyRecord>();
    assert_send_sync::<FieldMatcher>();
}

#[test]
#[cfg(feature = "send")]
fn test_shared_query_across_threads() {
    let q: Query = "breast -tcga".parse().unwrap();
    let records: Vec<StudyRecord> = vec![
        [(FieldTag::Name, "Breast Cancer (METABRIC)")].into(),
        [(FieldTag::Name, "Breast Invasive Carcinoma (TCGA)")].into(),
        [(FieldTag::Name, "Lung Adenocarcinoma")].into(),
    ];

    let shared = &q;
    let matched: Vec<bool> = std::thread::scope(|s| {
        let handles: Vec<_> = records
            .iter()
            .map(|r| s.spawn(move || shared.matches(r)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(matched, vec![true, false, false]);

    // Every thread edits its own copy; the shared query is untouched.
    let edited: Vec<Query> = std::thread::scope(|s| {
        let handles: Vec<_> = ["msk", "lung"]
            .into_iter()
            .map(|w| {
                let update = QueryUpdate::new().add(SearchClause::not(Phrase::plain(w)));
                s.spawn(move || shared.apply_update(&update))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(q.to_string(), "breast - tcga");
    assert!(edited.iter().all(|e| e.len() == 3));
}
