// tests/dataset_tests.rs

use std::cell::RefCell;
use std::rc::Rc;

use mqp_loader::config::builder::SOURCE_URL;
use mqp_loader::data_model::{Example, FeatureType, Split};
use mqp_loader::dataset::{describe, generate_examples, resolve_splits, MqpDataset};
use mqp_loader::error::{DatasetError, Result};
use mqp_loader::pipeline::readers::{CsvFetcher, InMemoryCsvFetcher, Row, SplitRows};
use mqp_loader::Configuration;

const THREE_ROWS: [&str; 3] = ["d1,q1,q1b,1", "d2,q2,q2b,0", "d3,q3,q3b,1"];

// Records every call and serves canned splits.
#[derive(Clone, Default)]
struct RecordingFetcher {
    calls: Rc<RefCell<Vec<(String, Vec<String>)>>>,
    splits: SplitRows,
}

impl RecordingFetcher {
    fn with_splits(splits: SplitRows) -> Self {
        RecordingFetcher {
            calls: Rc::default(),
            splits,
        }
    }
}

impl CsvFetcher for RecordingFetcher {
    fn fetch_csv(&self, locator: &str, column_names: &[&str]) -> Result<SplitRows> {
        self.calls.borrow_mut().push((
            locator.to_string(),
            column_names.iter().map(|c| c.to_string()).collect(),
        ));
        Ok(self.splits.clone())
    }
}

struct FailingFetcher;

impl CsvFetcher for FailingFetcher {
    fn fetch_csv(&self, locator: &str, _column_names: &[&str]) -> Result<SplitRows> {
        Err(DatasetError::ResourceUnavailable {
            locator: locator.to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

fn rows(lines: &[&str]) -> Vec<Row> {
    lines
        .iter()
        .map(|line| line.split(',').map(|v| v.to_string()).collect())
        .collect()
}

fn collect(dataset: &MqpDataset) -> Vec<(usize, Example)> {
    dataset
        .examples()
        .expect("fetch should succeed")
        .collect::<Result<Vec<_>>>()
        .expect("every row should be well formed")
}

#[test]
fn describe_returns_exact_field_sets() {
    let source = describe("source").unwrap();
    assert_eq!(source.names(), vec!["document_id", "text_1", "text_2", "label"]);
    assert!(source
        .fields()
        .iter()
        .all(|f| f.dtype == FeatureType::String));

    let bigbio = describe("bigbio").unwrap();
    assert_eq!(
        bigbio.names(),
        vec!["id", "document_id", "text_1", "text_2", "label"]
    );
    assert_eq!(bigbio.get("id").unwrap().dtype, FeatureType::Int64);
}

#[test]
fn unknown_configuration_fails_everywhere() {
    for name in ["", "BIGBIO", "bigbio_pairs", "source "] {
        assert!(matches!(
            describe(name),
            Err(DatasetError::UnknownConfiguration(_))
        ));
        assert!(matches!(
            resolve_splits(name),
            Err(DatasetError::UnknownConfiguration(_))
        ));

        let fetcher = RecordingFetcher::default();
        assert!(matches!(
            generate_examples(name, SOURCE_URL, &fetcher),
            Err(DatasetError::UnknownConfiguration(_))
        ));
        assert!(
            fetcher.calls.borrow().is_empty(),
            "nothing should be fetched for an unknown configuration"
        );

        assert!(matches!(
            MqpDataset::from_name(name, Box::new(FailingFetcher)),
            Err(DatasetError::UnknownConfiguration(_))
        ));
    }
}

#[test]
fn resolve_splits_is_a_single_train_split() {
    for name in ["source", "bigbio"] {
        let splits = resolve_splits(name).unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].name, Split::Train);
        assert_eq!(splits[0].name.to_string(), "train");
        assert_eq!(splits[0].locator, SOURCE_URL);
    }

    let dataset = MqpDataset::new(Configuration::Bigbio, Box::new(FailingFetcher))
        .with_locator("/data/mqp.csv");
    let splits = dataset.split_generators();
    assert_eq!(splits.len(), 1);
    assert_eq!(splits[0].locator, "/data/mqp.csv");
}

#[test]
fn source_round_trip_of_three_rows() {
    let dataset = MqpDataset::new(
        Configuration::Source,
        Box::new(InMemoryCsvFetcher::from_lines(&THREE_ROWS)),
    );
    let examples = collect(&dataset);

    let expected = [
        ("d1", "q1", "q1b", "1"),
        ("d2", "q2", "q2b", "0"),
        ("d3", "q3", "q3b", "1"),
    ];
    assert_eq!(examples.len(), 3);
    for (position, ((index, example), (doc, t1, t2, label))) in
        examples.iter().zip(expected.iter()).enumerate()
    {
        assert_eq!(*index, position);
        match example {
            Example::Source(record) => {
                assert_eq!(record.document_id, *doc);
                assert_eq!(record.text_1, *t1);
                assert_eq!(record.text_2, *t2);
                assert_eq!(record.label, *label);
            }
            other => panic!("Expected a source example, got {:?}", other),
        }
    }
}

#[test]
fn bigbio_adds_ids_starting_at_one() {
    let source = MqpDataset::new(
        Configuration::Source,
        Box::new(InMemoryCsvFetcher::from_lines(&THREE_ROWS)),
    );
    let bigbio = MqpDataset::new(
        Configuration::Bigbio,
        Box::new(InMemoryCsvFetcher::from_lines(&THREE_ROWS)),
    );

    let source_examples = collect(&source);
    let bigbio_examples = collect(&bigbio);
    assert_eq!(bigbio_examples.len(), 3);

    for ((s_index, s_example), (b_index, b_example)) in
        source_examples.iter().zip(bigbio_examples.iter())
    {
        assert_eq!(s_index, b_index);
        assert_eq!(b_example.id(), Some(*b_index as u64 + 1));
        assert_eq!(s_example.document_id(), b_example.document_id());
        assert_eq!(s_example.text_1(), b_example.text_1());
        assert_eq!(s_example.text_2(), b_example.text_2());
        assert_eq!(s_example.label(), b_example.label());
    }
}

#[test]
fn bigbio_ids_have_no_gaps_for_any_row_count() {
    for count in [0usize, 1, 2, 17, 250] {
        let lines: Vec<String> = (0..count)
            .map(|i| format!("doc{i},question {i},paraphrase {i},{}", i % 2))
            .collect();
        let dataset = MqpDataset::new(
            Configuration::Bigbio,
            Box::new(InMemoryCsvFetcher::from_lines(&lines)),
        );
        let ids: Vec<u64> = collect(&dataset)
            .into_iter()
            .map(|(_, example)| example.id().expect("bigbio examples carry an id"))
            .collect();
        let expected: Vec<u64> = (1..=count as u64).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn each_invocation_recomputes_ids() {
    let dataset = MqpDataset::new(
        Configuration::Bigbio,
        Box::new(InMemoryCsvFetcher::from_lines(&THREE_ROWS)),
    );
    let first = collect(&dataset);
    let second = collect(&dataset);
    assert_eq!(first, second);
    assert_eq!(second[0].1.id(), Some(1));
}

#[test]
fn short_row_is_malformed_not_padded() {
    let dataset = MqpDataset::new(
        Configuration::Source,
        Box::new(InMemoryCsvFetcher::from_lines(&[
            "d1,q1,q1b,1",
            "d2,q2,0",
            "d3,q3,q3b,1",
        ])),
    );
    let results: Vec<Result<(usize, Example)>> = dataset.examples().unwrap().collect();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(DatasetError::MalformedRow {
            row,
            expected,
            found,
        }) => {
            assert_eq!(*row, 1);
            assert_eq!(*expected, 4);
            assert_eq!(*found, 3);
        }
        other => panic!("Expected MalformedRow, got {:?}", other),
    }
    // Later rows keep their positions.
    assert_eq!(results[2].as_ref().unwrap().0, 2);

    let collected: Result<Vec<_>> = dataset.examples().unwrap().collect();
    assert!(matches!(collected, Err(DatasetError::MalformedRow { .. })));
}

#[test]
fn fetcher_receives_locator_and_column_names() {
    let mut splits = SplitRows::new();
    splits.insert("train", rows(&THREE_ROWS));
    let fetcher = RecordingFetcher::with_splits(splits);
    let calls = fetcher.calls.clone();

    let dataset = MqpDataset::new(Configuration::Source, Box::new(fetcher))
        .with_locator("https://mirror.example.org/mqp.csv");
    assert_eq!(collect(&dataset).len(), 3);

    let calls = calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "https://mirror.example.org/mqp.csv");
    assert_eq!(calls[0].1, vec!["document_id", "text_1", "text_2", "label"]);
}

#[test]
fn index_runs_across_splits_in_fetcher_order() {
    let mut splits = SplitRows::new();
    splits.insert("train", rows(&["d1,q1,q1b,1", "d2,q2,q2b,0"]));
    splits.insert("test", rows(&["d3,q3,q3b,1"]));
    let fetcher = RecordingFetcher::with_splits(splits);

    let examples: Vec<(usize, Example)> = generate_examples("bigbio", "unused", &fetcher)
        .unwrap()
        .collect::<Result<_>>()
        .unwrap();
    let seen: Vec<(usize, Option<u64>, &str)> = examples
        .iter()
        .map(|(i, e)| (*i, e.id(), e.document_id()))
        .collect();
    assert_eq!(
        seen,
        vec![(0, Some(1), "d1"), (1, Some(2), "d2"), (2, Some(3), "d3")]
    );
}

#[test]
fn fetch_failures_propagate_unmodified() {
    let dataset = MqpDataset::new(Configuration::Source, Box::new(FailingFetcher));
    match dataset.examples() {
        Err(DatasetError::ResourceUnavailable { locator, reason }) => {
            assert_eq!(locator, SOURCE_URL);
            assert_eq!(reason, "connection refused");
        }
        Err(other) => panic!("Expected ResourceUnavailable, got {:?}", other),
        Ok(_) => panic!("Expected the fetch to fail"),
    }
}

#[test]
fn info_matches_configuration() {
    let dataset = MqpDataset::from_name("bigbio", Box::new(FailingFetcher)).unwrap();
    let info = dataset.info();
    assert_eq!(info.config_name, "bigbio");
    assert_eq!(info.version, "1.0.0");
    assert!(info.description.starts_with("Medical Question Pairs dataset"));
    assert!(info.citation.contains("medical-question-pair-dataset"));
    assert_eq!(info.features, dataset.features());
}
