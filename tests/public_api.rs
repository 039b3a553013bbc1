use morpheval::{
    evaluate, evaluation_report, Corpus, DivByZeroStrat, EvalConfigBuilder, LevelMetrics,
    Partition, Reporter, Vocabulary,
};

const LEVEL: usize = 2;

pub trait CloseEnough {
    fn are_close(&self, other: &Self, eps: f32) -> bool;
}

// LevelMetrics does not have the default PartialEq implementation.
impl CloseEnough for LevelMetrics {
    fn are_close(&self, other: &Self, eps: f32) -> bool {
        let are_equal = self == other;
        let precision_is_equal = f32::abs(self.precision - other.precision) < eps;
        let recall_is_equal = f32::abs(self.recall - other.recall) < eps;
        let fscore_is_equal = f32::abs(self.fscore - other.fscore) < eps;
        let counts_are_equal = (self.true_positives, self.false_positives, self.false_negatives)
            == (other.true_positives, other.false_positives, other.false_negatives);
        are_equal && precision_is_equal && recall_is_equal && fscore_is_equal && counts_are_equal
    }
}

fn row(
    level: usize,
    partition: Partition,
    precision: f32,
    recall: f32,
    fscore: f32,
    counts: (usize, usize, usize),
) -> LevelMetrics {
    LevelMetrics {
        level,
        partition,
        precision,
        recall,
        fscore,
        true_positives: counts.0,
        false_positives: counts.1,
        false_negatives: counts.2,
    }
}

fn assert_rows_close(reporter: &Reporter, expected: &[LevelMetrics]) {
    for expected_row in expected {
        let actual = reporter
            .get(expected_row.level, expected_row.partition)
            .expect("missing row");
        assert!(
            actual.are_close(expected_row, 0.001),
            "expected {:?}, got {:?}",
            expected_row,
            actual
        );
    }
}

#[test]
fn comparison_to_reference_scores() {
    let config = EvalConfigBuilder::default().level(LEVEL).build();
    let reporter =
        evaluation_report("tests/data/system.txt", "tests/data/gold.txt", config).unwrap();
    assert_rows_close(
        &reporter,
        &[
            row(0, Partition::Overall, 0.8571, 0.7500, 0.8000, (6, 1, 2)),
            row(1, Partition::Overall, 0.7143, 0.6250, 0.6667, (5, 2, 3)),
            row(2, Partition::Overall, 0.5714, 0.5000, 0.5333, (4, 3, 4)),
        ],
    );
    assert_eq!(reporter.rows().count(), 3);
}

#[test]
fn training_corpus_splits_the_scores() {
    let config = EvalConfigBuilder::default()
        .level(LEVEL)
        .training_corpus("tests/data/train.txt")
        .build();
    let reporter =
        evaluation_report("tests/data/system.txt", "tests/data/gold.txt", config).unwrap();
    assert_rows_close(
        &reporter,
        &[
            row(0, Partition::Seen, 0.7500, 1.0000, 0.8571, (3, 1, 0)),
            row(0, Partition::Unseen, 1.0000, 0.6000, 0.7500, (3, 0, 2)),
            row(2, Partition::Seen, 0.5000, 0.6667, 0.5714, (2, 2, 1)),
            row(2, Partition::Unseen, 0.6667, 0.4000, 0.5000, (2, 1, 3)),
        ],
    );
    assert_eq!(reporter.rows().count(), 9);
}

#[test]
fn dictionary_vocabulary_matches_training_vocabulary() {
    let train = EvalConfigBuilder::default()
        .level(LEVEL)
        .training_corpus("tests/data/train.txt")
        .build();
    let dict = EvalConfigBuilder::default()
        .level(LEVEL)
        .dictionary("tests/data/dict.csv")
        .build();
    let from_train =
        evaluation_report("tests/data/system.txt", "tests/data/gold.txt", train).unwrap();
    let from_dict =
        evaluation_report("tests/data/system.txt", "tests/data/gold.txt", dict).unwrap();
    for expected in from_train.rows() {
        let actual = from_dict
            .get(expected.level, expected.partition)
            .expect("missing row");
        assert!(actual.are_close(expected, 1e-6));
    }
}

#[test]
fn evaluating_a_file_against_itself_is_perfect_at_every_level() {
    let gold = Corpus::from_path("tests/data/gold.txt", LEVEL).unwrap();
    let reporter = evaluate(
        &gold,
        &gold,
        &Vocabulary::default(),
        LEVEL,
        DivByZeroStrat::ReplaceBy0,
    )
    .unwrap();
    for level in 0..=LEVEL {
        let expected = row(
            level,
            Partition::Overall,
            1.0,
            1.0,
            1.0,
            (gold.token_count(), 0, 0),
        );
        assert_rows_close(&reporter, &[expected]);
    }
}

#[test]
fn corpus_round_trips_through_its_serialized_form() {
    let gold = Corpus::from_path("tests/data/gold.txt", LEVEL).unwrap();
    let reparsed = Corpus::from_reader(gold.to_tagged_string().as_bytes(), LEVEL).unwrap();
    assert_eq!(gold, reparsed);
}
