/**
This module renders the evaluation results. Rows are keyed by comparison
level and partition and print one summary line each, deepest level last,
with the seen/unseen breakdown (when present) right under its level's
overall line.
*/
use crate::metrics::{compute_scores, CounterSet, DivByZeroStrat, DivisionByZeroError, Partition};
use enum_iterator::all;
use itertools::multizip;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt::{self, Display};
use std::hash::Hash;

/// The reporter holds one metrics row per level and partition. Displaying it
/// prints the whole score table; it can also be consumed into a `HashSet` or
/// queried row by row. Build it through the evaluation entry points.
///
/// # Example
///
/// ```rust
/// use morpheval::{evaluate, Corpus, DivByZeroStrat, Vocabulary};
///
/// let gold = Corpus::from_reader("ab\tN\nc\tV\nEOS\n".as_bytes(), 1).unwrap();
/// let system = Corpus::from_reader("ab\tV\nc\tV\nEOS\n".as_bytes(), 1).unwrap();
///
/// let reporter = evaluate(
///     &system,
///     &gold,
///     &Vocabulary::default(),
///     1,
///     DivByZeroStrat::ReplaceBy0,
/// )
/// .unwrap();
///
/// let expected = "\
/// LEVEL 0:   P / R / F1 = (1.0000, 1.0000, 1.0000); (tp, fp, fn) = (     2,      0,      0)
/// LEVEL 1:   P / R / F1 = (0.5000, 0.5000, 0.5000); (tp, fp, fn) = (     1,      1,      1)\n";
///
/// assert_eq!(expected, reporter.to_string());
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Reporter {
    pub(crate) rows: BTreeSet<LevelMetrics>,
}

impl Reporter {
    pub(crate) fn insert(&mut self, row: LevelMetrics) -> bool {
        self.rows.insert(row)
    }

    /// Builds the score table of a finished accumulation. Fails only under
    /// [`DivByZeroStrat::ReturnError`] with a degenerate denominator.
    pub(crate) fn from_counters(
        counters: &CounterSet,
        zero_division: DivByZeroStrat,
    ) -> Result<Self, DivisionByZeroError> {
        let mut reporter = Reporter::default();
        for partition in all::<Partition>() {
            let bank = match counters.for_partition(partition) {
                Some(bank) => bank,
                None => continue,
            };
            let scores = compute_scores(bank, zero_division)?;
            for (level, precision, recall, fscore, tp, fp, fn_sum) in multizip((
                0..,
                scores.precision.iter(),
                scores.recall.iter(),
                scores.fscore.iter(),
                bank.true_positives().iter(),
                bank.false_positives().iter(),
                bank.false_negatives().iter(),
            )) {
                reporter.insert(LevelMetrics {
                    level,
                    partition,
                    precision: *precision,
                    recall: *recall,
                    fscore: *fscore,
                    true_positives: *tp,
                    false_positives: *fp,
                    false_negatives: *fn_sum,
                });
            }
        }
        Ok(reporter)
    }

    /// Rows in display order: level ascending, overall before seen before
    /// unseen.
    pub fn rows(&self) -> impl Iterator<Item = &LevelMetrics> {
        self.rows.iter()
    }

    /// Looks a row up by its key. Equality and ordering of rows ignore the
    /// metric values, so a probe row with empty metrics finds the real one.
    pub fn get(&self, level: usize, partition: Partition) -> Option<&LevelMetrics> {
        self.rows.get(&LevelMetrics {
            level,
            partition,
            precision: 0.0,
            recall: 0.0,
            fscore: 0.0,
            true_positives: 0,
            false_positives: 0,
            false_negatives: 0,
        })
    }
}

/// By converting the reporter into a `HashSet` of rows, you lose the display
/// ordering. If you mean to consume the data without prettyprinting it, this
/// is not a problem.
impl From<Reporter> for HashSet<LevelMetrics> {
    fn from(value: Reporter) -> Self {
        value.rows.into_iter().collect()
    }
}

/// The Reporter struct acts as the full score table when displayed.
impl Display for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows.iter() {
            writeln!(f, "{}", row)?
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
/// One line of the score table: the metrics of a single comparison level for
/// one partition. Rows compare and hash by their `(level, partition)` key
/// only, which lets a set of rows behave as a table.
pub struct LevelMetrics {
    /// Depth of feature comparison; level 0 scores segmentation only.
    pub level: usize,
    /// Overall, or one side of the seen/unseen vocabulary split.
    pub partition: Partition,
    /// Precision metric, `tp / (tp + fp)`
    pub precision: f32,
    /// Recall metric, `tp / (tp + fn)`
    pub recall: f32,
    /// F1 metric, the harmonic mean of precision and recall
    pub fscore: f32,
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
}

impl PartialEq for LevelMetrics {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level && self.partition == other.partition
    }
}
impl Eq for LevelMetrics {}

impl Hash for LevelMetrics {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.level.hash(state);
        self.partition.hash(state);
    }
}

#[allow(clippy::non_canonical_partial_ord_impl)]
impl PartialOrd for LevelMetrics {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.level.cmp(&other.level) {
            std::cmp::Ordering::Equal => self.partition.partial_cmp(&other.partition),
            v => Some(v),
        }
    }
}

impl Ord for LevelMetrics {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// A row prints as one line of the score table.
impl Display for LevelMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.partition {
            Partition::Overall => write!(f, "LEVEL {}: ", self.level)?,
            Partition::Seen => write!(f, "   (seen)")?,
            Partition::Unseen => write!(f, " (unseen)")?,
        }
        write!(
            f,
            "  P / R / F1 = ({:.4}, {:.4}, {:.4}); (tp, fp, fn) = ({:6}, {:6}, {:6})",
            self.precision,
            self.recall,
            self.fscore,
            self.true_positives,
            self.false_positives,
            self.false_negatives
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::Aligner;
    use crate::corpus::{Sentence, Token};
    use crate::vocabulary::Vocabulary;

    fn sentence(tokens: &[(&str, &str)], level: usize) -> Sentence {
        Sentence::new(
            tokens
                .iter()
                .map(|(surface, features)| Token::from_fields(surface, features, level))
                .collect(),
        )
    }

    fn counters_for(
        system: &Sentence,
        gold: &Sentence,
        level: usize,
        vocabulary: &Vocabulary,
    ) -> CounterSet {
        let aligner = Aligner::new(system, gold).unwrap();
        CounterSet::tally(aligner, level, vocabulary)
    }

    #[test]
    fn test_row_display_format() {
        let row = LevelMetrics {
            level: 0,
            partition: Partition::Overall,
            precision: 0.857_142_9,
            recall: 0.75,
            fscore: 0.8,
            true_positives: 6,
            false_positives: 1,
            false_negatives: 2,
        };
        assert_eq!(
            row.to_string(),
            "LEVEL 0:   P / R / F1 = (0.8571, 0.7500, 0.8000); (tp, fp, fn) = (     6,      1,      2)"
        );
    }

    #[test]
    fn test_partition_rows_follow_their_level() {
        let gold = sentence(&[("ab", "N"), ("c", "V")], 1);
        let system = sentence(&[("a", "N"), ("bc", "V")], 1);
        let mut vocabulary = Vocabulary::default();
        vocabulary.insert("ab");
        let counters = counters_for(&system, &gold, 1, &vocabulary);
        let reporter = Reporter::from_counters(&counters, DivByZeroStrat::ReplaceBy0).unwrap();
        let keys: Vec<_> = reporter.rows().map(|r| (r.level, r.partition)).collect();
        assert_eq!(
            keys,
            [
                (0, Partition::Overall),
                (0, Partition::Seen),
                (0, Partition::Unseen),
                (1, Partition::Overall),
                (1, Partition::Seen),
                (1, Partition::Unseen),
            ]
        );
    }

    #[test]
    fn test_unpartitioned_report_has_only_overall_rows() {
        let gold = sentence(&[("ab", "N")], 1);
        let counters = counters_for(&gold.clone(), &gold, 1, &Vocabulary::default());
        let reporter = Reporter::from_counters(&counters, DivByZeroStrat::ReplaceBy0).unwrap();
        assert_eq!(reporter.rows().count(), 2);
        assert!(reporter.get(0, Partition::Seen).is_none());
        let row = reporter.get(1, Partition::Overall).unwrap();
        assert_eq!(row.true_positives, 1);
        assert_eq!(row.precision, 1.0);
    }

    #[test]
    fn test_display_of_partitioned_report() {
        let gold = sentence(&[("ab", "N")], 0);
        let mut vocabulary = Vocabulary::default();
        vocabulary.insert("ab");
        let counters = counters_for(&gold.clone(), &gold, 0, &vocabulary);
        let reporter = Reporter::from_counters(&counters, DivByZeroStrat::ReplaceBy0).unwrap();
        let expected = "\
LEVEL 0:   P / R / F1 = (1.0000, 1.0000, 1.0000); (tp, fp, fn) = (     1,      0,      0)
   (seen)  P / R / F1 = (1.0000, 1.0000, 1.0000); (tp, fp, fn) = (     1,      0,      0)
 (unseen)  P / R / F1 = (0.0000, 0.0000, 0.0000); (tp, fp, fn) = (     0,      0,      0)\n";
        assert_eq!(reporter.to_string(), expected);
    }
}
