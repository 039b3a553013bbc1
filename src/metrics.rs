/**
This module folds the alignment engine's comparison stream into per-level
counters and turns counters into precision/recall/F1 arrays. Counters are an
explicit accumulator value; nothing here touches shared state.
*/
use crate::alignment::{AlignedUnit, Comparison};
use crate::vocabulary::Vocabulary;
use enum_iterator::Sequence;
use ndarray::{Array1, ScalarOperand};
use num::Float;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How do we handle cases with a division by zero? A denominator of zero
/// means a level has no positives on one side; the usual reporting choice is
/// to score the undefined ratio as 0.
pub enum DivByZeroStrat {
    /// Report an undefined ratio as `1`
    ReplaceBy1,
    /// Return an error as soon as a denominator is 0
    ReturnError,
    /// Report an undefined ratio as `0`
    ReplaceBy0,
}

impl Default for DivByZeroStrat {
    fn default() -> Self {
        Self::ReplaceBy0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsingDivByZeroStratError(String);

impl Display for ParsingDivByZeroStratError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse {} into a `DivByZeroStrat`", self.0)
    }
}
impl Error for ParsingDivByZeroStratError {}

impl FromStr for DivByZeroStrat {
    type Err = ParsingDivByZeroStratError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "replaceby1" | "replacebyone" => Ok(DivByZeroStrat::ReplaceBy1),
            "replaceby0" | "replacebyzero" => Ok(DivByZeroStrat::ReplaceBy0),
            "returnerror" | "error" => Ok(DivByZeroStrat::ReturnError),
            _ => Err(ParsingDivByZeroStratError(String::from(s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DivisionByZeroError;

impl Display for DivisionByZeroError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encountered division by zero")
    }
}

impl Error for DivisionByZeroError {}

/// Internal extension trait for Num's Float trait
pub trait FloatExt: Float + ScalarOperand + Debug {}

impl<T: Float + ScalarOperand + Debug> FloatExt for T {}

/// Helper function to replace values from an array.
fn replace<F: FloatExt>(mut array: Array1<F>, replaced: F, new_value: F) -> Array1<F> {
    array.mapv_inplace(|v| if v == replaced { new_value } else { v });
    array
}

/// Elementwise `numerator / denominator` with the zero-denominator positions
/// resolved according to the strategy.
fn prf_divide<F: FloatExt>(
    numerator: &Array1<F>,
    denominator: Array1<F>,
    zero_division: DivByZeroStrat,
) -> Result<Array1<F>, DivisionByZeroError> {
    let zero_mask = denominator.mapv(|d| if d == F::zero() { F::zero() } else { F::one() });
    let safe_denominator = replace(denominator, F::zero(), F::one());
    let ratio = numerator / &safe_denominator;
    match zero_division {
        DivByZeroStrat::ReturnError => {
            if zero_mask.iter().any(|m| *m == F::zero()) {
                Err(DivisionByZeroError)
            } else {
                Ok(ratio)
            }
        }
        DivByZeroStrat::ReplaceBy1 => {
            let fill = zero_mask.mapv(|m| F::one() - m);
            Ok(ratio * &zero_mask + &fill)
        }
        DivByZeroStrat::ReplaceBy0 => Ok(ratio * &zero_mask),
    }
}

/// Per-level precision, recall and F1, one entry per level `0..=L`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScoreArrays {
    pub(crate) precision: Array1<f32>,
    pub(crate) recall: Array1<f32>,
    pub(crate) fscore: Array1<f32>,
}

/// Derives the score arrays of one counter bank. F1 is 0 whenever
/// `precision + recall` is 0, regardless of the strategy.
pub(crate) fn compute_scores(
    counters: &LevelCounters,
    zero_division: DivByZeroStrat,
) -> Result<ScoreArrays, DivisionByZeroError> {
    let tp = counters.true_positive.mapv(|x| x as f32);
    let fp = counters.false_positive.mapv(|x| x as f32);
    let fn_sum = counters.false_negative.mapv(|x| x as f32);
    let precision = prf_divide(&tp, &tp + &fp, zero_division)?;
    let recall = prf_divide(&tp, &tp + &fn_sum, zero_division)?;
    let denominator = replace(&precision + &recall, 0.0, 1.0);
    let fscore = &precision * &recall * 2.0 / denominator;
    Ok(ScoreArrays {
        precision,
        recall,
        fscore,
    })
}

/// Which slice of the evaluation a metrics row belongs to.
#[derive(
    Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Sequence, Serialize, Deserialize,
)]
pub enum Partition {
    Overall,
    Seen,
    Unseen,
}

impl Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => write!(f, "overall"),
            Self::Seen => write!(f, "seen"),
            Self::Unseen => write!(f, "unseen"),
        }
    }
}

/// True-positive, false-positive and false-negative tallies, each indexed by
/// comparison level `0..=L`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelCounters {
    true_positive: Array1<usize>,
    false_positive: Array1<usize>,
    false_negative: Array1<usize>,
}

impl LevelCounters {
    pub fn new(level: usize) -> Self {
        LevelCounters {
            true_positive: Array1::zeros(level + 1),
            false_positive: Array1::zeros(level + 1),
            false_negative: Array1::zeros(level + 1),
        }
    }

    /// Deepest comparison level these counters cover.
    pub fn level(&self) -> usize {
        self.true_positive.len() - 1
    }

    /// `(tp, fp, fn)` at one level.
    pub fn at(&self, level: usize) -> (usize, usize, usize) {
        (
            self.true_positive[level],
            self.false_positive[level],
            self.false_negative[level],
        )
    }

    /// An aligned unit is a true positive at level 0 and, per deeper level, a
    /// true positive when the truncated feature vectors agree or one
    /// substitution (both a false positive and a false negative) when they
    /// do not.
    fn record_aligned(&mut self, unit: &AlignedUnit) {
        self.true_positive[0] += 1;
        for level in 1..self.true_positive.len() {
            if unit.correct_at(level) {
                self.true_positive[level] += 1;
            } else {
                self.false_positive[level] += 1;
                self.false_negative[level] += 1;
            }
        }
    }

    /// A system token consumed inside a misaligned block: a false positive
    /// at every level.
    fn record_system_only(&mut self) {
        self.false_positive += 1;
    }

    /// A gold token consumed inside a misaligned block: a false negative at
    /// every level.
    fn record_gold_only(&mut self) {
        self.false_negative += 1;
    }

    pub(crate) fn true_positives(&self) -> &Array1<usize> {
        &self.true_positive
    }

    pub(crate) fn false_positives(&self) -> &Array1<usize> {
        &self.false_positive
    }

    pub(crate) fn false_negatives(&self) -> &Array1<usize> {
        &self.false_negative
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PartitionedCounters {
    seen: LevelCounters,
    unseen: LevelCounters,
}

impl PartitionedCounters {
    fn bucket_mut(&mut self, seen: bool) -> &mut LevelCounters {
        if seen {
            &mut self.seen
        } else {
            &mut self.unseen
        }
    }
}

/// The full accumulator of an evaluation run: overall counters plus, when a
/// vocabulary drives a seen/unseen split, one counter bank per bucket whose
/// per-level sums equal the overall bank.
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSet {
    overall: LevelCounters,
    partitioned: Option<PartitionedCounters>,
}

impl CounterSet {
    pub fn new(level: usize, partitioned: bool) -> Self {
        CounterSet {
            overall: LevelCounters::new(level),
            partitioned: partitioned.then(|| PartitionedCounters {
                seen: LevelCounters::new(level),
                unseen: LevelCounters::new(level),
            }),
        }
    }

    /// Pure fold over a comparison stream. The seen/unseen split is active
    /// only when the vocabulary is non-empty.
    pub fn tally<'a, I>(units: I, level: usize, vocabulary: &Vocabulary) -> Self
    where
        I: IntoIterator<Item = Comparison<'a>>,
    {
        units.into_iter().fold(
            Self::new(level, !vocabulary.is_empty()),
            |mut counters, unit| {
                counters.record(&unit, vocabulary);
                counters
            },
        )
    }

    /// Adds one comparison unit. Bucketing keys on each token's own surface.
    pub fn record(&mut self, comparison: &Comparison, vocabulary: &Vocabulary) {
        match comparison {
            Comparison::Aligned(unit) => {
                self.overall.record_aligned(unit);
                if let Some(parts) = &mut self.partitioned {
                    parts
                        .bucket_mut(vocabulary.contains(unit.gold.surface()))
                        .record_aligned(unit);
                }
            }
            Comparison::Misaligned(block) => {
                for token in block.system {
                    self.overall.record_system_only();
                    if let Some(parts) = &mut self.partitioned {
                        parts
                            .bucket_mut(vocabulary.contains(token.surface()))
                            .record_system_only();
                    }
                }
                for token in block.gold {
                    self.overall.record_gold_only();
                    if let Some(parts) = &mut self.partitioned {
                        parts
                            .bucket_mut(vocabulary.contains(token.surface()))
                            .record_gold_only();
                    }
                }
            }
        }
    }

    pub fn level(&self) -> usize {
        self.overall.level()
    }

    pub fn is_partitioned(&self) -> bool {
        self.partitioned.is_some()
    }

    pub fn overall(&self) -> &LevelCounters {
        &self.overall
    }

    pub fn seen(&self) -> Option<&LevelCounters> {
        self.partitioned.as_ref().map(|p| &p.seen)
    }

    pub fn unseen(&self) -> Option<&LevelCounters> {
        self.partitioned.as_ref().map(|p| &p.unseen)
    }

    pub fn for_partition(&self, partition: Partition) -> Option<&LevelCounters> {
        match partition {
            Partition::Overall => Some(&self.overall),
            Partition::Seen => self.seen(),
            Partition::Unseen => self.unseen(),
        }
    }
}
