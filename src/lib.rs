//! This library scores the output of a tokenizer/tagger against a gold-standard
//! corpus. It is built for the situation where the two sides may disagree not
//! only on tags but on where the token boundaries fall: sentences are compared
//! span by span, boundary disagreements are consumed as whole error blocks, and
//! tag agreement is scored at several depths at once.
//!
//! # LEVELS
//! Scoring depth is controlled by the comparison level:
//! * Level 0 counts a token as correct when system and gold agree on its
//!     boundaries, whatever its tags say.
//! * Level `l` additionally requires the first `l` feature positions (e.g.
//!     part-of-speech, then subtype, then lemma) to match. Every level is
//!     scored independently, so one run yields `L + 1` rows of
//!     precision/recall/F1.
//!
//! Tokens caught inside a boundary disagreement count as errors at every level:
//! no tag judgment is meaningful where the segmentation itself is wrong.
//!
//! # CORPUS FORMAT
//! One token per line, `surface<TAB>feat1,feat2,...`, and a bare `EOS` line
//! closing each sentence. Empty feature fields read as the `*` wildcard. The
//! same format carries the system output, the gold reference and the optional
//! training corpus that defines the seen vocabulary.
//!
//! # Terminology
//! * The *surface* is the literal substring a token occupies in the raw text.
//! * The *feature vector* is the ordered tag attributes attached to a token.
//! * A *segmentation error block* is a maximal run of tokens on both sides
//!     covering the same character range with disagreeing internal boundaries.
//! * *Seen*/*unseen* split the counts by membership of each surface in an
//!     optional vocabulary, separating known-word from novel-word performance.

mod alignment;
mod config;
mod corpus;
mod diff;
mod evaluation;
mod metrics;
mod reporter;
mod span;
mod vocabulary;

// The public api starts here
pub use alignment::{AlignedUnit, Aligner, Comparison, CoverageError, MisalignedBlock};

pub use corpus::{Corpus, CorpusError, Sentence, Token, BOUNDARY_MARKER, WILDCARD};

pub use span::Span;

pub use vocabulary::Vocabulary;

pub use metrics::{CounterSet, DivByZeroStrat, DivisionByZeroError, LevelCounters, Partition};

pub use reporter::{LevelMetrics, Reporter};

pub use diff::{DiffWriter, ErrorFormat, ParsingErrorFormatError};

pub use config::{DefaultEvalConfig, EvalConfig, EvalConfigBuilder, VocabularySource};

pub use evaluation::{
    evaluate, evaluate_with_diff, load_vocabulary, EvaluationError, MismatchError,
};

/// Main entrypoint of the library. This function reads the system and gold
/// corpora from disk, loads the vocabulary named by the config (if any),
/// scores every sentence pair and returns the table of per-level metrics.
/// When the config enables an error format, per-sentence reports are written
/// to stdout along the way. Instead of taking the raw parameters, this
/// function takes an `EvalConfig` struct built with sensible defaults.
///
/// * `system`: Path of the system output, in the tagged line format
/// * `gold`: Path of the gold reference, in the same format
/// * `config`: Parameters of the run
///
/// # Example
/// ```no_run
/// use morpheval::{evaluation_report, EvalConfigBuilder};
///
/// let config = EvalConfigBuilder::default()
///     .level(2)
///     .training_corpus("train.txt")
///     .build();
/// let reporter = evaluation_report("system.txt", "gold.txt", config).unwrap();
/// eprint!("{}", reporter);
/// ```
pub fn evaluation_report<P, ZeroDiv>(
    system: P,
    gold: P,
    config: EvalConfig<ZeroDiv>,
) -> Result<Reporter, EvaluationError>
where
    P: AsRef<std::path::Path>,
    ZeroDiv: Into<DivByZeroStrat>,
{
    evaluation::evaluation_report(system, gold, config)
}
