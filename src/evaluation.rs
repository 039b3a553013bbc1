/**
This module drives a whole evaluation run: it pairs the sentences of the
system and gold corpora, folds every pair's comparison stream into one
counter set and derives the score table. Both corpora must hold the same
sentences of the same raw text; any disagreement is a fatal mismatch, never
a silent truncation.
*/
use crate::alignment::{Aligner, Comparison, CoverageError};
use crate::config::{EvalConfig, VocabularySource};
use crate::corpus::{Corpus, CorpusError, Sentence};
use crate::diff::{DiffWriter, ErrorFormat};
use crate::metrics::{CounterSet, DivByZeroStrat, DivisionByZeroError};
use crate::reporter::Reporter;
use crate::vocabulary::Vocabulary;
use std::error::Error;
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::path::Path;

/// Computes the score table of a system corpus against its gold reference.
///
/// `level` is the deepest feature comparison to score and should match the
/// level both corpora were parsed with. The vocabulary drives the
/// seen/unseen breakdown; pass [`Vocabulary::default`] to skip it.
pub fn evaluate(
    system: &Corpus,
    gold: &Corpus,
    vocabulary: &Vocabulary,
    level: usize,
    zero_division: DivByZeroStrat,
) -> Result<Reporter, EvaluationError> {
    let mut counters = CounterSet::new(level, !vocabulary.is_empty());
    for (index, (system_sentence, gold_sentence)) in paired(system, gold)?.enumerate() {
        let aligner = pair_aligner(index, system_sentence, gold_sentence)?;
        for unit in aligner {
            counters.record(&unit, vocabulary);
        }
    }
    Ok(Reporter::from_counters(&counters, zero_division)?)
}

/// Like [`evaluate`], additionally streaming per-sentence error reports into
/// `out` for every pair whose segmentations differ.
#[allow(clippy::too_many_arguments)]
pub fn evaluate_with_diff<W: Write>(
    system: &Corpus,
    gold: &Corpus,
    vocabulary: &Vocabulary,
    level: usize,
    zero_division: DivByZeroStrat,
    format: ErrorFormat,
    color: bool,
    out: &mut W,
) -> Result<Reporter, EvaluationError> {
    let mut counters = CounterSet::new(level, !vocabulary.is_empty());
    let mut diff = DiffWriter::new(out, format).color(color);
    for (index, (system_sentence, gold_sentence)) in paired(system, gold)?.enumerate() {
        let aligner = pair_aligner(index, system_sentence, gold_sentence)?;
        let units: Vec<Comparison> = aligner.collect();
        for unit in &units {
            counters.record(unit, vocabulary);
        }
        if DiffWriter::<W>::wants(&units) {
            diff.sentence(&system_sentence.text(), &units)?;
        }
    }
    Ok(Reporter::from_counters(&counters, zero_division)?)
}

/// File-based entry point: reads both corpora, loads the configured
/// vocabulary and evaluates. When the config asks for error reports they are
/// written to stdout, colorized.
pub fn evaluation_report<P, ZeroDiv>(
    system: P,
    gold: P,
    config: EvalConfig<ZeroDiv>,
) -> Result<Reporter, EvaluationError>
where
    P: AsRef<Path>,
    ZeroDiv: Into<DivByZeroStrat>,
{
    let (level, error_format, vocabulary_source, zero_division) = config.into();
    let system = Corpus::from_path(system, level)?;
    let gold = Corpus::from_path(gold, level)?;
    let vocabulary = load_vocabulary(vocabulary_source.as_ref())?;
    match error_format {
        Some(format) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            evaluate_with_diff(
                &system,
                &gold,
                &vocabulary,
                level,
                zero_division,
                format,
                true,
                &mut out,
            )
        }
        None => evaluate(&system, &gold, &vocabulary, level, zero_division),
    }
}

/// Loads the vocabulary of a run; no source means no seen/unseen split.
pub fn load_vocabulary(source: Option<&VocabularySource>) -> Result<Vocabulary, EvaluationError> {
    match source {
        Some(VocabularySource::TrainingCorpus(path)) => {
            Ok(Vocabulary::from_training_path(path)?)
        }
        Some(VocabularySource::Dictionary(path)) => Ok(Vocabulary::from_dictionary_path(path)?),
        None => Ok(Vocabulary::default()),
    }
}

fn paired<'a>(
    system: &'a Corpus,
    gold: &'a Corpus,
) -> Result<impl Iterator<Item = (&'a Sentence, &'a Sentence)>, MismatchError> {
    if system.len() != gold.len() {
        return Err(MismatchError::SentenceCount {
            system: system.len(),
            gold: gold.len(),
        });
    }
    Ok(system.sentences().iter().zip(gold.sentences()))
}

fn pair_aligner<'a>(
    index: usize,
    system: &'a Sentence,
    gold: &'a Sentence,
) -> Result<Aligner<'a>, MismatchError> {
    Aligner::new(system, gold).map_err(|source| MismatchError::SentenceCoverage { index, source })
}

#[derive(Debug)]
/// The system and gold corpora do not describe the same text, sentence for
/// sentence.
pub enum MismatchError {
    /// The two corpora hold different numbers of sentences.
    SentenceCount { system: usize, gold: usize },
    /// A sentence pair does not cover the same raw text. The index is the
    /// 0-based position of the pair.
    SentenceCoverage { index: usize, source: CoverageError },
}

impl Display for MismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SentenceCount { system, gold } => write!(
                f,
                "the system corpus has {} sentences but the gold corpus has {}",
                system, gold
            ),
            Self::SentenceCoverage { index, source } => {
                write!(f, "sentence pair {}: {}", index, source)
            }
        }
    }
}

impl Error for MismatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SentenceCount { .. } => None,
            Self::SentenceCoverage { source, .. } => Some(source),
        }
    }
}

#[derive(Debug)]
/// Enum error encompassing every failure that can abort an evaluation run.
pub enum EvaluationError {
    Corpus(CorpusError),
    Mismatch(MismatchError),
    DivisionByZero(DivisionByZeroError),
    Io(io::Error),
}

impl Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corpus(err) => Display::fmt(err, f),
            Self::Mismatch(err) => Display::fmt(err, f),
            Self::DivisionByZero(err) => Display::fmt(err, f),
            Self::Io(err) => write!(f, "could not write the error report: {}", err),
        }
    }
}

impl Error for EvaluationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Corpus(err) => Some(err),
            Self::Mismatch(err) => Some(err),
            Self::DivisionByZero(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<CorpusError> for EvaluationError {
    fn from(value: CorpusError) -> Self {
        Self::Corpus(value)
    }
}

impl From<MismatchError> for EvaluationError {
    fn from(value: MismatchError) -> Self {
        Self::Mismatch(value)
    }
}

impl From<DivisionByZeroError> for EvaluationError {
    fn from(value: DivisionByZeroError) -> Self {
        Self::DivisionByZero(value)
    }
}

impl From<io::Error> for EvaluationError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
