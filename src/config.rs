/*
 * This module contains some quality of life structs and aliases. Most
 * importantly, it contains the `EvalConfig` struct, which can be passed to
 * the `evaluation_report` function to bundle its parameters with sensible
 * defaults.
*/
use crate::diff::ErrorFormat;
use crate::metrics::DivByZeroStrat;
use either::Either as LeftOrRight;
use std::fmt::{Debug, Display};
use std::path::PathBuf;

/// Reasonable default configuration for an evaluation run.
pub type DefaultEvalConfig = EvalConfig<DivByZeroStrat>;

/// Where the seen/unseen vocabulary comes from. Only one source can be
/// active for a run.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum VocabularySource {
    /// A training corpus in the tagged line format; every surface form is
    /// collected.
    TrainingCorpus(PathBuf),
    /// A dictionary file; the first comma-separated field of each line is
    /// collected.
    Dictionary(PathBuf),
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
/// Config struct used to simplify the inputs of parameters to the evaluation
/// entry points.
pub struct EvalConfig<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    /// Depth of feature comparison. Level 0 scores segmentation agreement
    /// only; level `l` additionally requires the first `l` feature positions
    /// to match.
    level: usize,
    /// When set, per-sentence error reports are emitted alongside the score
    /// table.
    error_format: Option<ErrorFormat>,
    /// Optional source of the vocabulary splitting counts into seen/unseen.
    vocabulary: Option<VocabularySource>,
    /// What to do when a precision or recall denominator is zero. The most
    /// common choice is to score the undefined ratio as 0.
    zero_division: ZeroDiv,
}

impl DefaultEvalConfig {
    pub fn new() -> Self {
        Self {
            level: 0,
            error_format: None,
            vocabulary: None,
            zero_division: DivByZeroStrat::ReplaceBy0,
        }
    }
}

impl Default for DefaultEvalConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl<ZeroDiv>
    From<(
        usize,
        Option<ErrorFormat>,
        Option<VocabularySource>,
        ZeroDiv,
    )> for EvalConfig<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    fn from(
        value: (
            usize,
            Option<ErrorFormat>,
            Option<VocabularySource>,
            ZeroDiv,
        ),
    ) -> Self {
        Self {
            level: value.0,
            error_format: value.1,
            vocabulary: value.2,
            zero_division: value.3,
        }
    }
}

impl<ZeroDiv> From<EvalConfig<ZeroDiv>>
    for (
        usize,
        Option<ErrorFormat>,
        Option<VocabularySource>,
        DivByZeroStrat,
    )
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    fn from(value: EvalConfig<ZeroDiv>) -> Self {
        (
            value.level,
            value.error_format,
            value.vocabulary,
            value.zero_division.into(),
        )
    }
}

impl<ZeroDiv> Display for EvalConfig<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat> + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Comparison level: {}\n Error report format: {:?}\n Vocabulary source: {:?}\n Strategy when encountering a division by zero: {:?}",
            self.level, self.error_format, self.vocabulary, self.zero_division
        )
    }
}

/// This builder can be used to build and customize an `EvalConfig` structure.
pub struct EvalConfigBuilder<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    level: usize,
    error_format: Option<ErrorFormat>,
    vocabulary: Option<VocabularySource>,
    zero_division: LeftOrRight<ZeroDiv, DivByZeroStrat>,
}

impl Default for EvalConfigBuilder<DivByZeroStrat> {
    fn default() -> Self {
        Self::new()
    }
}

impl<ZeroDiv> EvalConfigBuilder<ZeroDiv>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    pub fn new() -> Self {
        Self {
            level: 0,
            error_format: None,
            vocabulary: None,
            zero_division: LeftOrRight::Right(DivByZeroStrat::ReplaceBy0),
        }
    }
    pub fn level(mut self, level: usize) -> Self {
        self.level = level;
        self
    }
    pub fn error_format(mut self, error_format: ErrorFormat) -> Self {
        self.error_format = Some(error_format);
        self
    }
    pub fn training_corpus(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocabulary = Some(VocabularySource::TrainingCorpus(path.into()));
        self
    }
    pub fn dictionary(mut self, path: impl Into<PathBuf>) -> Self {
        self.vocabulary = Some(VocabularySource::Dictionary(path.into()));
        self
    }
    pub fn division_by_zero(mut self, division_by_zero: ZeroDiv) -> Self {
        self.zero_division = LeftOrRight::Left(division_by_zero);
        self
    }
    pub fn build(self) -> EvalConfig<DivByZeroStrat> {
        EvalConfig::from(self)
    }
}

impl<ZeroDiv> From<EvalConfigBuilder<ZeroDiv>> for EvalConfig<DivByZeroStrat>
where
    ZeroDiv: Into<DivByZeroStrat>,
{
    fn from(value: EvalConfigBuilder<ZeroDiv>) -> Self {
        Self {
            level: value.level,
            error_format: value.error_format,
            vocabulary: value.vocabulary,
            zero_division: value.zero_division.either_into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(DivByZeroStrat::ReplaceBy1)]
    #[case(DivByZeroStrat::ReplaceBy0)]
    #[case(DivByZeroStrat::ReturnError)]
    fn test_builder_setters_division_by_zero(#[case] strat: DivByZeroStrat) {
        let builder = EvalConfigBuilder::default();
        let config = builder.division_by_zero(strat).build();
        assert_eq!(config.zero_division, strat)
    }

    #[rstest]
    #[case(0)]
    #[case(2)]
    #[case(6)]
    fn test_builder_setters_level(#[case] level: usize) {
        let builder = EvalConfigBuilder::default();
        let config = builder.level(level).build();
        assert_eq!(config.level, level)
    }

    #[rstest]
    #[case(ErrorFormat::Segmentation)]
    #[case(ErrorFormat::Tag)]
    fn test_builder_setters_error_format(#[case] format: ErrorFormat) {
        let builder = EvalConfigBuilder::default();
        let config = builder.error_format(format).build();
        assert_eq!(config.error_format, Some(format))
    }

    #[test]
    fn test_builder_setters_vocabulary() {
        let config = EvalConfigBuilder::default()
            .training_corpus("train.txt")
            .build();
        assert_eq!(
            config.vocabulary,
            Some(VocabularySource::TrainingCorpus(PathBuf::from("train.txt")))
        );
        let config = EvalConfigBuilder::default().dictionary("dict.csv").build();
        assert_eq!(
            config.vocabulary,
            Some(VocabularySource::Dictionary(PathBuf::from("dict.csv")))
        );
    }

    #[test]
    fn test_default_config() {
        let config = DefaultEvalConfig::default();
        let (level, error_format, vocabulary, zero_division) = config.into();
        assert_eq!(level, 0);
        assert_eq!(error_format, None);
        assert_eq!(vocabulary, None);
        assert_eq!(zero_division, DivByZeroStrat::ReplaceBy0);
    }
}
