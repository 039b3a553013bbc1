/**
The alignment engine walks the span partitions of a system sentence and a
gold sentence over the same raw text and classifies every unit of
comparison. Where both partitions place the same boundaries, it yields an
aligned pair of tokens; where they disagree, it consumes the smallest run of
tokens on both sides whose union covers the same character range and yields
it as one misaligned block.
*/
use crate::corpus::{Sentence, Token};
use crate::span::Span;
use std::error::Error;
use std::fmt::{self, Display};

/// One unit of comparison produced by the [`Aligner`].
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison<'a> {
    /// System and gold agree on the token boundary.
    Aligned(AlignedUnit<'a>),
    /// A maximal run of tokens on each side whose boundaries disagree while
    /// covering the same character range.
    Misaligned(MisalignedBlock<'a>),
}

impl Comparison<'_> {
    pub fn is_misaligned(&self) -> bool {
        matches!(self, Comparison::Misaligned(_))
    }
}

/// Two tokens occupying the same span of the shared raw text. Their surfaces
/// are therefore identical; only their feature vectors may differ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignedUnit<'a> {
    pub system: &'a Token,
    pub gold: &'a Token,
}

impl AlignedUnit<'_> {
    /// Whether the unit counts as correct at a given depth of feature
    /// comparison. Level 0 is segmentation agreement, which already holds
    /// for an aligned unit. Every level re-compares a fresh truncation of
    /// both feature vectors; deeper levels are never derived from shallower
    /// ones.
    pub fn correct_at(&self, level: usize) -> bool {
        level == 0
            || self
                .system
                .features()
                .iter()
                .take(level)
                .eq(self.gold.features().iter().take(level))
    }
}

/// A segmentation error block. Every system token in it is a false positive
/// and every gold token a false negative, at all levels: no feature judgment
/// is meaningful where the boundaries themselves disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MisalignedBlock<'a> {
    pub system: &'a [Token],
    pub gold: &'a [Token],
}

/// Two-cursor walk over the span partitions of a sentence pair. Constructed
/// with [`Aligner::new`], which refuses pairs that do not cover the same raw
/// text, so the walk itself can never run out of one side early.
#[derive(Debug)]
pub struct Aligner<'a> {
    system: &'a Sentence,
    gold: &'a Sentence,
    system_spans: Vec<Span>,
    gold_spans: Vec<Span>,
    i: usize,
    j: usize,
}

impl<'a> Aligner<'a> {
    pub fn new(system: &'a Sentence, gold: &'a Sentence) -> Result<Self, CoverageError> {
        let system_text = system.text();
        let gold_text = gold.text();
        if system_text != gold_text {
            return Err(CoverageError {
                system: system_text,
                gold: gold_text,
            });
        }
        Ok(Aligner {
            system,
            gold,
            system_spans: system.spans(),
            gold_spans: gold.spans(),
            i: 0,
            j: 0,
        })
    }
}

impl<'a> Iterator for Aligner<'a> {
    type Item = Comparison<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.i >= self.system_spans.len() || self.j >= self.gold_spans.len() {
            return None;
        }
        let system_tokens: &'a [Token] = self.system.tokens();
        let gold_tokens: &'a [Token] = self.gold.tokens();
        let item = if self.system_spans[self.i] == self.gold_spans[self.j] {
            Comparison::Aligned(AlignedUnit {
                system: &system_tokens[self.i],
                gold: &gold_tokens[self.j],
            })
        } else {
            let i_begin = self.i;
            let j_begin = self.j;
            // Whichever side ends first is consumed without a counterpart;
            // the block closes once both current spans end together.
            while self.system_spans[self.i].end != self.gold_spans[self.j].end {
                if self.system_spans[self.i].end < self.gold_spans[self.j].end {
                    self.i += 1;
                } else {
                    self.j += 1;
                }
            }
            Comparison::Misaligned(MisalignedBlock {
                system: &system_tokens[i_begin..=self.i],
                gold: &gold_tokens[j_begin..=self.j],
            })
        };
        self.i += 1;
        self.j += 1;
        Some(item)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// The two sentences of a pair do not cover the same raw text, so no
/// alignment between their spans exists.
pub struct CoverageError {
    pub(crate) system: String,
    pub(crate) gold: String,
}

impl Display for CoverageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "system sentence covers {:?} but gold sentence covers {:?}",
            self.system, self.gold
        )
    }
}

impl Error for CoverageError {}
