//! The optional vocabulary used to break evaluation counts down into
//! seen/unseen buckets. Membership never changes what counts as correct, it
//! only partitions the tallies.

use crate::corpus::BOUNDARY_MARKER;
use ahash::AHashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A set of surface strings. An empty vocabulary disables the seen/unseen
/// split entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    words: AHashSet<String>,
}

impl Vocabulary {
    /// Collects every surface form of a training corpus in the tagged line
    /// format: the first tab-separated field of each non-boundary line.
    pub fn from_training_reader<R: BufRead>(reader: R) -> Result<Self, io::Error> {
        let mut words = AHashSet::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() || line == BOUNDARY_MARKER {
                continue;
            }
            let surface = match line.split_once('\t') {
                Some((surface, _)) => surface,
                None => line.as_str(),
            };
            words.insert(String::from(surface));
        }
        Ok(Vocabulary { words })
    }

    /// Collects the headwords of a dictionary file: the first comma-separated
    /// field of each line.
    pub fn from_dictionary_reader<R: BufRead>(reader: R) -> Result<Self, io::Error> {
        let mut words = AHashSet::new();
        for line in reader.lines() {
            let line = line?;
            if line.is_empty() {
                continue;
            }
            let headword = match line.split_once(',') {
                Some((headword, _)) => headword,
                None => line.as_str(),
            };
            words.insert(String::from(headword));
        }
        Ok(Vocabulary { words })
    }

    pub fn from_training_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Self::from_training_reader(BufReader::new(file))
    }

    pub fn from_dictionary_path<P: AsRef<Path>>(path: P) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Self::from_dictionary_reader(BufReader::new(file))
    }

    pub fn insert(&mut self, surface: impl Into<String>) -> bool {
        self.words.insert(surface.into())
    }

    pub fn contains(&self, surface: &str) -> bool {
        self.words.contains(surface)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<String> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Vocabulary {
            words: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_reader_takes_first_tab_field() {
        let input = "外国\t名詞,普通名詞\n人\t接尾辞\nEOS\n外国\t名詞,固有名詞\nEOS\n";
        let vocabulary = Vocabulary::from_training_reader(input.as_bytes()).unwrap();
        assert_eq!(vocabulary.len(), 2);
        assert!(vocabulary.contains("外国"));
        assert!(vocabulary.contains("人"));
        assert!(!vocabulary.contains("EOS"));
    }

    #[test]
    fn test_dictionary_reader_takes_first_comma_field() {
        let input = "外国,1285,1285,5078,名詞\n人,1285,1285,4757,接尾辞\nヘッドワードのみ\n";
        let vocabulary = Vocabulary::from_dictionary_reader(input.as_bytes()).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert!(vocabulary.contains("人"));
        assert!(vocabulary.contains("ヘッドワードのみ"));
    }

    #[test]
    fn test_default_vocabulary_is_empty() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.is_empty());
        assert!(!vocabulary.contains("外国"));
    }
}
