/**
This module parses the tagged line format produced by tokenizer/tagger
pipelines into an in-memory corpus. One line per token, `surface<TAB>feat1,feat2,...`,
with a bare `EOS` line closing each sentence. Empty feature fields are stored
as the `*` wildcard.
*/
use std::error::Error;
use std::fmt::{self, Display};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Sentinel line closing a sentence in the serialized form.
pub const BOUNDARY_MARKER: &str = "EOS";

/// Reserved string standing in for an absent or empty feature value.
pub const WILDCARD: &str = "*";

/// A surface substring paired with its feature vector. The feature vector is
/// normalized at construction: truncated or padded with [`WILDCARD`] to the
/// number of positions the evaluation level requires.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    surface: String,
    features: Vec<String>,
}

impl Token {
    /// Builds a token from the two tab-separated fields of a corpus line.
    /// Only the first `level` feature positions are retained.
    pub fn from_fields(surface: &str, raw_features: &str, level: usize) -> Self {
        let mut features: Vec<String> = raw_features
            .split(',')
            .take(level)
            .map(|f| {
                if f.is_empty() {
                    String::from(WILDCARD)
                } else {
                    String::from(f)
                }
            })
            .collect();
        features.resize_with(level, || String::from(WILDCARD));
        Token {
            surface: String::from(surface),
            features,
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn features(&self) -> &[String] {
        &self.features
    }
}

/// A token serializes back to its corpus line.
impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.surface, self.features.join(","))
    }
}

/// An ordered run of tokens whose concatenated surfaces reproduce the
/// sentence's raw text exactly once, with no gaps or overlaps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(tokens: Vec<Token>) -> Self {
        Sentence { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// The raw text covered by this sentence.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::surface).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// An ordered sequence of sentences, built once per evaluation run and
/// read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    sentences: Vec<Sentence>,
}

impl Corpus {
    /// Parses a tagged corpus from a buffered reader. `level` bounds how many
    /// feature positions each token retains. Tokens after the last boundary
    /// marker belong to no sentence and are discarded.
    pub fn from_reader<R: BufRead>(reader: R, level: usize) -> Result<Self, CorpusError> {
        let mut sentences = Vec::new();
        let mut tokens = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line == BOUNDARY_MARKER {
                sentences.push(Sentence::new(std::mem::take(&mut tokens)));
                continue;
            }
            match line.split_once('\t') {
                Some((surface, raw_features)) => {
                    tokens.push(Token::from_fields(surface, raw_features, level))
                }
                None => {
                    return Err(CorpusError::MissingSeparator {
                        line: index + 1,
                        content: line,
                    })
                }
            }
        }
        Ok(Corpus { sentences })
    }

    pub fn from_path<P: AsRef<Path>>(path: P, level: usize) -> Result<Self, CorpusError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), level)
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of tokens across all sentences.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(Sentence::len).sum()
    }

    /// Serializes the corpus back to the tagged line format. Parsing the
    /// result at the same level reproduces this corpus.
    pub fn to_tagged_string(&self) -> String {
        let mut out = String::new();
        for sentence in &self.sentences {
            for token in sentence.tokens() {
                out.push_str(&token.to_string());
                out.push('\n');
            }
            out.push_str(BOUNDARY_MARKER);
            out.push('\n');
        }
        out
    }
}

#[derive(Debug)]
/// Failures while reading a tagged corpus. A missing tab separator is fatal
/// for the whole file.
pub enum CorpusError {
    Io(io::Error),
    MissingSeparator { line: usize, content: String },
}

impl Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "could not read the corpus: {}", err),
            Self::MissingSeparator { line, content } => write!(
                f,
                "line {} has no tab between surface and features: {:?}",
                line, content
            ),
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::MissingSeparator { .. } => None,
        }
    }
}

impl From<io::Error> for CorpusError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}
