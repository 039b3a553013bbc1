/**
This module renders the optional per-sentence error reports. A sentence pair
is reported only when its segmentations differ; inside a reported sentence,
aligned tokens are echoed for context and disagreements are highlighted,
gold in blue and system output in red.
*/
use crate::alignment::{AlignedUnit, Comparison, MisalignedBlock};
use crate::corpus::{Token, BOUNDARY_MARKER};
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{self, Display};
use std::io::{self, Write};
use std::str::FromStr;

const BLUE: &str = "\x1b[34m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// What the per-sentence error reports show: surface segmentation only, or
/// the full tag assignments.
#[derive(
    Debug, Hash, PartialEq, Eq, Copy, Clone, Sequence, Serialize, Deserialize, PartialOrd, Ord,
)]
pub enum ErrorFormat {
    Segmentation,
    Tag,
}

impl Display for ErrorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Segmentation => write!(f, "segmentation"),
            Self::Tag => write!(f, "tag"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsingErrorFormatError(String);

impl Display for ParsingErrorFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "could not parse {} into an `ErrorFormat`", self.0)
    }
}
impl Error for ParsingErrorFormatError {}

impl FromStr for ErrorFormat {
    type Err = ParsingErrorFormatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_ref() {
            "segmentation" | "seg" => Ok(Self::Segmentation),
            "tag" | "pos" => Ok(Self::Tag),
            _ => Err(ParsingErrorFormatError(String::from(s))),
        }
    }
}

/// Streams the error reports of an evaluation run into a writer.
#[derive(Debug)]
pub struct DiffWriter<'w, W: Write> {
    format: ErrorFormat,
    color: bool,
    out: &'w mut W,
}

impl<'w, W: Write> DiffWriter<'w, W> {
    pub fn new(out: &'w mut W, format: ErrorFormat) -> Self {
        DiffWriter {
            format,
            color: true,
            out,
        }
    }

    /// Turns the ANSI highlighting off, leaving the content untouched.
    pub fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Whether a sentence pair's comparison stream warrants a report.
    pub fn wants(units: &[Comparison]) -> bool {
        units.iter().any(Comparison::is_misaligned)
    }

    /// Renders the report of one sentence pair: a `# text` header, every
    /// comparison unit, and the format's footer.
    pub fn sentence(&mut self, text: &str, units: &[Comparison]) -> io::Result<()> {
        writeln!(self.out, "# {}", text)?;
        for unit in units {
            match unit {
                Comparison::Aligned(aligned) => self.aligned(aligned)?,
                Comparison::Misaligned(block) => self.misaligned(block)?,
            }
        }
        match self.format {
            ErrorFormat::Segmentation => writeln!(self.out),
            ErrorFormat::Tag => writeln!(self.out, "{}\n", BOUNDARY_MARKER),
        }
    }

    fn aligned(&mut self, unit: &AlignedUnit) -> io::Result<()> {
        match self.format {
            ErrorFormat::Segmentation => write!(self.out, " {}", unit.system.surface()),
            ErrorFormat::Tag => {
                if unit.system.features() == unit.gold.features() {
                    writeln!(
                        self.out,
                        "{}\t{}",
                        unit.system.surface(),
                        unit.system.features().join(",")
                    )
                } else {
                    self.tag_diff(
                        std::slice::from_ref(unit.system),
                        std::slice::from_ref(unit.gold),
                    )
                }
            }
        }
    }

    fn misaligned(&mut self, block: &MisalignedBlock) -> io::Result<()> {
        match self.format {
            ErrorFormat::Segmentation => {
                let gold = surfaces(block.gold);
                let system = surfaces(block.system);
                write!(
                    self.out,
                    " [{}{}{} ->  {}{}{}]",
                    self.paint(BLUE),
                    gold,
                    self.paint(RESET),
                    self.paint(RED),
                    system,
                    self.paint(RESET)
                )
            }
            ErrorFormat::Tag => self.tag_diff(block.system, block.gold),
        }
    }

    /// Gold `surface/features` pairs, an arrow, then the system pairs.
    fn tag_diff(&mut self, system: &[Token], gold: &[Token]) -> io::Result<()> {
        for token in gold {
            write!(
                self.out,
                "{}{}/{}{} ",
                self.paint(BLUE),
                token.surface(),
                token.features().join(","),
                self.paint(RESET)
            )?;
        }
        write!(self.out, "->")?;
        for token in system {
            write!(
                self.out,
                " {}{}/{}{}",
                self.paint(RED),
                token.surface(),
                token.features().join(","),
                self.paint(RESET)
            )?;
        }
        writeln!(self.out)
    }

    fn paint(&self, code: &'static str) -> &'static str {
        if self.color {
            code
        } else {
            ""
        }
    }
}

fn surfaces(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::surface)
        .collect::<Vec<_>>()
        .join(" ")
}
