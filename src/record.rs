use crate::error::{ConvertError, Result};
use crate::options::OptionsHeader;
use regex::Regex;
use std::iter::Peekable;
use std::str::Lines;
use std::sync::LazyLock;

// optional sign, digits with at most one decimal point, optional exponent
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|[0-9]*\.?[0-9]+)(?:[eE][+-]?[0-9]+)?$")
        .expect("Invalid regex!")
});

pub fn is_numeric(token: &str) -> bool {
    RE_NUMBER.is_match(token)
}

/// Numeric tokens of a data line. Text after `!` is dropped, as is any
/// whitespace-separated token that is not a plain numeric literal.
pub fn numeric_tokens(line: &str) -> impl Iterator<Item = &str> + '_ {
    let data = match line.split_once('!') {
        Some((data, _)) => data,
        None => line,
    };
    data.split_whitespace().filter(|t| is_numeric(t))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LineKind {
    Blank,
    Comment,
    Options,
    Data,
}

impl LineKind {
    fn of(line: &str) -> LineKind {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('!') {
            LineKind::Comment
        } else if trimmed.starts_with('#') {
            LineKind::Options
        } else {
            LineKind::Data
        }
    }
}

/// One frequency point: the frequency token as written plus the values that
/// follow it, gathered across continuation lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    freq: &'a str,
    values: Vec<&'a str>,
}

impl<'a> Record<'a> {
    pub fn new(freq: &'a str, values: Vec<&'a str>) -> Self {
        Record { freq, values }
    }

    pub fn freq(&self) -> &'a str {
        self.freq
    }

    pub fn values(&self) -> &[&'a str] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_complete(&self, expected: usize) -> bool {
        self.values.len() >= expected
    }

    /// Pass the record through if it carries at least `expected` values.
    pub fn complete(self, expected: usize) -> Result<Record<'a>> {
        if self.is_complete(expected) {
            Ok(self)
        } else {
            Err(ConvertError::IncompleteRecord {
                freq: self.freq.to_string(),
                expected,
                found: self.values.len(),
            })
        }
    }
}

/// Comment lines and option line of a file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Metadata<'a> {
    pub comments: Vec<&'a str>,
    pub options: Option<OptionsHeader>,
}

/// Splits Touchstone text into [`Record`]s for an N-port network.
///
/// The assembler holds only the borrowed text; every call to
/// [`RecordAssembler::records`] starts a fresh pass, so callers can sample
/// the data and then convert it without keeping tokens around.
#[derive(Clone, Copy, Debug)]
pub struct RecordAssembler<'a> {
    text: &'a str,
    nports: usize,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(text: &'a str, nports: usize) -> Self {
        RecordAssembler { text, nports }
    }

    pub fn nports(&self) -> usize {
        self.nports
    }

    /// Values per record: one pair for each of the N² matrix entries.
    pub fn expected(&self) -> usize {
        2 * self.nports * self.nports
    }

    /// All comment lines (trimmed) and the first option line.
    pub fn metadata(&self) -> Metadata<'a> {
        let mut out = Metadata::default();
        for line in self.text.lines() {
            match LineKind::of(line) {
                LineKind::Comment => out.comments.push(line.trim()),
                LineKind::Options => {
                    if out.options.is_none() {
                        let opts = OptionsHeader::parse(line);
                        tracing::debug!(?opts, "parsed option line");
                        out.options = Some(opts);
                    } else {
                        tracing::warn!(line, "ignoring repeated option line");
                    }
                }
                _ => (),
            }
        }
        out
    }

    /// Records in file order, complete or not.
    pub fn records(&self) -> Records<'a> {
        Records {
            lines: self.text.lines().peekable(),
            expected: self.expected(),
        }
    }

    /// Records in file order; a short record yields
    /// [`ConvertError::IncompleteRecord`].
    pub fn complete_records(&self) -> impl Iterator<Item = Result<Record<'a>>> + 'a {
        let expected = self.expected();
        self.records().map(move |rec| rec.complete(expected))
    }
}

/// Lazy sequence of records over the lines of a file.
///
/// A line continues the current record only while the record is short, and
/// only if it is a data line that starts with whitespace. An unindented line
/// always begins a new record.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    lines: Peekable<Lines<'a>>,
    expected: usize,
}

impl<'a> Iterator for Records<'a> {
    type Item = Record<'a>;

    fn next(&mut self) -> Option<Record<'a>> {
        while let Some(line) = self.lines.next() {
            if LineKind::of(line) != LineKind::Data {
                continue;
            }
            let mut nums = numeric_tokens(line);
            let Some(freq) = nums.next() else {
                continue;
            };
            let mut values: Vec<&'a str> = nums.collect();

            while values.len() < self.expected {
                let Some(&next) = self.lines.peek() else {
                    break;
                };
                if LineKind::of(next) != LineKind::Data || !next.starts_with(char::is_whitespace) {
                    break;
                }
                values.extend(numeric_tokens(next));
                self.lines.next();
            }

            return Some(Record { freq, values });
        }
        None
    }
}
