use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use memchr::memmem::{self, Finder};

use crate::criteria::{CaseMode, Criteria};
use crate::walker::SearchState;

/// One line of file content that satisfied the content criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    /// 1-based line number.
    pub line_number: u64,
    /// Line text with the trailing newline stripped; `None` when only the
    /// line number was requested.
    pub text: Option<String>,
}

/// Append-only, discovery-ordered records for the entry currently being
/// evaluated. Owned exclusively by that entry, discarded after emission.
#[derive(Debug, Default)]
pub struct MatchCollector {
    records: Vec<MatchRecord>,
}

impl MatchCollector {
    pub fn push(&mut self, record: MatchRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchVerdict {
    Found,
    NotFound,
}

/// Substring scanner fixed at build time: a precompiled finder for the
/// case-sensitive mode, an ASCII-folded needle otherwise.
enum WordScanner {
    Exact(Finder<'static>),
    Folded(Vec<u8>),
}

impl WordScanner {
    fn new(word: &str, case: CaseMode) -> WordScanner {
        match case {
            CaseMode::Sensitive => WordScanner::Exact(Finder::new(word).into_owned()),
            CaseMode::Insensitive => WordScanner::Folded(word.as_bytes().to_ascii_lowercase()),
        }
    }

    fn matches(&self, line: &[u8]) -> bool {
        match self {
            WordScanner::Exact(finder) => finder.find(line).is_some(),
            WordScanner::Folded(needle) => {
                memmem::find(&line.to_ascii_lowercase(), needle).is_some()
            }
        }
    }
}

/// Streams a file line by line and tests each line for the target word.
///
/// First-match mode stops scanning at the first matching line; all-matches
/// mode (print-all or count) runs to end-of-file and records every matching
/// line. Line numbers start at 1 and increment once per line terminator
/// consumed; the final unterminated line still counts.
pub struct ContentSearcher {
    scanner: WordScanner,
    capture_text: bool,
    record_lines: bool,
    scan_all: bool,
}

impl ContentSearcher {
    pub fn new(word: &str, criteria: &Criteria) -> ContentSearcher {
        ContentSearcher {
            scanner: WordScanner::new(word, criteria.content_case),
            capture_text: criteria.print_first || criteria.print_all,
            record_lines: criteria.print_first || criteria.print_all || criteria.line_numbers,
            scan_all: criteria.print_all || criteria.count_matches,
        }
    }

    /// Scan `path`, pushing one record per matching line into `collector`
    /// and counting every match into `state`. The file is closed on every
    /// exit path, including read errors.
    pub fn search(
        &self,
        path: &Path,
        collector: &mut MatchCollector,
        state: &mut SearchState,
    ) -> io::Result<SearchVerdict> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut line: Vec<u8> = Vec::new();
        let mut line_number: u64 = 1;
        let mut matched: u64 = 0;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            if self.scanner.matches(&line) {
                matched += 1;
                state.record_content_match();
                if self.record_lines {
                    collector.push(MatchRecord {
                        line_number,
                        text: self.capture_text.then(|| strip_newline(&line)),
                    });
                }
                if !self.scan_all {
                    break;
                }
            }
            if line.ends_with(b"\n") {
                line_number += 1;
            }
        }

        if matched > 0 {
            Ok(SearchVerdict::Found)
        } else {
            Ok(SearchVerdict::NotFound)
        }
    }
}

fn strip_newline(line: &[u8]) -> String {
    let trimmed = line.strip_suffix(b"\n").unwrap_or(line);
    String::from_utf8_lossy(trimmed).into_owned()
}
