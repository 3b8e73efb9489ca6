use std::io::{self, Write};
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use colored::Colorize;
use log::warn;
use nix::unistd::{Uid, User};

use crate::criteria::Criteria;
use crate::entry::EntryDescriptor;
use crate::file_types::EntryKind;
use crate::search::MatchRecord;
use crate::walker::SearchState;

/// Receives every included entry together with its captured match lines.
pub trait OutputSink {
    fn emit(
        &mut self,
        entry: &EntryDescriptor,
        records: &[MatchRecord],
        state: &SearchState,
    ) -> io::Result<()>;
}

/// Receives every recoverable walk failure; the walk continues after each
/// report.
pub trait Diagnostics {
    fn report(&mut self, op: &str, path: &Path, err: &io::Error);
}

/// Renders matched entries as annotated text lines.
pub struct ConsoleOutput<'a, W: Write> {
    criteria: &'a Criteria,
    out: W,
}

impl<'a, W: Write> ConsoleOutput<'a, W> {
    pub fn new(criteria: &'a Criteria, out: W) -> ConsoleOutput<'a, W> {
        ConsoleOutput { criteria, out }
    }

    fn render_name(&self, entry: &EntryDescriptor, state: &SearchState) -> String {
        let display = if self.criteria.full_path {
            entry.path.to_string_lossy().into_owned()
        } else {
            format!("{}{}", state.current_prefix(), entry.name)
        };
        if !self.criteria.color {
            return display;
        }
        match entry.kind {
            EntryKind::Directory => display.red().to_string(),
            EntryKind::RegularFile => display.blue().to_string(),
            EntryKind::Backup => display.yellow().to_string(),
            EntryKind::Archive => display.magenta().to_string(),
            EntryKind::Other => display,
        }
    }
}

impl<W: Write> OutputSink for ConsoleOutput<'_, W> {
    fn emit(
        &mut self,
        entry: &EntryDescriptor,
        records: &[MatchRecord],
        state: &SearchState,
    ) -> io::Result<()> {
        if self.criteria.show_info {
            let owner = user_name(entry.stat.uid());
            write!(self.out, "{}  ", permission_string(entry.stat.mode()))?;
            if let Some(owner) = owner {
                write!(self.out, "{owner} ")?;
            }
            write!(self.out, "{} ", entry.stat.len())?;
        }
        if self.criteria.show_inode {
            write!(self.out, "(ino: {}) ", entry.stat.ino())?;
        }
        if self.criteria.count_matches && state.content_matches() > 0 {
            write!(self.out, "(n_result: {}) ", state.content_matches())?;
        }
        let name = self.render_name(entry, state);
        write!(self.out, "{name} ")?;

        if records.is_empty() {
            writeln!(self.out)?;
            return Ok(());
        }
        if records.iter().any(|record| record.text.is_some()) {
            writeln!(self.out)?;
            for record in records {
                let text = record.text.as_deref().unwrap_or_default();
                if self.criteria.line_numbers {
                    writeln!(self.out, " [{}] + {}", record.line_number, text)?;
                } else {
                    writeln!(self.out, " + {}", text)?;
                }
            }
        } else {
            for record in records {
                writeln!(self.out, " (line: {})", record.line_number)?;
            }
        }
        Ok(())
    }
}

/// Prints recoverable failures to stderr and the log.
#[derive(Debug, Default)]
pub struct ConsoleDiagnostics {
    reported: u64,
}

impl ConsoleDiagnostics {
    pub fn reported(&self) -> u64 {
        self.reported
    }
}

impl Diagnostics for ConsoleDiagnostics {
    fn report(&mut self, op: &str, path: &Path, err: &io::Error) {
        self.reported += 1;
        warn!("{op} `{}': {err}", path.display());
        eprintln!(
            "{}",
            format!("sfind:{op}: `{}': {err}", path.display()).red()
        );
    }
}

fn permission_string(mode: u32) -> String {
    let bit = |mask: u32, ch: char| if mode & mask != 0 { ch } else { '-' };
    let special = |set_bit: u32, exec_bit: u32| {
        if mode & set_bit != 0 {
            's'
        } else if mode & exec_bit != 0 {
            'x'
        } else {
            '-'
        }
    };
    [
        bit(0o040000, 'd'),
        bit(0o400, 'r'),
        bit(0o200, 'w'),
        special(0o4000, 0o100),
        bit(0o040, 'r'),
        bit(0o020, 'w'),
        special(0o2000, 0o010),
        bit(0o004, 'r'),
        bit(0o002, 'w'),
        bit(0o001, 'x'),
    ]
    .iter()
    .collect()
}

fn user_name(uid: u32) -> Option<String> {
    match User::from_uid(Uid::from_raw(uid)) {
        Ok(user) => user.map(|user| user.name),
        Err(err) => {
            warn!("uid {uid} lookup failed: {err}");
            None
        }
    }
}
