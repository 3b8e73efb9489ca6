use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::criteria::{Budget, Criteria};
use crate::entry::EntryDescriptor;
use crate::filter::{FilterPipeline, Verdict};
use crate::output::{Diagnostics, OutputSink};
use crate::search::MatchCollector;

/// Mutable walk-scoped state, threaded explicitly through the walker and
/// filter pipeline so independent walks never contaminate each other.
#[derive(Debug)]
pub struct SearchState {
    budget: Budget,
    content_matches: u64,
    current_prefix: String,
}

impl SearchState {
    pub fn new(budget: Budget) -> SearchState {
        SearchState {
            budget,
            content_matches: 0,
            current_prefix: String::new(),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.budget.is_exhausted()
    }

    pub fn consume_budget(&mut self) {
        self.budget.consume();
    }

    pub fn reset_content_matches(&mut self) {
        self.content_matches = 0;
    }

    pub fn record_content_match(&mut self) {
        self.content_matches += 1;
    }

    pub fn content_matches(&self) -> u64 {
        self.content_matches
    }

    /// Directory prefix used to render relative names, with a trailing `/`.
    pub fn current_prefix(&self) -> &str {
        &self.current_prefix
    }

    fn set_current_prefix(&mut self, dir: &Path) {
        let mut prefix = dir.to_string_lossy().into_owned();
        if !prefix.ends_with('/') {
            prefix.push('/');
        }
        self.current_prefix = prefix;
    }

    fn clear_current_prefix(&mut self) {
        self.current_prefix.clear();
    }
}

/// Iterative directory walker. Directories are expanded depth-first through
/// an explicit pending stack, most-recently-discovered first; the walk
/// unwinds as soon as the shared result budget is exhausted.
pub struct Walker<'a> {
    criteria: &'a Criteria,
    pipeline: FilterPipeline<'a>,
    output: &'a mut dyn OutputSink,
    diagnostics: &'a mut dyn Diagnostics,
}

impl<'a> Walker<'a> {
    pub fn new(
        criteria: &'a Criteria,
        output: &'a mut dyn OutputSink,
        diagnostics: &'a mut dyn Diagnostics,
    ) -> Walker<'a> {
        Walker {
            criteria,
            pipeline: FilterPipeline::new(criteria),
            output,
            diagnostics,
        }
    }

    /// Walk every root in the order given, with one shared budget. Roots
    /// that are not directories are evaluated directly against the filter
    /// pipeline; directory roots are expanded.
    pub fn walk(&mut self, roots: &[PathBuf], state: &mut SearchState) -> io::Result<()> {
        for root in roots {
            if state.is_exhausted() {
                break;
            }
            let entry = match EntryDescriptor::probe(root.clone()) {
                Ok(entry) => entry,
                Err(err) => {
                    self.diagnostics.report("stat", root, &err);
                    continue;
                }
            };
            if entry.is_dir() {
                self.walk_dir(root.clone(), state)?;
            } else {
                state.clear_current_prefix();
                self.evaluate(entry, state)?;
            }
        }
        Ok(())
    }

    fn walk_dir(&mut self, root: PathBuf, state: &mut SearchState) -> io::Result<()> {
        let mut pending = vec![root];
        while let Some(dir) = pending.pop() {
            if state.is_exhausted() {
                break;
            }
            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    self.diagnostics.report("opendir", &dir, &err);
                    continue;
                }
            };
            state.set_current_prefix(&dir);
            for dirent in entries {
                if state.is_exhausted() {
                    break;
                }
                let dirent = match dirent {
                    Ok(dirent) => dirent,
                    Err(err) => {
                        self.diagnostics.report("readdir", &dir, &err);
                        continue;
                    }
                };
                let name = dirent.file_name().to_string_lossy().into_owned();
                if !self.should_consider(&name) {
                    continue;
                }
                let path = dir.join(dirent.file_name());
                let entry = match EntryDescriptor::probe(path) {
                    Ok(entry) => entry,
                    Err(err) => {
                        self.diagnostics.report("stat", &dirent.path(), &err);
                        continue;
                    }
                };
                // expansion is independent of the filter verdict
                let descend = entry.is_dir() && self.criteria.recursive;
                let subdir = descend.then(|| entry.path.clone());
                self.evaluate(entry, state)?;
                if let Some(subdir) = subdir {
                    pending.push(subdir);
                }
            }
        }
        Ok(())
    }

    fn evaluate(&mut self, entry: EntryDescriptor, state: &mut SearchState) -> io::Result<()> {
        let mut collector = MatchCollector::default();
        let verdict = self
            .pipeline
            .accept(&entry, state, &mut collector, self.diagnostics);
        if verdict == Verdict::Include {
            self.output.emit(&entry, collector.records(), state)?;
            state.consume_budget();
        }
        Ok(())
    }

    /// Hidden-entry rule and name-ignore rule. The self/parent pseudo-entries
    /// never appear in `read_dir` listings.
    fn should_consider(&self, name: &str) -> bool {
        if name.starts_with('.') && !self.criteria.all_entries {
            return false;
        }
        match &self.criteria.ignore_substring {
            Some(ignored) => !name.contains(ignored),
            None => true,
        }
    }
}
