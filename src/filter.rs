use std::os::unix::fs::MetadataExt;

use crate::criteria::Criteria;
use crate::entry::EntryDescriptor;
use crate::file_types::EntryKind;
use crate::output::Diagnostics;
use crate::search::{ContentSearcher, MatchCollector, SearchVerdict};
use crate::walker::SearchState;

/// Outcome of the filter pipeline for one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Include,
    ExcludeByType,
    ExcludeByExtension,
    NoMatch,
}

/// Decides per-entry inclusion from the combined criteria.
///
/// Exclusions are checked first; the positive criteria are then OR-ed in
/// cheap-to-expensive order and the first satisfied one short-circuits the
/// rest. The content scan is the only criterion doing file I/O and runs
/// last.
pub struct FilterPipeline<'a> {
    criteria: &'a Criteria,
    searcher: Option<ContentSearcher>,
}

impl<'a> FilterPipeline<'a> {
    pub fn new(criteria: &'a Criteria) -> FilterPipeline<'a> {
        let searcher = criteria
            .content_word
            .as_deref()
            .map(|word| ContentSearcher::new(word, criteria));
        FilterPipeline { criteria, searcher }
    }

    pub fn accept(
        &self,
        entry: &EntryDescriptor,
        state: &mut SearchState,
        collector: &mut MatchCollector,
        diagnostics: &mut dyn Diagnostics,
    ) -> Verdict {
        let c = self.criteria;

        if self.excluded_by_type(entry.kind) {
            return Verdict::ExcludeByType;
        }
        if !c.ignored_extensions.is_empty()
            && has_extension_in(&entry.name, &c.ignored_extensions)
        {
            return Verdict::ExcludeByExtension;
        }

        state.reset_content_matches();
        if c.is_listing() {
            return Verdict::Include;
        }
        if c.uid == Some(entry.stat.uid()) {
            return Verdict::Include;
        }
        if c.inode == Some(entry.stat.ino()) {
            return Verdict::Include;
        }
        if let Some(extension) = &c.extension {
            if extension_of(&entry.name) == Some(extension.as_str()) {
                return Verdict::Include;
            }
        }
        if let Some(word) = &c.name_contains {
            if c.name_case.contains(&entry.name, word) {
                return Verdict::Include;
            }
        }
        if let Some(name) = &c.name_exact {
            if c.name_case.equals(&entry.name, name) {
                return Verdict::Include;
            }
        }
        if let Some(searcher) = &self.searcher {
            if entry.kind != EntryKind::Directory {
                match searcher.search(&entry.path, collector, state) {
                    Ok(SearchVerdict::Found) => return Verdict::Include,
                    Ok(SearchVerdict::NotFound) => {}
                    Err(err) => {
                        collector.clear();
                        diagnostics.report("open", &entry.path, &err);
                    }
                }
            }
        }
        Verdict::NoMatch
    }

    fn excluded_by_type(&self, kind: EntryKind) -> bool {
        let c = self.criteria;
        match kind {
            EntryKind::Backup => c.ignore_backups,
            EntryKind::Directory => c.ignore_dirs,
            EntryKind::RegularFile => c.ignore_files,
            EntryKind::Archive => c.ignore_archives,
            EntryKind::Other => false,
        }
    }
}

fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|pos| &name[pos..])
}

fn has_extension_in(name: &str, ignored: &[String]) -> bool {
    match extension_of(name) {
        Some(extension) => ignored.iter().any(|e| e == extension),
        None => false,
    }
}
