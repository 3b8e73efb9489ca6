//! Filesystem search utility: walk one or more start paths with an explicit
//! pending stack and report the entries matching a combination of criteria
//! (name, extension, owner, inode, textual content), with a bounded result
//! count and annotated output.

pub mod cli;
pub mod config;
pub mod criteria;
pub mod entry;
pub mod error;
pub mod file_types;
pub mod filter;
pub mod output;
pub mod paths;
pub mod search;
pub mod walker;

pub use crate::criteria::{Budget, CaseMode, Criteria};
pub use crate::entry::EntryDescriptor;
pub use crate::error::{Result, SfindError};
pub use crate::file_types::{classify, EntryKind, ARCHIVE_EXTENSIONS};
pub use crate::filter::{FilterPipeline, Verdict};
pub use crate::output::{ConsoleDiagnostics, ConsoleOutput, Diagnostics, OutputSink};
pub use crate::search::{ContentSearcher, MatchCollector, MatchRecord, SearchVerdict};
pub use crate::walker::{SearchState, Walker};
