use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use crate::file_types::{classify, EntryKind};

/// One filesystem entry under consideration. Constructed fresh per directory
/// entry or command-line argument, never mutated after classification.
#[derive(Debug)]
pub struct EntryDescriptor {
    pub path: PathBuf,
    pub name: String,
    pub kind: EntryKind,
    pub stat: Metadata,
}

impl EntryDescriptor {
    /// Status-query `path` without dereferencing symlinks, then classify it.
    ///
    /// A failed query is the caller's signal to skip the entry: report it,
    /// do not traverse it, do not match it.
    pub fn probe(path: PathBuf) -> io::Result<EntryDescriptor> {
        let name = base_name(&path);
        let stat = fs::symlink_metadata(&path)?;
        let kind = classify(&name, &stat);
        Ok(EntryDescriptor {
            path,
            name,
            kind,
            stat,
        })
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
