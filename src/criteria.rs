use crate::cli::Cli;
use crate::config::Config;

/// Comparison strategy, fixed once when the criteria are built. Case folding
/// is ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseMode {
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            CaseMode::Sensitive => haystack.contains(needle),
            CaseMode::Insensitive => haystack
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
        }
    }

    pub fn equals(self, a: &str, b: &str) -> bool {
        match self {
            CaseMode::Sensitive => a == b,
            CaseMode::Insensitive => a.eq_ignore_ascii_case(b),
        }
    }
}

/// Remaining-result budget for one invocation.
///
/// `Unlimited` (absent or negative limit) and an explicit `Remaining(0)` are
/// distinct states: the latter stops the walk before anything is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    Unlimited,
    Remaining(u64),
}

impl Budget {
    pub fn from_limit(limit: Option<i64>) -> Budget {
        match limit {
            Some(n) if n >= 0 => Budget::Remaining(n as u64),
            _ => Budget::Unlimited,
        }
    }

    pub fn is_exhausted(self) -> bool {
        self == Budget::Remaining(0)
    }

    pub fn consume(&mut self) {
        if let Budget::Remaining(n) = self {
            *n = n.saturating_sub(1);
        }
    }
}

/// Immutable snapshot of the active search configuration. Built once before
/// the walk begins and shared by reference for its whole duration.
#[derive(Debug, Default, Clone)]
pub struct Criteria {
    pub name_exact: Option<String>,
    pub name_contains: Option<String>,
    pub extension: Option<String>,
    pub uid: Option<u32>,
    pub inode: Option<u64>,
    pub content_word: Option<String>,
    pub ignore_substring: Option<String>,
    pub ignored_extensions: Vec<String>,
    pub all_entries: bool,
    pub recursive: bool,
    pub ignore_dirs: bool,
    pub ignore_files: bool,
    pub ignore_backups: bool,
    pub ignore_archives: bool,
    pub full_path: bool,
    pub color: bool,
    pub show_inode: bool,
    pub show_info: bool,
    pub line_numbers: bool,
    pub print_first: bool,
    pub print_all: bool,
    pub count_matches: bool,
    pub name_case: CaseMode,
    pub content_case: CaseMode,
}

impl Criteria {
    pub fn from_cli(cli: &Cli, config: &Config) -> Criteria {
        let ignored_extensions = cli
            .ign_ext
            .clone()
            .unwrap_or_else(|| config.ignore.extensions.clone())
            .iter()
            .map(|ext| normalize_extension(ext))
            .collect();

        let mut criteria = Criteria {
            name_exact: cli.name.clone(),
            name_contains: cli.in_name.clone(),
            extension: cli.extension.as_deref().map(normalize_extension),
            uid: cli.uid,
            inode: cli.inode,
            content_word: cli.in_file.clone(),
            ignore_substring: cli.no_scan.clone(),
            ignored_extensions,
            all_entries: cli.all,
            recursive: cli.recursive,
            ignore_dirs: cli.ign_dir,
            ignore_files: cli.ign_file,
            ignore_backups: cli.ign_backup,
            ignore_archives: cli.ign_archive,
            full_path: cli.full_path || cli.which,
            color: cli.color || config.display.color,
            show_inode: cli.put_inode,
            show_info: cli.info,
            line_numbers: cli.line,
            print_first: cli.print,
            print_all: cli.print_all,
            count_matches: cli.count,
            name_case: CaseMode::Sensitive,
            content_case: CaseMode::Sensitive,
        };

        if let Some(word) = &cli.ack {
            criteria.content_word = Some(word.clone());
            criteria.print_all = true;
            criteria.line_numbers = true;
            criteria.full_path = true;
            criteria.recursive = true;
            criteria.color = true;
        }
        if cli.ign_case || cli.ign_case_file_name {
            criteria.name_case = CaseMode::Insensitive;
        }
        if cli.ign_case || cli.ign_case_in_file {
            criteria.content_case = CaseMode::Insensitive;
        }
        criteria
    }

    /// Default listing mode: no search criterion configured at all.
    pub fn is_listing(&self) -> bool {
        self.content_word.is_none()
            && self.name_contains.is_none()
            && self.name_exact.is_none()
            && self.extension.is_none()
            && self.uid.is_none()
            && self.inode.is_none()
    }
}

fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{ext}")
    }
}
