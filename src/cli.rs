use clap::{ArgAction, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
pub struct Cli {
    /// Start paths (default: current directory)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[arg(short = 'v', long = "version", action = ArgAction::Version,
          help = "Print version and exit")]
    version: Option<bool>,

    /// Do not ignore entries starting with '.'
    #[arg(short, long)]
    pub all: bool,

    /// Search the directories of the PATH variable (implies --full-path)
    #[arg(short, long)]
    pub which: bool,

    /// List subdirectories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Do not list directories
    #[arg(short = 'D', long = "ign-dir")]
    pub ign_dir: bool,

    /// Do not list regular files
    #[arg(short = 'F', long = "ign-file")]
    pub ign_file: bool,

    /// Do not list entries ending with '~'
    #[arg(short = 'B', long = "ign-backup")]
    pub ign_backup: bool,

    /// Do not list archive entries (.gz, .bz2, .zip, .rar, .7z)
    #[arg(short = 'A', long = "ign-archive")]
    pub ign_archive: bool,

    /// Ignore entries ending with any of the given extensions
    #[arg(short = 'G', long = "ign-ext", value_name = "EXT,EXT2,...",
          value_delimiter = ',')]
    pub ign_ext: Option<Vec<String>>,

    /// Show the full path of every entry
    #[arg(short = 'P', long = "full-path")]
    pub full_path: bool,

    /// Color entry names by kind
    #[arg(short, long)]
    pub color: bool,

    /// Print the inode of matched entries
    #[arg(short = 'I', long = "put-inode")]
    pub put_inode: bool,

    /// Print the line number of matched content (with --in-file)
    #[arg(short, long)]
    pub line: bool,

    /// Print entry permissions, owner and size
    #[arg(short = 'L', long = "info")]
    pub info: bool,

    /// Print the first line containing the searched word
    #[arg(short, long)]
    pub print: bool,

    /// Print every line containing the searched word
    #[arg(short = 'V', long = "print-all")]
    pub print_all: bool,

    /// Ignore case distinctions in file names and file content
    #[arg(short = 'C', long = "ign-case")]
    pub ign_case: bool,

    /// Ignore case distinctions when searching file content
    #[arg(long = "ign-case-in-file")]
    pub ign_case_in_file: bool,

    /// Ignore case distinctions when matching file names
    #[arg(long = "ign-case-file-name")]
    pub ign_case_file_name: bool,

    /// Count content matches per file (with --in-file)
    #[arg(long)]
    pub count: bool,

    /// Stop after N results; negative means unlimited
    #[arg(short = 'x', long = "exit", value_name = "N",
          allow_negative_numbers = true)]
    pub exit: Option<i64>,

    /// Do not scan entries with STR in their name
    #[arg(short = 'o', long = "no-scan", value_name = "STR")]
    pub no_scan: Option<String>,

    /// Search entries by extension
    #[arg(short, long, value_name = "EXT")]
    pub extension: Option<String>,

    /// Search for a word in file content
    #[arg(short = 'i', long = "in-file", value_name = "WORD")]
    pub in_file: Option<String>,

    /// Search entries whose name is exactly STR
    #[arg(short = 'N', long = "name", value_name = "STR")]
    pub name: Option<String>,

    /// Search entries with STR in their name
    #[arg(short = 'n', long = "in-name", value_name = "STR")]
    pub in_name: Option<String>,

    /// Search entries owned by UID
    #[arg(short, long, value_name = "UID")]
    pub uid: Option<u32>,

    /// Search entries by inode number
    #[arg(short = 'Q', long = "inode", value_name = "INO")]
    pub inode: Option<u64>,

    /// Search WORD like ack does (implies -V -l -P -r -c -i WORD)
    #[arg(long, value_name = "WORD")]
    pub ack: Option<String>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<Shell>,

    /// Write the log to FILE instead of stderr
    #[arg(long, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_combined_flags() {
        let cli = Cli::try_parse_from(["sfind", "-ra", "-i", "word", "src"]).unwrap();
        assert!(cli.recursive);
        assert!(cli.all);
        assert_eq!(cli.in_file.as_deref(), Some("word"));
        assert_eq!(cli.paths, vec![PathBuf::from("src")]);
    }

    #[test]
    fn ign_ext_splits_on_commas() {
        let cli = Cli::try_parse_from(["sfind", "-G", ".o,.tmp"]).unwrap();
        assert_eq!(
            cli.ign_ext.unwrap(),
            vec![".o".to_string(), ".tmp".to_string()]
        );
    }

    #[test]
    fn exit_accepts_negative() {
        let cli = Cli::try_parse_from(["sfind", "-x", "-1"]).unwrap();
        assert_eq!(cli.exit, Some(-1));
    }

    #[test]
    fn malformed_numeric_argument_is_rejected() {
        assert!(Cli::try_parse_from(["sfind", "-u", "abc"]).is_err());
        assert!(Cli::try_parse_from(["sfind", "-Q", "12x"]).is_err());
    }
}
