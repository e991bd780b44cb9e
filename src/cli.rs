use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use tracing::debug;

use crate::error::UsageError;
use crate::paths::find_bytes;

#[derive(Parser)]
#[command(
    name = "myfind",
    version,
    about = "Find files by name or regex and optionally run a command on each",
    override_usage = "myfind [--regex=pattern | --name=filename] directory [command]"
)]
pub struct Cli {
    /// Filter flags, the directory and the command template, in any order.
    /// `{}` in the command is replaced with each matched path.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl Cli {
    /// The tokens to scan. clap swallows a bare `--`, which is an ordinary
    /// token here, so the process arguments are re-read verbatim.
    pub fn into_tokens(self) -> Vec<OsString> {
        let raw: Vec<OsString> = std::env::args_os().skip(1).collect();
        if raw != self.args {
            debug!(clap = ?self.args, raw = ?raw, "using raw argument tokens");
        }
        raw
    }
}

/// Which entries are selected during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    None,
    Name(OsString),
    Regex(OsString),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub directory: OsString,
    pub filter: FilterSpec,
    pub command: Option<OsString>,
}

const REGEX_FLAG: &[u8] = b"--regex=";
const NAME_FLAG: &[u8] = b"--name=";

/// Value following the first occurrence of `flag` anywhere in `arg`.
fn flag_value<'a>(arg: &'a [u8], flag: &[u8]) -> Option<&'a OsStr> {
    find_bytes(arg, flag).map(|i| OsStr::from_bytes(&arg[i + flag.len()..]))
}

/// Parses arguments (program name excluded) into an [`Invocation`].
///
/// Empty filter values and empty plain tokens count as absent.
pub fn parse_args(args: &[OsString]) -> Result<Invocation, UsageError> {
    let mut directory: Option<&OsStr> = None;
    let mut regex: Option<&OsStr> = None;
    let mut name: Option<&OsStr> = None;
    let mut command: Option<&OsStr> = None;

    for arg in args.iter().map(OsString::as_os_str) {
        let regex_value = flag_value(arg.as_bytes(), REGEX_FLAG);
        let name_value = flag_value(arg.as_bytes(), NAME_FLAG);

        if regex_value.is_some() || name_value.is_some() {
            if let Some(v) = regex_value {
                regex = Some(v);
            }
            if let Some(v) = name_value {
                name = Some(v);
            }
        } else if directory.is_some_and(|d| !d.is_empty()) {
            command = Some(arg);
        } else {
            directory = Some(arg);
        }
    }

    let regex = regex.filter(|v| !v.is_empty());
    let name = name.filter(|v| !v.is_empty());

    let filter = match (regex, name) {
        (Some(_), Some(_)) => return Err(UsageError::ConflictingFilters),
        (Some(r), None) => FilterSpec::Regex(r.to_os_string()),
        (None, Some(n)) => FilterSpec::Name(n.to_os_string()),
        (None, None) => FilterSpec::None,
    };

    let directory = match directory {
        Some(d) if !d.is_empty() => d.to_os_string(),
        _ => return Err(UsageError::MissingDirectory),
    };

    Ok(Invocation {
        directory,
        filter,
        command: command.filter(|c| !c.is_empty()).map(OsStr::to_os_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn some(s: &str) -> Option<&OsStr> {
        Some(OsStr::new(s))
    }

    #[test]
    fn directory_only() {
        let inv = parse_args(&args(&["/tmp"])).unwrap();
        assert_eq!(
            inv,
            Invocation {
                directory: "/tmp".into(),
                filter: FilterSpec::None,
                command: None,
            }
        );
    }

    #[test]
    fn regex_filter_and_command() {
        let inv = parse_args(&args(&["--regex=^a", "/tmp", "echo {}"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Regex("^a".into()));
        assert_eq!(inv.directory, "/tmp");
        assert_eq!(inv.command.as_deref(), some("echo {}"));
    }

    #[test]
    fn flags_may_follow_positionals() {
        let inv = parse_args(&args(&["/tmp", "ls {}", "--name=a.txt"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Name("a.txt".into()));
        assert_eq!(inv.command.as_deref(), some("ls {}"));
    }

    #[test]
    fn later_command_overwrites_earlier() {
        let inv = parse_args(&args(&["/tmp", "echo {}", "cat {}"])).unwrap();
        assert_eq!(inv.command.as_deref(), some("cat {}"));
    }

    #[test]
    fn value_keeps_everything_after_equals() {
        let inv = parse_args(&args(&["--regex=a=b", "/tmp"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Regex("a=b".into()));
    }

    #[test]
    fn later_flag_overwrites_earlier_of_same_kind() {
        let inv = parse_args(&args(&["--name=a", "--name=b", "/tmp"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Name("b".into()));
    }

    #[test]
    fn both_filters_conflict() {
        let err = parse_args(&args(&["--regex=a", "--name=b", "/tmp"])).unwrap_err();
        assert!(matches!(err, UsageError::ConflictingFilters));
    }

    #[test]
    fn both_filters_conflict_without_directory() {
        let err = parse_args(&args(&["--regex=a", "--name=b"])).unwrap_err();
        assert!(matches!(err, UsageError::ConflictingFilters));
    }

    #[test]
    fn missing_directory() {
        let err = parse_args(&args(&["--name=a"])).unwrap_err();
        assert!(matches!(err, UsageError::MissingDirectory));

        let err = parse_args(&[]).unwrap_err();
        assert!(matches!(err, UsageError::MissingDirectory));
    }

    #[test]
    fn empty_filter_value_means_no_filter() {
        let inv = parse_args(&args(&["--regex=", "/tmp"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::None);

        let inv = parse_args(&args(&["--regex=", "--name=x", "/tmp"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Name("x".into()));
    }

    #[test]
    fn empty_directory_token_leaves_slot_open() {
        let inv = parse_args(&args(&["", "/tmp"])).unwrap();
        assert_eq!(inv.directory, "/tmp");
        assert_eq!(inv.command, None);
    }

    #[test]
    fn flag_inside_token_is_recognized() {
        let inv = parse_args(&args(&["x--name=foo", "/tmp"])).unwrap();
        assert_eq!(inv.filter, FilterSpec::Name("foo".into()));
        assert_eq!(inv.directory, "/tmp");
    }

    #[test]
    fn program_name_must_be_stripped_by_caller() {
        let inv = parse_args(&args(&["myfind", "/tmp"])).unwrap();
        assert_eq!(inv.directory, "myfind");
        assert_eq!(inv.command.as_deref(), some("/tmp"));
    }

    #[test]
    fn double_dash_is_a_plain_token() {
        let inv = parse_args(&args(&["--", "/tmp"])).unwrap();
        assert_eq!(inv.directory, "--");
        assert_eq!(inv.command.as_deref(), some("/tmp"));
    }

    #[test]
    fn non_utf8_tokens_pass_through() {
        let dir = OsStr::from_bytes(b"/tmp/\xff").to_os_string();
        let flag = OsStr::from_bytes(b"--name=a\xff").to_os_string();
        let inv = parse_args(&[flag, dir.clone()]).unwrap();
        assert_eq!(inv.directory, dir);
        assert_eq!(
            inv.filter,
            FilterSpec::Name(OsStr::from_bytes(b"a\xff").to_os_string())
        );
    }

    #[test]
    fn clap_forwards_hyphenated_tokens() {
        let cli = Cli::try_parse_from(["myfind", "--regex=^a", "/tmp", "echo {}"]).unwrap();
        assert_eq!(cli.args, args(&["--regex=^a", "/tmp", "echo {}"]));
    }

    #[test]
    fn clap_accepts_no_tokens() {
        let cli = Cli::try_parse_from(["myfind"]).unwrap();
        assert!(cli.args.is_empty());
    }

    #[test]
    fn clap_accepts_non_utf8_tokens() {
        let raw = OsStr::from_bytes(b"/tmp/\xff").to_os_string();
        let cli = Cli::try_parse_from([OsString::from("myfind"), raw.clone()]).unwrap();
        assert_eq!(cli.args, vec![raw]);
    }

    #[test]
    fn clap_handles_help_and_version_first() {
        let err = Cli::try_parse_from(["myfind", "--help"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
        let err = Cli::try_parse_from(["myfind", "--version"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
