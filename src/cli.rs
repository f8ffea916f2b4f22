use clap::{Arg, ArgAction, Command};
use std::collections::HashMap;
use std::path::PathBuf;

const OPTION_MARKER: &str = "--";

/// Value attached to a parsed option: a bare flag or the values that followed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Flag,
    List(Vec<String>),
}

impl ArgValue {
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ArgValue::Flag => None,
            ArgValue::List(values) => Some(values),
        }
    }
}

/// Raw option map built from the command-line tokens.
///
/// Option names are not validated here; anything that looks like an option
/// is kept and later ignored if nothing asks for it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    options: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.options.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.options.contains_key(name)
    }

    pub fn list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(ArgValue::as_list)
    }

    fn commit(&mut self, name: Option<String>, values: Vec<String>) {
        let Some(name) = name.filter(|name| !name.is_empty()) else {
            return;
        };

        let value = if values.is_empty() {
            ArgValue::Flag
        } else {
            ArgValue::List(values)
        };
        self.options.insert(name, value);
    }
}

/// Scans `tokens` left to right, grouping every non-option token under the
/// option that precedes it. Tokens before the first option are dropped.
pub fn parse_arguments<I, S>(tokens: I) -> ParsedArgs
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = ParsedArgs::default();
    let mut current: Option<String> = None;
    let mut values = Vec::new();

    for token in tokens {
        let token = token.into();
        if token.contains(OPTION_MARKER) {
            parsed.commit(current.take(), std::mem::take(&mut values));
            current = Some(token.replacen(OPTION_MARKER, "", 1));
        } else {
            values.push(token);
        }
    }

    parsed.commit(current, values);
    parsed
}

/// Where a restore reads the manifest from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreTarget {
    Latest,
    Path(PathBuf),
}

/// Typed view over [`ParsedArgs`] with only the options the tool understands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub help: bool,
    pub deps: bool,
    pub devdeps: bool,
    pub nobackup: bool,
    pub restore: Option<RestoreTarget>,
    pub packages: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
}

impl Options {
    pub fn from_parsed(parsed: &ParsedArgs) -> Self {
        let restore = parsed.get("restore").map(|value| match value {
            ArgValue::Flag => RestoreTarget::Latest,
            ArgValue::List(values) => values
                .first()
                .map(|path| RestoreTarget::Path(PathBuf::from(path)))
                .unwrap_or(RestoreTarget::Latest),
        });

        Self {
            help: parsed.contains("help"),
            deps: parsed.contains("deps"),
            devdeps: parsed.contains("devdeps"),
            nobackup: parsed.contains("nobackup"),
            restore,
            packages: parsed.list("packages").map(<[String]>::to_vec),
            exclude: parsed.list("exclude").map(<[String]>::to_vec),
        }
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_parsed(&parse_arguments(tokens))
    }
}

/// Describes the command line for `--help`. Parsing itself is done by
/// [`parse_arguments`], which is more lenient than clap.
pub fn help_command() -> Command {
    Command::new("npm-update")
        .about("Update package.json dependencies to their latest versions")
        .long_about(
            "Update the packages listed in ./package.json to their latest version by \
             uninstalling and reinstalling them. A backup of package.json is written \
             before every update unless --nobackup is given.",
        )
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("deps")
                .long("deps")
                .action(ArgAction::SetTrue)
                .help("Update dependencies"),
        )
        .arg(
            Arg::new("devdeps")
                .long("devdeps")
                .action(ArgAction::SetTrue)
                .help("Update devDependencies"),
        )
        .arg(
            Arg::new("nobackup")
                .long("nobackup")
                .action(ArgAction::SetTrue)
                .help("Do not make a package.json backup"),
        )
        .arg(
            Arg::new("restore")
                .long("restore")
                .value_name("FILE")
                .num_args(0..=1)
                .help("Restore package.json (latest backup if FILE is omitted) and reinstall the packages"),
        )
        .arg(
            Arg::new("packages")
                .long("packages")
                .value_name("PACKAGES")
                .num_args(1..)
                .help("Only update the packages in the list"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .value_name("PACKAGES")
                .num_args(1..)
                .help("Update all packages except the ones in the list"),
        )
        .arg(
            Arg::new("help")
                .long("help")
                .action(ArgAction::SetTrue)
                .help("Print this help"),
        )
}

pub fn render_help() -> String {
    help_command().render_long_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(values: &[&str]) -> ArgValue {
        ArgValue::List(values.iter().map(|v| v.to_string()).collect())
    }

    #[test]
    fn every_option_becomes_a_key() {
        let parsed = parse_arguments(["--deps", "--devdeps", "--packages", "a", "b", "--nobackup"]);
        assert_eq!(parsed.options.len(), 4);
        assert_eq!(parsed.get("deps"), Some(&ArgValue::Flag));
        assert_eq!(parsed.get("devdeps"), Some(&ArgValue::Flag));
        assert_eq!(parsed.get("packages"), Some(&list(&["a", "b"])));
        assert_eq!(parsed.get("nobackup"), Some(&ArgValue::Flag));
    }

    #[test]
    fn leading_values_are_discarded() {
        let parsed = parse_arguments(["stray", "tokens", "--deps"]);
        assert_eq!(parsed.options.len(), 1);
        assert_eq!(parsed.get("deps"), Some(&ArgValue::Flag));
    }

    #[test]
    fn trailing_option_with_values_is_committed() {
        let parsed = parse_arguments(["--exclude", "lodash", "react"]);
        assert_eq!(parsed.list("exclude").unwrap(), ["lodash", "react"]);
    }

    #[test]
    fn unknown_options_are_carried() {
        let parsed = parse_arguments(["--frobnicate", "x"]);
        assert_eq!(parsed.get("frobnicate"), Some(&list(&["x"])));
        assert_eq!(Options::from_parsed(&parsed), Options::default());
    }

    #[test]
    fn repeated_option_keeps_last_occurrence() {
        let parsed = parse_arguments(["--packages", "a", "--packages", "b"]);
        assert_eq!(parsed.list("packages").unwrap(), ["b"]);
    }

    #[test]
    fn marker_inside_token_starts_an_option() {
        let parsed = parse_arguments(["x--deps"]);
        assert!(parsed.contains("xdeps"));
    }

    #[test]
    fn bare_marker_swallows_its_values() {
        let parsed = parse_arguments(["--", "a", "--deps"]);
        assert_eq!(parsed.options.len(), 1);
        assert!(parsed.contains("deps"));
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(parse_arguments(Vec::<String>::new()).options.is_empty());
    }

    #[test]
    fn options_restore_without_path_targets_latest() {
        let options = Options::from_tokens(["--restore"]);
        assert_eq!(options.restore, Some(RestoreTarget::Latest));
    }

    #[test]
    fn options_restore_uses_first_value() {
        let options = Options::from_tokens(["--restore", "old.json", "ignored.json"]);
        assert_eq!(
            options.restore,
            Some(RestoreTarget::Path(PathBuf::from("old.json")))
        );
    }

    #[test]
    fn options_package_lists_require_values() {
        let options = Options::from_tokens(["--deps", "--packages", "--exclude", "b"]);
        assert!(options.deps);
        assert_eq!(options.packages, None);
        assert_eq!(options.exclude, Some(vec!["b".to_string()]));
    }

    #[test]
    fn flag_with_values_is_still_set() {
        let options = Options::from_tokens(["--deps", "whatever", "--nobackup"]);
        assert!(options.deps);
        assert!(options.nobackup);
        assert!(!options.devdeps);
    }

    #[test]
    fn help_lists_every_flag() {
        let help = render_help();
        for flag in [
            "--deps",
            "--devdeps",
            "--nobackup",
            "--restore",
            "--packages",
            "--exclude",
            "--help",
        ] {
            assert!(help.contains(flag), "missing {flag} in help:\n{help}");
        }
    }
}
