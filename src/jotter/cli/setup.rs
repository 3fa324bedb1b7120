use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "jotter", bin_name = "jotter", version)]
#[command(about = "Search and bulk-replace across your remote notes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the note store (overrides config and JOTTER_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List notes (first line of each)
    #[command(alias = "ls")]
    List {
        /// Only show notes containing this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show notes containing a term, with every match highlighted
    #[command(alias = "s")]
    Search {
        /// Literal, case-sensitive text to look for
        term: String,
    },

    /// Replace a term in every note that contains it
    #[command(alias = "r")]
    Replace {
        /// Literal, case-sensitive text to replace
        term: String,

        /// Replacement text (may be empty to delete the term)
        replacement: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = parse(&["jotter"]);
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn list_with_search() {
        let cli = parse(&["jotter", "ls", "-s", "todo"]);
        assert_eq!(
            cli.command,
            Some(Commands::List {
                search: Some("todo".into())
            })
        );
    }

    #[test]
    fn replace_accepts_empty_replacement() {
        let cli = parse(&["jotter", "replace", "x", "", "--yes"]);
        assert_eq!(
            cli.command,
            Some(Commands::Replace {
                term: "x".into(),
                replacement: String::new(),
                yes: true,
            })
        );
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["jotter", "search", "cat", "--api-url", "http://h:1", "-v"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://h:1"));
        assert!(cli.verbose);
    }

    #[test]
    fn replace_requires_both_terms() {
        assert!(Cli::try_parse_from(["jotter", "replace", "only-term"]).is_err());
    }
}
