use clap::{Args as ClapArgs, Parser, Subcommand};
use cps_dependencies::application::dto::OutputFormat;
use std::path::PathBuf;

/// Inspect project.assets.json files and the filtered dependency tree built from them
#[derive(Parser, Debug)]
#[command(name = "cps-deps")]
#[command(version)]
#[command(about = "Inspect NuGet restore output and the filtered dependency tree", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every subcommand
#[derive(ClapArgs, Debug, Clone)]
pub struct GlobalArgs {
    /// Assets file, its obj directory, a project directory or a project file
    #[arg(short, long, global = true, default_value = ".")]
    pub assets: PathBuf,

    /// Target framework (assets-file name, short name or full name)
    #[arg(short, long, global = true)]
    pub target: Option<String>,

    /// Output format: text or json
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Config file (defaults to cps-deps.config.yml next to the project)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log pipeline details to stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress messages
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the filtered dependency tree
    Tree(TreeArgs),
    /// List the targets of the assets file
    Targets,
    /// List libraries that depend on a library
    Dependents {
        /// Library name
        name: String,
    },
    /// List the direct dependencies of a library
    Dependencies {
        /// Library name
        name: String,
        /// Only match this version of the library
        #[arg(long)]
        version: Option<String>,
    },
    /// Print restore diagnostics
    Diagnostics,
    /// Find where a package was extracted
    PackagePath {
        /// Package id
        name: String,
        /// Package version
        version: String,
    },
}

#[derive(ClapArgs, Debug, Clone, Default)]
pub struct TreeArgs {
    /// Item spec written in the project file; repeat for each reference.
    /// Top-level references not listed are shown as implicit.
    #[arg(long = "item-spec", value_name = "SPEC")]
    pub item_specs: Vec<String>,

    /// Leave a built-in filter out of the chain; can be repeated
    #[arg(long = "disable-filter", value_name = "NAME")]
    pub disabled_filters: Vec<String>,

    /// Load referenced projects' assets files so broken references show as unresolved
    #[arg(long)]
    pub follow_project_references: bool,

    /// Exit with status 1 when any dependency is unresolved
    #[arg(long)]
    pub fail_on_unresolved: bool,

    /// Include hidden dependencies
    #[arg(long)]
    pub show_hidden: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_tree_with_flags() {
        let args = Args::try_parse_from([
            "cps-deps",
            "tree",
            "--item-spec",
            "Serilog",
            "--disable-filter",
            "implicit-top-level",
            "--follow-project-references",
            "-a",
            "src/App",
            "-f",
            "json",
        ])
        .unwrap();

        let Command::Tree(tree) = args.command else {
            panic!("expected tree");
        };
        assert_eq!(tree.item_specs, vec!["Serilog"]);
        assert_eq!(tree.disabled_filters, vec!["implicit-top-level"]);
        assert!(tree.follow_project_references);
        assert!(!tree.fail_on_unresolved);
        assert_eq!(args.global.assets, PathBuf::from("src/App"));
        assert_eq!(args.global.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_global_args_before_subcommand() {
        let args = Args::try_parse_from(["cps-deps", "-t", "net48", "-vv", "targets"]).unwrap();
        assert!(matches!(args.command, Command::Targets));
        assert_eq!(args.global.target.as_deref(), Some("net48"));
        assert_eq!(args.global.verbose, 2);
        assert_eq!(args.global.assets, PathBuf::from("."));
    }

    #[test]
    fn test_dependencies_with_version() {
        let args =
            Args::try_parse_from(["cps-deps", "dependencies", "Serilog", "--version", "2.10.0"])
                .unwrap();
        match args.command {
            Command::Dependencies { name, version } => {
                assert_eq!(name, "Serilog");
                assert_eq!(version.as_deref(), Some("2.10.0"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let result = Args::try_parse_from(["cps-deps", "targets", "-f", "markdown"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["cps-deps"]).is_err());
    }
}
