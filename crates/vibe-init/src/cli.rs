//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::Parser;

/// vibe-init - Create a new project from the FastAPI vibe template
#[derive(Parser, Debug)]
#[command(name = "vibe-init")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Name of the new project (prompted for when omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Template directory to copy from
    #[arg(short, long, env = "VIBE_INIT_TEMPLATE_DIR", default_value = ".")]
    pub template: Utf8PathBuf,

    /// Settings file (default: <template>/.vibe-init.yaml)
    #[arg(short, long)]
    pub settings: Option<Utf8PathBuf>,

    /// Overwrite an existing project directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress output
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "vibe-init",
            "--name",
            "my-app",
            "--template",
            "/work/template",
            "--settings",
            "/work/vibe.yaml",
            "--force",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.name.as_deref(), Some("my-app"));
        assert_eq!(cli.template, Utf8PathBuf::from("/work/template"));
        assert_eq!(cli.settings, Some(Utf8PathBuf::from("/work/vibe.yaml")));
        assert!(cli.force);
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_name_is_optional() {
        let cli = Cli::try_parse_from(["vibe-init", "-t", "tpl"]).unwrap();
        assert!(cli.name.is_none());
        assert!(!cli.force);
    }

    #[test]
    fn test_name_accepted_once() {
        let result = Cli::try_parse_from(["vibe-init", "--name", "a", "--name", "b"]);
        assert!(result.is_err());
    }
}
