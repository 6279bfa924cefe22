use std::process;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::*;
use tagkeep_cli::config::Config;
use tagkeep_cli::display::{spawn_stdin_controls, TerminalDisplay};
use tagkeep_cli::{build_commands, init_logging, run_command};
use tagkeep_commands::{Command, CommandOutcome};
use tokio::sync::mpsc;
use tracing::info;

mod cli;

use cli::tags::TagsCommands;

#[derive(Parser)]
#[command(name = "tagkeep")]
#[command(about = "Tagkeep CLI - named snippets with aliases and usage counts")]
#[command(version)]
struct Cli {
    /// Actor mentioned in the request, who may also page through the output
    #[arg(long = "mention", global = true)]
    mentions: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a tag by name or alias
    #[command(visible_alias = "t")]
    Tag {
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
    /// Create, edit, delete and list tags
    #[command(subcommand)]
    Tags(TagsCommands),
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli).await {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let command = match cli.command {
        Commands::Tag { name } => Command::Show {
            name: name.join(" "),
        },
        Commands::Tags(tags) => tags.into_command(),
    };

    let commands = build_commands(&config, Arc::new(TerminalDisplay::stdout())).await?;

    let inputs = match &command {
        Command::Show { .. } | Command::List => spawn_stdin_controls(config.actor.clone()),
        // Nothing to navigate: an already closed channel
        _ => mpsc::channel(1).1,
    };

    match run_command(&commands, &config, command, cli.mentions, inputs).await {
        CommandOutcome::Reply(text) => println!("{}", text),
        CommandOutcome::Displayed(summary) => {
            info!("Stopped on page {}", summary.final_page + 1);
        }
        CommandOutcome::Silent => {
            info!("Tags are not enabled in scope {:?}", config.scope);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tagkeep").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_t_is_short_for_tag() {
        let cli = parse(&["t", "house", "rules"]);
        assert!(matches!(cli.command, Commands::Tag { name } if name == ["house", "rules"]));
    }

    #[test]
    fn test_tags_create_joins_the_content() {
        let cli = parse(&["--mention", "friend", "tags", "create", "faq", "Read", "me"]);
        assert_eq!(cli.mentions, vec!["friend".to_string()]);

        let Commands::Tags(tags) = cli.command else {
            panic!("expected a tags subcommand");
        };

        let expected = Command::Create {
            name: "faq".to_string(),
            content: "Read me".to_string(),
        };
        assert_eq!(tags.into_command(), expected);
    }
}
