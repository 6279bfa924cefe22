use clap::Subcommand;
use tagkeep_commands::Command;

#[derive(Subcommand)]
pub enum TagsCommands {
    /// Create a new tag. The name must not be an existing tag or alias
    Create {
        /// Tag name
        name: String,
        /// Tag content
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        content: Vec<String>,
    },
    /// Give an existing tag another name
    Alias {
        /// New alias name
        alias: String,
        /// Tag (or alias) to point at
        target: String,
    },
    /// Replace the content of an existing tag
    Edit {
        /// Tag or alias name
        name: String,
        /// New content
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        content: Vec<String>,
    },
    /// Delete a tag along with its aliases
    Delete {
        /// Tag or alias name
        name: String,
    },
    /// Delete an alias, keeping its tag
    Unalias {
        /// Alias name
        alias: String,
    },
    /// List every tag, most used first
    List,
    /// Show a tag's content with markup escaped
    Raw {
        /// Tag or alias name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },
}

impl TagsCommands {
    pub fn into_command(self) -> Command {
        match self {
            TagsCommands::Create { name, content } => Command::Create {
                name,
                content: content.join(" "),
            },
            TagsCommands::Alias { alias, target } => Command::Alias { alias, target },
            TagsCommands::Edit { name, content } => Command::Edit {
                name,
                content: content.join(" "),
            },
            TagsCommands::Delete { name } => Command::Delete { name },
            TagsCommands::Unalias { alias } => Command::Unalias { alias },
            TagsCommands::List => Command::List,
            TagsCommands::Raw { name } => Command::Raw {
                name: name.join(" "),
            },
        }
    }
}
