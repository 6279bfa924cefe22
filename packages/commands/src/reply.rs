// ABOUTME: User-facing replies for command results and failures
// ABOUTME: Every message goes through the translator with named parameters

use tagkeep_core::{Tag, TagAlias, Translator, ValidationError};

use crate::command::Command;
use crate::error::CommandError;

pub const UNEXPECTED_ERROR: &str = "❌ An unexpected error happened. Please try again later.";

pub fn tag_created(translator: &dyn Translator, tag: &Tag) -> String {
    translator.translate(
        "👌 Tag created: {name} (`{id}`)",
        &[("name", tag.name.clone()), ("id", tag.id.clone())],
    )
}

pub fn alias_created(translator: &dyn Translator, alias: &TagAlias, tag: &Tag) -> String {
    translator.translate(
        "👌 Alias created: {alias} -> {tag} (`{id}`)",
        &[
            ("alias", alias.name.clone()),
            ("tag", tag.name.clone()),
            ("id", alias.id.clone()),
        ],
    )
}

pub fn tag_edited(translator: &dyn Translator, tag: &Tag) -> String {
    translator.translate("👌 Tag {name} edited.", &[("name", tag.name.clone())])
}

pub fn tag_deleted(translator: &dyn Translator, tag: &Tag) -> String {
    translator.translate("👌 Tag {name} deleted.", &[("name", tag.name.clone())])
}

pub fn alias_deleted(translator: &dyn Translator, alias: &TagAlias) -> String {
    translator.translate("👌 Alias {name} deleted.", &[("name", alias.name.clone())])
}

/// The reply for a failed command, or `None` when the command stays silent
pub fn error_reply(
    translator: &dyn Translator,
    command: &Command,
    error: &CommandError,
) -> Option<String> {
    let reply = match error {
        CommandError::FeatureDisabled => return None,
        CommandError::InvalidName(e) => invalid_name(translator, e),
        CommandError::AlreadyExists(_) => translator.translate("❌ This tag already exists.", &[]),
        CommandError::NotFound(_) => translator.translate(not_found_message(command), &[]),
        CommandError::AccessDenied(requirement) => translator.translate(
            "❌ You need {requirement} to run this command.",
            &[("requirement", requirement.to_string())],
        ),
        CommandError::Permission(_) | CommandError::Storage(_) | CommandError::Display(_) => {
            translator.translate(UNEXPECTED_ERROR, &[])
        }
    };

    Some(reply)
}

fn not_found_message(command: &Command) -> &'static str {
    match command {
        Command::Show { .. } => "❌ There is no tag with that name.",
        Command::Edit { .. } | Command::Raw { .. } => {
            "❌ This tag doesn't exist yet. You might want to create it."
        }
        Command::Unalias { .. } => "❌ This alias doesn't exist.",
        Command::Create { .. } | Command::Alias { .. } | Command::Delete { .. } | Command::List => {
            "❌ This tag doesn't exist."
        }
    }
}

fn invalid_name(translator: &dyn Translator, error: &ValidationError) -> String {
    match error {
        ValidationError::EmptyName => translator.translate("❌ Missing tag name.", &[]),
        ValidationError::ForbiddenCharacter(c) => {
            let message = match c {
                ' ' => "❌ Tags names can't contain spaces.",
                '/' => "❌ Tags names can't contain slashes (`/`).",
                '#' => "❌ Tags names can't contain hashes (`#`).",
                '?' => "❌ Tags names can't contain question marks (`?`).",
                '&' => "❌ Tags names can't contain and signs (`&`).",
                _ => "❌ Tags names can't contain `{character}`.",
            };
            translator.translate(message, &[("character", c.to_string())])
        }
        ValidationError::TooLong { max, .. } => translator.translate(
            "❌ Tag name is a maximum of {max} characters.",
            &[("max", max.to_string())],
        ),
    }
}
