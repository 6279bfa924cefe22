// ABOUTME: Localization seam for user-facing text
// ABOUTME: Messages are keyed by their English template with `{name}` placeholders

/// Maps a message template and its named parameters to display text.
///
/// The template doubles as the lookup key, so an implementation that knows no
/// translation for it can fall back to interpolating the template itself.
pub trait Translator: Send + Sync {
    fn translate(&self, message: &str, params: &[(&str, String)]) -> String;
}

/// Translator that renders the English templates as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTranslator;

impl Translator for DefaultTranslator {
    fn translate(&self, message: &str, params: &[(&str, String)]) -> String {
        interpolate(message, params)
    }
}

/// Replace every `{name}` in `template` with the matching parameter.
///
/// Unknown placeholders are left untouched.
pub fn interpolate(template: &str, params: &[(&str, String)]) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        match after_open.find('}') {
            Some(close) => {
                let key = &after_open[..close];
                match params.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => output.push_str(value),
                    None => {
                        output.push('{');
                        output.push_str(key);
                        output.push('}');
                    }
                }
                rest = &after_open[close + 1..];
            }
            None => {
                output.push_str(&rest[open..]);
                rest = "";
            }
        }
    }

    output.push_str(rest);
    output
}
