// ABOUTME: Token helpers for the single-brace `{name}` placeholder syntax
// ABOUTME: Finds, counts and replaces named tokens inside message bodies

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Literal marker scripts use where the client's name goes.
pub const CLIENT_NAME_SENTINEL: &str = "(Nome do cliente)";

/// Token names resolved by the renderer itself rather than by field values.
pub const CLIENT_NAME_TOKENS: [&str; 2] = ["nome_cliente", "cliente"];
pub const CARRIER_TOKEN: &str = "transportadora";
pub const COLLABORATOR_TOKEN: &str = "colaborador";
pub const PORTAL_TOKEN: &str = "portal";

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_][a-z0-9_]*)\}").expect("token pattern is valid"));

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"{}|\{{([a-z_][a-z0-9_]*)\}}",
        regex::escape(CLIENT_NAME_SENTINEL)
    );
    Regex::new(&pattern).expect("placeholder pattern is valid")
});

/// Braced form of a placeholder name.
pub fn token(name: &str) -> String {
    format!("{{{}}}", name)
}

/// Unique placeholder names in order of first appearance.
pub fn tokens(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in TOKEN_RE.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

pub fn count(text: &str, name: &str) -> usize {
    text.matches(&token(name)).count()
}

/// Replace every occurrence of `{name}` with `value`.
pub fn replace(text: &str, name: &str, value: &str) -> String {
    text.replace(&token(name), value)
}

/// Resolve every placeholder of `text` in a single left-to-right pass.
///
/// The client-name sentinel is looked up as `nome_cliente`. Placeholders the
/// resolver returns `None` for keep their original text, and substituted
/// values are never scanned again.
pub fn substitute<'v, F>(text: &str, resolve: F) -> String
where
    F: Fn(&str) -> Option<&'v str>,
{
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            let name = caps.get(1).map_or(CLIENT_NAME_TOKENS[0], |m| m.as_str());
            match resolve(name) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Whether a token name belongs to the renderer's own substitution steps.
pub fn is_builtin(name: &str) -> bool {
    CLIENT_NAME_TOKENS.contains(&name)
        || name == CARRIER_TOKEN
        || name == COLLABORATOR_TOKEN
        || name == PORTAL_TOKEN
}
