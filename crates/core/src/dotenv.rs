//! dotenv rendering for an owner's variables.

use crate::env_var::EnvironmentVariable;

/// Renders variables as `KEY=value` lines sorted by key.
///
/// Values that would not survive a dotenv parser unquoted are wrapped in
/// double quotes with `\`, `"`, `$` and newlines escaped, so the output
/// parses back unchanged with `dotenvy`.
#[must_use]
pub fn render_dotenv(vars: &[EnvironmentVariable]) -> String {
    let mut sorted: Vec<&EnvironmentVariable> = vars.iter().collect();
    sorted.sort_by(|a, b| a.key.cmp(&b.key));

    let mut out = String::new();
    for var in sorted {
        out.push_str(&var.key);
        out.push('=');
        out.push_str(&quote_value(&var.value));
        out.push('\n');
    }
    out
}

fn needs_quoting(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || matches!(c, '#' | '"' | '\'' | '=' | '\\' | '$'))
}

fn quote_value(value: &str) -> String {
    if !needs_quoting(value) {
        return value.to_owned();
    }
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn var(key: &str, value: &str) -> EnvironmentVariable {
        EnvironmentVariable::new(Uuid::nil(), key, value)
    }

    #[test]
    fn renders_sorted_plain_values() {
        let out = render_dotenv(&[var("PORT", "8080"), var("DEBUG", "true")]);
        assert_eq!(out, "DEBUG=true\nPORT=8080\n");
    }

    #[test]
    fn quotes_values_with_special_characters() {
        let out = render_dotenv(&[
            var("GREETING", "hello world"),
            var("MULTI", "a\nb"),
            var("QUOTE", r#"say "hi""#),
        ]);
        assert_eq!(
            out,
            "GREETING=\"hello world\"\nMULTI=\"a\\nb\"\nQUOTE=\"say \\\"hi\\\"\"\n"
        );
    }

    #[test]
    fn dollar_signs_are_escaped() {
        let out = render_dotenv(&[var("PASSWORD", "pa$HOME")]);
        assert_eq!(out, "PASSWORD=\"pa\\$HOME\"\n");
    }

    #[test]
    fn rendered_output_parses_back_with_dotenvy() {
        let vars = [
            var("PASSWORD", "pa$HOME"),
            var("BRACED", "${NOT_EXPANDED}"),
            var("MULTI", "line one\nline two"),
            var("TAB", "a\tb"),
            var("QUOTES", r#"it's "quoted""#),
            var("BACKSLASH", r"C:\temp\dir"),
            var("HASH", "#not-a-comment"),
            var("EQUALS", "a=b"),
            var("EMPTY", ""),
            var("PLAIN", "8080"),
        ];
        let rendered = render_dotenv(&vars);

        let mut parsed: Vec<(String, String)> = dotenvy::from_read_iter(rendered.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap();
        parsed.sort();
        let mut expected: Vec<(String, String)> =
            vars.iter().map(|v| (v.key.clone(), v.value.clone())).collect();
        expected.sort();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn empty_input_renders_empty_string() {
        assert_eq!(render_dotenv(&[]), "");
    }
}
