//! POSIX shell quoting.

/// Quote a string so a POSIX shell passes it through as a single word.
///
/// Strings made only of characters the shell never interprets are returned
/// unchanged; everything else is wrapped in single quotes with embedded
/// single quotes spliced as `'"'"'`.
pub fn quote(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:=@+,".contains(c))
    {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', "'\"'\"'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_words_are_unchanged() {
        assert_eq!(quote("4.5.0"), "4.5.0");
        assert_eq!(quote("R/4.5.0"), "R/4.5.0");
        assert_eq!(quote("/adminfs/builds/x_1.0.tar.gz"), "/adminfs/builds/x_1.0.tar.gz");
    }

    #[test]
    fn empty_string_is_quoted() {
        assert_eq!(quote(""), "''");
    }

    #[test]
    fn r_expression_is_single_quoted() {
        assert_eq!(
            quote(r#"install.packages("ggplot2")"#),
            r#"'install.packages("ggplot2")'"#
        );
    }

    #[test]
    fn embedded_single_quote_is_spliced() {
        assert_eq!(quote("it's"), r#"'it'"'"'s'"#);
    }

    #[test]
    fn quoted_value_survives_the_shell() {
        let value = r#"print('a b'); "$HOME""#;
        let options = crate::shell::CommandOptions::default();
        let result = crate::shell::execute(&format!("printf %s {}", quote(value)), &options).unwrap();
        assert!(result.success);
        assert_eq!(result.stdout, value);
    }
}
