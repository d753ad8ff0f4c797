//! Template segmentation.
//!
//! A placeholder is `[`, one or more of `A-Z` or `_`, then `]`. Everything else, including
//! bracketed text that does not fit that shape, is literal. Tokens borrow from the template
//! and concatenate back to it exactly.

/// A piece of a certificate template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token<'a> {
    Literal(&'a str),
    /// Placeholder text including its brackets, e.g. `[APPLICANT_NAME]`.
    Placeholder(&'a str),
}

impl<'a> Token<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Token::Literal(text) | Token::Placeholder(text) => text,
        }
    }
}

/// Split a template into literal and placeholder tokens, in order.
pub fn segment(template: &str) -> Vec<Token<'_>> {
    let bytes = template.as_bytes();
    let mut tokens = Vec::new();
    let mut literal_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'[' {
            if let Some(len) = placeholder_len(&bytes[i..]) {
                if literal_start < i {
                    tokens.push(Token::Literal(&template[literal_start..i]));
                }
                tokens.push(Token::Placeholder(&template[i..i + len]));
                i += len;
                literal_start = i;
                continue;
            }
        }
        i += 1;
    }

    if literal_start < bytes.len() {
        tokens.push(Token::Literal(&template[literal_start..]));
    }

    tokens
}

/// Length of the placeholder at the start of `rest` (which begins with `[`), brackets included.
fn placeholder_len(rest: &[u8]) -> Option<usize> {
    let name_len = rest[1..]
        .iter()
        .take_while(|b| b.is_ascii_uppercase() || **b == b'_')
        .count();

    (name_len > 0 && rest.get(name_len + 1) == Some(&b']')).then_some(name_len + 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejoin(tokens: &[Token<'_>]) -> String {
        tokens.iter().map(Token::text).collect()
    }

    #[test]
    fn splits_literals_and_placeholders_in_order() {
        let tokens = segment("I, [APPLICANT_NAME], of [ADDRESS].");
        assert_eq!(
            tokens,
            vec![
                Token::Literal("I, "),
                Token::Placeholder("[APPLICANT_NAME]"),
                Token::Literal(", of "),
                Token::Placeholder("[ADDRESS]"),
                Token::Literal("."),
            ]
        );
    }

    #[test]
    fn empty_template_has_no_tokens() {
        assert!(segment("").is_empty());
    }

    #[test]
    fn adjacent_placeholders_have_no_empty_literals() {
        assert_eq!(
            segment("[MONTH][YEAR]"),
            vec![Token::Placeholder("[MONTH]"), Token::Placeholder("[YEAR]")]
        );
    }

    #[test]
    fn non_matching_brackets_are_literal() {
        for template in ["[lower]", "[LOT_2]", "[]", "[ NAME ]", "[NAME", "NAME]", "[Mixed]"] {
            assert_eq!(segment(template), vec![Token::Literal(template)], "{template}");
        }
    }

    #[test]
    fn nested_open_bracket_matches_innermost() {
        assert_eq!(
            segment("[[AGE]]"),
            vec![
                Token::Literal("["),
                Token::Placeholder("[AGE]"),
                Token::Literal("]"),
            ]
        );
    }

    #[test]
    fn round_trips_templates() {
        let templates = [
            "",
            "plain text only",
            "[DATE]",
            "Ñiño [NAME] — señor [X_Y] [bad] [[A]] end",
            "This is to certify that [APPLICANT_NAME], [AGE] years old, [CIVIL_STATUS], is a bona fide resident of [ADDRESS].\n\nIssued this [DATE] day of [MONTH], [YEAR].",
            "[",
            "]",
            "[A",
        ];
        for template in templates {
            assert_eq!(rejoin(&segment(template)), template);
        }
    }
}
