//! Label formatting for node and edge text.
//!
//! Record labels go through two steps: word wrapping (per `|` field when
//! fields are allowed) and escaping for the DOT record syntax. Escaping is a
//! one-shot operation; applying it twice double-escapes.

/// Text before the first `|`, trimmed. Nodes are identified by it.
pub fn record_name(label: &str) -> &str {
    label.split('|').next().unwrap_or_default().trim()
}

/// Breaks `text` into lines of roughly `width` characters.
///
/// When the text is at least `width` characters long, it is broken at the
/// last space at or before position `width`, or failing that at the first
/// space after it, and the remainder is wrapped again. Text without any
/// space is left as it is.
pub fn word_wrap(text: &str, width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < width {
        return text.to_string();
    }

    let is_space = |index: &usize| chars.get(*index) == Some(&' ');
    let split = (1..=width)
        .rev()
        .find(is_space)
        .or_else(|| (width + 1..chars.len()).find(is_space));

    match split {
        Some(index) => {
            let left: String = chars[..index].iter().collect();
            let right: String = chars[index + 1..].iter().collect();
            format!("{left}\n{}", word_wrap(&right, width))
        }
        None => text.to_string(),
    }
}

/// Wraps a label, field by field when `allow_fields` is set.
pub fn wrap_label(label: &str, width: usize, allow_fields: bool) -> String {
    if allow_fields && label.contains('|') {
        label
            .split('|')
            .map(|field| word_wrap(field, width))
            .collect::<Vec<_>>()
            .join("|")
    } else {
        word_wrap(label, width)
    }
}

/// Escapes text for use inside a DOT record label.
///
/// ```
/// # use yuml_parser::label::escape_label;
/// assert_eq!(escape_label("A;B"), "A\\nB");
/// assert_eq!(escape_label("Map<K, V>"), "Map\\<K,\\ V\\>");
/// ```
pub fn escape_label(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '{' => escaped.push_str("\\{"),
            '}' => escaped.push_str("\\}"),
            ';' | '\n' => escaped.push_str("\\n"),
            ' ' => escaped.push_str("\\ "),
            '<' => escaped.push_str("\\<"),
            '>' => escaped.push_str("\\>"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub fn format_label(label: &str, width: usize, allow_fields: bool) -> String {
    escape_label(&wrap_label(label, width, allow_fields))
}

/// Wrapped text without DOT escaping, for labels drawn directly as SVG
/// text. Fields and `;` both become line breaks.
pub fn plain_label(label: &str, width: usize) -> String {
    wrap_label(label, width, true).replace(['|', ';'], "\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_name() {
        assert_eq!(record_name(" Customer |name;email|save()"), "Customer");
        assert_eq!(record_name("Order"), "Order");
        assert_eq!(record_name(""), "");
    }

    #[test]
    fn test_word_wrap_short_text_untouched() {
        assert_eq!(word_wrap("Customer", 20), "Customer");
    }

    #[test]
    fn test_word_wrap_breaks_at_last_space_before_width() {
        assert_eq!(
            word_wrap("The quick brown fox jumps over", 20),
            "The quick brown fox\njumps over"
        );
    }

    #[test]
    fn test_word_wrap_recurses() {
        assert_eq!(word_wrap("aaa bbb ccc ddd", 5), "aaa\nbbb\nccc\nddd");
    }

    #[test]
    fn test_word_wrap_without_space_is_unbroken() {
        assert_eq!(
            word_wrap("Supercalifragilisticexpialidocious", 20),
            "Supercalifragilisticexpialidocious"
        );
    }

    #[test]
    fn test_word_wrap_long_leading_word_breaks_after_it() {
        assert_eq!(
            word_wrap("AbstractSingletonProxyFactoryBean impl", 20),
            "AbstractSingletonProxyFactoryBean\nimpl"
        );
        assert_eq!(
            word_wrap("AbstractSingletonProxyFactoryBean impl for Spring", 20),
            "AbstractSingletonProxyFactoryBean\nimpl for Spring"
        );
    }

    #[test]
    fn test_wrap_label_per_field() {
        assert_eq!(
            wrap_label("Customer|first name;last name", 8, true),
            "Customer|first\nname;last\nname"
        );
        assert_eq!(wrap_label("a b|c", 3, false), "a\nb|c");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("{x}"), "\\{x\\}");
        assert_eq!(escape_label("a b"), "a\\ b");
        assert_eq!(escape_label("a\nb"), "a\\nb");
        assert_eq!(escape_label("a|b"), "a|b");
    }

    #[test]
    fn test_escape_label_is_not_idempotent() {
        let once = escape_label("A B");
        assert_ne!(escape_label(&once), once);
    }

    #[test]
    fn test_format_label() {
        assert_eq!(
            format_label("Customer|Forename;Surname|Save()", 20, true),
            "Customer|Forename\\nSurname|Save()"
        );
    }

    #[test]
    fn test_plain_label() {
        assert_eq!(plain_label("line one;line two", 40), "line one\nline two");
        assert_eq!(plain_label("Patron|hungry", 40), "Patron\nhungry");
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn check_wrap_only_replaces_spaces(text: &str, width: usize) -> Result<(), TestCaseError> {
        let wrapped = word_wrap(text, width);
        prop_assert_eq!(wrapped.replace('\n', " "), text);
        Ok(())
    }

    fn check_long_leading_word_stands_alone(
        word: &str,
        rest: &str,
        width: usize,
    ) -> Result<(), TestCaseError> {
        let text = format!("{word} {rest}");
        let wrapped = word_wrap(&text, width);
        let mut lines = wrapped.lines();
        prop_assert_eq!(lines.next(), Some(word));
        prop_assert!(wrapped.contains('\n'), "no break in {:?}", wrapped);
        Ok(())
    }

    fn check_escaped_has_no_bare_specials(text: &str) -> Result<(), TestCaseError> {
        let escaped = escape_label(text);
        let mut previous = None;
        for c in escaped.chars() {
            if matches!(c, ' ' | '{' | '}' | '<' | '>') {
                prop_assert_eq!(previous, Some('\\'), "bare `{}` in {:?}", c, escaped);
            }
            prop_assert!(c != ';' && c != '\n');
            previous = Some(c);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn wrap_only_replaces_spaces(text in "[a-z ]{0,60}", width in 1usize..30) {
            check_wrap_only_replaces_spaces(&text, width)?;
        }

        #[test]
        fn long_leading_word_stands_alone(
            word in "[a-z]{21,40}",
            rest in "[a-z]{1,10}( [a-z]{1,10}){0,3}",
            width in 1usize..=20,
        ) {
            check_long_leading_word_stands_alone(&word, &rest, width)?;
        }

        #[test]
        fn escaped_has_no_bare_specials(text in "[a-z ;{}<>]{0,30}") {
            check_escaped_has_no_bare_specials(&text)?;
        }
    }
}
