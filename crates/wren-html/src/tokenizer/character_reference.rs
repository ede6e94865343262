//! Character reference resolution.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! [`resolve`] only looks ahead: it reports how many characters after the
//! `&` belong to the reference and leaves consuming them to the caller.

use super::named_character_references::{
    is_missing_semicolon_recoverable, longest_prefix_match, lookup_entity,
};

const REPLACEMENT_CHARACTER: char = '\u{FFFD}';

/// Longest alphanumeric run examined after `&`.
const MAX_NAME_SCAN: usize = 32;

/// The outcome of resolving one character reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterReference {
    /// Replacement text, or `None` when the `&` is literal text.
    pub text: Option<String>,
    /// Number of characters after the `&` that belong to the reference.
    pub consumed: usize,
    /// Parse errors, in the order they were noticed.
    pub errors: Vec<String>,
}

impl CharacterReference {
    const fn not_a_reference() -> Self {
        Self {
            text: None,
            consumed: 0,
            errors: Vec::new(),
        }
    }

    fn literal_with_error(message: String) -> Self {
        Self {
            text: None,
            consumed: 0,
            errors: vec![message],
        }
    }
}

/// Resolve the character reference that starts right after an `&`.
///
/// `peek(n)` returns the `n`th character after the `&`, or `None` at the
/// end of the stream. `additional_allowed_character` is the quote that
/// closes the attribute value being read, if any. `in_attribute` enables
/// the ambiguous ampersand rule for references without a `;`.
///
/// # Example
/// ```
/// use wren_html::tokenizer::character_reference::resolve;
///
/// let text: Vec<char> = "amp;".chars().collect();
/// let reference = resolve(|n| text.get(n).copied(), None, false);
/// assert_eq!(reference.text.as_deref(), Some("&"));
/// assert_eq!(reference.consumed, 4);
/// ```
pub fn resolve(
    mut peek: impl FnMut(usize) -> Option<char>,
    additional_allowed_character: Option<char>,
    in_attribute: bool,
) -> CharacterReference {
    match peek(0) {
        // "U+0009 CHARACTER TABULATION, U+000A LINE FEED (LF), U+000C FORM FEED (FF),
        // U+0020 SPACE, U+003C LESS-THAN SIGN, U+0026 AMPERSAND, EOF, The additional
        // allowed character, if there is one - Not a character reference. No characters
        // are consumed, and nothing is returned. (This is not an error, either.)"
        None | Some('\t' | '\n' | '\x0C' | ' ' | '<' | '&') => CharacterReference::not_a_reference(),
        Some(c) if Some(c) == additional_allowed_character => {
            CharacterReference::not_a_reference()
        }
        // "U+0023 NUMBER SIGN (#) - Consume the U+0023 NUMBER SIGN."
        Some('#') => resolve_numeric(peek),
        // "Anything else - Consume the maximum number of characters possible, with the
        // consumed characters matching one of the identifiers in the table of entities."
        Some(_) => resolve_named(peek, in_attribute),
    }
}

/// [§ 13.2.5.75 Numeric character reference state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-state)
fn resolve_numeric(mut peek: impl FnMut(usize) -> Option<char>) -> CharacterReference {
    let mut errors = Vec::new();
    let mut index = 1;

    // "U+0078 LATIN SMALL LETTER X, U+0058 LATIN CAPITAL LETTER X - Consume the X.
    // Follow the steps below, but using the range of characters U+0030 DIGIT ZERO
    // through to U+0039 DIGIT NINE, U+0061 LATIN SMALL LETTER A through to U+0066
    // LATIN SMALL LETTER F, and U+0041 LATIN CAPITAL LETTER A, through to U+0046
    // LATIN CAPITAL LETTER F (in other words, 0-9, A-F, a-f)."
    let radix = if matches!(peek(1), Some('x' | 'X')) {
        index = 2;
        16
    } else {
        10
    };

    let digits_start = index;
    let mut value: u32 = 0;
    while let Some(digit) = peek(index).and_then(|c| c.to_digit(radix)) {
        // Saturate well above U+10FFFF; the exact value no longer matters.
        value = value
            .saturating_mul(radix)
            .saturating_add(digit)
            .min(0x0011_0000);
        index += 1;
    }

    // "If no characters match the range, then don't consume any characters (and
    // unconsume the U+0023 NUMBER SIGN character and, if appropriate, the X character).
    // This is a parse error; nothing is returned."
    if index == digits_start {
        let message = if radix == 16 {
            "Unescaped &#x"
        } else {
            "Unescaped &#"
        };
        return CharacterReference::literal_with_error(message.to_string());
    }

    // "Otherwise, if the next character is a U+003B SEMICOLON, consume that too.
    // If it isn't, there is a parse error."
    if peek(index) == Some(';') {
        index += 1;
    } else {
        errors.push("Entity does not end with a semi-colon".to_string());
    }

    let c = match value {
        0 => {
            errors.push("Incorrect NUL entity. Replaced with U+FFFD".to_string());
            REPLACEMENT_CHARACTER
        }
        0x0D => {
            errors.push("Incorrect CR newline entity. Replaced with LF.".to_string());
            '\n'
        }
        0x80..=0x9F => {
            errors.push(format!(
                "Entity used with illegal number (windows-1252 reference): {value}"
            ));
            windows_1252_replacement(value)
                .or_else(|| char::from_u32(value))
                .unwrap_or(REPLACEMENT_CHARACTER)
        }
        // Surrogates and anything past U+10FFFF.
        value => char::from_u32(value).unwrap_or_else(|| {
            errors.push(format!("Entity used with illegal number: {value}"));
            REPLACEMENT_CHARACTER
        }),
    };

    CharacterReference {
        text: Some(c.to_string()),
        consumed: index,
        errors,
    }
}

/// [§ 13.2.5.73 Named character reference state](https://html.spec.whatwg.org/multipage/parsing.html#named-character-reference-state)
fn resolve_named(
    mut peek: impl FnMut(usize) -> Option<char>,
    in_attribute: bool,
) -> CharacterReference {
    let mut name = String::new();
    while name.len() < MAX_NAME_SCAN {
        match peek(name.len()) {
            Some(c) if c.is_ascii_alphanumeric() => name.push(c),
            _ => break,
        }
    }
    let terminated = peek(name.len()) == Some(';');

    if name.is_empty() {
        if terminated {
            return CharacterReference::literal_with_error("Empty entity name &;".to_string());
        }
        return CharacterReference::not_a_reference();
    }

    if terminated {
        // A name followed by ';' has to be an exact match.
        return match lookup_entity(&name) {
            Some(c) => CharacterReference {
                text: Some(c.to_string()),
                consumed: name.len() + 1,
                errors: Vec::new(),
            },
            None => CharacterReference::literal_with_error(format!(
                "Named entity not found: {name}"
            )),
        };
    }

    let Some((length, c)) = longest_prefix_match(&name, is_missing_semicolon_recoverable) else {
        return CharacterReference::literal_with_error(format!("Named entity not found: {name}"));
    };

    // "If the character reference is being consumed as part of an attribute, and the
    // last character matched is not a U+003B SEMICOLON character (;), and the next
    // character is either a U+003D EQUALS SIGN character (=) or in the range ASCII
    // digits, ASCII upper hex digits, ASCII lower hex digits, then, for historical
    // reasons, all the characters that were matched after the U+0026 AMPERSAND (&)
    // must be unconsumed, and nothing is returned."
    if in_attribute {
        let next = name.chars().nth(length).or_else(|| peek(length));
        if matches!(next, Some(c) if c.is_ascii_alphanumeric() || c == '=') {
            return CharacterReference::not_a_reference();
        }
    }

    CharacterReference {
        text: Some(c.to_string()),
        consumed: length,
        errors: vec!["Entity does not end with a semi-colon".to_string()],
    }
}

/// [§ 13.2.5.80 Numeric character reference end state](https://html.spec.whatwg.org/multipage/parsing.html#numeric-character-reference-end-state)
///
/// The Windows-1252 reinterpretation of C1 control code points. Returns
/// `None` for the five bytes Windows-1252 leaves undefined.
#[must_use]
pub const fn windows_1252_replacement(code_point: u32) -> Option<char> {
    let c = match code_point {
        0x80 => '\u{20AC}',
        0x82 => '\u{201A}',
        0x83 => '\u{0192}',
        0x84 => '\u{201E}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02C6}',
        0x89 => '\u{2030}',
        0x8A => '\u{0160}',
        0x8B => '\u{2039}',
        0x8C => '\u{0152}',
        0x8E => '\u{017D}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201C}',
        0x94 => '\u{201D}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02DC}',
        0x99 => '\u{2122}',
        0x9A => '\u{0161}',
        0x9B => '\u{203A}',
        0x9C => '\u{0153}',
        0x9E => '\u{017E}',
        0x9F => '\u{0178}',
        _ => return None,
    };
    Some(c)
}
