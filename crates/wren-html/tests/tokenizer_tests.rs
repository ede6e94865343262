//! Integration tests for the HTML tokenizer.

use wren_html::{
    Attribute, ContentModel, HtmlError, HtmlTokenizer, InputStream, QuoteStyle, Token,
    TokenizerOptions,
};

/// Helper to tokenize a string and return the tokens
fn tokenize(input: &str) -> Vec<Token> {
    HtmlTokenizer::new(input).collect()
}

/// Helper to tokenize a string and return the tokens with the error messages
fn tokenize_with_errors(input: &str) -> (Vec<Token>, Vec<String>) {
    let mut tokenizer = HtmlTokenizer::new(input);
    let tokens = tokenizer.by_ref().collect();
    let errors = tokenizer
        .take_errors()
        .into_iter()
        .map(|error| error.message)
        .collect();
    (tokens, errors)
}

/// Helper to tokenize starting in `content_model` after the start tag `tag`
fn tokenize_raw(input: &str, content_model: ContentModel, tag: &str) -> Vec<Token> {
    let options = TokenizerOptions::new(content_model, Some(tag));
    HtmlTokenizer::with_options(InputStream::from_string(input), options).collect()
}

#[test]
fn test_plain_text_is_one_token() {
    let tokens = tokenize("Hello");
    assert_eq!(tokens, vec![Token::text("Hello")]);
}

#[test]
fn test_whitespace_only_flag() {
    let tokens = tokenize(" \t\n");
    assert!(matches!(
        &tokens[..],
        [Token::Character {
            whitespace_only: true,
            ..
        }]
    ));

    let tokens = tokenize(" x ");
    assert!(matches!(
        &tokens[..],
        [Token::Character {
            whitespace_only: false,
            ..
        }]
    ));
}

#[test]
fn test_doctype() {
    let tokens = tokenize("<!DOCTYPE html>");
    assert_eq!(tokens.len(), 1);
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert!(public_identifier.is_none());
            assert!(system_identifier.is_none());
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_with_identifiers() {
    let tokens = tokenize(
        r#"<!DOCTYPE HTML PUBLIC "-//W3C//DTD HTML 4.01//EN" 'http://www.w3.org/TR/html4/strict.dtd'>"#,
    );
    match &tokens[0] {
        Token::Doctype {
            name,
            public_identifier,
            system_identifier,
            force_quirks,
        } => {
            assert_eq!(name.as_deref(), Some("html"));
            assert_eq!(public_identifier.as_deref(), Some("-//W3C//DTD HTML 4.01//EN"));
            assert_eq!(
                system_identifier.as_deref(),
                Some("http://www.w3.org/TR/html4/strict.dtd")
            );
            assert!(!force_quirks);
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_doctype_other_name_forces_quirks() {
    let tokens = tokenize("<!DOCTYPE foo>");
    assert!(matches!(
        &tokens[0],
        Token::Doctype {
            force_quirks: true,
            ..
        }
    ));
}

#[test]
fn test_doctype_empty_system_identifier_is_not_missing() {
    let tokens = tokenize(r#"<!DOCTYPE html SYSTEM "">"#);
    match &tokens[0] {
        Token::Doctype {
            public_identifier,
            system_identifier,
            ..
        } => {
            assert!(public_identifier.is_none());
            assert_eq!(system_identifier.as_deref(), Some(""));
        }
        _ => panic!("Expected DOCTYPE token"),
    }
}

#[test]
fn test_start_tag() {
    let tokens = tokenize("<DIV>");
    assert_eq!(tokens, vec![Token::start_tag("div")]);
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</Div>");
    assert_eq!(tokens, vec![Token::end_tag("div")]);
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag {
            self_closing: true,
            ..
        }
    ));
}

#[test]
fn test_misplaced_slash_is_an_error() {
    let (tokens, errors) = tokenize_with_errors("<div / class=a>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag {
            self_closing: false,
            ..
        }
    ));
    assert_eq!(errors, vec!["Not a permitted slash"]);
}

#[test]
fn test_attributes_and_quote_styles() {
    let tokens = tokenize(r#"<a href="x" title='y' id=z hidden>"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            let expected = vec![
                Attribute {
                    name: "href".to_string(),
                    value: "x".to_string(),
                    quote: QuoteStyle::DoubleQuoted,
                },
                Attribute {
                    name: "title".to_string(),
                    value: "y".to_string(),
                    quote: QuoteStyle::SingleQuoted,
                },
                Attribute::new("id", "z"),
                Attribute::new("hidden", ""),
            ];
            assert_eq!(attributes, &expected);
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_attribute_names_are_lowercased() {
    let tokens = tokenize("<p CLASS=Big>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes[0].name, "class");
            assert_eq!(attributes[0].value, "Big");
        }
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let (tokens, errors) = tokenize_with_errors("<p id=a id=b>");
    match &tokens[0] {
        Token::StartTag { attributes, .. } => {
            assert_eq!(attributes, &vec![Attribute::new("id", "a")]);
        }
        _ => panic!("Expected StartTag token"),
    }
    assert_eq!(errors, vec!["Duplicate attribute: id"]);
}

#[test]
fn test_end_tag_with_attributes_is_an_error() {
    let (tokens, errors) = tokenize_with_errors("</p class=x>");
    assert!(matches!(&tokens[0], Token::EndTag { name, .. } if name == "p"));
    assert_eq!(errors, vec!["End tag with attributes"]);
}

#[test]
fn test_character_references_in_text() {
    let tokens = tokenize("a &amp; b &lt;&#65;&#x42;");
    assert_eq!(tokens, vec![Token::text("a & b <AB")]);
}

#[test]
fn test_character_reference_in_attribute() {
    let tokens = tokenize(r#"<a title="&quot;hi&quot;">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].value, "\"hi\""),
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_ambiguous_ampersand_in_attribute_is_literal() {
    let tokens = tokenize(r#"<a href="?a=1&copy=2">"#);
    match &tokens[0] {
        Token::StartTag { attributes, .. } => assert_eq!(attributes[0].value, "?a=1&copy=2"),
        _ => panic!("Expected StartTag token"),
    }
}

#[test]
fn test_unknown_named_reference_is_literal() {
    let (tokens, errors) = tokenize_with_errors("&bogus;");
    assert_eq!(tokens, vec![Token::text("&bogus;")]);
    assert_eq!(errors, vec!["Named entity not found: bogus"]);
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- hello -->");
    assert_eq!(tokens, vec![Token::comment(" hello ")]);
}

#[test]
fn test_unterminated_comment() {
    let (tokens, errors) = tokenize_with_errors("<!--abc");
    assert_eq!(tokens, vec![Token::comment("abc")]);
    assert_eq!(errors, vec!["Unexpected end of stream in comment"]);
}

#[test]
fn test_processing_instruction_is_bogus_comment() {
    let (tokens, errors) = tokenize_with_errors("<?xml version=\"1.0\"?>");
    assert_eq!(tokens, vec![Token::comment("?xml version=\"1.0\"?")]);
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_unescaped_less_than() {
    let (tokens, errors) = tokenize_with_errors("a < b");
    assert_eq!(tokens, vec![Token::text("a < b")]);
    assert_eq!(errors, vec!["Unescaped <"]);
}

#[test]
fn test_text_is_flushed_before_tags() {
    let tokens = tokenize("a<b>c</b>d");
    assert_eq!(
        tokens,
        vec![
            Token::text("a"),
            Token::start_tag("b"),
            Token::text("c"),
            Token::end_tag("b"),
            Token::text("d"),
        ]
    );
}

#[test]
fn test_rcdata_ends_only_at_matching_end_tag() {
    let tokens = tokenize_raw("<b>&amp;</p></title>x", ContentModel::Rcdata, "title");
    assert_eq!(
        tokens,
        vec![
            Token::text("<b>&</p>"),
            Token::end_tag("title"),
            Token::text("x"),
        ]
    );
}

#[test]
fn test_cdata_does_not_resolve_references() {
    let tokens = tokenize_raw("a &amp; <b></SCRIPT>", ContentModel::Cdata, "script");
    assert_eq!(
        tokens,
        vec![Token::text("a &amp; <b>"), Token::end_tag("script")]
    );
}

#[test]
fn test_cdata_escape_flag_hides_end_tag() {
    let tokens = tokenize_raw(
        "<!-- </style> -->x</style>",
        ContentModel::Cdata,
        "style",
    );
    assert_eq!(
        tokens,
        vec![Token::text("<!-- </style> -->x"), Token::end_tag("style")]
    );
}

#[test]
fn test_rcdata_escape_span_still_resolves_references() {
    let tokens = tokenize_raw(
        "<!-- &amp; </title> -->x</title>",
        ContentModel::Rcdata,
        "title",
    );
    assert_eq!(
        tokens,
        vec![Token::text("<!-- & </title> -->x"), Token::end_tag("title")]
    );
}

#[test]
fn test_end_tag_resets_content_model() {
    let mut tokenizer = HtmlTokenizer::with_options(
        InputStream::from_string("x</title><b>"),
        TokenizerOptions::new(ContentModel::Rcdata, Some("title")),
    );
    let tokens: Vec<Token> = tokenizer.by_ref().collect();
    assert_eq!(tokens.last(), Some(&Token::start_tag("b")));
    assert_eq!(tokenizer.content_model(), ContentModel::Pcdata);
}

#[test]
fn test_plaintext_never_ends() {
    let options = TokenizerOptions::new(ContentModel::Plaintext, None);
    let tokens: Vec<Token> =
        HtmlTokenizer::with_options(InputStream::from_string("<b>x</plaintext>"), options)
            .collect();
    assert_eq!(tokens, vec![Token::text("<b>x</plaintext>")]);
}

#[test]
fn test_content_model_is_fixed_after_start() {
    let mut tokenizer = HtmlTokenizer::new("<p>");
    assert!(tokenizer.set_content_model(ContentModel::Rcdata).is_ok());
    let _ = tokenizer.next_token();
    assert!(matches!(
        tokenizer.set_content_model(ContentModel::Pcdata),
        Err(HtmlError::InvalidOperation(_))
    ));
}

#[test]
fn test_last_start_tag_name_is_recorded() {
    let mut tokenizer = HtmlTokenizer::new("<textarea>");
    let _ = tokenizer.next_token();
    assert_eq!(tokenizer.last_start_tag_name(), Some("textarea"));
}

#[test]
fn test_end_of_stream_is_sticky() {
    let mut tokenizer = HtmlTokenizer::new("<p>");
    assert!(tokenizer.next_token().is_some());
    assert!(tokenizer.next_token().is_none());
    assert!(tokenizer.next_token().is_none());
}

#[test]
fn test_crlf_is_normalized() {
    let tokens = tokenize("a\r\nb\rc");
    assert_eq!(tokens, vec![Token::text("a\nb\nc")]);
}

#[test]
fn test_error_positions() {
    let mut tokenizer = HtmlTokenizer::new("ok\n<p id=a id=b>");
    let _: Vec<Token> = tokenizer.by_ref().collect();
    let errors = tokenizer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].line, 2);
}

#[test]
fn test_tokenizing_twice_gives_same_tokens() {
    let input = "<!DOCTYPE html><p class=x>a &amp; b<!--c--></p>";
    assert_eq!(tokenize(input), tokenize(input));
}
