//! Integration tests for tree construction.
//!
//! Event streams are compared as outlines: every event is written back as
//! markup, so `<p>a</p>` means an element event, a text event and an end
//! element event.

use wren_html::parser::compatibility_mode_for_doctype;
use wren_html::{
    CompatibilityMode, Event, HtmlReader, InputStream, InsertionMode, NodeKind, ParseError,
    ParserOptions, TreeConstructor,
};

/// Helper to parse HTML and return the events and the parse errors
fn parse_with_options(html: &str, options: ParserOptions) -> (Vec<Event>, Vec<ParseError>) {
    let mut reader = HtmlReader::new(html).with_options(options);
    let events = reader
        .by_ref()
        .collect::<wren_html::Result<Vec<Event>>>()
        .expect("parsing failed");
    (events, reader.parse_errors().to_vec())
}

fn parse(html: &str) -> (Vec<Event>, Vec<ParseError>) {
    parse_with_options(html, ParserOptions::default())
}

/// Helper to write events back as markup
fn outline(events: &[Event]) -> String {
    let mut out = String::new();
    for event in events {
        match event.kind {
            NodeKind::Element if event.is_empty_element => {
                out.push_str(&format!("<{}/>", event.name));
            }
            NodeKind::Element => out.push_str(&format!("<{}>", event.name)),
            NodeKind::EndElement => out.push_str(&format!("</{}>", event.name)),
            NodeKind::Text | NodeKind::Whitespace => out.push_str(&event.value),
            NodeKind::Comment => out.push_str(&format!("<!--{}-->", event.value)),
            NodeKind::DocumentType => out.push_str(&format!("<!DOCTYPE {}>", event.name)),
        }
    }
    out
}

/// Outline of a standards mode document with an empty head
fn in_body(body: &str) -> String {
    format!("<!DOCTYPE html><html><head></head><body>{body}</body></html>")
}

/// Helper to assert the outline and the number of parse errors
fn assert_parses_to(html: &str, expected: &str, error_count: usize) {
    let (events, errors) = parse(html);
    assert_eq!(outline(&events), expected, "outline of {html:?}");
    assert_eq!(errors.len(), error_count, "errors for {html:?}: {errors:?}");
}

/// Every element is closed by a matching end at the same depth, and every
/// event's depth is the number of elements open around it.
fn assert_balanced(events: &[Event]) {
    let mut open: Vec<&str> = Vec::new();
    for event in events {
        match event.kind {
            NodeKind::Element => {
                assert_eq!(event.depth, open.len(), "depth of <{}>", event.name);
                if !event.is_empty_element {
                    open.push(&event.name);
                }
            }
            NodeKind::EndElement => {
                assert_eq!(open.pop(), Some(event.name.as_str()));
                assert_eq!(event.depth, open.len(), "depth of </{}>", event.name);
            }
            _ => assert_eq!(event.depth, open.len()),
        }
    }
    assert!(open.is_empty(), "unclosed elements: {open:?}");
}

// =============================================================================
// Document structure
// =============================================================================

#[test]
fn test_document_structure() {
    assert_parses_to(
        "<!DOCTYPE html><html><head></head><body></body></html>",
        &in_body(""),
        0,
    );
}

#[test]
fn test_implied_html_head_and_body() {
    let (events, errors) = parse("<p>Hello");
    assert_eq!(
        outline(&events),
        "<html><head></head><body><p>Hello</p></body></html>"
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected start tag (p). Expected DOCTYPE.");
}

#[test]
fn test_empty_document() {
    let (events, errors) = parse("");
    assert_eq!(outline(&events), "<html><head></head><body></body></html>");
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_head_contents() {
    assert_parses_to(
        "<!DOCTYPE html><title>a &amp; <b></title><meta charset=utf-8><p>x",
        "<!DOCTYPE html><html><head><title>a & <b></title><meta/></head><body><p>x</p></body></html>",
        0,
    );
}

#[test]
fn test_head_element_after_head_is_rerouted() {
    assert_parses_to(
        "<!DOCTYPE html><head></head><link rel=x><body>",
        "<!DOCTYPE html><html><head><link/></head><body></body></html>",
        1,
    );
}

#[test]
fn test_comment_before_root() {
    assert_parses_to(
        "<!DOCTYPE html><!--a--><html>",
        "<!DOCTYPE html><!--a--><html><head></head><body></body></html>",
        0,
    );
}

#[test]
fn test_unclosed_element_at_end_of_stream() {
    let (events, errors) = parse("<!DOCTYPE html><div>x");
    assert_eq!(outline(&events), in_body("<div>x</div>"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected end of stream. Missing closing tags.");
}

#[test]
fn test_end_body_then_text() {
    assert_parses_to("<!DOCTYPE html><p>a</body>b", &in_body("<p>ab</p>"), 1);
}

#[test]
fn test_comment_after_html_end() {
    assert_parses_to(
        "<!DOCTYPE html><p>a</p></html><!--c-->",
        &in_body("<p>a</p><!--c-->"),
        0,
    );
}

#[test]
fn test_frameset_document() {
    assert_parses_to(
        "<!DOCTYPE html><frameset><frame></frameset>",
        "<!DOCTYPE html><html><head></head><frameset><frame/></frameset></html>",
        0,
    );
}

#[test]
fn test_text_after_frameset_is_ignored() {
    assert_parses_to(
        "<!DOCTYPE html><frameset></frameset>x",
        "<!DOCTYPE html><html><head></head><frameset></frameset></html>",
        1,
    );
}

// =============================================================================
// In body
// =============================================================================

#[test]
fn test_paragraph_closed_by_block() {
    assert_parses_to(
        "<!DOCTYPE html><p>a<div>b</div>",
        &in_body("<p>a</p><div>b</div>"),
        0,
    );
}

#[test]
fn test_stray_end_p_inserts_paragraph() {
    assert_parses_to("<!DOCTYPE html><body></p>", &in_body("<p></p>"), 1);
}

#[test]
fn test_end_br_is_treated_as_br() {
    assert_parses_to("<!DOCTYPE html></br>", &in_body("<br/>"), 1);
}

#[test]
fn test_image_is_img() {
    let (events, errors) = parse("<!DOCTYPE html><image src=a.png>");
    assert_eq!(outline(&events), in_body("<img/>"));
    assert_eq!(errors.len(), 1);
    let img = events.iter().find(|event| event.name == "img").expect("img event");
    assert_eq!(img.attribute_by_name("src"), Some("a.png"));
}

#[test]
fn test_list_items_close_each_other() {
    assert_parses_to(
        "<!DOCTYPE html><ul><li>a<li>b</ul>",
        &in_body("<ul><li>a</li><li>b</li></ul>"),
        0,
    );
}

#[test]
fn test_definition_items_close_each_other() {
    assert_parses_to(
        "<!DOCTYPE html><dl><dt>a<dd>b<dt>c</dl>",
        &in_body("<dl><dt>a</dt><dd>b</dd><dt>c</dt></dl>"),
        0,
    );
}

#[test]
fn test_headings_do_not_nest() {
    assert_parses_to(
        "<!DOCTYPE html><h1>a<h2>b",
        &in_body("<h1>a</h1><h2>b</h2>"),
        2,
    );
}

#[test]
fn test_heading_end_tag_closes_any_heading() {
    assert_parses_to(
        "<!DOCTYPE html><h1>a</h2>b",
        &in_body("<h1>a</h1>b"),
        1,
    );
}

#[test]
fn test_pre_drops_leading_newline() {
    assert_parses_to(
        "<!DOCTYPE html><pre>\nx\n</pre>",
        &in_body("<pre>x\n</pre>"),
        0,
    );
}

#[test]
fn test_textarea_is_rcdata() {
    assert_parses_to(
        "<!DOCTYPE html><textarea>\n&amp;<b></textarea>",
        &in_body("<textarea>&<b></textarea>"),
        0,
    );
}

#[test]
fn test_plaintext_runs_to_end() {
    assert_parses_to(
        "<!DOCTYPE html><plaintext><b>x</plaintext>",
        &in_body("<plaintext><b>x</plaintext></plaintext>"),
        1,
    );
}

#[test]
fn test_unknown_end_tag_is_ignored() {
    assert_parses_to("<!DOCTYPE html><div>a</span>b</div>", &in_body("<div>ab</div>"), 1);
}

#[test]
fn test_nested_forms_are_ignored() {
    assert_parses_to(
        "<!DOCTYPE html><form><form><input></form>",
        &in_body("<form><input/></form>"),
        1,
    );
}

#[test]
fn test_repeated_html_tag_merges_attributes() {
    let (events, errors) = parse("<!DOCTYPE html><html lang=en><body><html lang=fr class=x>");
    assert_eq!(errors.len(), 1);
    let merged = events
        .iter()
        .find(|event| event.name == "html" && event.is_empty_element)
        .expect("merged attributes event");
    assert_eq!(merged.attribute_count(), 1);
    assert_eq!(merged.attribute_by_name("class"), Some("x"));
}

// =============================================================================
// Formatting elements
// =============================================================================

#[test]
fn test_misnested_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><b>1<i>2</b>3</i>",
        &in_body("<b>1<i>2</i></b><i>3</i>"),
        1,
    );
}

#[test]
fn test_formatting_element_with_furthest_block() {
    assert_parses_to(
        "<!DOCTYPE html><b><p>x</b>y</p>",
        &in_body("<b><p>x</p></b><p>y</p>"),
        1,
    );
}

#[test]
fn test_formatting_reconstructed_in_next_paragraph() {
    assert_parses_to(
        "<!DOCTYPE html><p><b>x<p>y",
        &in_body("<p><b>x</b></p><p><b>y</b></p>"),
        2,
    );
}

#[test]
fn test_nested_anchor_closes_previous() {
    assert_parses_to(
        "<!DOCTYPE html><a>x<a>y",
        &in_body("<a>x</a><a>y</a>"),
        2,
    );
}

#[test]
fn test_noahs_ark_limits_reconstruction() {
    let (events, errors) = parse("<!DOCTYPE html><p><b><b><b><b>x</p>y");
    let outline = outline(&events);
    assert_eq!(
        outline,
        in_body("<p><b><b><b><b>x</b></b></b></b></p><b><b><b>y</b></b></b>")
    );
    assert_eq!(errors.len(), 2);
}

#[test]
fn test_button_bounds_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><button><b>x</button>y",
        &in_body("<button><b>x</b></button>y"),
        1,
    );
}

#[test]
fn test_nested_button_bounds_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><button><i>x<button>y",
        &in_body("<button><i>x</i></button><button>y</button>"),
        2,
    );
}

#[test]
fn test_object_bounds_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><object><b>x</object>y",
        &in_body("<object><b>x</b></object>y"),
        1,
    );
}

#[test]
fn test_marquee_bounds_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><marquee><b>x</marquee>y",
        &in_body("<marquee><b>x</b></marquee>y"),
        1,
    );
}

#[test]
fn test_caption_bounds_formatting_elements() {
    assert_parses_to(
        "<!DOCTYPE html><table><caption><b>x</caption></table>y",
        &in_body("<table><caption><b>x</b></caption></table>y"),
        1,
    );
}

#[test]
fn test_formatting_outside_button_is_reconstructed() {
    assert_parses_to(
        "<!DOCTYPE html><p><b>x<button>y</button></p>z",
        &in_body("<p><b>x<button>y</button></b></p><b>z</b>"),
        2,
    );
}

#[test]
fn test_reopened_form_can_be_closed() {
    assert_parses_to(
        "<!DOCTYPE html><b><form><p>x</b>y</form>z",
        &in_body("<b><form><p>x</p></form></b><form><p>y</p></form>z"),
        1,
    );
}

#[test]
fn test_stray_formatting_end_tag() {
    assert_parses_to("<!DOCTYPE html><p>x</b></p>", &in_body("<p>x</p>"), 1);
}

// =============================================================================
// Tables
// =============================================================================

#[test]
fn test_table_with_implied_sections() {
    assert_parses_to(
        "<!DOCTYPE html><table><tr><td>1<td>2</table>",
        &in_body("<table><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"),
        0,
    );
}

#[test]
fn test_text_in_table_is_emitted_in_place() {
    assert_parses_to(
        "<!DOCTYPE html><table>x<tr><td>1</td></tr></table>",
        &in_body("<table>x<tbody><tr><td>1</td></tr></tbody></table>"),
        1,
    );
}

#[test]
fn test_whitespace_in_table_is_kept() {
    let (events, errors) = parse("<!DOCTYPE html><table> <tr><td>1</td></tr></table>");
    assert!(errors.is_empty());
    assert!(events.iter().any(|event| event.kind == NodeKind::Whitespace));
}

#[test]
fn test_column_group() {
    assert_parses_to(
        "<!DOCTYPE html><table><col></table>",
        &in_body("<table><colgroup><col/></colgroup></table>"),
        0,
    );
}

#[test]
fn test_caption_closed_by_row() {
    let (events, errors) =
        parse("<!DOCTYPE html><table><caption>c<tr><td>x</td></tr></table>");
    assert_eq!(
        outline(&events),
        in_body("<table><caption>c</caption><tbody><tr><td>x</td></tr></tbody></table>")
    );
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Caption closed implicitly.");
}

#[test]
fn test_nested_table_closes_outer() {
    assert_parses_to(
        "<!DOCTYPE html><table><table></table>",
        &in_body("<table></table><table></table>"),
        1,
    );
}

#[test]
fn test_quirks_mode_table_stays_in_paragraph() {
    let (events, _) = parse("<p><table></table>");
    assert!(outline(&events).contains("<p><table></table></p>"));

    let (events, errors) = parse("<!DOCTYPE html><p><table></table>");
    assert_eq!(outline(&events), in_body("<p></p><table></table>"));
    assert!(errors.is_empty());
}

// =============================================================================
// Select
// =============================================================================

#[test]
fn test_select_options() {
    assert_parses_to(
        "<!DOCTYPE html><select><option>a<option>b</select>",
        &in_body("<select><option>a</option><option>b</option></select>"),
        0,
    );
}

#[test]
fn test_select_optgroups() {
    assert_parses_to(
        "<!DOCTYPE html><select><optgroup><option>a<optgroup><option>b</select>",
        &in_body(
            "<select><optgroup><option>a</option></optgroup><optgroup><option>b</option></optgroup></select>",
        ),
        0,
    );
}

#[test]
fn test_select_ignores_other_tags() {
    assert_parses_to(
        "<!DOCTYPE html><select><b>x</b></select>",
        &in_body("<select>x</select>"),
        2,
    );
}

#[test]
fn test_select_in_table_cell_closed_by_cell_end() {
    assert_parses_to(
        "<!DOCTYPE html><table><tr><td><select><option>a</td></tr></table>",
        &in_body(
            "<table><tbody><tr><td><select><option>a</option></select></td></tr></tbody></table>",
        ),
        1,
    );
}

// =============================================================================
// Raw text
// =============================================================================

#[test]
fn test_script_is_not_tokenized() {
    assert_parses_to(
        "<!DOCTYPE html><script>if (a < b) x = \"</p>\";</script>",
        "<!DOCTYPE html><html><head><script>if (a < b) x = \"</p>\";</script></head><body></body></html>",
        0,
    );
}

#[test]
fn test_style_escape_flag() {
    assert_parses_to(
        "<!DOCTYPE html><style><!-- </style> --></style>",
        "<!DOCTYPE html><html><head><style><!-- </style> --></style></head><body></body></html>",
        0,
    );
}

#[test]
fn test_unterminated_title() {
    let (events, errors) = parse("<!DOCTYPE html><title>x");
    assert_eq!(
        outline(&events),
        "<!DOCTYPE html><html><head><title>x</title></head><body></body></html>"
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_noscript_with_scripting_is_raw_text() {
    let (events, errors) = parse_with_options(
        "<!DOCTYPE html><noscript><p>x</p></noscript>",
        ParserOptions::default().with_scripting(),
    );
    assert_eq!(
        outline(&events),
        "<!DOCTYPE html><html><head><noscript><p>x</p></noscript></head><body></body></html>"
    );
    assert!(errors.is_empty());
}

#[test]
fn test_noscript_without_scripting_is_parsed() {
    let (events, _) = parse("<!DOCTYPE html><noscript><link></noscript>");
    assert_eq!(
        outline(&events),
        "<!DOCTYPE html><html><head><noscript><link/></noscript></head><body></body></html>"
    );
}

// =============================================================================
// Compatibility mode
// =============================================================================

fn compat_mode(html: &str) -> CompatibilityMode {
    let mut reader = HtmlReader::new(html);
    while let Ok(Some(_)) = reader.next_event() {}
    reader.compat_mode()
}

#[test]
fn test_compat_mode_from_doctype() {
    assert_eq!(compat_mode("<!DOCTYPE html>"), CompatibilityMode::Standards);
    assert_eq!(compat_mode("<p>"), CompatibilityMode::Quirks);
    assert_eq!(compat_mode("<!DOCTYPE foo>"), CompatibilityMode::Quirks);
    assert_eq!(
        compat_mode(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN">"#),
        CompatibilityMode::Quirks
    );
    assert_eq!(
        compat_mode(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01 Transitional//EN" "http://www.w3.org/TR/html4/loose.dtd">"#
        ),
        CompatibilityMode::AlmostStandards
    );
    assert_eq!(
        compat_mode(
            r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#
        ),
        CompatibilityMode::AlmostStandards
    );
    assert_eq!(
        compat_mode(r#"<!DOCTYPE html PUBLIC "-//W3C//DTD HTML 4.01//EN">"#),
        CompatibilityMode::Standards
    );
}

#[test]
fn test_compat_mode_identifiers_ignore_case() {
    assert_eq!(
        compatibility_mode_for_doctype(Some("html"), Some("-//IETF//DTD HTML//EN"), None, false),
        CompatibilityMode::Quirks
    );
    assert_eq!(
        compatibility_mode_for_doctype(
            Some("html"),
            None,
            Some("HTTP://WWW.IBM.COM/DATA/DTD/V11/IBMXHTML1-TRANSITIONAL.DTD"),
            false
        ),
        CompatibilityMode::Quirks
    );
    assert_eq!(
        compatibility_mode_for_doctype(Some("html"), None, None, true),
        CompatibilityMode::Quirks
    );
}

#[test]
fn test_erroneous_doctype_is_reported() {
    let (_, errors) = parse("<!DOCTYPE foo><p>");
    assert_eq!(errors[0].message, "Erroneous DOCTYPE.");
}

// =============================================================================
// Tree constructor
// =============================================================================

#[test]
fn test_tree_constructor_tracks_open_elements() {
    let mut constructor = TreeConstructor::new(
        InputStream::from_string("<!DOCTYPE html><table><tr>"),
        ParserOptions::default(),
    );
    for _ in 0..20 {
        if constructor.insertion_mode() == InsertionMode::InTable {
            break;
        }
        constructor.step().expect("step failed");
    }
    assert_eq!(constructor.insertion_mode(), InsertionMode::InTable);
    assert_eq!(constructor.open_element_names(), ["html", "body", "table"]);
}

#[test]
fn test_tree_constructor_finishes() {
    let mut constructor =
        TreeConstructor::new(InputStream::from_string("<p>x"), ParserOptions::default());
    let mut events = Vec::new();
    while !constructor.is_finished() {
        constructor.step().expect("step failed");
        while let Some(event) = constructor.pop_event() {
            events.push(event);
        }
    }
    assert!(constructor.open_element_names().is_empty());
    assert_balanced(&events);
}

#[test]
fn test_parse_error_positions() {
    let (_, errors) = parse("<!DOCTYPE html>\n\n<p>x</b>");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Unexpected end tag (b). Ignored.");
    assert_eq!(errors[0].line, 3);
}

#[test]
fn test_malformed_documents_stay_balanced() {
    let documents = [
        "<b><p>x</b>y</p>",
        "<table>x<tr><td>1<td>2</table>",
        "<a><a><a>",
        "<p><b><i>x</p>y",
        "<select><option>a<table>",
        "<title>x",
        "<head></head><script>a",
        "</html><p>",
        "<frameset><frame></frameset>x",
        "<ul><li><li></ul></li>",
        "<table><caption><b>x</table>y",
        "<textarea>",
        "<!DOCTYPE html><html><body><html class=a>",
        "<div></div></body></html><p>",
        "<table><td><select><td>x",
        "<head><noscript><p>",
        "<body><frameset>",
        "<object><b></object>x",
        "<h1><h2></h1>",
        "<nobr><nobr>x",
    ];
    for html in documents {
        let (events, _) = parse(html);
        assert_balanced(&events);
    }
}

#[test]
fn test_parsing_twice_gives_same_events() {
    let html = "<!DOCTYPE html><table><tr><td><b>x</td></tr></table><p>y";
    assert_eq!(parse(html).0, parse(html).0);
}
