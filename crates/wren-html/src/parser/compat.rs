//! Document compatibility mode.
//!
//! [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)

use serde::Serialize;
use strum_macros::Display;

/// [§ 2.1.5 Quirks mode](https://dom.spec.whatwg.org/#concept-document-quirks)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
pub enum CompatibilityMode {
    /// "no-quirks mode"
    #[default]
    Standards,
    /// "limited-quirks mode"
    AlmostStandards,
    /// "quirks mode"
    Quirks,
}

/// Public identifier prefixes that put the document in quirks mode.
const QUIRKY_PUBLIC_PREFIXES: &[&str] = &[
    "+//silmaril//dtd html pro v0r11 19970101//",
    "-//as//dtd html 3.0 aswedit + extensions//",
    "-//advasoft ltd//dtd html 3.0 aswedit + extensions//",
    "-//ietf//dtd html 2.0 level 1//",
    "-//ietf//dtd html 2.0 level 2//",
    "-//ietf//dtd html 2.0 strict level 1//",
    "-//ietf//dtd html 2.0 strict level 2//",
    "-//ietf//dtd html 2.0 strict//",
    "-//ietf//dtd html 2.0//",
    "-//ietf//dtd html 2.1e//",
    "-//ietf//dtd html 3.0//",
    "-//ietf//dtd html 3.2 final//",
    "-//ietf//dtd html 3.2//",
    "-//ietf//dtd html 3//",
    "-//ietf//dtd html level 0//",
    "-//ietf//dtd html level 1//",
    "-//ietf//dtd html level 2//",
    "-//ietf//dtd html level 3//",
    "-//ietf//dtd html strict level 0//",
    "-//ietf//dtd html strict level 1//",
    "-//ietf//dtd html strict level 2//",
    "-//ietf//dtd html strict level 3//",
    "-//ietf//dtd html strict//",
    "-//ietf//dtd html//",
    "-//metrius//dtd metrius presentational//",
    "-//microsoft//dtd internet explorer 2.0 html strict//",
    "-//microsoft//dtd internet explorer 2.0 html//",
    "-//microsoft//dtd internet explorer 2.0 tables//",
    "-//microsoft//dtd internet explorer 3.0 html strict//",
    "-//microsoft//dtd internet explorer 3.0 html//",
    "-//microsoft//dtd internet explorer 3.0 tables//",
    "-//netscape comm. corp.//dtd html//",
    "-//netscape comm. corp.//dtd strict html//",
    "-//o'reilly and associates//dtd html 2.0//",
    "-//o'reilly and associates//dtd html extended 1.0//",
    "-//o'reilly and associates//dtd html extended relaxed 1.0//",
    "-//sq//dtd html 2.0 hotmetal + extensions//",
    "-//softquad software//dtd hotmetal pro 6.0::19990601::extensions to html 4.0//",
    "-//softquad//dtd hotmetal pro 4.0::19971010::extensions to html 4.0//",
    "-//spyglass//dtd html 2.0 extended//",
    "-//sun microsystems corp.//dtd hotjava html//",
    "-//sun microsystems corp.//dtd hotjava strict html//",
    "-//w3c//dtd html 3 1995-03-24//",
    "-//w3c//dtd html 3.2 draft//",
    "-//w3c//dtd html 3.2 final//",
    "-//w3c//dtd html 3.2//",
    "-//w3c//dtd html 3.2s draft//",
    "-//w3c//dtd html 4.0 frameset//",
    "-//w3c//dtd html 4.0 transitional//",
    "-//w3c//dtd html experimental 19960712//",
    "-//w3c//dtd html experimental 970421//",
    "-//w3c//dtd w3 html//",
    "-//w3o//dtd w3 html 3.0//",
    "-//webtechs//dtd mozilla html 2.0//",
    "-//webtechs//dtd mozilla html//",
];

/// Public identifiers that put the document in quirks mode when they match
/// exactly.
const QUIRKY_PUBLIC_IDENTIFIERS: &[&str] = &[
    "-//w3o//dtd w3 html strict 3.0//en//",
    "-/w3c/dtd html 4.0 transitional/en",
    "html",
];

const QUIRKY_SYSTEM_IDENTIFIER: &str =
    "http://www.ibm.com/data/dtd/v11/ibmxhtml1-transitional.dtd";

/// HTML 4.01 public identifiers whose mode depends on the system identifier.
const HTML401_FRAMESET_OR_TRANSITIONAL: &[&str] = &[
    "-//w3c//dtd html 4.01 frameset//",
    "-//w3c//dtd html 4.01 transitional//",
];

const XHTML1_FRAMESET_OR_TRANSITIONAL: &[&str] = &[
    "-//w3c//dtd xhtml 1.0 frameset//",
    "-//w3c//dtd xhtml 1.0 transitional//",
];

fn starts_with_any(identifier: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|prefix| identifier.starts_with(prefix))
}

/// Decide the compatibility mode for a DOCTYPE token.
///
/// Identifiers are compared ASCII case-insensitively.
#[must_use]
pub fn compatibility_mode_for_doctype(
    name: Option<&str>,
    public_identifier: Option<&str>,
    system_identifier: Option<&str>,
    force_quirks: bool,
) -> CompatibilityMode {
    let public = public_identifier.map(str::to_ascii_lowercase);
    let system = system_identifier.map(str::to_ascii_lowercase);
    let public = public.as_deref();
    let system = system.as_deref();

    // "The force-quirks flag is set to on."
    // "The name is not "html"."
    if force_quirks || !name.is_some_and(|name| name.eq_ignore_ascii_case("html")) {
        return CompatibilityMode::Quirks;
    }

    if let Some(public) = public {
        if QUIRKY_PUBLIC_IDENTIFIERS.contains(&public)
            || starts_with_any(public, QUIRKY_PUBLIC_PREFIXES)
        {
            return CompatibilityMode::Quirks;
        }
        // "The system identifier is missing and the public identifier starts
        // with: "-//W3C//DTD HTML 4.01 Frameset//" / "-//W3C//DTD HTML 4.01
        // Transitional//""
        if system.is_none() && starts_with_any(public, HTML401_FRAMESET_OR_TRANSITIONAL) {
            return CompatibilityMode::Quirks;
        }
    }

    if system == Some(QUIRKY_SYSTEM_IDENTIFIER) {
        return CompatibilityMode::Quirks;
    }

    if let Some(public) = public
        && (starts_with_any(public, XHTML1_FRAMESET_OR_TRANSITIONAL)
            || (system.is_some() && starts_with_any(public, HTML401_FRAMESET_OR_TRANSITIONAL)))
    {
        return CompatibilityMode::AlmostStandards;
    }

    CompatibilityMode::Standards
}
