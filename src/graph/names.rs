//! Concept name handling: normalization, source prefixes and name-encoded properties.

use crate::types::{
    HprError, HprResult, LexicalType, Pos, SourceType, SENSE_MARKER, SOURCE_MARKER,
    SYNSET_MARKER,
};

const TASHDID: char = '\u{0651}';
const ZWSP: char = '\u{200B}';
const ZWNJ: char = '\u{200C}';

/// Properties carried by a raw name, e.g. `w˸"free text"` or `bank#n2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedName {
    /// The name with prefix and quotes removed.
    pub name: String,
    pub lexical_type: LexicalType,
    pub pos: Pos,
    /// Source taken from the prefix, if any.
    pub source: Option<SourceType>,
    pub descriptive: bool,
}

/// Normalize text for lookup.
///
/// Folds Arabic letter variants to their Persian forms, flattens line breaks,
/// maps Persian and Arabic digits to ASCII, collapses double spaces and trims
/// quotes, spaces and zero-width non-joiners from both ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        let mapped = match c {
            '\u{0643}' => '\u{06A9}',              // kaf
            '\u{064A}' | '\u{0649}' => '\u{06CC}', // yeh, alef maksura
            '\r' | '\n' | '\t' => ' ',
            ZWSP => ZWNJ,
            '\u{06F0}'..='\u{06F9}' => digit(c as u32 - 0x06F0),
            '\u{0660}'..='\u{0669}' => digit(c as u32 - 0x0660),
            other => other,
        };
        out.push(mapped);
    }
    let collapsed = out.replace("  ", " ");
    collapsed
        .trim_matches(|c| c == '"' || c == ' ' || c == ZWNJ)
        .to_string()
}

fn digit(offset: u32) -> char {
    char::from_digit(offset, 10).unwrap_or('0')
}

/// Lowercased normalized form used as the name-index key.
pub fn lookup_key(name: &str) -> String {
    normalize(name).to_lowercase()
}

/// Split a `x˸name` source prefix off a name.
pub fn split_source_prefix(name: &str) -> HprResult<(Option<SourceType>, &str)> {
    let mut chars = name.chars();
    let (Some(first), Some(second)) = (chars.next(), chars.next()) else {
        return Ok((None, name));
    };
    if second != SOURCE_MARKER || chars.next().is_none() {
        return Ok((None, name));
    }
    let source =
        SourceType::from_prefix(first).ok_or(HprError::UnknownSourcePrefix { prefix: first })?;
    let offset = first.len_utf8() + second.len_utf8();
    Ok((Some(source), &name[offset..]))
}

/// The name a raw name would be stored under, normalized for lookup.
pub fn prospective_name(name: &str) -> HprResult<String> {
    let (_, rest) = split_source_prefix(name)?;
    Ok(normalize(rest))
}

/// Read the properties encoded in a raw name.
pub fn extract_properties(raw: &str) -> HprResult<ExtractedName> {
    let (lexical_type, pos) = if raw.contains(SENSE_MARKER) {
        (LexicalType::Sense, Pos::from_sense_name(raw))
    } else if raw.contains(SYNSET_MARKER) {
        (LexicalType::Synset, Pos::Unknown)
    } else {
        (LexicalType::Any, Pos::Unknown)
    };

    let (source, rest) = split_source_prefix(raw)?;
    let (name, descriptive) = strip_quotes(rest);

    Ok(ExtractedName {
        // Tabs separate dump columns.
        name: name.replace('\t', " "),
        lexical_type,
        pos,
        source,
        descriptive,
    })
}

/// Make untrusted text safe to use as a concept name.
///
/// Reserved markers become `_`, tabs become spaces and surrounding quotes are
/// dropped.
pub fn sanitize(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| match c {
            SENSE_MARKER | SYNSET_MARKER | SOURCE_MARKER => '_',
            '\t' => ' ',
            other => other,
        })
        .collect();
    let normalized = normalize(replaced.replace("  ", " ").trim());
    strip_quotes(&normalized).0.to_string()
}

/// The variant of a name without tashdid, if the name has one and is not a sense.
pub fn without_tashdid(name: &str) -> Option<String> {
    if name.contains(TASHDID) && !name.contains(SENSE_MARKER) {
        Some(name.replace(TASHDID, ""))
    } else {
        None
    }
}

/// The lemma part of a sense name (`bank#n2` gives `bank`).
pub fn lemma_of(name: &str) -> Option<&str> {
    name.find(SENSE_MARKER).map(|i| &name[..i])
}

fn strip_quotes(name: &str) -> (&str, bool) {
    if name.len() > 1 && name.starts_with('"') && name.ends_with('"') {
        (&name[1..name.len() - 1], true)
    } else {
        (name, false)
    }
}
