//! Best-effort decoding of utPLSQL outcome descriptions.
//!
//! The utPLSQL framework writes a free-text `description` column that was
//! never designed as a protocol: it mixes at least five layouts, reuses `:`
//! and `.` as both structural and incidental separators, and omits fields
//! when a run dies before a normal assertion executes. The decoder applies
//! an ordered rule cascade that recovers whatever structure is unambiguously
//! present and falls back to fixed sentinels for the rest. The only fatal
//! shape is a header with more than two dot components; everything else
//! produces a degraded-but-complete [`DescriptionRecord`].

use crate::error::{DecodeError, Result};
use crate::record::DescriptionRecord;

/// Marker utPLSQL emits when it could not execute the named unit at all.
/// Includes the opening quote of the quoted owner name that follows it.
pub const UNABLE_TO_RUN_MARKER: &str = "Unable to run \"";

/// Closing quote followed by the framework's "Result" tail. Everything
/// after this point lives in later colon segments.
pub const RESULT_MARKER: &str = "\" Result";

/// Closing quote followed by the framework's inline "Expected ... got ..."
/// tail. Everything after the quote is the inline result.
pub const EXPECTED_MARKER: &str = "\" Expected";

/// Sentinel assertion type used when no assertion marker is present.
pub const ASSERT_TYPE_UNKNOWN: &str = "Assert Type Unknown";

/// Suffix appended to the header when a line describes suite-level
/// setup/teardown rather than a named procedure.
pub const SUITE_SETUP_SUFFIX: &str = "ut_setup";

/// Fallback test name for suite-level lines with no further structure.
pub const SUITE_SETUP_TEST_NAME: &str = "init";

const PAYLOAD_DELIMITER: char = ':';
const NAME_DELIMITER: char = '.';
const QUOTE: char = '"';

/// Decode one outcome description into its constituent elements.
///
/// Routing happens on the number of dot components in the first colon
/// segment, before any marker search: the framework-failure marker can
/// appear inside otherwise-normal payload text, so a well-formed
/// two-component header always wins.
///
/// - 0 or 1 components: either a framework-level execution failure (the
///   [`UNABLE_TO_RUN_MARKER`] sub-grammar) or a suite-level setup/teardown
///   line, depending on marker presence.
/// - exactly 2 components: the normal per-procedure case.
/// - more than 2 components: no recognized layout matches and the whole
///   batch may be unreliable; decoding fails.
pub fn decode(description: &str) -> Result<DescriptionRecord> {
    let segments = split_dropping_trailing(description, PAYLOAD_DELIMITER);
    let header = segments.first().copied().unwrap_or("");
    let name_components = split_dropping_trailing(header, NAME_DELIMITER);
    let first_payload = segments.get(1).copied().unwrap_or("");

    match name_components.len() {
        0 | 1 => match first_payload.find(UNABLE_TO_RUN_MARKER) {
            Some(marker_pos) => Ok(decode_framework_failure(first_payload, marker_pos, &segments)),
            None => Ok(decode_suite_setup(header, first_payload, &segments)),
        },
        2 => Ok(decode_assertion(&name_components, first_payload, &segments)),
        components => Err(DecodeError::StructuralFormat {
            header: header.to_string(),
            components,
        }),
    }
}

/// Normal case: `procedure.test: <assertion payload>`.
fn decode_assertion(
    name_components: &[&str],
    first_payload: &str,
    segments: &[&str],
) -> DescriptionRecord {
    let procedure_name = name_components.join(".");
    let (assertion_type, remainder) = extract_assertion_type(first_payload);
    let (test_name, inline_result) = extract_test_name(remainder);
    let result_message = assemble_result(inline_result, segments);
    DescriptionRecord::new(procedure_name, test_name, assertion_type, result_message)
}

/// Suite-level setup/teardown line: no per-procedure structure in the
/// header, no framework-failure marker in the payload.
fn decode_suite_setup(
    header: &str,
    first_payload: &str,
    segments: &[&str],
) -> DescriptionRecord {
    let procedure_name = format!("{header}{SUITE_SETUP_SUFFIX}");
    let (assertion_type, remainder) = extract_assertion_type(first_payload);
    let (test_name, inline_result) = extract_test_name(remainder);
    let test_name = if test_name.is_empty() {
        SUITE_SETUP_TEST_NAME.to_string()
    } else {
        test_name
    };
    let result_message = assemble_result(inline_result, segments);
    DescriptionRecord::new(procedure_name, test_name, assertion_type, result_message)
}

/// Framework-failure sub-grammar: the unit named after the marker never
/// ran, so no assertion type exists. The substring between the marker and
/// the last dot is the procedure, the tail after that dot is the test.
fn decode_framework_failure(
    first_payload: &str,
    marker_pos: usize,
    segments: &[&str],
) -> DescriptionRecord {
    let target = &first_payload[marker_pos + UNABLE_TO_RUN_MARKER.len()..];
    let (procedure_name, test_name) = match target.rfind(NAME_DELIMITER) {
        Some(dot) => (target[..dot].to_string(), target[dot + 1..].to_string()),
        // No dotted tail after the marker; the whole name is the procedure.
        None => (target.to_string(), SUITE_SETUP_TEST_NAME.to_string()),
    };
    DescriptionRecord::new(
        procedure_name,
        test_name,
        ASSERT_TYPE_UNKNOWN.to_string(),
        trailing_payload(segments),
    )
}

/// Extract the assertion type from the text before the first quote.
///
/// A quote at position 0 is treated as absent: an empty prefix carries no
/// information and the sentinel beats an empty assertion type. The opening
/// quote itself is consumed from the remainder.
fn extract_assertion_type(type_str: &str) -> (String, &str) {
    match type_str.find(QUOTE) {
        Some(pos) if pos > 0 => (type_str[..pos].trim().to_string(), &type_str[pos + 1..]),
        _ => (ASSERT_TYPE_UNKNOWN.to_string(), type_str),
    }
}

/// Extract the test name and, when present, the inline result text.
///
/// The framework appends one of two tails after the human-readable test
/// description: a `Result` tail whose payload lives in later colon
/// segments, or an `Expected` tail carrying the result inline. The tails
/// are searched in that order; both are preceded by a closing quote, and a
/// match at position 0 counts as absent. For the inline form the result
/// starts at the character after the closing quote, so the word `Expected`
/// is part of the message.
fn extract_test_name(test_str: &str) -> (String, Option<String>) {
    if let Some(pos) = test_str.find(RESULT_MARKER) {
        if pos > 0 {
            return (test_str[..pos].trim().to_string(), None);
        }
    }
    if let Some(pos) = test_str.find(EXPECTED_MARKER) {
        if pos > 0 {
            let inline = test_str[pos + 1..].trim().replace(QUOTE, "");
            return (test_str[..pos].trim().to_string(), Some(inline));
        }
    }
    (test_str.trim().to_string(), None)
}

/// An inline result wins; otherwise the message is the blind concatenation
/// of every payload segment from index 2 onward. The concatenation uses no
/// separator, which is how embedded `ORA-nnnnn:` colons disappear from the
/// final message.
fn assemble_result(inline_result: Option<String>, segments: &[&str]) -> String {
    match inline_result {
        Some(result) => result,
        None => trailing_payload(segments),
    }
}

fn trailing_payload(segments: &[&str]) -> String {
    segments
        .iter()
        .skip(2)
        .copied()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split on `delimiter`, dropping trailing empty segments. A header of
/// `"."` therefore has zero name components and a description ending in
/// `:` gains no phantom payload segment.
fn split_dropping_trailing(input: &str, delimiter: char) -> Vec<&str> {
    let mut parts: Vec<&str> = input.split(delimiter).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}
