// WHY: literal phrase search - the phrase is escaped before compilation so it never acts as a pattern
// Uses regex-automata meta engine with case-insensitive syntax for left-to-right, non-overlapping scans

use regex_automata::{meta::Regex, util::syntax};
use thiserror::Error;

use super::{Annotation, PhraseMatch};

/// Reasons an annotation cannot be matched
#[derive(Error, Debug)]
pub enum MatchError {
    #[error("annotation phrase is empty")]
    EmptyPhrase,

    #[error("failed to compile phrase matcher: {0}")]
    Build(#[from] regex_automata::meta::BuildError),
}

/// Compile a case-insensitive matcher for a literal phrase
pub fn compile_phrase(phrase: &str) -> Result<Regex, MatchError> {
    if phrase.is_empty() {
        return Err(MatchError::EmptyPhrase);
    }

    let pattern = regex_syntax::escape(phrase);
    let regex = Regex::builder()
        .syntax(syntax::Config::new().case_insensitive(true))
        .build(&pattern)?;
    Ok(regex)
}

/// Find every occurrence of `annotation.phrase` in `text`
///
/// Occurrences are reported left to right; the scan resumes at the end of each
/// match so repeated phrases never overlap within one annotation.
pub fn find_phrase_matches<'a>(
    text: &str,
    annotation: &'a Annotation,
    annotation_index: usize,
) -> Result<Vec<PhraseMatch<'a>>, MatchError> {
    let regex = compile_phrase(&annotation.phrase)?;

    let matches = regex
        .find_iter(text)
        .filter(|m| !m.is_empty())
        .map(|m| PhraseMatch {
            start: m.start(),
            end: m.end(),
            technique: annotation.technique.as_str(),
            annotation_index,
        })
        .collect();

    Ok(matches)
}
