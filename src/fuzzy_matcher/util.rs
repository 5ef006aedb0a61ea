use unicode_normalization::UnicodeNormalization;

use crate::CaseMatching;

/// Lowercase a single character using the one-to-one mapping.
///
/// Characters whose lowercase form spans several characters (e.g. `İ`) are
/// returned unchanged so that indices stay aligned with the input.
#[inline]
pub fn to_lower(ch: char) -> char {
    if ch.is_ascii() {
        return ch.to_ascii_lowercase();
    }
    let mut lower = ch.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => ch,
    }
}

/// True when `chars` has at least one uppercase character and no lowercase
/// one. Caseless characters (digits, punctuation, CJK...) are ignored.
pub fn is_all_uppercase(chars: &[char]) -> bool {
    let mut has_upper = false;
    for ch in chars {
        if ch.is_lowercase() {
            return false;
        }
        has_upper |= ch.is_uppercase();
    }
    has_upper
}

#[inline]
fn is_separator(ch: char) -> bool {
    ch == '_' || ch == '-' || ch.is_whitespace()
}

/// Whether `haystack[idx]` starts a word: the first character, a character
/// following `_`, `-` or whitespace, or an uppercase character when
/// `upper_is_boundary` (i.e. the haystack is not entirely uppercase).
#[inline]
pub fn is_word_boundary(haystack: &[char], idx: usize, upper_is_boundary: bool) -> bool {
    idx == 0 || (upper_is_boundary && haystack[idx].is_uppercase()) || is_separator(haystack[idx - 1])
}

/// Compare the expected pattern character against a choice character.
#[inline]
pub fn chars_match(expected: char, actual: char, case: CaseMatching) -> bool {
    match case {
        CaseMatching::Respect => expected == actual,
        CaseMatching::Smart if expected.is_uppercase() => expected == actual,
        CaseMatching::Smart | CaseMatching::Ignore => expected == actual || to_lower(expected) == to_lower(actual),
    }
}

/// Strip diacritics from a character when its canonical decomposition holds
/// exactly one base character (`é` -> `e`). Anything else is kept as is, so
/// a folded string has the same character count as the original.
pub fn fold_char(ch: char) -> char {
    if ch.is_ascii() {
        return ch;
    }
    let mut bases = ch.nfd().filter(|c| !unicode_normalization::char::is_combining_mark(*c));
    match (bases.next(), bases.next()) {
        (Some(base), None) => base,
        _ => ch,
    }
}

#[cfg(test)]
pub fn wrap_matches(line: &str, indices: &[usize]) -> String {
    let mut ret = String::new();
    let mut peekable = indices.iter().peekable();
    for (idx, ch) in line.chars().enumerate() {
        let next_id = **peekable.peek().unwrap_or(&&line.len());
        if next_id == idx {
            ret.push_str(format!("[{}]", ch).as_str());
            peekable.next();
        } else {
            ret.push(ch);
        }
    }

    ret
}

/// Asserts that `choices` are ranked in the given order for `pattern`, best
/// (lowest score) first.
#[cfg(test)]
pub fn assert_order(matcher: &dyn super::FuzzyMatcher, pattern: &str, choices: &[&'static str]) {
    let result = filter_and_sort(matcher, pattern, choices);

    if result != choices {
        // debug print
        println!("pattern: {}", pattern);
        for &choice in choices.iter() {
            if let Some((score, indices)) = matcher.fuzzy_indices(choice, pattern) {
                println!("{}: {:?}", score, wrap_matches(choice, &indices));
            } else {
                println!("NO MATCH for {}", choice);
            }
        }
    }

    assert_eq!(result, choices);
}

#[cfg(test)]
fn filter_and_sort(matcher: &dyn super::FuzzyMatcher, pattern: &str, lines: &[&'static str]) -> Vec<&'static str> {
    let mut lines_with_score: Vec<(f32, &'static str)> = lines
        .iter()
        .filter_map(|&s| matcher.fuzzy_match(s, pattern).map(|score| (score, s)))
        .collect();
    lines_with_score.sort_by(|a, b| a.0.total_cmp(&b.0));
    lines_with_score.into_iter().map(|(_, string)| string).collect()
}
