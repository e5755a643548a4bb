
// Double pinyin (flypy) encoding: every syllable becomes initial code + final code.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::Skip;


/// Tokens passed through unchanged: digits, floats, letters mixed with digits
/// and latin words which kept an uppercase letter.
static PASSTHROUGH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[0-9]+|[0-9]+\.[0-9]+|[a-zA-Z]*[0-9][a-zA-Z0-9]*|[a-zA-Z]*[A-Z][a-zA-Z]*)$").unwrap()
});

/// Tokens dropped from the output.
const PUNCTUATION_TOKENS: [&str; 9] = ["-", "－", "—", "–", "·", "・", ",", "，", "/"];

/// Two letter initials, checked before the single letter ones.
const DOUBLE_INITIALS: [&str; 3] = ["zh", "ch", "sh"];

/// Syllables without an initial even though they start with a consonant.
const STANDALONE_FINALS: [&str; 5] = ["ng", "m", "n", "hm", "hng"];

pub const INITIALS: [(&str, &str); 24] = [
    ("b", "b"), ("p", "p"), ("m", "m"), ("f", "f"),
    ("d", "d"), ("t", "t"), ("n", "n"), ("l", "l"),
    ("g", "g"), ("k", "k"), ("h", "h"),
    ("j", "j"), ("q", "q"), ("x", "x"),
    ("zh", "v"), ("ch", "i"), ("sh", "u"), ("r", "r"),
    ("z", "z"), ("c", "c"), ("s", "s"),
    ("y", "y"), ("w", "w"),
    ("", ""),
];

pub const FINALS: [(&str, &str); 38] = [
    ("a", "a"), ("o", "o"), ("e", "e"), ("i", "i"), ("u", "u"), ("v", "v"),
    ("ai", "d"), ("ei", "w"), ("ui", "v"), ("ao", "c"), ("ou", "z"), ("iu", "q"),
    ("ie", "p"), ("ue", "t"), ("ve", "t"), ("er", "r"),
    ("an", "j"), ("en", "f"), ("in", "b"), ("un", "y"), ("vn", "y"),
    ("ang", "h"), ("eng", "g"), ("ing", "k"), ("ong", "s"),
    ("ia", "x"), ("ua", "x"), ("uo", "o"), ("io", "o"),
    ("iao", "n"), ("ian", "m"), ("uai", "k"), ("uan", "r"), ("van", "r"),
    ("iang", "l"), ("uang", "l"), ("iong", "s"),
    ("ng", "g"),
];

/// Full finals written in their short form.
pub const ABBREVIATIONS: [(&str, &str); 3] = [("iou", "iu"), ("uei", "ui"), ("uen", "un")];


fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn is_single_initial(c: char) -> bool {
    c.is_ascii_lowercase() && !matches!(c, 'a' | 'e' | 'o' | 'i' | 'u' | 'v')
}

/// Splits a lowercase syllable into initial and final.
pub fn split_syllable(syllable: &str) -> (&str, &str) {
    if STANDALONE_FINALS.contains(&syllable) {
        return ("", syllable);
    }
    if let Some(initial) = DOUBLE_INITIALS.iter().find(|i| syllable.starts_with(*i)) {
        return syllable.split_at(initial.len());
    }
    match syllable.chars().next() {
        Some(c) if is_single_initial(c) => syllable.split_at(1),
        _ => ("", syllable),
    }
}

/// Encodes one syllable.
/// `Ok(None)` means the token is punctuation and produces nothing.
pub fn encode_syllable(syllable: &str) -> Result<Option<String>, Skip> {
    if PUNCTUATION_TOKENS.contains(&syllable) {
        return Ok(None);
    }
    if PASSTHROUGH_RE.is_match(syllable) {
        return Ok(Some(String::from(syllable)));
    }

    let s = syllable.to_lowercase().replace('ü', "v").replace("u:", "v");
    let (initial, fin) = split_syllable(&s);
    let fin = lookup(&ABBREVIATIONS, fin).unwrap_or(fin);

    let initial_code = lookup(&INITIALS, initial)
        .ok_or_else(|| Skip::UnknownFinal(String::from(syllable)))?;
    let final_code = lookup(&FINALS, fin)
        .ok_or_else(|| Skip::UnknownFinal(String::from(syllable)))?;

    Ok(Some(format!("{}{}", initial_code, final_code)))
}

/// Encodes a syllable sequence, dropping syllables which cannot be encoded.
pub fn encode(syllables: &[String]) -> Vec<String> {
    syllables.iter().filter_map(|s| match encode_syllable(s) {
        Ok(code) => code,
        Err(e) => {
            log::debug!("{}", e);
            None
        }
    }).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn codes(syllables: &[&str]) -> Vec<String> {
        let v: Vec<String> = syllables.iter().map(|s| String::from(*s)).collect();
        encode(&v)
    }

    #[test]
    fn encodes_greeting() {
        assert_eq!(codes(&["ni", "hao"]), vec!["ni", "hc"]);
    }

    #[test]
    fn encodes_retroflex_initials() {
        assert_eq!(codes(&["zhong", "chang", "shi"]), vec!["vs", "ih", "ui"]);
        assert_eq!(codes(&["zhi", "chi", "ri"]), vec!["vi", "ii", "ri"]);
    }

    #[test]
    fn encodes_compound_finals() {
        assert_eq!(codes(&["xiang", "guang", "jiong"]), vec!["xl", "gl", "js"]);
        assert_eq!(codes(&["liao", "tian", "kuai", "huan"]), vec!["ln", "tm", "kk", "hr"]);
        assert_eq!(codes(&["you", "wei", "wen", "yuan"]), vec!["yz", "ww", "wf", "yr"]);
    }

    #[test]
    fn abbreviates_full_finals() {
        assert_eq!(codes(&["jiou", "duei", "luen"]), vec!["jq", "dv", "ly"]);
    }

    #[test]
    fn normalizes_umlaut() {
        assert_eq!(codes(&["lü", "nu:e", "lv", "lue"]), vec!["lv", "nt", "lv", "lt"]);
    }

    #[test]
    fn zero_initial_has_empty_code() {
        assert_eq!(codes(&["ai", "e", "ang", "er"]), vec!["d", "e", "h", "r"]);
        assert_eq!(split_syllable("ng"), ("", "ng"));
        assert_eq!(codes(&["ng"]), vec!["g"]);
    }

    #[test]
    fn passes_through_foreign_tokens() {
        assert_eq!(codes(&["123", "3.14", "A4", "iPhone", "mp3"]),
                   vec!["123", "3.14", "A4", "iPhone", "mp3"]);
    }

    #[test]
    fn drops_punctuation_tokens() {
        assert_eq!(codes(&["ni", "-", "·", "，", "/", "hao"]), vec!["ni", "hc"]);
    }

    #[test]
    fn skips_unknown_finals() {
        assert!(matches!(encode_syllable("m"), Err(Skip::UnknownFinal(_))));
        assert!(matches!(encode_syllable("bxyz"), Err(Skip::UnknownFinal(_))));
        assert_eq!(codes(&["ni", "m", "hao"]), vec!["ni", "hc"]);
    }

    #[test]
    fn splits_syllables() {
        assert_eq!(split_syllable("zhuang"), ("zh", "uang"));
        assert_eq!(split_syllable("hao"), ("h", "ao"));
        assert_eq!(split_syllable("ou"), ("", "ou"));
    }

    #[test]
    fn is_deterministic() {
        let s = crate::transcriber::transcribe("双拼输入法");
        assert_eq!(encode(&s), encode(&s));
        assert_eq!(encode(&s), vec!["ul", "pb", "uu", "ru", "fa"]);
    }
}
