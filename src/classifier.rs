
// Decides whether a line or segment may become a dictionary candidate.
// Every rule is a named predicate; a line is admissible when no rule rejects it.

use once_cell::sync::Lazy;
use regex::Regex;


static ONLY_ALPHABET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").unwrap());
static ONLY_DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());
static FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+$").unwrap());
static ALPHANUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());
static ASCII_PUNCT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9[:punct:]\s]+$").unwrap());

/// Runs removed by `strip_foreign_runs`, applied in this order until nothing changes.
static FOREIGN_RUNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"[0-9]+\.[0-9]+",
        r"[a-zA-Z]+",
        r"[a-zA-Z0-9]+",
        r"[0-9]+",
        r"[a-zA-Z0-9[:punct:]]+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

/// Leading symbols marking a comment line.
pub const COMMENT_MARKERS: [&str; 3] = ["#", "//", "%"];

/// CJK punctuation which disqualifies a candidate from the CJK-only targets.
pub const CJK_PUNCTUATION: &str = "，。！？；：、“”‘’（）《》【】「」『』〈〉…—·・～";


/// A named rejection predicate over a trimmed line.
pub struct Rule {
    pub name: &'static str,
    pub rejects: fn(&str) -> bool,
}

/// Rejection rules, cheapest first.
pub const RULES: [Rule; 10] = [
    Rule { name: "empty", rejects: is_empty },
    Rule { name: "comment", rejects: is_comment },
    Rule { name: "alphabet", rejects: is_alphabet },
    Rule { name: "digits", rejects: is_digits },
    Rule { name: "float", rejects: is_float },
    Rule { name: "alphanumeric", rejects: is_alphanumeric },
    Rule { name: "ascii-punctuation", rejects: is_ascii_with_punctuation },
    Rule { name: "no-ideograph", rejects: has_no_ideograph },
    Rule { name: "kana", rejects: has_kana },
    // Backstop only: an empty residue means no ideograph, which no-ideograph rejects first.
    Rule { name: "foreign-residue", rejects: has_only_foreign_runs },
];


#[inline]
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Hiragana and katakana, including halfwidth forms.
/// U+30FB is left out since it is used as a middle dot in Chinese text too.
#[inline]
pub fn is_kana(c: char) -> bool {
    match c {
        '\u{30FB}' => false,
        '\u{3040}'..='\u{309F}' | '\u{30A0}'..='\u{30FF}' |
        '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => true,
        _ => false,
    }
}

/// True when the text consists of CJK ideographs only.
pub fn is_cjk_only(text: &str) -> bool {
    !text.is_empty()
        && !text.chars().any(|c| CJK_PUNCTUATION.contains(c))
        && text.chars().all(is_cjk_ideograph)
}

fn is_empty(line: &str) -> bool {
    line.is_empty()
}

fn is_comment(line: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| line.starts_with(m))
}

/// Also used to count English lines.
pub fn is_alphabet(line: &str) -> bool {
    ONLY_ALPHABET_RE.is_match(line)
}

fn is_digits(line: &str) -> bool {
    ONLY_DIGITS_RE.is_match(line)
}

fn is_float(line: &str) -> bool {
    FLOAT_RE.is_match(line)
}

fn is_alphanumeric(line: &str) -> bool {
    ALPHANUMERIC_RE.is_match(line)
}

fn is_ascii_with_punctuation(line: &str) -> bool {
    ASCII_PUNCT_RE.is_match(line)
}

fn has_no_ideograph(line: &str) -> bool {
    !line.chars().any(is_cjk_ideograph)
}

fn has_kana(line: &str) -> bool {
    line.chars().any(is_kana)
}

fn has_only_foreign_runs(line: &str) -> bool {
    strip_foreign_runs(line).trim().is_empty()
}

/// Removes ASCII letter, digit, float and punctuation runs until the line stops changing.
pub fn strip_foreign_runs(line: &str) -> String {
    let mut s = String::from(line);
    loop {
        let before = s.len();
        for re in FOREIGN_RUNS.iter() {
            if re.is_match(&s) {
                s = re.replace_all(&s, "").into_owned();
            }
        }
        if s.len() == before {
            return s;
        }
    }
}

/// Returns the name of the first rule rejecting the line.
pub fn rejection(line: &str) -> Option<&'static str> {
    let line = line.trim();
    RULES.iter().find(|rule| (rule.rejects)(line)).map(|rule| rule.name)
}

pub fn is_admissible(line: &str) -> bool {
    rejection(line).is_none()
}
