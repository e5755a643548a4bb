
// Turns a raw corpus line into zero or more candidate strings.

use clap::ValueEnum;
use once_cell::sync::Lazy;
use regex::Regex;

use super::classifier::{is_cjk_ideograph, rejection};
use super::error::Skip;
use super::simplifier::Simplifier;


/// Whitespace plus ASCII and CJK sentence and clause punctuation.
static DELIMITER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\s,，.。?？!！:：;；'"‘’“”、()\[\]<>「」『』〈〉·・…]+"#).unwrap()
});

/// Removed literally before splitting and again from every segment.
pub const DECORATIONS: [&str; 8] = ["♂", "♀", "《", "》", "【", "】", "（", "）"];


/// Which of a line's valid segments become candidates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Aggregation {
    /// Every valid segment.
    All,
    /// Only the last valid segment, earlier ones are dropped.
    Last,
}

pub struct Normalizer<S: Simplifier> {
    simplifier: S,
    aggregation: Aggregation,
}

impl<S: Simplifier> Normalizer<S> {
    pub fn new(simplifier: S, aggregation: Aggregation) -> Normalizer<S> {
        Normalizer { simplifier, aggregation }
    }

    /// Normalizes one line. Returns `Err` only when the whole line is rejected,
    /// an admissible line may still give no candidates.
    pub fn normalize(&self, line: &str) -> Result<Vec<String>, Skip> {
        let line = line.trim();
        if let Some(rule) = rejection(line) {
            return Err(Skip::Inadmissible(rule));
        }

        let line = strip_decorations(line);

        let mut candidates = Vec::new();
        for segment in split_segments(&line) {
            match self.normalize_segment(segment) {
                Ok(s) => {
                    if self.aggregation == Aggregation::Last {
                        candidates.clear();
                    }
                    candidates.push(s);
                }
                Err(e) => log::trace!("segment {:?} skipped: {}", segment, e),
            }
        }
        Ok(candidates)
    }

    fn normalize_segment(&self, segment: &str) -> Result<String, Skip> {
        let mut s = strip_oo(&segment.replace(' ', ""));
        s = strip_decorations(&s);

        s = match self.simplifier.simplify(&s) {
            Ok(simplified) => simplified,
            Err(e) => {
                log::debug!("{}", e);
                s
            }
        };

        // Dropping symbols may join two "o"s again.
        let s = strip_oo(&keep_admissible_chars(&s));
        match rejection(&s) {
            Some(rule) => Err(Skip::Inadmissible(rule)),
            None => Ok(s),
        }
    }
}

/// Removes "oo" until none is left.
pub fn strip_oo(s: &str) -> String {
    let mut s = String::from(s);
    while s.contains("oo") {
        s = s.replace("oo", "");
    }
    s
}

pub fn strip_decorations(s: &str) -> String {
    let mut s = String::from(s);
    for d in DECORATIONS.iter() {
        if s.contains(d) {
            s = s.replace(d, "");
        }
    }
    s
}

/// Splits on delimiters, returning trimmed non-empty segments.
pub fn split_segments(line: &str) -> impl Iterator<Item = &str> {
    DELIMITER_RE.split(line).map(str::trim).filter(|s| !s.is_empty())
}

/// Keeps ASCII letters and digits, CJK ideographs and the fullwidth comma.
pub fn keep_admissible_chars(s: &str) -> String {
    s.chars()
     .filter(|&c| c.is_ascii_alphanumeric() || is_cjk_ideograph(c) || c == '，')
     .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{is_cjk_ideograph, is_kana};
    use crate::simplifier::{OpenCcSimplifier, Passthrough};

    fn plain(aggregation: Aggregation) -> Normalizer<Passthrough> {
        Normalizer::new(Passthrough, aggregation)
    }

    #[test]
    fn splits_on_punctuation_and_drops_ascii() {
        let n = plain(Aggregation::All);
        assert_eq!(n.normalize("你好，世界！Hello123").unwrap(), vec!["你好", "世界"]);
    }

    #[test]
    fn keeps_only_last_segment() {
        let n = plain(Aggregation::Last);
        assert_eq!(n.normalize("你好，世界！Hello123").unwrap(), vec!["世界"]);
        assert_eq!(n.normalize("第一句。第二句。english").unwrap(), vec!["第二句"]);
    }

    #[test]
    fn rejects_whole_line() {
        let n = plain(Aggregation::All);
        assert!(matches!(n.normalize("12345"), Err(Skip::Inadmissible("digits"))));
        assert!(matches!(n.normalize("ありがとう"), Err(Skip::Inadmissible(_))));
        assert!(matches!(n.normalize("# 你好"), Err(Skip::Inadmissible("comment"))));
    }

    #[test]
    fn strips_decorations_without_splitting() {
        let n = plain(Aggregation::All);
        assert_eq!(n.normalize("《三体》【科幻】").unwrap(), vec!["三体科幻"]);
        assert_eq!(n.normalize("♂男生♀女生").unwrap(), vec!["男生女生"]);
    }

    #[test]
    fn removes_oo_and_filters_symbols() {
        let n = plain(Aggregation::All);
        assert_eq!(n.normalize("好oo的").unwrap(), vec!["好的"]);
        assert_eq!(n.normalize("价格￥100元").unwrap(), vec!["价格100元"]);
        assert_eq!(n.normalize("a-b中文").unwrap(), vec!["ab中文"]);
    }

    #[test]
    fn keeps_mixed_alphanumeric_segments() {
        let n = plain(Aggregation::All);
        assert_eq!(n.normalize("用iPhone拍照").unwrap(), vec!["用iPhone拍照"]);
        assert_eq!(n.normalize("中文 abc 123").unwrap(), vec!["中文"]);
    }

    #[test]
    fn converts_to_simplified() {
        let n = Normalizer::new(OpenCcSimplifier::new(), Aggregation::All);
        assert_eq!(n.normalize("漢字，繁體").unwrap(), vec!["汉字", "繁体"]);
    }

    #[test]
    fn normalization_is_a_projection() {
        let n = plain(Aggregation::All);
        let lines = [
            "你好，世界！Hello123",
            "《三体》第2部：黑暗森林",
            "用iPhone拍照 (2020)",
            "价格￥100元；折扣3.5折",
            "o￥o中文",
            "o-o好的",
            "go-od中文",
        ];
        for line in lines.iter() {
            for candidate in n.normalize(line).unwrap() {
                assert_eq!(n.normalize(&candidate).unwrap(), vec![candidate.clone()]);
            }
        }
    }

    #[test]
    fn symbols_between_os_are_removed_with_them() {
        let n = plain(Aggregation::All);
        assert_eq!(n.normalize("o￥o中文").unwrap(), vec!["中文"]);
        assert_eq!(n.normalize("o-o好的").unwrap(), vec!["好的"]);
        assert_eq!(n.normalize("go-od中文").unwrap(), vec!["gd中文"]);
        assert_eq!(strip_oo("ooooo好"), "o好");
    }

    struct Failing;

    impl Simplifier for Failing {
        fn simplify(&self, text: &str) -> Result<String, Skip> {
            Err(Skip::Conversion(String::from(text)))
        }
    }

    #[test]
    fn keeps_text_when_conversion_fails() {
        let n = Normalizer::new(Failing, Aggregation::All);
        assert_eq!(n.normalize("漢字，你好").unwrap(), vec!["漢字", "你好"]);
    }

    #[test]
    fn candidates_hold_the_invariant() {
        let n = plain(Aggregation::All);
        for line in ["混合 mixed テキスト 文本", "数字123和字母abc", "…—…"].iter() {
            if let Ok(candidates) = n.normalize(line) {
                for c in candidates {
                    assert!(c.chars().any(is_cjk_ideograph));
                    assert!(!c.chars().any(is_kana));
                }
            }
        }
    }
}
