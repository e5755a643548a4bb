
// Chinese to pinyin, one toneless syllable per character.

use pinyin::ToPinyin;

use super::error::Skip;


/// Returns one syllable per Chinese character.
/// Characters without a reading are grouped by consecutive runs and passed
/// through as a single token, so such text may not align with its syllables.
pub fn transcribe(text: &str) -> Vec<String> {
    let mut syllables = Vec::with_capacity(text.len() / 3 + 1);
    let mut run = String::new();

    for c in text.chars() {
        match c.to_pinyin() {
            Some(p) => {
                if !run.is_empty() {
                    syllables.push(std::mem::take(&mut run));
                }
                syllables.push(p.plain().replace('ü', "v"));
            }
            None => run.push(c),
        }
    }
    if !run.is_empty() {
        syllables.push(run);
    }
    syllables
}

/// Syllables of a candidate, only when they align one-to-one with its characters.
pub fn syllables(text: &str) -> Result<Vec<String>, Skip> {
    let syllables = transcribe(text);
    if syllables.is_empty() || syllables.iter().any(|s| s.is_empty()) {
        return Err(Skip::EmptyPinyin);
    }

    let chars = text.chars().count();
    if syllables.len() != chars {
        return Err(Skip::Misaligned { chars, syllables: syllables.len() });
    }
    Ok(syllables)
}
