
// Renders candidates and their pinyin for each input method.

use clap::ValueEnum;

use super::classifier::is_cjk_only;
use super::flypy;


/// A candidate with its pinyin. `syllables` is `None` when the pinyin did not
/// align, such entries only appear in the pure text output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub text: String,
    pub syllables: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Restrict the rime target to CJK-only candidates.
    pub rime_cjk_only: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Target {
    /// `text syl'syl`
    Ime,
    /// `text`, CJK-only candidates
    Only,
    /// `text sylsyl 0`
    Rime,
    /// `text CODECODE`, flypy double pinyin
    RimeFlypy,
    /// `text syl'syl 1`
    Shouxing,
    /// `syl'syl text 1`
    Qq,
}

impl Target {
    pub const ALL: [Target; 6] = [
        Target::Ime, Target::Only, Target::Rime,
        Target::RimeFlypy, Target::Shouxing, Target::Qq,
    ];

    /// Appended to the output prefix.
    pub fn suffix(self) -> &'static str {
        match self {
            Target::Ime => "_ime.txt",
            Target::Only => "_only.txt",
            Target::Rime => "_rime.txt",
            Target::RimeFlypy => "_rime_flypy.txt",
            Target::Shouxing => "_shouxing.txt",
            Target::Qq => "_qq.txt",
        }
    }

    pub fn render(self, entries: &[Entry], options: &RenderOptions) -> Vec<String> {
        if self == Target::Only {
            return entries.iter()
                .filter(|e| is_cjk_only(&e.text))
                .map(|e| e.text.clone())
                .collect();
        }

        let cjk_only = match self {
            Target::Ime => false,
            Target::Rime => options.rime_cjk_only,
            _ => true,
        };

        entries.iter().filter_map(|e| {
            let syllables = e.syllables.as_ref()?;
            if cjk_only && !is_cjk_only(&e.text) {
                return None;
            }
            self.render_entry(&e.text, syllables)
        }).collect()
    }

    fn render_entry(self, text: &str, syllables: &[String]) -> Option<String> {
        if syllables.is_empty() {
            return None;
        }
        let line = match self {
            Target::Ime => format!("{} {}", text, syllables.join("'")),
            Target::Rime => format!("{} {} 0", text, syllables.concat()),
            Target::RimeFlypy => {
                let codes = flypy::encode(syllables);
                if codes.is_empty() {
                    return None;
                }
                format!("{} {}", text, codes.concat())
            }
            Target::Shouxing => format!("{} {} 1", text, syllables.join("'")),
            Target::Qq => format!("{} {} 1", syllables.join("'"), text),
            Target::Only => String::from(text),
        };
        Some(line)
    }
}
