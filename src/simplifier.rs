
// Traditional to simplified conversion, consumed through a narrow trait so the
// normalizer does not depend on a particular converter.

use std::panic::{catch_unwind, AssertUnwindSafe};

use opencc_jieba_rs::OpenCC;

use super::error::Skip;


pub trait Simplifier {
    /// Converts traditional characters to simplified ones.
    fn simplify(&self, text: &str) -> Result<String, Skip>;
}

/// OpenCC `t2s` conversion.
pub struct OpenCcSimplifier {
    opencc: OpenCC,
}

impl OpenCcSimplifier {
    pub fn new() -> OpenCcSimplifier {
        OpenCcSimplifier { opencc: OpenCC::new() }
    }
}

impl Simplifier for OpenCcSimplifier {
    fn simplify(&self, text: &str) -> Result<String, Skip> {
        // The converter panics on a few malformed inputs; treat it as a failed item.
        catch_unwind(AssertUnwindSafe(|| self.opencc.t2s(text, false)))
            .map_err(|_| Skip::Conversion(String::from(text)))
    }
}

/// Leaves the text untouched, used with `--no-simplify`.
pub struct Passthrough;

impl Simplifier for Passthrough {
    fn simplify(&self, text: &str) -> Result<String, Skip> {
        Ok(String::from(text))
    }
}
