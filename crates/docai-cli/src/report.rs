//! Tagged progress lines on standard output.

use std::fmt::Display;

use console::style;

const RULE_WIDTH: usize = 60;

/// Prints human-readable status lines prefixed with a mode tag such as `[OCR]`.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    tag: &'static str,
}

impl Reporter {
    /// Single-file mode.
    pub const OCR: Reporter = Reporter { tag: "OCR" };
    /// Batch and configuration modes.
    pub const DOCAI: Reporter = Reporter { tag: "DOCAI" };

    pub fn prefix(&self) -> String {
        format!("[{}]", self.tag)
    }

    /// Title framed by horizontal rules.
    pub fn banner(&self, title: impl Display) {
        let rule = "=".repeat(RULE_WIDTH);
        println!("{}", rule);
        println!("{} {}", self.prefix(), title);
        println!("{}", rule);
    }

    pub fn info(&self, msg: impl Display) {
        println!("{} {}", self.prefix(), msg);
    }

    pub fn ok(&self, msg: impl Display) {
        println!("{} {} {}", self.prefix(), style("[OK]").green(), msg);
    }

    pub fn warn(&self, msg: impl Display) {
        println!("{} {} {}", self.prefix(), style("[WARN]").yellow(), msg);
    }

    pub fn error(&self, msg: impl Display) {
        println!("{} {} {}", self.prefix(), style("[ERROR]").red(), msg);
    }

    pub fn fatal(&self, msg: impl Display) {
        println!("{} {} {}", self.prefix(), style("[FATAL]").red().bold(), msg);
    }

    pub fn done(&self, msg: impl Display) {
        println!("{} {} {}", self.prefix(), style("[DONE]").green(), msg);
    }
}
