use owo_colors::OwoColorize;
use owo_colors::Style;
use std::fmt;
use supports_color::Stream;

use crate::catalog;
use crate::cfg::ColorOption;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Styler {
    pub(crate) colorize: bool,
}

impl Styler {
    pub(crate) fn new(when: ColorOption) -> Self {
        let colorize = match when {
            ColorOption::Always => true,
            ColorOption::Auto => {
                supports_color::on(Stream::Stdout).is_some() || std::env::var("CI").is_ok()
            }
            ColorOption::Never => false,
        };
        Self { colorize }
    }

    pub(crate) fn level(self, level: &str) -> LevelDisplay<'_> {
        LevelDisplay {
            styler: self,
            level,
        }
    }

    fn level_style(&self, level: &str) -> Style {
        if !self.colorize {
            return Style::new();
        }
        // Unknown level names stay uncolored.
        match catalog::level_entry(level) {
            Some(entry) => Style::new().color(entry.color),
            None => Style::new(),
        }
    }
}

/// Renders a level as an uppercased, catalog-colored `[LEVEL]` tag.
pub(crate) struct LevelDisplay<'a> {
    styler: Styler,
    level: &'a str,
}

impl fmt::Display for LevelDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = format!("[{}]", self.level.to_ascii_uppercase());
        write!(f, "{}", tag.style(self.styler.level_style(self.level)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_emits_plain_tags() {
        let styler = Styler::new(ColorOption::Never);
        assert_eq!(format!("{}", styler.level("error")), "[ERROR]");
        assert_eq!(format!("{}", styler.level("info")), "[INFO]");
    }

    #[test]
    fn always_wraps_tags_in_the_catalog_color() {
        let styler = Styler::new(ColorOption::Always);
        assert_eq!(
            format!("{}", styler.level("error")),
            "\u{1b}[31m[ERROR]\u{1b}[0m"
        );
        assert_eq!(
            format!("{}", styler.level("debug")),
            "\u{1b}[34m[DEBUG]\u{1b}[0m"
        );
    }

    #[test]
    fn unknown_levels_are_left_uncolored() {
        let styler = Styler::new(ColorOption::Always);
        assert_eq!(format!("{}", styler.level("fatal")), "[FATAL]");
    }
}
