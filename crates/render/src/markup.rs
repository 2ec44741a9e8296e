//! Color markup of the supported bars

use statline_core::Fragment;
use statline_types::{ColorPalette, HexColor, OutputFormat};

/// Plain-text separator placed between two entries
pub const PLAIN_SEPARATOR: &str = " | ";

/// Markup dialect of one output format, with the configured palette
#[derive(Debug, Clone)]
pub struct Markup {
    format: OutputFormat,
    palette: ColorPalette,
    colors: bool,
}

impl Markup {
    /// `format` should already be resolved; `Auto` renders like `None`.
    pub fn new(format: OutputFormat, palette: ColorPalette, colors: bool) -> Self {
        if format == OutputFormat::Auto {
            log::debug!("Output format 'auto' reached the renderer, using plain text");
        }
        Self {
            format,
            palette,
            colors,
        }
    }

    /// Append one fragment, wrapped in its color when colors are enabled
    pub fn push_fragment(&self, line: &mut String, fragment: &Fragment) {
        let color = if self.colors {
            self.palette.resolve(fragment.color)
        } else {
            None
        };

        match color {
            Some(color) => self.push_colored(line, color, &fragment.text),
            None => line.push_str(&fragment.text),
        }
    }

    /// Append the separator between two entries.
    ///
    /// Markup formats always draw it in the separator color, independent of
    /// the `colors` switch.
    pub fn push_separator(&self, line: &mut String) {
        let color = self.palette.separator.as_str();
        match self.format {
            OutputFormat::Dzen2 => {
                line.push_str("^fg(");
                line.push_str(color);
                line.push_str(")^p(5;-2)^ro(2)^p()^fg()^p(5)");
            }
            OutputFormat::Xmobar => {
                line.push_str("<fc=");
                line.push_str(color);
                line.push('>');
                line.push_str(PLAIN_SEPARATOR);
                line.push_str("</fc>");
            }
            OutputFormat::None | OutputFormat::Auto => line.push_str(PLAIN_SEPARATOR),
        }
    }

    fn push_colored(&self, line: &mut String, color: &HexColor, text: &str) {
        match self.format {
            OutputFormat::Dzen2 => {
                line.push_str("^fg(");
                line.push_str(color.as_str());
                line.push(')');
                line.push_str(text);
                line.push_str("^fg()");
            }
            OutputFormat::Xmobar => {
                line.push_str("<fc=");
                line.push_str(color.as_str());
                line.push('>');
                line.push_str(text);
                line.push_str("</fc>");
            }
            OutputFormat::None | OutputFormat::Auto => line.push_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> ColorPalette {
        ColorPalette {
            good: HexColor::parse("#00FF00").unwrap(),
            degraded: HexColor::parse("#FFFF00").unwrap(),
            bad: HexColor::parse("#FF0000").unwrap(),
            separator: HexColor::parse("#333333").unwrap(),
        }
    }

    fn render(markup: &Markup, fragment: Fragment) -> String {
        let mut line = String::new();
        markup.push_fragment(&mut line, &fragment);
        line
    }

    #[test]
    fn test_dzen2_colors() {
        let markup = Markup::new(OutputFormat::Dzen2, palette(), true);
        assert_eq!(render(&markup, Fragment::good("up")), "^fg(#00FF00)up^fg()");
        assert_eq!(render(&markup, Fragment::neutral("1.00")), "1.00");
    }

    #[test]
    fn test_xmobar_colors() {
        let markup = Markup::new(OutputFormat::Xmobar, palette(), true);
        assert_eq!(render(&markup, Fragment::bad("down")), "<fc=#FF0000>down</fc>");
    }

    #[test]
    fn test_colors_disabled() {
        let markup = Markup::new(OutputFormat::Xmobar, palette(), false);
        assert_eq!(render(&markup, Fragment::degraded("BAT 20%")), "BAT 20%");
    }

    #[test]
    fn test_plain_never_colors() {
        let markup = Markup::new(OutputFormat::None, palette(), true);
        assert_eq!(render(&markup, Fragment::good("up")), "up");
    }

    #[test]
    fn test_separators() {
        let mut line = String::new();
        Markup::new(OutputFormat::Dzen2, palette(), false).push_separator(&mut line);
        assert_eq!(line, "^fg(#333333)^p(5;-2)^ro(2)^p()^fg()^p(5)");

        let mut line = String::new();
        Markup::new(OutputFormat::Xmobar, palette(), true).push_separator(&mut line);
        assert_eq!(line, "<fc=#333333> | </fc>");

        let mut line = String::new();
        Markup::new(OutputFormat::None, palette(), true).push_separator(&mut line);
        assert_eq!(line, " | ");
    }
}
