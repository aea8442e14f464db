//! Command line interface.

use clap::Parser;

/// mct - fill the screen with one solid color to spot dust, smudges and dead
/// pixels. Right- or middle-click anywhere for the color menu.
#[derive(Parser, Debug)]
#[command(name = "mct")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Initial color: black, white, red, green, blue, cyan, magenta, yellow,
    /// or a hex spec such as #0a0a0a. Unknown colors fall back to black.
    #[arg(value_name = "COLOR", default_value = "black")]
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_defaults_to_black() {
        let args = Args::try_parse_from(["mct"]).unwrap();
        assert_eq!(args.color, "black");
    }

    #[test]
    fn single_positional_color() {
        let args = Args::try_parse_from(["mct", "red"]).unwrap();
        assert_eq!(args.color, "red");
        // Validation happens when the color is applied, not at parse time.
        let args = Args::try_parse_from(["mct", "notacolor"]).unwrap();
        assert_eq!(args.color, "notacolor");
    }

    #[test]
    fn rejects_extra_arguments() {
        assert!(Args::try_parse_from(["mct", "red", "blue"]).is_err());
        assert!(Args::try_parse_from(["mct", "--alpha", "0.5"]).is_err());
    }
}
