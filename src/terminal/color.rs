//! Color names for the first 16 palette entries.

/// Resolve a color name to its 256-color palette index.
///
/// Matching ignores case, spaces, dashes and underscores, so `"brightRed"`,
/// `"bright-red"` and `"Bright Red"` are the same color.
///
/// ```
/// assert_eq!(cellblit::terminal::color_index("white"), Some(7));
/// assert_eq!(cellblit::terminal::color_index("bright_cyan"), Some(14));
/// assert_eq!(cellblit::terminal::color_index("mauve"), None);
/// ```
pub fn color_index(name: &str) -> Option<u8> {
    let key: String = name
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect();

    let index = match key.as_str() {
        "black" => 0,
        "red" => 1,
        "green" => 2,
        "yellow" => 3,
        "blue" => 4,
        "magenta" | "violet" => 5,
        "cyan" => 6,
        "white" => 7,
        "grey" | "gray" | "brightblack" => 8,
        "brightred" => 9,
        "brightgreen" => 10,
        "brightyellow" => 11,
        "brightblue" => 12,
        "brightmagenta" | "brightviolet" => 13,
        "brightcyan" => 14,
        "brightwhite" => 15,
        _ => return None,
    };

    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_names() {
        assert_eq!(color_index("black"), Some(0));
        assert_eq!(color_index("RED"), Some(1));
        assert_eq!(color_index("violet"), Some(5));
    }

    #[test]
    fn test_bright_spellings() {
        assert_eq!(color_index("brightYellow"), Some(11));
        assert_eq!(color_index("bright yellow"), Some(11));
        assert_eq!(color_index("gray"), Some(8));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(color_index(""), None);
        assert_eq!(color_index("ultraviolet"), None);
    }
}
