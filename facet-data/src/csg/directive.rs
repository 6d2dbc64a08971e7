//! Recognition of `color([r, g, b, a]);` directives in flattened CSG.

use crate::colour::Rgba;

/// Return the bracketed value list if `line` is a colour directive.
///
/// A directive is `color([` followed by a non-empty run of digits, dots,
/// commas and spaces, then `]);`. Leading indentation and anything after the
/// closing `);` are ignored. Every other line is opaque payload.
pub fn match_colour_directive(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix("color([")?;
    let end = rest.find("]);")?;
    let values = &rest[..end];
    let well_formed = !values.is_empty()
        && values
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | ' '));
    well_formed.then_some(values)
}

/// Parse the value list captured by [`match_colour_directive`].
///
/// Returns `None` when a value is not a valid float or the list does not hold
/// three or four values.
pub fn parse_colour_components(values: &str) -> Option<Rgba> {
    let components = values
        .split(',')
        .map(|v| v.trim().parse::<f32>().ok())
        .collect::<Option<Vec<f32>>>()?;
    Rgba::from_components(&components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_plain_directive() {
        assert_eq!(match_colour_directive("color([1,0,0]);\n"), Some("1,0,0"));
        assert_eq!(
            match_colour_directive("color([0.5, 0.25, 1, 0.75]);"),
            Some("0.5, 0.25, 1, 0.75")
        );
    }

    #[test]
    fn test_matches_indented_directive() {
        assert_eq!(match_colour_directive("\t\tcolor([1, 1, 0]);\n"), Some("1, 1, 0"));
    }

    #[test]
    fn test_rejects_other_statements() {
        assert_eq!(match_colour_directive("cube(size = [1, 1, 1], center = false);"), None);
        assert_eq!(match_colour_directive("color([1, 0, 0, 1]) {"), None);
        assert_eq!(match_colour_directive("color(\"red\");"), None);
        assert_eq!(match_colour_directive("color([]);"), None);
        // Negative values fall outside the directive alphabet.
        assert_eq!(match_colour_directive("color([-1, 0, 0]);"), None);
    }

    #[test]
    fn test_parse_components() {
        let c = parse_colour_components("0, 0.5, 1").unwrap();
        assert_eq!(c, Rgba([0.0, 0.5, 1.0, 1.0]));
    }

    #[test]
    fn test_parse_malformed_number() {
        assert!(parse_colour_components("1..0, 0, 0").is_none());
        assert!(parse_colour_components("1,,0").is_none());
        assert!(parse_colour_components("1 0, 0, 0").is_none());
    }

    #[test]
    fn test_parse_wrong_arity() {
        assert!(parse_colour_components("1, 0").is_none());
    }
}
