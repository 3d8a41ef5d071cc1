//! Moving indented rules out by whole indentation levels.

use crate::tree::{NodeId, Stylesheet};

/// Remove `degree` levels of indentation from the `before` and `after` raws
/// of `node` and every node below it.
///
/// An indentation level is two spaces or one tab. In each raw, the first run
/// of `degree` consecutive levels is removed; raws without such a run are
/// left alone.
///
/// ```
/// use bemflat_syntax::{outdent, parse_stylesheet};
///
/// let mut sheet = parse_stylesheet(".a {\n    color: red;\n  }").unwrap();
/// let root = sheet.root();
/// outdent(&mut sheet, root, 1);
/// assert_eq!(sheet.to_string(), ".a {\n  color: red;\n}");
/// ```
pub fn outdent(sheet: &mut Stylesheet, node: NodeId, degree: usize) {
    let mut targets = vec![node];
    targets.extend(sheet.descendants(node));

    for id in targets {
        if let Some(raws) = sheet.raws_mut(id) {
            raws.before = strip_indent(&raws.before, degree);
            raws.after = strip_indent(&raws.after, degree);
        }
    }
}

/// Remove the leftmost run of `degree` indentation units from `raw`.
fn strip_indent(raw: &str, degree: usize) -> String {
    if degree == 0 {
        return raw.to_string();
    }
    for (start, _) in raw.char_indices() {
        let mut end = start;
        let mut units = 0;
        while units < degree {
            let rest = &raw[end..];
            if rest.starts_with("  ") {
                end += 2;
            } else if rest.starts_with('\t') {
                end += 1;
            } else {
                break;
            }
            units += 1;
        }
        if units == degree {
            return format!("{}{}", &raw[..start], &raw[end..]);
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_indent_first_run_only() {
        assert_eq!(strip_indent("\n      ", 2), "\n  ");
        assert_eq!(strip_indent("\n\t\t", 1), "\n\t");
        assert_eq!(strip_indent("\n ", 1), "\n ");
        assert_eq!(strip_indent("", 1), "");
        assert_eq!(strip_indent("\n    ", 0), "\n    ");
    }
}
