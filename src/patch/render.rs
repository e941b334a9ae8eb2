//! Debug rendering of patches.

use super::patch::{Direction, Patch};
use std::fmt;

/// Renders `patch` as an indented tree for diagnostics.
///
/// Each line shows the variant, the delete flags and both directions'
/// values. Unchanged slots are left out. The output is meant for people;
/// it is not a stable format.
pub fn render(patch: &Patch) -> String {
    patch.to_string()
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_patch(f, self, 0)
    }
}

fn write_patch(f: &mut fmt::Formatter<'_>, patch: &Patch, indent: usize) -> fmt::Result {
    match patch {
        Patch::NoChange => f.write_str("no change"),
        Patch::Raw(raw) => write!(
            f,
            "raw delete_fwd={} delete_rev={} fwd={} rev={}",
            raw.delete_fwd, raw.delete_rev, raw.val_fwd, raw.val_rev
        ),
        Patch::Scalar(scalar) => write!(
            f,
            "{} fwd={} rev={}",
            scalar.kind(),
            scalar.value(Direction::Forward),
            scalar.value(Direction::Reverse)
        ),
        Patch::Array(array) => {
            write!(f, "array len_fwd={} len_rev={}", array.len_fwd, array.len_rev)?;
            for (i, slot) in array.elements.iter().enumerate() {
                if slot.is_no_change() {
                    continue;
                }
                write!(f, "\n{:width$}[{}]: ", "", i, width = (indent + 1) * 2)?;
                write_patch(f, slot, indent + 1)?;
            }
            Ok(())
        }
        Patch::Object(object) => {
            f.write_str("object")?;
            for (key, entry) in &object.entries {
                if entry.is_no_change() {
                    continue;
                }
                write!(f, "\n{:width$}.{}: ", "", key, width = (indent + 1) * 2)?;
                write_patch(f, entry, indent + 1)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::diff;
    use crate::value::from_json;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_no_change() {
        assert_eq!(render(&Patch::NoChange), "no change");
    }

    #[test]
    fn test_render_nested() {
        let a = from_json(r#"{"list": ["a", 1, "c"], "keep": 0, "gone": null}"#).unwrap();
        let b = from_json(r#"{"list": ["a", 2], "keep": 0}"#).unwrap();
        let expected = [
            "object",
            "  .gone: raw delete_fwd=true delete_rev=false fwd=nil rev=nil",
            "  .list: array len_fwd=2 len_rev=3",
            "    [1]: number fwd=2 rev=1",
            "    [2]: raw delete_fwd=true delete_rev=false fwd=nil rev=\"c\"",
        ]
        .join("\n");
        assert_eq!(render(&diff(&a, &b).unwrap()), expected);
    }

    #[test]
    fn test_render_root_raw() {
        let patch = diff(&from_json("[1]").unwrap(), &from_json(r#""x""#).unwrap()).unwrap();
        assert_eq!(
            patch.to_string(),
            "raw delete_fwd=false delete_rev=false fwd=\"x\" rev=[1]"
        );
    }
}
