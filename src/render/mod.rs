/// Text rendering of annotation and toleration sets.
pub mod annotations;
pub mod tabs;
pub mod tolerations;

pub use annotations::render_annotations;
pub use tabs::pretty_tabs;
pub use tolerations::render_tolerations;

/// Gap between the key and value columns of every pretty table.
pub const COLUMN_GAP: usize = 6;

/// Layout of a rendered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFormat {
    /// `=== <group> <Label>` header followed by an aligned two-column table.
    #[default]
    Pretty,
    /// One line per group.
    Oneline,
    /// `<group>:` followed by indented `key=value` lines.
    Diff,
}

impl ListFormat {
    /// Pick the layout from the `--oneline` / `--diff` list flags.
    #[must_use]
    pub fn from_flags(oneline: bool, diff: bool) -> Self {
        if oneline {
            Self::Oneline
        } else if diff {
            Self::Diff
        } else {
            Self::Pretty
        }
    }
}
