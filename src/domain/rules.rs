/// Cell edit rules for the two action buttons — truth-table driven.
///
/// Pure functions: given the current mark and the active tool, they return
/// the new mark, or None when the press is ignored. The caller performs the
/// write and the tile patch; nothing here has side effects.
///
/// ### Confirm (A), primary tool P
/// ┌─────────────────────┬────────────┐
/// │ cell state          │ result     │
/// ├─────────────────────┼────────────┤
/// │ Empty               │ P's mark   │
/// │ Fill                │ Empty      │
/// │ anything else       │ ignored    │
/// └─────────────────────┴────────────┘
///
/// ### Alt-confirm (B), secondary tool S = partner(P)
/// ┌─────────────────────┬────────────┐
/// │ cell state          │ result     │
/// ├─────────────────────┼────────────┤
/// │ Empty               │ S's mark   │
/// │ == S's mark         │ ignored    │
/// │ anything else       │ Empty      │
/// └─────────────────────┴────────────┘
///
/// Note the deliberate asymmetry: A clears only Fill marks, B clears
/// anything that is not its own mark.

use super::tile::{CellMark, Tool};

/// A-button edit. `primary` is the active tool.
pub fn confirm(cell: CellMark, primary: Tool) -> Option<CellMark> {
    if cell == CellMark::Empty {
        Some(primary.mark())
    } else if cell == CellMark::Fill {
        Some(CellMark::Empty)
    } else {
        // Cell holds the other tool's mark: ignore the command.
        None
    }
}

/// B-button edit. `secondary` is the partner of the active tool.
pub fn alt_confirm(cell: CellMark, secondary: Tool) -> Option<CellMark> {
    if cell == CellMark::Empty {
        Some(secondary.mark())
    } else if cell != secondary.mark() {
        Some(CellMark::Empty)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── A button ──

    #[test]
    fn confirm_cycles_empty_fill_empty() {
        let first = confirm(CellMark::Empty, Tool::Fill).unwrap();
        assert_eq!(first, CellMark::Fill);
        let second = confirm(first, Tool::Fill).unwrap();
        assert_eq!(second, CellMark::Empty);
    }

    #[test]
    fn confirm_places_stamp_when_primary_is_stamp() {
        assert_eq!(confirm(CellMark::Empty, Tool::Stamp), Some(CellMark::Stamp));
    }

    #[test]
    fn confirm_ignores_foreign_stamp() {
        // Primary is Fill; the cell holds the other tool's mark.
        assert_eq!(confirm(CellMark::Stamp, Tool::Fill), None);
        // The same rule ignores a stamp even when Stamp is primary.
        assert_eq!(confirm(CellMark::Stamp, Tool::Stamp), None);
    }

    #[test]
    fn confirm_clears_fill_regardless_of_primary() {
        assert_eq!(confirm(CellMark::Fill, Tool::Stamp), Some(CellMark::Empty));
    }

    // ── B button ──

    #[test]
    fn alt_confirm_cycles_with_secondary() {
        // primary = Fill → secondary = Stamp
        let s = Tool::Fill.partner();
        let first = alt_confirm(CellMark::Empty, s).unwrap();
        assert_eq!(first, CellMark::Stamp);
        let second = alt_confirm(first, s);
        assert_eq!(second, None);
    }

    #[test]
    fn alt_confirm_clears_foreign_marks() {
        let s = Tool::Fill.partner();
        assert_eq!(alt_confirm(CellMark::Fill, s), Some(CellMark::Empty));
    }

    #[test]
    fn a_then_b_never_double_marks() {
        // Whatever A placed, B on the same cell must clear or ignore,
        // never overwrite with its own mark.
        for primary in [Tool::Fill, Tool::Stamp] {
            let placed = confirm(CellMark::Empty, primary).unwrap();
            let after_b = alt_confirm(placed, primary.partner());
            assert_ne!(after_b, Some(primary.partner().mark()));
        }
    }
}
