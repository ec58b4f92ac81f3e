//! Terminal-cell measurement and cursor motion for task text.
//!
//! Form cursors are byte offsets that always sit on grapheme boundaries,
//! so an accented letter or a CJK character moves and deletes as one unit.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '\u{2026}';

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

/// Cells `s` occupies in a terminal
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(|g| g.width()).sum()
}

/// `s` cut to at most `max_cells`, ending in `…` when anything was dropped.
/// A wide character that would straddle the limit is dropped whole.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let Some(budget) = max_cells.checked_sub(1) else {
        return String::new();
    };
    let mut used = 0;
    let mut cut: String = s
        .graphemes(true)
        .take_while(|g| {
            used += g.width();
            used <= budget
        })
        .collect();
    cut.push(ELLIPSIS);
    cut
}

/// `s` fitted to exactly `cells` cells: truncated, then space-filled
pub fn pad_to_width(s: &str, cells: usize) -> String {
    let mut cell = truncate_to_width(s, cells);
    let fill = cells.saturating_sub(display_width(&cell));
    cell.push_str(&" ".repeat(fill));
    cell
}

/// Offset just past the grapheme starting at `at`; None at the end
pub fn next_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    s.get(at..)?.graphemes(true).next().map(|g| at + g.len())
}

/// Offset where the grapheme ending at `at` starts; None at the start
pub fn prev_grapheme_boundary(s: &str, at: usize) -> Option<usize> {
    s.get(..at)?.graphemes(true).next_back().map(|g| at - g.len())
}

/// Start of the word before `at`, skipping any whitespace in between
pub fn word_boundary_left(s: &str, at: usize) -> usize {
    let Some(before) = s.get(..at) else {
        return at;
    };
    let mut pos = at;
    let mut graphemes = before.graphemes(true).rev().peekable();
    while let Some(g) = graphemes.next_if(|g| is_blank(g)) {
        pos -= g.len();
    }
    while let Some(g) = graphemes.next_if(|g| !is_blank(g)) {
        pos -= g.len();
    }
    pos
}

/// Start of the next word after `at`, or the end of `s`
pub fn word_boundary_right(s: &str, at: usize) -> usize {
    let Some(after) = s.get(at..) else {
        return s.len();
    };
    let mut pos = at;
    let mut graphemes = after.graphemes(true).peekable();
    while let Some(g) = graphemes.next_if(|g| !is_blank(g)) {
        pos += g.len();
    }
    while let Some(g) = graphemes.next_if(|g| is_blank(g)) {
        pos += g.len();
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_width_of_task_titles() {
        assert_eq!(display_width("File taxes"), 10);
        assert_eq!(display_width("Cafe\u{0301} run"), 8);
        assert_eq!(display_width("買い物"), 6);
    }

    #[test]
    fn test_title_column_truncation() {
        // Title column is 22 cells with one kept as the gap
        let title = "Renew passport before the summer trip";
        let cut = truncate_to_width(title, 21);
        assert_eq!(cut, "Renew passport befor\u{2026}");
        assert_eq!(display_width(&cut), 21);
        assert_eq!(truncate_to_width("Water plants", 21), "Water plants");
    }

    #[test]
    fn test_wide_characters_never_split() {
        // 16 cells into the 13-cell Due Date room
        let cut = truncate_to_width("報告書を提出する", 13);
        assert_eq!(cut, "報告書を提出\u{2026}");
        assert_eq!(display_width(&cut), 13);
        // the second wide char would straddle the limit
        assert_eq!(truncate_to_width("税金の申告", 4), "税\u{2026}");
    }

    #[test]
    fn test_truncation_degenerate_widths() {
        assert_eq!(truncate_to_width("High", 0), "");
        assert_eq!(truncate_to_width("High", 1), "\u{2026}");
        assert_eq!(truncate_to_width("", 0), "");
    }

    #[test]
    fn test_pad_to_priority_column() {
        assert_eq!(pad_to_width("High", 6), "High  ");
        assert_eq!(pad_to_width("Medium", 6), "Medium");
        // 10 cells cut to "税金…" (5 cells) plus one space
        assert_eq!(pad_to_width("税金の申告", 6), "税金\u{2026} ");
    }

    #[test]
    fn test_cursor_steps_over_accented_letter() {
        // "e" + combining acute is one grapheme at bytes 3..6
        let title = "Cafe\u{0301} run";
        assert_eq!(next_grapheme_boundary(title, 3), Some(6));
        assert_eq!(prev_grapheme_boundary(title, 6), Some(3));
        assert_eq!(next_grapheme_boundary(title, title.len()), None);
        assert_eq!(prev_grapheme_boundary(title, 0), None);
    }

    #[test]
    fn test_cursor_steps_over_cjk() {
        let title = "買い物 list";
        assert_eq!(next_grapheme_boundary(title, 0), Some(3));
        assert_eq!(prev_grapheme_boundary(title, 9), Some(6));
        // an offset inside a character is not a cursor position
        assert_eq!(next_grapheme_boundary(title, 1), None);
    }

    #[test]
    fn test_word_motion_in_mixed_title() {
        let title = "買い物 list";
        assert_eq!(word_boundary_left(title, title.len()), 10);
        assert_eq!(word_boundary_left(title, 10), 0);
        assert_eq!(word_boundary_right(title, 0), 10);
        assert_eq!(word_boundary_right(title, 10), title.len());
    }

    #[test]
    fn test_delete_word_skips_trailing_space() {
        // Ctrl+W at the end of "Pay rent " removes "rent "
        let title = "Pay rent ";
        assert_eq!(word_boundary_left(title, title.len()), 4);
        assert_eq!(word_boundary_left(title, 0), 0);
    }
}
