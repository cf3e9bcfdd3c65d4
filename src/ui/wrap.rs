use unicode_width::UnicodeWidthChar;

/// Columns to lay text out in for a view `columns` wide. The last column is
/// left free so a space or the cursor at the end of a row is still drawn.
pub fn wrap_width(columns: u16) -> usize {
    usize::from(columns.saturating_sub(1)).max(1)
}

/// Display width of a glyph that is drawn as `c` itself
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Word-wrap `glyphs` (char, display width) into rows of at most `width` columns
/// and return the row of every glyph.
///
/// `\n` ends its row. Whitespace may hang one column past the edge instead of
/// starting a row; words wider than a whole row are split.
pub fn wrap_rows(glyphs: &[(char, usize)], width: usize) -> Vec<usize> {
    let width = width.max(1);
    let mut rows = Vec::with_capacity(glyphs.len());
    let (mut row, mut col) = (0usize, 0usize);
    // first glyph of the word being laid out, and the column it started in
    let mut word: Option<(usize, usize)> = None;

    for (idx, &(c, w)) in glyphs.iter().enumerate() {
        if c == '\n' {
            rows.push(row);
            row += 1;
            col = 0;
            word = None;
            continue;
        }
        if c.is_whitespace() {
            if col > width {
                row += 1;
                col = 0;
            }
            rows.push(row);
            col += w;
            word = None;
            continue;
        }

        let (first, start_col) = *word.get_or_insert((idx, col));
        if col > 0 && col + w > width {
            row += 1;
            if start_col > 0 && first < idx {
                // carry the partial word over to the new row
                for r in &mut rows[first..] {
                    *r = row;
                }
                col = glyphs[first..idx].iter().map(|&(_, w)| w).sum();
                word = Some((first, 0));
            } else {
                col = 0;
                word = Some((idx, 0));
            }
        }
        rows.push(row);
        col += w;
    }
    rows
}

/// Number of rows `rows` occupies, counting the empty row after a trailing `\n`
pub fn row_count(glyphs: &[(char, usize)], rows: &[usize]) -> usize {
    match (glyphs.last(), rows.last()) {
        (Some(&('\n', _)), Some(&last)) => last + 2,
        (_, Some(&last)) => last + 1,
        _ => 1,
    }
}

/// Scroll offset that keeps `row` on screen, with one row of look-ahead when
/// the view is tall enough.
pub fn follow(row: usize, rows: usize, height: u16) -> u16 {
    let height = usize::from(height);
    if height == 0 {
        return 0;
    }
    let lookahead = usize::from(height > 1);
    let bottom = (row + 1 + lookahead).min(rows.max(row + 1));
    u16::try_from(bottom.saturating_sub(height)).unwrap_or(u16::MAX)
}
