use crate::difficulty::Difficulty;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    Correct,
    Wrong,
    Hint,
    Hidden,
}

/// One displayed character of the passage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharacterCell {
    /// Typed char for `Wrong` cells, target char otherwise
    pub ch: char,
    pub state: CellState,
    pub is_cursor: bool,
}

/// Classify every character of `target` against what has been typed so far.
///
/// Derived purely from the arguments so any snapshot can be rendered without
/// session state. Input beyond the end of `target` is ignored.
pub fn classify(target: &str, input: &str, difficulty: Difficulty) -> Vec<CharacterCell> {
    let typed: Vec<char> = input.chars().collect();
    let typed_len = typed.len();
    let hint_limit = typed_len + difficulty.hint_window();

    target
        .chars()
        .enumerate()
        .map(|(idx, expected)| {
            let (ch, state) = match typed.get(idx) {
                Some(&c) if c == expected => (expected, CellState::Correct),
                Some(&c) => (c, CellState::Wrong),
                None if idx < hint_limit => (expected, CellState::Hint),
                None => (expected, CellState::Hidden),
            };

            CharacterCell {
                ch,
                state,
                is_cursor: idx == typed_len,
            }
        })
        .collect()
}

/// Index of the cursor cell, if any
pub fn cursor_index(cells: &[CharacterCell]) -> Option<usize> {
    cells.iter().position(|c| c.is_cursor)
}
