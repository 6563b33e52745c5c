use crate::drill::LiveStats;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// How a single target character should be painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Correct,
    Incorrect,
    Caret,
    Pending,
}

/// Columns available for the wrapped target text: the terminal width minus a
/// margin of four, never narrower than 20. A zero width (size not yet known)
/// falls back to an 80 column terminal.
pub fn effective_width(width: u16) -> usize {
    let width = if width == 0 { 80 } else { width as usize };
    width.saturating_sub(4).max(20)
}

/// Greedy word wrap over the target, breaking after the last space seen once
/// a line fills up. Tokens longer than `max_width` are never split, so a
/// returned range can exceed it. Ranges cover the target exactly, and a line
/// broken at a space keeps that space as its last character.
pub fn line_ranges(target: &[char], max_width: usize) -> Vec<Range<usize>> {
    let mut newline_at = vec![false; target.len()];
    let mut col = 0;
    let mut last_space: Option<usize> = None;

    for (i, &ch) in target.iter().enumerate() {
        if ch == ' ' {
            last_space = Some(i);
        }
        if col >= max_width {
            if let Some(space) = last_space {
                newline_at[space] = true;
                // chars already on the new line; zero when the space at `i`
                // itself tripped the width
                col = i - space;
                last_space = None;
                continue;
            }
        }
        col += 1;
    }

    let mut ranges = vec![];
    let mut start = 0;
    for (i, &brk) in newline_at.iter().enumerate() {
        if brk {
            ranges.push(start..i + 1);
            start = i + 1;
        }
    }
    if start < target.len() {
        ranges.push(start..target.len());
    }
    ranges
}

/// Classifies the target character at `idx` against what has been typed.
pub fn classify(target: &[char], typed: &[char], done: bool, idx: usize) -> CharClass {
    if idx < typed.len() {
        if typed[idx] == target[idx] {
            CharClass::Correct
        } else {
            CharClass::Incorrect
        }
    } else if idx == typed.len() && !done {
        CharClass::Caret
    } else {
        CharClass::Pending
    }
}

/// Columns of left padding that center a line of `visible` columns.
pub fn center_pad(width: u16, visible: usize) -> usize {
    if width == 0 {
        return 0;
    }
    (width as usize).saturating_sub(visible) / 2
}

/// Blank lines above a block of `lines` rows that center it vertically.
pub fn top_pad(height: u16, lines: usize) -> usize {
    if height == 0 {
        return 0;
    }
    (height as usize).saturating_sub(lines) / 2
}

/// Printed width of a line without markup.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

pub fn stat_line(live: &LiveStats) -> String {
    format!(
        "WPM {:4.1} | ACC {:5.1}% | ERR {} | TIME {:4.1}s",
        live.wpm, live.accuracy, live.errors, live.time_secs
    )
}
