use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::drill::Drill;
use crate::layout::{self, CharClass};
use crate::{App, Screen};

/// Main theme color (#524a6b).
const ACCENT: Color = Color::Rgb(82, 74, 107);

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.screen {
            Screen::Menu => render_menu(self, area, buf),
            Screen::WordCount => render_word_count(self, area, buf),
            Screen::Typing => {
                if let Some(drill) = &self.drill {
                    render_drill(drill, area, buf);
                }
            }
            Screen::Results => render_results(self, area, buf),
        }
    }
}

/// Centering is baked into the lines themselves: a leading space pad per line
/// and leading blank lines for the block, so the buffer matches the layout
/// math exactly.
fn render_centered_block(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let top = layout::top_pad(area.height, lines.len());
    let mut padded: Vec<Line> = Vec::with_capacity(top + lines.len());
    for _ in 0..top {
        padded.push(Line::default());
    }
    padded.extend(lines);
    Paragraph::new(padded).render(area, buf);
}

fn centered_spans(width: u16, spans: Vec<Span>) -> Line {
    let visible: usize = spans
        .iter()
        .map(|s| layout::visible_width(&s.content))
        .sum();
    let mut padded = vec![Span::raw(" ".repeat(layout::center_pad(width, visible)))];
    padded.extend(spans);
    Line::from(padded)
}

fn centered_line(width: u16, content: Span) -> Line {
    centered_spans(width, vec![content])
}

fn render_drill(drill: &Drill, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let correct_style = Style::default().patch(bold_style).fg(Color::Green);
    let incorrect_style = Style::default().patch(bold_style).fg(Color::Red);
    let caret_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::UNDERLINED)
        .fg(Color::White);
    let pending_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM)
        .fg(Color::White);

    let max_width = layout::effective_width(area.width);
    let ranges = layout::line_ranges(&drill.target, max_width);

    let mut lines: Vec<Line> = Vec::with_capacity(ranges.len() + 2);
    for range in &ranges {
        let mut spans = Vec::with_capacity(range.len() + 1);
        spans.push(Span::raw(
            " ".repeat(layout::center_pad(area.width, range.len())),
        ));
        for idx in range.clone() {
            let style = match layout::classify(&drill.target, &drill.typed, drill.done, idx) {
                CharClass::Correct => correct_style,
                CharClass::Incorrect => incorrect_style,
                CharClass::Caret => caret_style,
                CharClass::Pending => pending_style,
            };
            spans.push(Span::styled(drill.target[idx].to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(centered_line(
        area.width,
        Span::raw(layout::stat_line(&drill.live_stats())),
    ));

    render_centered_block(lines, area, buf);
}

fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let accent_bold_style = Style::default().patch(bold_style).fg(ACCENT);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let items = [
        format!("Timer ({}s)", app.config.seconds),
        String::from("Words (custom)"),
    ];

    let mut lines = vec![
        centered_line(area.width, Span::styled("Select mode:", accent_bold_style)),
        Line::default(),
    ];
    for (i, item) in items.iter().enumerate() {
        let (prefix, style) = if i == app.selected {
            ("> ", accent_bold_style)
        } else {
            ("  ", Style::default())
        };
        lines.push(centered_line(
            area.width,
            Span::styled(format!("{prefix}{item}"), style),
        ));
    }
    lines.push(Line::default());
    lines.push(centered_line(
        area.width,
        Span::styled("↑/↓ or j/k to move, Enter to select, q to quit", dim_style),
    ));

    render_centered_block(lines, area, buf);
}

fn render_word_count(app: &App, area: Rect, buf: &mut Buffer) {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let accent_bold_style = Style::default().patch(bold_style).fg(ACCENT);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let lines = vec![
        centered_spans(
            area.width,
            vec![
                Span::styled("How many words?", accent_bold_style),
                Span::raw(format!(" {}", app.count_input)),
            ],
        ),
        centered_line(
            area.width,
            Span::styled("Enter to start, Esc to cancel", dim_style),
        ),
    ];

    render_centered_block(lines, area, buf);
}

fn render_results(app: &App, area: Rect, buf: &mut Buffer) {
    let Some(stats) = &app.stats else {
        return;
    };

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let accent_bold_style = Style::default().patch(bold_style).fg(ACCENT);
    let dim_style = Style::default().add_modifier(Modifier::DIM);

    let lines = vec![
        centered_line(
            area.width,
            Span::styled("+------------------------------+", accent_bold_style),
        ),
        centered_line(
            area.width,
            Span::styled("|          RESULTS             |", accent_bold_style),
        ),
        centered_line(
            area.width,
            Span::styled("+------------------------------+", accent_bold_style),
        ),
        centered_line(
            area.width,
            Span::raw(format!("Time: {:.1}s", stats.duration_secs)),
        ),
        centered_line(
            area.width,
            Span::raw(format!("WPM (gross): {:.1}", stats.gross_wpm)),
        ),
        centered_line(
            area.width,
            Span::raw(format!(
                "Accuracy: {:.1}% ({}/{})",
                stats.accuracy_pct, stats.correct, stats.total_typed
            )),
        ),
        centered_line(
            area.width,
            Span::raw(format!("WPM (net): {:.1}", stats.net_wpm)),
        ),
        Line::default(),
        centered_line(
            area.width,
            Span::styled("[1] Restart  [esc] Quit", dim_style),
        ),
    ];

    render_centered_block(lines, area, buf);
}
