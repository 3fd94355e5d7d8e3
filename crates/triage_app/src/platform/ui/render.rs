use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use triage_core::{AppViewModel, SubmissionPhase};

use super::styles;
use super::Focus;

/// Shell-owned form chrome that accompanies the core view model.
pub struct ShellChrome<'a> {
    pub focus: Focus,
    pub path_input: &'a str,
    pub attach_notice: Option<&'a str>,
}

pub fn render(frame: &mut Frame<'_>, view: &AppViewModel, chrome: &ShellChrome<'_>) {
    let [composer_area, attachment_area, feedback_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_composer(frame, composer_area, view, chrome);
    render_attachment(frame, attachment_area, view, chrome);
    render_feedback(frame, feedback_area, view);

    let status = Paragraph::new(status_line(view, chrome.focus));
    frame.render_widget(status, status_area);
}

fn render_composer(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &AppViewModel,
    chrome: &ShellChrome<'_>,
) {
    let is_active = chrome.focus == Focus::Composer;
    let border_style = if is_active {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let counter = format!(
        "{} / {}",
        format_with_commas(view.char_count as u64),
        format_with_commas(view.char_limit as u64)
    );
    let counter_style = if view.char_count > view.char_limit {
        styles::over_limit_style()
    } else {
        styles::hint_style()
    };
    let title = Line::from(vec![
        Span::raw("Email text ("),
        Span::styled(counter, counter_style),
        Span::raw(" chars)"),
    ]);

    let paragraph = Paragraph::new(view.composer_text.as_str())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
    frame.render_widget(paragraph, area);

    if is_active {
        if let Some((x, y)) = cursor_offset(&view.composer_text, view.cursor_position, area) {
            frame.set_cursor_position((x, y));
        }
    }
}

/// Maps the composer cursor to a screen cell inside the bordered area.
/// Column math assumes character wrapping; words broken by the paragraph's
/// word wrap can drift by a few cells.
fn cursor_offset(text: &str, cursor: usize, area: Rect) -> Option<(u16, u16)> {
    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    let mut row = 0usize;
    let mut col = 0usize;
    for ch in text.chars().take(cursor) {
        if ch == '\n' {
            row += 1;
            col = 0;
        } else {
            col += 1;
            if col >= inner_width {
                row += 1;
                col = 0;
            }
        }
    }

    if row >= inner_height {
        return None;
    }
    Some((area.x + 1 + col as u16, area.y + 1 + row as u16))
}

fn render_attachment(
    frame: &mut Frame<'_>,
    area: Rect,
    view: &AppViewModel,
    chrome: &ShellChrome<'_>,
) {
    let is_active = chrome.focus == Focus::Attachment;
    let border_style = if is_active {
        styles::active_panel_border_style()
    } else {
        styles::inactive_panel_border_style()
    };

    let line = if let Some(notice) = chrome.attach_notice {
        Line::styled(notice.to_owned(), styles::error_style())
    } else if let Some(attachment) = &view.attachment {
        Line::from(format!(
            "{} ({})  Ctrl+U removes",
            attachment.name,
            format_size(attachment.size)
        ))
    } else if is_active {
        Line::from(chrome.path_input.to_owned())
    } else {
        Line::styled(
            "Tab here, paste a file path, Enter to stage",
            styles::hint_style(),
        )
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .title("Attachment")
            .borders(Borders::ALL)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);

    if is_active && view.attachment.is_none() && chrome.attach_notice.is_none() {
        let col = chrome.path_input.chars().count() as u16;
        frame.set_cursor_position((area.x + 1 + col, area.y + 1));
    }
}

fn render_feedback(frame: &mut Frame<'_>, area: Rect, view: &AppViewModel) {
    let (title, lines) = match view.phase {
        SubmissionPhase::Idle | SubmissionPhase::Validating => (
            "Result",
            vec![Line::styled(
                "Ctrl+S submits the email for classification.",
                styles::hint_style(),
            )],
        ),
        SubmissionPhase::Loading => (
            "Result",
            vec![Line::styled("Processing email...", styles::loading_style())],
        ),
        SubmissionPhase::Error => {
            let message = view.error.as_deref().unwrap_or("Something went wrong.");
            (
                "Error",
                vec![Line::styled(
                    format!("Error: {message}"),
                    styles::error_style(),
                )],
            )
        }
        SubmissionPhase::Success => match &view.result {
            Some(result) => (
                "Result",
                vec![
                    Line::from(vec![
                        Span::raw("Classification: "),
                        Span::styled(
                            result.classification.clone(),
                            styles::classification_style(),
                        ),
                    ]),
                    Line::from(format!("Suggested reply: {}", result.auto_reply)),
                    Line::raw(""),
                    Line::styled("Ctrl+Y copies the reply.", styles::hint_style()),
                ],
            ),
            None => (
                "Result",
                vec![Line::styled("No result available.", styles::hint_style())],
            ),
        },
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(styles::inactive_panel_border_style()),
    );
    frame.render_widget(paragraph, area);
}

fn status_line(view: &AppViewModel, focus: Focus) -> String {
    if let Some(toast) = &view.toast {
        return toast.clone();
    }

    let phase = phase_label(view.phase);
    let hint = match focus {
        Focus::Composer => "Tab: attachment | Ctrl+S: submit | Ctrl+Y: copy reply | Esc: quit",
        Focus::Attachment => "Tab: composer | Enter: stage file | Ctrl+U: remove | Esc: quit",
    };
    format!("{phase} | {hint}")
}

fn phase_label(phase: SubmissionPhase) -> &'static str {
    match phase {
        SubmissionPhase::Idle => "Ready",
        SubmissionPhase::Validating => "Validating",
        SubmissionPhase::Loading => "Processing",
        SubmissionPhase::Success => "Done",
        SubmissionPhase::Error => "Error",
    }
}

fn format_with_commas(value: u64) -> String {
    let mut out = String::new();
    for (i, ch) in value.to_string().chars().rev().enumerate() {
        if i != 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.chars().rev().collect()
}

fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;
    if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{bytes} B")
    }
}
