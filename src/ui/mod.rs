mod theme;

use crate::app::{AppModel, Dialog, PaneText, hotkey_legend};
use crate::domain::Pane;
use ratatui::prelude::*;
use ratatui::widgets::*;

pub const DIALOG_WIDTH: u16 = 60;
pub const DIALOG_HEIGHT: u16 = 10;

pub fn render(frame: &mut Frame, model: &AppModel) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    render_text_pane(frame, rows[0], "Disk Info", &model.disk_usage, false);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(30),
            Constraint::Percentage(50),
        ])
        .split(rows[1]);

    render_entry_list(frame, columns[0], model, Pane::Volumes);
    render_entry_list(frame, columns[1], model, Pane::Snapshots);
    render_text_pane(frame, columns[2], "Snapshot Info", &model.snapshot_info, true);

    render_hotkeys(frame, rows[2], model);

    if model.dialog.is_open() {
        render_dialog(frame, area, &model.dialog);
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        theme::ACCENT
    } else {
        theme::BORDER
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
}

fn render_entry_list(frame: &mut Frame, area: Rect, model: &AppModel, pane: Pane) {
    let focused = model.focus == pane && !model.dialog.is_open();
    let block = pane_block(pane.title(), model.focus == pane);

    if pane == Pane::Volumes {
        if let Some(error) = &model.list_error {
            let paragraph = Paragraph::new(error.as_str())
                .style(Style::default().fg(theme::ERROR))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    }

    let list = model.list(pane);
    if list.is_empty() {
        let message = match pane {
            Pane::Volumes => format!("No subvolumes under {}/", model.config.prefixes.active),
            Pane::Snapshots => "No snapshots for this subvolume.".to_string(),
        };
        let empty = Paragraph::new(message).style(Style::default().fg(theme::DIM)).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items = list
        .items()
        .iter()
        .map(|item| ListItem::new(item.as_str()))
        .collect::<Vec<_>>();
    let highlight = if focused {
        Style::default().fg(theme::SELECTION_FG).bg(theme::SELECTION_BG)
    } else {
        Style::default().fg(theme::FG).add_modifier(Modifier::BOLD)
    };
    let widget = List::new(items)
        .block(block)
        .style(Style::default().fg(theme::MUTED))
        .highlight_style(highlight)
        .highlight_symbol(">")
        .highlight_spacing(HighlightSpacing::Always);

    let mut state = ListState::default();
    state.select(Some(list.selected_index()));
    frame.render_stateful_widget(widget, area, &mut state);
}

fn render_text_pane(frame: &mut Frame, area: Rect, title: &str, text: &PaneText, wrap: bool) {
    let (content, style) = match text {
        PaneText::Empty => ("", Style::default()),
        PaneText::Text(value) => (value.as_str(), Style::default().fg(theme::FG)),
        PaneText::Error(value) => (value.as_str(), Style::default().fg(theme::ERROR)),
    };
    let mut paragraph = Paragraph::new(content).style(style).block(pane_block(title, false));
    if wrap {
        paragraph = paragraph.wrap(Wrap { trim: false });
    }
    frame.render_widget(paragraph, area);
}

fn render_hotkeys(frame: &mut Frame, area: Rect, model: &AppModel) {
    let legend = hotkey_legend(model);
    let paragraph = Paragraph::new(legend)
        .style(Style::default().fg(theme::DIM))
        .block(
            Block::default()
                .title("Hotkeys")
                .borders(Borders::TOP)
                .border_style(Style::default().fg(theme::BORDER)),
        );
    frame.render_widget(paragraph, area);
}

/// Fixed-size rectangle centered in `area`, shrunk when the terminal is smaller.
pub fn dialog_area(area: Rect) -> Rect {
    let width = DIALOG_WIDTH.min(area.width);
    let height = DIALOG_HEIGHT.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_dialog(frame: &mut Frame, area: Rect, dialog: &Dialog) {
    let Some(message) = dialog.message() else {
        return;
    };
    let popup = dialog_area(area);
    frame.render_widget(Clear, popup);

    let hint = if dialog.pending_action().is_some() {
        "Enter: Execute | c: Cancel"
    } else {
        "Press Enter to close"
    };

    let mut lines = message
        .lines()
        .map(|line| Line::from(line.to_string()))
        .collect::<Vec<_>>();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(hint, Style::default().fg(theme::DIM))));

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(theme::FG))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(dialog.title())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(paragraph, popup);
}
