//! TUI rendering
//!
//! Draws a [`TerminalPage`] with ratatui. The layout is computed by
//! [`PageLayout::new`] so mouse hit testing sees the same keypad area the
//! renderer used.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::{Focus, TerminalPage};
use crate::shell::keypad::{ButtonKind, Keypad, KeypadButtonDef};
use crate::shell::style;
use crate::shell::{BodyState, MessageKind};

/// Renders the calculator page to the frame
pub fn render(page: &TerminalPage, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(page), area);
}

/// Screen areas of the page sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    /// Display line
    pub display: Rect,
    /// Keypad grid, including its border
    pub keypad: Rect,
    /// Result message
    pub message: Rect,
    /// Flag input and submit button
    pub form: Rect,
    /// Share button
    pub share: Rect,
    /// Help sidebar
    pub help: Rect,
}

impl PageLayout {
    /// Splits the full terminal area
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([Constraint::Min(30), Constraint::Length(26)])
            .split(area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Display
                Constraint::Length(12), // Keypad
                Constraint::Length(1),  // Message
                Constraint::Length(5),  // Form
                Constraint::Length(3),  // Share
                Constraint::Min(0),
            ])
            .split(columns[0]);

        Self {
            display: rows[0],
            keypad: rows[1],
            message: rows[2],
            form: rows[3],
            share: rows[4],
            help: columns[1],
        }
    }
}

/// A keypad button placed on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeypadCell<'a> {
    /// Grid row
    pub row: usize,
    /// First grid column
    pub col: usize,
    /// The button
    pub button: &'a KeypadButtonDef,
}

/// Places buttons row by row, wide buttons taking several columns
#[must_use]
pub fn keypad_cells(keypad: &Keypad) -> Vec<KeypadCell<'_>> {
    let mut cells = Vec::with_capacity(keypad.button_count());
    let (mut row, mut col) = (0, 0);
    for button in keypad.buttons() {
        if col + button.col_span > keypad.columns() {
            row += 1;
            col = 0;
        }
        cells.push(KeypadCell { row, col, button });
        col += button.col_span;
    }
    cells
}

fn keypad_rows(keypad: &Keypad) -> usize {
    keypad_cells(keypad).last().map_or(0, |cell| cell.row + 1)
}

fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Converts a click position inside the keypad area to a button id
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<&str> {
    let grid = inner(area);
    let rows = keypad_rows(keypad);
    if rows == 0 || x < grid.x || y < grid.y {
        return None;
    }
    let btn_width = grid.width / keypad.columns() as u16;
    let btn_height = grid.height / rows as u16;
    if btn_width == 0 || btn_height == 0 {
        return None;
    }

    let col = ((x - grid.x) / btn_width) as usize;
    let row = ((y - grid.y) / btn_height) as usize;
    keypad_cells(keypad)
        .into_iter()
        .find(|cell| cell.row == row && (cell.col..cell.col + cell.button.col_span).contains(&col))
        .map(|cell| cell.button.id.as_str())
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    page: &'a TerminalPage,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(page: &'a TerminalPage) -> Self {
        Self { page }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let text = self.page.display();
        let style = if text == crate::core::ERROR_MARKER {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }

    fn button_style(&self, button: &KeypadButtonDef) -> Style {
        if self.page.is_emphasized(&button.id) {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD);
        }
        match button.kind {
            ButtonKind::Number => Style::default().fg(Color::White),
            ButtonKind::Operator => Style::default().fg(Color::Yellow),
            ButtonKind::Function => Style::default().fg(Color::Gray),
        }
    }

    fn render_keypad(&self, area: Rect, buf: &mut Buffer) {
        let border = if self.page.focus() == Focus::Keypad {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .render(area, buf);

        let Some(keypad) = self.page.keypad() else {
            return;
        };
        let grid = inner(area);
        let rows = keypad_rows(keypad);
        if rows == 0 || grid.width < keypad.columns() as u16 || grid.height < rows as u16 {
            return;
        }

        let btn_width = grid.width / keypad.columns() as u16;
        let btn_height = grid.height / rows as u16;

        for cell in keypad_cells(keypad) {
            let width = btn_width * cell.button.col_span as u16;
            let x = grid.x + cell.col as u16 * btn_width;
            let y = grid.y + cell.row as u16 * btn_height + btn_height / 2;

            let label = format!("[{}]", cell.button.label());
            let label_width = label.chars().count() as u16;
            let label_x = x + width.saturating_sub(label_width) / 2;
            buf.set_span(
                label_x,
                y,
                &Span::styled(label, self.button_style(cell.button)),
                width,
            );
        }
    }

    fn render_message(&self, area: Rect, buf: &mut Buffer) {
        let Some((text, kind)) = self.page.message() else {
            return;
        };
        let style = match kind {
            MessageKind::Success => Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            MessageKind::Error => Style::default().fg(Color::Red),
        };
        Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let Some(form) = self.page.form().filter(|f| f.visible) else {
            return;
        };

        let input = if form.input.is_empty() {
            Span::styled(style::FLAG_PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(form.input.as_str())
        };
        let border = if self.page.focus() == Focus::FlagInput {
            Color::Magenta
        } else {
            Color::DarkGray
        };

        let button_style = if form.enabled {
            Style::default()
                .fg(Color::White)
                .bg(Color::Magenta)
        } else {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        };
        let button = Line::from(Span::styled(
            format!("[ {} ]", style::SUBMIT_LABEL),
            button_style,
        ))
        .alignment(Alignment::Center);

        Paragraph::new(vec![Line::from(input), button])
            .block(
                Block::default()
                    .title(" Flag ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border)),
            )
            .render(area, buf);
    }

    fn render_share(&self, area: Rect, buf: &mut Buffer) {
        if !self.page.has_share() {
            return;
        }
        let mut lines = vec![Line::from(Span::styled(
            format!("[ {} ]", style::SHARE_LABEL),
            Style::default().fg(Color::White).bg(Color::Blue),
        ))
        .alignment(Alignment::Center)];
        if let Some(link) = self.page.shared_links().last() {
            lines.push(Line::from(Span::styled(
                link.as_str(),
                Style::default().fg(Color::Blue),
            )));
        }
        Paragraph::new(lines).render(area, buf);
    }

    fn render_help(&self, area: Rect, buf: &mut Buffer) {
        let shortcuts: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:>7}", key), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(shortcuts)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame_color = match self.page.body() {
            BodyState::Default => Color::White,
            BodyState::Celebrating => Color::LightMagenta,
        };
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(frame_color))
            .render(area, buf);

        let layout = PageLayout::new(area);
        self.render_display(layout.display, buf);
        self.render_keypad(layout.keypad, buf);
        self.render_message(layout.message, buf);
        self.render_form(layout.form, buf);
        self.render_share(layout.share, buf);
        self.render_help(layout.help, buf);
    }
}

/// Title of the outer frame
pub const TITLE: &str = " CTF Calculator ";

/// Help text for the sidebar
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Digits"),
    ("+-*/x", "Operators"),
    ("Enter", "Evaluate"),
    ("Esc", "Clear"),
    ("Bksp", "Backspace"),
    ("%", "Percent"),
    ("Tab", "Flag input"),
    ("Ctrl+S", "Share"),
    ("Ctrl+C", "Quit"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorConfig;
    use crate::flag::{MemoryStore, FLAG};
    use crate::core::FlagField;
    use crate::tui::TerminalApp;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(page: &TerminalPage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| render(page, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    fn app() -> TerminalApp<MemoryStore> {
        TerminalApp::new(MemoryStore::new(), CalculatorConfig::default())
    }

    // ===== Layout tests =====

    #[test]
    fn test_keypad_cells_grid() {
        let keypad = Keypad::new();
        let cells = keypad_cells(&keypad);
        assert_eq!(cells.len(), 19);
        assert_eq!((cells[0].row, cells[0].col), (0, 0));
        assert_eq!((cells[3].row, cells[3].col), (0, 3));
        let zero = cells.iter().find(|c| c.button.id == "btn-0").unwrap();
        assert_eq!((zero.row, zero.col), (4, 0));
        let equals = cells.iter().find(|c| c.button.id == "btn-equals").unwrap();
        assert_eq!((equals.row, equals.col), (4, 3));
        assert_eq!(keypad_rows(&keypad), 5);
    }

    #[test]
    fn test_page_layout_sections_do_not_overlap() {
        let layout = PageLayout::new(Rect::new(0, 0, 80, 30));
        assert!(layout.display.bottom() <= layout.keypad.top());
        assert!(layout.keypad.bottom() <= layout.message.top());
        assert!(layout.form.bottom() <= layout.share.top());
        assert!(layout.keypad.right() <= layout.help.left());
    }

    // ===== Hit test tests =====

    #[test]
    fn test_hit_test() {
        let keypad = Keypad::new();
        // 4 columns of 5, 5 rows of 2 inside the border
        let area = Rect::new(0, 0, 22, 12);
        assert_eq!(hit_test(&keypad, area, 1, 1), Some("btn-clear"));
        assert_eq!(hit_test(&keypad, area, 16, 1), Some("btn-divide"));
        assert_eq!(hit_test(&keypad, area, 1, 9), Some("btn-0"));
        assert_eq!(hit_test(&keypad, area, 6, 9), Some("btn-0"));
        assert_eq!(hit_test(&keypad, area, 11, 9), Some("btn-decimal"));
    }

    #[test]
    fn test_hit_test_outside() {
        let keypad = Keypad::new();
        let area = Rect::new(5, 5, 22, 12);
        assert_eq!(hit_test(&keypad, area, 0, 0), None);
        assert_eq!(hit_test(&keypad, area, 5, 5), None);
        assert_eq!(hit_test(&keypad, area, 50, 8), None);
        assert_eq!(hit_test(&keypad, Rect::new(0, 0, 2, 2), 1, 1), None);
    }

    // ===== Rendering tests =====

    #[test]
    fn test_render_empty_page() {
        let content = draw(&TerminalPage::new("http://x/"));
        assert!(content.contains("CTF Calculator"));
        assert!(content.contains("Keypad"));
    }

    #[test]
    fn test_render_mounted_page() {
        let app = app();
        let content = draw(app.page());
        assert!(content.contains("[AC]"));
        assert!(content.contains("[=]"));
        assert!(content.contains(style::FLAG_PLACEHOLDER));
        assert!(content.contains(style::SUBMIT_LABEL));
    }

    #[test]
    fn test_render_display_value() {
        let mut app = app();
        app.replay("12*3");
        let content = draw(app.page());
        assert!(content.contains("12 × 3"));
    }

    #[test]
    fn test_render_error_message() {
        let mut app = app();
        app.page_mut().enable_submit();
        app.page_mut().set_flag_value("nope");
        app.submit();
        let content = draw(app.page());
        assert!(content.contains(style::INCORRECT_MESSAGE));
    }

    #[test]
    fn test_render_solved_page() {
        let mut app = app();
        app.page_mut().enable_submit();
        app.page_mut().set_flag_value(FLAG);
        app.submit();
        app.share();
        let content = draw(app.page());
        assert!(content.contains(style::SHARE_LABEL));
        assert!(!content.contains(style::FLAG_PLACEHOLDER));
        assert!(content.contains("sharer.php"));
    }

    #[test]
    fn test_render_small_terminal_does_not_panic() {
        let app = app();
        let mut terminal = Terminal::new(TestBackend::new(10, 5)).unwrap();
        terminal.draw(|frame| render(app.page(), frame)).unwrap();
    }
}
