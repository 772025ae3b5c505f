use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const TITLE: &str = "RUSH";
const SUBTITLE: &str = "Dickinson College AI Assistant";
const PLACEHOLDER: &str = "Ask anything about Dickinson...";
const SUBMIT_IDLE: &str = "[ Ask ]";
const SUBMIT_BUSY: &str = "[ Thinking... ]";

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(frame.area());

    render_header(frame, chunks[0]);
    render_input(frame, chunks[1], app);
    render_submit_line(frame, chunks[2], app);

    // The answer pane only exists once a request has settled.
    if !app.response.is_empty() {
        render_response(frame, chunks[3], app);
    }
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(header, area);
}

fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Query").borders(Borders::ALL);

    let display = if app.query.is_empty() {
        Line::from(Span::styled(
            PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::raw(app.query.as_str()))
    };

    frame.render_widget(Paragraph::new(display).block(block), area);

    if !app.loading {
        let inner_width = area.width.saturating_sub(2);
        let cursor_x = (app.query.chars().count() as u16).min(inner_width.saturating_sub(1));
        frame.set_cursor_position(Position::new(area.x + 1 + cursor_x, area.y + 1));
    }
}

fn render_submit_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = if app.loading {
        Line::from(Span::styled(
            SUBMIT_BUSY,
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(vec![
            Span::styled(SUBMIT_IDLE, Style::default().fg(Color::Cyan)),
            Span::styled(
                "  Enter to send · Esc to quit",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_response(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title("Answer").borders(Borders::ALL);
    let paragraph = Paragraph::new(app.response.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(60, 14);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn fresh_view_has_no_answer_pane() {
        let screen = draw(&App::new());
        assert!(screen.contains(TITLE));
        assert!(screen.contains(SUBTITLE));
        assert!(screen.contains(PLACEHOLDER));
        assert!(screen.contains("[ Ask ]"));
        assert!(!screen.contains("Answer"));
    }

    #[test]
    fn typed_query_replaces_the_placeholder() {
        let mut app = App::new();
        for c in "how late is the library open".chars() {
            app.push_char(c);
        }
        let screen = draw(&app);
        assert!(screen.contains("how late is the library open"));
        assert!(!screen.contains(PLACEHOLDER));
    }

    #[test]
    fn loading_swaps_the_submit_caption() {
        let mut app = App::new();
        app.begin_request();
        let screen = draw(&app);
        assert!(screen.contains("Thinking..."));
        assert!(!screen.contains("[ Ask ]"));
    }

    #[test]
    fn settled_response_is_shown_with_embedded_newlines() {
        let mut app = App::new();
        let generation = app.begin_request();
        app.finish_request(
            generation,
            Ok(crate::api::QueryResponse {
                answer: Some("first line\nsecond line".to_string()),
            }),
        );
        let screen = draw(&app);
        assert!(screen.contains("Answer"));
        assert!(screen.contains("first line"));
        assert!(screen.contains("second line"));
    }
}
