use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};

use crate::{
    client::TodoClient,
    errors::BaseError,
    models::todo_model::Todo,
    ui::{
        app::{App, Command, InputMode, Pane},
        form::FormField,
    },
    utils::format_timestamp,
};

/// What the event loop should do after a key press
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    Quit,
    Send(Command),
    Nothing,
}

/// Runs the interactive board until the user quits
pub fn render_todo_list(client: &TodoClient) -> Result<(), BaseError> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();

    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();

    let res = run_app(&mut terminal, &mut app, client);

    // restore terminal
    disable_raw_mode()?;

    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;

    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err)
    }

    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    client: &TodoClient,
) -> std::io::Result<()> {
    let command = app.begin_fetch();
    terminal.draw(|f| ui(f, app))?;
    app.apply(client.dispatch(command));

    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match handle_key(app, key.code) {
                KeyAction::Quit => return Ok(()),
                KeyAction::Send(command) => {
                    let reply = client.dispatch(command);
                    app.apply(reply);
                }
                KeyAction::Nothing => {}
            }
        }
    }
}

/// Maps a key press to a state change, and maybe a command to send
pub fn handle_key(app: &mut App, key: KeyCode) -> KeyAction {
    match app.input_mode {
        InputMode::Browsing => match key {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Esc => {
                if app.error.is_some() {
                    app.dismiss_error();
                } else if app.editing_todo.is_some() {
                    app.cancel_edit();
                }
            }
            KeyCode::Tab | KeyCode::Left | KeyCode::Right => app.switch_pane(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Char('a') => app.open_form(),
            KeyCode::Char('r') => return KeyAction::Send(app.begin_fetch()),
            KeyCode::Char('e') => {
                if let Some(todo_id) = app.selected_todo().map(|todo| todo.id) {
                    app.start_edit(todo_id);
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('d') => {
                if let Some(command) = app
                    .selected_todo()
                    .and_then(|todo| app.toggle_complete(todo.id))
                {
                    return KeyAction::Send(command);
                }
            }
            KeyCode::Char('x') => {
                if let Some(todo_id) = app.selected_todo().map(|todo| todo.id) {
                    app.request_delete(todo_id);
                }
            }
            _ => {}
        },
        InputMode::Form => match key {
            KeyCode::Esc => {
                if app.editing_todo.is_some() {
                    app.cancel_edit();
                } else {
                    app.input_mode = InputMode::Browsing;
                }
            }
            KeyCode::Tab => app.form.next_field(),
            KeyCode::Enter => {
                if let Some(command) = app.submit_form() {
                    return KeyAction::Send(command);
                }
            }
            KeyCode::Backspace => app.form.pop(),
            KeyCode::Char(c) => app.form.push(c),
            _ => {}
        },
        InputMode::ConfirmDelete(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(command) = app.confirm_delete(true) {
                    return KeyAction::Send(command);
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                app.confirm_delete(false);
            }
            _ => {}
        },
    }

    KeyAction::Nothing
}

fn ui<B: Backend>(f: &mut Frame<B>, app: &mut App) {
    let banner_height = if app.error.is_some() { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(banner_height),
                Constraint::Length(8),
                Constraint::Min(5),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_error_banner(f, app, chunks[0]);
    draw_form(f, app, chunks[1]);
    draw_home_content(f, app, chunks[2]);
    draw_help(f, app, chunks[3]);

    if let InputMode::ConfirmDelete(_) = app.input_mode {
        draw_confirm_delete(f, app);
    }
}

// Dismissible banner for the last failed request
fn draw_error_banner<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let message = match &app.error {
        Some(message) => message,
        None => return,
    };

    let error_text = vec![Spans::from(vec![
        Span::styled(message.as_str(), Style::default().fg(Color::Red)),
        Span::raw("  (Esc to dismiss)"),
    ])];

    let error_paragraph = Paragraph::new(error_text).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Error", Style::default().fg(Color::Red)))
            .border_style(Style::default().fg(Color::LightRed)),
    );

    f.render_widget(error_paragraph, area);
}

fn draw_form<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let title = if app.editing_todo.is_some() {
        "Edit Todo"
    } else {
        "Add New Todo"
    };

    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)].as_ref())
        .split(inner);

    let editing = app.input_mode == InputMode::Form;

    let fields = [
        (FormField::Name, "Todo Name *", app.form.name.as_str()),
        (FormField::Task, "Task Description *", app.form.task.as_str()),
    ];

    for (chunk, (field, label, value)) in chunks.iter().zip(fields.iter()) {
        let style = if editing && app.form.focus == *field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let input = Paragraph::new(*value)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title(*label));

        f.render_widget(input, *chunk);
    }
}

/// Three line list entry: name, task, timestamps
fn todo_list_item(todo: &Todo) -> ListItem<'static> {
    let name_style = if todo.completed {
        Style::default()
            .fg(Color::Gray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let mut stamps = vec![Span::styled(
        format!("Created: {}", format_timestamp(&todo.created_at)),
        Style::default().fg(Color::DarkGray),
    )];

    if todo.updated_at != todo.created_at {
        stamps.push(Span::styled(
            format!("  Updated: {}", format_timestamp(&todo.updated_at)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    ListItem::new(vec![
        Spans::from(Span::styled(todo.name.clone(), name_style)),
        Spans::from(Span::raw(todo.task.clone())),
        Spans::from(stamps),
    ])
}

fn draw_home_content<B: Backend>(f: &mut Frame<B>, app: &mut App, area: Rect) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(format!("Your Todos - {}", app.summary()));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    if app.loading {
        let loading = Paragraph::new("Loading todos...").alignment(Alignment::Center);
        f.render_widget(loading, inner);
        return;
    }

    if app.todos.is_empty() {
        let empty = Paragraph::new(vec![
            Spans::from(Span::styled(
                "No todos yet",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Spans::from("Add your first todo above to get started!"),
        ])
        .alignment(Alignment::Center);
        f.render_widget(empty, inner);
        return;
    }

    // Create two chunks with equal horizontal screen space
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(inner);

    let (pending, completed) = app.partition();
    let pending_items: Vec<ListItem> = pending.iter().map(|todo| todo_list_item(todo)).collect();
    let completed_items: Vec<ListItem> =
        completed.iter().map(|todo| todo_list_item(todo)).collect();

    let pending_list = List::new(pending_items)
        .block(pane_block(
            format!("Pending Tasks ({})", pending.len()),
            app.focus == Pane::Pending,
        ))
        .highlight_style(
            Style::default()
                .bg(Color::LightYellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    let completed_list = List::new(completed_items)
        .block(pane_block(
            format!("Completed Tasks ({})", completed.len()),
            app.focus == Pane::Completed,
        ))
        .highlight_style(
            Style::default()
                .bg(Color::LightGreen)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");

    f.render_stateful_widget(pending_list, chunks[0], &mut app.pending.state);
    f.render_stateful_widget(completed_list, chunks[1], &mut app.completed.state);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::LightCyan)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border)
}

fn draw_help<B: Backend>(f: &mut Frame<B>, app: &App, area: Rect) {
    let help = match app.input_mode {
        InputMode::Browsing => {
            "a add  e edit  space toggle  x delete  tab switch column  r reload  q quit"
        }
        InputMode::Form => "tab next field  enter save  esc cancel",
        InputMode::ConfirmDelete(_) => "y delete  n keep",
    };

    f.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn draw_confirm_delete<B: Backend>(f: &mut Frame<B>, app: &App) {
    let name = match app.input_mode {
        InputMode::ConfirmDelete(todo_id) => app
            .todos
            .iter()
            .find(|todo| todo.id == todo_id)
            .map(|todo| todo.name.clone())
            .unwrap_or_default(),
        _ => return,
    };

    let area = centered_rect(50, 20, f.size());

    let prompt = Paragraph::new(vec![
        Spans::from("Are you sure you want to delete this todo?"),
        Spans::from(Span::styled(
            name,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Spans::from(""),
        Spans::from("(y/n)"),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled("Delete", Style::default().fg(Color::Red)))
            .border_style(Style::default().fg(Color::LightRed)),
    );

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1])[1]
}
