use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::Color;
use ratatui::prelude::Constraint;
use ratatui::prelude::Direction;
use ratatui::prelude::Layout;
use ratatui::prelude::Line;
use ratatui::prelude::Modifier;
use ratatui::prelude::Rect;
use ratatui::prelude::Span;
use ratatui::prelude::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Tabs;
use ratatui::Frame;
use ratatui::Terminal;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;

use super::portfolio::Portfolio;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::Tab;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::ChatStatus;
use crate::infrastructure::backends::BackendManager;

fn render_header(frame: &mut Frame, app_state: &AppState, rect: Rect) {
    let titles = Tab::iter()
        .enumerate()
        .map(|(idx, tab)| return Line::from(format!("F{} {}", idx + 1, tab.title())))
        .collect::<Vec<Line>>();

    frame.render_widget(
        Tabs::new(titles)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(format!(
                        "{} - {}",
                        app_state.profile.name, app_state.profile.headline
                    )),
            )
            .select(app_state.navigation.selected().index())
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        rect,
    );
}

fn render_address(frame: &mut Frame, app_state: &AppState, rect: Rect) {
    let mut spans = vec![Span::styled(
        app_state.navigation.href(),
        Style::default().fg(Color::DarkGray),
    )];
    if let Some(warning) = &app_state.backend_warning {
        spans.push(Span::styled(
            format!("  {warning}"),
            Style::default().fg(Color::Red),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), rect);
}

fn render(frame: &mut Frame, app_state: &mut AppState) {
    let selected = app_state.navigation.selected();
    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
    ];
    if selected == Tab::Chat {
        constraints.push(Constraint::Length(3));
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.size());

    render_header(frame, app_state, layout[0]);
    render_address(frame, app_state, layout[1]);

    let body = layout[2];
    let inner_width = body.width.saturating_sub(2);
    let inner_height = body.height.saturating_sub(2);
    if inner_width != app_state.last_known_width || inner_height != app_state.last_known_height
    {
        app_state.set_viewport(inner_width, inner_height);
    }

    frame.render_widget(
        Paragraph::new(app_state.lines(inner_width))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .scroll((app_state.scroll.position, 0)),
        body,
    );

    if selected != Tab::Chat {
        return;
    }

    match app_state.conversation.status() {
        ChatStatus::AwaitingResponse(mode) => {
            Loading::new(mode).render(frame, layout[3]);
        }
        ChatStatus::Idle => {
            frame.render_widget(app_state.textarea.widget(), layout[3]);
        }
    }
}

async fn start_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState<'_>,
    events: &mut EventsService,
    actions: mpsc::UnboundedSender<Action>,
    mailbox: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            render(frame, app_state);
        })?;

        let event = events.next().await?;
        if app_state.handle_event(event, &actions, &mailbox).await? {
            break;
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

pub async fn start(
    actions: mpsc::UnboundedSender<Action>,
    mailbox: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let portfolio = Portfolio::from_config().await?;
    let navigation = portfolio.navigation().await?;
    let conversation = portfolio.conversation().await;
    let speakers = portfolio.speakers();

    let mut app_state = AppState::new(navigation, conversation, portfolio.profile, speakers);
    app_state.backend_warning = ActionsService::health_check(&BackendManager::get()).await;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;
    let mut events = EventsService::new(events_rx);

    let res = start_loop(&mut terminal, &mut app_state, &mut events, actions, mailbox).await;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;

    return res;
}
