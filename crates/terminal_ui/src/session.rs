use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Frame, Terminal, backend::Backend};
use tips_search::{Block, MatchSet, SearchEngine, SearchState, SessionEvent, Transition};

use crate::layout::PageLayout;
use crate::render::{Palette, View, render};

/// Supplies input one event at a time; `next_event` blocks until one arrives.
pub trait EventSource {
    fn next_event(&mut self) -> Result<Event>;
}

/// How an interactive session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Enter was pressed. Holds the active block's raw text, or `None` when
    /// nothing matched.
    Confirmed(Option<String>),
    Interrupted,
}

impl SessionOutcome {
    pub fn into_output(self) -> Option<String> {
        match self {
            Self::Confirmed(output) => output,
            Self::Interrupted => None,
        }
    }
}

/// Decodes a terminal event into a session event.
pub fn keystroke_to_input(event: &Event) -> SessionEvent {
    match event {
        Event::Key(key) => key_to_input(key),
        _ => SessionEvent::Ignored,
    }
}

fn key_to_input(key: &KeyEvent) -> SessionEvent {
    if key.kind == KeyEventKind::Release {
        return SessionEvent::Ignored;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => SessionEvent::Interrupt,
            KeyCode::Char('u') => SessionEvent::ClearQuery,
            KeyCode::Char('n') => SessionEvent::MoveDown,
            KeyCode::Char('p') => SessionEvent::MoveUp,
            KeyCode::Char('h') => SessionEvent::Backspace,
            KeyCode::Char('j') | KeyCode::Char('m') => SessionEvent::Confirm,
            _ => SessionEvent::Ignored,
        };
    }

    match key.code {
        KeyCode::Enter => SessionEvent::Confirm,
        KeyCode::Backspace | KeyCode::Delete => SessionEvent::Backspace,
        KeyCode::Down => SessionEvent::MoveDown,
        KeyCode::Up => SessionEvent::MoveUp,
        KeyCode::Char(c) if !c.is_control() && !key.modifiers.contains(KeyModifiers::ALT) => {
            SessionEvent::Insert(c)
        }
        _ => SessionEvent::Ignored,
    }
}

/// The interactive search loop over a fixed set of blocks.
pub struct Session<'a> {
    blocks: &'a [Block],
    engine: SearchEngine,
    state: SearchState,
    palette: Palette,
}

impl<'a> Session<'a> {
    pub fn new(blocks: &'a [Block], palette: Palette) -> Self {
        Self {
            blocks,
            engine: SearchEngine::new(),
            state: SearchState::new(),
            palette,
        }
    }

    pub fn matches(&self) -> MatchSet {
        self.engine.filter(self.blocks)
    }

    pub fn handle(&mut self, event: SessionEvent) -> Transition {
        let transition = self.state.apply(event);
        self.engine.set_pattern(self.state.query());
        transition
    }

    /// Raw text of the active match, delimiter included.
    pub fn selected_text(&self) -> Option<String> {
        self.matches()
            .active(self.state.active_index())
            .and_then(|idx| self.blocks.get(idx))
            .map(Block::raw_text)
    }

    pub fn draw(&self, frame: &mut Frame) {
        let matches = self.matches();
        let layout = PageLayout::compute(
            self.blocks,
            &matches,
            self.state.active_index(),
            frame.area().height as usize,
        );
        let view = View {
            blocks: self.blocks,
            layout: &layout,
            highlighter: self.engine.highlighter(),
            query: self.state.query(),
            palette: self.palette,
        };
        render(frame, &view);
    }

    /// Redraws after every event until the user confirms or interrupts.
    pub fn run<B, E>(&mut self, terminal: &mut Terminal<B>, events: &mut E) -> Result<SessionOutcome>
    where
        B: Backend,
        E: EventSource,
    {
        loop {
            terminal.draw(|f| self.draw(f))?;

            let event = events.next_event()?;
            match self.handle(keystroke_to_input(&event)) {
                Transition::Continue => {}
                Transition::Confirm => {
                    let output = self.selected_text();
                    log::debug!(
                        "confirmed query {:?} with {} matches",
                        self.state.query(),
                        self.matches().count()
                    );
                    return Ok(SessionOutcome::Confirmed(output));
                }
                Transition::Interrupt => return Ok(SessionOutcome::Interrupted),
            }
        }
    }
}
