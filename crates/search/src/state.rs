/// Input understood by the search session, already decoded from raw keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Insert(char),
    Backspace,
    ClearQuery,
    MoveDown,
    MoveUp,
    Confirm,
    Interrupt,
    Ignored,
}

/// What the event loop should do after an event has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue,
    Confirm,
    Interrupt,
}

/// Query text and selection of an interactive search session.
///
/// `active_index` counts matches from the last one in collection order; see
/// [`crate::MatchSet::active_rank`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    active_index: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn apply(&mut self, event: SessionEvent) -> Transition {
        match event {
            SessionEvent::Insert(c) => {
                self.query.push(c);
                self.active_index = 0;
            }
            SessionEvent::Backspace => {
                self.query.pop();
                self.active_index = 0;
            }
            SessionEvent::ClearQuery => {
                self.query.clear();
                self.active_index = 0;
            }
            SessionEvent::MoveDown => self.active_index = self.active_index.saturating_add(1),
            SessionEvent::MoveUp => self.active_index = self.active_index.saturating_sub(1),
            SessionEvent::Confirm => return Transition::Confirm,
            SessionEvent::Interrupt => return Transition::Interrupt,
            SessionEvent::Ignored => {}
        }
        Transition::Continue
    }
}
