use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::Operation;

#[derive(Debug, Clone)]
pub(crate) struct PickerEntry {
    pub index: usize,
    pub label: String,
    pub summary: Option<String>,
}

impl PickerEntry {
    fn haystack(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{} {}", self.label, summary),
            None => self.label.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PickerAction {
    Continue,
    /// Index into the operation slice the picker was built from.
    Selected(usize),
    Cancelled,
}

/// Filterable list of operations.
#[derive(Debug, Clone)]
pub(crate) struct OperationPicker {
    entries: Vec<PickerEntry>,
    query: String,
    filtered: Vec<usize>,
    selected: usize,
}

impl OperationPicker {
    pub(crate) fn new<'a>(operations: impl IntoIterator<Item = (usize, &'a Operation)>) -> Self {
        let entries = operations
            .into_iter()
            .map(|(index, op)| PickerEntry {
                index,
                label: op.label(),
                summary: op.summary.clone(),
            })
            .collect::<Vec<_>>();
        let mut picker = Self {
            filtered: Vec::new(),
            entries,
            query: String::new(),
            selected: 0,
        };
        picker.update_filter();
        picker
    }

    pub(crate) fn query(&self) -> &str {
        &self.query
    }

    pub(crate) fn selected(&self) -> usize {
        self.selected
    }

    pub(crate) fn total(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn visible(&self) -> impl Iterator<Item = &PickerEntry> {
        self.filtered.iter().map(|&position| &self.entries[position])
    }

    pub(crate) fn handle_key(&mut self, key: &KeyEvent) -> PickerAction {
        if key.kind != KeyEventKind::Press {
            return PickerAction::Continue;
        }
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => PickerAction::Cancelled,
            KeyCode::Char('c') | KeyCode::Char('q') if control => PickerAction::Cancelled,
            KeyCode::Enter => self
                .filtered
                .get(self.selected)
                .map(|&position| PickerAction::Selected(self.entries[position].index))
                .unwrap_or(PickerAction::Continue),
            KeyCode::Up => {
                self.step(-1);
                PickerAction::Continue
            }
            KeyCode::Down | KeyCode::Tab => {
                self.step(1);
                PickerAction::Continue
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.update_filter();
                }
                PickerAction::Continue
            }
            KeyCode::Char(c) if !control => {
                self.query.push(c);
                self.update_filter();
                PickerAction::Continue
            }
            _ => PickerAction::Continue,
        }
    }

    fn step(&mut self, delta: i32) {
        if self.filtered.is_empty() {
            return;
        }
        let len = self.filtered.len() as i32;
        self.selected = (self.selected as i32 + delta).rem_euclid(len) as usize;
    }

    fn update_filter(&mut self) {
        self.filtered = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| fuzzy_matches(&self.query, &entry.haystack()))
            .map(|(position, _)| position)
            .collect();
        self.selected = 0;
    }
}

/// Case-insensitive subsequence match; whitespace in the query is ignored.
pub(crate) fn fuzzy_matches(query: &str, text: &str) -> bool {
    let query = query.to_lowercase();
    let mut wanted = query.chars().filter(|c| !c.is_whitespace()).peekable();
    for c in text.to_lowercase().chars() {
        match wanted.peek() {
            None => return true,
            Some(&next) if next == c => {
                wanted.next();
            }
            Some(_) => {}
        }
    }
    wanted.peek().is_none()
}
