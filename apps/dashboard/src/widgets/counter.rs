#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterAction {
    Increment,
    Decrement,
    Reset,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counter {
    value: i64,
}

impl Counter {
    pub fn value(&self) -> i64 {
        self.value
    }

    pub fn apply(&mut self, action: CounterAction) {
        self.value = match action {
            CounterAction::Increment => self.value.saturating_add(1),
            CounterAction::Decrement => self.value.saturating_sub(1),
            CounterAction::Reset => 0,
        };
    }
}
