#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl TodoFilter {
    pub const ALL: [TodoFilter; 3] = [TodoFilter::All, TodoFilter::Active, TodoFilter::Completed];

    pub fn label(self) -> &'static str {
        match self {
            TodoFilter::All => "All",
            TodoFilter::Active => "In progress",
            TodoFilter::Completed => "Done",
        }
    }

    fn admits(self, item: &TodoItem) -> bool {
        match self {
            TodoFilter::All => true,
            TodoFilter::Active => !item.done,
            TodoFilter::Completed => item.done,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoList {
    items: Vec<TodoItem>,
    next_id: u64,
    filter: TodoFilter,
}

impl TodoList {
    /// Blank text is ignored. Returns the new item's id.
    pub fn add(&mut self, text: &str) -> Option<u64> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.next_id += 1;
        self.items.push(TodoItem {
            id: self.next_id,
            text: text.to_string(),
            done: false,
        });
        Some(self.next_id)
    }

    pub fn toggle(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.done = !item.done;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    pub fn filter(&self) -> TodoFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: TodoFilter) {
        self.filter = filter;
    }

    pub fn visible(&self) -> Vec<&TodoItem> {
        self.items
            .iter()
            .filter(|item| self.filter.admits(item))
            .collect()
    }

    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|item| !item.done).count()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
