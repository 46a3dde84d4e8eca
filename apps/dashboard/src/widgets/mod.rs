//! View-local state machines behind the demo widgets. Each lives only as long
//! as its view is mounted.

pub mod counter;
pub mod todo;
pub mod updown;

pub use counter::{Counter, CounterAction};
pub use todo::{TodoFilter, TodoList};
pub use updown::{GuessFeedback, UpDownGame};
