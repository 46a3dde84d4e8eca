//! Route views. Each receives the profile explicitly and owns only its own
//! state, which is dropped on navigation.

pub mod counter;
pub mod festivals;
pub mod home;
pub mod not_found;
pub mod todo;
pub mod updown;

pub use home::HomeView;
pub use todo::TodoView;
pub use updown::UpDownView;

fn page_heading(ui: &mut egui::Ui, title: &str) {
    ui.heading(title);
    ui.separator();
}
