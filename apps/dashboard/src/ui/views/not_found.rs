use crate::routes::Route;

pub fn show(ui: &mut egui::Ui, path: &str) -> Option<Route> {
    super::page_heading(ui, "Page not found");
    ui.label(format!("Nothing lives at '{path}'."));
    ui.button("Back to home").clicked().then_some(Route::Home)
}
