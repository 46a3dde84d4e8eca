use crate::widgets::{Counter, CounterAction};

pub fn show(ui: &mut egui::Ui, counter: &mut Counter) {
    super::page_heading(ui, "Counter");
    ui.label(egui::RichText::new(counter.value().to_string()).size(48.0).strong());
    ui.horizontal(|ui| {
        if ui.button("−").clicked() {
            counter.apply(CounterAction::Decrement);
        }
        if ui.button("+").clicked() {
            counter.apply(CounterAction::Increment);
        }
        if ui.button("Reset").clicked() {
            counter.apply(CounterAction::Reset);
        }
    });
}
