use crate::widgets::{TodoFilter, TodoList};

#[derive(Debug, Clone, Default)]
pub struct TodoView {
    pub list: TodoList,
    pub input: String,
}

impl TodoView {
    fn submit_input(&mut self) {
        if self.list.add(&self.input).is_some() {
            self.input.clear();
        }
    }
}

pub fn show(ui: &mut egui::Ui, view: &mut TodoView) {
    super::page_heading(ui, "To-Do");

    ui.horizontal(|ui| {
        let response = ui.add(
            egui::TextEdit::singleline(&mut view.input).hint_text("What needs doing?"),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Add").clicked() || entered {
            view.submit_input();
            response.request_focus();
        }
    });

    ui.horizontal(|ui| {
        for filter in TodoFilter::ALL {
            if ui
                .selectable_label(view.list.filter() == filter, filter.label())
                .clicked()
            {
                view.list.set_filter(filter);
            }
        }
        ui.separator();
        ui.weak(format!("{} of {} left", view.list.remaining(), view.list.len()));
    });
    ui.separator();

    if view.list.is_empty() {
        ui.weak("Nothing to do yet.");
        return;
    }

    let mut toggled = None;
    let mut removed = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for item in view.list.visible() {
            ui.horizontal(|ui| {
                let mut done = item.done;
                if ui.checkbox(&mut done, "").changed() {
                    toggled = Some(item.id);
                }
                let text = egui::RichText::new(&item.text);
                ui.label(if item.done { text.strikethrough().weak() } else { text });
                if ui.small_button("✕").clicked() {
                    removed = Some(item.id);
                }
            });
        }
    });

    if let Some(id) = toggled {
        view.list.toggle(id);
    }
    if let Some(id) = removed {
        view.list.remove(id);
    }
}
