use client_core::HomeField;
use shared::domain::UserProfile;

use crate::routes::Route;

const FEATURE_CARDS: [(Route, &str); 4] = [
    (Route::TodoList, "Keep track of what needs doing and tick it off."),
    (Route::Counter, "A counter that goes up, down and back to zero."),
    (Route::UpDown, "Guess the secret number between 1 and 100."),
    (Route::FestivalList, "Browse upcoming festivals and find them on the map."),
];

/// Blank fields are ones that have not arrived or failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeView {
    message: String,
    characteristic: String,
    quote: String,
}

impl HomeView {
    pub fn set(&mut self, field: HomeField, text: String) {
        match field {
            HomeField::Message => self.message = text,
            HomeField::Characteristic => self.characteristic = text,
            HomeField::Quote => self.quote = text,
        }
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// `"{message} {characteristic} {name}"`, skipping blank parts.
    pub fn greeting(&self, name: Option<&str>) -> String {
        [
            self.message.trim(),
            self.characteristic.trim(),
            name.unwrap_or_default().trim(),
        ]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

pub fn show(ui: &mut egui::Ui, view: &HomeView, profile: Option<&UserProfile>) -> Option<Route> {
    let greeting = view.greeting(profile.map(|profile| profile.name.as_str()));
    if !greeting.is_empty() {
        ui.heading(greeting);
    }
    if !view.quote().is_empty() {
        ui.label(egui::RichText::new(format!("“{}”", view.quote())).italics());
    }
    ui.add_space(12.0);

    let mut target = None;
    for (route, blurb) in FEATURE_CARDS {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.strong(route.title());
            ui.label(blurb);
            if ui.button("Open").clicked() {
                target = Some(route);
            }
        });
        ui.add_space(6.0);
    }
    target
}
