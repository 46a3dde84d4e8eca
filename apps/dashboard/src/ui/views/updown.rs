use rand::Rng;
use shared::domain::UserProfile;

use crate::widgets::{updown::GUESS_RANGE, GuessFeedback, UpDownGame};

#[derive(Debug, Clone)]
pub struct UpDownView {
    pub game: UpDownGame,
    pub input: String,
}

impl UpDownView {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            game: UpDownGame::new(rng),
            input: String::new(),
        }
    }

    fn submit_input(&mut self) -> GuessFeedback {
        let feedback = self.game.guess_text(&self.input);
        self.input.clear();
        feedback
    }
}

pub fn show<R: Rng + ?Sized>(
    ui: &mut egui::Ui,
    view: &mut UpDownView,
    profile: Option<&UserProfile>,
    rng: &mut R,
) {
    super::page_heading(ui, "Up & Down");
    ui.label(format!(
        "I'm thinking of a number between {} and {}.",
        GUESS_RANGE.start(),
        GUESS_RANGE.end()
    ));

    ui.horizontal(|ui| {
        let response = ui.add_enabled(
            !view.game.is_solved(),
            egui::TextEdit::singleline(&mut view.input)
                .hint_text("Your guess")
                .desired_width(120.0),
        );
        let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui
            .add_enabled(!view.game.is_solved(), egui::Button::new("Guess"))
            .clicked()
            || entered
        {
            view.submit_input();
            response.request_focus();
        }
        if ui.button("New game").clicked() {
            view.game.reset(rng);
            view.input.clear();
        }
    });

    if let Some(feedback) = view.game.last_feedback() {
        let text = feedback.message(profile.map(|profile| profile.name.as_str()));
        let text = match feedback {
            GuessFeedback::Correct { .. } => egui::RichText::new(text).strong(),
            GuessFeedback::Invalid => egui::RichText::new(text).color(ui.visuals().warn_fg_color),
            GuessFeedback::Up | GuessFeedback::Down => egui::RichText::new(text),
        };
        ui.label(text);
    }
    ui.weak(format!("Attempts: {}", view.game.attempts()));
}
