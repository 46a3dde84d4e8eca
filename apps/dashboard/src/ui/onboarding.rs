//! Profile capture modal: opens at startup when nothing is stored and can be
//! reopened from the floating edit button.

use shared::domain::{Gender, ProfileDraft, UserProfile};

#[derive(Debug, Clone, Default)]
pub struct OnboardingModal {
    open: bool,
    draft: ProfileDraft,
    error: Option<String>,
}

impl OnboardingModal {
    pub fn for_startup(saved: Option<&UserProfile>) -> Self {
        let mut modal = Self::default();
        if saved.is_none() {
            modal.open_with(None);
        }
        modal
    }

    /// Pre-fills from the last persisted profile, if any.
    pub fn open_with(&mut self, saved: Option<&UserProfile>) {
        self.draft = saved.map(ProfileDraft::from_profile).unwrap_or_default();
        self.error = None;
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft_mut(&mut self) -> &mut ProfileDraft {
        &mut self.draft
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A valid draft closes the modal; an invalid one keeps it open with an
    /// inline message.
    pub fn submit(&mut self) -> Option<UserProfile> {
        match self.draft.to_profile() {
            Ok(profile) => {
                self.close();
                Some(profile)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) -> Option<UserProfile> {
        if !self.open {
            return None;
        }

        let mut submitted = None;
        let mut window_open = true;
        egui::Window::new("Tell us about you")
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("onboarding_fields")
                    .num_columns(2)
                    .spacing(egui::vec2(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.label("Name");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.draft.name)
                                .hint_text("Your name"),
                        );
                        ui.end_row();

                        ui.label("Birthdate");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.draft.birthdate)
                                .hint_text("YYYY-MM-DD"),
                        );
                        ui.end_row();

                        ui.label("Gender");
                        egui::ComboBox::from_id_salt("onboarding_gender")
                            .selected_text(self.draft.gender.label())
                            .show_ui(ui, |ui| {
                                for gender in Gender::ALL {
                                    ui.selectable_value(
                                        &mut self.draft.gender,
                                        gender,
                                        gender.label(),
                                    );
                                }
                            });
                        ui.end_row();
                    });

                if let Some(error) = self.error() {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                }

                ui.add_space(6.0);
                if ui.button("Save").clicked() {
                    submitted = self.submit();
                }
            });

        if !window_open {
            self.close();
        }
        submitted
    }
}
