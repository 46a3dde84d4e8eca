use std::time::{Duration, Instant};

use client_core::{FetchScope, Generation, HomeField};
use crossbeam_channel::{Receiver, Sender};
use festival_feed::FestivalPage;
use shared::domain::UserProfile;
use storage::{KeyValueStore, ProfileStore};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_backend_command};
use crate::routes::Route;
use crate::ui::{
    onboarding::OnboardingModal,
    theme::ThemeMode,
    views::{self, HomeView, TodoView, UpDownView},
};
use crate::widgets::Counter;

const IDLE_REPAINT: Duration = Duration::from_millis(100);

/// State of the mounted route. Replaced wholesale on navigation.
#[derive(Debug)]
pub enum ActiveView {
    Home(HomeView),
    TodoList(TodoView),
    Counter(Counter),
    UpDown(UpDownView),
    Festivals(FestivalPage),
    NotFound(String),
}

pub struct DashboardApp<S: KeyValueStore> {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    festival_page_size: u32,
    profile_store: ProfileStore<S>,
    profile: Option<UserProfile>,
    onboarding: OnboardingModal,
    route: Route,
    view: ActiveView,
    scope: FetchScope,
    theme: ThemeMode,
    applied_theme: Option<ThemeMode>,
    path_input: String,
    status: Option<String>,
}

impl<S: KeyValueStore> DashboardApp<S> {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        profile_store: ProfileStore<S>,
        festival_page_size: u32,
        start: Route,
    ) -> Self {
        let profile = profile_store.load();
        let onboarding = OnboardingModal::for_startup(profile.as_ref());
        let mut app = Self {
            cmd_tx,
            ui_rx,
            festival_page_size,
            profile_store,
            profile,
            onboarding,
            route: Route::Home,
            view: ActiveView::Home(HomeView::default()),
            scope: FetchScope::default(),
            theme: ThemeMode::default(),
            applied_theme: None,
            path_input: String::new(),
            status: None,
        };
        app.navigate(start);
        app
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn view(&self) -> &ActiveView {
        &self.view
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Unmounts the current view and mounts `route`, re-fetching what it needs.
    pub fn navigate(&mut self, route: Route) {
        self.scope.end();
        let generation = self.scope.begin();
        tracing::debug!(path = route.path(), generation = generation.value(), "mounting view");

        self.view = match &route {
            Route::Home => {
                for field in HomeField::ALL {
                    self.dispatch(BackendCommand::LoadHomeField { generation, field });
                }
                ActiveView::Home(HomeView::default())
            }
            Route::TodoList => ActiveView::TodoList(TodoView::default()),
            Route::Counter => ActiveView::Counter(Counter::default()),
            Route::UpDown => ActiveView::UpDown(UpDownView::new(&mut rand::thread_rng())),
            Route::FestivalList => {
                self.dispatch(BackendCommand::LoadFestivals {
                    generation,
                    num_of_rows: self.festival_page_size,
                });
                ActiveView::Festivals(FestivalPage::new(Instant::now()))
            }
            Route::NotFound(path) => ActiveView::NotFound(path.clone()),
        };
        self.path_input = route.path().to_string();
        self.route = route;
    }

    fn dispatch(&mut self, cmd: BackendCommand) {
        if let Some(status) = dispatch_backend_command(&self.cmd_tx, cmd) {
            self.status = Some(status);
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.apply_event(event);
        }
    }

    /// Results from an unmounted view are dropped.
    pub fn apply_event(&mut self, event: UiEvent) {
        if let Some(generation) = event.generation() {
            if !self.scope.accepts(generation) {
                log_stale(generation, self.scope.live());
                return;
            }
        }

        match (event, &mut self.view) {
            (UiEvent::FestivalsLoaded { records, .. }, ActiveView::Festivals(page)) => {
                page.finish_loading(records);
            }
            (UiEvent::HomeFieldLoaded { field, text, .. }, ActiveView::Home(home)) => {
                home.set(field, text);
            }
            (UiEvent::BackendUnavailable(message), _) => {
                tracing::error!("{message}");
                self.status = Some(message);
            }
            (event, _) => {
                tracing::debug!(?event, "event does not match mounted view; ignoring");
            }
        }
    }

    pub fn open_profile_editor(&mut self) {
        self.onboarding.open_with(self.profile.as_ref());
    }

    /// Persists `profile` under the user info key and makes it current.
    pub fn submit_profile(&mut self, profile: UserProfile) {
        if let Err(err) = self.profile_store.save(&profile) {
            tracing::warn!("failed to persist user profile: {err}");
            self.status = Some(format!("Could not save your info: {err}"));
        } else {
            tracing::info!("user profile saved");
        }
        self.profile = Some(profile);
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if self.applied_theme == Some(self.theme) {
            return;
        }
        ctx.set_visuals(self.theme.visuals());
        self.applied_theme = Some(self.theme);
    }

    fn show_nav_bar(&mut self, ctx: &egui::Context) -> Option<Route> {
        let mut target = None;
        egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for route in Route::NAVIGABLE {
                    let selected = *self.route() == route;
                    if ui.selectable_label(selected, route.title()).clicked() && !selected {
                        target = Some(route);
                    }
                }
                ui.separator();

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .desired_width(140.0)
                        .hint_text("/path"),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    target = Some(Route::from_path(&self.path_input));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(self.theme.toggle_label()).clicked() {
                        self.theme = self.theme.toggled();
                    }
                    if let Some(profile) = self.profile() {
                        ui.weak(format!("Hi, {}", profile.name));
                    }
                });
            });
            if let Some(status) = &self.status {
                ui.colored_label(ui.visuals().warn_fg_color, status);
            }
        });
        target
    }

    fn show_active_view(&mut self, ctx: &egui::Context) -> Option<Route> {
        let profile = self.profile.as_ref();
        let mut target = None;
        egui::CentralPanel::default().show(ctx, |ui| match &mut self.view {
            ActiveView::Home(home) => target = views::home::show(ui, home, profile),
            ActiveView::TodoList(todo) => views::todo::show(ui, todo),
            ActiveView::Counter(counter) => views::counter::show(ui, counter),
            ActiveView::UpDown(game) => {
                views::updown::show(ui, game, profile, &mut rand::thread_rng())
            }
            ActiveView::Festivals(page) => {
                if page.tick_loading(Instant::now(), &mut rand::thread_rng()) {
                    tracing::trace!(message = page.loading_message(), "loading message rotated");
                }
                let today = chrono::Local::now().date_naive();
                views::festivals::show(ui, page, profile, today, &mut rand::thread_rng());
            }
            ActiveView::NotFound(path) => target = views::not_found::show(ui, path),
        });
        target
    }

    fn show_edit_button(&mut self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("edit_profile_button"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                if ui.button("✎ Edit info").clicked() {
                    self.open_profile_editor();
                }
            });
    }

    fn repaint_interval(&self) -> Duration {
        match self.view() {
            ActiveView::Festivals(page) if page.is_loading() => page
                .ticker()
                .time_until_next(Instant::now())
                .min(IDLE_REPAINT),
            _ => IDLE_REPAINT,
        }
    }
}

fn log_stale(generation: Generation, live: Option<Generation>) {
    tracing::debug!(
        generation = generation.value(),
        live = ?live.map(Generation::value),
        "dropping result for unmounted view"
    );
}

impl<S: KeyValueStore> eframe::App for DashboardApp<S> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        let mut target = self.show_nav_bar(ctx);
        if let Some(route) = self.show_active_view(ctx) {
            target = Some(route);
        }
        self.show_edit_button(ctx);
        if let Some(profile) = self.onboarding.show(ctx) {
            self.submit_profile(profile);
        }

        if let Some(route) = target {
            self.navigate(route);
        }
        ctx.request_repaint_after(self.repaint_interval());
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
