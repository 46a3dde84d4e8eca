use chrono::NaiveDate;
use festival_feed::{is_past, region_label, search_url, FestivalPage, MapView};
use rand::Rng;
use shared::{domain::UserProfile, protocol::FestivalRecord};

const MARKER_RADIUS: f32 = 5.0;
const ACTIVE_MARKER_RADIUS: f32 = 8.0;
const MARKER_HIT_RADIUS: f32 = 10.0;

enum MapAction {
    Select(usize),
    Close,
}

pub fn show<R: Rng + ?Sized>(
    ui: &mut egui::Ui,
    page: &mut FestivalPage,
    profile: Option<&UserProfile>,
    today: NaiveDate,
    rng: &mut R,
) {
    super::page_heading(ui, "Festivals");

    if page.is_loading() {
        ui.horizontal(|ui| {
            ui.add(egui::Spinner::new());
            ui.label(page.loading_message());
        });
        return;
    }

    ui.horizontal_wrapped(|ui| {
        if ui.button("🎲 Recommend one").clicked() {
            page.recommend(today, rng);
        }
        ui.separator();
        ui.label("Month:");
        for month in 1..=12 {
            if ui
                .selectable_label(page.selected_month() == Some(month), month.to_string())
                .clicked()
            {
                page.toggle_month(month);
            }
        }
    });

    if let Some(festival) = page.recommended() {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.weak("How about this one?");
            festival_card(ui, festival, today);
        });
    }
    ui.separator();

    let shown = page.shown(today);
    if shown.is_empty() {
        ui.label(page.empty_state_message(profile.map(|profile| profile.name.as_str())));
        return;
    }

    let view = page.map_view(today);
    let active = page.active_marker();
    let mut action = None;
    ui.columns(2, |columns| {
        egui::ScrollArea::vertical()
            .id_salt("festival_cards")
            .show(&mut columns[0], |ui| {
                for (index, festival) in shown.iter().enumerate() {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        festival_card(ui, festival, today);
                        if view.marker(index).is_some() && ui.small_button("Show on map").clicked()
                        {
                            action = Some(MapAction::Select(index));
                        }
                    });
                }
            });

        if let Some(map_action) = festival_map(&mut columns[1], &view, &shown, active) {
            action = Some(map_action);
        }
    });

    match action {
        Some(MapAction::Select(index)) => page.select_marker(index),
        Some(MapAction::Close) => page.close_marker(),
        None => {}
    }
}

fn festival_card(ui: &mut egui::Ui, festival: &FestivalRecord, today: NaiveDate) {
    ui.horizontal(|ui| {
        if ui.link(egui::RichText::new(&festival.name).strong()).clicked() {
            open_search(ui.ctx(), &festival.name);
        }
        if is_past(festival, today) {
            ui.weak("(ended)");
        }
    });

    let dates = match (&festival.start_date, &festival.end_date) {
        (Some(start), Some(end)) => format!("{start} ~ {end}"),
        (Some(start), None) => start.clone(),
        (None, _) => "Dates to be announced".to_string(),
    };
    ui.label(dates);

    let place = [region_label(festival), festival.venue.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");
    if !place.is_empty() {
        ui.weak(place);
    }
}

fn open_search(ctx: &egui::Context, name: &str) {
    match search_url(name) {
        Ok(url) => ctx.open_url(egui::OpenUrl::new_tab(url.as_str())),
        Err(err) => tracing::warn!("could not build search link for '{name}': {err}"),
    }
}

fn marker_pos(view: &MapView, rect: egui::Rect, position: festival_feed::GeoPoint) -> egui::Pos2 {
    let (x, y) = view.normalized(position);
    rect.min + egui::vec2(x as f32 * rect.width(), y as f32 * rect.height())
}

/// The closest marker within the hit radius of `pointer`.
fn marker_at(view: &MapView, rect: egui::Rect, pointer: egui::Pos2) -> Option<usize> {
    view.markers
        .iter()
        .map(|marker| (marker.index, marker_pos(view, rect, marker.position).distance(pointer)))
        .filter(|(_, distance)| *distance <= MARKER_HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(index, _)| index)
}

fn festival_map(
    ui: &mut egui::Ui,
    view: &MapView,
    shown: &[&FestivalRecord],
    active: Option<usize>,
) -> Option<MapAction> {
    let side = ui.available_width().min(420.0);
    let (response, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::click());
    let rect = response.rect;
    let visuals = ui.visuals();
    painter.rect_filled(rect, 6.0, visuals.extreme_bg_color);

    let painter = painter.with_clip_rect(rect);
    for marker in &view.markers {
        let pos = marker_pos(view, rect, marker.position);
        if Some(marker.index) == active {
            painter.circle_filled(pos, ACTIVE_MARKER_RADIUS, visuals.selection.bg_fill);
        } else {
            painter.circle_filled(pos, MARKER_RADIUS, visuals.hyperlink_color);
        }
    }

    let mut action = None;
    if response.clicked() {
        if let Some(index) = response
            .interact_pointer_pos()
            .and_then(|pointer| marker_at(view, rect, pointer))
        {
            action = Some(MapAction::Select(index));
        }
    }
    ui.weak(format!(
        "{} of {} festivals on the map · zoom level {}",
        view.markers.len(),
        shown.len(),
        view.level
    ));

    if let Some(festival) = active.and_then(|index| shown.get(index)) {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.strong(&festival.name);
                if ui.small_button("✕").clicked() {
                    action = Some(MapAction::Close);
                }
            });
            if let Some(address) = festival.road_address.as_deref() {
                ui.label(address);
            }
        });
    }
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn located(lat: &str, lng: &str) -> FestivalRecord {
        FestivalRecord {
            latitude: Some(lat.into()),
            longitude: Some(lng.into()),
            ..FestivalRecord::named("f", Some("2030-05-01"))
        }
    }

    #[test]
    fn click_hits_nearest_marker_only_within_radius() {
        let a = located("36.2683", "127.6358");
        let b = located("35.0", "129.0");
        let shown = [&a, &b];
        let view = MapView::for_festivals(&shown);
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(600.0, 600.0));

        let center = marker_pos(&view, rect, view.markers[0].position);
        assert_eq!(marker_at(&view, rect, center + egui::vec2(3.0, 0.0)), Some(0));

        let east = marker_pos(&view, rect, view.markers[1].position);
        assert_eq!(marker_at(&view, rect, east), Some(1));
        assert_eq!(marker_at(&view, rect, egui::pos2(5.0, 5.0)), None);
    }
}
