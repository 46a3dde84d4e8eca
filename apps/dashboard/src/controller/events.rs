//! Backend to UI events. Every load result carries the generation it was
//! requested under so the view can drop answers that arrive after unmount.

use client_core::{Generation, HomeField};
use shared::protocol::FestivalRecord;

#[derive(Debug)]
pub enum UiEvent {
    FestivalsLoaded {
        generation: Generation,
        records: Vec<FestivalRecord>,
    },
    HomeFieldLoaded {
        generation: Generation,
        field: HomeField,
        text: String,
    },
    BackendUnavailable(String),
}

impl UiEvent {
    pub fn generation(&self) -> Option<Generation> {
        match self {
            UiEvent::FestivalsLoaded { generation, .. }
            | UiEvent::HomeFieldLoaded { generation, .. } => Some(*generation),
            UiEvent::BackendUnavailable(_) => None,
        }
    }
}
