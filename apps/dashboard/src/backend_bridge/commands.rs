//! Backend commands queued from UI to backend worker.

use client_core::{Generation, HomeField};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    LoadFestivals {
        generation: Generation,
        num_of_rows: u32,
    },
    LoadHomeField {
        generation: Generation,
        field: HomeField,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::LoadFestivals { .. } => "load_festivals",
            BackendCommand::LoadHomeField { .. } => "load_home_field",
        }
    }
}
