use bevy::prelude::*;
use clap::{Parser, ValueEnum};

#[derive(Resource, Debug, Parser, Clone)]
pub struct AppSetupConfiguration {
    #[arg(long = "schedule", default_value_t = ScheduleToUse::Update)]
    pub schedule_to_use: ScheduleToUse,
    /// Start without grabbing the mouse cursor.
    #[arg(long = "free-cursor")]
    pub free_cursor: bool,
}

impl AppSetupConfiguration {
    pub fn from_environment() -> Self {
        Self::parse()
    }
}

#[derive(Debug, Clone, PartialEq, ValueEnum)]
pub enum ScheduleToUse {
    Update,
    FixedUpdate,
}

impl std::fmt::Display for ScheduleToUse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Update => "update",
            Self::FixedUpdate => "fixed-update",
        })
    }
}
