use crate::app::study::StudyKind;
use crate::domain::model::{EventWindow, Person};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "numera")]
#[command(about = "Numerology studies from a name and a birth date")]
pub struct CliConfig {
    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: Option<String>,

    /// Birth date, DD/MM/YYYY or YYYY-MM-DD
    #[arg(long)]
    pub birth_date: Option<String>,

    #[arg(long, value_enum, default_value = "profile")]
    pub study: StudyKind,

    /// Reference year for personal-year and forecast studies
    #[arg(long)]
    pub year: Option<u32>,

    #[arg(long)]
    pub partner_first_name: Option<String>,

    #[arg(long)]
    pub partner_last_name: Option<String>,

    #[arg(long)]
    pub partner_birth_date: Option<String>,

    /// Event description for an optimal-dates study
    #[arg(long)]
    pub event: Option<String>,

    #[arg(long)]
    pub event_start: Option<String>,

    #[arg(long)]
    pub event_end: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Compute and print the numbers only, without calling the generation service
    #[arg(long)]
    pub offline: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn person(&self) -> Person {
        Person {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            birth_date: self.birth_date.clone(),
        }
    }

    pub fn partner(&self) -> Option<Person> {
        self.partner_first_name.as_ref().map(|first| Person {
            first_name: first.clone(),
            last_name: self.partner_last_name.clone(),
            birth_date: self.partner_birth_date.clone(),
        })
    }

    pub fn event_window(&self) -> Option<EventWindow> {
        match (&self.event, &self.event_start, &self.event_end) {
            (Some(event), Some(start), Some(end)) => Some(EventWindow {
                event: event.clone(),
                start: start.clone(),
                end: end.clone(),
            }),
            _ => None,
        }
    }
}
