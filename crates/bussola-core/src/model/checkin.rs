//! Daily check-in records and their priorities.
//!
//! A check-in is keyed by its calendar `date`; the collection holds at most
//! one check-in per date. `tarefas_completadas` mirrors the number of
//! completed priorities after every priority mutation, but the evening flow
//! may overwrite it with a self-reported count.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_ENERGY: u8 = 1;
pub const MAX_ENERGY: u8 = 5;

/// Subjective chaos level of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChaosLevel {
    Baixo,
    #[default]
    Medio,
    Alto,
}

impl ChaosLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ChaosLevel::Baixo => "BAIXO",
            ChaosLevel::Medio => "MÉDIO",
            ChaosLevel::Alto => "ALTO",
        }
    }
}

impl std::str::FromStr for ChaosLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baixo" | "low" => Ok(ChaosLevel::Baixo),
            "medio" | "médio" | "medium" => Ok(ChaosLevel::Medio),
            "alto" | "high" => Ok(ChaosLevel::Alto),
            other => Err(format!("unknown chaos level '{other}', expected baixo|medio|alto")),
        }
    }
}

/// Checks that an energy reading lies in 1..=5.
pub fn validate_energy(field: &str, value: u8) -> Result<u8, ValidationError> {
    if (MIN_ENERGY..=MAX_ENERGY).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::EnergyOutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

/// A task the user picked for the day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Priority {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Explicit creation time. Older documents lack it; see
    /// [`crate::analytics::impact`] for the fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Priority {
    pub fn new(id: impl Into<String>, text: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            completed: false,
            created_at: Some(created_at),
        }
    }
}

/// Morning readings of the three energy axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnergyReading {
    pub fisica: u8,
    pub mental: u8,
    pub emocional: u8,
}

impl EnergyReading {
    pub fn new(fisica: u8, mental: u8, emocional: u8) -> Result<Self, ValidationError> {
        Ok(Self {
            fisica: validate_energy("fisica", fisica)?,
            mental: validate_energy("mental", mental)?,
            emocional: validate_energy("emocional", emocional)?,
        })
    }

    /// Same value on all three axes.
    pub fn uniform(level: u8) -> Result<Self, ValidationError> {
        Self::new(level, level, level)
    }

    pub fn average(&self) -> f64 {
        (self.fisica as f64 + self.mental as f64 + self.emocional as f64) / 3.0
    }
}

/// One day's energy, priority and reflection record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyCheckin {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub energia_fisica: u8,
    pub energia_mental: u8,
    pub energia_emocional: u8,
    pub nivel_caos: ChaosLevel,
    #[serde(default)]
    pub prioridades: Vec<Priority>,
    #[serde(default)]
    pub tarefas_completadas: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reflexao_noturna: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energia_fisica_noturna: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energia_mental_noturna: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energia_emocional_noturna: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_completed: Option<bool>,
}

impl DailyCheckin {
    /// Mean of the three morning energy readings.
    pub fn morning_average(&self) -> f64 {
        (self.energia_fisica as f64 + self.energia_mental as f64 + self.energia_emocional as f64)
            / 3.0
    }

    /// Morning average rounded to the nearest integer (halves round up).
    pub fn rounded_morning_average(&self) -> u8 {
        self.morning_average().round() as u8
    }

    /// Mean of the evening readings, when all three were recorded.
    pub fn evening_average(&self) -> Option<f64> {
        let f = self.energia_fisica_noturna?;
        let m = self.energia_mental_noturna?;
        let e = self.energia_emocional_noturna?;
        Some((f as f64 + m as f64 + e as f64) / 3.0)
    }

    pub fn completed_count(&self) -> u32 {
        self.prioridades.iter().filter(|p| p.completed).count() as u32
    }

    pub fn is_evening_completed(&self) -> bool {
        self.evening_completed.unwrap_or(false)
    }

    pub fn find_priority(&self, priority_id: &str) -> Option<&Priority> {
        self.prioridades.iter().find(|p| p.id == priority_id)
    }
}

/// Caller-supplied fields for a new check-in; id and owner are assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckinDraft {
    pub date: NaiveDate,
    pub energy: EnergyReading,
    pub nivel_caos: ChaosLevel,
    pub prioridades: Vec<Priority>,
    pub tarefas_completadas: u32,
}

impl CheckinDraft {
    pub fn into_checkin(self, id: String, user_id: String) -> DailyCheckin {
        DailyCheckin {
            id,
            user_id,
            date: self.date,
            energia_fisica: self.energy.fisica,
            energia_mental: self.energy.mental,
            energia_emocional: self.energy.emocional,
            nivel_caos: self.nivel_caos,
            prioridades: self.prioridades,
            tarefas_completadas: self.tarefas_completadas,
            reflexao_noturna: None,
            energia_fisica_noturna: None,
            energia_mental_noturna: None,
            energia_emocional_noturna: None,
            evening_completed: None,
        }
    }
}

/// Partial update merged into an existing check-in. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckinPatch {
    pub energy: Option<EnergyReading>,
    pub nivel_caos: Option<ChaosLevel>,
    pub prioridades: Option<Vec<Priority>>,
    pub tarefas_completadas: Option<u32>,
    pub evening_energy: Option<EnergyReading>,
    pub reflexao_noturna: Option<String>,
    pub evening_completed: Option<bool>,
}

impl CheckinPatch {
    pub fn apply_to(&self, checkin: &mut DailyCheckin) {
        if let Some(energy) = self.energy {
            checkin.energia_fisica = energy.fisica;
            checkin.energia_mental = energy.mental;
            checkin.energia_emocional = energy.emocional;
        }
        if let Some(level) = self.nivel_caos {
            checkin.nivel_caos = level;
        }
        if let Some(prioridades) = &self.prioridades {
            checkin.prioridades = prioridades.clone();
        }
        if let Some(count) = self.tarefas_completadas {
            checkin.tarefas_completadas = count;
        }
        if let Some(energy) = self.evening_energy {
            checkin.energia_fisica_noturna = Some(energy.fisica);
            checkin.energia_mental_noturna = Some(energy.mental);
            checkin.energia_emocional_noturna = Some(energy.emocional);
        }
        if let Some(text) = &self.reflexao_noturna {
            checkin.reflexao_noturna = Some(text.clone());
        }
        if let Some(done) = self.evening_completed {
            checkin.evening_completed = Some(done);
        }
    }
}
