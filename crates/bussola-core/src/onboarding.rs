//! First-run diagnosis wizard.
//!
//! The wizard asks three questions (current energy, how the day looks, main
//! problem) and then up to three priorities. The answers produce a
//! recommendation and the user's first check-in.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::IdGenerator;
use crate::error::ValidationError;
use crate::model::{ChaosLevel, CheckinDraft, EnergyReading, Priority};

/// Problems offered on the third question.
pub const PROBLEM_OPTIONS: [&str; 4] = [
    "Muitas interrupções",
    "Não sei por onde começar",
    "Procrastinação",
    "Burnout/exaustão",
];

/// Answer to "how is your energy right now?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Esgotado,
    #[default]
    Ok,
    Cheio,
}

impl EnergyLevel {
    pub fn label(&self) -> &'static str {
        match self {
            EnergyLevel::Esgotado => "BAIXA",
            EnergyLevel::Ok => "MÉDIA",
            EnergyLevel::Cheio => "ALTA",
        }
    }

    /// Value recorded on all three energy axes of the first check-in.
    pub fn energy_value(&self) -> u8 {
        match self {
            EnergyLevel::Esgotado => 1,
            EnergyLevel::Ok => 3,
            EnergyLevel::Cheio => 5,
        }
    }
}

impl std::str::FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "esgotado" => Ok(EnergyLevel::Esgotado),
            "ok" => Ok(EnergyLevel::Ok),
            "cheio" => Ok(EnergyLevel::Cheio),
            other => Err(format!("unknown energy '{other}', expected esgotado|ok|cheio")),
        }
    }
}

/// Answer to "how does your day look?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Caotico,
    #[default]
    MeioTermo,
    Tranquilo,
}

impl DayType {
    pub fn label(&self) -> &'static str {
        match self {
            DayType::Caotico => "CAÓTICO",
            DayType::MeioTermo => "MEIO TERMO",
            DayType::Tranquilo => "TRANQUILO",
        }
    }

    pub fn chaos_level(&self) -> ChaosLevel {
        match self {
            DayType::Caotico => ChaosLevel::Alto,
            DayType::MeioTermo => ChaosLevel::Medio,
            DayType::Tranquilo => ChaosLevel::Baixo,
        }
    }
}

impl std::str::FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "caotico" | "caótico" => Ok(DayType::Caotico),
            "meio_termo" => Ok(DayType::MeioTermo),
            "tranquilo" => Ok(DayType::Tranquilo),
            other => Err(format!(
                "unknown day type '{other}', expected caotico|meio_termo|tranquilo"
            )),
        }
    }
}

/// Wizard answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Diagnosis {
    pub energia: EnergyLevel,
    pub dia: DayType,
    #[serde(default)]
    pub problema: String,
}

/// What the wizard suggests after the diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub energia: String,
    pub dia: String,
    pub priorities: u8,
    pub message: String,
}

impl Diagnosis {
    pub fn new(energia: EnergyLevel, dia: DayType, problema: impl Into<String>) -> Self {
        Self {
            energia,
            dia,
            problema: problema.into(),
        }
    }

    /// Exhausted or chaotic days get one priority, full and calm days three.
    pub fn recommended_priorities(&self) -> u8 {
        if self.energia == EnergyLevel::Esgotado || self.dia == DayType::Caotico {
            1
        } else if self.energia == EnergyLevel::Cheio && self.dia == DayType::Tranquilo {
            3
        } else {
            2
        }
    }

    pub fn recommendation(&self) -> Recommendation {
        let priorities = self.recommended_priorities();
        let message = match priorities {
            1 => "1 prioridade essencial hoje",
            3 => "3 prioridades para aproveitar o dia",
            _ => "2 prioridades essenciais hoje",
        };
        Recommendation {
            energia: self.energia.label().to_string(),
            dia: self.dia.label().to_string(),
            priorities,
            message: message.to_string(),
        }
    }

    /// Build the first check-in from the diagnosis and the typed priorities.
    ///
    /// Blank entries are dropped; at least one priority must remain.
    pub fn initial_checkin(
        &self,
        priorities: &[String],
        today: NaiveDate,
        ids: &dyn IdGenerator,
        now: DateTime<Utc>,
    ) -> Result<CheckinDraft, ValidationError> {
        let prioridades: Vec<Priority> = priorities
            .iter()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(|text| Priority::new(ids.next_id(), text, now))
            .collect();
        if prioridades.is_empty() {
            return Err(ValidationError::EmptyText("prioridades".to_string()));
        }

        Ok(CheckinDraft {
            date: today,
            energy: EnergyReading::uniform(self.energia.energy_value())?,
            nivel_caos: self.dia.chaos_level(),
            prioridades,
            tarefas_completadas: 0,
        })
    }
}
