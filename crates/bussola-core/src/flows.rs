//! Morning and evening check-in submissions.
//!
//! These sit one level above [`crate::ops`]: they validate user input and
//! enforce the priorities-per-day cap before delegating to the pure
//! operations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::IdGenerator;
use crate::error::{CoreError, Result, ValidationError};
use crate::model::{AppData, ChaosLevel, CheckinDraft, CheckinPatch, EnergyReading, Priority};
use crate::ops;

/// Morning form: energy, chaos and the day's priorities.
#[derive(Debug, Clone, PartialEq)]
pub struct MorningCheckin {
    pub energy: EnergyReading,
    pub nivel_caos: ChaosLevel,
    pub priorities: Vec<String>,
}

/// Evening form: how the day went.
#[derive(Debug, Clone, PartialEq)]
pub struct EveningCheckin {
    pub energy: EnergyReading,
    pub reflexao: String,
    /// Self-reported completed tasks; defaults to the completed priorities.
    pub tarefas_completadas: Option<u32>,
}

/// What a morning submission did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MorningOutcome {
    pub checkin_id: String,
    pub created: bool,
}

/// Trims the typed priorities and rejects an empty or oversized list.
fn clean_priorities(texts: &[String], max_priorities: usize) -> Result<Vec<String>> {
    let cleaned: Vec<String> = texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if cleaned.is_empty() {
        return Err(ValidationError::EmptyText("prioridades".to_string()).into());
    }
    if cleaned.len() > max_priorities {
        return Err(CoreError::cap_exceeded("priorities", max_priorities));
    }
    Ok(cleaned)
}

/// Create today's check-in, or refresh it when one already exists.
///
/// On refresh, priorities whose text is unchanged keep their id, completion
/// and creation time; new texts start open.
pub fn submit_morning(
    data: &AppData,
    input: &MorningCheckin,
    today: NaiveDate,
    now: DateTime<Utc>,
    ids: &dyn IdGenerator,
    max_priorities: usize,
) -> Result<(AppData, MorningOutcome)> {
    let texts = clean_priorities(&input.priorities, max_priorities)?;

    match data.checkin_on(today) {
        Some(existing) => {
            let mut reused: Vec<&str> = Vec::new();
            let mut prioridades: Vec<Priority> = Vec::with_capacity(texts.len());
            for text in texts {
                let kept = existing
                    .prioridades
                    .iter()
                    .find(|p| p.text.trim() == text && !reused.contains(&p.id.as_str()));
                match kept {
                    Some(p) => {
                        reused.push(&p.id);
                        prioridades.push(p.clone());
                    }
                    None => prioridades.push(Priority::new(ids.next_id(), text, now)),
                }
            }
            let completed = prioridades.iter().filter(|p| p.completed).count() as u32;
            let patch = CheckinPatch {
                energy: Some(input.energy),
                nivel_caos: Some(input.nivel_caos),
                prioridades: Some(prioridades),
                tarefas_completadas: Some(completed),
                ..Default::default()
            };
            let outcome = MorningOutcome {
                checkin_id: existing.id.clone(),
                created: false,
            };
            Ok((ops::update_checkin(data, &existing.id, &patch), outcome))
        }
        None => {
            let id = ids.next_id();
            let draft = CheckinDraft {
                date: today,
                energy: input.energy,
                nivel_caos: input.nivel_caos,
                prioridades: texts
                    .into_iter()
                    .map(|text| Priority::new(ids.next_id(), text, now))
                    .collect(),
                tarefas_completadas: 0,
            };
            let outcome = MorningOutcome {
                checkin_id: id.clone(),
                created: true,
            };
            Ok((ops::add_checkin(data, draft, id), outcome))
        }
    }
}

/// Record the evening review on today's check-in.
pub fn submit_evening(
    data: &AppData,
    input: &EveningCheckin,
    today: NaiveDate,
    max_priorities: usize,
) -> Result<AppData> {
    let checkin = data
        .checkin_on(today)
        .ok_or_else(|| CoreError::not_found("checkin", today.to_string()))?;

    let ceiling = if checkin.prioridades.is_empty() {
        max_priorities as u32
    } else {
        checkin.prioridades.len() as u32
    };
    let tarefas = input
        .tarefas_completadas
        .unwrap_or_else(|| checkin.completed_count());
    if tarefas > ceiling {
        return Err(ValidationError::InvalidValue {
            field: "tarefasCompletadas".to_string(),
            message: format!("at most {ceiling} tasks can be reported"),
        }
        .into());
    }

    let patch = CheckinPatch {
        tarefas_completadas: Some(tarefas),
        evening_energy: Some(input.energy),
        reflexao_noturna: Some(input.reflexao.trim().to_string()),
        evening_completed: Some(true),
        ..Default::default()
    };
    Ok(ops::update_checkin(data, &checkin.id, &patch))
}
