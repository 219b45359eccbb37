//! Behavioural experiments following the Test → Adjust → Scale cycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Experiment phase. Moves forward only:
///
///   TESTE ──> AJUSTE ──> ESCALA
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Teste,
    Ajuste,
    Escala,
}

impl Phase {
    /// The following phase, or `None` from `Escala`.
    pub fn next(&self) -> Option<Phase> {
        match self {
            Phase::Teste => Some(Phase::Ajuste),
            Phase::Ajuste => Some(Phase::Escala),
            Phase::Escala => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Teste => "Teste",
            Phase::Ajuste => "Ajuste",
            Phase::Escala => "Escale",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A dated observation attached to an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentNote {
    pub id: String,
    pub date: DateTime<Utc>,
    pub texto: String,
    /// Phase of the parent when the note was written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fase: Option<Phase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experiment {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub nome: String,
    pub hipotese: String,
    /// Planned length in days.
    pub duracao: u32,
    pub fase: Phase,
    #[serde(default)]
    pub anotacoes: Vec<ExperimentNote>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resultado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximos_passos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Experiment {
    /// Finalized experiments are terminal.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn is_active(&self) -> bool {
        !self.is_completed()
    }

    /// Whole days elapsed since creation.
    pub fn days_running(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_days().max(0)
    }
}

/// Caller-supplied fields for a new experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentDraft {
    pub nome: String,
    pub hipotese: String,
    pub duracao: u32,
    pub fase: Phase,
}

impl ExperimentDraft {
    pub fn new(nome: impl Into<String>, hipotese: impl Into<String>, duracao: u32) -> Self {
        Self {
            nome: nome.into(),
            hipotese: hipotese.into(),
            duracao,
            fase: Phase::Teste,
        }
    }
}

/// Shallow merge applied by `update_experiment`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExperimentPatch {
    pub nome: Option<String>,
    pub hipotese: Option<String>,
    pub duracao: Option<u32>,
    pub fase: Option<Phase>,
    pub anotacoes: Option<Vec<ExperimentNote>>,
    pub resultado: Option<String>,
    pub proximos_passos: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ExperimentPatch {
    pub fn apply_to(&self, experiment: &mut Experiment) {
        if let Some(nome) = &self.nome {
            experiment.nome = nome.clone();
        }
        if let Some(hipotese) = &self.hipotese {
            experiment.hipotese = hipotese.clone();
        }
        if let Some(duracao) = self.duracao {
            experiment.duracao = duracao;
        }
        if let Some(fase) = self.fase {
            experiment.fase = fase;
        }
        if let Some(notes) = &self.anotacoes {
            experiment.anotacoes = notes.clone();
        }
        if let Some(resultado) = &self.resultado {
            experiment.resultado = Some(resultado.clone());
        }
        if let Some(passos) = &self.proximos_passos {
            experiment.proximos_passos = Some(passos.clone());
        }
        if let Some(at) = self.completed_at {
            experiment.completed_at = Some(at);
        }
    }
}
