//! Experiment mutations.
//!
//! The free-tier limit on concurrent experiments is enforced by
//! [`crate::Store::add_experiment`]; these functions accept any call.

use chrono::{DateTime, Utc};

use crate::model::{AppData, Experiment, ExperimentDraft, ExperimentNote, ExperimentPatch};

fn with_experiment(data: &AppData, id: &str, f: impl FnOnce(&mut Experiment)) -> AppData {
    let mut next = data.clone();
    if let Some(experiment) = next.experiments.iter_mut().find(|e| e.id == id) {
        f(experiment);
    }
    next
}

fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn add_experiment(
    data: &AppData,
    draft: ExperimentDraft,
    id: impl Into<String>,
    now: DateTime<Utc>,
) -> AppData {
    let mut next = data.clone();
    next.experiments.push(Experiment {
        id: id.into(),
        user_id: next.user.id.clone(),
        created_at: now,
        nome: draft.nome,
        hipotese: draft.hipotese,
        duracao: draft.duracao,
        fase: draft.fase,
        anotacoes: Vec::new(),
        resultado: None,
        proximos_passos: None,
        completed_at: None,
    });
    next
}

pub fn update_experiment(data: &AppData, id: &str, patch: &ExperimentPatch) -> AppData {
    with_experiment(data, id, |e| patch.apply_to(e))
}

/// Deletes the experiment and its notes.
pub fn remove_experiment(data: &AppData, id: &str) -> AppData {
    let mut next = data.clone();
    next.experiments.retain(|e| e.id != id);
    next
}

/// Step the phase forward once. `Escala` stays `Escala`.
pub fn advance_phase(data: &AppData, id: &str) -> AppData {
    with_experiment(data, id, |e| {
        if let Some(next) = e.fase.next() {
            e.fase = next;
        }
    })
}

/// Append a note stamped with the experiment's current phase.
pub fn add_note(
    data: &AppData,
    id: &str,
    note_id: impl Into<String>,
    texto: &str,
    now: DateTime<Utc>,
) -> AppData {
    let Some(texto) = non_blank(texto) else {
        return data.clone();
    };
    let note_id = note_id.into();
    with_experiment(data, id, |e| {
        e.anotacoes.push(ExperimentNote {
            id: note_id,
            date: now,
            texto,
            fase: Some(e.fase),
        });
    })
}

/// Mark the experiment finished. Blank result texts are stored as absent.
/// An experiment that is already finished keeps its original outcome.
pub fn finalize_experiment(
    data: &AppData,
    id: &str,
    resultado: &str,
    proximos_passos: &str,
    now: DateTime<Utc>,
) -> AppData {
    with_experiment(data, id, |e| {
        if e.is_completed() {
            return;
        }
        e.resultado = non_blank(resultado);
        e.proximos_passos = non_blank(proximos_passos);
        e.completed_at = Some(now);
    })
}

/// Rename / re-scope an experiment. Blank texts or a zero duration are ignored.
pub fn edit_experiment(
    data: &AppData,
    id: &str,
    nome: &str,
    hipotese: &str,
    duracao: u32,
) -> AppData {
    let (Some(nome), Some(hipotese)) = (non_blank(nome), non_blank(hipotese)) else {
        return data.clone();
    };
    if duracao == 0 {
        return data.clone();
    }
    let patch = ExperimentPatch {
        nome: Some(nome),
        hipotese: Some(hipotese),
        duracao: Some(duracao),
        ..Default::default()
    };
    update_experiment(data, id, &patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Phase;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap()
    }

    fn base() -> AppData {
        let data = AppData::fresh("u1", t0(), 7);
        add_experiment(
            &data,
            ExperimentDraft::new("Stories às 8h", "Mais engajamento de manhã", 7),
            "e1",
            t0(),
        )
    }

    #[test]
    fn new_experiment_starts_in_teste_without_notes() {
        let data = base();
        let e = data.experiment("e1").unwrap();
        assert_eq!(e.user_id, "u1");
        assert_eq!(e.fase, Phase::Teste);
        assert!(e.anotacoes.is_empty());
        assert!(e.is_active());
    }

    #[test]
    fn advance_walks_phases_and_stops_at_escala() {
        let mut data = base();
        for expected in [Phase::Ajuste, Phase::Escala, Phase::Escala] {
            data = advance_phase(&data, "e1");
            assert_eq!(data.experiment("e1").unwrap().fase, expected);
        }
    }

    #[test]
    fn notes_snapshot_phase_and_skip_blank_text() {
        let data = add_note(&base(), "e1", "n1", "  dia 1 ok ", t0());
        let data = advance_phase(&data, "e1");
        let data = add_note(&data, "e1", "n2", "ajustei horário", t0() + Duration::days(3));
        let data = add_note(&data, "e1", "n3", "   ", t0());

        let notes = &data.experiment("e1").unwrap().anotacoes;
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].texto, "dia 1 ok");
        assert_eq!(notes[0].fase, Some(Phase::Teste));
        assert_eq!(notes[1].fase, Some(Phase::Ajuste));
    }

    #[test]
    fn finalize_sets_outcome_once() {
        let done = finalize_experiment(&base(), "e1", "Funcionou", "  ", t0() + Duration::days(7));
        let e = done.experiment("e1").unwrap();
        assert_eq!(e.resultado.as_deref(), Some("Funcionou"));
        assert_eq!(e.proximos_passos, None);
        assert_eq!(e.completed_at, Some(t0() + Duration::days(7)));

        let again = finalize_experiment(&done, "e1", "Outro", "x", t0() + Duration::days(9));
        assert_eq!(again, done);

        // notes still allowed after completion
        let noted = add_note(&done, "e1", "n1", "retrospectiva", t0() + Duration::days(8));
        assert_eq!(noted.experiment("e1").unwrap().anotacoes.len(), 1);
    }

    #[test]
    fn remove_drops_experiment() {
        let data = remove_experiment(&base(), "e1");
        assert!(data.experiments.is_empty());
        assert_eq!(remove_experiment(&data, "e1"), data);
    }

    #[test]
    fn edit_requires_texts_and_duration() {
        let data = base();
        assert_eq!(edit_experiment(&data, "e1", "", "h", 3), data);
        assert_eq!(edit_experiment(&data, "e1", "n", "h", 0), data);
        let edited = edit_experiment(&data, "e1", " Novo ", "Hipótese", 14);
        let e = edited.experiment("e1").unwrap();
        assert_eq!(e.nome, "Novo");
        assert_eq!(e.duracao, 14);
    }

    #[test]
    fn update_is_shallow_merge() {
        let patch = ExperimentPatch {
            fase: Some(Phase::Escala),
            ..Default::default()
        };
        let data = update_experiment(&base(), "e1", &patch);
        let e = data.experiment("e1").unwrap();
        assert_eq!(e.fase, Phase::Escala);
        assert_eq!(e.nome, "Stories às 8h");
    }
}
