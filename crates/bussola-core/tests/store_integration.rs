//! Integration tests for the store: flows, persistence and limits.

use std::sync::Arc;

use bussola_core::analytics;
use bussola_core::{
    BlobStore, ChaosLevel, Clock, Config, CoreError, DayType, Diagnosis, EnergyLevel, EnergyReading,
    EveningCheckin, ExperimentDraft, FileBlobStore, FixedClock, MemoryBlobStore, MorningCheckin,
    Page, SequentialIds, Store, Subscription, UserPatch, STATE_KEY,
};
use chrono::{Duration, TimeZone, Utc};

fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 10, 8, 0, 0).unwrap()))
}

fn open(blobs: impl BlobStore + 'static, clock: &Arc<FixedClock>, prefix: &str) -> Store {
    Store::open(
        Box::new(blobs),
        Box::new(Arc::clone(clock)),
        Box::new(SequentialIds::new(prefix)),
        Config::default(),
    )
}

fn morning(level: u8, chaos: ChaosLevel, priorities: &[&str]) -> MorningCheckin {
    MorningCheckin {
        energy: EnergyReading::uniform(level).unwrap(),
        nivel_caos: chaos,
        priorities: priorities.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_week_of_checkins_drives_analytics() {
    let clock = clock();
    let mut store = open(MemoryBlobStore::new(), &clock, "id");

    store
        .finish_onboarding(
            &Diagnosis::new(EnergyLevel::Cheio, DayType::Tranquilo, "Procrastinação"),
            &["Revisar relatório".to_string()],
        )
        .unwrap();
    assert_eq!(store.page(), Page::Dashboard);
    assert!(store.data().user.onboarding_completed);

    // Six more days with falling energy and chaotic days doing less.
    let days = [
        (4, ChaosLevel::Baixo),
        (4, ChaosLevel::Medio),
        (3, ChaosLevel::Alto),
        (3, ChaosLevel::Baixo),
        (2, ChaosLevel::Alto),
        (1, ChaosLevel::Alto),
    ];
    for (level, chaos) in days {
        clock.advance(Duration::days(1));
        let outcome = store
            .submit_morning(&morning(level, chaos, &["Ligar cliente", "Revisar relatório"]))
            .unwrap();
        assert!(outcome.created);
        let first = store.today_checkin().unwrap().prioridades[0].id.clone();
        store.toggle_priority(&outcome.checkin_id, &first).unwrap();
        if chaos != ChaosLevel::Alto {
            let second = store.today_checkin().unwrap().prioridades[1].id.clone();
            store.toggle_priority(&outcome.checkin_id, &second).unwrap();
        }
    }

    let data = store.snapshot();
    let today = store.today();
    assert_eq!(data.checkins.len(), 7);
    assert_eq!(analytics::streak(&data.checkins, today), 7);
    assert!(analytics::badges(&data.checkins, today).calibrated_compass);
    assert!(analytics::burnout_alert(&data.checkins, today));

    let correlation = analytics::chaos_correlation(&data.checkins).unwrap();
    assert_eq!(correlation.high_chaos_mean, 1.0);
    assert_eq!(correlation.other_mean, 1.5);
    assert_eq!(correlation.drop_percent, 33);

    let ranked = analytics::impact_ranking(&data.checkins);
    assert_eq!(ranked[0].text, "Revisar relatório");
    assert_eq!((ranked[0].completions, ranked[0].total), (3, 7));
    assert_eq!(ranked[1].text, "Ligar cliente");
    assert!(ranked[1].is_fully_completed());

    let heatmap = analytics::productivity_heatmap(&data.checkins, today);
    assert_eq!(heatmap[27], 1);
    assert_eq!(heatmap[21], 0);
}

#[test]
fn test_state_survives_reopen_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let clock = clock();

    let checkin_id = {
        let mut store = open(FileBlobStore::new(dir.path()), &clock, "a");
        let id = store.submit_morning(&morning(3, ChaosLevel::Medio, &["A", "B"])).unwrap().checkin_id;
        store
            .submit_evening(&EveningCheckin {
                energy: EnergyReading::new(2, 2, 3).unwrap(),
                reflexao: "bom".into(),
                tarefas_completadas: Some(2),
            })
            .unwrap();
        assert_eq!(store.page(), Page::Evolution);
        assert!(store.last_save_error().is_none());
        id
    };
    assert!(dir.path().join(format!("{STATE_KEY}.json")).exists());

    let reopened = open(FileBlobStore::new(dir.path()), &clock, "b");
    let checkin = reopened.data().checkin(&checkin_id).unwrap();
    assert_eq!(checkin.tarefas_completadas, 2);
    assert_eq!(checkin.reflexao_noturna.as_deref(), Some("bom"));
    assert_eq!(reopened.data().user.id, "a-1");
    // Not onboarded yet, so the app opens on onboarding again.
    assert_eq!(reopened.page(), Page::Onboarding);
}

#[test]
fn test_corrupt_document_starts_fresh() {
    let blobs = MemoryBlobStore::new();
    blobs.set(STATE_KEY, "{\"user\": 42}").unwrap();
    let store = open(blobs.clone(), &clock(), "id");

    assert_eq!(store.data().user.id, "id-1");
    assert!(store.data().checkins.is_empty());
    let raw = blobs.get(STATE_KEY).unwrap().unwrap();
    assert!(raw.contains("\"id-1\""));
}

#[test]
fn test_documents_without_created_at_still_load() {
    let blobs = MemoryBlobStore::new();
    let raw = r#"{
        "user": {"id": "u", "createdAt": "2025-03-01T10:00:00Z", "onboardingCompleted": true,
                 "subscription": "free", "trialEndsAt": "2025-03-08T10:00:00Z"},
        "checkins": [{
            "id": "c1", "userId": "u", "date": "2025-03-09",
            "energiaFisica": 3, "energiaMental": 4, "energiaEmocional": 2,
            "nivelCaos": "medio", "tarefasCompletadas": 1,
            "prioridades": [{"id": "m82u0800abcdefghi", "text": "X", "completed": true}]
        }],
        "experiments": []
    }"#;
    blobs.set(STATE_KEY, raw).unwrap();
    let store = open(blobs, &clock(), "id");

    assert_eq!(store.page(), Page::Dashboard);
    assert_eq!(store.trial_days_left(), 0);
    let ranked = analytics::impact_ranking(&store.data().checkins);
    assert_eq!(
        ranked[0].first_seen,
        Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    );
}

#[test]
fn test_experiment_limit_follows_trial_and_plan() {
    let clock = clock();
    let mut store = open(MemoryBlobStore::new(), &clock, "id");

    store.add_experiment(ExperimentDraft::new("A", "a", 7)).unwrap();
    store.add_experiment(ExperimentDraft::new("B", "b", 7)).unwrap();

    clock.advance(Duration::days(8));
    assert!(!store.is_premium());
    let err = store.add_experiment(ExperimentDraft::new("C", "c", 7)).unwrap_err();
    assert!(matches!(err, CoreError::CapExceeded { limit: 1, .. }));

    store.update_user(&UserPatch {
        subscription: Some(Subscription::Premium),
        ..Default::default()
    });
    store.add_experiment(ExperimentDraft::new("C", "c", 7)).unwrap();
    assert_eq!(store.data().active_experiments().count(), 3);
}

#[test]
fn test_invalid_input_leaves_state_untouched() {
    let mut store = open(MemoryBlobStore::new(), &clock(), "id");
    let before = store.snapshot();

    assert!(store.add_experiment(ExperimentDraft::new("  ", "h", 7)).is_err());
    assert!(store.add_experiment(ExperimentDraft::new("n", "h", 0)).is_err());
    assert!(store.submit_morning(&morning(3, ChaosLevel::Medio, &[" "])).is_err());
    assert!(store
        .submit_morning(&morning(3, ChaosLevel::Medio, &["a", "b", "c", "d"]))
        .is_err());

    assert_eq!(*store.snapshot(), *before);
}

#[test]
fn test_experiment_notes_and_finish() {
    let clock = clock();
    let mut store = open(MemoryBlobStore::new(), &clock, "id");
    let id = store.add_experiment(ExperimentDraft::new("Sem celular", "Foco", 5)).unwrap();

    store.add_note(&id, "dia 1").unwrap();
    assert!(store.advance_phase(&id).unwrap());
    assert!(store.advance_phase(&id).unwrap());
    assert!(!store.advance_phase(&id).unwrap());
    store.add_note(&id, "escalando").unwrap();

    clock.advance(Duration::days(5));
    assert!(store.finalize_experiment(&id, "deu certo", "").unwrap());
    assert!(!store.finalize_experiment(&id, "outro", "x").unwrap());

    let experiment = store.data().experiment(&id).unwrap();
    let phases: Vec<_> = experiment.anotacoes.iter().map(|n| n.fase).collect();
    assert_eq!(phases, vec![Some(bussola_core::Phase::Teste), Some(bussola_core::Phase::Escala)]);
    assert_eq!(experiment.resultado.as_deref(), Some("deu certo"));
    assert_eq!(experiment.proximos_passos, None);
    assert_eq!(experiment.completed_at, Some(clock.now()));
}
