use std::env;
use std::sync::Arc;

use hiring_backend::dto::batch_dto::{AssignStagesPayload, CreateBatchPayload};
use hiring_backend::dto::candidate_dto::{
    CreateCandidatePayload, CreateNotePayload, UpdateCandidatePayload,
};
use hiring_backend::dto::stage_dto::{CreateStagePayload, MoveDirection, MoveStagePayload};
use hiring_backend::dto::tracking_dto::RecordFeedbackPayload;
use hiring_backend::error::Error;
use hiring_backend::models::candidate::{CandidateStatus, DEFAULT_STAGE_NAME};
use hiring_backend::models::candidate_stage::StageProgressStatus;
use hiring_backend::models::stage::StageTemplate;
use hiring_backend::store::{collections, DocumentStore, MemoryStore};
use hiring_backend::AppState;
use serde_json::json;

fn state() -> AppState {
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    let _ = hiring_backend::config::init_config();
    AppState::new(Arc::new(MemoryStore::new()))
}

async fn add_stage(state: &AppState, name: &str, duration: i32) -> StageTemplate {
    state
        .stage_service
        .create(CreateStagePayload {
            name: name.to_string(),
            description: String::new(),
            duration,
        })
        .await
        .expect("stage created")
}

fn candidate_payload(name: &str, email: &str, location: &str) -> CreateCandidatePayload {
    CreateCandidatePayload {
        name: name.to_string(),
        email: email.to_string(),
        phone: "11999990000".to_string(),
        location: location.to_string(),
        position: "Developer".to_string(),
        experience: String::new(),
        motivation: String::new(),
        resume_url: None,
    }
}

#[tokio::test]
async fn enrollment_creates_one_record_per_template() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;
    add_stage(&state, "Offer", 2).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");

    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");

    assert_eq!(records.len(), 3);
    assert_eq!(
        records.iter().map(|r| r.stage_name.as_str()).collect::<Vec<_>>(),
        vec!["Screening", "Interview", "Offer"]
    );
    assert_eq!(
        records.iter().map(|r| r.stage_order).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(records[0].status, StageProgressStatus::Current);
    assert!(records[1..]
        .iter()
        .all(|r| r.status == StageProgressStatus::Pending));
    assert!(records.iter().all(|r| r.candidate_id == candidate.id));
    assert_eq!(candidate.current_stage, "Screening");
}

#[tokio::test]
async fn application_round_trip_matches_registry() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;

    let candidate = state
        .candidate_service
        .create(CreateCandidatePayload {
            name: "Ana Silva".to_string(),
            email: "ana@x.com".to_string(),
            phone: "11999990000".to_string(),
            location: String::new(),
            position: "Developer".to_string(),
            experience: String::new(),
            motivation: String::new(),
            resume_url: None,
        })
        .await
        .expect("candidate created");

    assert_eq!(candidate.current_stage, "Screening");
    assert_eq!(candidate.status, CandidateStatus::Pending);

    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");
    assert_eq!(records.len(), 2);
    assert_eq!(
        records.iter().map(|r| r.status).collect::<Vec<_>>(),
        vec![StageProgressStatus::Current, StageProgressStatus::Pending]
    );
}

#[tokio::test]
async fn advance_completes_current_and_activates_next() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;
    add_stage(&state, "Offer", 2).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");

    let advancement = state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect("advanced");

    assert!(!advancement.pipeline_complete);
    assert_eq!(advancement.completed_stage.stage_name, "Screening");
    assert!(advancement.completed_stage.completed_at.is_some());
    let activated = advancement.activated_stage.expect("next stage activated");
    assert_eq!(activated.stage_name, "Interview");

    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");
    assert_eq!(
        records.iter().map(|r| r.status).collect::<Vec<_>>(),
        vec![
            StageProgressStatus::Completed,
            StageProgressStatus::Current,
            StageProgressStatus::Pending
        ]
    );
    let currents = records
        .iter()
        .filter(|r| r.status == StageProgressStatus::Current)
        .count();
    assert_eq!(currents, 1);

    let refreshed = state
        .candidate_service
        .get(&candidate.id)
        .await
        .expect("candidate still there");
    assert_eq!(refreshed.current_stage, "Interview");
}

#[tokio::test]
async fn advance_without_active_stage_mutates_nothing() {
    let state = state();

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", ""))
        .await
        .expect("candidate created");

    // Empty registry: no progress records, and the default stage label.
    assert_eq!(candidate.current_stage, DEFAULT_STAGE_NAME);
    assert!(state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed")
        .is_empty());

    let err = state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect_err("no active stage to advance");
    assert!(matches!(err, Error::NoActiveStage(_)));

    let refreshed = state
        .candidate_service
        .get(&candidate.id)
        .await
        .expect("candidate still there");
    assert_eq!(refreshed.status, CandidateStatus::Pending);
    assert_eq!(refreshed.current_stage, DEFAULT_STAGE_NAME);
    assert_eq!(refreshed.updated_at, candidate.updated_at);
}

#[tokio::test]
async fn advance_on_final_stage_completes_pipeline() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");

    state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect("first advance");
    let advancement = state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect("final advance");

    assert!(advancement.pipeline_complete);
    assert!(advancement.activated_stage.is_none());
    assert_eq!(advancement.candidate_status, CandidateStatus::Approved);

    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");
    assert!(records
        .iter()
        .all(|r| r.status == StageProgressStatus::Completed));

    let refreshed = state
        .candidate_service
        .get(&candidate.id)
        .await
        .expect("candidate still there");
    assert_eq!(refreshed.status, CandidateStatus::Approved);

    // A finished pipeline has nothing left to advance.
    let err = state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect_err("pipeline already complete");
    assert!(matches!(err, Error::NoActiveStage(_)));
}

#[tokio::test]
async fn advance_with_two_active_stages_reports_conflict() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");

    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");
    state
        .store
        .update(
            collections::CANDIDATE_STAGES,
            &records[1].id,
            json!({ "status": "current" }),
        )
        .await
        .expect("forced second active stage");

    let err = state
        .tracking_service
        .advance(&candidate.id)
        .await
        .expect_err("conflicting state detected");
    assert!(matches!(err, Error::StageConflict(_)));
}

#[tokio::test]
async fn reorder_never_touches_existing_enrollments() {
    let state = state();
    let screening = add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;
    add_stage(&state, "Offer", 2).await;

    let first = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("first candidate");
    let before = state
        .tracking_service
        .stages_for(&first.id)
        .await
        .expect("records listed");

    let reordered = state
        .stage_service
        .move_stage(MoveStagePayload {
            stage_id: screening.id.clone(),
            direction: MoveDirection::Down,
        })
        .await
        .expect("registry reordered");
    assert_eq!(
        reordered.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
        vec!["Interview", "Screening", "Offer"]
    );
    assert_eq!(
        reordered.iter().map(|s| s.order).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let after = state
        .tracking_service
        .stages_for(&first.id)
        .await
        .expect("records listed");
    assert_eq!(before.len(), after.len());
    for (b, a) in before.iter().zip(after.iter()) {
        assert_eq!(b.id, a.id);
        assert_eq!(b.stage_name, a.stage_name);
        assert_eq!(b.stage_order, a.stage_order);
        assert_eq!(b.status, a.status);
    }

    // Only future enrollments see the new order.
    let second = state
        .candidate_service
        .create(candidate_payload("Bruno Costa", "bruno@x.com", "Campinas, SP"))
        .await
        .expect("second candidate");
    let fresh = state
        .tracking_service
        .stages_for(&second.id)
        .await
        .expect("records listed");
    assert_eq!(
        fresh.iter().map(|r| r.stage_name.as_str()).collect::<Vec<_>>(),
        vec!["Interview", "Screening", "Offer"]
    );
    assert_eq!(second.current_stage, "Interview");
}

#[tokio::test]
async fn stage_delete_leaves_order_gap() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    let interview = add_stage(&state, "Interview", 3).await;
    add_stage(&state, "Offer", 2).await;

    state
        .stage_service
        .delete(&interview.id)
        .await
        .expect("stage deleted");

    let stages = state.stage_service.list().await.expect("stages listed");
    assert_eq!(
        stages.iter().map(|s| s.order).collect::<Vec<_>>(),
        vec![1, 3]
    );
}

#[tokio::test]
async fn deleting_candidate_cascades_to_dependents() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");
    state
        .note_service
        .add(
            &candidate.id,
            CreateNotePayload {
                note: "Strong portfolio".to_string(),
                created_by: Some("hr".to_string()),
            },
        )
        .await
        .expect("note added");

    state
        .candidate_service
        .delete(&candidate.id)
        .await
        .expect("candidate deleted");

    assert!(state
        .candidate_service
        .list()
        .await
        .expect("candidates listed")
        .is_empty());
    assert!(state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed")
        .is_empty());
    assert!(state
        .note_service
        .list(&candidate.id)
        .await
        .expect("notes listed")
        .is_empty());
}

#[tokio::test]
async fn feedback_updates_fields_without_transition() {
    let state = state();
    add_stage(&state, "Screening", 2).await;

    let candidate = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");
    let records = state
        .tracking_service
        .stages_for(&candidate.id)
        .await
        .expect("records listed");

    let updated = state
        .tracking_service
        .record_feedback(
            &records[0].id,
            RecordFeedbackPayload {
                score: Some(88.0),
                feedback: Some("Solid fundamentals".to_string()),
            },
        )
        .await
        .expect("feedback recorded");

    assert_eq!(updated.score, Some(88.0));
    assert_eq!(updated.feedback.as_deref(), Some("Solid fundamentals"));
    assert_eq!(updated.status, StageProgressStatus::Current);
    assert!(updated.completed_at.is_none());
}

#[tokio::test]
async fn dashboard_counts_always_sum_to_total() {
    let state = state();
    add_stage(&state, "Screening", 2).await;
    add_stage(&state, "Interview", 3).await;

    let ana = state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");
    state
        .candidate_service
        .create(candidate_payload("Bruno Costa", "bruno@x.com", "Campinas, SP"))
        .await
        .expect("candidate created");
    let clara = state
        .candidate_service
        .create(candidate_payload("Clara Lima", "clara@x.com", "Rio de Janeiro, RJ"))
        .await
        .expect("candidate created");

    state
        .tracking_service
        .advance(&ana.id)
        .await
        .expect("advanced");
    state
        .candidate_service
        .update(
            &clara.id,
            UpdateCandidatePayload {
                name: None,
                email: None,
                phone: None,
                location: None,
                position: None,
                experience: None,
                motivation: None,
                resume_url: None,
                status: Some(CandidateStatus::Rejected),
            },
        )
        .await
        .expect("status updated");

    let stats = state.stats_service.dashboard().await.expect("stats");

    let totals = &stats.stats;
    assert_eq!(totals.total_candidates, 3);
    assert_eq!(
        totals.pending + totals.reviewing + totals.approved + totals.rejected,
        totals.total_candidates
    );
    assert_eq!(totals.rejected, 1);

    let region_total: i64 = stats.region_data.iter().map(|r| r.candidates).sum();
    assert_eq!(region_total, 3);
    let sp = stats
        .region_data
        .iter()
        .find(|r| r.region == "SP")
        .expect("SP bucket");
    assert_eq!(sp.candidates, 2);
    assert_eq!(sp.percentage, 67);

    assert_eq!(stats.process_stages.len(), 2);
    let screening = &stats.process_stages[0];
    assert_eq!(screening.stage, "Screening");
    // Ana moved on, Bruno and Clara still sit in screening; Clara's global
    // rejection does not touch her stage records.
    assert_eq!(screening.candidates, 2);
    assert_eq!(screening.completion, 33);
    let interview = &stats.process_stages[1];
    assert_eq!(interview.candidates, 1);
    assert_eq!(interview.completion, 0);
}

#[tokio::test]
async fn watch_pushes_full_snapshots_on_change() {
    let state = state();

    let mut watcher = state.candidate_service.watch();
    let initial = watcher.recv().await.expect("initial snapshot");
    assert!(initial.is_empty());

    state
        .candidate_service
        .create(candidate_payload("Ana Silva", "ana@x.com", "São Paulo, SP"))
        .await
        .expect("candidate created");

    let snapshot = tokio::time::timeout(std::time::Duration::from_secs(5), watcher.recv())
        .await
        .expect("snapshot pushed in time")
        .expect("snapshot received");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].name, "Ana Silva");
}

#[tokio::test]
async fn batch_assignments_are_replaced_as_a_set() {
    let state = state();
    let screening = add_stage(&state, "Screening", 2).await;
    let interview = add_stage(&state, "Interview", 3).await;

    let batch = state
        .batch_service
        .create(CreateBatchPayload {
            name: "Q3 Engineering".to_string(),
            job_title: "Frontend Developer".to_string(),
            status: None,
            start_date: "2026-08-01".to_string(),
            end_date: "2026-09-30".to_string(),
            max_candidates: 20,
            current_candidates: 0,
            completion_rate: 0.0,
            average_time: 0.0,
        })
        .await
        .expect("batch created");

    let assigned = state
        .batch_service
        .set_assignments(
            &batch.id,
            AssignStagesPayload {
                stage_ids: vec![screening.id.clone(), interview.id.clone()],
            },
        )
        .await
        .expect("stages assigned");
    assert_eq!(assigned.len(), 2);
    assert_eq!(assigned[0].stage_name, "Screening");
    assert_eq!(assigned[0].order, 1);
    assert_eq!(assigned[1].order, 2);

    let replaced = state
        .batch_service
        .set_assignments(
            &batch.id,
            AssignStagesPayload {
                stage_ids: vec![interview.id.clone()],
            },
        )
        .await
        .expect("stages reassigned");
    assert_eq!(replaced.len(), 1);
    assert_eq!(replaced[0].stage_name, "Interview");
    assert_eq!(replaced[0].order, 1);

    let err = state
        .batch_service
        .set_assignments(
            &batch.id,
            AssignStagesPayload {
                stage_ids: vec!["missing".to_string()],
            },
        )
        .await
        .expect_err("unknown stage rejected");
    assert!(matches!(err, Error::BadRequest(_)));
    // The failed call must not have clobbered the previous set.
    assert_eq!(
        state
            .batch_service
            .assignments(&batch.id)
            .await
            .expect("assignments listed")
            .len(),
        1
    );

    state
        .batch_service
        .delete(&batch.id)
        .await
        .expect("batch deleted");
    assert!(state
        .batch_service
        .assignments(&batch.id)
        .await
        .expect("assignments listed")
        .is_empty());
}
