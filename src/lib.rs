pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod seed;
pub mod services;
pub mod store;
pub mod utils;

use crate::models::batch::{Batch, StageAssignment};
use crate::models::candidate::Candidate;
use crate::models::candidate_stage::CandidateStage;
use crate::models::job::Job;
use crate::models::note::CandidateNote;
use crate::models::stage::StageTemplate;
use crate::services::{
    batch_service::BatchService, candidate_service::CandidateService, job_service::JobService,
    note_service::NoteService, stage_service::StageService, stats_service::StatsService,
    tracking_service::TrackingService,
};
use crate::store::{collections, Collection, DocumentStore, FileStore};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub candidate_service: CandidateService,
    pub tracking_service: TrackingService,
    pub stage_service: StageService,
    pub job_service: JobService,
    pub note_service: NoteService,
    pub batch_service: BatchService,
    pub stats_service: StatsService,
    pub file_store: FileStore,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let config = crate::config::get_config();
        let timeout = Duration::from_secs(config.store_timeout_secs);

        let candidates: Collection<Candidate> =
            Collection::new(store.clone(), collections::CANDIDATES, timeout);
        let jobs: Collection<Job> = Collection::new(store.clone(), collections::JOBS, timeout);
        let stages: Collection<StageTemplate> =
            Collection::new(store.clone(), collections::STAGES, timeout);
        let progress: Collection<CandidateStage> =
            Collection::new(store.clone(), collections::CANDIDATE_STAGES, timeout);
        let notes: Collection<CandidateNote> =
            Collection::new(store.clone(), collections::CANDIDATE_NOTES, timeout);
        let batches: Collection<Batch> =
            Collection::new(store.clone(), collections::BATCHES, timeout);
        let assignments: Collection<StageAssignment> =
            Collection::new(store.clone(), collections::STAGE_ASSIGNMENTS, timeout);

        let tracking_service =
            TrackingService::new(stages.clone(), progress.clone(), candidates.clone());
        let candidate_service =
            CandidateService::new(candidates.clone(), notes.clone(), tracking_service.clone());
        let stage_service = StageService::new(stages.clone());
        let job_service = JobService::new(jobs.clone());
        let note_service = NoteService::new(notes);
        let batch_service = BatchService::new(batches, assignments, stages.clone());
        let stats_service = StatsService::new(candidates, jobs, stages, progress);
        let file_store = FileStore::new(config.uploads_dir.clone());

        Self {
            store,
            candidate_service,
            tracking_service,
            stage_service,
            job_service,
            note_service,
            batch_service,
            stats_service,
            file_store,
        }
    }
}
