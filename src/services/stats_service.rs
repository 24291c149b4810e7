use crate::dto::stats_dto::{DashboardStats, RegionStat, StageStat, StatusTotals};
use crate::error::Result;
use crate::models::candidate::{Candidate, CandidateStatus};
use crate::models::candidate_stage::{CandidateStage, StageProgressStatus};
use crate::models::job::{Job, JobStatus};
use crate::models::stage::StageTemplate;
use crate::store::{Collection, Order};
use std::collections::BTreeMap;

/// Dashboard figures, recomputed from full collection reads on every call.
/// Nothing here is cached or stored.
#[derive(Clone)]
pub struct StatsService {
    candidates: Collection<Candidate>,
    jobs: Collection<Job>,
    stages: Collection<StageTemplate>,
    progress: Collection<CandidateStage>,
}

impl StatsService {
    pub fn new(
        candidates: Collection<Candidate>,
        jobs: Collection<Job>,
        stages: Collection<StageTemplate>,
        progress: Collection<CandidateStage>,
    ) -> Self {
        Self {
            candidates,
            jobs,
            stages,
            progress,
        }
    }

    pub async fn dashboard(&self) -> Result<DashboardStats> {
        let candidates = self.candidates.list(Order::desc("createdAt")).await?;
        let jobs = self.jobs.list(Order::desc("createdAt")).await?;
        let stages = self.stages.list(Order::asc("order")).await?;
        let progress = self.progress.list(Order::asc("createdAt")).await?;

        let count_status = |status: CandidateStatus| {
            candidates.iter().filter(|c| c.status == status).count() as i64
        };
        let stats = StatusTotals {
            total_candidates: candidates.len() as i64,
            pending: count_status(CandidateStatus::Pending),
            reviewing: count_status(CandidateStatus::Reviewing),
            approved: count_status(CandidateStatus::Approved),
            rejected: count_status(CandidateStatus::Rejected),
        };

        Ok(DashboardStats {
            region_data: region_breakdown(&candidates),
            process_stages: stage_breakdown(&stages, &progress),
            total_jobs: jobs.len() as i64,
            active_jobs: jobs.iter().filter(|j| j.status == JobStatus::Open).count() as i64,
            stats,
        })
    }
}

/// Groups candidates by the region token of their free-text location
/// ("city, state" keeps the trailing segment). Every candidate lands in
/// exactly one bucket, so the bucket counts sum to the total.
fn region_breakdown(candidates: &[Candidate]) -> Vec<RegionStat> {
    let total = candidates.len() as i64;
    if total == 0 {
        return Vec::new();
    }

    let mut buckets: BTreeMap<String, i64> = BTreeMap::new();
    for candidate in candidates {
        let region = candidate
            .location
            .rsplit(',')
            .next()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or("Unspecified");
        *buckets.entry(region.to_string()).or_default() += 1;
    }

    let mut regions: Vec<RegionStat> = buckets
        .into_iter()
        .map(|(region, count)| RegionStat {
            region,
            candidates: count,
            percentage: ((count as f64 / total as f64) * 100.0).round() as i64,
        })
        .collect();
    regions.sort_by(|a, b| b.candidates.cmp(&a.candidates));
    regions
}

/// Per-template figures from the progress records: how many candidates sit
/// in the stage right now, and what share of its records is completed.
fn stage_breakdown(stages: &[StageTemplate], progress: &[CandidateStage]) -> Vec<StageStat> {
    stages
        .iter()
        .map(|template| {
            let records: Vec<&CandidateStage> = progress
                .iter()
                .filter(|p| p.stage_id == template.id)
                .collect();
            let active = records
                .iter()
                .filter(|p| p.status == StageProgressStatus::Current)
                .count() as i64;
            let completed = records
                .iter()
                .filter(|p| p.status == StageProgressStatus::Completed)
                .count() as i64;
            let completion = if records.is_empty() {
                0
            } else {
                ((completed as f64 / records.len() as f64) * 100.0).round() as i64
            };
            StageStat {
                stage_id: template.id.clone(),
                stage: template.name.clone(),
                candidates: active,
                completion,
            }
        })
        .collect()
}
