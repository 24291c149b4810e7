use crate::dto::job_dto::{CreateJobPayload, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::store::{Collection, Order};
use crate::utils::json::insert_field;
use chrono::Utc;
use serde_json::json;

#[derive(Clone)]
pub struct JobService {
    jobs: Collection<Job>,
}

impl JobService {
    pub fn new(jobs: Collection<Job>) -> Self {
        Self { jobs }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let now = Utc::now();
        let mut job = Job {
            id: String::new(),
            title: payload.title,
            department: payload.department,
            location: payload.location,
            employment_type: payload.employment_type,
            level: payload.level,
            status: payload.status.unwrap_or(JobStatus::Draft),
            description: payload.description,
            requirements: payload.requirements,
            benefits: payload.benefits,
            salary: payload.salary,
            created_at: now,
            updated_at: now,
        };
        job.id = self.jobs.add(&job).await?;
        Ok(job)
    }

    pub async fn list(&self) -> Result<Vec<Job>> {
        self.jobs.list(Order::desc("createdAt")).await
    }

    /// Open postings, for the public application form.
    pub async fn list_open(&self) -> Result<Vec<Job>> {
        self.jobs
            .find_by("status", json!("open"), Order::desc("createdAt"))
            .await
    }

    pub async fn get(&self, id: &str) -> Result<Job> {
        self.jobs
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("Job {} not found", id)))
    }

    pub async fn update(&self, id: &str, payload: UpdateJobPayload) -> Result<Job> {
        let mut patch = serde_json::to_value(&payload)?;
        insert_field(&mut patch, "updatedAt", json!(Utc::now()))?;
        self.jobs.update(id, patch).await?;
        self.get(id).await
    }

    /// Batches referencing the posting keep their denormalized title; there
    /// is no cascade.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.jobs.delete(id).await
    }
}
