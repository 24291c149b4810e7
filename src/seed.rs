use crate::dto::candidate_dto::CreateCandidatePayload;
use crate::dto::job_dto::CreateJobPayload;
use crate::dto::stage_dto::CreateStagePayload;
use crate::error::Result;
use crate::models::job::{EmploymentType, JobStatus};
use crate::AppState;
use tracing::info;

/// Seeds a demo pipeline, a few postings and a handful of applicants.
/// Skipped when the registry or the job board already holds data.
pub async fn seed_demo_data(state: &AppState) -> Result<()> {
    if !state.stage_service.list().await?.is_empty() || !state.job_service.list().await?.is_empty()
    {
        info!("demo data already present; skipping seed");
        return Ok(());
    }

    for (name, description, duration) in [
        ("Resume Review", "First pass over the resume and profile", 2),
        ("HR Interview", "Initial interview with the HR team", 3),
        ("Technical Test", "Role-specific technical assessment", 5),
        ("Technical Interview", "Interview with the team and hiring manager", 2),
        ("Offer", "Final offer presented to the candidate", 3),
    ] {
        state
            .stage_service
            .create(CreateStagePayload {
                name: name.to_string(),
                description: description.to_string(),
                duration,
            })
            .await?;
    }

    for (title, department, location, requirements, salary) in [
        (
            "Frontend Developer",
            "Engineering",
            "São Paulo, SP",
            vec!["React", "TypeScript", "Tailwind CSS", "Git"],
            "R$ 8.000 - R$ 12.000",
        ),
        (
            "UX/UI Designer",
            "Design",
            "Rio de Janeiro, RJ",
            vec!["Figma", "Prototyping", "Design systems"],
            "R$ 6.000 - R$ 10.000",
        ),
        (
            "Digital Marketing Analyst",
            "Marketing",
            "Belo Horizonte, MG",
            vec!["Google Analytics", "Paid media", "SEO"],
            "R$ 5.000 - R$ 8.000",
        ),
    ] {
        state
            .job_service
            .create(CreateJobPayload {
                title: title.to_string(),
                department: department.to_string(),
                location: location.to_string(),
                employment_type: EmploymentType::FullTime,
                level: None,
                status: Some(JobStatus::Open),
                description: format!("{} position in the {} team.", title, department),
                requirements: requirements.into_iter().map(str::to_string).collect(),
                benefits: None,
                salary: Some(salary.to_string()),
            })
            .await?;
    }

    for (name, email, phone, location, position, experience, motivation) in [
        (
            "Ana Silva",
            "ana.silva@example.com",
            "(11) 99999-1111",
            "São Paulo, SP",
            "Frontend Developer",
            "5 years of frontend development with React",
            "Looking for new challenges at an innovative company",
        ),
        (
            "Carlos Santos",
            "carlos.santos@example.com",
            "(21) 99999-2222",
            "Rio de Janeiro, RJ",
            "UX/UI Designer",
            "3 years designing digital products",
            "I want to work on products that matter",
        ),
        (
            "Maria Oliveira",
            "maria.oliveira@example.com",
            "(31) 99999-3333",
            "Belo Horizonte, MG",
            "Digital Marketing Analyst",
            "4 years in digital and performance marketing",
            "Looking for room to grow",
        ),
    ] {
        state
            .candidate_service
            .create(CreateCandidatePayload {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                location: location.to_string(),
                position: position.to_string(),
                experience: experience.to_string(),
                motivation: motivation.to_string(),
                resume_url: None,
            })
            .await?;
    }

    info!("seeded demo stages, jobs and candidates");
    Ok(())
}
