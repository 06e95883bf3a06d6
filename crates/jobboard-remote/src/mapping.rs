//! Backend job payloads and their mapping onto [`JobRecord`].
//!
//! The backend stores salaries as numbers, has no work-mode or keyword
//! columns, and serves logos as media paths. The listing needs display
//! strings and tags, so those are derived here from the free-text fields.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use jobboard_core::error::{Error, Result};
use jobboard_core::types::{ContractType, JobId, JobRecord, WorkMode};

const TECH_KEYWORDS: [&str; 32] = [
    "react", "vue", "angular", "javascript", "typescript", "python", "java", "php",
    "nodejs", "express", "django", "laravel", "sql", "mysql", "postgresql", "mongodb",
    "aws", "docker", "kubernetes", "git", "api", "rest", "graphql", "figma",
    "photoshop", "illustrator", "ux", "ui", "design", "agile", "scrum", "devops",
];
const CONTRACT_KEYWORDS: [&str; 5] = ["cdi", "cdd", "stage", "freelance", "alternance"];
const MAX_KEYWORDS: usize = 5;

/// A job as serialised by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiJob {
    pub id: JobId,
    pub titre: String,
    pub description: String,
    #[serde(default)]
    pub exigences: String,
    pub recruteur_nom: String,
    #[serde(default)]
    pub recruteur_logo: Option<String>,
    pub type_contrat: String,
    #[serde(default)]
    pub salaire_min: Option<u64>,
    #[serde(default)]
    pub salaire_max: Option<u64>,
    pub localisation: String,
    pub date_creation: DateTime<Utc>,
}

/// Display string for a salary range; zero counts as unset.
pub fn format_salary(min: Option<u64>, max: Option<u64>) -> String {
    match (min.filter(|v| *v > 0), max.filter(|v| *v > 0)) {
        (None, None) => "Non spécifié".to_string(),
        (Some(min), Some(max)) if min != max => format!("{min}€ - {max}€"),
        (Some(min), _) => format!("À partir de {min}€"),
        (None, Some(max)) => format!("Jusqu'à {max}€"),
    }
}

pub fn infer_work_mode(description: &str) -> WorkMode {
    let text = description.to_lowercase();
    if ["remote", "télétravail", "distance"].iter().any(|k| text.contains(k)) {
        WorkMode::Remote
    } else if ["hybride", "flex"].iter().any(|k| text.contains(k)) {
        WorkMode::Hybride
    } else {
        WorkMode::Presentiel
    }
}

pub fn infer_experience(requirements: &str) -> String {
    let text = requirements.to_lowercase();
    let label = if ["junior", "débutant", "0-2"].iter().any(|k| text.contains(k)) {
        "Junior (0-2 ans)"
    } else if ["senior", "expert", "5+"].iter().any(|k| text.contains(k)) {
        "Senior (5+ ans)"
    } else if text.contains('3') || text.contains('4') {
        "Intermédiaire (3-5 ans)"
    } else {
        "Expérience variable"
    };
    label.to_string()
}

/// Tech tags found anywhere in the offer, then the contract tag, capped at five.
///
/// Matching is plain substring search, so `java` also fires on `javascript`.
pub fn extract_keywords(title: &str, description: &str, requirements: &str) -> Vec<String> {
    let text = format!("{title} {description} {requirements}").to_lowercase();
    let mut keywords: Vec<String> = TECH_KEYWORDS.iter().filter(|k| text.contains(*k)).map(|k| k.to_string()).collect();
    if let Some(contract) = CONTRACT_KEYWORDS.iter().find(|k| text.contains(*k)) {
        keywords.push(contract.to_uppercase());
    }
    keywords.truncate(MAX_KEYWORDS);
    keywords
}

/// Absolute logo URL for a recruiter, or a generated avatar when none is set.
pub fn resolve_logo(logo: Option<&str>, company: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    match logo.filter(|l| !l.is_empty()) {
        Some(l) if l.starts_with("http") => l.to_string(),
        Some(l) if l.starts_with("/media/") => format!("{base}{l}"),
        Some(l) if l.contains("media/") => format!("{base}/{l}"),
        Some(l) => format!("{base}/media/{l}"),
        None => format!("https://ui-avatars.com/api/?name={}&size=128&background=random", urlencoding::encode(company)),
    }
}

impl ApiJob {
    pub fn into_record(self, base_url: &str) -> Result<JobRecord> {
        let contract: ContractType = self
            .type_contrat
            .parse()
            .map_err(|e: Error| Error::InvalidRecord { id: self.id, reason: e.to_string() })?;
        Ok(JobRecord {
            id: self.id,
            logo_url: Some(resolve_logo(self.recruteur_logo.as_deref(), &self.recruteur_nom, base_url)),
            work: infer_work_mode(&self.description),
            experience: infer_experience(&self.exigences),
            keywords: extract_keywords(&self.titre, &self.description, &self.exigences),
            salary: format_salary(self.salaire_min, self.salaire_max),
            contract,
            title: self.titre,
            description: self.description,
            requirements: self.exigences,
            company: self.recruteur_nom,
            location: self.localisation,
            created_at: self.date_creation,
        })
    }
}
