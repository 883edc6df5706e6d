//! Document builder: flattens portfolio records into searchable documents
//!
//! Each project, experience and achievement entry becomes one document;
//! skills and socials each collapse into a single aggregate document when
//! non-empty. The resulting sequence is ordered and immutable — a
//! document's index is its identity in the vector index.

use serde_json::json;

use crate::models::DocType;
use crate::models::Document;
use crate::models::Portfolio;

/// Placeholder used when a project has no link
const NO_LINK: &str = "N/A";

/// Marker used when an experience entry has no end date
const CURRENT_ROLE: &str = "Present";

/// Convert portfolio data into the ordered document corpus.
///
/// Order is fixed: projects, skills, experience, achievements, socials.
pub fn build_documents(portfolio: &Portfolio) -> Vec<Document> {
    let mut documents = Vec::new();

    for project in &portfolio.projects {
        documents.push(Document {
            doc_type: DocType::Project,
            content: format!(
                "Project: {}\nDescription: {}\nTechnologies: {}\nLink: {}",
                project.name,
                project.description,
                project.tags.join(", "),
                project.link.as_deref().unwrap_or(NO_LINK),
            ),
            metadata: json!(project),
        });
    }

    if !portfolio.skills.is_empty() {
        documents.push(Document {
            doc_type: DocType::Skills,
            content: format!("Technical Skills: {}", portfolio.skills.join(", ")),
            metadata: json!({ "skills": portfolio.skills }),
        });
    }

    for exp in &portfolio.experience {
        documents.push(Document {
            doc_type: DocType::Experience,
            content: format!(
                "Company: {}\nRole: {}\nStart Date: {}\nEnd Date: {}\nDescription: {}",
                exp.company,
                exp.role,
                exp.start_date,
                exp.end_date.as_deref().unwrap_or(CURRENT_ROLE),
                exp.description,
            ),
            metadata: json!(exp),
        });
    }

    for achievement in &portfolio.achievements {
        documents.push(Document {
            doc_type: DocType::Achievement,
            content: format!(
                "Achievement: {}\nDescription: {}\nDate: {}",
                achievement.title, achievement.description, achievement.date,
            ),
            metadata: json!(achievement),
        });
    }

    if !portfolio.socials.is_empty() {
        let links = portfolio
            .socials
            .iter()
            .map(|s| format!("{}: {}", s.platform, s.link))
            .collect::<Vec<_>>()
            .join("\n");
        documents.push(Document {
            doc_type: DocType::Socials,
            content: format!("Social Media Links:\n{links}"),
            metadata: json!({ "socials": portfolio.socials }),
        });
    }

    documents
}
