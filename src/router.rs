//! Intent router: keyword short-circuits for known query categories
//!
//! Certain questions are answered strictly better by the structured data
//! itself than by generated prose, so the router bypasses retrieval and
//! the LLM entirely for them. The table is ordered; the first category
//! with a matching trigger wins, which makes precedence deterministic
//! when a query matches several lists.

use serde_json::json;

use crate::models::FinalResponse;
use crate::models::Portfolio;
use crate::models::ResumeRef;
use crate::models::StructuredData;

/// Known intent categories, in match-precedence order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentKind {
    Projects,
    Skills,
    Achievements,
    Experience,
    Socials,
    Resume,
}

impl IntentKind {
    /// Stable name used as `structured_data.type`
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Skills => "skills",
            Self::Achievements => "achievements",
            Self::Experience => "experience",
            Self::Socials => "socials",
            Self::Resume => "resume",
        }
    }
}

/// One row of the intent table: category, canned header, trigger phrases
struct Intent {
    kind: IntentKind,
    header: &'static str,
    triggers: &'static [&'static str],
}

/// The fixed intent table. Triggers are lowercase substrings tested
/// against the lowercased query; order defines precedence.
const INTENTS: &[Intent] = &[
    Intent {
        kind: IntentKind::Projects,
        header: "Here are all my projects:",
        triggers: &[
            "all projects",
            "show projects",
            "list projects",
            "your projects",
            "what projects",
            "tell me about your projects",
        ],
    },
    Intent {
        kind: IntentKind::Skills,
        header: "Here are my technical skills:",
        triggers: &[
            "skills",
            "technologies",
            "tech stack",
            "what can you do",
            "what do you know",
            "programming languages",
        ],
    },
    Intent {
        kind: IntentKind::Achievements,
        header: "Here are my achievements:",
        triggers: &[
            "achievements",
            "accomplishments",
            "awards",
            "won",
            "competitions",
            "hackathon",
        ],
    },
    Intent {
        kind: IntentKind::Experience,
        header: "Here's my professional experience:",
        triggers: &[
            "experience",
            "work",
            "job",
            "internship",
            "where have you worked",
            "companies",
        ],
    },
    Intent {
        kind: IntentKind::Socials,
        header: "You can connect with me on:",
        triggers: &[
            "social", "contact", "github", "linkedin", "twitter", "reach", "connect",
        ],
    },
    Intent {
        kind: IntentKind::Resume,
        header: "Here's my resume:",
        triggers: &["resume", "cv", "download resume"],
    },
];

/// Match a query against the intent table. First matching category wins.
pub fn match_intent(query: &str) -> Option<IntentKind> {
    let query_lower = query.to_lowercase();
    INTENTS
        .iter()
        .find(|intent| intent.triggers.iter().any(|t| query_lower.contains(t)))
        .map(|intent| intent.kind)
}

/// Route a query to a structured short-circuit response, or `None` to
/// signal the caller to fall through to retrieval.
pub fn route(query: &str, portfolio: &Portfolio, resume: &ResumeRef) -> Option<FinalResponse> {
    let query_lower = query.to_lowercase();
    let intent = INTENTS
        .iter()
        .find(|intent| intent.triggers.iter().any(|t| query_lower.contains(t)))?;

    let data = match intent.kind {
        IntentKind::Projects => json!(portfolio.projects),
        IntentKind::Skills => json!(portfolio.skills),
        IntentKind::Achievements => json!(portfolio.achievements),
        IntentKind::Experience => json!(portfolio.experience),
        IntentKind::Socials => json!(portfolio.socials),
        IntentKind::Resume => json!(resume),
    };

    Some(FinalResponse {
        response: intent.header.to_string(),
        sources: vec![],
        structured_data: Some(StructuredData {
            kind: intent.kind.as_str().to_string(),
            data,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Project;

    fn resume() -> ResumeRef {
        ResumeRef {
            filename: "resume.pdf".to_string(),
            url: "/resume.pdf".to_string(),
        }
    }

    fn portfolio() -> Portfolio {
        Portfolio {
            projects: vec![Project {
                name: "P".to_string(),
                description: "d".to_string(),
                tags: vec![],
                link: None,
            }],
            skills: vec!["Rust".to_string()],
            ..Portfolio::default()
        }
    }

    #[test]
    fn test_each_category_triggers() {
        assert_eq!(match_intent("show projects"), Some(IntentKind::Projects));
        assert_eq!(match_intent("what's your tech stack"), Some(IntentKind::Skills));
        assert_eq!(match_intent("any hackathon wins?"), Some(IntentKind::Achievements));
        assert_eq!(match_intent("did you do an internship"), Some(IntentKind::Experience));
        assert_eq!(match_intent("are you on linkedin"), Some(IntentKind::Socials));
        assert_eq!(match_intent("download resume"), Some(IntentKind::Resume));
    }

    #[test]
    fn test_case_insensitive_matching() {
        assert_eq!(match_intent("LIST PROJECTS"), Some(IntentKind::Projects));
        assert_eq!(match_intent("Programming Languages?"), Some(IntentKind::Skills));
    }

    #[test]
    fn test_precedence_earlier_category_wins() {
        // Matches both skills and experience; skills comes first in the table
        assert_eq!(
            match_intent("skills and experience"),
            Some(IntentKind::Skills)
        );
        // Matches both projects and skills; projects comes first
        assert_eq!(
            match_intent("list projects using your skills"),
            Some(IntentKind::Projects)
        );
    }

    #[test]
    fn test_no_match_falls_through() {
        assert_eq!(match_intent("tell me about your favorite color"), None);
        assert!(route("favorite color", &portfolio(), &resume()).is_none());
    }

    #[test]
    fn test_projects_payload_is_full_collection() {
        let response = route("list projects", &portfolio(), &resume()).unwrap();
        assert_eq!(response.response, "Here are all my projects:");
        assert!(response.sources.is_empty());
        let structured = response.structured_data.unwrap();
        assert_eq!(structured.kind, "projects");
        assert_eq!(structured.data.as_array().unwrap().len(), 1);
        assert_eq!(structured.data[0]["name"], "P");
    }

    #[test]
    fn test_resume_payload() {
        let response = route("can I get your cv", &portfolio(), &resume()).unwrap();
        let structured = response.structured_data.unwrap();
        assert_eq!(structured.kind, "resume");
        assert_eq!(structured.data["filename"], "resume.pdf");
        assert_eq!(structured.data["url"], "/resume.pdf");
    }
}
