//! External AI collaborators — the answer generator and the specialist
//! recommender.
//!
//! Both are optional HTTP services configured at startup. Every call is
//! bounded by a timeout and degrades gracefully: the answer agent falls
//! back to canned text, the specialist agent to an empty list. A slow or
//! failing collaborator never fails the request that invoked it.

use serde::{Deserialize, Serialize};

/// Reply used when no answer service is configured.
fn canned_answer(query: &str) -> String {
    format!(
        "Thank you for your health query: '{query}'. I recommend consulting \
         with a healthcare professional for personalized advice."
    )
}

/// Reply used when the configured answer service fails.
const FALLBACK_ANSWER: &str =
    "I encountered an error processing your query. Please try rephrasing your question.";

/// One recommended specialist, passed through from the recommender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialist {
    pub specialty: String,
    #[serde(default)]
    pub reason: String,
}

#[derive(Serialize)]
struct AgentRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Deserialize)]
struct SpecialistResponse {
    specialists: Vec<Specialist>,
}

fn build_client(timeout_secs: u64) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .build()
        .expect("Failed to create HTTP client")
}

// ═══════════════════════════════════════════════════════════
// Answer agent
// ═══════════════════════════════════════════════════════════

/// Client for the medical-answer generation service.
pub struct AnswerAgent {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl AnswerAgent {
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            client: build_client(timeout_secs),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Generate an answer for a cleaned query. Never fails — service errors
    /// are logged and replaced with fallback text.
    pub async fn generate(&self, query: &str) -> String {
        let Some(base_url) = &self.base_url else {
            return canned_answer(query);
        };

        match self.request_answer(base_url, query).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::error!(%err, "answer agent failed");
                FALLBACK_ANSWER.to_string()
            }
        }
    }

    async fn request_answer(&self, base_url: &str, query: &str) -> Result<String, reqwest::Error> {
        let response = self
            .client
            .post(format!("{base_url}/answer"))
            .json(&AgentRequest { query })
            .send()
            .await?
            .error_for_status()?;

        let parsed: AnswerResponse = response.json().await?;
        Ok(parsed.answer)
    }
}

// ═══════════════════════════════════════════════════════════
// Specialist agent
// ═══════════════════════════════════════════════════════════

/// Client for the specialist-recommendation service. Only consulted for
/// health-related queries.
pub struct SpecialistAgent {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl SpecialistAgent {
    pub fn new(base_url: Option<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            client: build_client(timeout_secs),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    /// Recommend specialists for a cleaned query. Failures are swallowed to
    /// an empty list.
    pub async fn recommend(&self, query: &str) -> Vec<Specialist> {
        let Some(base_url) = &self.base_url else {
            return Vec::new();
        };

        match self.request_specialists(base_url, query).await {
            Ok(specialists) => specialists,
            Err(err) => {
                tracing::warn!(%err, "specialist agent failed");
                Vec::new()
            }
        }
    }

    async fn request_specialists(
        &self,
        base_url: &str,
        query: &str,
    ) -> Result<Vec<Specialist>, reqwest::Error> {
        let response = self
            .client
            .post(format!("{base_url}/recommend"))
            .json(&AgentRequest { query })
            .send()
            .await?
            .error_for_status()?;

        let parsed: SpecialistResponse = response.json().await?;
        Ok(parsed.specialists)
    }
}
