//! Submission Pipeline: orchestrates one submission from input to document.
//!
//! Flow: collect → format → generate → persist → render.
//!
//! Generation failures are absorbed: the record is stored with placeholder text
//! and the caller still gets a successful outcome. Storage and rendering failures
//! abort. No step is retried here; the completion client owns its own retries.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::llm_client::CompletionClient;
use crate::models::submission::{NewSubmission, RecordId, StoredSubmission, SubmissionInput};
use crate::recommendation::form::{collect, SubmissionForm};
use crate::recommendation::profile::ReportProfile;
use crate::recommendation::prompt_formatter::format_prompt;
use crate::report::{DocumentRenderer, RenderedDocument};
use crate::store::SubmissionStore;

/// Stored in place of the report when text generation fails.
pub const GENERATION_FAILED_PLACEHOLDER: &str = "응답 생성 중 오류 발생";

// ────────────────────────────────────────────────────────────────────────────
// Outcomes
// ────────────────────────────────────────────────────────────────────────────

/// Result of the collect → persist steps.
#[derive(Debug, Clone, Serialize)]
pub struct PersistedSubmission {
    /// Correlation key the client sends back to fetch exactly this result.
    pub record_id: RecordId,
    pub identifier: String,
    pub generated_report: String,
    pub generation_succeeded: bool,
}

/// Result of the full pipeline, including the rendered document.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub submission: PersistedSubmission,
    pub document: RenderedDocument,
}

/// A stored report together with its rendered document.
#[derive(Debug, Clone)]
pub struct ReportView {
    pub record: StoredSubmission,
    pub document: RenderedDocument,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct SubmissionPipeline {
    store: Arc<dyn SubmissionStore>,
    llm: Arc<dyn CompletionClient>,
    renderer: Arc<dyn DocumentRenderer>,
    profile: ReportProfile,
}

impl SubmissionPipeline {
    pub fn new(
        store: Arc<dyn SubmissionStore>,
        llm: Arc<dyn CompletionClient>,
        renderer: Arc<dyn DocumentRenderer>,
        profile: ReportProfile,
    ) -> Self {
        Self {
            store,
            llm,
            renderer,
            profile,
        }
    }

    pub fn profile(&self) -> ReportProfile {
        self.profile
    }

    /// Collect → format → generate → persist. Does not render.
    pub async fn submit(&self, form: SubmissionForm) -> Result<PersistedSubmission, AppError> {
        let input = collect(form)?;
        info!("Processing submission");
        debug!("Submission identifier {:?}", input.identifier);

        let (generated_report, generation_succeeded) = self.generate(&input).await;

        let new = NewSubmission {
            input,
            generated_report,
            profile: self.profile,
        };
        let record_id = self.store.insert(&new).await?;
        info!(
            "Stored submission {record_id} (generation_succeeded={generation_succeeded})"
        );

        Ok(PersistedSubmission {
            record_id,
            identifier: new.input.identifier,
            generated_report: new.generated_report,
            generation_succeeded,
        })
    }

    /// Full pipeline: `submit`, then render the text that was just stored.
    pub async fn submit_and_render(
        &self,
        form: SubmissionForm,
    ) -> Result<SubmissionOutcome, AppError> {
        let submission = self.submit(form).await?;
        let document = self.renderer.render(&submission.generated_report).await?;
        Ok(SubmissionOutcome {
            submission,
            document,
        })
    }

    /// Most recent stored record for `identifier`, without rendering.
    pub async fn latest_record(&self, identifier: &str) -> Result<StoredSubmission, AppError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(AppError::Validation("identifier cannot be empty".to_string()));
        }
        self.store
            .most_recent_by_identifier(identifier)
            .await?
            .ok_or_else(|| {
                debug!("No stored submission for identifier {identifier:?}");
                AppError::NotFound(format!("No report found for {identifier:?}"))
            })
    }

    /// The exact row a submission created.
    pub async fn record(&self, id: RecordId) -> Result<StoredSubmission, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No submission with id {id}")))
    }

    /// The exact row a submission created, rendered.
    pub async fn report(&self, id: RecordId) -> Result<ReportView, AppError> {
        let record = self.record(id).await?;
        let document = self.renderer.render(&record.generated_report).await?;
        Ok(ReportView { record, document })
    }

    /// Most recent stored record for `identifier`, rendered.
    pub async fn latest_report(&self, identifier: &str) -> Result<ReportView, AppError> {
        let record = self.latest_record(identifier).await?;
        let document = self.renderer.render(&record.generated_report).await?;
        Ok(ReportView { record, document })
    }

    /// Format + generate. Never fails: errors become the placeholder text.
    async fn generate(&self, input: &SubmissionInput) -> (String, bool) {
        let prompt = format_prompt(input, self.profile);
        info!(
            "Requesting completion ({} profile, prompt {} chars)",
            self.profile,
            prompt.chars().count()
        );

        match self
            .llm
            .complete(&prompt, self.profile.system_instructions())
            .await
        {
            Ok(text) => (text, true),
            Err(e) => {
                warn!("Text generation failed, storing placeholder: {e}");
                (GENERATION_FAILED_PLACEHOLDER.to_string(), false)
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test doubles
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::GenerationError;
    use crate::report::classifier::{classify, sections, ReportSection};
    use crate::report::RenderError;

    /// Completion client that returns a fixed reply or a fixed failure and records prompts.
    pub struct ScriptedClient {
        reply: Option<String>,
        pub prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedClient {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                reply: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, prompt: &str, system: &str) -> Result<String, GenerationError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), system.to_string()));
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(GenerationError::Api {
                    status: 401,
                    message: "invalid api key".to_string(),
                }),
            }
        }
    }

    /// Renderer that "renders" the section structure as JSON bytes, so tests can
    /// check what the real renderer would have been given.
    pub struct SectionRenderer {
        pub max_heading: u8,
        pub fail: bool,
    }

    impl SectionRenderer {
        pub fn decode(document: &RenderedDocument) -> Vec<ReportSection> {
            let value: serde_json::Value = serde_json::from_slice(&document.bytes).unwrap();
            value
                .as_array()
                .unwrap()
                .iter()
                .map(|s| ReportSection {
                    heading: s["heading"].as_str().map(str::to_string),
                    body: s["body"]
                        .as_array()
                        .unwrap()
                        .iter()
                        .map(|b| b.as_str().unwrap().to_string())
                        .collect(),
                })
                .collect()
        }
    }

    #[async_trait]
    impl DocumentRenderer for SectionRenderer {
        async fn render(&self, text: &str) -> Result<RenderedDocument, RenderError> {
            if self.fail {
                return Err(RenderError::Pdf("no font".to_string()));
            }
            let sections = sections(&classify(text, self.max_heading));
            let bytes = serde_json::to_vec(&sections).map_err(|e| RenderError::Pdf(e.to_string()))?;
            Ok(RenderedDocument::from_bytes(bytes))
        }
    }
}
