use std::sync::Arc;
use uuid::Uuid;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{GenerationProgress, GenerationSettings, McqRecord},
        dto::{
            request::ExportScope,
            response::{DeleteSessionResponse, GenerationResponse, McqView, SearchResponse, SessionDto},
        },
    },
    repositories::{Session, SessionRepository},
    services::{
        chunker::chunk_text, generation_orchestrator::GenerationOrchestrator,
        text_extractor::extract_selected_text,
    },
};

pub const EMPTY_RUN_WARNING: &str =
    "No valid MCQs were generated. Try adjusting chunk size or topic context.";

pub struct McqService {
    sessions: Arc<dyn SessionRepository>,
    orchestrator: GenerationOrchestrator,
}

impl McqService {
    pub fn new(sessions: Arc<dyn SessionRepository>, orchestrator: GenerationOrchestrator) -> Self {
        Self {
            sessions,
            orchestrator,
        }
    }

    async fn session(&self, id: &Uuid) -> AppResult<Arc<Session>> {
        self.sessions
            .find(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Session with id '{}' not found", id)))
    }

    async fn session_dto(session: &Session) -> SessionDto {
        let mcq_count = session.state.read().await.store.len();
        SessionDto {
            id: session.id.to_string(),
            created_at: session.created_at,
            mcq_count,
            message: format!("Search across {} generated MCQs", mcq_count),
        }
    }

    pub async fn create_session(&self) -> AppResult<SessionDto> {
        let session = self.sessions.create().await?;
        log::info!(
            "Created session {} ({} active)",
            session.id,
            self.sessions.count().await?
        );
        Ok(Self::session_dto(&session).await)
    }

    pub async fn get_session(&self, id: &Uuid) -> AppResult<SessionDto> {
        let session = self.session(id).await?;
        Ok(Self::session_dto(&session).await)
    }

    pub async fn delete_session(&self, id: &Uuid) -> AppResult<DeleteSessionResponse> {
        if !self.sessions.delete(id).await? {
            return Err(AppError::NotFound(format!("Session with id '{}' not found", id)));
        }
        log::info!("Ended session {} ({} active)", id, self.sessions.count().await?);
        Ok(DeleteSessionResponse {
            message: format!("Session {} ended", id),
        })
    }

    pub async fn generate(
        &self,
        id: &Uuid,
        pdf: &[u8],
        settings: GenerationSettings,
    ) -> AppResult<GenerationResponse> {
        let session = self.session(id).await?;

        if pdf.is_empty() {
            return Err(AppError::ValidationError("Please upload a PDF file.".to_string()));
        }

        let bytes = pdf.to_vec();
        let page_range = settings.page_range.clone();
        let extracted = tokio::task::spawn_blocking(move || {
            extract_selected_text(&bytes, page_range.as_deref())
        })
        .await
        .map_err(|e| AppError::InternalError(format!("PDF extraction task failed: {}", e)))??;
        if extracted.text.trim().is_empty() {
            return Err(AppError::DocumentError(
                "No extractable text found in selected pages.".to_string(),
            ));
        }

        let chunks = chunk_text(&extracted.text, settings.chunk_size);
        log::info!(
            "Split PDF into {} text chunks for session {}. Generating MCQs...",
            chunks.len(),
            id
        );

        let reporter = session.begin_generation(chunks.len())?;
        let records = self
            .orchestrator
            .run(chunks.as_slice(), settings.mcqs_per_chunk, &reporter)
            .await;
        let mut warnings = reporter.warnings();

        {
            let mut state = session.state.write().await;
            state.store.append(records.iter().cloned());
            state.last_run = records.clone();
        }
        // Progress only reads as finished once the records are visible.
        drop(reporter);

        let message = if records.is_empty() {
            log::warn!("Session {}: {}", id, EMPTY_RUN_WARNING);
            warnings.push(EMPTY_RUN_WARNING.to_string());
            EMPTY_RUN_WARNING.to_string()
        } else {
            format!("Generated {} MCQs in total!", records.len())
        };

        log::info!("Session {}: {}", id, message);

        Ok(GenerationResponse {
            chunk_count: chunks.len(),
            generated_count: records.len(),
            questions: McqView::list(&records),
            warnings,
            message,
        })
    }

    pub async fn progress(&self, id: &Uuid) -> AppResult<GenerationProgress> {
        Ok(self.session(id).await?.progress())
    }

    pub async fn search(&self, id: &Uuid, query: &str, limit: usize) -> AppResult<SearchResponse> {
        let session = self.session(id).await?;
        let state = session.state.read().await;

        let matches = state.store.search(query, limit)?;
        let message = if matches.is_empty() {
            "No results found.".to_string()
        } else {
            format!("Found {} MCQs matching '{}'.", matches.len(), query)
        };

        Ok(SearchResponse {
            query: query.to_string(),
            total_in_session: state.store.len(),
            results: McqView::list(matches),
            message,
        })
    }

    /// Records to download: the last run (as the generate view offers) or the whole store.
    pub async fn export(&self, id: &Uuid, scope: ExportScope) -> AppResult<Vec<McqRecord>> {
        let session = self.session(id).await?;
        let state = session.state.read().await;

        Ok(match scope {
            ExportScope::Last => state.last_run.clone(),
            ExportScope::All => state.store.all().to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        repositories::InMemorySessionRepository,
        services::{
            mcq_generator::{ExtractionMode, McqGenerator},
            model_service::MockStructuredModel,
        },
        test_utils::fixtures::pdf_with_pages,
    };
    use std::num::NonZeroUsize;

    fn service_with(model: MockStructuredModel) -> McqService {
        let generator = Arc::new(McqGenerator::new(Arc::new(model), ExtractionMode::Lenient));
        McqService::new(
            Arc::new(InMemorySessionRepository::new()),
            GenerationOrchestrator::new(generator),
        )
    }

    fn settings(chunk_size: usize) -> GenerationSettings {
        GenerationSettings {
            page_range: None,
            mcqs_per_chunk: 2,
            chunk_size: NonZeroUsize::new(chunk_size).expect("non-zero"),
        }
    }

    fn new_id(dto: &SessionDto) -> Uuid {
        Uuid::parse_str(&dto.id).expect("session id is a uuid")
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let service = service_with(MockStructuredModel::new());

        let result = service.get_session(&Uuid::new_v4()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn empty_upload_is_rejected_before_any_model_call() {
        let service = service_with(MockStructuredModel::new());
        let session = service.create_session().await.expect("session created");

        let result = service.generate(&new_id(&session), &[], settings(500)).await;

        match result {
            Err(AppError::ValidationError(message)) => {
                assert_eq!(message, "Please upload a PDF file.")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn generated_records_land_in_store_and_last_run() {
        let mut model = MockStructuredModel::new();
        model.expect_generate_structured().returning(|_| {
            Ok(r#"[{"question": "What is on the first page?", "options": ["Alpha", "Beta", "Gamma", "Delta"], "correct_option": 0}]"#
                .to_string())
        });
        let service = service_with(model);
        let session = service.create_session().await.expect("session created");
        let id = new_id(&session);
        let pdf = pdf_with_pages(&["Alpha page text"]);

        let response = service.generate(&id, &pdf, settings(500)).await.expect("generation succeeds");

        assert_eq!(response.chunk_count, 1);
        assert_eq!(response.generated_count, 1);
        assert_eq!(response.message, "Generated 1 MCQs in total!");
        assert_eq!(response.questions[0].answer, "A");

        let progress = service.progress(&id).await.expect("session exists");
        assert!(!progress.running);
        assert_eq!(progress.fraction, 1.0);

        let exported = service.export(&id, ExportScope::Last).await.expect("session exists");
        assert_eq!(exported.len(), 1);

        let again = service.generate(&id, &pdf, settings(500)).await.expect("second run");
        assert_eq!(again.generated_count, 1);
        assert_eq!(service.export(&id, ExportScope::Last).await.expect("ok").len(), 1);
        assert_eq!(service.export(&id, ExportScope::All).await.expect("ok").len(), 2);
        assert_eq!(service.get_session(&id).await.expect("ok").mcq_count, 2);
    }

    #[tokio::test]
    async fn progress_stays_running_until_records_are_stored() {
        let mut model = MockStructuredModel::new();
        model.expect_generate_structured().returning(|_| {
            Ok(r#"[{"question": "Stored before finish?", "options": ["yes", "no"], "correct_option": 0}]"#
                .to_string())
        });
        let service = Arc::new(service_with(model));
        let id = new_id(&service.create_session().await.expect("session created"));
        let session = service
            .sessions
            .find(&id)
            .await
            .expect("lookup succeeds")
            .expect("session exists");
        let pdf = pdf_with_pages(&["Some page text"]);

        let reader = session.state.read().await;
        let task = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.generate(&id, &pdf, settings(500)).await }
        });

        let mut progress = session.progress();
        for _ in 0..200 {
            if progress.completed_chunks == 1 {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            progress = session.progress();
        }
        assert_eq!(progress.completed_chunks, 1);
        assert!(progress.running, "run finished before its records were stored");
        assert_eq!(reader.store.len(), 0);
        drop(reader);

        let response = task.await.expect("task joins").expect("generation succeeds");
        assert_eq!(response.generated_count, 1);
        assert!(!session.progress().running);
        assert_eq!(session.state.read().await.store.len(), 1);
    }

    #[tokio::test]
    async fn unreadable_pdf_error_survives_background_extraction() {
        let service = service_with(MockStructuredModel::new());
        let id = new_id(&service.create_session().await.expect("session created"));

        let result = service.generate(&id, b"not a pdf at all", settings(500)).await;

        assert!(matches!(result, Err(AppError::DocumentError(_))));
        assert!(!service.progress(&id).await.expect("session exists").running);
    }

    #[tokio::test]
    async fn empty_run_reports_distinct_warning() {
        let mut model = MockStructuredModel::new();
        model
            .expect_generate_structured()
            .returning(|_| Err(AppError::ModelError("rate limited".to_string())));
        let service = service_with(model);
        let session = service.create_session().await.expect("session created");
        let id = new_id(&session);
        let pdf = pdf_with_pages(&["Some page text"]);

        let response = service.generate(&id, &pdf, settings(500)).await.expect("run completes");

        assert_eq!(response.generated_count, 0);
        assert_eq!(response.message, EMPTY_RUN_WARNING);
        assert_eq!(response.warnings.len(), 2);
        assert!(service.export(&id, ExportScope::All).await.expect("ok").is_empty());
    }

    #[tokio::test]
    async fn search_on_empty_session_reports_no_results() {
        let service = service_with(MockStructuredModel::new());
        let session = service.create_session().await.expect("session created");
        let id = new_id(&session);

        let response = service.search(&id, "lagos", 5).await.expect("query is valid");
        assert!(response.results.is_empty());
        assert_eq!(response.message, "No results found.");

        assert!(matches!(
            service.search(&id, " ", 5).await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[tokio::test]
    async fn deleted_session_is_gone() {
        let service = service_with(MockStructuredModel::new());
        let session = service.create_session().await.expect("session created");
        let id = new_id(&session);

        service.delete_session(&id).await.expect("delete succeeds");
        assert!(matches!(service.get_session(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete_session(&id).await, Err(AppError::NotFound(_))));
    }
}
