//! HTTP API server implementation

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::core::config::AppConfig;
use crate::core::errors::TranslateError;
use crate::core::models::{TranslationRequest, TranslationResult};
use crate::core::translator::Translator;
use crate::engine::marian::MarianEngine;
use crate::session::{SessionContext, SessionManager};

/// Application state
pub struct AppState {
    /// Shared translation facade; all sessions share its handle cache
    translator: Translator,
    /// Live session registry
    sessions: SessionManager,
}

impl AppState {
    /// Create server state around a translator
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            sessions: SessionManager::new(),
        }
    }
}

/// Error body shape shared by all endpoints
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// Status plus body for failed requests
type ApiError = (StatusCode, Json<ErrorResponse>);

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    service: String,
    version: String,
}

/// Language catalog response
#[derive(Debug, Serialize)]
struct LanguagesResponse {
    languages: Vec<String>,
}

/// Reply to a translate request: a result or a displayable warning
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TranslateReply {
    /// Successful translation
    Result(TranslationResult),
    /// Input rejected before any model invocation
    Warning {
        warning: String,
    },
}

#[derive(Debug, Serialize)]
struct SessionCreatedResponse {
    session_id: Uuid,
}

#[derive(Debug, Serialize)]
struct SessionInfoResponse {
    session_id: Uuid,
    created_at: chrono::DateTime<chrono::Utc>,
    note_count: usize,
}

#[derive(Debug, Serialize)]
struct SessionRemovedResponse {
    removed: bool,
}

#[derive(Deserialize)]
pub struct AddNoteRequest {
    pub note: String,
}

/// Reply to a note append: the updated count or a warning
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NotesReply {
    Saved {
        note_count: usize,
    },
    Warning {
        warning: String,
    },
}

#[derive(Debug, Serialize)]
struct NotesResponse {
    notes: Vec<String>,
}

#[derive(Debug, Serialize)]
struct QuizStateResponse {
    word: String,
    checked: bool,
    last_answer: String,
}

#[derive(Deserialize)]
pub struct QuizCheckRequest {
    pub answer: String,
}

#[derive(Debug, Serialize)]
struct QuizCheckResponse {
    word: String,
    correct: bool,
    /// Expected translation, revealed when the answer was wrong
    #[serde(skip_serializing_if = "Option::is_none")]
    expected: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuizNextResponse {
    word: String,
}

/// Health check handler
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "translingua".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List catalog labels in insertion order
async fn get_languages(State(state): State<Arc<AppState>>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state
            .translator
            .catalog()
            .labels()
            .map(|l| l.to_string())
            .collect(),
    })
}

/// Translation handler
///
/// Owns the empty-input guard: blank text returns a warning and performs
/// zero model invocations. All other failures surface as distinct error
/// codes rather than one generic error.
async fn translate(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TranslationRequest>,
) -> Result<Json<TranslateReply>, ApiError> {
    if payload.is_blank() {
        return Ok(Json(TranslateReply::Warning {
            warning: "Please enter text to translate.".to_string(),
        }));
    }

    match state
        .translator
        .translate(&payload.text, &payload.language_pair)
        .await
    {
        Ok(result) => Ok(Json(TranslateReply::Result(result))),
        Err(e) => {
            warn!("Translation failed: {}", e);
            Err(error_response(e))
        }
    }
}

/// Create a new session
async fn create_session(State(state): State<Arc<AppState>>) -> Json<SessionCreatedResponse> {
    Json(SessionCreatedResponse {
        session_id: state.sessions.create(),
    })
}

/// Session metadata
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionInfoResponse>, ApiError> {
    with_session(&state, &id, |session| SessionInfoResponse {
        session_id: id,
        created_at: session.created_at,
        note_count: session.notes.len(),
    })
    .map(Json)
}

/// Tear down a session
async fn delete_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionRemovedResponse>, ApiError> {
    if state.sessions.remove(&id) {
        Ok(Json(SessionRemovedResponse { removed: true }))
    } else {
        Err(session_not_found(&id))
    }
}

/// List a session's notes
async fn get_notes(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotesResponse>, ApiError> {
    with_session(&state, &id, |session| NotesResponse {
        notes: session.notes.all().to_vec(),
    })
    .map(Json)
}

/// Append a note to a session
async fn add_note(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddNoteRequest>,
) -> Result<Json<NotesReply>, ApiError> {
    if payload.note.trim().is_empty() {
        return Ok(Json(NotesReply::Warning {
            warning: "Please enter a note to save.".to_string(),
        }));
    }

    with_session(&state, &id, |session| {
        session.notes.append(payload.note.clone());
        NotesReply::Saved {
            note_count: session.notes.len(),
        }
    })
    .map(Json)
}

/// Current quiz word and state
async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizStateResponse>, ApiError> {
    with_session(&state, &id, |session| QuizStateResponse {
        word: session.quiz.word().to_string(),
        checked: session.quiz.checked(),
        last_answer: session.quiz.last_answer().to_string(),
    })
    .map(Json)
}

/// Check an answer for the current quiz word
async fn check_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<QuizCheckRequest>,
) -> Result<Json<QuizCheckResponse>, ApiError> {
    with_session(&state, &id, |session| {
        let verdict = session.quiz.check(&payload.answer);
        QuizCheckResponse {
            word: session.quiz.word().to_string(),
            correct: verdict.correct,
            expected: if verdict.correct {
                None
            } else {
                Some(verdict.expected.to_string())
            },
        }
    })
    .map(Json)
}

/// Cycle the quiz to a new random word
async fn next_quiz(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuizNextResponse>, ApiError> {
    with_session(&state, &id, |session| QuizNextResponse {
        word: session.quiz.next().to_string(),
    })
    .map(Json)
}

/// Run `f` against a live session, or fail with a not-found error
fn with_session<T>(
    state: &AppState,
    id: &Uuid,
    f: impl FnOnce(&mut SessionContext) -> T,
) -> Result<T, ApiError> {
    let session = state.sessions.get(id).ok_or_else(|| session_not_found(id))?;
    let mut session = session.lock().unwrap_or_else(|e| e.into_inner());
    Ok(f(&mut session))
}

/// Map a core error to a status and a machine-readable body
fn error_response(err: TranslateError) -> ApiError {
    let status = match &err {
        TranslateError::InvalidSelection { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TranslateError::EncodingFailure { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        TranslateError::ModelUnavailable { .. } => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let body = ErrorResponse {
        error: ErrorDetail {
            message: err.to_string(),
            code: Some(err.code().to_string()),
            r#type: Some("translation_error".to_string()),
        },
    };

    (status, Json(body))
}

fn session_not_found(id: &Uuid) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: ErrorDetail {
                message: format!("Unknown session: {id}"),
                code: Some("session_not_found".to_string()),
                r#type: Some("session_error".to_string()),
            },
        }),
    )
}

/// Build the router over shared state
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/v1/languages", get(get_languages))
        .route("/v1/translate", post(translate))
        .route("/v1/sessions", post(create_session))
        .route("/v1/sessions/:id", get(get_session).delete(delete_session))
        .route("/v1/sessions/:id/notes", get(get_notes).post(add_note))
        .route("/v1/sessions/:id/quiz", get(get_quiz))
        .route("/v1/sessions/:id/quiz/check", post(check_quiz))
        .route("/v1/sessions/:id/quiz/next", post(next_quiz))
        .with_state(state)
}

/// Run the HTTP server
pub async fn run_server(config: &AppConfig) -> anyhow::Result<()> {
    config.validate()?;

    // Create translator over the hub-backed engine
    let engine = Arc::new(MarianEngine::new(config)?);
    let translator = Translator::new(engine);
    let state = Arc::new(AppState::new(translator));

    let app = router(state);

    // Bind address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::MockEngine;

    fn state_with_engine() -> (Arc<MockEngine>, Arc<AppState>) {
        let engine = Arc::new(MockEngine::new());
        let translator = Translator::new(engine.clone());
        (engine, Arc::new(AppState::new(translator)))
    }

    #[tokio::test]
    async fn test_blank_input_warns_without_invoking_the_model() {
        let (engine, state) = state_with_engine();

        let reply = translate(
            State(state),
            Json(TranslationRequest::new("   \n ", "English to French")),
        )
        .await
        .unwrap();

        assert!(matches!(reply.0, TranslateReply::Warning { .. }));
        assert_eq!(engine.load_count(), 0);
        assert_eq!(engine.translation_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_returns_result_for_known_pair() {
        let (engine, state) = state_with_engine();

        let reply = translate(
            State(state),
            Json(TranslationRequest::new("hello", "English to French")),
        )
        .await
        .unwrap();

        match reply.0 {
            TranslateReply::Result(result) => {
                assert_eq!(result.model_id, "Helsinki-NLP/opus-mt-en-fr");
                assert!(!result.translation.is_empty());
            }
            TranslateReply::Warning { .. } => panic!("expected a translation"),
        }
        assert_eq!(engine.translation_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_label_maps_to_invalid_selection() {
        let (_engine, state) = state_with_engine();

        let (status, Json(body)) = translate(
            State(state),
            Json(TranslationRequest::new("hello", "Klingon to English")),
        )
        .await
        .unwrap_err();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code.as_deref(), Some("invalid_selection"));
    }

    #[tokio::test]
    async fn test_session_note_and_quiz_flow() {
        let (_engine, state) = state_with_engine();

        let created = create_session(State(state.clone())).await;
        let id = created.0.session_id;

        // Empty note warns, saves nothing
        let reply = add_note(
            State(state.clone()),
            Path(id),
            Json(AddNoteRequest { note: "  ".into() }),
        )
        .await
        .unwrap();
        assert!(matches!(reply.0, NotesReply::Warning { .. }));

        let reply = add_note(
            State(state.clone()),
            Path(id),
            Json(AddNoteRequest {
                note: "revise verbs".into(),
            }),
        )
        .await
        .unwrap();
        assert!(matches!(reply.0, NotesReply::Saved { note_count: 1 }));

        let notes = get_notes(State(state.clone()), Path(id)).await.unwrap();
        assert_eq!(notes.0.notes, ["revise verbs"]);

        // Quiz is live and un-checked until an answer is submitted
        let quiz = get_quiz(State(state.clone()), Path(id)).await.unwrap();
        assert!(!quiz.0.checked);
        assert!(!quiz.0.word.is_empty());

        let checked = check_quiz(
            State(state.clone()),
            Path(id),
            Json(QuizCheckRequest {
                answer: "definitely wrong".into(),
            }),
        )
        .await
        .unwrap();
        assert!(!checked.0.correct);
        assert!(checked.0.expected.is_some());

        let next = next_quiz(State(state.clone()), Path(id)).await.unwrap();
        assert!(!next.0.word.is_empty());

        // Teardown point: state is gone afterwards
        let removed = delete_session(State(state.clone()), Path(id)).await.unwrap();
        assert!(removed.0.removed);
        let err = get_notes(State(state), Path(id)).await.unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_languages_listed_in_catalog_order() {
        let (_engine, state) = state_with_engine();

        let reply = get_languages(State(state)).await;
        assert_eq!(reply.0.languages.len(), 16);
        assert_eq!(reply.0.languages[0], "English to French");
    }
}
