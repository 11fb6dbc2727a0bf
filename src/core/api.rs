//! HTTP API for Duolog
//!
//! Every statistic route takes the transcript JSON as its POST body and
//! answers `{ "participants": {"a", "b"}, "result": ... }`.
//!
//! Endpoints:
//! - POST /top-words, /message-counts, /word-counts, /shared-vocabulary
//! - POST /active-days, /messages-per-day, /average-messages-per-day
//! - POST /weekly-stats, /hourly-stats, /most-active-weekday
//! - POST /message-length-stats, /reply-times, /conversation-starters
//! - POST /streaks, /current-streak, /relationship-score
//! - POST /analyze - Full report
//! - GET /health - Health check

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::AnalysisConfig;
use crate::core::ChatAnalyzer;
use crate::types::{
    ActivityAverages, AnalysisError, AnalysisReport, DayBucket, DayOfWeek, Histogram,
    LengthStats, MessageCounts, MostActiveWeekday, ParticipantNames, PerParticipant,
    RelationshipScore, ReplyAnalysis, ResolvedChat, StarterCounts, StreakRecord, StreakSummary,
    TopWord, Transcript, WordCounts,
};

/// App state; configuration only, nothing is stored between requests
pub struct AppState {
    pub analyzer: ChatAnalyzer,
}

/// Statistic response body
#[derive(Debug, Serialize)]
pub struct StatResponse<T> {
    pub participants: ParticipantNames,
    pub result: T,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Request failure
#[derive(Debug)]
pub enum ApiError {
    /// Body was not a transcript
    Payload(JsonRejection),
    /// Transcript could not be analysed
    Analysis(AnalysisError),
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        Self::Analysis(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Payload(rejection) => (
                rejection.status(),
                ErrorResponse {
                    error: rejection.body_text(),
                    code: "E100_INVALID_PAYLOAD".to_string(),
                },
            ),
            Self::Analysis(err) => {
                let status = match err {
                    AnalysisError::EmptyTranscript => StatusCode::BAD_REQUEST,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (
                    status,
                    ErrorResponse {
                        error: err.to_string(),
                        code: err.code().to_string(),
                    },
                )
            }
        };
        warn!(status = status.as_u16(), code = %body.code, "request rejected");
        (status, Json(body)).into_response()
    }
}

type Payload = Result<Json<Transcript>, JsonRejection>;
type ApiResult<T> = Result<Json<StatResponse<T>>, ApiError>;

/// Create the API router
pub fn create_router(config: AnalysisConfig) -> Router {
    let state = Arc::new(AppState {
        analyzer: ChatAnalyzer::from_config(config),
    });

    Router::new()
        .route("/health", get(health))
        .route("/top-words", post(top_words))
        .route("/message-counts", post(message_counts))
        .route("/word-counts", post(word_counts))
        .route("/shared-vocabulary", post(shared_vocabulary))
        .route("/active-days", post(active_days))
        .route("/messages-per-day", post(messages_per_day))
        .route("/average-messages-per-day", post(average_messages_per_day))
        .route("/weekly-stats", post(weekly_stats))
        .route("/hourly-stats", post(hourly_stats))
        .route("/most-active-weekday", post(most_active_weekday))
        .route("/message-length-stats", post(message_length_stats))
        .route("/reply-times", post(reply_times))
        .route("/conversation-starters", post(conversation_starters))
        .route("/streaks", post(streaks))
        .route("/current-streak", post(current_streak))
        .route("/relationship-score", post(relationship_score))
        .route("/analyze", post(analyze))
        .with_state(state)
}

/// Resolve participants once, then run one statistic on the resolved chat
fn respond<T>(
    route: &'static str,
    state: &AppState,
    payload: Payload,
    stat: impl FnOnce(&ChatAnalyzer, &ResolvedChat) -> Result<T, AnalysisError>,
) -> ApiResult<T> {
    let Json(transcript) = payload.map_err(ApiError::Payload)?;
    info!(route, chat = %transcript.name, messages = transcript.len(), "request");

    let chat = state.analyzer.resolve(&transcript)?;
    let result = stat(&state.analyzer, &chat)?;
    Ok(Json(StatResponse {
        participants: chat.names,
        result,
    }))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn top_words(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<Vec<TopWord>> {
    respond("top-words", &state, payload, |analyzer, chat| Ok(analyzer.top_words(chat)))
}

async fn message_counts(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<MessageCounts> {
    respond("message-counts", &state, payload, |analyzer, chat| Ok(analyzer.message_counts(chat)))
}

async fn word_counts(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<WordCounts> {
    respond("word-counts", &state, payload, |analyzer, chat| Ok(analyzer.word_counts(chat)))
}

async fn shared_vocabulary(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<Vec<String>> {
    respond("shared-vocabulary", &state, payload, |analyzer, chat| {
        Ok(analyzer.shared_vocabulary(chat))
    })
}

async fn active_days(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<usize> {
    respond("active-days", &state, payload, |analyzer, chat| Ok(analyzer.active_days(chat)))
}

async fn messages_per_day(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<DayBucket> {
    respond("messages-per-day", &state, payload, |analyzer, chat| {
        Ok(analyzer.messages_per_day(chat))
    })
}

async fn average_messages_per_day(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<ActivityAverages> {
    respond("average-messages-per-day", &state, payload, |analyzer, chat| {
        analyzer.average_messages_per_day(chat)
    })
}

async fn weekly_stats(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<Histogram<DayOfWeek>> {
    respond("weekly-stats", &state, payload, |analyzer, chat| Ok(analyzer.weekly_stats(chat)))
}

async fn hourly_stats(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<Histogram<String>> {
    respond("hourly-stats", &state, payload, |analyzer, chat| Ok(analyzer.hourly_stats(chat)))
}

async fn most_active_weekday(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<MostActiveWeekday> {
    respond("most-active-weekday", &state, payload, |analyzer, chat| {
        Ok(analyzer.most_active_weekday(chat))
    })
}

async fn message_length_stats(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<PerParticipant<LengthStats>> {
    respond("message-length-stats", &state, payload, |analyzer, chat| {
        Ok(analyzer.message_length_stats(chat))
    })
}

async fn reply_times(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<ReplyAnalysis> {
    respond("reply-times", &state, payload, |analyzer, chat| Ok(analyzer.reply_times(chat)))
}

async fn conversation_starters(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<StarterCounts> {
    respond("conversation-starters", &state, payload, |analyzer, chat| {
        Ok(analyzer.conversation_starters(chat))
    })
}

async fn streaks(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<StreakSummary> {
    respond("streaks", &state, payload, |analyzer, chat| Ok(analyzer.streaks(chat)))
}

async fn current_streak(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<StreakRecord> {
    let today = today();
    respond("current-streak", &state, payload, |analyzer, chat| {
        Ok(analyzer.current_streak(chat, today))
    })
}

async fn relationship_score(
    State(state): State<Arc<AppState>>,
    payload: Payload,
) -> ApiResult<RelationshipScore> {
    respond("relationship-score", &state, payload, |analyzer, chat| {
        Ok(analyzer.relationship_score(chat))
    })
}

/// Full report; resolves through `ChatAnalyzer::analyze`
async fn analyze(State(state): State<Arc<AppState>>, payload: Payload) -> ApiResult<AnalysisReport> {
    let Json(transcript) = payload.map_err(ApiError::Payload)?;
    info!(route = "analyze", chat = %transcript.name, messages = transcript.len(), "request");

    let report = state.analyzer.analyze(&transcript, today())?;
    Ok(Json(StatResponse {
        participants: report.participants.clone(),
        result: report,
    }))
}

/// Run the API server
pub async fn run_server(addr: &str, config: AnalysisConfig) -> std::io::Result<()> {
    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, version = crate::VERSION, "duolog API listening");
    info!("POST /analyze plus one POST route per statistic, GET /health");
    axum::serve(listener, router).await
}
