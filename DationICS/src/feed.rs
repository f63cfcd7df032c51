//! Routes HTTP du flux iCalendar
//!
//! - `GET /calendar.ics` : interroge Dation puis rend le planning en iCalendar
//! - `GET /health` : sonde de disponibilité

use anyhow::Result;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use dationconfig::Config;
use dationservice::{DationClient, DationConfigExt, Schedule, calendar};
use dationsoap::SoapTransport;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Compte Dation interrogé à chaque requête
#[derive(Clone)]
pub struct FeedSettings {
    pub soap_endpoint: String,
    pub handle: String,
    pub username: String,
    pub password: String,
    pub prodid: String,
}

impl std::fmt::Debug for FeedSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedSettings")
            .field("soap_endpoint", &self.soap_endpoint)
            .field("handle", &self.handle)
            .field("username", &self.username)
            .field("password", &"***")
            .field("prodid", &self.prodid)
            .finish()
    }
}

impl FeedSettings {
    /// Lit le compte Dation depuis la configuration
    ///
    /// # Errors
    ///
    /// Échoue si l'endpoint, le handle ou les identifiants ne sont pas configurés.
    pub fn from_config(config: &Config) -> Result<Self> {
        let (username, password) = config.get_dation_credentials()?;
        Ok(Self {
            soap_endpoint: config.get_soap_endpoint()?,
            handle: config.get_school_handle()?,
            username,
            password,
            prodid: config.get_calendar_prodid(),
        })
    }
}

/// Source bloquante du planning
pub trait ScheduleSource: Send + Sync + 'static {
    fn fetch(&self, settings: &FeedSettings) -> dationservice::Result<Schedule>;
}

impl<T> ScheduleSource for DationClient<T>
where
    T: SoapTransport + Send + Sync + 'static,
{
    fn fetch(&self, settings: &FeedSettings) -> dationservice::Result<Schedule> {
        self.fetch_schedule(
            &settings.soap_endpoint,
            &settings.handle,
            &settings.username,
            &settings.password,
        )
    }
}

/// État partagé des handlers
#[derive(Clone)]
pub struct FeedState {
    settings: Arc<FeedSettings>,
    source: Arc<dyn ScheduleSource>,
}

impl FeedState {
    pub fn new(settings: FeedSettings, source: impl ScheduleSource) -> Self {
        Self {
            settings: Arc::new(settings),
            source: Arc::new(source),
        }
    }
}

/// Construit le router du flux
pub fn router(state: FeedState) -> Router {
    Router::new()
        .route("/calendar.ics", get(calendar_ics))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn calendar_ics(State(state): State<FeedState>) -> Response {
    let FeedState { settings, source } = state;
    let prodid = settings.prodid.clone();

    // Le transport SOAP est synchrone
    let fetched = tokio::task::spawn_blocking(move || source.fetch(&settings)).await;

    match fetched {
        Ok(Ok(schedule)) => {
            info!("📅 Serving {} agenda item(s)", schedule.items.len());
            let body = calendar::render_calendar(&schedule, &prodid, &Utc::now());
            ([(header::CONTENT_TYPE, calendar::CONTENT_TYPE)], body).into_response()
        }
        Ok(Err(e)) => {
            error!("❌ Failed to fetch Dation schedule: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                "Failed to fetch schedule from Dation",
            )
                .into_response()
        }
        Err(e) => {
            error!("❌ Schedule task failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use chrono::DateTime;
    use dationservice::{Address, AgendaItem, CourseInfo, DationError};
    use tower::ServiceExt;

    struct FixedSource(Option<Schedule>);

    impl ScheduleSource for FixedSource {
        fn fetch(&self, _: &FeedSettings) -> dationservice::Result<Schedule> {
            self.0
                .clone()
                .ok_or_else(|| DationError::MissingValue("SessionId".to_string()))
        }
    }

    fn settings() -> FeedSettings {
        FeedSettings {
            soap_endpoint: "https://www.dation.nl/soap/server.php".into(),
            handle: "myschool".into(),
            username: "student".into(),
            password: "secret".into(),
            prodid: calendar::DEFAULT_PRODID.into(),
        }
    }

    fn schedule() -> Schedule {
        Schedule {
            address: Address {
                street: "Dorpsstraat".into(),
                housenumber: "12".into(),
                zipcode: "1234 AB".into(),
                city: "Utrecht".into(),
            },
            items: vec![AgendaItem {
                id: 5,
                name: "Rijles".into(),
                instructor: "Jan".into(),
                start_time: DateTime::parse_from_rfc3339("2023-05-01T10:00:00+02:00").unwrap(),
                stop_time: DateTime::parse_from_rfc3339("2023-05-01T11:00:00+02:00").unwrap(),
                comment: String::new(),
                course_info: CourseInfo {
                    id: 3,
                    type_name: "Pakket B".into(),
                    category: "B".into(),
                },
            }],
        }
    }

    async fn request(source: FixedSource, uri: &str) -> (StatusCode, Option<String>, String) {
        let app = router(FeedState::new(settings(), source));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_calendar_is_served() {
        let (status, content_type, body) =
            request(FixedSource(Some(schedule())), "/calendar.ics").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some(calendar::CONTENT_TYPE));
        assert!(body.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(body.contains("UID:3-5@dationics\r\n"));
        assert!(body.contains("DTSTART:20230501T080000Z\r\n"));
    }

    #[tokio::test]
    async fn test_dation_failure_is_bad_gateway() {
        let (status, _, body) = request(FixedSource(None), "/calendar.ics").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.contains("secret"));
    }

    #[tokio::test]
    async fn test_health() {
        let (status, _, body) = request(FixedSource(None), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "ok");
    }

    #[test]
    fn test_debug_hides_password() {
        assert!(!format!("{:?}", settings()).contains("secret"));
    }
}
