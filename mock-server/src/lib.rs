use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

pub const NAME_MAX_CHARS: usize = 50;
pub const MESSAGE_MAX_CHARS: usize = 280;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Greeting {
    pub id: String,
    pub sender: String,
    pub recipient: String,
    pub message: String,
    pub created_at: String,
}

#[derive(Deserialize)]
pub struct CreateGreeting {
    pub sender: String,
    pub recipient: String,
    pub message: String,
}

#[derive(Deserialize)]
pub struct UpdateGreeting {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub message: Option<String>,
}

// Newest-first, matching what the page displays.
pub type Db = Arc<RwLock<Vec<Greeting>>>;

type ErrorBody = (StatusCode, Json<Value>);

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route(
            "/api/v1/greetings/",
            get(list_greetings).post(create_greeting),
        )
        .route(
            "/api/v1/greetings/{id}",
            get(get_greeting)
                .patch(update_greeting)
                .delete(delete_greeting),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn detail(status: StatusCode, message: &str) -> ErrorBody {
    (status, Json(json!({ "detail": message })))
}

fn not_found() -> ErrorBody {
    detail(StatusCode::NOT_FOUND, "greeting not found")
}

fn check_field(name: &str, value: &str, max_chars: usize) -> Result<(), ErrorBody> {
    let chars = value.chars().count();
    if chars == 0 || chars > max_chars {
        return Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            &format!("{name} must be 1-{max_chars} characters"),
        ));
    }
    Ok(())
}

async fn list_greetings(State(db): State<Db>) -> Json<Vec<Greeting>> {
    Json(db.read().await.clone())
}

async fn create_greeting(
    State(db): State<Db>,
    Json(input): Json<CreateGreeting>,
) -> Result<(StatusCode, Json<Greeting>), ErrorBody> {
    check_field("sender", &input.sender, NAME_MAX_CHARS)?;
    check_field("recipient", &input.recipient, NAME_MAX_CHARS)?;
    check_field("message", &input.message, MESSAGE_MAX_CHARS)?;

    let created_at = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| detail(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()))?;
    let greeting = Greeting {
        id: Uuid::new_v4().to_string(),
        sender: input.sender,
        recipient: input.recipient,
        message: input.message,
        created_at,
    };
    db.write().await.insert(0, greeting.clone());
    Ok((StatusCode::CREATED, Json(greeting)))
}

async fn get_greeting(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Greeting>, ErrorBody> {
    let greetings = db.read().await;
    greetings
        .iter()
        .find(|g| g.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(not_found)
}

async fn update_greeting(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateGreeting>,
) -> Result<Json<Greeting>, ErrorBody> {
    if let Some(ref sender) = input.sender {
        check_field("sender", sender, NAME_MAX_CHARS)?;
    }
    if let Some(ref recipient) = input.recipient {
        check_field("recipient", recipient, NAME_MAX_CHARS)?;
    }
    if let Some(ref message) = input.message {
        check_field("message", message, MESSAGE_MAX_CHARS)?;
    }

    let mut greetings = db.write().await;
    let greeting = greetings
        .iter_mut()
        .find(|g| g.id == id)
        .ok_or_else(not_found)?;
    // `id` and `created_at` are server-owned and never updated.
    if let Some(sender) = input.sender {
        greeting.sender = sender;
    }
    if let Some(recipient) = input.recipient {
        greeting.recipient = recipient;
    }
    if let Some(message) = input.message {
        greeting.message = message;
    }
    Ok(Json(greeting.clone()))
}

async fn delete_greeting(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ErrorBody> {
    let mut greetings = db.write().await;
    let before = greetings.len();
    greetings.retain(|g| g.id != id);
    if greetings.len() == before {
        return Err(not_found());
    }
    Ok(Json(json!({ "ok": true, "id": id })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_serializes_to_json() {
        let greeting = Greeting {
            id: "1".to_string(),
            sender: "Alice".to_string(),
            recipient: "Bob".to_string(),
            message: "Hi".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_value(&greeting).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["sender"], "Alice");
        assert_eq!(json["created_at"], "2024-01-01T00:00:00Z");
    }

    #[test]
    fn create_greeting_rejects_missing_field() {
        let result: Result<CreateGreeting, _> =
            serde_json::from_str(r#"{"sender":"Alice","recipient":"Bob"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_greeting_all_fields_optional() {
        let input: UpdateGreeting = serde_json::from_str("{}").unwrap();
        assert!(input.sender.is_none());
        assert!(input.recipient.is_none());
        assert!(input.message.is_none());
    }

    #[test]
    fn update_greeting_partial_fields() {
        let input: UpdateGreeting =
            serde_json::from_str(r#"{"message":"New text"}"#).unwrap();
        assert!(input.sender.is_none());
        assert_eq!(input.message.as_deref(), Some("New text"));
    }

    #[test]
    fn field_check_bounds() {
        assert!(check_field("sender", "Alice", NAME_MAX_CHARS).is_ok());
        assert!(check_field("sender", "", NAME_MAX_CHARS).is_err());
        assert!(check_field("sender", &"x".repeat(51), NAME_MAX_CHARS).is_err());
        assert!(check_field("message", &"x".repeat(280), MESSAGE_MAX_CHARS).is_ok());
    }
}
