//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/people` | Newest first |
//! | `POST`   | `/people` | Body: [`PersonDraft`]; returns 201 + stored person |
//! | `GET`    | `/people/count` | `{"count": n}` |
//! | `GET`    | `/people/{id}` | 404 if not found |
//! | `PUT`    | `/people/{id}` | Body: [`PersonDraft`]; replaces every field |
//! | `DELETE` | `/people/{id}` | 204 whether or not the person existed |
//! | `POST`   | `/people/import` | Multipart, CSV in field `file` or `csvFile` |

use axum::{
  Json,
  extract::{Multipart, Path, State, rejection::JsonRejection},
  http::StatusCode,
  response::IntoResponse,
};
use contacts_core::{
  person::{Person, PersonDraft, PersonId},
  store::PersonStore,
};
use contacts_csv::ImportOutcome;
use serde::Serialize;

use crate::{error::ApiError, service::ContactService};

/// Multipart field names that carry the uploaded file.
pub const UPLOAD_FIELDS: &[&str] = &["file", "csvFile"];

// ─── List / count ─────────────────────────────────────────────────────────────

/// `GET /people`
pub async fn list<S: PersonStore>(
  State(service): State<ContactService<S>>,
) -> Result<Json<Vec<Person>>, ApiError> {
  let people = service.list_people().await.map_err(ApiError::from_store)?;
  Ok(Json(people))
}

#[derive(Debug, Serialize)]
pub struct CountBody {
  pub count: u64,
}

/// `GET /people/count`
pub async fn count<S: PersonStore>(
  State(service): State<ContactService<S>>,
) -> Result<Json<CountBody>, ApiError> {
  let count = service.count_people().await.map_err(ApiError::from_store)?;
  Ok(Json(CountBody { count }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/{id}`
pub async fn get_one<S: PersonStore>(
  State(service): State<ContactService<S>>,
  Path(id): Path<PersonId>,
) -> Result<Json<Person>, ApiError> {
  let person = service
    .get_person(id)
    .await
    .map_err(ApiError::from_store)?
    .ok_or_else(|| ApiError::NotFound(format!("person {id} not found")))?;
  Ok(Json(person))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// `POST /people` — returns 201 + the stored [`Person`].
pub async fn create<S: PersonStore>(
  State(service): State<ContactService<S>>,
  body: Result<Json<PersonDraft>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
  let Json(draft) = body?;
  let input = draft.into_new_person()?;
  let person = service
    .create_person(input)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(person)))
}

/// `PUT /people/{id}` — full replacement of the mutable fields.
pub async fn update<S: PersonStore>(
  State(service): State<ContactService<S>>,
  Path(id): Path<PersonId>,
  body: Result<Json<PersonDraft>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
  let Json(draft) = body?;
  let input = draft.into_new_person()?;
  let person = service
    .update_person(id, input)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(person))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/{id}`
pub async fn delete_one<S: PersonStore>(
  State(service): State<ContactService<S>>,
  Path(id): Path<PersonId>,
) -> Result<StatusCode, ApiError> {
  service.delete_person(id).await.map_err(ApiError::from_store)?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Import ───────────────────────────────────────────────────────────────────

/// `POST /people/import` — multipart upload with the CSV in one of
/// [`UPLOAD_FIELDS`].
///
/// The body is always an [`ImportOutcome`]: 200 when the file was stored,
/// 422 when it was rejected. A request without the field is treated as an
/// empty upload.
pub async fn import<S: PersonStore>(
  State(service): State<ContactService<S>>,
  mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImportOutcome>), ApiError> {
  let mut upload = None;
  while let Some(field) = multipart.next_field().await? {
    if field.name().is_some_and(|name| UPLOAD_FIELDS.contains(&name)) {
      let filename = field.file_name().unwrap_or_default().to_owned();
      let bytes = field.bytes().await?;
      upload = Some((filename, bytes));
      break;
    }
  }

  let (filename, bytes) = upload.unwrap_or_default();
  let outcome = service.import_file(&filename, &bytes).await;
  let status = if outcome.success {
    StatusCode::OK
  } else {
    StatusCode::UNPROCESSABLE_ENTITY
  };
  Ok((status, Json(outcome)))
}
