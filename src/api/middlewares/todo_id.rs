use futures::future::Ready;

use actix_web::FromRequest;
use uuid::Uuid;

use crate::api::errors::TodoApiError;

/// The `{id}` path segment parsed as a todo id.
///
/// A segment that is not a uuid is rejected with 400 before the
/// handler runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TodoId(pub Uuid);

impl FromRequest for TodoId {
    type Error = TodoApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = match req.match_info().get("id") {
            Some(raw) => Uuid::parse_str(raw).map(TodoId).map_err(TodoApiError::from),
            None => Err(TodoApiError::BadRequest("Missing Todo Id".to_string())),
        };

        futures::future::ready(result)
    }
}

/// Deref to the inner uuid so handlers can pass `*todo_id` along
impl std::ops::Deref for TodoId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
