//! Request body extraction.

use std::convert::Infallible;

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde_json::{Map, Value};
use tracing::debug;
use tracker_lib::FieldBag;

/// Body fields of a request, from JSON or a urlencoded form.
///
/// A body that does not parse yields an empty bag, so the store reports its
/// usual validation error instead of the request being rejected.
#[derive(Debug, Clone, Default)]
pub struct BodyFields(pub FieldBag);

fn is_json(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| {
            value
                .split(';')
                .next()
                .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
        })
}

impl<S> FromRequest<S> for BodyFields
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if is_json(&req) {
            return Ok(
                match Json::<Map<String, Value>>::from_request(req, state).await {
                    Ok(Json(object)) => Self(FieldBag::from_json_object(&object)),
                    Err(rejection) => {
                        debug!(%rejection, "Ignoring unreadable JSON body");
                        Self::default()
                    }
                },
            );
        }

        Ok(
            match Form::<Vec<(String, String)>>::from_request(req, state).await {
                Ok(Form(pairs)) => Self(FieldBag::from_pairs(pairs)),
                Err(rejection) => {
                    debug!(%rejection, "Ignoring unreadable form body");
                    Self::default()
                }
            },
        )
    }
}
