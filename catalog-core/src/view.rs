//! Rendered-page payloads.
//!
//! Handlers never produce markup themselves. They describe a page as a
//! [`View`]: the template name plus the JSON context the template receives
//! (title, primary record or list, reference lists, errors, echoed input).
//! A `View` is rendered as an `application/json` body of the form
//! `{"template": <name>, ...context}`; swapping in a template engine only
//! touches [`View::into_response`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde_json::{Map, Value};

/// Key under which the template name is emitted in the rendered body.
pub const TEMPLATE_KEY: &str = "template";

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    template: &'static str,
    status: StatusCode,
    context: Map<String, Value>,
}

impl View {
    /// Build a view from a template name and a JSON object context.
    ///
    /// A non-object context is stored under the `data` key.
    pub fn new(template: &'static str, context: Value) -> Self {
        let context = match context {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        Self {
            template,
            status: StatusCode::OK,
            context,
        }
    }

    /// The generic failure page.
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        let title = status.canonical_reason().unwrap_or("Error");
        Self::new(
            "error",
            serde_json::json!({
                "title": title,
                "message": message.into(),
                "error": { "status": status.as_u16() },
            }),
        )
        .with_status(status)
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Add or replace one context entry.
    pub fn insert(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// The body sent to the client.
    pub fn to_json(&self) -> Value {
        let mut body = Map::with_capacity(self.context.len() + 1);
        body.insert(TEMPLATE_KEY.to_string(), Value::from(self.template));
        for (k, v) in &self.context {
            body.insert(k.clone(), v.clone());
        }
        Value::Object(body)
    }
}

impl IntoResponse for View {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self.to_json())).into_response()
    }
}

/// What a handler decided to do with the request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Render(View),
    /// POST-redirect-GET to the given path (303 See Other).
    Redirect(String),
}

impl Outcome {
    pub fn redirect(location: impl Into<String>) -> Self {
        Outcome::Redirect(location.into())
    }
}

impl From<View> for Outcome {
    fn from(view: View) -> Self {
        Outcome::Render(view)
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(view) => view.into_response(),
            Outcome::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}
