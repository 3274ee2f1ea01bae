use axum::body::Body;
use axum::Router;
use bytes::Bytes;
use http::header::{HeaderMap, IntoHeaderName, CONTENT_TYPE, LOCATION};
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::util::ServiceExt;

/// In-process HTTP client over an assembled `axum::Router`.
///
/// Requests go through `tower::ServiceExt::oneshot`; no TCP port is bound.
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    pub fn get(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::GET, path)
    }

    pub fn post(&self, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, Method::POST, path)
    }

    pub fn request(&self, method: Method, path: &str) -> TestRequest<'_> {
        TestRequest::new(self, method, path)
    }
}

/// Builder for one request.
pub struct TestRequest<'a> {
    app: &'a TestApp,
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl<'a> TestRequest<'a> {
    fn new(app: &'a TestApp, method: Method, path: &str) -> Self {
        Self {
            app,
            method,
            path: path.to_string(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: impl IntoHeaderName, value: impl AsRef<str>) -> Self {
        self.headers.insert(name, value.as_ref().parse().unwrap());
        self
    }

    /// Url-encoded form body, as a browser submits it. Repeat a key to
    /// send a multi-valued field.
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        self.body = Some(encoded.into_bytes());
        self.headers.insert(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded".parse().unwrap(),
        );
        self
    }

    /// Raw request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub async fn send(self) -> TestResponse {
        let mut request = Request::new(self.body.map(Body::from).unwrap_or_default());
        *request.method_mut() = self.method;
        *request.uri_mut() = self.path.parse().expect("invalid request path");
        *request.headers_mut() = self.headers;

        let response = self
            .app
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let (parts, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .expect("response body could not be read")
            .to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }
}

#[derive(Debug)]
pub enum PathToken {
    Field(String),
    Index(usize),
    Len,
}

/// Split `errors[0].message` or `book_list.len()` into tokens.
pub fn tokenize_path(path: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    for segment in path.split('.').filter(|s| !s.is_empty()) {
        if segment == "len()" {
            tokens.push(PathToken::Len);
            continue;
        }
        let (field, mut rest) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };
        if !field.is_empty() {
            tokens.push(PathToken::Field(field.to_string()));
        }
        while let Some(start) = rest.find('[') {
            let end = rest.find(']').expect("unclosed bracket in JSON path");
            let index = rest[start + 1..end]
                .parse()
                .expect("non-numeric array index in JSON path");
            tokens.push(PathToken::Index(index));
            rest = &rest[end + 1..];
        }
    }
    tokens
}

/// Walk `path` from `root`; missing fields resolve to `null`.
pub fn resolve_path(root: &Value, path: &str) -> Value {
    let mut current = root.clone();
    for token in tokenize_path(path) {
        current = match token {
            PathToken::Field(name) => current.get(&name).cloned().unwrap_or(Value::Null),
            PathToken::Index(idx) => current.get(idx).cloned().unwrap_or(Value::Null),
            PathToken::Len => {
                let len = match &current {
                    Value::Array(a) => a.len(),
                    Value::Object(o) => o.len(),
                    Value::String(s) => s.chars().count(),
                    other => panic!("len() applied to non-collection in \"{path}\": got {other}"),
                };
                Value::from(len)
            }
        };
    }
    current
}

/// A collected response with status, redirect and view assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn assert_ok(self) -> Self {
        self.assert_status(StatusCode::OK)
    }

    pub fn assert_bad_request(self) -> Self {
        self.assert_status(StatusCode::BAD_REQUEST)
    }

    pub fn assert_not_found(self) -> Self {
        self.assert_status(StatusCode::NOT_FOUND)
    }

    pub fn assert_status(self, expected: StatusCode) -> Self {
        if self.status != expected {
            panic!("status {} (wanted {expected})\n  body: {}", self.status, self.text());
        }
        self
    }

    /// Assert a `303 See Other` to `location`.
    pub fn assert_redirect(self, location: &str) -> Self {
        let this = self.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            this.location(),
            Some(location),
            "unexpected redirect target"
        );
        this
    }

    /// Assert the page rendered `template` with a 200.
    pub fn assert_view(self, template: &str) -> Self {
        self.assert_ok().assert_json_path("template", template)
    }

    /// Assert some validation error on `field` carries `message`.
    pub fn assert_field_error(self, field: &str, message: &str) -> Self {
        let errors: Vec<Value> = self.json_path("errors");
        let found = errors
            .iter()
            .any(|e| e["field"] == field && e["message"] == message);
        assert!(
            found,
            "no error \"{message}\" on field \"{field}\"\n  Errors: {}",
            Value::Array(errors.clone())
        );
        self
    }

    /// ```ignore
    /// resp.assert_json_path("errors.len()", 2)
    ///     .assert_json_path("book.title", "Dune");
    /// ```
    pub fn assert_json_path(self, path: &str, expected: impl Into<Value>) -> Self {
        let expected = expected.into();
        let actual = resolve_path(&self.json(), path);
        if actual != expected {
            panic!("{path}: got {actual}, wanted {expected}\n  body: {}", self.text());
        }
        self
    }

    pub fn json_path<T: DeserializeOwned>(&self, path: &str) -> T {
        let value = resolve_path(&self.json(), path);
        match serde_json::from_value(value.clone()) {
            Ok(v) => v,
            Err(e) => panic!("{path}: cannot decode {value}: {e}"),
        }
    }

    /// The `Location` header of a redirect.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION)?.to_str().ok()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// The whole body as JSON; every rendered view is a JSON object.
    pub fn json(&self) -> Value {
        match serde_json::from_slice(&self.body) {
            Ok(v) => v,
            Err(e) => panic!("body is not JSON ({e}): {}", self.text()),
        }
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}
