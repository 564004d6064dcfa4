use reqwest::Method;

/// Failure policy for a call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchMode {
    /// Every non-2xx is an error; 401 evicts the credential and redirects
    #[default]
    Strict,
    /// 401 and 409 are returned as plain responses
    TolerantAuth,
}

/// Per-call request options.
///
/// Defaults: `PUT`, no body, no token, body wrapped as `{"req": body}`,
/// strict mode.
#[derive(Debug, Clone)]
pub struct CallOptions<B = ()> {
    pub method: Method,
    pub body: Option<B>,
    pub token: Option<String>,
    pub headers: Vec<(String, String)>,
    pub wrap_req: bool,
    pub err_msg: String,
    pub mode: FetchMode,
}

impl CallOptions<()> {
    /// `err_msg` is what the caller sees if the call fails
    pub fn new(err_msg: impl Into<String>) -> Self {
        Self {
            method: Method::PUT,
            body: None,
            token: None,
            headers: Vec::new(),
            wrap_req: true,
            err_msg: err_msg.into(),
            mode: FetchMode::Strict,
        }
    }
}

impl<B> CallOptions<B> {
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body<T>(self, body: T) -> CallOptions<T> {
        CallOptions {
            method: self.method,
            body: Some(body),
            token: self.token,
            headers: self.headers,
            wrap_req: self.wrap_req,
            err_msg: self.err_msg,
            mode: self.mode,
        }
    }

    /// Bearer token; `None` sends no Authorization header
    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn wrap_req(mut self, wrap: bool) -> Self {
        self.wrap_req = wrap;
        self
    }

    pub fn mode(mut self, mode: FetchMode) -> Self {
        self.mode = mode;
        self
    }
}
