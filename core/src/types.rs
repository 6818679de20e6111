//! Invocation parameters as collected from the command line.
//!
//! # Design
//! The method carries an explicit "was set" flag next to its value because
//! the POST inference depends on whether the caller chose a method, not on
//! what the value happens to be: `-X GET -d data` must stay a GET.

/// Method used when none is given.
pub const DEFAULT_METHOD: &str = "GET";

/// The `--method` input: its value and whether the caller set it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodFlag {
    value: String,
    explicit: bool,
}

impl MethodFlag {
    /// A method the caller passed explicitly.
    pub fn explicit(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            explicit: true,
        }
    }

    /// Map an optional command-line value: `None` means the flag was absent.
    pub fn from_arg(value: Option<String>) -> Self {
        match value {
            Some(value) => Self::explicit(value),
            None => Self::default(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

impl Default for MethodFlag {
    fn default() -> Self {
        Self {
            value: DEFAULT_METHOD.to_string(),
            explicit: false,
        }
    }
}

/// Everything one run needs to build its request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    pub url: String,
    pub method: MethodFlag,
    /// Literal body data, or `@path` naming a file. Empty means no body.
    pub data: String,
    /// Raw `Key: Value` entries in command-line order.
    pub headers: Vec<String>,
    pub verbose: bool,
}

impl Invocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = MethodFlag::explicit(method);
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.headers.push(header.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
