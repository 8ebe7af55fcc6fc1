//! Visitor filter criteria: validation of raw form input and the canonical
//! query string used for the post-submit redirect.

use serde::Serialize;

use jobboard_core::{DomainError, DomainResult, ValueObject};

use crate::job_type::JobType;

/// Raw, unvalidated filter fields as submitted by the sidebar form or found
/// in the page's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilterForm {
    pub query: Option<String>,
    /// The `type` field.
    pub job_type: Option<String>,
    pub location: Option<String>,
    pub remote: Option<String>,
}

impl RawFilterForm {
    /// Build from `name -> value` pairs in submission order. Unrecognized
    /// names (framework bookkeeping such as `$ACTION_ID_...`) are dropped;
    /// for repeated names the last value wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::default();
        for (name, value) in pairs {
            match name.as_ref() {
                "query" => raw.query = Some(value.into()),
                "type" => raw.job_type = Some(value.into()),
                "location" => raw.location = Some(value.into()),
                "remote" => raw.remote = Some(value.into()),
                _ => {}
            }
        }
        raw
    }
}

/// Validated filter criteria. Every constraint is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterCriteria {
    query: Option<String>,
    #[serde(rename = "type")]
    job_type: Option<JobType>,
    location: Option<String>,
    remote: bool,
}

impl ValueObject for FilterCriteria {}

impl FilterCriteria {
    /// Validate a raw submission.
    ///
    /// Empty fields count as absent. `query` is trimmed; `location` is kept
    /// verbatim. A non-empty `type` must name a [`JobType`].
    pub fn parse(raw: &RawFilterForm) -> DomainResult<Self> {
        let query = raw
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned);

        let job_type = match raw.job_type.as_deref() {
            None | Some("") => None,
            Some(t) => Some(t.parse::<JobType>()?),
        };

        let location = raw.location.clone().filter(|l| !l.is_empty());

        let remote = match raw.remote.as_deref() {
            None => false,
            Some(v) => parse_checkbox(v)?,
        };

        Ok(Self {
            query,
            job_type,
            location,
            remote,
        })
    }

    pub fn with_query(self, query: impl Into<String>) -> Self {
        let query = query.into().trim().to_owned();
        Self {
            query: (!query.is_empty()).then_some(query),
            ..self
        }
    }

    pub fn with_job_type(self, job_type: JobType) -> Self {
        Self {
            job_type: Some(job_type),
            ..self
        }
    }

    pub fn with_location(self, location: impl Into<String>) -> Self {
        let location = location.into();
        Self {
            location: (!location.is_empty()).then_some(location),
            ..self
        }
    }

    pub fn remote_only(self) -> Self {
        Self {
            remote: true,
            ..self
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn job_type(&self) -> Option<JobType> {
        self.job_type
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn remote(&self) -> bool {
        self.remote
    }

    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.job_type.is_none() && self.location.is_none() && !self.remote
    }

    /// Whitespace-separated search terms; each must match somewhere in a posting.
    pub fn query_terms(&self) -> impl Iterator<Item = &str> {
        self.query.as_deref().unwrap_or_default().split_whitespace()
    }

    /// Form-encoded query string holding only the constraints that are set,
    /// in the order `query`, `type`, `location`, `remote`.
    pub fn to_query_string(&self) -> String {
        let mut ser = form_urlencoded::Serializer::new(String::new());
        if let Some(query) = &self.query {
            ser.append_pair("query", query);
        }
        if let Some(job_type) = self.job_type {
            ser.append_pair("type", job_type.as_str());
        }
        if let Some(location) = &self.location {
            ser.append_pair("location", location);
        }
        if self.remote {
            ser.append_pair("remote", "true");
        }
        ser.finish()
    }

    /// Page URL the filter form redirects to.
    pub fn redirect_target(&self) -> String {
        format!("/?{}", self.to_query_string())
    }
}

fn parse_checkbox(value: &str) -> DomainResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Ok(true),
        "" | "off" | "false" | "0" | "no" => Ok(false),
        other => Err(DomainError::validation(format!(
            "remote: expected a checkbox value, got `{other}`"
        ))),
    }
}
