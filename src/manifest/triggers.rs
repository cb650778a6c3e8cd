//! Trigger classification.
//!
//! The `[trigger]` section maps a trigger kind to an array of records:
//!
//! ```toml
//! [[trigger.http]]
//! route = "/hello"
//! component = "hello"
//!
//! [[trigger.cron]]
//! component = "tick"
//! ```
//!
//! `http` and `redis` records decode into typed triggers; every other kind
//! keeps only its component and the kind name.

use serde::Serialize;
use toml::Value;

use crate::error::{BlueprintError, Result};
use crate::manifest::decode::{decode_route, shape_name, Fields};
use crate::manifest::schema::{
    Application, Executor, HttpTrigger, OtherTrigger, RedisTrigger, Route, Triggers,
};

/// Trigger kind decoded into [`HttpTrigger`].
pub const HTTP_TRIGGER: &str = "http";

/// Trigger kind decoded into [`RedisTrigger`].
pub const REDIS_TRIGGER: &str = "redis";

/// Partition a raw `[trigger]` section into typed buckets.
///
/// Kinds are visited in document order. Any record that fails to decode
/// aborts the whole classification.
///
/// # Errors
///
/// Returns `ShapeError` if the section is not a table, or `TriggerDecode`
/// naming the trigger kind whose records could not be decoded.
pub fn classify_triggers(section: &Value) -> Result<Triggers> {
    let section = Fields::new("trigger", section)?;
    let mut triggers = Triggers::default();

    for (kind, records) in section.entries() {
        let path = section.field_path(kind);
        classify_kind(&mut triggers, kind, &path, records).map_err(|e| {
            BlueprintError::TriggerDecode {
                kind: kind.clone(),
                source: Box::new(e),
            }
        })?;
    }

    tracing::debug!(
        http = triggers.http.len(),
        redis = triggers.redis.len(),
        other = triggers.other.len(),
        "Classified triggers"
    );

    Ok(triggers)
}

fn classify_kind(triggers: &mut Triggers, kind: &str, path: &str, records: &Value) -> Result<()> {
    let records = match records {
        Value::Array(records) => records,
        other => {
            return Err(BlueprintError::ShapeError {
                field: path.to_string(),
                expected: "an array of tables",
                found: shape_name(other),
            })
        }
    };

    for (i, record) in records.iter().enumerate() {
        let record = Fields::new(format!("{}[{}]", path, i), record)?;
        match kind {
            HTTP_TRIGGER => triggers.http.push(decode_http(&record)?),
            REDIS_TRIGGER => triggers.redis.push(decode_redis(&record)?),
            _ => triggers.other.push(OtherTrigger {
                kind: kind.to_string(),
                component: record.required_string("component")?,
            }),
        }
    }

    Ok(())
}

fn decode_http(record: &Fields<'_>) -> Result<HttpTrigger> {
    let route = match record.get("route") {
        Some(value) => decode_route(&record.field_path("route"), value)?,
        None => {
            return Err(BlueprintError::MissingSubfield {
                field: record.path().to_string(),
                subfield: "route".to_string(),
            })
        }
    };

    let executor = match record.table("executor")? {
        Some(executor) => match executor.optional_string("type")? {
            Some(kind) if !kind.is_empty() => Executor { kind },
            _ => Executor::default(),
        },
        None => Executor::default(),
    };

    Ok(HttpTrigger {
        route,
        component: record.required_string("component")?,
        executor,
    })
}

fn decode_redis(record: &Fields<'_>) -> Result<RedisTrigger> {
    Ok(RedisTrigger {
        address: record.string("address")?,
        channel: record.string("channel")?,
        component: record.required_string("component")?,
    })
}

/// The triggers that target one component.
#[derive(Debug, Default, Serialize)]
pub struct ComponentTriggers<'a> {
    pub http: Vec<&'a HttpTrigger>,
    pub redis: Vec<&'a RedisTrigger>,
    pub other: Vec<&'a OtherTrigger>,
}

impl ComponentTriggers<'_> {
    /// Whether no trigger targets the component.
    pub fn is_empty(&self) -> bool {
        self.http.is_empty() && self.redis.is_empty() && self.other.is_empty()
    }
}

impl Triggers {
    /// Total number of triggers across all kinds.
    pub fn len(&self) -> usize {
        self.http.len() + self.redis.len() + self.other.len()
    }

    /// Whether the manifest declares no triggers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Select the triggers whose `component` names the given component.
    ///
    /// Triggers naming components that do not exist are never selected;
    /// they are not reported as errors.
    pub fn for_component(&self, component: &str) -> ComponentTriggers<'_> {
        ComponentTriggers {
            http: self
                .http
                .iter()
                .filter(|t| t.component == component)
                .collect(),
            redis: self
                .redis
                .iter()
                .filter(|t| t.component == component)
                .collect(),
            other: self
                .other
                .iter()
                .filter(|t| t.component == component)
                .collect(),
        }
    }
}

impl HttpTrigger {
    /// The route as shown to users.
    ///
    /// Plain routes are joined onto the application base path; private
    /// routes show as `Private`.
    pub fn display_route(&self, application: &Application) -> String {
        match &self.route {
            Route::Path(path) => {
                let base = application.trigger.http_base.trim_end_matches('/');
                format!("{}{}", base, path)
            }
            Route::Config { private: true } => "Private".to_string(),
            Route::Config { private: false } => "-".to_string(),
        }
    }
}

impl RedisTrigger {
    /// The trigger's address, or the application default when it has none.
    pub fn effective_address<'a>(&'a self, application: &'a Application) -> &'a str {
        if self.address.is_empty() {
            &application.trigger.redis_address
        } else {
            &self.address
        }
    }
}
