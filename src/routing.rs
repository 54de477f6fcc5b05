use std::collections::BTreeMap;
use std::fmt;

use actix_web::HttpRequest;
use serde::Deserialize;
use url::{form_urlencoded, Url};

pub const AREA_KEY: &str = "area";
pub const CONTROLLER_KEY: &str = "controller";
pub const ACTION_KEY: &str = "action";

// Only used to borrow `Url`'s segment and query encoders; never rendered.
const ENCODING_BASE: &str = "http://localhost/";

/// Route and query values carried on a generated link.
///
/// Keys iterate in sorted order so identical inputs always produce identical
/// URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct RouteValues(BTreeMap<String, String>);

impl RouteValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    pub fn from_query(query: &str) -> Self {
        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(key.into(), value.to_string())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for RouteValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = RouteValues::new();
        for (key, value) in iter {
            values.insert(key, value);
        }
        values
    }
}

impl fmt::Display for RouteValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
            first = false;
        }
        Ok(())
    }
}

/// Routing identity of the request a pager is rendered for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingContext {
    pub area: Option<String>,
    pub controller: Option<String>,
    pub action: Option<String>,
}

impl RoutingContext {
    pub fn new(controller: impl Into<String>, action: impl Into<String>) -> Self {
        RoutingContext {
            area: None,
            controller: Some(controller.into()),
            action: Some(action.into()),
        }
    }

    pub fn with_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    /// Reads `area`, `controller` and `action` from the matched route segments.
    pub fn from_request(req: &HttpRequest) -> Self {
        let info = req.match_info();
        RoutingContext {
            area: info.get(AREA_KEY).map(str::to_string),
            controller: info.get(CONTROLLER_KEY).map(str::to_string),
            action: info.get(ACTION_KEY).map(str::to_string),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("No route matches values [{0}]")]
    NoMatch(String),
    #[error("Invalid route template `{template}`: {reason}")]
    InvalidTemplate {
        template: String,
        reason: &'static str,
    },
    #[error("Failed to encode URL: {0}")]
    Encoding(#[from] url::ParseError),
}

/// Turns a set of route values into a URL.
pub trait UrlResolver {
    fn resolve(&self, context: &RoutingContext, values: &RouteValues) -> Result<String, RouteError>;
}

impl<F> UrlResolver for F
where
    F: Fn(&RoutingContext, &RouteValues) -> Result<String, RouteError>,
{
    fn resolve(&self, context: &RoutingContext, values: &RouteValues) -> Result<String, RouteError> {
        self(context, values)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, optional: bool },
}

fn parse_segment(template: &str, raw: &str) -> Result<Segment, RouteError> {
    let invalid = |reason| RouteError::InvalidTemplate {
        template: template.to_string(),
        reason,
    };

    match (raw.strip_prefix('{'), raw.ends_with('}')) {
        (Some(rest), true) => {
            let inner = &rest[..rest.len() - 1];
            let (name, optional) = match inner.strip_suffix('?') {
                Some(name) => (name, true),
                None => (inner, false),
            };
            if name.is_empty() || name.contains(['{', '}']) {
                return Err(invalid("empty or malformed parameter name"));
            }
            Ok(Segment::Param {
                name: name.to_string(),
                optional,
            })
        }
        (None, false) if !raw.contains(['{', '}']) => Ok(Segment::Literal(raw.to_string())),
        _ => Err(invalid("unbalanced braces")),
    }
}

// Empty and dot segments would be dropped or collapsed by URL normalization.
fn is_segment_value(value: &str) -> bool {
    !matches!(value, "" | "." | "..")
}

struct PathPart {
    text: String,
    omittable: bool,
}

/// A URL template such as `/{controller}/{action}/{id?}` plus its defaults.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    segments: Vec<Segment>,
    defaults: RouteValues,
    area: Option<String>,
}

impl Route {
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self, RouteError> {
        let segments = template
            .split('/')
            .filter(|raw| !raw.is_empty())
            .map(|raw| parse_segment(template, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Route {
            name: name.into(),
            segments,
            defaults: RouteValues::new(),
            area: None,
        })
    }

    /// A default fills a missing template parameter. A default for a key
    /// that is not a parameter constrains the route to that value.
    pub fn with_default(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.defaults.insert(key, value);
        self
    }

    pub fn in_area(mut self, area: impl Into<String>) -> Self {
        self.area = Some(area.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn is_param(&self, key: &str) -> bool {
        self.segments
            .iter()
            .any(|segment| matches!(segment, Segment::Param { name, .. } if name == key))
    }

    fn serves_area(&self, area: Option<&str>) -> bool {
        match (self.area.as_deref(), area) {
            (None, None) => true,
            (Some(ours), Some(theirs)) => ours.eq_ignore_ascii_case(theirs),
            _ => false,
        }
    }

    fn build(&self, values: &RouteValues) -> Result<Option<String>, RouteError> {
        for (key, default) in self.defaults.iter() {
            if self.is_param(key) {
                continue;
            }
            if let Some(value) = values.get(key) {
                if !value.eq_ignore_ascii_case(default) {
                    return Ok(None);
                }
            }
        }

        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => parts.push(PathPart {
                    text: text.clone(),
                    omittable: false,
                }),
                Segment::Param { name, optional } => {
                    let default = self.defaults.get(name);
                    match values.get(name).or(default).filter(|v| is_segment_value(v)) {
                        Some(value) => parts.push(PathPart {
                            text: value.to_string(),
                            omittable: default.is_some_and(|d| d.eq_ignore_ascii_case(value)),
                        }),
                        None if *optional => {}
                        None => return Ok(None),
                    }
                }
            }
        }

        while parts.last().is_some_and(|part| part.omittable) {
            parts.pop();
        }

        let mut url = Url::parse(ENCODING_BASE)?;
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(parts.iter().map(|part| part.text.as_str()));
        }

        let extra: Vec<(&str, &str)> = values
            .iter()
            .filter(|(key, _)| {
                !self.is_param(key)
                    && !self.defaults.contains_key(key)
                    && ![AREA_KEY, CONTROLLER_KEY, ACTION_KEY].contains(key)
            })
            .collect();
        if !extra.is_empty() {
            url.query_pairs_mut().extend_pairs(extra);
        }

        Ok(Some(match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        }))
    }
}

/// Ordered route collection; the first route able to build a URL wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn push(&mut self, route: Route) {
        self.routes.push(route);
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl UrlResolver for RouteTable {
    fn resolve(&self, context: &RoutingContext, values: &RouteValues) -> Result<String, RouteError> {
        let area = values.get(AREA_KEY).or(context.area.as_deref());

        for route in self.routes.iter().filter(|route| route.serves_area(area)) {
            if let Some(url) = route.build(values)? {
                log::trace!("Route '{}' resolved [{}] to {}", route.name(), values, url);
                return Ok(url);
            }
        }

        Err(RouteError::NoMatch(values.to_string()))
    }
}
