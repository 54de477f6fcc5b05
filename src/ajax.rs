use serde::Deserialize;

/// Supplies the extra HTML attributes placed on every pager anchor.
pub trait AttributeProvider {
    /// Attribute name/value pairs in emission order. Values are raw text and
    /// are escaped by the renderer.
    fn html_attributes(&self) -> Vec<(String, String)>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertionMode {
    #[default]
    Replace,
    InsertBefore,
    InsertAfter,
}

impl InsertionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsertionMode::Replace => "replace",
            InsertionMode::InsertBefore => "before",
            InsertionMode::InsertAfter => "after",
        }
    }
}

/// Unobtrusive-AJAX options rendered as `data-ajax-*` attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AjaxOptions {
    pub url: Option<String>,
    pub http_method: Option<String>,
    pub confirm: Option<String>,
    pub on_begin: Option<String>,
    pub on_complete: Option<String>,
    pub on_failure: Option<String>,
    pub on_success: Option<String>,
    pub update_target_id: Option<String>,
    pub insertion_mode: InsertionMode,
    pub loading_element_id: Option<String>,
    pub loading_element_duration: Option<u32>,
}

impl AjaxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_target(mut self, id: impl Into<String>) -> Self {
        self.update_target_id = Some(id.into());
        self
    }

    pub fn mode(mut self, mode: InsertionMode) -> Self {
        self.insertion_mode = mode;
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.http_method = Some(method.into());
        self
    }

    pub fn loading_element(mut self, id: impl Into<String>) -> Self {
        self.loading_element_id = Some(id.into());
        self
    }
}

fn push_if_set(attrs: &mut Vec<(String, String)>, name: &str, value: &Option<String>) {
    if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
        attrs.push((name.to_string(), value.to_string()));
    }
}

impl AttributeProvider for AjaxOptions {
    fn html_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![("data-ajax".to_string(), "true".to_string())];

        push_if_set(&mut attrs, "data-ajax-url", &self.url);
        push_if_set(&mut attrs, "data-ajax-method", &self.http_method);
        push_if_set(&mut attrs, "data-ajax-confirm", &self.confirm);
        push_if_set(&mut attrs, "data-ajax-begin", &self.on_begin);
        push_if_set(&mut attrs, "data-ajax-complete", &self.on_complete);
        push_if_set(&mut attrs, "data-ajax-failure", &self.on_failure);
        push_if_set(&mut attrs, "data-ajax-success", &self.on_success);

        if let Some(target) = self.update_target_id.as_deref().filter(|t| !t.is_empty()) {
            attrs.push((
                "data-ajax-mode".to_string(),
                self.insertion_mode.as_str().to_string(),
            ));
            attrs.push(("data-ajax-update".to_string(), format!("#{target}")));
        }

        if let Some(loading) = self.loading_element_id.as_deref().filter(|l| !l.is_empty()) {
            attrs.push(("data-ajax-loading".to_string(), format!("#{loading}")));
            if let Some(duration) = self.loading_element_duration.filter(|d| *d > 0) {
                attrs.push(("data-ajax-loading-duration".to_string(), duration.to_string()));
            }
        }

        attrs
    }
}

/// htmx options; links are boosted so the generated `href` drives the request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HtmxOptions {
    pub target: Option<String>,
    pub swap: Option<String>,
    pub indicator: Option<String>,
    pub push_url: Option<String>,
    pub select: Option<String>,
}

impl HtmxOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, selector: impl Into<String>) -> Self {
        self.target = Some(selector.into());
        self
    }

    pub fn swap(mut self, strategy: impl Into<String>) -> Self {
        self.swap = Some(strategy.into());
        self
    }

    pub fn push_url(mut self, push: bool) -> Self {
        self.push_url = Some(push.to_string());
        self
    }
}

impl AttributeProvider for HtmxOptions {
    fn html_attributes(&self) -> Vec<(String, String)> {
        let mut attrs = vec![("hx-boost".to_string(), "true".to_string())];

        push_if_set(&mut attrs, "hx-target", &self.target);
        push_if_set(&mut attrs, "hx-swap", &self.swap);
        push_if_set(&mut attrs, "hx-indicator", &self.indicator);
        push_if_set(&mut attrs, "hx-push-url", &self.push_url);
        push_if_set(&mut attrs, "hx-select", &self.select);

        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(attrs: &[(String, String)]) -> Vec<&str> {
        attrs.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_empty_ajax_options_only_flag_ajax() {
        let attrs = AjaxOptions::new().html_attributes();

        assert_eq!(attrs, vec![("data-ajax".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_ajax_options_attribute_order() {
        let options = AjaxOptions {
            http_method: Some("GET".to_string()),
            on_success: Some("pagerLoaded".to_string()),
            update_target_id: Some("results".to_string()),
            insertion_mode: InsertionMode::InsertAfter,
            loading_element_id: Some("spinner".to_string()),
            loading_element_duration: Some(200),
            ..AjaxOptions::default()
        };

        let attrs = options.html_attributes();

        assert_eq!(
            names(&attrs),
            vec![
                "data-ajax",
                "data-ajax-method",
                "data-ajax-success",
                "data-ajax-mode",
                "data-ajax-update",
                "data-ajax-loading",
                "data-ajax-loading-duration",
            ]
        );
        assert_eq!(attrs[3].1, "after");
        assert_eq!(attrs[4].1, "#results");
        assert_eq!(attrs[5].1, "#spinner");
        assert_eq!(attrs[6].1, "200");
    }

    #[test]
    fn test_loading_duration_requires_loading_element() {
        let options = AjaxOptions {
            loading_element_duration: Some(500),
            ..AjaxOptions::default()
        };

        assert_eq!(names(&options.html_attributes()), vec!["data-ajax"]);
    }

    #[test]
    fn test_loading_element_builder() {
        let attrs = AjaxOptions::new().loading_element("spinner").html_attributes();

        assert_eq!(
            attrs,
            vec![
                ("data-ajax".to_string(), "true".to_string()),
                ("data-ajax-loading".to_string(), "#spinner".to_string()),
            ]
        );
    }

    #[test]
    fn test_ajax_options_deserialize() {
        let options: AjaxOptions = serde_json::from_str(
            r#"{"update_target_id":"grid","insertion_mode":"insert_before","http_method":"POST"}"#,
        )
        .unwrap();

        assert_eq!(
            options,
            AjaxOptions::new()
                .update_target("grid")
                .mode(InsertionMode::InsertBefore)
                .method("POST")
        );
    }

    #[test]
    fn test_htmx_options() {
        let attrs = HtmxOptions::new()
            .target("#pager")
            .swap("outerHTML")
            .push_url(true)
            .html_attributes();

        assert_eq!(
            attrs,
            vec![
                ("hx-boost".to_string(), "true".to_string()),
                ("hx-target".to_string(), "#pager".to_string()),
                ("hx-swap".to_string(), "outerHTML".to_string()),
                ("hx-push-url".to_string(), "true".to_string()),
            ]
        );
    }
}
