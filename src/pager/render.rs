use maud::{html, Markup, PreEscaped, Render};

use super::layout::{layout, PagerItem};
use super::state::{PagingState, SortState};
use crate::ajax::AttributeProvider;
use crate::routing::{RouteValues, RoutingContext, UrlResolver, ACTION_KEY, AREA_KEY, CONTROLLER_KEY};

pub const PAGE_KEY: &str = "page";
pub const SORT_BY_KEY: &str = "sort_by";
pub const SORT_DESCENDING_KEY: &str = "sort_descending";

const PREVIOUS_TEXT: &str = "&lt;";
const NEXT_TEXT: &str = "&gt;";
const ELLIPSIS: &str = "...";

fn escape(text: &str) -> String {
    text.render().into_string()
}

/// Renders pager markup, resolving every link through an injected resolver.
pub struct PageLinkRenderer<'a> {
    resolver: &'a dyn UrlResolver,
    context: &'a RoutingContext,
}

impl<'a> PageLinkRenderer<'a> {
    pub fn new(resolver: &'a dyn UrlResolver, context: &'a RoutingContext) -> Self {
        PageLinkRenderer { resolver, context }
    }

    pub fn render(
        &self,
        state: &PagingState,
        sort: Option<&SortState>,
        params: &RouteValues,
        options: Option<&dyn AttributeProvider>,
    ) -> Markup {
        let attributes = options
            .map(|provider| provider.html_attributes())
            .unwrap_or_default();
        let link = |text: &str, page: i64| self.page_link(text, page, sort, params, &attributes);

        let mut buffer = String::new();
        for item in layout(state) {
            let fragment = match item {
                PagerItem::Previous(Some(page)) => link(PREVIOUS_TEXT, page),
                PagerItem::Previous(None) => html! { span class="disabled" { "<" } }.into_string(),
                PagerItem::Page(page) => link(&page.to_string(), page),
                PagerItem::Current(page) => html! { span class="current" { (page) } }.into_string(),
                PagerItem::Ellipsis => ELLIPSIS.to_string(),
                PagerItem::Next(Some(page)) => link(NEXT_TEXT, page),
                PagerItem::Next(None) => html! { span class="disabled" { ">" } }.into_string(),
            };
            buffer.push_str(&fragment);
        }

        PreEscaped(buffer)
    }

    /// Route values for the link to `page`.
    ///
    /// Sort values replace any in `params` when a sort state is given, and an
    /// unset column or direction removes the parameter. Routing identity
    /// falls back to the current request.
    pub fn link_values(&self, page: i64, sort: Option<&SortState>, params: &RouteValues) -> RouteValues {
        let mut values = params.clone();
        values.insert(PAGE_KEY, page);

        if let Some(sort) = sort {
            match sort.sort_by.as_deref() {
                Some(column) => values.insert(SORT_BY_KEY, column),
                None => values.remove(SORT_BY_KEY),
            };
            match sort.direction.as_query_value() {
                Some(flag) => values.insert(SORT_DESCENDING_KEY, flag),
                None => values.remove(SORT_DESCENDING_KEY),
            };
        }

        let defaults = [
            (AREA_KEY, &self.context.area),
            (CONTROLLER_KEY, &self.context.controller),
            (ACTION_KEY, &self.context.action),
        ];
        for (key, value) in defaults {
            if let Some(value) = value {
                if !values.contains_key(key) {
                    values.insert(key, value);
                }
            }
        }

        values
    }

    fn page_link(
        &self,
        text: &str,
        page: i64,
        sort: Option<&SortState>,
        params: &RouteValues,
        attributes: &[(String, String)],
    ) -> String {
        let values = self.link_values(page, sort, params);
        let url = match self.resolver.resolve(self.context, &values) {
            Ok(url) => url,
            Err(e) => {
                log::debug!("Omitting pager link to page {page}: {e}");
                return String::new();
            }
        };

        let mut anchor = String::from("<a");
        for (name, value) in attributes {
            anchor.push_str(&format!(" {}=\"{}\"", name, escape(value)));
        }
        anchor.push_str(&format!(" href=\"{}\">{}</a>", escape(&url), text));
        anchor
    }
}

/// A pager bound to its inputs, embeddable in `html!` templates.
pub struct Pager<'a> {
    renderer: PageLinkRenderer<'a>,
    state: PagingState,
    sort: Option<SortState>,
    params: RouteValues,
    options: Option<&'a dyn AttributeProvider>,
}

impl<'a> Pager<'a> {
    pub fn new(renderer: PageLinkRenderer<'a>, state: PagingState) -> Self {
        Pager {
            renderer,
            state,
            sort: None,
            params: RouteValues::new(),
            options: None,
        }
    }

    pub fn with_sort(mut self, sort: SortState) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_params(mut self, params: RouteValues) -> Self {
        self.params = params;
        self
    }

    pub fn with_options(mut self, options: &'a dyn AttributeProvider) -> Self {
        self.options = Some(options);
        self
    }
}

impl Render for Pager<'_> {
    fn render(&self) -> Markup {
        self.renderer
            .render(&self.state, self.sort.as_ref(), &self.params, self.options)
    }
}
