use actix_web::{http::header, web, HttpRequest, HttpResponse, Result};
use maud::{html, Markup, DOCTYPE};
use serde::Deserialize;

use crate::ajax::{AttributeProvider, HtmxOptions};
use crate::config::Config;
use crate::pager::{PageLinkRenderer, Pager, PagingState, SortState};
use crate::routing::{Route, RouteError, RouteTable, RouteValues, RoutingContext};

pub const PAGER_ELEMENT_ID: &str = "pager";

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct PreviewQuery {
    #[serde(deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
    #[serde(deserialize_with = "deserialize_optional_i64")]
    pub total: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_descending: Option<bool>,
}

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
    }
}

impl PreviewQuery {
    pub fn paging_state(&self, config: &Config) -> PagingState {
        PagingState::new(
            self.page_size.unwrap_or(config.page_size),
            self.page.unwrap_or(1),
            self.total.unwrap_or(config.total_items),
        )
    }

    pub fn sort_state(&self) -> SortState {
        SortState::new(
            self.sort_by.clone().filter(|column| !column.is_empty()),
            self.sort_descending.into(),
        )
    }
}

/// Routes the preview links resolve against.
pub fn preview_routes() -> Result<RouteTable, RouteError> {
    Ok(RouteTable::new().with_route(Route::new("preview", "/{controller}/{action}")?))
}

pub async fn index() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/catalog/browse"))
        .finish()
}

pub async fn preview(
    req: HttpRequest,
    query: web::Query<PreviewQuery>,
    routes: web::Data<RouteTable>,
    config: web::Data<Config>,
) -> Result<HttpResponse> {
    let context = RoutingContext::from_request(&req);
    let state = query.paging_state(&config);
    let params = RouteValues::from_query(req.query_string());

    let htmx = HtmxOptions::new()
        .target(format!("#{PAGER_ELEMENT_ID}"))
        .swap("outerHTML")
        .push_url(true);
    let options: &dyn AttributeProvider = match &config.ajax_options {
        Some(ajax) => ajax,
        None => &htmx,
    };

    log::debug!(
        "Rendering pager preview for {:?}/{:?}: page {} of {} items",
        context.controller,
        context.action,
        state.current_page,
        state.total_item_count
    );

    let pager = Pager::new(PageLinkRenderer::new(routes.get_ref(), &context), state)
        .with_sort(query.sort_state())
        .with_params(params);
    let fragment = render_fragment(&state, pager.with_options(options));

    if req.headers().contains_key("HX-Request") {
        return Ok(HttpResponse::Ok()
            .content_type("text/html")
            .body(fragment.into_string()));
    }

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Pager Preview - Cross Pager" }
                link rel="stylesheet" href="/assets/pager.css";
                script src="/assets/htmx.js" {}
            }
            body {
                div class="container" {
                    h1 { "Pager Preview" }

                    form method="get" class="controls" {
                        label {
                            "Page size "
                            input type="number" name="page_size" min="1" value=(state.page_size);
                        }
                        label {
                            "Total items "
                            input type="number" name="total" min="0" value=(state.total_item_count);
                        }
                        label {
                            "Sort by "
                            input type="text" name="sort_by" value=(query.sort_by.as_deref().unwrap_or(""));
                        }
                        button type="submit" { "Apply" }
                    }

                    (fragment)
                }
            }
        }
    };

    Ok(HttpResponse::Ok()
        .content_type("text/html")
        .body(markup.into_string()))
}

fn render_fragment(state: &PagingState, pager: Pager<'_>) -> Markup {
    html! {
        nav id=(PAGER_ELEMENT_ID) class="pager" {
            p class="summary" {
                "Page " (state.current_page) " of " (state.page_count())
                " (" (state.total_item_count) " items)"
            }
            div class="links" { (pager) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 3010,
            page_size: 10,
            total_items: 500,
            ajax_options: None,
        }
    }

    async fn get(uri: &str, htmx: bool) -> (u16, String) {
        let app = actix_web::test::init_service(
            App::new()
                .app_data(web::Data::new(config()))
                .app_data(web::Data::new(preview_routes().unwrap()))
                .route("/{controller}/{action}", web::get().to(preview)),
        )
        .await;

        let mut req = actix_web::test::TestRequest::get().uri(uri);
        if htmx {
            req = req.insert_header(("HX-Request", "true"));
        }
        let resp = actix_web::test::call_service(&app, req.to_request()).await;
        let status = resp.status().as_u16();
        let body = actix_web::test::read_body(resp).await;

        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[actix_web::test]
    async fn test_preview_renders_full_page() {
        let (status, body) = get("/catalog/browse?page=2&total=100&q=x", false).await;

        assert_eq!(status, 200);
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains(r#"<span class="current">2</span>"#));
        assert!(body.contains(r#"href="/catalog/browse?page=3&amp;q=x&amp;total=100">3</a>"#));
        assert!(body.contains("Page 2 of 10 (100 items)"));
        assert!(body.contains(r#"<script src="/assets/htmx.js"></script>"#));
    }

    #[actix_web::test]
    async fn test_blank_controller_override_omits_links() {
        let (status, body) = get(
            "/catalog/browse?controller=&action=evil.example&total=30",
            true,
        )
        .await;

        assert_eq!(status, 200);
        assert!(!body.contains("<a "));
        assert!(!body.contains("evil.example"));
        assert!(body.contains(concat!(
            r#"<div class="links"><span class="disabled">&lt;</span>"#,
            r#"<span class="current">1</span></div>"#,
        )));
    }

    #[actix_web::test]
    async fn test_htmx_request_gets_fragment() {
        let (status, body) = get(
            "/orders/list?page=1&total=30&sort_by=name&sort_descending=true",
            true,
        )
        .await;

        assert_eq!(status, 200);
        assert!(body.starts_with(r#"<nav id="pager" class="pager">"#));
        assert!(body.contains(concat!(
            r##"<a hx-boost="true" hx-target="#pager" hx-swap="outerHTML" hx-push-url="true" "##,
            r#"href="/orders/list?page=2&amp;sort_by=name&amp;sort_descending=true&amp;total=30">2</a>"#,
        )));
    }

    #[actix_web::test]
    async fn test_invalid_page_is_rejected() {
        let (status, _) = get("/catalog/browse?page=abc", false).await;

        assert_eq!(status, 400);
    }

    #[test]
    fn test_preview_query_defaults() {
        let query = PreviewQuery {
            page: None,
            page_size: Some(25),
            total: None,
            sort_by: Some(String::new()),
            sort_descending: None,
        };

        assert_eq!(query.paging_state(&config()), PagingState::new(25, 1, 500));
        assert_eq!(query.sort_state(), SortState::default());
    }
}
