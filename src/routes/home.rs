use askama::Template;
use axum::extract::rejection::FormRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::config::SiteConfig;
use crate::contact::{ContactForm, SelectOption, SubmitStatus};
use crate::error::AppResult;
use crate::i18n::{Language, Strings};
use crate::models::{MenuCategory, MenuItem};
use crate::panels::menu::MenuCard;
use crate::state::AppState;
use crate::stores::{MenuScope, MenuStore, ReservationStore};

/// How many dishes the home page highlights
const HIGHLIGHT_COUNT: usize = 6;

/// Wrapper to render askama templates as axum responses
pub struct Html<T: Template>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                body,
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Template render error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Template error").into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct LangQuery {
    pub lang: Option<String>,
}

/// Chrome shared by the public pages
pub struct Page {
    pub language: Language,
    pub lang: &'static str,
    pub other_lang: &'static str,
    pub other_lang_name: &'static str,
    pub path: &'static str,
    pub t: &'static Strings,
    pub site: SiteConfig,
}

impl Page {
    fn new(state: &AppState, query: &LangQuery, path: &'static str) -> Self {
        let lang = Language::from_param(query.lang.as_deref(), state.config.site.default_language);
        Self {
            language: lang,
            lang: lang.code(),
            other_lang: lang.other().code(),
            other_lang_name: lang.other().strings().language_name,
            path,
            t: lang.strings(),
            site: state.config.site.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub highlights: Vec<MenuCard>,
    pub form: ContactForm,
    pub status: Option<SubmitStatus>,
    pub time_options: Vec<SelectOption>,
    pub guest_options: Vec<SelectOption>,
    pub today: String,
}

pub struct MenuSection {
    pub title: String,
    pub cards: Vec<MenuCard>,
}

#[derive(Template)]
#[template(path = "pages/menu.html")]
pub struct MenuTemplate {
    pub page: Page,
    pub sections: Vec<MenuSection>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/menu", get(menu))
        .route("/contact", post(contact))
}

/// Specials first; when nothing is marked special, the first dishes on the menu
pub fn highlights(items: &[MenuItem]) -> Vec<MenuCard> {
    let specials: Vec<&MenuItem> = items.iter().filter(|item| item.is_special).collect();
    let chosen = if specials.is_empty() {
        items.iter().collect()
    } else {
        specials
    };
    chosen
        .into_iter()
        .take(HIGHLIGHT_COUNT)
        .map(MenuCard::from_item)
        .collect()
}

/// Group dishes under their category headings. Unrecognised categories follow
/// the known ones, titled with their stored name.
pub fn menu_sections(items: &[MenuItem], strings: &Strings) -> Vec<MenuSection> {
    let mut sections: Vec<MenuSection> = MenuCategory::ALL
        .iter()
        .map(|category| MenuSection {
            title: strings.category(*category).to_string(),
            cards: items
                .iter()
                .filter(|item| item.menu_category() == Some(*category))
                .map(MenuCard::from_item)
                .collect(),
        })
        .collect();

    for item in items.iter().filter(|item| item.menu_category().is_none()) {
        match sections.iter_mut().find(|s| s.title == item.category) {
            Some(section) => section.cards.push(MenuCard::from_item(item)),
            None => sections.push(MenuSection {
                title: item.category.clone(),
                cards: vec![MenuCard::from_item(item)],
            }),
        }
    }

    sections.retain(|section| !section.cards.is_empty());
    sections
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

async fn render_home(
    state: &AppState,
    page: Page,
    form: ContactForm,
    status: Option<SubmitStatus>,
) -> HomeTemplate {
    let store = MenuStore::load(state.client.clone(), MenuScope::Public).await;
    let lang = page.language;
    HomeTemplate {
        highlights: highlights(store.items()),
        time_options: form.time_options(),
        guest_options: form.guest_options(lang),
        today: today().format("%Y-%m-%d").to_string(),
        page,
        form,
        status,
    }
}

async fn index(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> AppResult<Response> {
    let page = Page::new(&state, &query, "/");
    let template = render_home(&state, page, ContactForm::default(), None).await;
    Ok(Html(template).into_response())
}

async fn menu(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
) -> AppResult<Response> {
    let page = Page::new(&state, &query, "/menu");
    let store = MenuStore::load(state.client.clone(), MenuScope::Public).await;
    let sections = menu_sections(store.items(), page.t);
    Ok(Html(MenuTemplate { page, sections }).into_response())
}

async fn contact(
    State(state): State<AppState>,
    Query(query): Query<LangQuery>,
    form: Result<Form<ContactForm>, FormRejection>,
) -> AppResult<Response> {
    let page = Page::new(&state, &query, "/");
    let lang = page.language;

    let (form, status) = match form {
        Ok(Form(mut form)) => {
            let mut store = ReservationStore::new(state.client.clone());
            let status = form.submit(&mut store, lang, today()).await;
            (form, status)
        }
        Err(rejection) => {
            tracing::warn!("Unreadable contact form: {}", rejection);
            (ContactForm::default(), SubmitStatus::unexpected(lang))
        }
    };

    let template = render_home(&state, page, form, Some(status)).await;
    Ok(Html(template).into_response())
}
