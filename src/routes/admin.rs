use askama::Template;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;

use crate::dashboard::{navigation, AdminTab, NavItem};
use crate::error::{AppError, AppResult};
use crate::models::{MenuItemUpdate, NewMenuItem, ReservationStatus};
use crate::panels::menu::{toggle_availability, toggle_special};
use crate::panels::{MenuFilter, MenuItemForm, MenuPanel, ReservationFilter, ReservationPanel};
use crate::routes::home::Html;
use crate::state::AppState;
use crate::stores::{MenuScope, MenuStore, Mutation, ReservationStore};

/// Content area of the dashboard
pub enum PanelView {
    Reservations(ReservationPanel),
    Menu(MenuPanel),
    Placeholder(&'static str),
}

#[derive(Template)]
#[template(path = "pages/admin.html")]
pub struct DashboardTemplate {
    pub site_name: String,
    pub nav: Vec<NavItem>,
    pub title: &'static str,
    pub panel: PanelView,
    pub notice: Option<String>,
}

#[derive(Template)]
#[template(path = "pages/menu_form.html")]
pub struct MenuFormTemplate {
    pub site_name: String,
    pub nav: Vec<NavItem>,
    pub title: &'static str,
    pub action: String,
    pub form: MenuItemForm,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: String,
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleForm {
    #[serde(default)]
    pub current: bool,
    pub filter: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    pub filter: Option<String>,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin", get(dashboard))
        .route(
            "/admin/reservations/{id}/status",
            post(update_reservation_status),
        )
        .route("/admin/menu", post(create_menu_item))
        .route("/admin/menu/new", get(new_menu_item))
        .route("/admin/menu/{id}", post(update_menu_item))
        .route("/admin/menu/{id}/edit", get(edit_menu_item))
        .route("/admin/menu/{id}/availability", post(toggle_menu_availability))
        .route("/admin/menu/{id}/special", post(toggle_menu_special))
        .route("/admin/menu/{id}/delete", post(delete_menu_item))
}

impl DashboardTemplate {
    fn new(state: &AppState, tab: AdminTab, panel: PanelView) -> Self {
        Self {
            site_name: state.config.site.name.clone(),
            nav: navigation(tab),
            title: tab.label(),
            panel,
            notice: None,
        }
    }

    fn reservations(
        state: &AppState,
        store: &ReservationStore,
        filter: ReservationFilter,
    ) -> Self {
        let panel = PanelView::Reservations(ReservationPanel::build(store, filter));
        Self::new(state, AdminTab::Reservations, panel)
    }

    fn menu(state: &AppState, store: &MenuStore, filter: MenuFilter) -> Self {
        let panel = PanelView::Menu(MenuPanel::build(store, filter));
        Self::new(state, AdminTab::Menu, panel)
    }

    /// Surface a failed mutation above the panel
    fn after<T>(mut self, outcome: Mutation<T>) -> Self {
        if let Err(message) = outcome {
            self.notice = Some(message);
        }
        self
    }
}

impl MenuFormTemplate {
    fn new(state: &AppState, title: &'static str, action: String, form: MenuItemForm) -> Self {
        Self {
            site_name: state.config.site.name.clone(),
            nav: navigation(AdminTab::Menu),
            title,
            action,
            form,
            error: None,
        }
    }

    fn rejected(mut self, error: String) -> Response {
        self.error = Some(error);
        (StatusCode::UNPROCESSABLE_ENTITY, Html(self)).into_response()
    }
}

async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Response> {
    let tab = AdminTab::parse(query.tab.as_deref());
    let filter = query.filter.as_deref();

    let template = match tab {
        AdminTab::Reservations => {
            let store = ReservationStore::load(state.client.clone()).await;
            DashboardTemplate::reservations(&state, &store, ReservationFilter::parse(filter))
        }
        AdminTab::Menu => {
            let store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
            DashboardTemplate::menu(&state, &store, MenuFilter::parse(filter))
        }
        other => {
            let text = other.placeholder().unwrap_or_default();
            DashboardTemplate::new(&state, other, PanelView::Placeholder(text))
        }
    };

    Ok(Html(template).into_response())
}

async fn update_reservation_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> AppResult<Response> {
    let status = form
        .status
        .parse::<ReservationStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut store = ReservationStore::load(state.client.clone()).await;
    let outcome = store.update_status(&id, status).await;

    let filter = ReservationFilter::parse(form.filter.as_deref());
    let template = DashboardTemplate::reservations(&state, &store, filter).after(outcome);
    Ok(Html(template).into_response())
}

async fn toggle_menu_availability(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> AppResult<Response> {
    let mut store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    let outcome = toggle_availability(&mut store, &id, form.current).await;

    let filter = MenuFilter::parse(form.filter.as_deref());
    let template = DashboardTemplate::menu(&state, &store, filter).after(outcome);
    Ok(Html(template).into_response())
}

async fn toggle_menu_special(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<ToggleForm>,
) -> AppResult<Response> {
    let mut store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    let outcome = toggle_special(&mut store, &id, form.current).await;

    let filter = MenuFilter::parse(form.filter.as_deref());
    let template = DashboardTemplate::menu(&state, &store, filter).after(outcome);
    Ok(Html(template).into_response())
}

async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<FilterForm>,
) -> AppResult<Response> {
    let mut store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    let outcome = store.delete(&id).await;

    let filter = MenuFilter::parse(form.filter.as_deref());
    let template = DashboardTemplate::menu(&state, &store, filter).after(outcome);
    Ok(Html(template).into_response())
}

async fn new_menu_item(State(state): State<AppState>) -> AppResult<Response> {
    let template = MenuFormTemplate::new(
        &state,
        "Add Menu Item",
        "/admin/menu".to_string(),
        MenuItemForm::default(),
    );
    Ok(Html(template).into_response())
}

async fn create_menu_item(
    State(state): State<AppState>,
    Form(form): Form<MenuItemForm>,
) -> AppResult<Response> {
    let action = "/admin/menu".to_string();
    let template = MenuFormTemplate::new(&state, "Add Menu Item", action, form);
    let input = match template.form.validate() {
        Ok(input) => input,
        Err(e) => return Ok(template.rejected(e.to_string())),
    };

    let mut store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    match store.create(NewMenuItem::from(input)).await {
        Ok(_) => {
            let dashboard = DashboardTemplate::menu(&state, &store, MenuFilter::All);
            Ok(Html(dashboard).into_response())
        }
        Err(message) => Ok(template.rejected(message)),
    }
}

async fn edit_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    let item = store.find(&id).ok_or(AppError::NotFound)?;

    let template = MenuFormTemplate::new(
        &state,
        "Edit Menu Item",
        format!("/admin/menu/{}", id),
        MenuItemForm::from_item(item),
    );
    Ok(Html(template).into_response())
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<MenuItemForm>,
) -> AppResult<Response> {
    let action = format!("/admin/menu/{}", id);
    let template = MenuFormTemplate::new(&state, "Edit Menu Item", action, form);
    let input = match template.form.validate() {
        Ok(input) => input,
        Err(e) => return Ok(template.rejected(e.to_string())),
    };

    let mut store = MenuStore::load(state.client.clone(), MenuScope::Admin).await;
    if store.find(&id).is_none() && store.error().is_none() {
        return Err(AppError::NotFound);
    }

    match store.update(&id, MenuItemUpdate::from(input)).await {
        Ok(_) => {
            let dashboard = DashboardTemplate::menu(&state, &store, MenuFilter::All);
            Ok(Html(dashboard).into_response())
        }
        Err(message) => Ok(template.rejected(message)),
    }
}
