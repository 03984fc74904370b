use crate::error::AppError;
use crate::models::{Field, ProfileDraft, BIO_MAX_CHARS};
use crate::routes::AppState;
use crate::views::{FormView, Navigation, Navigator, RequestState, ResultsView, SubmitOutcome};
use crate::core::ValidationErrors;
use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("landing.html", include_str!("../../templates/landing.html")),
    ("form.html", include_str!("../../templates/form.html")),
    ("results.html", include_str!("../../templates/results.html")),
];

/// Compiled page templates
#[derive(Debug)]
pub struct Pages {
    tera: Tera,
}

impl Pages {
    pub fn load() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        Ok(Self { tera })
    }

    pub fn landing(&self) -> Result<String, tera::Error> {
        self.tera.render("landing.html", &Context::new())
    }

    pub fn form(&self, draft: &ProfileDraft, errors: &ValidationErrors) -> Result<String, tera::Error> {
        let values: BTreeMap<&str, &str> = Field::ALL
            .iter()
            .map(|f| (f.as_str(), draft.field(*f)))
            .collect();
        let errors: BTreeMap<&str, &str> = errors.iter().map(|(f, m)| (f.as_str(), m)).collect();

        let mut ctx = Context::new();
        ctx.insert("values", &values);
        ctx.insert("errors", &errors);
        ctx.insert("bio_len", &draft.bio_len());
        ctx.insert("bio_max", &BIO_MAX_CHARS);
        ctx.insert("genders", &GENDER_OPTIONS);
        self.tera.render("form.html", &ctx)
    }

    pub fn results(&self, view: &ResultsView, toast_ms: u64) -> Result<String, tera::Error> {
        let state = view.state();
        let cards: Vec<Card> = state
            .profiles()
            .iter()
            .map(|p| Card {
                name: p.full_name(),
                first_name: p.first_name.clone(),
                city: p.city.clone(),
                country: p.country.clone(),
                age: p.age,
                photo_url: p.photo_url.clone(),
                fallback_url: p.fallback_photo_url(),
            })
            .collect();

        let mut ctx = Context::new();
        ctx.insert("greeting", &view.greeting());
        ctx.insert("loading", &state.is_loading());
        ctx.insert("error", &state.failure().map(|f| f.reason()));
        ctx.insert("empty", &matches!(state, RequestState::Success(ref p) if p.is_empty()));
        ctx.insert("cards", &cards);
        ctx.insert("toast_ms", &toast_ms);
        self.tera.render("results.html", &ctx)
    }
}

#[derive(Debug, Serialize)]
struct GenderOption {
    value: &'static str,
    label: &'static str,
}

const GENDER_OPTIONS: [GenderOption; 3] = [
    GenderOption { value: "male", label: "👨 Man" },
    GenderOption { value: "female", label: "👩 Woman" },
    GenderOption { value: "other", label: "🌈 Other" },
];

#[derive(Debug, Serialize)]
struct Card {
    name: String,
    first_name: String,
    city: String,
    country: String,
    age: u32,
    photo_url: String,
    fallback_url: String,
}

/// Configure page routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing))
        .route("/form", web::get().to(form))
        .route("/form", web::post().to(submit_form))
        .route("/result", web::get().to(result_without_profile));
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(body)
}

/// GET /
async fn landing(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(html(StatusCode::OK, state.pages.landing()?))
}

/// GET /form
async fn form(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let body = state.pages.form(&ProfileDraft::default(), &ValidationErrors::new())?;
    Ok(html(StatusCode::OK, body))
}

/// POST /form
///
/// A rejected draft comes back with its values and messages. An accepted
/// draft waits out the submission delay and is handed straight to a freshly
/// mounted results view, so the profile never outlives this request.
async fn submit_form(
    state: web::Data<AppState>,
    fields: web::Form<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let (navigator, mut inbox) = Navigator::channel();
    let mut form = FormView::new(navigator, state.ctx.submit_delay);

    // Legacy field names ("prenom") resolve like they do in JSON bodies
    for (key, value) in fields.iter() {
        match key.parse::<Field>() {
            Ok(field) => form.edit(field, value),
            Err(e) => tracing::debug!("Ignoring form input: {}", e),
        }
    }

    if let SubmitOutcome::Rejected(errors) = form.submit() {
        tracing::info!("Profile form rejected ({} fields)", errors.len());
        let body = state.pages.form(form.draft(), &errors)?;
        return Ok(html(StatusCode::UNPROCESSABLE_ENTITY, body));
    }

    let draft = match inbox.recv().await {
        Some(Navigation::Results(Some(draft))) => draft,
        _ => return Err(AppError::NavigationStateMissing),
    };

    let (navigator, _inbox) = Navigator::channel();
    let mut view = ResultsView::mount(Some(draft), &state.ctx, navigator);
    view.settled().await;

    let body = state.pages.results(&view, state.ctx.toast_duration.as_millis() as u64)?;
    Ok(html(StatusCode::OK, body))
}

/// GET /result
///
/// Reached without a submitted profile: renders the "no profile data" state.
async fn result_without_profile(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let (navigator, _inbox) = Navigator::channel();
    let view = ResultsView::mount(None, &state.ctx, navigator);

    let body = state.pages.results(&view, state.ctx.toast_duration.as_millis() as u64)?;
    Ok(html(StatusCode::OK, body))
}
