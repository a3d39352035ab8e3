use actix_web::{error, http::header::ContentType, web, HttpRequest, HttpResponse};
use askama::Template;
use validator::Validate;

use crate::models::domain::{
    BATHROOMS_RANGE, BEDROOMS_RANGE, PARKING_RANGE, STORIES_RANGE,
};
use crate::models::{FurnishingStatus, HouseRecord, PredictRequest, YesNo};
use crate::routes::predict::AppState;

/// The prediction form, optionally showing the outcome of the last submission
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub area: String,
    pub sliders: Vec<SliderField>,
    pub selects: Vec<SelectField>,
    pub notice_kind: &'static str,
    pub notice: String,
    pub training_run: String,
}

pub struct SliderField {
    pub name: &'static str,
    pub label: &'static str,
    pub min: u8,
    pub max: u8,
    pub value: u8,
}

pub struct SelectField {
    pub name: &'static str,
    pub label: &'static str,
    pub options: Vec<SelectOption>,
}

pub struct SelectOption {
    pub value: &'static str,
    pub selected: bool,
}

/// Form values before the user has submitted anything
fn initial_request() -> PredictRequest {
    PredictRequest {
        area: 0.0,
        bedrooms: BEDROOMS_RANGE.0,
        bathrooms: BATHROOMS_RANGE.0,
        stories: STORIES_RANGE.0,
        parking: PARKING_RANGE.0,
        mainroad: YesNo::Yes,
        guestroom: YesNo::Yes,
        basement: YesNo::Yes,
        hotwaterheating: YesNo::Yes,
        airconditioning: YesNo::Yes,
        prefarea: YesNo::Yes,
        furnishingstatus: FurnishingStatus::Furnished,
    }
}

fn yes_no_select(name: &'static str, label: &'static str, current: YesNo) -> SelectField {
    SelectField {
        name,
        label,
        options: YesNo::ALL
            .iter()
            .map(|v| SelectOption {
                value: v.as_str(),
                selected: *v == current,
            })
            .collect(),
    }
}

impl IndexTemplate {
    pub fn new(values: &PredictRequest, training_run: &str) -> Self {
        let slider = |name, label, (min, max): (u8, u8), value| SliderField {
            name,
            label,
            min,
            max,
            value,
        };

        Self {
            area: values.area.to_string(),
            sliders: vec![
                slider("bedrooms", "Number of Bedrooms", BEDROOMS_RANGE, values.bedrooms),
                slider("bathrooms", "Number of Bathrooms", BATHROOMS_RANGE, values.bathrooms),
                slider("stories", "Number of Stories", STORIES_RANGE, values.stories),
                slider("parking", "Parking Spaces", PARKING_RANGE, values.parking),
            ],
            selects: vec![
                yes_no_select("mainroad", "Main Road Access", values.mainroad),
                yes_no_select("guestroom", "Guest Room Available", values.guestroom),
                yes_no_select("basement", "Basement Available", values.basement),
                yes_no_select("hotwaterheating", "Hot Water Heating", values.hotwaterheating),
                yes_no_select("airconditioning", "Air Conditioning", values.airconditioning),
                yes_no_select("prefarea", "Preferred Area", values.prefarea),
                SelectField {
                    name: "furnishingstatus",
                    label: "Furnishing Status",
                    options: FurnishingStatus::ALL
                        .iter()
                        .map(|v| SelectOption {
                            value: v.as_str(),
                            selected: *v == values.furnishingstatus,
                        })
                        .collect(),
                },
            ],
            notice_kind: "",
            notice: String::new(),
            training_run: training_run.to_string(),
        }
    }

    pub fn with_success(mut self, formatted_price: &str) -> Self {
        self.notice_kind = "success";
        self.notice = format!("The predicted house price is: {}", formatted_price);
        self
    }

    pub fn with_failure(mut self, detail: &str) -> Self {
        self.notice_kind = "error";
        self.notice = format!("Prediction failed: {}", detail);
        self
    }

    fn into_response(self, mut builder: actix_web::HttpResponseBuilder) -> HttpResponse {
        match self.render() {
            Ok(html) => builder.content_type(ContentType::html()).body(html),
            Err(e) => {
                tracing::error!("Failed to render form template: {}", e);
                HttpResponse::InternalServerError().body("Failed to render page")
            }
        }
    }
}

/// Configure the HTML form routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(show_form))
        .route("/predict", web::post().to(submit_form));
}

/// GET /
async fn show_form(state: web::Data<AppState>) -> HttpResponse {
    IndexTemplate::new(&initial_request(), state.predictor.training_run())
        .into_response(HttpResponse::Ok())
}

/// POST /predict
///
/// Urlencoded form submission; re-renders the form with the price or a
/// failure banner.
async fn submit_form(state: web::Data<AppState>, form: web::Form<PredictRequest>) -> HttpResponse {
    let values = form.into_inner();
    let page = IndexTemplate::new(&values, state.predictor.training_run());

    if let Err(errors) = values.validate() {
        tracing::info!("Rejected form submission: {}", errors);
        return page
            .with_failure(&errors.to_string())
            .into_response(HttpResponse::BadRequest());
    }

    let record = HouseRecord::from(values);
    match state.predictor.predict(&record) {
        Ok(prediction) => {
            tracing::info!("Form prediction: {}", prediction.formatted_price);
            page.with_success(&prediction.formatted_price)
                .into_response(HttpResponse::Ok())
        }
        Err(e) => {
            let status = super::predict::status_for(&e);
            if status.is_server_error() {
                tracing::error!("Form prediction failed: {}", e);
            } else {
                tracing::info!("Form prediction rejected: {}", e);
            }
            page.with_failure(&e.to_string())
                .into_response(HttpResponse::build(status))
        }
    }
}

/// Handle undecodable form submissions by re-rendering the form
pub fn handle_form_payload_error(err: error::UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Form payload error on {}: {}", req.path(), err);

    let training_run = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.predictor.training_run().to_string())
        .unwrap_or_default();

    let response = IndexTemplate::new(&initial_request(), &training_run)
        .with_failure(&format!("Invalid form submission: {}", err))
        .into_response(HttpResponse::BadRequest());

    error::InternalError::from_response(err, response).into()
}
