//! Tera templates, compiled into the binary so the landing page never depends
//! on the working directory.

use tera::Tera;

use crate::config::SiteMode;
use crate::error::AppError;

pub const BASE_TEMPLATE: &str = "base.html";
pub const LANDING_TEMPLATE: &str = "landing.html";
pub const STATUS_TEMPLATE: &str = "status.html";

/// Initialize the Tera template engine
pub fn init_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();

    // Registered together so inheritance resolves in one pass
    tera.add_raw_templates(vec![
        (BASE_TEMPLATE, include_str!("../templates/base.html")),
        (LANDING_TEMPLATE, include_str!("../templates/landing.html")),
        (STATUS_TEMPLATE, include_str!("../templates/status.html")),
    ])?;

    Ok(tera)
}

/// Page template for the given site mode
pub fn page_template(mode: SiteMode) -> &'static str {
    match mode {
        SiteMode::Landing => LANDING_TEMPLATE,
        SiteMode::Status => STATUS_TEMPLATE,
    }
}
