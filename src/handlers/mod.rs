pub mod health_handler;
pub mod mcq_handler;
pub mod session_handler;

use actix_web::web;

pub use health_handler::{health_check, health_check_live};
pub use mcq_handler::{export_mcqs, generate_mcqs, search_mcqs};
pub use session_handler::{create_session, delete_session, get_progress, get_session};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(health_check_live)
        .service(create_session)
        .service(get_session)
        .service(delete_session)
        .service(get_progress)
        .service(generate_mcqs)
        .service(search_mcqs)
        .service(export_mcqs);
}
