use std::process::ExitCode;

#[actix_web::main]
async fn main() -> ExitCode {
    skumerge_lib::run().await
}
