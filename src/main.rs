use chisquare_lib::domain::error::AppError;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    chisquare_lib::run().await
}
