#[actix_web::main]
async fn main() -> std::io::Result<()> {
    coursegen_server::run().await
}
