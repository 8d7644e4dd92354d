use expense_mcp_server::run_calculator;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    run_calculator().await
}
