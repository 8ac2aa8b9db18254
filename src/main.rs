#[tokio::main]
async fn main() {
    let code = ausbildungsnachweis_lib::run().await;
    std::process::exit(code);
}
