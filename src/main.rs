#[tokio::main(flavor = "current_thread")]
async fn main() {
    let code = marker_manager::app::startup::startup().await;
    std::process::exit(code);
}
