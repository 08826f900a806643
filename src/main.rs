#[tokio::main]
async fn main() {
    if let Err(e) = healthsync_lib::run().await {
        eprintln!("healthsync: {e}");
        std::process::exit(1);
    }
}
