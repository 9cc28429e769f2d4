pub mod products;

use tracing::info;

pub async fn homepage() -> &'static str {
    info!("Incoming request on the homepage");
    "Homepage"
}
