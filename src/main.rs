use tracing::error;

use snip::config;
use snip::runtime;
use snip::system::logging;

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();

    config::init_config();

    // Guard must stay alive so buffered log writes are flushed on exit
    let _log_guard = logging::init_logging(config::get_config());

    if let Err(e) = runtime::server::run_server().await {
        error!("Fatal: {e}");
        std::process::exit(1);
    }
}
