use spamguard::{init_bot, BotConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    mobot::init_logger();

    let config = BotConfig::from_env().expect("Invalid bot configuration");
    let mut router = init_bot(config);
    router.start().await;
}
