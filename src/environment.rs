use dotenv::dotenv;
use lazy_static::lazy_static;
use log::{error, warn};
use std::env;

pub struct Environment {
    pub api_key: String,
    pub api_secret: String,
    pub endpoint: Option<String>,
}

lazy_static! {
    static ref INSTANCE: Environment = load();
}

fn load() -> Environment {
    match dotenv() {
        Ok(path) => warn!("environment variables loaded from ({})", path.display()),
        Err(e) => error!("failed to load .env file: {}", e),
    }

    Environment {
        api_key: env::var("VDS_API_KEY").expect("VDS_API_KEY must be set"),
        api_secret: env::var("VDS_API_SECRET").expect("VDS_API_SECRET must be set"),
        endpoint: env::var("VDS_ENDPOINT").ok(),
    }
}

pub fn init() {
    lazy_static::initialize(&INSTANCE);
}

pub fn get() -> &'static Environment {
    &INSTANCE
}
