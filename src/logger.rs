use env_logger::Env;

pub fn init_logging() {
    // try_init so tests sharing one process can all call this.
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .try_init()
        .ok();
}
