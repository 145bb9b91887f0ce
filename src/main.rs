//! High Stakes entry point
//!
//! The browser build is a library (see `platform::web`); natively this runs a
//! seeded demo match and logs the scoreboard.
//!
//! Usage: `high-stakes [seed] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use high_stakes::Settings;
    use high_stakes::demo::DemoMatch;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(2);
        }
        None => 12345,
    };
    let settings = match args.next() {
        Some(path) => match Settings::load_file(std::path::Path::new(&path)) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(2);
            }
        },
        None => Settings::default(),
    };

    log::info!(
        "High Stakes demo match starting (seed {}, {}s)",
        seed,
        settings.match_duration_secs
    );

    let mut demo = DemoMatch::new(seed, &settings);
    match demo.run() {
        Some(board) => println!("Final: red {} - blue {}", board.red, board.blue),
        None => println!("Match had no scoring ticks"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
