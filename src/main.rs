/// Image preview entry point for native builds
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use image_preview::native;
    use std::path::PathBuf;

    let config = match native::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(2);
        }
    };
    native::init_logging(config.log_level);

    // Paths on the command line are treated as a single drop payload
    let paths: Vec<PathBuf> = std::env::args_os().skip(1).map(PathBuf::from).collect();
    let controller = native::run(config, paths);

    if controller.label_text().is_some() && controller.preview_source().is_none() {
        std::process::exit(1);
    }
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}
