fn main() -> Result<(), eframe::Error> {
    // Set up logging; RUST_LOG controls the level
    env_logger::init();

    // Run the polygon editor with options from POLYGON_EDITOR_CONFIG, if set
    polygon_editor::run_app(polygon_editor::options_from_env())
}
