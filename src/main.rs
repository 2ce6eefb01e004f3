use lego_grid::LegoGrid;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("🚀 Starting LEGO Grid editor");

    iced::application(
        "LEGO Grid Editor",
        LegoGrid::update,
        LegoGrid::view,
    )
    .theme(LegoGrid::theme)
    .centered()
    .run_with(LegoGrid::new)
}
