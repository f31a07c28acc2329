mod app;
mod event;
mod input;
mod keymap;
mod row;
mod theme;
mod ui;

pub use theme::ThemeConfig;

use anyhow::Result;

use crate::config::Config;
use crate::store::TaskStore;

pub fn run(store: TaskStore, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = app::App::new(store, config.theme.build(), config.tick_rate_ms);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
