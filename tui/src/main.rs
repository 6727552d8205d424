/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
mod app;
mod pages;
use app::App;
use env_logger::Builder;
use rctelem::SessionConfig;
use std::fs::File;
use std::io::Result;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let log_file = File::create("rctelem.log")?;

    Builder::new()
        .parse_default_env()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let mut terminal = ratatui::init();
    let mut app = App::new(SessionConfig::default());

    let app_result = app.run(&mut terminal).await;

    ratatui::restore();
    app_result
}
