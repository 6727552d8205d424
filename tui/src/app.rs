/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::pages::{Page, TelemetryPage};
use log::{error, info};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{DefaultTerminal, Frame};
use rctelem::{Connection, RecordUpdate, Recorder, SessionConfig};
use std::fs::File;
use std::io::{BufWriter, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Clone, PartialEq, Default)]
pub enum LinkStatus {
    #[default]
    WaitingForDevice,
    Recording,
    Error(String),
}

pub struct AppCtx {
    pub config: SessionConfig,
    pub connection: Option<Connection>,
    pub recorder: Option<Recorder<BufWriter<File>>>,
    pub track_path: Option<PathBuf>,
    pub port_name: Option<String>,
    pub last_update: Option<RecordUpdate>,
    pub status: LinkStatus,
    pub exit: bool,
}

impl AppCtx {
    pub fn quit(&mut self) {
        self.exit = true;
    }

    fn handle_record(&mut self, result: Result<Option<String>>) {
        let record = match result {
            Ok(Some(record)) => record,
            Ok(None) => return,
            Err(e) => {
                // No reconnection, keep showing the last readings
                self.status = LinkStatus::Error(format!("Serial link lost: {e}"));
                self.connection = None;
                return;
            }
        };

        let Some(recorder) = self.recorder.as_mut() else {
            return;
        };
        match recorder.handle_record(&record) {
            Ok(outcome) => self.last_update = Some(outcome.update),
            Err(e) => {
                error!("Failed to append to track: {}", e);
                self.status = LinkStatus::Error(format!("Track write failed: {e}"));
                self.connection = None;
            }
        }
    }

    /// Terminates the track document. Runs once, on the way out.
    fn close_track(&mut self) -> Result<()> {
        if let Some(recorder) = self.recorder.take() {
            let fixes = recorder.fixes_written();
            recorder.finish()?;
            if let Some(path) = &self.track_path {
                info!("Saved {} fixes to {}", fixes, path.display());
            }
        }
        Ok(())
    }
}

pub struct App {
    current_page: Box<dyn Page + Send>,
    pub context: AppCtx,
}

impl App {
    pub fn new(config: SessionConfig) -> App {
        let context = AppCtx {
            config,
            connection: None,
            recorder: None,
            track_path: None,
            port_name: None,
            last_update: None,
            status: LinkStatus::WaitingForDevice,
            exit: false,
        };
        App {
            current_page: Box::new(TelemetryPage::new()),
            context,
        }
    }

    pub async fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let result = self.event_loop(terminal).await;
        let closed = self.context.close_track();
        result.and(closed)
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        self.current_page.on_enter(&mut self.context).await;

        let mut tick = tokio::time::interval(self.context.config.refresh_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        while !self.context.exit {
            tokio::select! {
                _ = tick.tick() => {
                    self.current_page.update(&mut self.context).await;
                    terminal.draw(|f: &mut Frame<'_>| self.draw(f))?;
                    self.drain_input().await?;
                }
                result = next_record(&mut self.context.connection) => {
                    self.context.handle_record(result);
                }
            }
        }

        if let Some(mut connection) = self.context.connection.take() {
            connection.close().await?;
        }
        Ok(())
    }

    async fn drain_input(&mut self) -> Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    self.quit();
                    break;
                }

                self.current_page.handle_input(&mut self.context, key).await;
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) {
        self.current_page.render(frame, &mut self.context);
    }

    pub fn quit(&mut self) {
        self.context.quit();
    }
}

async fn next_record(connection: &mut Option<Connection>) -> Result<Option<String>> {
    match connection {
        Some(conn) => conn.read_record().await,
        None => std::future::pending().await,
    }
}
