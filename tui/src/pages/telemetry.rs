/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::app::{AppCtx, LinkStatus};
use crate::pages::Page;
use log::{debug, error};
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use rctelem::utilities::kph_to_mph;
use rctelem::{
    Recorder, SerialPortInfo, TelemetryField, TelemetrySample, find_telemetry_ports,
    get_telemetry_port_connection,
};
use std::time::Instant;

const TITLE: &str = "Radio Control Telemetry";

// Screen order, not wire order
const DISPLAY_ORDER: [TelemetryField; 6] = [
    TelemetryField::Speed,
    TelemetryField::TopSpeed,
    TelemetryField::Altitude,
    TelemetryField::MaxAltitude,
    TelemetryField::Latitude,
    TelemetryField::Longitude,
];

pub struct TelemetryPage {
    discovery_started: Instant,
    last_poll: Instant,
}

impl TelemetryPage {
    pub fn new() -> Self {
        Self {
            discovery_started: Instant::now(),
            last_poll: Instant::now(),
        }
    }

    async fn poll_device(&mut self, ctx: &mut AppCtx) -> Result<(), LinkStatus> {
        if ctx.status != LinkStatus::WaitingForDevice
            || self.last_poll.elapsed() < ctx.config.discovery_interval
        {
            return Ok(());
        }
        self.last_poll = Instant::now();

        let Some(port_info) = find_telemetry_ports().into_iter().next() else {
            if self.discovery_started.elapsed() >= ctx.config.discovery_timeout {
                error!("Gave up waiting for a serial device");
                return Err(LinkStatus::Error("No serial device found".to_string()));
            }
            debug!("No COM devices");
            return Ok(());
        };

        start_recording(ctx, port_info).await?;
        ctx.status = LinkStatus::Recording;
        Ok(())
    }
}

async fn start_recording(ctx: &mut AppCtx, port_info: SerialPortInfo) -> Result<(), LinkStatus> {
    let port_name = port_info.port_name.clone();
    let connection = get_telemetry_port_connection(port_info, &ctx.config)
        .await
        .map_err(|e| LinkStatus::Error(format!("Failed to open {port_name}: {e}")))?;

    let (recorder, path) = Recorder::create(&ctx.config)
        .map_err(|e| LinkStatus::Error(format!("Failed to create track file: {e}")))?;

    ctx.port_name = Some(port_name);
    ctx.connection = Some(connection);
    ctx.recorder = Some(recorder);
    ctx.track_path = Some(path);
    Ok(())
}

fn reading_line(field: TelemetryField, sample: &TelemetrySample, stale: bool) -> Line<'static> {
    let value = sample.get(field);
    let mut text = match field {
        TelemetryField::Latitude | TelemetryField::Longitude => format!("{value:.6}"),
        TelemetryField::Speed => format!("{value:.2} ({:.2} mph)", kph_to_mph(value)),
        _ => format!("{value:.2}"),
    };
    if stale {
        text.push_str("  (stale)");
    }

    let value_style = if stale {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(format!("{:>10}: ", field.as_ref()), Style::default().fg(Color::Cyan)),
        Span::styled(text, value_style),
    ])
}

fn session_lines(ctx: &AppCtx) -> Vec<String> {
    let port = match &ctx.port_name {
        Some(name) => format!("Port: {} @ {} baud", name, ctx.config.baudrate),
        None => "Port: none".to_string(),
    };
    let track = match &ctx.track_path {
        Some(path) => format!("Track: {}", path.display()),
        None => "Track: not started".to_string(),
    };
    let counts = match &ctx.recorder {
        Some(recorder) => format!(
            "Records: {}  Fixes: {}",
            recorder.records_seen(),
            recorder.fixes_written()
        ),
        None => "Records: 0  Fixes: 0".to_string(),
    };
    vec![port, track, counts]
}

#[async_trait::async_trait]
impl Page for TelemetryPage {
    async fn handle_input(&mut self, ctx: &mut AppCtx, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => ctx.quit(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame<'_>, ctx: &mut AppCtx) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(8),
                Constraint::Length(5),
                Constraint::Min(1),
            ])
            .split(frame.area());

        let (status_line, style) = match &ctx.status {
            LinkStatus::WaitingForDevice => (
                "Waiting for device...".to_string(),
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ),
            LinkStatus::Recording => (
                "Recording".to_string(),
                Style::default().fg(Color::Green).bg(Color::Black),
            ),
            LinkStatus::Error(msg) => (
                format!("Error: {msg}"),
                Style::default().fg(Color::Red).bg(Color::Black),
            ),
        };

        frame.render_widget(
            Paragraph::new(status_line)
                .style(style)
                .block(Block::default().title(TITLE).borders(Borders::ALL)),
            layout[0],
        );

        let sample = ctx
            .recorder
            .as_ref()
            .map(|r| *r.sample())
            .unwrap_or_default();
        let readings: Vec<Line> = DISPLAY_ORDER
            .iter()
            .map(|&field| {
                let stale = ctx
                    .last_update
                    .as_ref()
                    .is_some_and(|u| u.was_skipped(field));
                reading_line(field, &sample, stale)
            })
            .collect();

        frame.render_widget(
            Paragraph::new(readings)
                .block(Block::default().title("Readings").borders(Borders::ALL)),
            layout[1],
        );

        frame.render_widget(
            Paragraph::new(session_lines(ctx).join("\n"))
                .block(Block::default().title("Session").borders(Borders::ALL))
                .style(Style::default().fg(Color::Cyan)),
            layout[2],
        );

        frame.render_widget(
            Paragraph::new("q / Esc: save track and quit")
                .style(Style::default().fg(Color::DarkGray)),
            layout[3],
        );
    }

    async fn on_enter(&mut self, ctx: &mut AppCtx) {
        ctx.status = LinkStatus::WaitingForDevice;
        self.discovery_started = Instant::now();
        // First poll on the next tick
        self.last_poll = Instant::now()
            .checked_sub(ctx.config.discovery_interval)
            .unwrap_or_else(Instant::now);
    }

    async fn update(&mut self, ctx: &mut AppCtx) {
        if let Err(e) = self.poll_device(ctx).await {
            ctx.status = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TelemetrySample {
        TelemetrySample {
            speed: 100.0,
            latitude: 45.1234567,
            ..Default::default()
        }
    }

    #[test]
    fn speed_shows_mph() {
        let line = reading_line(TelemetryField::Speed, &sample(), false).to_string();
        assert_eq!("     Speed: 100.00 (62.14 mph)", line);
    }

    #[test]
    fn coordinates_keep_six_decimals() {
        let line = reading_line(TelemetryField::Latitude, &sample(), false).to_string();
        assert_eq!("  Latitude: 45.123457", line);
    }

    #[test]
    fn stale_fields_are_marked() {
        let line = reading_line(TelemetryField::Altitude, &sample(), true).to_string();
        assert!(line.ends_with("0.00  (stale)"));
    }
}
