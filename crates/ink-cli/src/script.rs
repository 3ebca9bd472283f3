//! Replay scripts: a recorded sequence of canvas commands.
//!
//! ```json
//! {
//!   "viewport": { "width": 800, "height": 600 },
//!   "offset_top": 0,
//!   "pen_color": "#fff",
//!   "commands": [
//!     { "op": "stroke", "points": [[10, 10], [50, 40]] },
//!     { "op": "solve" },
//!     { "op": "drag", "id": 0, "x": 120, "y": 80 },
//!     { "op": "reset" }
//!   ]
//! }
//! ```

use ink_core::{Color, Overlay, OverlayId, Point, StrokeStyle, VariableEnv, Viewport};
use ink_editor::{CanvasConfig, Home, HomeConfig, InputEvent};
use ink_solve::SolveService;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub offset_top: f32,
    /// Overlay reveal pacing; replays default to none.
    #[serde(default)]
    pub reveal_delay_ms: u64,
    /// Pen color as hex; the default pen when absent.
    #[serde(default, deserialize_with = "hex_color")]
    pub pen_color: Option<Color>,
    pub commands: Vec<Command>,
}

fn hex_color<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Color>, D::Error> {
    let Some(hex) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    Color::from_hex(&hex)
        .map(Some)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid pen color {hex:?}")))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Command {
    Stroke { points: Vec<(f32, f32)> },
    Solve,
    Drag { id: OverlayId, x: f32, y: f32 },
    Reset,
}

/// Final session state after a replay.
#[derive(Debug, Serialize)]
pub struct Report {
    pub overlays: Vec<Overlay>,
    pub variables: VariableEnv,
    /// Solve attempts that failed, as display strings.
    pub errors: Vec<String>,
}

impl Script {
    pub fn home_config(&self) -> HomeConfig {
        let mut style = StrokeStyle::default();
        if let Some(color) = self.pen_color {
            style.color = color;
        }
        HomeConfig {
            canvas: CanvasConfig {
                viewport: self.viewport,
                offset_top: self.offset_top,
                style,
            },
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
        }
    }
}

/// Play every command in order. Solve failures are recorded and skipped.
pub async fn run<S: SolveService>(script: &Script, service: S) -> Report {
    let mut home = Home::new(script.home_config(), service);
    let mut errors = Vec::new();

    for (i, command) in script.commands.iter().enumerate() {
        log::debug!("command {i}: {command:?}");
        match command {
            Command::Stroke { points } => {
                let Some((&(x, y), rest)) = points.split_first() else {
                    continue;
                };
                home.handle_input(&InputEvent::from_pointer_down(x, y));
                for &(x, y) in rest {
                    home.handle_input(&InputEvent::from_pointer_move(x, y));
                }
                home.handle_input(&InputEvent::PointerOut);
            }
            Command::Solve => match home.solve().await {
                Ok(ids) => log::info!("command {i}: {} overlays", ids.len()),
                Err(e) => {
                    log::warn!("command {i}: {e}");
                    errors.push(e.to_string());
                }
            },
            Command::Drag { id, x, y } => {
                if !home.on_drag_stop(*id, Point::new(*x, *y)) {
                    errors.push(format!("no overlay {id} to drag"));
                }
            }
            Command::Reset => home.reset(),
        }
    }

    Report {
        overlays: home.session().overlays().as_slice().to_vec(),
        variables: home.session().env().clone(),
        errors,
    }
}
