#![forbid(unsafe_code)]

//! Viewer state machine.
//!
//! Holds the current mesh, the rotation state, and the HUD messages, and is
//! stepped by the host once per animation frame. Also the default
//! [`ModelSink`]: delivered drop text replaces the displayed model.
//!
//! Rotation modes:
//! - **auto** (initial): angles derive from the frame counter.
//! - **manual**: left-button drags map pixel deltas to angles.
//!
//! A right-button press toggles between the two.

use wrlview_raster::font::{self, CELL_HEIGHT};
use wrlview_raster::palette::color;
use wrlview_raster::{Frame, SolidParams, draw_mesh};
use wrlview_scene::{Mesh, parse_wrl};

use crate::input::{PointerButton, PointerInput, PointerPhase};
use crate::sink::ModelSink;

/// Model shown before any file is dropped: a low-poly torus.
pub const DEFAULT_WRL_DATA: &str = "\
#VRML V2.0 utf8
DEF Torus1 Transform {
  children [
    Shape {
      geometry IndexedFaceSet {
        coord Coordinate {
          point [
            1.25 -0.0 0.0, 1.0 -0.25 0.0, 0.75 -0.0 0.0, 1.0 0.25 0.0,
            0.883883 -0.0 0.883883, 0.707107 -0.25 0.707107, 0.53033 -0.0 0.53033,
            0.707107 0.25 0.707107, 0.0 -0.0 1.25, 0.0 -0.25 1.0, 0.0 -0.0 0.75,
            0.0 0.25 1.0, -0.883883 -0.0 0.883883, -0.707107 -0.25 0.707107,
            -0.53033 -0.0 0.53033, -0.707107 0.25 0.707107, -1.25 -0.0 0.0,
            -1.0 -0.25 0.0, -0.75 -0.0 0.0, -1.0 0.25 0.0, -0.883883 -0.0 -0.883883,
            -0.707107 -0.25 -0.707107, -0.53033 -0.0 -0.53033, -0.707107 0.25 -0.707107,
            0.0 -0.0 -1.25, 0.0 -0.25 -1.0, 0.0 -0.0 -0.75, 0.0 0.25 -1.0,
            0.883883 -0.0 -0.883883, 0.707107 -0.25 -0.707107, 0.53033 -0.0 -0.53033,
            0.707107 0.25 -0.707107
          ]
        }
        coordIndex [
          0, 1, 29, 28, -1, 0, 3, 7, 4, -1, 0, 4, 5, 1, -1, 0, 28, 31, 3, -1,
          1, 2, 30, 29, -1, 1, 5, 6, 2, -1, 2, 3, 31, 30, -1, 2, 6, 7, 3, -1,
          4, 7, 11, 8, -1, 4, 8, 9, 5, -1, 5, 9, 10, 6, -1, 6, 10, 11, 7, -1,
          8, 11, 15, 12, -1, 8, 12, 13, 9, -1, 9, 13, 14, 10, -1, 10, 14, 15, 11, -1,
          12, 15, 19, 16, -1, 12, 16, 17, 13, -1, 13, 17, 18, 14, -1, 14, 18, 19, 15, -1,
          16, 19, 23, 20, -1, 16, 20, 21, 17, -1, 17, 21, 22, 18, -1, 18, 22, 23, 19, -1,
          20, 23, 27, 24, -1, 20, 24, 25, 21, -1, 21, 25, 26, 22, -1, 22, 26, 27, 23, -1,
          24, 27, 31, 28, -1, 24, 28, 29, 25, -1, 25, 29, 30, 26, -1, 26, 30, 31, 27, -1
        ]
      }
    }
  ]
}
";

/// Uniform scale applied to model coordinates.
pub const MODEL_SCALE: f32 = 50.0;

const AUTO_STEP_X: f32 = 0.01;
const AUTO_STEP_Y: f32 = 0.015;
const DRAG_STEP: f32 = 0.01;

const MODE_AUTO_TEXT: &str = "Mode: Auto (Right-click)";
const MODE_MANUAL_TEXT: &str = "Mode: Manual (Drag Left-click)";
const DROP_HINT_TEXT: &str = "Drop a .wrl file to view";
const PARSE_FAILED_TEXT: &str = "Failed to parse WRL data.";

/// The viewer's full state.
#[derive(Debug, Clone)]
pub struct Viewer {
    mesh: Mesh,
    message: Option<String>,
    angle_x: f32,
    angle_y: f32,
    auto_rotate: bool,
    dragging: bool,
    last_x: i32,
    last_y: i32,
    frame_count: u64,
}

impl Viewer {
    /// Start with the built-in torus loaded.
    #[must_use]
    pub fn new() -> Self {
        let mut viewer = Self {
            mesh: Mesh::empty(),
            message: None,
            angle_x: 0.0,
            angle_y: 0.0,
            auto_rotate: true,
            dragging: false,
            last_x: 0,
            last_y: 0,
            frame_count: 0,
        };
        viewer.load(DEFAULT_WRL_DATA);
        viewer
    }

    /// Replace the displayed model with a new WRL text.
    ///
    /// On a parse error the previous mesh stays on screen and the error is
    /// shown in the HUD. A parse that succeeds but yields no vertices
    /// replaces the mesh and shows the generic failure message.
    pub fn load(&mut self, wrl_text: &str) {
        match parse_wrl(wrl_text, MODEL_SCALE) {
            Ok(mesh) => {
                self.message = if mesh.vertices.is_empty() {
                    Some(PARSE_FAILED_TEXT.to_string())
                } else {
                    None
                };
                self.mesh = mesh;
                #[cfg(feature = "tracing")]
                tracing::info!(
                    vertices = self.mesh.vertices.len(),
                    triangles = self.mesh.triangles.len(),
                    "model replaced"
                );
            }
            Err(err) => {
                self.message = Some(format!("Error: {err}"));
                #[cfg(feature = "tracing")]
                tracing::warn!(%err, "model load failed");
            }
        }
    }

    /// Advance one animation frame.
    pub fn step(&mut self) {
        self.frame_count += 1;
        if self.auto_rotate {
            let frames = self.frame_count as f32;
            self.angle_x = (frames * AUTO_STEP_X) % core::f32::consts::TAU;
            self.angle_y = (frames * AUTO_STEP_Y) % core::f32::consts::TAU;
        }
    }

    /// Feed one normalized pointer event.
    pub fn pointer(&mut self, input: &PointerInput) {
        match (input.phase, input.button) {
            (PointerPhase::Down, Some(PointerButton::Right)) => {
                self.auto_rotate = !self.auto_rotate;
            }
            (PointerPhase::Down, Some(PointerButton::Left)) => {
                self.dragging = true;
            }
            (PointerPhase::Up, Some(PointerButton::Left)) => {
                self.dragging = false;
            }
            (PointerPhase::Move, _) => {
                if !self.auto_rotate && self.dragging {
                    let dx = input.x - self.last_x;
                    let dy = input.y - self.last_y;
                    self.angle_y += dx as f32 * DRAG_STEP;
                    self.angle_x -= dy as f32 * DRAG_STEP;
                }
            }
            _ => {}
        }
        self.last_x = input.x;
        self.last_y = input.y;
    }

    #[must_use]
    pub const fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    #[must_use]
    pub const fn angles(&self) -> (f32, f32) {
        (self.angle_x, self.angle_y)
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub const fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Draw the model and HUD into the frame.
    pub fn render(&self, frame: &mut Frame) {
        frame.clear(color::BLACK);

        if !self.mesh.is_empty() {
            draw_mesh(
                frame,
                &self.mesh,
                &SolidParams::new(self.angle_x, self.angle_y, color::LIME),
            );
        } else if let Some(message) = &self.message {
            font::draw_text(frame, 10, 10, message, color::WHITE);
        }

        let mode_text = if self.auto_rotate {
            MODE_AUTO_TEXT
        } else {
            MODE_MANUAL_TEXT
        };
        let height = i32::from(frame.height());
        font::draw_text(frame, 5, height - 2 * CELL_HEIGHT - 3, mode_text, color::WHITE);
        font::draw_text(frame, 5, height - CELL_HEIGHT - 2, DROP_HINT_TEXT, color::WHITE);
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSink for Viewer {
    fn deliver(&mut self, text: String) {
        self.load(&text);
    }
}
