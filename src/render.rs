use crate::constants::{CELL_HEIGHT, CELL_WIDTH};
use crate::graphics::Canvas;
use crate::math::{apply_lighting, Point};
use crate::scene::Scene;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};
use std::io::{self, Write};
use std::time::Instant;

const SPHERE_FRAMES: [char; 4] = ['◐', '◓', '◑', '◒'];
const RING_COLOR: Color = Color::Rgb { r: 70, g: 70, b: 110 };
const COMET_TAIL_CELLS: f64 = 4.0;
const COMET_TAIL_COLOR: Color = Color::Rgb {
    r: 140,
    g: 170,
    b: 220,
};

/// Frames painted per second, refreshed once a second
#[derive(Debug)]
pub struct FpsCounter {
    frames: usize,
    window_start: Instant,
    fps: f64,
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        FpsCounter {
            frames: 0,
            window_start: now,
            fps: 0.0,
        }
    }

    /// Counts one painted frame at `now`
    pub fn tick(&mut self, now: Instant) {
        self.frames += 1;
        let window = now.saturating_duration_since(self.window_start).as_secs_f64();
        if window >= 1.0 {
            self.fps = self.frames as f64 / window;
            self.frames = 0;
            self.window_start = now;
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Paints scenes to the terminal
pub struct Renderer {
    fps: FpsCounter,
    /// Show the debug overlay
    pub debug: bool,
}

impl Renderer {
    pub fn new(debug: bool) -> Self {
        Renderer {
            fps: FpsCounter::new(Instant::now()),
            debug,
        }
    }

    pub fn paint<W: Write>(&mut self, scene: &Scene, out: &mut W) -> io::Result<()> {
        self.fps.tick(Instant::now());

        let (width, height) = scene.size();
        let mut canvas = Canvas::new(
            (width / CELL_WIDTH) as usize,
            (height / CELL_HEIGHT) as usize,
        );
        draw_scene(scene, &mut canvas);
        if self.debug {
            self.draw_overlay(scene, &mut canvas);
        }
        flush(&canvas, out)
    }

    fn draw_overlay(&self, scene: &Scene, canvas: &mut Canvas) {
        let rotation = scene.spinner().displayed(scene.now());
        let (timers, frames) = scene.pending();
        let lines = [
            format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            format!("Rotation X: {:.2}, Y: {:.2}", rotation.x, rotation.y),
            format!(
                "Drag: {:?}, Transition: {:?}",
                scene.drag().phase(),
                scene.spinner().transition()
            ),
            format!(
                "Stars: {}, Comets: {}, Particles: {}",
                scene.stars().len(),
                scene.comet_count(),
                scene.particle_count()
            ),
            format!("Timers: {timers}, Frame callbacks: {frames}"),
            format!("FPS: {:.2}", self.fps.fps()),
        ];
        for (row, line) in lines.iter().enumerate() {
            canvas.text(1, row as isize, line, Color::White);
        }
    }
}

fn to_cell(p: Point) -> (f64, f64) {
    (p.x / CELL_WIDTH, p.y / CELL_HEIGHT)
}

/// Draws the scene back to front: stars, comets, ring, dots, particles
pub fn draw_scene(scene: &Scene, canvas: &mut Canvas) {
    let now = scene.now();
    let (width, height) = scene.size();
    let (cols, rows) = (canvas.width() as f64, canvas.height() as f64);

    for star in scene.stars() {
        let x = (star.left / 100.0 * cols).min(cols - 1.0);
        let y = (star.top / 100.0 * rows).min(rows - 1.0);
        let ch = match star.size {
            s if s < 5.0 / 3.0 => '·',
            s if s < 7.0 / 3.0 => '+',
            _ => '✦',
        };
        let level = (80.0 + 175.0 * star.brightness(now)) as u8;
        let color = Color::Rgb {
            r: level,
            g: level,
            b: level,
        };
        canvas.put(x as isize, y as isize, ch, color);
    }

    for comet in scene.comets() {
        let (x, y) = to_cell(comet.head(now, width, height));
        // tail points back along the flight path
        let (dx, dy) = (width / 3.0 / CELL_WIDTH, height / CELL_HEIGHT);
        let length = (dx * dx + dy * dy).sqrt().max(f64::EPSILON);
        let tail_x = x - dx / length * COMET_TAIL_CELLS;
        let tail_y = y - dy / length * COMET_TAIL_CELLS;
        canvas.draw_line(tail_x, tail_y, x, y, '·', COMET_TAIL_COLOR);
        canvas.put(x as isize, y as isize, '•', Color::White);
    }

    let vertices = scene.dot_vertices();
    if vertices.len() > 1 {
        for (i, a) in vertices.iter().enumerate() {
            let b = &vertices[(i + 1) % vertices.len()];
            let (x0, y0) = to_cell(a.screen_position);
            let (x1, y1) = to_cell(b.screen_position);
            canvas.draw_line(x0, y0, x1, y1, '·', RING_COLOR);
        }
    }

    let radius = scene.ring_radius().max(f64::EPSILON);
    let mut order: Vec<usize> = (0..vertices.len()).collect();
    order.sort_by(|&a, &b| vertices[a].depth().total_cmp(&vertices[b].depth()));
    for i in order {
        let dot = &scene.dots()[i];
        let (x, y) = to_cell(vertices[i].screen_position);
        let intensity = (0.65 + 0.35 * vertices[i].depth() / radius).clamp(0.3, 1.0);
        let frame = (dot.phase * SPHERE_FRAMES.len() as f64) as usize % SPHERE_FRAMES.len();
        canvas.put(
            x as isize,
            y as isize,
            SPHERE_FRAMES[frame],
            apply_lighting(dot.surface, intensity),
        );
    }

    for particle in scene.particles() {
        let (x, y) = to_cell(particle.position);
        let ch = match particle.scale() {
            s if s < 4.0 / 3.0 => '∙',
            s if s < 5.0 / 3.0 => '•',
            _ => '●',
        };
        canvas.put(
            x as isize,
            y as isize,
            ch,
            apply_lighting(particle.color, particle.opacity()),
        );
    }
}

/// Writes the canvas to the terminal in one synchronized update
pub fn flush<W: Write>(canvas: &Canvas, out: &mut W) -> io::Result<()> {
    queue!(out, BeginSynchronizedUpdate)?;
    for (y, row) in canvas.rows().enumerate() {
        queue!(out, MoveTo(0, y as u16))?;
        let mut run = String::new();
        let mut run_color = None;
        for cell in row {
            if run_color != Some(cell.fg) {
                if let Some(color) = run_color {
                    queue!(out, SetForegroundColor(color), Print(&run))?;
                    run.clear();
                }
                run_color = Some(cell.fg);
            }
            run.push(cell.ch);
        }
        if let Some(color) = run_color {
            queue!(out, SetForegroundColor(color), Print(&run))?;
        }
    }
    queue!(out, ResetColor, EndSynchronizedUpdate)?;
    out.flush()
}
