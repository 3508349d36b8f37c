//! The scene: background, spinner container and dots, plus every handler
//! that mutates them. Each handler runs to completion on the caller's
//! thread; timers and frame callbacks come back through [`Scene::advance_to`]
//! and [`Scene::frame`].

use crate::audio::Chime;
use crate::comet::Comet;
use crate::constants::{
    BOUNCE_DEGREES, BOUNCE_HOLD, CELL_HEIGHT, CELL_WIDTH, COMET_INTERVAL, COMET_LIFETIME,
    DOT_HIT_CELLS, HOVER_CUE_VOLUME, RING_RADIUS_RATIO, SETTLE_DURATION,
};
use crate::interaction::{Dot, DragGesture};
use crate::math::Point;
use crate::particles::{burst, Particle, Step};
use crate::scheduler::Scheduler;
use crate::spinner::{ring, Rotation, Spinner};
use crate::starfield::{create_stars, Star};
use crate::vertex::Vertex;
use crossterm::style::Color;
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, trace};

pub type NodeId = u64;

/// Deferred work owned by the scene
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Task {
    SpawnComet,
    RemoveComet(NodeId),
    AnimateParticle(NodeId),
    BounceOvershoot,
    BounceRest,
}

const DOT_COLORS: [Color; 6] = [
    Color::Rgb { r: 255, g: 94, b: 160 },
    Color::Rgb { r: 110, g: 200, b: 255 },
    Color::Rgb { r: 255, g: 200, b: 87 },
    Color::Rgb { r: 150, g: 120, b: 255 },
    Color::Rgb { r: 90, g: 230, b: 170 },
    Color::Rgb { r: 255, g: 130, b: 90 },
];

pub struct Scene {
    scheduler: Scheduler<Task>,
    rng: StdRng,
    chime: Box<dyn Chime>,
    width: f64,
    height: f64,
    next_id: NodeId,
    last_frame: Duration,
    stars: Vec<Star>,
    comets: BTreeMap<NodeId, Comet>,
    particles: BTreeMap<NodeId, Particle>,
    spinner: Spinner,
    dots: Vec<Dot>,
    drag: DragGesture,
    hovered: Option<usize>,
    pressed: Option<usize>,
}

impl Scene {
    /// Builds the page on a `cols` x `rows` cell stage and runs the one-time
    /// setup: stars, the comet timer and the dots.
    pub fn new(
        cols: u16,
        rows: u16,
        dot_count: usize,
        rng: StdRng,
        chime: Box<dyn Chime>,
    ) -> Self {
        let mut scene = Scene {
            scheduler: Scheduler::new(),
            rng,
            chime,
            width: cols as f64 * CELL_WIDTH,
            height: rows as f64 * CELL_HEIGHT,
            next_id: 0,
            last_frame: Duration::ZERO,
            stars: Vec::new(),
            comets: BTreeMap::new(),
            particles: BTreeMap::new(),
            spinner: Spinner::new(),
            dots: Vec::new(),
            drag: DragGesture::default(),
            hovered: None,
            pressed: None,
        };
        scene.create_stars();
        scene.init_comets();
        scene.init_dots(dot_count);
        scene
    }

    pub fn create_stars(&mut self) {
        let stars = create_stars(&mut self.rng);
        self.stars.extend(stars);
        info!(stars = self.stars.len(), "star field populated");
    }

    pub fn create_comet(&mut self) {
        let id = self.alloc_id();
        let now = self.now();
        let comet = Comet::new(&mut self.rng, now);
        debug!(id, left = comet.left, "comet spawned");
        self.comets.insert(id, comet);
        self.scheduler.set_timeout(COMET_LIFETIME, Task::RemoveComet(id));
    }

    pub fn init_comets(&mut self) {
        self.scheduler.set_interval(COMET_INTERVAL, Task::SpawnComet);
    }

    fn init_dots(&mut self, count: usize) {
        self.dots = (0..count)
            .map(|i| Dot::new(DOT_COLORS[i % DOT_COLORS.len()]))
            .collect();
        debug!(dots = count, "dot handlers bound");
    }

    /// Spawns a burst at `origin` and runs each particle's first step now
    pub fn create_particles(&mut self, origin: Point, color: Color) {
        let particles = burst(&mut self.rng, origin, color);
        trace!(x = origin.x, y = origin.y, count = particles.len(), "particle burst");
        for particle in particles {
            let id = self.alloc_id();
            self.particles.insert(id, particle);
            self.animate_particle(id);
        }
    }

    fn animate_particle(&mut self, id: NodeId) {
        let Some(particle) = self.particles.get_mut(&id) else {
            return;
        };
        match particle.advance() {
            Step::Advanced => self.scheduler.request_frame(Task::AnimateParticle(id)),
            Step::Faded => {
                let steps = particle.steps();
                self.particles.remove(&id);
                trace!(id, steps, "particle removed");
            }
        }
    }

    /// Fires every timer due at or before `now`
    pub fn advance_to(&mut self, now: Duration) {
        while let Some(task) = self.scheduler.pop_due(now) {
            self.run(task);
        }
        self.scheduler.set_now(now);
    }

    /// One display refresh: timers, sphere spin, then frame callbacks
    pub fn frame(&mut self, now: Duration) {
        self.advance_to(now);
        let dt = now.saturating_sub(self.last_frame);
        self.last_frame = now;
        for dot in &mut self.dots {
            dot.spin(dt);
        }
        for task in self.scheduler.take_frame() {
            self.run(task);
        }
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::SpawnComet => self.create_comet(),
            Task::RemoveComet(id) => {
                if self.comets.remove(&id).is_some() {
                    debug!(id, "comet removed");
                }
            }
            Task::AnimateParticle(id) => self.animate_particle(id),
            Task::BounceOvershoot => {
                let now = self.now();
                self.spinner
                    .set_transform(Rotation::new(BOUNCE_DEGREES, BOUNCE_DEGREES), now);
                self.scheduler.set_timeout(BOUNCE_HOLD, Task::BounceRest);
            }
            Task::BounceRest => {
                let now = self.now();
                self.spinner.set_transform(Rotation::NEUTRAL, now);
                self.drag.settle();
                debug!(phase = ?self.drag.phase(), "bounce finished");
            }
        }
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.pressed = self.dot_at(at);
        if self.over_container(at) {
            self.drag.begin(at);
            self.spinner.set_transition(None);
            debug!(x = at.x, y = at.y, "drag started");
        }
    }

    pub fn pointer_move(&mut self, at: Point) {
        if let Some(rotation) = self.drag.track(at) {
            let now = self.now();
            self.spinner.set_transform(rotation, now);
        }

        let over = self.dot_at(at);
        if over != self.hovered {
            if let Some(left) = self.hovered {
                self.pointer_leave(left);
            }
            if let Some(entered) = over {
                self.pointer_enter(entered);
            }
            self.hovered = over;
        }
    }

    pub fn pointer_up(&mut self, at: Point) {
        if self.drag.release() {
            let now = self.now();
            self.spinner.set_transition(Some(SETTLE_DURATION));
            self.spinner.set_transform(Rotation::NEUTRAL, now);
            self.scheduler.set_timeout(SETTLE_DURATION, Task::BounceOvershoot);
            debug!("drag released");
        }

        if let Some(pressed) = self.pressed.take() {
            if self.dot_at(at) == Some(pressed) {
                self.click_dot(pressed, at);
            }
        }
    }

    /// Reverses the dot's spin and bursts particles in its surface color
    pub fn click_dot(&mut self, index: usize, at: Point) {
        let Some(dot) = self.dots.get_mut(index) else {
            return;
        };
        dot.toggle_direction();
        let color = dot.surface;
        debug!(index, direction = ?dot.direction, "dot clicked");
        self.create_particles(at, color);
    }

    pub fn pointer_enter(&mut self, index: usize) {
        let Some(dot) = self.dots.get_mut(index) else {
            return;
        };
        dot.slow_down();
        if let Err(err) = self.chime.play(HOVER_CUE_VOLUME) {
            trace!(%err, "hover cue not played");
        }
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if let Some(dot) = self.dots.get_mut(index) {
            dot.restore_speed();
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols as f64 * CELL_WIDTH;
        self.height = rows as f64 * CELL_HEIGHT;
        debug!(cols, rows, "stage resized");
    }

    /// Topmost dot under `at`, if any
    pub fn dot_at(&self, at: Point) -> Option<usize> {
        self.dot_vertices()
            .iter()
            .enumerate()
            .filter(|(_, v)| {
                let dx = (v.screen_position.x - at.x) / CELL_WIDTH;
                let dy = (v.screen_position.y - at.y) / CELL_HEIGHT;
                dx * dx + dy * dy <= DOT_HIT_CELLS * DOT_HIT_CELLS
            })
            .max_by(|(_, a), (_, b)| a.depth().total_cmp(&b.depth()))
            .map(|(i, _)| i)
    }

    /// Whether `at` falls inside the spinner container's box
    pub fn over_container(&self, at: Point) -> bool {
        let half = self.ring_radius() + CELL_HEIGHT;
        let center = self.center();
        (at.x - center.x).abs() <= half && (at.y - center.y).abs() <= half
    }

    /// Dots projected with the rotation currently on screen
    pub fn dot_vertices(&self) -> Vec<Vertex> {
        ring(
            self.dots.len(),
            self.center(),
            self.ring_radius(),
            self.spinner.displayed(self.now()),
        )
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn ring_radius(&self) -> f64 {
        self.width.min(self.height) * RING_RADIUS_RATIO
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn comets(&self) -> impl Iterator<Item = &Comet> {
        self.comets.values()
    }

    pub fn comet_count(&self) -> usize {
        self.comets.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    /// Timers and frame callbacks waiting to run
    pub fn pending(&self) -> (usize, usize) {
        (
            self.scheduler.pending_timers(),
            self.scheduler.pending_frames(),
        )
    }

    pub fn drag(&self) -> &DragGesture {
        &self.drag
    }

    fn alloc_id(&mut self) -> NodeId {
        self.next_id += 1;
        self.next_id
    }
}
