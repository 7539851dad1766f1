//! End-to-end demo scripts: `reverie-demos [flocking|lorenz|mandelbrot|shapes]`.
//!
//! Each demo records a video next to the working directory, exercising the
//! full pipeline: scene mutation per step (flocking), incremental scene
//! growth (lorenz), per-pixel kernel evaluation (mandelbrot), and eased
//! tween motion over mixed primitives (shapes).

use anyhow::{Result, bail};
use reverie_engine::logging::{LoggingConfig, init_logging};
use reverie_engine::scene::shapes::{Circle, PathShape};
use reverie_engine::{Color, Ease, Shape, Stage, Vec2, Vec3};
use reverie_kernel::CoordSpace;
use reverie_kernel::ast::{
    KernelProgram, Loop, OutputMap, Stmt, add, call, coord, gt, mul, scalar, sub, var, vec2, x, y,
};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let demo = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "flocking".to_string());
    log::info!("running demo {demo:?}");
    match demo.as_str() {
        "flocking" => flocking(),
        "lorenz" => lorenz(),
        "mandelbrot" => mandelbrot(),
        "shapes" => shapes(),
        other => bail!("unknown demo {other:?} (expected flocking, lorenz, mandelbrot, or shapes)"),
    }
}

// ── flocking ──────────────────────────────────────────────────────────────

const BOIDS: usize = 100;
const NEIGHBOR_RADIUS: f32 = 100.0;
const SEPARATION: f32 = 1.5;
const ALIGNMENT: f32 = 1.0;
const COHESION: f32 = 1.0;
const STEER_RATE: f32 = 0.005;
const MAX_SPEED: f32 = 6.0;

/// Separation/alignment/cohesion steering for boid `i`, computed against a
/// settled snapshot of `(position, velocity)` pairs.
fn flock_steer(i: usize, boids: &[(Vec2, Vec2)]) -> Vec2 {
    let (pos, _) = boids[i];
    let mut avg_pos = Vec2::zero();
    let mut avg_vel = Vec2::zero();
    let mut push = Vec2::zero();
    for (j, &(p, v)) in boids.iter().enumerate() {
        if j == i {
            continue;
        }
        avg_pos += p;
        avg_vel += v;
        if pos.distance(p) < NEIGHBOR_RADIUS {
            push -= p - pos;
        }
    }
    let others = (boids.len() - 1) as f32;
    let cohesion = (avg_pos / others - pos) * COHESION;
    let alignment = (avg_vel / others) * ALIGNMENT;
    cohesion + alignment + push * SEPARATION
}

fn flocking() -> Result<()> {
    let mut stage = Stage::new();
    let mut rng = Lcg::new(7);

    let mut ids = Vec::with_capacity(BOIDS);
    for _ in 0..BOIDS {
        let position = Vec2::new(rng.range(-400.0, 400.0), rng.range(-300.0, 300.0));
        let id = stage.scene_mut().add_circle(4.0, position, Color::WHITE)?;
        stage.scene_mut()[id].velocity = Vec2::new(rng.range(-2.0, 2.0), rng.range(-2.0, 2.0));
        ids.push(id);
    }

    stage.record("flocking.mp4")?;
    stage.animate(5.0, |stage, _| {
        let scene = stage.scene_mut();
        let snapshot: Vec<(Vec2, Vec2)> = ids
            .iter()
            .map(|&id| (scene[id].position, scene[id].velocity))
            .collect();
        for (i, &id) in ids.iter().enumerate() {
            let steer = flock_steer(i, &snapshot);
            let node = &mut scene[id];
            let mut velocity = node.velocity + steer * STEER_RATE;
            let speed = velocity.length();
            if speed > MAX_SPEED {
                velocity = velocity * (MAX_SPEED / speed);
            }
            node.velocity = velocity;
            node.position += velocity;
        }
    })?;
    stage.stop()?;
    Ok(())
}

// ── lorenz attractor ──────────────────────────────────────────────────────

const LORENZ_A: f32 = 10.0;
const LORENZ_B: f32 = 28.0;
const LORENZ_C: f32 = 8.0 / 3.0;

fn lorenz_delta(s: Vec3) -> Vec3 {
    Vec3::new(
        LORENZ_A * (s.y - s.x),
        s.x * (LORENZ_B - s.z) - s.y,
        s.x * s.y - LORENZ_C * s.z,
    )
}

fn lorenz() -> Result<()> {
    let mut stage = Stage::new();
    stage.record("lorenz.mp4")?;

    let mut state = Vec3::new(0.01, 0.0, 0.0);
    let dt = 0.01;
    stage.animate(30.0, |stage, _| {
        state += lorenz_delta(state) * dt;

        // Leave a dot behind every step; the trail accumulates into the
        // familiar butterfly.
        let scene = stage.scene_mut();
        let id = scene.add(Shape::Circle(Circle::default()));
        scene[id].position = Vec2::new(30.0 * state.x, 30.0 * state.y);
        scene[id].color = Color::BLUE;
    })?;
    stage.stop()?;
    Ok(())
}

// ── mandelbrot kernel ─────────────────────────────────────────────────────

fn mandelbrot_program() -> KernelProgram {
    let z_next = add(
        vec2(
            sub(mul(x(var("z")), x(var("z"))), mul(y(var("z")), y(var("z")))),
            mul(scalar(2.0), mul(x(var("z")), y(var("z")))),
        ),
        var("c"),
    );
    KernelProgram {
        constants: vec![],
        setup: vec![
            Stmt::Let("z".to_string(), vec2(scalar(0.0), scalar(0.0))),
            Stmt::Let("c".to_string(), coord()),
        ],
        iterate: Some(Loop {
            count: scalar(100.0),
            body: vec![Stmt::Assign("z".to_string(), z_next)],
            break_when: Some(gt(call("length", vec![var("z")]), scalar(2.0))),
        }),
        output: OutputMap::Select {
            escaped: [255, 255, 255, 255],
            interior: [0, 0, 0, 255],
        },
    }
}

fn mandelbrot() -> Result<()> {
    let mut stage = Stage::new();
    stage.record("mandelbrot.mp4")?;

    let fractal = stage
        .register_kernel(&mandelbrot_program())?
        .with_space(CoordSpace::new((-2.5, -1.0), (1.0, 1.0)));
    fractal.run(&mut stage, 10.0)?;
    stage.stop()?;
    Ok(())
}

// ── mixed shapes with eased motion ────────────────────────────────────────

fn shapes() -> Result<()> {
    let mut stage = Stage::new();

    let scene = stage.scene_mut();
    let square = scene.add_square(120.0, Vec2::new(-600.0, 0.0), Color::WHITE)?;
    scene.add_triangle(160.0, Vec2::new(300.0, 200.0), Color::BLUE)?;
    let arrow = PathShape::from_svg("M 0 0 L 60 0 L 60 -20 L 100 20 L 60 60 L 60 40 L 0 40 Z");
    scene.add_path(arrow, Vec2::new(300.0, -200.0), Color::WHITE)?;

    stage.record("shapes.mp4")?;
    let from = Vec2::new(-600.0, 0.0);
    let to = Vec2::new(500.0, 0.0);
    stage.animate(2.0, |stage, step| {
        let progress = step.t / 2.0;
        stage.scene_mut()[square].position = from.lerp(to, Ease::EaseInOut.apply(progress));
    })?;
    stage.wait(1.0)?;
    stage.snapshot("shapes.png")?;
    stage.stop()?;
    Ok(())
}

// ── deterministic placement ───────────────────────────────────────────────

/// Small LCG so demo runs are reproducible without a rand dependency.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407))
    }

    fn next_f32(&mut self) -> f32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((self.0 >> 40) as f32) / (1u64 << 24) as f32
    }

    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flock_steer_matches_hand_computation() {
        // Three boids on a line, all within neighbor radius of each other.
        let boids = [
            (Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)),
            (Vec2::new(10.0, 0.0), Vec2::new(0.0, 1.0)),
            (Vec2::new(-10.0, 0.0), Vec2::new(0.0, -1.0)),
        ];
        // For boid 0: avg_pos = (0, 0) → cohesion (0, 0); avg_vel = (0, 0)
        // → alignment (0, 0); separation pushes cancel symmetrically.
        assert_eq!(flock_steer(0, &boids), Vec2::zero());

        // For boid 1: cohesion = avg_pos (-5, 0) - (10, 0) = (-15, 0);
        // alignment = avg_vel (0.5, -0.5); separation pushes sum to
        // (30, 0) and scale by 1.5 → (45, 0). Total (30.5, -0.5).
        assert_eq!(flock_steer(1, &boids), Vec2::new(30.5, -0.5));
    }

    #[test]
    fn lorenz_delta_matches_the_system() {
        // Exactly representable inputs keep the arithmetic checkable
        // without tolerances.
        let d = lorenz_delta(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(d.x, -5.0);
        assert_eq!(d.y, 14.0);
        assert_eq!(d.z, 0.0);
    }

    #[test]
    fn mandelbrot_program_compiles() {
        let kernel = reverie_kernel::compile(&mandelbrot_program()).unwrap();
        assert_eq!(kernel.iteration_bound(), 100);
    }

    #[test]
    fn lcg_is_deterministic_and_in_range() {
        let mut a = Lcg::new(7);
        let mut b = Lcg::new(7);
        for _ in 0..100 {
            let v = a.range(-1.0, 1.0);
            assert_eq!(v, b.range(-1.0, 1.0));
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
