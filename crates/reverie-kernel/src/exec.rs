//! Data-parallel kernel execution.
//!
//! Every pixel is evaluated independently: a fresh register file, no state
//! carried between pixels, output a pure function of the coordinate. That
//! independence is what allows (and requires, for correctness) the row-level
//! `rayon` fan-out in [`Kernel::run_with`]; the only synchronization point
//! is the implicit barrier when the parallel iterator completes and the
//! buffer is returned.

use rayon::prelude::*;

use crate::ast::{BinOp, CmpOp, Component, OutputMap, Rgba};
use crate::compile::{Builtin, Kernel, RExpr, RStmt};

// ── Runtime values ────────────────────────────────────────────────────────

/// A register value. Shapes were checked at compile time, so evaluation
/// never has to recover from a mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Value {
    Scalar(f32),
    Vec2(f32, f32),
}

// ── Coordinate space ──────────────────────────────────────────────────────

/// Maps pixel indices to the user coordinate space handed to the kernel.
///
/// Sampling is at pixel centers: pixel `(0, 0)` of a `w × h` frame maps to
/// `min + 0.5 / (w, h) * (max - min)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordSpace {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl CoordSpace {
    /// The normalized default: `coord` ranges over `[0, 1] × [0, 1]`.
    pub const UNIT: CoordSpace = CoordSpace {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 1.0,
        max_y: 1.0,
    };

    pub const fn new(min: (f32, f32), max: (f32, f32)) -> Self {
        Self {
            min_x: min.0,
            min_y: min.1,
            max_x: max.0,
            max_y: max.1,
        }
    }

    #[inline]
    fn coord_at(&self, px: usize, py: usize, width: u32, height: u32) -> (f32, f32) {
        let fx = (px as f32 + 0.5) / width as f32;
        let fy = (py as f32 + 0.5) / height as f32;
        (
            self.min_x + fx * (self.max_x - self.min_x),
            self.min_y + fy * (self.max_y - self.min_y),
        )
    }
}

impl Default for CoordSpace {
    fn default() -> Self {
        Self::UNIT
    }
}

// ── Execution ─────────────────────────────────────────────────────────────

impl Kernel {
    /// Evaluates the kernel for every pixel of a `width × height` grid in
    /// the normalized [`CoordSpace::UNIT`] space.
    pub fn run(&self, width: u32, height: u32) -> Vec<Rgba> {
        self.run_with(CoordSpace::UNIT, width, height)
    }

    /// Evaluates the kernel over a custom coordinate space.
    ///
    /// Rows are distributed across the rayon pool; pixels within a row are
    /// evaluated left to right, but since each evaluation is a pure function
    /// of its coordinate the schedule cannot affect the result.
    pub fn run_with(&self, space: CoordSpace, width: u32, height: u32) -> Vec<Rgba> {
        let w = width as usize;
        let h = height as usize;
        if w == 0 || h == 0 {
            return Vec::new();
        }

        let mut pixels = vec![[0u8; 4]; w * h];
        pixels.par_chunks_mut(w).enumerate().for_each(|(py, row)| {
            // Scratch register file, reused across the row but reset to the
            // captured constants for every pixel.
            let mut regs: Vec<Value> = Vec::with_capacity(self.slots);
            for (px, out) in row.iter_mut().enumerate() {
                *out = self.eval_with_regs(&mut regs, px, py, width, height, space);
            }
        });
        pixels
    }

    /// Evaluates a single pixel. Exposed so callers (and tests) can verify
    /// that any evaluation order produces the same frame.
    pub fn eval_pixel(
        &self,
        px: usize,
        py: usize,
        width: u32,
        height: u32,
        space: CoordSpace,
    ) -> Rgba {
        let mut regs = Vec::with_capacity(self.slots);
        self.eval_with_regs(&mut regs, px, py, width, height, space)
    }

    fn eval_with_regs(
        &self,
        regs: &mut Vec<Value>,
        px: usize,
        py: usize,
        width: u32,
        height: u32,
        space: CoordSpace,
    ) -> Rgba {
        let coord = space.coord_at(px, py, width, height);

        regs.clear();
        regs.extend_from_slice(&self.consts);
        regs.resize(self.slots, Value::Scalar(0.0));

        for stmt in &self.setup {
            store(stmt, regs, coord);
        }

        let mut escaped = false;
        let mut used = 0u32;
        if let Some(repeat) = &self.iterate {
            for i in 0..repeat.count {
                for stmt in &repeat.body {
                    store(stmt, regs, coord);
                }
                used = i + 1;
                if let Some(cond) = &repeat.break_when {
                    let lhs = eval_scalar(&cond.lhs, regs, coord);
                    let rhs = eval_scalar(&cond.rhs, regs, coord);
                    let fired = match cond.op {
                        CmpOp::Lt => lhs < rhs,
                        CmpOp::Le => lhs <= rhs,
                        CmpOp::Gt => lhs > rhs,
                        CmpOp::Ge => lhs >= rhs,
                    };
                    if fired {
                        escaped = true;
                        break;
                    }
                }
            }
        }

        match self.output {
            OutputMap::Select { escaped: e, interior } => {
                if escaped {
                    e
                } else {
                    interior
                }
            }
            OutputMap::Ramp { from, to } => {
                let bound = self.iteration_bound();
                let f = if bound == 0 {
                    0.0
                } else {
                    used as f32 / bound as f32
                };
                lerp_rgba(from, to, f)
            }
        }
    }
}

#[inline]
fn store(stmt: &RStmt, regs: &mut [Value], coord: (f32, f32)) {
    let value = eval(&stmt.expr, regs, coord);
    regs[stmt.slot] = value;
}

fn eval(expr: &RExpr, regs: &[Value], coord: (f32, f32)) -> Value {
    match expr {
        RExpr::Scalar(v) => Value::Scalar(*v),
        RExpr::Coord => Value::Vec2(coord.0, coord.1),
        RExpr::Slot(slot) => regs[*slot],
        RExpr::Vec2(ex, ey) => {
            Value::Vec2(eval_scalar(ex, regs, coord), eval_scalar(ey, regs, coord))
        }
        RExpr::Field(inner, component) => match (eval(inner, regs, coord), component) {
            (Value::Vec2(vx, _), Component::X) => Value::Scalar(vx),
            (Value::Vec2(_, vy), Component::Y) => Value::Scalar(vy),
            (Value::Scalar(_), _) => unreachable!("shape-checked at compile time"),
        },
        RExpr::Binary(op, lhs, rhs) => {
            binary(*op, eval(lhs, regs, coord), eval(rhs, regs, coord))
        }
        RExpr::Call(builtin, args) => builtin_call(*builtin, args, regs, coord),
    }
}

#[inline]
fn eval_scalar(expr: &RExpr, regs: &[Value], coord: (f32, f32)) -> f32 {
    match eval(expr, regs, coord) {
        Value::Scalar(v) => v,
        Value::Vec2(..) => unreachable!("shape-checked at compile time"),
    }
}

/// Division follows IEEE semantics: the DSL has no runtime failure path,
/// so `x / 0` yields an infinity or NaN that flows into the break
/// comparison like any other value.
fn binary(op: BinOp, lhs: Value, rhs: Value) -> Value {
    use Value::{Scalar, Vec2};
    match (op, lhs, rhs) {
        (BinOp::Add, Scalar(a), Scalar(b)) => Scalar(a + b),
        (BinOp::Add, Vec2(ax, ay), Vec2(bx, by)) => Vec2(ax + bx, ay + by),
        (BinOp::Sub, Scalar(a), Scalar(b)) => Scalar(a - b),
        (BinOp::Sub, Vec2(ax, ay), Vec2(bx, by)) => Vec2(ax - bx, ay - by),
        (BinOp::Mul, Scalar(a), Scalar(b)) => Scalar(a * b),
        (BinOp::Mul, Vec2(ax, ay), Scalar(b)) => Vec2(ax * b, ay * b),
        (BinOp::Mul, Scalar(a), Vec2(bx, by)) => Vec2(a * bx, a * by),
        (BinOp::Mul, Vec2(ax, ay), Vec2(bx, by)) => Vec2(ax * bx, ay * by),
        (BinOp::Div, Scalar(a), Scalar(b)) => Scalar(a / b),
        (BinOp::Div, Vec2(ax, ay), Scalar(b)) => Vec2(ax / b, ay / b),
        (BinOp::Div, Vec2(ax, ay), Vec2(bx, by)) => Vec2(ax / bx, ay / by),
        _ => unreachable!("shape-checked at compile time"),
    }
}

fn builtin_call(builtin: Builtin, args: &[RExpr], regs: &[Value], coord: (f32, f32)) -> Value {
    let num = |i: usize| eval_scalar(&args[i], regs, coord);
    let vec = |i: usize| match eval(&args[i], regs, coord) {
        Value::Vec2(vx, vy) => (vx, vy),
        Value::Scalar(_) => unreachable!("shape-checked at compile time"),
    };

    match builtin {
        Builtin::Length => {
            let (vx, vy) = vec(0);
            Value::Scalar((vx * vx + vy * vy).sqrt())
        }
        Builtin::Dist => {
            let (ax, ay) = vec(0);
            let (bx, by) = vec(1);
            let (dx, dy) = (ax - bx, ay - by);
            Value::Scalar((dx * dx + dy * dy).sqrt())
        }
        Builtin::Dot => {
            let (ax, ay) = vec(0);
            let (bx, by) = vec(1);
            Value::Scalar(ax * bx + ay * by)
        }
        Builtin::Abs => Value::Scalar(num(0).abs()),
        Builtin::Min => Value::Scalar(num(0).min(num(1))),
        Builtin::Max => Value::Scalar(num(0).max(num(1))),
        Builtin::Sqrt => Value::Scalar(num(0).sqrt()),
        Builtin::Floor => Value::Scalar(num(0).floor()),
        Builtin::Fract => Value::Scalar(num(0).fract()),
    }
}

fn lerp_rgba(from: Rgba, to: Rgba, f: f32) -> Rgba {
    let f = f.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * f).round() as u8;
    [
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
        mix(from[3], to[3]),
    ]
}
