//! Untyped AST for the per-pixel kernel description.
//!
//! A [`KernelProgram`] is the restricted procedural form user code hands to
//! [`compile`](crate::compile): straight-line setup statements, at most one
//! bounded loop with an optional break condition, and an output rule mapping
//! the loop outcome to a color. Everything else (name resolution, shape
//! checking, constant folding of the loop bound) happens at compile time.

// ── Expressions ───────────────────────────────────────────────────────────

/// Binary arithmetic operators. This set is closed; anything else must go
/// through [`Expr::Call`] and the builtin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// Comparison operators usable in a loop's break condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
}

/// Vector component selector for [`Expr::Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Scalar literal.
    Scalar(f32),
    /// 2-component vector constructor: `vec(x, y)`.
    Vec2(Box<Expr>, Box<Expr>),
    /// The normalized pixel coordinate input (a vector).
    Coord,
    /// Reference to a captured constant or a declared variable.
    Var(String),
    /// Component access: `v.x` / `v.y`.
    Field(Box<Expr>, Component),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    /// Builtin call by name. Unknown names are rejected at compile time
    /// with `UnsupportedOperation`.
    Call(String, Vec<Expr>),
}

// ── Statements and control flow ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Declare a new variable.
    Let(String, Expr),
    /// Reassign an existing variable. The new value must have the same
    /// shape (scalar/vector) as the declaration.
    Assign(String, Expr),
}

/// A comparison between two scalar expressions.
#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub op: CmpOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

/// The bounded iteration stage of a kernel.
///
/// `count` must constant-fold at compile time; `break_when` is evaluated
/// after the body on every iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    pub count: Expr,
    pub body: Vec<Stmt>,
    pub break_when: Option<Cond>,
}

// ── Output mapping ────────────────────────────────────────────────────────

/// Straight RGBA bytes, the kernel's only output type.
pub type Rgba = [u8; 4];

/// Maps the loop outcome to the pixel's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMap {
    /// Two-way select on whether the break condition fired: the classic
    /// escape/divergence pattern (white outside, black inside).
    Select { escaped: Rgba, interior: Rgba },
    /// Color ramp by `iterations_used / count`: smooth shading for
    /// escape-time kernels. With no loop the ramp evaluates to `from`.
    Ramp { from: Rgba, to: Rgba },
}

// ── Program ───────────────────────────────────────────────────────────────

/// A constant captured at kernel registration time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstValue {
    Scalar(f32),
    Vec2(f32, f32),
}

/// The complete per-pixel procedural description.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelProgram {
    /// Named constants available to every pixel, captured once.
    pub constants: Vec<(String, ConstValue)>,
    /// Statements run once per pixel before the loop. May read `coord`.
    pub setup: Vec<Stmt>,
    /// The bounded iteration stage, if any.
    pub iterate: Option<Loop>,
    /// Maps the outcome to the pixel color.
    pub output: OutputMap,
}

// ── Expression builders ───────────────────────────────────────────────────
//
// Thin constructors so programs read close to the informal syntax
// (`vec(z.x*z.x - z.y*z.y, ...)`) instead of nested enum literals.

pub fn scalar(v: f32) -> Expr {
    Expr::Scalar(v)
}

pub fn vec2(x: Expr, y: Expr) -> Expr {
    Expr::Vec2(Box::new(x), Box::new(y))
}

pub fn coord() -> Expr {
    Expr::Coord
}

pub fn var(name: &str) -> Expr {
    Expr::Var(name.to_string())
}

pub fn x(e: Expr) -> Expr {
    Expr::Field(Box::new(e), Component::X)
}

pub fn y(e: Expr) -> Expr {
    Expr::Field(Box::new(e), Component::Y)
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(BinOp::Add, Box::new(lhs), Box::new(rhs))
}

pub fn sub(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(BinOp::Sub, Box::new(lhs), Box::new(rhs))
}

pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(BinOp::Mul, Box::new(lhs), Box::new(rhs))
}

pub fn div(lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary(BinOp::Div, Box::new(lhs), Box::new(rhs))
}

pub fn call(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Call(name.to_string(), args)
}

pub fn gt(lhs: Expr, rhs: Expr) -> Cond {
    Cond {
        op: CmpOp::Gt,
        lhs,
        rhs,
    }
}

pub fn lt(lhs: Expr, rhs: Expr) -> Cond {
    Cond {
        op: CmpOp::Lt,
        lhs,
        rhs,
    }
}
