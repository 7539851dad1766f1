//! Compile-time validation and lowering.
//!
//! Compilation does three things, all before any pixel is touched:
//! - constant-folds the loop bound (rejecting anything per-pixel with
//!   [`CompileError::UnboundedLoop`])
//! - resolves names to register slots so the per-pixel interpreter never
//!   consults a map
//! - shape-checks every expression (scalar vs. vector) and every builtin
//!   call against the closed operation table

use crate::ast::{
    BinOp, CmpOp, Component, Cond, ConstValue, Expr, KernelProgram, OutputMap, Stmt,
};
use crate::error::CompileError;
use crate::exec::Value;

// ── Builtin table ─────────────────────────────────────────────────────────

/// The closed set of supported operations beyond binary arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Builtin {
    Length,
    Dist,
    Dot,
    Abs,
    Min,
    Max,
    Sqrt,
    Floor,
    Fract,
}

impl Builtin {
    fn lookup(name: &str) -> Option<(Builtin, usize)> {
        Some(match name {
            "length" => (Builtin::Length, 1),
            "dist" => (Builtin::Dist, 2),
            "dot" => (Builtin::Dot, 2),
            "abs" => (Builtin::Abs, 1),
            "min" => (Builtin::Min, 2),
            "max" => (Builtin::Max, 2),
            "sqrt" => (Builtin::Sqrt, 1),
            "floor" => (Builtin::Floor, 1),
            "fract" => (Builtin::Fract, 1),
            _ => return None,
        })
    }
}

// ── Resolved (lowered) program form ───────────────────────────────────────

/// Expression shape, checked at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Ty {
    Scalar,
    Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RExpr {
    Scalar(f32),
    Vec2(Box<RExpr>, Box<RExpr>),
    Coord,
    Slot(usize),
    Field(Box<RExpr>, Component),
    Binary(BinOp, Box<RExpr>, Box<RExpr>),
    Call(Builtin, Vec<RExpr>),
}

/// `Let` and `Assign` both lower to a store into a resolved slot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RStmt {
    pub(crate) slot: usize,
    pub(crate) expr: RExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RCond {
    pub(crate) op: CmpOp,
    pub(crate) lhs: RExpr,
    pub(crate) rhs: RExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RLoop {
    pub(crate) count: u32,
    pub(crate) body: Vec<RStmt>,
    pub(crate) break_when: Option<RCond>,
}

/// A compiled kernel: a pure function of the pixel coordinate.
///
/// Owns no engine state; the captured constants were copied in at compile
/// time. Evaluate with [`Kernel::run`](crate::exec) or per pixel with
/// [`Kernel::eval_pixel`](crate::exec).
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    pub(crate) consts: Vec<Value>,
    pub(crate) slots: usize,
    pub(crate) setup: Vec<RStmt>,
    pub(crate) iterate: Option<RLoop>,
    pub(crate) output: OutputMap,
}

impl Kernel {
    /// Maximum loop iterations, 0 when the kernel has no loop.
    pub fn iteration_bound(&self) -> u32 {
        self.iterate.as_ref().map(|l| l.count).unwrap_or(0)
    }
}

// ── Name scope ────────────────────────────────────────────────────────────

struct Binding {
    name: String,
    ty: Ty,
    mutable: bool,
}

struct Scope {
    bindings: Vec<Binding>,
}

impl Scope {
    /// Latest binding wins, so `Let` can shadow.
    fn resolve(&self, name: &str) -> Option<(usize, Ty)> {
        self.bindings
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| b.name == name)
            .map(|(slot, b)| (slot, b.ty))
    }

    fn declare(&mut self, name: &str, ty: Ty, mutable: bool) -> usize {
        self.bindings.push(Binding {
            name: name.to_string(),
            ty,
            mutable,
        });
        self.bindings.len() - 1
    }
}

// ── Compilation ───────────────────────────────────────────────────────────

/// Compiles a [`KernelProgram`] into an executable [`Kernel`].
pub fn compile(program: &KernelProgram) -> Result<Kernel, CompileError> {
    let mut scope = Scope {
        bindings: Vec::new(),
    };
    let mut consts = Vec::with_capacity(program.constants.len());
    for (name, value) in &program.constants {
        let (ty, value) = match *value {
            ConstValue::Scalar(v) => (Ty::Scalar, Value::Scalar(v)),
            ConstValue::Vec2(vx, vy) => (Ty::Vec2, Value::Vec2(vx, vy)),
        };
        scope.declare(name, ty, false);
        consts.push(value);
    }

    let mut setup = Vec::with_capacity(program.setup.len());
    for stmt in &program.setup {
        setup.push(check_stmt(stmt, &mut scope)?);
    }

    let iterate = match &program.iterate {
        None => None,
        Some(repeat) => {
            let count = fold_count(&repeat.count, &scope, &consts)?;
            let mut body = Vec::with_capacity(repeat.body.len());
            for stmt in &repeat.body {
                body.push(check_stmt(stmt, &mut scope)?);
            }
            let break_when = repeat
                .break_when
                .as_ref()
                .map(|cond| check_cond(cond, &scope))
                .transpose()?;
            Some(RLoop {
                count,
                body,
                break_when,
            })
        }
    };

    Ok(Kernel {
        consts,
        slots: scope.bindings.len(),
        setup,
        iterate,
        output: program.output,
    })
}

fn check_stmt(stmt: &Stmt, scope: &mut Scope) -> Result<RStmt, CompileError> {
    match stmt {
        Stmt::Let(name, expr) => {
            let (expr, ty) = check_expr(expr, scope)?;
            let slot = scope.declare(name, ty, true);
            Ok(RStmt { slot, expr })
        }
        Stmt::Assign(name, expr) => {
            let (expr, ty) = check_expr(expr, scope)?;
            let (slot, declared) = scope
                .resolve(name)
                .ok_or_else(|| CompileError::UndefinedVariable(name.clone()))?;
            if !scope.bindings[slot].mutable {
                return Err(CompileError::TypeMismatch(format!(
                    "cannot assign to captured constant {name:?}"
                )));
            }
            if declared != ty {
                return Err(CompileError::TypeMismatch(format!(
                    "assignment changes the shape of {name:?}"
                )));
            }
            Ok(RStmt { slot, expr })
        }
    }
}

fn check_cond(cond: &Cond, scope: &Scope) -> Result<RCond, CompileError> {
    let (lhs, lt) = check_expr(&cond.lhs, scope)?;
    let (rhs, rt) = check_expr(&cond.rhs, scope)?;
    if lt != Ty::Scalar || rt != Ty::Scalar {
        return Err(CompileError::TypeMismatch(
            "comparisons take scalar operands".to_string(),
        ));
    }
    Ok(RCond {
        op: cond.op,
        lhs,
        rhs,
    })
}

fn check_expr(expr: &Expr, scope: &Scope) -> Result<(RExpr, Ty), CompileError> {
    match expr {
        Expr::Scalar(v) => Ok((RExpr::Scalar(*v), Ty::Scalar)),
        Expr::Coord => Ok((RExpr::Coord, Ty::Vec2)),
        Expr::Vec2(ex, ey) => {
            let (rx, tx) = check_expr(ex, scope)?;
            let (ry, ty) = check_expr(ey, scope)?;
            if tx != Ty::Scalar || ty != Ty::Scalar {
                return Err(CompileError::TypeMismatch(
                    "vec components must be scalars".to_string(),
                ));
            }
            Ok((RExpr::Vec2(Box::new(rx), Box::new(ry)), Ty::Vec2))
        }
        Expr::Var(name) => {
            let (slot, ty) = scope
                .resolve(name)
                .ok_or_else(|| CompileError::UndefinedVariable(name.clone()))?;
            Ok((RExpr::Slot(slot), ty))
        }
        Expr::Field(inner, component) => {
            let (r, ty) = check_expr(inner, scope)?;
            if ty != Ty::Vec2 {
                return Err(CompileError::TypeMismatch(
                    "component access on a scalar".to_string(),
                ));
            }
            Ok((RExpr::Field(Box::new(r), *component), Ty::Scalar))
        }
        Expr::Binary(op, lhs, rhs) => {
            let (rl, tl) = check_expr(lhs, scope)?;
            let (rr, tr) = check_expr(rhs, scope)?;
            let ty = binary_ty(*op, tl, tr)?;
            Ok((RExpr::Binary(*op, Box::new(rl), Box::new(rr)), ty))
        }
        Expr::Call(name, args) => {
            let (builtin, arity) = Builtin::lookup(name)
                .ok_or_else(|| CompileError::UnsupportedOperation(name.clone()))?;
            if args.len() != arity {
                return Err(CompileError::WrongArity {
                    name: name.clone(),
                    expected: arity,
                    got: args.len(),
                });
            }
            let mut resolved = Vec::with_capacity(args.len());
            let mut tys = Vec::with_capacity(args.len());
            for arg in args {
                let (r, t) = check_expr(arg, scope)?;
                resolved.push(r);
                tys.push(t);
            }
            let ty = builtin_ty(builtin, &tys)?;
            Ok((RExpr::Call(builtin, resolved), ty))
        }
    }
}

fn binary_ty(op: BinOp, lhs: Ty, rhs: Ty) -> Result<Ty, CompileError> {
    use Ty::{Scalar, Vec2};
    let ty = match (op, lhs, rhs) {
        (BinOp::Add | BinOp::Sub, Scalar, Scalar) => Scalar,
        (BinOp::Add | BinOp::Sub, Vec2, Vec2) => Vec2,
        (BinOp::Mul, Scalar, Scalar) => Scalar,
        // Scale in either order, plus component-wise vector product.
        (BinOp::Mul, Vec2, Scalar) | (BinOp::Mul, Scalar, Vec2) | (BinOp::Mul, Vec2, Vec2) => Vec2,
        (BinOp::Div, Scalar, Scalar) => Scalar,
        (BinOp::Div, Vec2, Scalar) | (BinOp::Div, Vec2, Vec2) => Vec2,
        _ => {
            return Err(CompileError::TypeMismatch(format!(
                "{op:?} cannot combine {lhs:?} and {rhs:?}"
            )));
        }
    };
    Ok(ty)
}

fn builtin_ty(builtin: Builtin, args: &[Ty]) -> Result<Ty, CompileError> {
    use Ty::{Scalar, Vec2};
    let ty = match (builtin, args) {
        (Builtin::Length, [Vec2]) => Scalar,
        (Builtin::Dist, [Vec2, Vec2]) => Scalar,
        (Builtin::Dot, [Vec2, Vec2]) => Scalar,
        (Builtin::Abs | Builtin::Sqrt | Builtin::Floor | Builtin::Fract, [Scalar]) => Scalar,
        (Builtin::Min | Builtin::Max, [Scalar, Scalar]) => Scalar,
        _ => {
            return Err(CompileError::TypeMismatch(format!(
                "{builtin:?} cannot take {args:?}"
            )));
        }
    };
    Ok(ty)
}

// ── Loop-bound folding ────────────────────────────────────────────────────

/// Folds the loop bound down to a concrete iteration count.
///
/// Only literals, captured constants (scalars, or component access on
/// vectors), and arithmetic over those fold. Anything touching `coord` or
/// a declared variable (including one shadowing a constant) is per-pixel
/// and therefore unbounded from the compiler's point of view.
fn fold_count(expr: &Expr, scope: &Scope, consts: &[Value]) -> Result<u32, CompileError> {
    let folded = fold_scalar(expr, scope, consts).ok_or(CompileError::UnboundedLoop)?;
    if !folded.is_finite() || folded < 0.0 {
        return Err(CompileError::UnboundedLoop);
    }
    Ok(folded.floor() as u32)
}

/// Resolves `name` to a captured-constant value; `None` when it names a
/// mutable (per-pixel) binding or nothing at all.
fn const_value(name: &str, scope: &Scope, consts: &[Value]) -> Option<Value> {
    let (slot, _) = scope.resolve(name)?;
    if scope.bindings[slot].mutable {
        return None;
    }
    Some(consts[slot])
}

fn fold_scalar(expr: &Expr, scope: &Scope, consts: &[Value]) -> Option<f32> {
    match expr {
        Expr::Scalar(v) => Some(*v),
        Expr::Var(name) => match const_value(name, scope, consts)? {
            Value::Scalar(v) => Some(v),
            Value::Vec2(..) => None,
        },
        Expr::Field(inner, component) => {
            if let Expr::Var(name) = inner.as_ref() {
                match const_value(name, scope, consts)? {
                    Value::Vec2(vx, vy) => Some(match component {
                        Component::X => vx,
                        Component::Y => vy,
                    }),
                    Value::Scalar(_) => None,
                }
            } else {
                None
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let l = fold_scalar(lhs, scope, consts)?;
            let r = fold_scalar(rhs, scope, consts)?;
            Some(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
            })
        }
        // `coord`, vector constructors, and calls never fold.
        _ => None,
    }
}
