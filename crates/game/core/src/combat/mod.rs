//! Combat resolution primitives.
//!
//! Free functions that operate on one or two [`Actor`](crate::state::Actor)s
//! and draw from the caller's random stream. They know nothing about phases
//! or rosters; the engine sequences them and checks terminal conditions.
//!
//! - [`apply_status`] / [`tick_statuses`]: status application and per-turn ticks
//! - [`resolve_attack`]: damage, dodge, crit, reflect and on-hit status
//! - [`resolve_heal`]: clamped healing

mod damage;
mod heal;
mod status;

pub use damage::{AttackContext, DamageResult, resolve_attack};
pub use heal::{heal_amount, resolve_heal, resolve_self_heal};
pub use status::{StatusApplication, TickReport, apply_status, tick_statuses};
