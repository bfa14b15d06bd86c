//! ShortRateModel trait: the stepping interface the path generator drives.
//!
//! ## Design Philosophy
//!
//! - **Static dispatch only**: the generator is generic over the model
//! - **One draw per step**: `evolve` consumes exactly one standard normal
//!   draw, so stream sizing is `n_steps` draws per path

/// Single-factor short-rate dynamics discretised on a time grid.
///
/// Implementations must be `Sync` so that one model instance can be shared
/// read-only across worker threads.
pub trait ShortRateModel: Sync {
    /// Short rate at `t = 0`.
    fn initial_rate(&self) -> f64;

    /// Advance the rate from `t` to `t + dt` using the standard normal draw `z`.
    fn evolve(&self, rate: f64, t: f64, dt: f64, z: f64) -> f64;

    /// Model name for logging and reports.
    fn model_name(&self) -> &'static str;
}
