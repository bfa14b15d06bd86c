//! Hull-White one-factor short-rate model.
//!
//! The Hull-White model is a short-rate model described by:
//! ```text
//! dr(t) = a * (theta(t) - r(t)) * dt + sigma * dW(t)
//! ```
//! where:
//! - r(t) = short rate at time t
//! - a = mean reversion speed (must be positive)
//! - sigma = volatility (non-negative; zero gives a deterministic path)
//! - theta(t) = time-dependent reversion level fitted to the initial curve
//! - dW(t) = Wiener process increment
//!
//! For a flat initial forward curve at `f0` the fitted level is
//! ```text
//! theta(t) = f0 + sigma^2 / (2 a^2) * (1 - exp(-2 a t))
//! ```
//! which makes `E[r(t)] = f0 + 0.5 * (sigma / a * (1 - exp(-a t)))^2`.
//!
//! ## Key Properties
//!
//! - **Mean reversion**: rates are pulled towards theta(t) at speed a
//! - **Gaussian**: r(t) is normally distributed, so closed-form moments exist
//! - **Negative rates**: the model allows negative rates; they are never clamped
//!
//! ## Usage
//!
//! ```
//! use shortrate_models::models::hull_white::{HullWhiteModel, ProcessParameters};
//! use shortrate_models::models::ShortRateModel;
//!
//! let params = ProcessParameters::new(0.1, 0.015, 0.05).unwrap();
//! let model = HullWhiteModel::euler(params);
//!
//! // Start from the initial forward rate
//! assert_eq!(model.initial_rate(), 0.05);
//!
//! // Evolve one monthly step with zero shock
//! let next = model.evolve(0.05, 0.0, 1.0 / 12.0, 0.0);
//! assert_eq!(next, 0.05);
//! ```

use shortrate_core::market_data::YieldCurve;
use shortrate_core::types::ConfigurationError;

use super::short_rate::ShortRateModel;

/// Hull-White process parameters for a flat initial forward curve.
///
/// Immutable once constructed; every field has been validated.
///
/// # Fields
///
/// * `mean_reversion` - Mean reversion speed (a > 0)
/// * `volatility` - Short rate volatility (sigma >= 0)
/// * `initial_forward` - Flat instantaneous forward rate f0, also r(0)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessParameters {
    mean_reversion: f64,
    volatility: f64,
    initial_forward: f64,
}

impl ProcessParameters {
    /// Create new parameters with validation.
    ///
    /// # Errors
    ///
    /// `ConfigurationError::InvalidParameter` when `a <= 0`, `sigma < 0`, or
    /// any value is not finite.
    ///
    /// # Example
    ///
    /// ```
    /// use shortrate_models::models::hull_white::ProcessParameters;
    ///
    /// assert!(ProcessParameters::new(0.1, 0.015, 0.05).is_ok());
    /// assert!(ProcessParameters::new(0.1, 0.0, 0.05).is_ok());
    ///
    /// // Invalid: non-positive mean reversion
    /// assert!(ProcessParameters::new(0.0, 0.015, 0.05).is_err());
    /// // Invalid: negative volatility
    /// assert!(ProcessParameters::new(0.1, -0.015, 0.05).is_err());
    /// ```
    pub fn new(
        mean_reversion: f64,
        volatility: f64,
        initial_forward: f64,
    ) -> Result<Self, ConfigurationError> {
        if !(mean_reversion > 0.0 && mean_reversion.is_finite()) {
            return Err(ConfigurationError::invalid(
                "mean_reversion",
                format!("{} must be positive and finite", mean_reversion),
            ));
        }
        if !(volatility >= 0.0 && volatility.is_finite()) {
            return Err(ConfigurationError::invalid(
                "volatility",
                format!("{} must be non-negative and finite", volatility),
            ));
        }
        if !initial_forward.is_finite() {
            return Err(ConfigurationError::invalid(
                "forward_rate",
                format!("{} must be finite", initial_forward),
            ));
        }

        Ok(Self {
            mean_reversion,
            volatility,
            initial_forward,
        })
    }

    /// Create parameters taking f0 from the curve's instantaneous forward at zero.
    pub fn from_curve<C: YieldCurve>(
        mean_reversion: f64,
        volatility: f64,
        curve: &C,
    ) -> Result<Self, ConfigurationError> {
        let f0 = curve
            .instantaneous_forward(0.0)
            .map_err(|e| ConfigurationError::invalid("forward_rate", e.to_string()))?;
        Self::new(mean_reversion, volatility, f0)
    }

    /// Mean reversion speed `a`.
    #[inline]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Volatility `sigma`.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Flat initial forward rate `f0`.
    #[inline]
    pub fn initial_forward(&self) -> f64 {
        self.initial_forward
    }

    /// Reversion level theta(t) fitted to the flat initial curve.
    ///
    /// theta(t) = f0 + sigma^2 / (2a^2) * (1 - exp(-2at))
    pub fn reversion_level(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let sigma = self.volatility;
        self.initial_forward + sigma * sigma / (2.0 * a * a) * (1.0 - (-2.0 * a * t).exp())
    }

    /// Classical Hull-White drift term `a * theta(t)`.
    ///
    /// theta_HW(t) = a * f0 + sigma^2 / (2a) * (1 - exp(-2at))
    pub fn drift_term(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let sigma = self.volatility;
        a * self.initial_forward + sigma * sigma / (2.0 * a) * (1.0 - (-2.0 * a * t).exp())
    }

    /// Deterministic part of r(t): alpha(t) = f0 + 0.5 * (sigma/a * (1 - exp(-at)))^2.
    pub fn alpha(&self, t: f64) -> f64 {
        let a = self.mean_reversion;
        let x = self.volatility / a * (1.0 - (-a * t).exp());
        self.initial_forward + 0.5 * x * x
    }

    /// Long-term limit of theta(t): f0 + sigma^2 / (2a^2).
    pub fn long_term_mean(&self) -> f64 {
        let a = self.mean_reversion;
        let sigma = self.volatility;
        self.initial_forward + sigma * sigma / (2.0 * a * a)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::ProcessParameters;
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    struct RawParameters {
        mean_reversion: f64,
        volatility: f64,
        initial_forward: f64,
    }

    /// Deserialises through [`ProcessParameters::new`], so invalid values
    /// are rejected.
    impl<'de> Deserialize<'de> for ProcessParameters {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = RawParameters::deserialize(deserializer)?;
            ProcessParameters::new(raw.mean_reversion, raw.volatility, raw.initial_forward)
                .map_err(de::Error::custom)
        }
    }
}

/// Time discretisation scheme for one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Discretisation {
    /// Euler-Maruyama:
    /// `r + a * (theta(t) - r) * dt + sigma * sqrt(dt) * Z`
    #[default]
    Euler,

    /// Exact Gaussian transition:
    /// `alpha(t+dt) + (r - alpha(t)) * exp(-a dt) + sigma * sqrt((1 - exp(-2a dt)) / 2a) * Z`
    Exact,
}

impl std::str::FromStr for Discretisation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "euler" | "euler-maruyama" => Ok(Discretisation::Euler),
            "exact" => Ok(Discretisation::Exact),
            _ => Err(format!("Unknown discretisation: {}", s)),
        }
    }
}

/// Hull-White one-factor model for short rate dynamics.
///
/// Implements [`ShortRateModel`] for path generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HullWhiteModel {
    params: ProcessParameters,
    scheme: Discretisation,
}

impl HullWhiteModel {
    /// Create a model with the given discretisation.
    pub fn new(params: ProcessParameters, scheme: Discretisation) -> Self {
        Self { params, scheme }
    }

    /// Create a model stepping with Euler-Maruyama.
    pub fn euler(params: ProcessParameters) -> Self {
        Self::new(params, Discretisation::Euler)
    }

    /// Create a model stepping with the exact transition.
    pub fn exact(params: ProcessParameters) -> Self {
        Self::new(params, Discretisation::Exact)
    }

    /// The model's parameters.
    #[inline]
    pub fn params(&self) -> &ProcessParameters {
        &self.params
    }

    /// The discretisation scheme.
    #[inline]
    pub fn scheme(&self) -> Discretisation {
        self.scheme
    }
}

impl ShortRateModel for HullWhiteModel {
    fn initial_rate(&self) -> f64 {
        self.params.initial_forward
    }

    fn evolve(&self, rate: f64, t: f64, dt: f64, z: f64) -> f64 {
        let a = self.params.mean_reversion;
        let sigma = self.params.volatility;

        match self.scheme {
            Discretisation::Euler => {
                let level = self.params.reversion_level(t);
                rate + a * (level - rate) * dt + sigma * dt.sqrt() * z
            }
            Discretisation::Exact => {
                let decay = (-a * dt).exp();
                let std_dev = sigma * ((1.0 - (-2.0 * a * dt).exp()) / (2.0 * a)).sqrt();
                self.params.alpha(t + dt) + (rate - self.params.alpha(t)) * decay + std_dev * z
            }
        }
    }

    fn model_name(&self) -> &'static str {
        match self.scheme {
            Discretisation::Euler => "HullWhite1F-Euler",
            Discretisation::Exact => "HullWhite1F-Exact",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shortrate_core::market_data::FlatForwardCurve;

    fn standard_params() -> ProcessParameters {
        ProcessParameters::new(0.1, 0.015, 0.05).unwrap()
    }

    #[test]
    fn test_params_new_valid() {
        let p = standard_params();
        assert_eq!(p.mean_reversion(), 0.1);
        assert_eq!(p.volatility(), 0.015);
        assert_eq!(p.initial_forward(), 0.05);
    }

    #[test]
    fn test_params_invalid_mean_reversion() {
        assert!(ProcessParameters::new(-0.1, 0.015, 0.05).is_err());
        assert!(ProcessParameters::new(0.0, 0.015, 0.05).is_err());
        assert!(ProcessParameters::new(f64::NAN, 0.015, 0.05).is_err());
    }

    #[test]
    fn test_params_invalid_volatility() {
        let err = ProcessParameters::new(0.1, -0.01, 0.05).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidParameter {
                name: "volatility",
                ..
            }
        ));
        assert!(ProcessParameters::new(0.1, f64::INFINITY, 0.05).is_err());
    }

    #[test]
    fn test_params_negative_forward_allowed() {
        assert!(ProcessParameters::new(0.1, 0.01, -0.005).is_ok());
        assert!(ProcessParameters::new(0.1, 0.01, f64::NAN).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_deserialize_validates() {
        let ok: ProcessParameters = serde_json::from_str(
            r#"{"mean_reversion":0.1,"volatility":0.015,"initial_forward":0.05}"#,
        )
        .unwrap();
        assert_eq!(ok, standard_params());

        let err = serde_json::from_str::<ProcessParameters>(
            r#"{"mean_reversion":0.0,"volatility":-0.01,"initial_forward":0.05}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("mean_reversion"));

        assert!(serde_json::from_str::<ProcessParameters>(
            r#"{"mean_reversion":0.1,"volatility":-0.01,"initial_forward":0.05}"#
        )
        .is_err());
    }

    #[test]
    fn test_params_from_curve() {
        let curve = FlatForwardCurve::new(0.03);
        let p = ProcessParameters::from_curve(0.1, 0.01, &curve).unwrap();
        assert_eq!(p.initial_forward(), 0.03);
    }

    #[test]
    fn test_reversion_level_at_zero_is_forward() {
        let p = standard_params();
        assert_eq!(p.reversion_level(0.0), 0.05);
        assert_eq!(p.alpha(0.0), 0.05);
    }

    #[test]
    fn test_drift_term_is_a_times_level() {
        let p = standard_params();
        for &t in &[0.0, 0.5, 5.0, 30.0] {
            assert_relative_eq!(
                p.drift_term(t),
                p.mean_reversion() * p.reversion_level(t),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_level_reproduces_alpha_dynamics() {
        // alpha'(t) = a * (theta(t) - alpha(t))
        let p = standard_params();
        let h = 1e-5;
        for &t in &[0.5, 2.0, 10.0, 25.0] {
            let derivative = (p.alpha(t + h) - p.alpha(t - h)) / (2.0 * h);
            let implied = p.mean_reversion() * (p.reversion_level(t) - p.alpha(t));
            assert_relative_eq!(derivative, implied, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_long_term_mean() {
        let p = ProcessParameters::new(0.1, 0.01, 0.03).unwrap();
        // 0.03 + 0.0001 / 0.02 = 0.035
        assert_relative_eq!(p.long_term_mean(), 0.035, max_relative = 1e-12);
        assert_relative_eq!(p.reversion_level(1e3), p.long_term_mean(), max_relative = 1e-12);
    }

    #[test]
    fn test_euler_step_no_shock_at_start() {
        let model = HullWhiteModel::euler(standard_params());
        let next = model.evolve(model.initial_rate(), 0.0, 1.0 / 12.0, 0.0);
        assert_eq!(next, 0.05);
    }

    #[test]
    fn test_euler_step_shock_direction() {
        let model = HullWhiteModel::euler(standard_params());
        let r0 = model.initial_rate();
        assert!(model.evolve(r0, 0.0, 1.0 / 12.0, 1.0) > r0);
        assert!(model.evolve(r0, 0.0, 1.0 / 12.0, -1.0) < r0);
    }

    #[test]
    fn test_mean_reversion_pulls_down() {
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.01, 0.02).unwrap());
        let next = model.evolve(0.08, 0.0, 0.1, 0.0);
        assert!(next < 0.08);
    }

    #[test]
    fn test_negative_rates_not_clamped() {
        let model = HullWhiteModel::euler(ProcessParameters::new(0.1, 0.05, 0.001).unwrap());
        // Diffusion: 0.05 * sqrt(1/12) * (-3) = -0.0433
        let next = model.evolve(0.001, 0.0, 1.0 / 12.0, -3.0);
        assert!(next < 0.0);

        let exact = HullWhiteModel::exact(ProcessParameters::new(0.1, 0.05, 0.001).unwrap());
        assert!(exact.evolve(0.001, 0.0, 1.0 / 12.0, -3.0) < 0.0);
    }

    #[test]
    fn test_exact_step_follows_alpha_without_shock() {
        let p = standard_params();
        let model = HullWhiteModel::exact(p);
        let dt = 0.25;
        let mut r = model.initial_rate();
        let mut t = 0.0;
        for _ in 0..40 {
            r = model.evolve(r, t, dt, 0.0);
            t += dt;
            assert_relative_eq!(r, p.alpha(t), max_relative = 1e-12);
        }
    }

    #[test]
    fn test_exact_step_std_dev() {
        let p = standard_params();
        let model = HullWhiteModel::exact(p);
        let dt = 0.5;
        let base = model.evolve(0.05, 0.0, dt, 0.0);
        let shocked = model.evolve(0.05, 0.0, dt, 1.0);
        let expected = 0.015 * ((1.0 - (-2.0 * 0.1 * dt).exp()) / 0.2).sqrt();
        assert_relative_eq!(shocked - base, expected, max_relative = 1e-10);
    }

    #[test]
    fn test_zero_volatility_is_deterministic_and_flat() {
        let p = ProcessParameters::new(0.1, 0.0, 0.05).unwrap();
        for model in [HullWhiteModel::euler(p), HullWhiteModel::exact(p)] {
            let mut r = model.initial_rate();
            for i in 0..360 {
                r = model.evolve(r, i as f64 / 12.0, 1.0 / 12.0, 2.5);
                assert_eq!(r, 0.05);
            }
        }
    }

    #[test]
    fn test_model_name_and_scheme() {
        let p = standard_params();
        assert_eq!(HullWhiteModel::euler(p).model_name(), "HullWhite1F-Euler");
        assert_eq!(HullWhiteModel::exact(p).model_name(), "HullWhite1F-Exact");
        assert_eq!(HullWhiteModel::exact(p).scheme(), Discretisation::Exact);
        assert_eq!(Discretisation::default(), Discretisation::Euler);
    }

    #[test]
    fn test_discretisation_parsing() {
        assert_eq!("Euler".parse::<Discretisation>().unwrap(), Discretisation::Euler);
        assert_eq!("exact".parse::<Discretisation>().unwrap(), Discretisation::Exact);
        assert!("milstein".parse::<Discretisation>().is_err());
    }
}
