//! Technical indicators over daily OHLCV history.
//!
//! This crate provides the calculators behind the indicator engine:
//! - Moving averages (SMA at several windows, EMA at several periods)
//! - Momentum indicators (MACD, RSI, Slow Stochastic)
//! - Volatility indicators (Bollinger Bands with bandwidth and %B)
//!
//! Every calculator is a plain parameter struct implementing
//! [`ta_core::Indicator`]. Outputs are aligned one-to-one with the input
//! dates, undefined during warm-up. Window sums use SIMD helpers from
//! [`simd`].

pub mod momentum;
pub mod moving_average;
pub mod primitives;
pub mod simd;
pub mod volatility;

pub use momentum::{Macd, Rsi, RsiSmoothing, StochasticSlow};
pub use moving_average::{ExponentialMovingAverage, MovingAverage};
pub use volatility::BollingerBands;
