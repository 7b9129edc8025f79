//! Read-only queries over the reading store
//!
//! Every function here is a pure computation over a borrowed
//! [`ReadingStore`](crate::store::ReadingStore) or slice of readings.
//! Nothing is cached; the dataset is small enough that each call rescans.
//!
//! Queries never fail. A boat with no history gets a zeroed summary, an
//! absent report, or an empty list, and the caller renders that state.
//!
//! | Module | Serves |
//! |--------|--------|
//! | [`accuracy`] | latest-reading lookup, per-boat accuracy summary |
//! | [`validation`] | rolling-window stability and reliability |
//! | [`technical`] | composite of static spec and latest metrics |
//! | [`fleet`] | fleet snapshot, concentration trends, map positions |
//! | [`analytics`] | time-range filters, statistics, hourly profile |
//! | [`alerts`] | threshold alerts and the bounded alert log |
//! | [`health`] | data-integrity indicator |

pub mod accuracy;
pub mod alerts;
pub mod analytics;
pub mod fleet;
pub mod health;
pub mod stats;
pub mod technical;
pub mod validation;

pub use accuracy::AccuracySummary;
pub use alerts::{Alert, AlertKind, AlertLog, AlertSeverity, AlertThresholds};
pub use analytics::{HourlyBucket, TimeRange};
pub use fleet::{ConcentrationBand, FleetSnapshot, MapPosition, Trend};
pub use health::{HealthGrade, SystemHealth};
pub use stats::Statistics;
pub use technical::TechnicalDetail;
pub use validation::{ChannelValidation, FusionValidation, PerformanceTier, Stability, ValidationReport};
