//! Telemetry engine for DualRay
//!
//! Holds the fleet's reading history, synthesizes dual-wavelength sensor
//! quality metrics and answers the aggregation queries every dashboard
//! view renders from.
//!
//! Key constraints:
//! - At most 1,000 readings retained across the whole fleet
//! - Every percentage-valued metric stays within [0, 100]
//! - The fused score never drops below the stronger channel
//! - Queries never fail on missing data, they degrade to empty results
//!
//! ```no_run
//! use dualray_core::{TelemetryHub, BoatStatus};
//!
//! let mut hub = TelemetryHub::seeded(7);
//! hub.load_snapshot("timestamp,boat_id,gps_lat,gps_long,particle_size_microns,concentration_ppm,depth_cm,collection_volume_ml,battery_status,power_source\n\
//!                    2024-09-15T10:00:00Z,B1,19.07,72.87,12.5,1.8,40,250,76,solar");
//!
//! hub.tick();
//!
//! let accuracy = hub.sensor_accuracy("B1");
//! assert!(accuracy.fused >= accuracy.laser.max(accuracy.infrared));
//! let _status: BoatStatus = hub.boat_status("B1");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod config;
pub mod constants;
pub mod csv;
pub mod errors;
pub mod hub;
pub mod queries;
pub mod reading;
pub mod status;
pub mod store;
pub mod synth;
pub mod time;

// Public API
pub use catalog::{TechnicalSpecification, TECHNICAL_SPECIFICATION};
pub use config::DashboardSettings;
pub use errors::{TelemetryError, TelemetryResult};
pub use hub::TelemetryHub;
pub use queries::{AccuracySummary, TechnicalDetail, ValidationReport};
pub use reading::{ChannelStatus, PowerSource, Reading};
pub use status::BoatStatus;
pub use store::ReadingStore;
pub use synth::{MetricSynthesizer, ScoringVariant};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
