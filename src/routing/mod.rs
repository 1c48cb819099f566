//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Navigation (location string)
//!     → location.rs (split path/query/hash, strip history base)
//!     → router.rs (route lookup, param rules, fallback)
//!     → matcher.rs (segment-wise pattern match)
//!     → Return: RouteMatch, Redirect or NotFound
//!
//! Table Compilation (at startup):
//!     Route declarations
//!     → Compile patterns
//!     → Reject duplicate names and colliding paths
//!     → Freeze as immutable RouteTable inside a Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex in the hot path
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)
//! - Views are a closed enum, independent of any UI framework

pub mod error;
pub mod location;
pub mod matcher;
pub mod params;
pub mod router;
pub mod table;
pub mod view;

pub use error::{PatternError, ResolveError, RouteTableError, RouterError};
pub use location::Location;
pub use matcher::{MatchOptions, RoutePattern};
pub use params::{ParamRule, ParamRules};
pub use router::{FallbackPolicy, Navigation, RouteMatch, Router, RouterOptions};
pub use table::{Route, RouteTable};
pub use view::{Screen, View};
