//! Sovereign Routing Policy
//!
//! Maps raw address-bar input to something the embedded content surface can
//! actually display:
//! 1. URL with a known scheme → navigate
//! 2. Bare domain → navigate over `https://`
//! 3. Anything else → search
//!
//! Hosts that refuse to be framed are wrapped in a rendering proxy; the
//! search engine and the video platform get embed-friendly rewrites instead.
//! Host rules live in a declarative [`RoutingTable`].

mod input;
mod policy;
mod rules;
mod tables;
mod video;

pub use input::{classify, InputKind};
pub use policy::{Resolution, RoutingPolicy};
pub use rules::{HostPattern, RouteAction, RouteRule, RoutingTable};
pub use tables::{PolicyTables, QuickLink, BLANK_URL, FORCE_PROXY_HOSTS, QUICK_LINKS};
pub use video::video_id;
