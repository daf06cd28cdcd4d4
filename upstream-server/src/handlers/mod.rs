//! HTTP handlers, one per route

pub mod delay;
pub mod json;
pub mod resources;
pub mod size;
pub mod xml;

pub use delay::fixed_delay;
pub use json::json_time;
pub use resources::{list_resources, show_resource};
pub use size::sized_payload;
pub use xml::{soap_stub, xml_sample};
