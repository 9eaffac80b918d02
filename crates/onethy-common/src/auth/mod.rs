//! Bearer-token authentication utilities

mod jwt;

pub use jwt::{Claims, JwtService};
