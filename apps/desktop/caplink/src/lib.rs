// Library exports for testing
// The binary (main.rs) imports these as well

pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;

/// Port the bridge listener binds on localhost.
pub const BRIDGE_PORT: u16 = 47630;
