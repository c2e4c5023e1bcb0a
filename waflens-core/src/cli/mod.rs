pub mod analyze;
pub mod conf;
pub mod paths;
pub mod render;
pub mod shortcuts;

mod session;

#[cfg(test)]
mod tests;
