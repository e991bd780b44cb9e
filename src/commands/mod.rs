/// The two ways a run ends: listing the matches, or running the command
/// template once per match.
mod exec;
mod print;

pub use exec::*;
pub use print::*;
