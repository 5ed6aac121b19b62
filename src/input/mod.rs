mod reader;

pub use reader::{Input, InputReader};
