pub mod prompts;
pub mod sampling;
pub mod tools;

pub use sampling::SamplingInterpreter;
pub use tools::LiurenServer;
