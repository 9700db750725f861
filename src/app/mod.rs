// Terminal presentation for the `boj` binary.

pub mod render;
