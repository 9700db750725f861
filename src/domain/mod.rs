// Domain layer: models and ports shared by the judge client, session store and CLI.

pub mod model;
pub mod ports;
