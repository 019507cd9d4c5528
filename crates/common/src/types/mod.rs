use serde::Serialize;

/// Body of the `/health` liveness probe.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}
