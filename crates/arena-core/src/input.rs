//! Per-tick driving input supplied by an input adapter.

use serde::{Deserialize, Serialize};

/// Boolean control snapshot for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriveInput {
    pub accelerate: bool,
    pub brake: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveInput {
    pub const IDLE: DriveInput = DriveInput {
        accelerate: false,
        brake: false,
        left: false,
        right: false,
    };

    pub const FORWARD: DriveInput = DriveInput {
        accelerate: true,
        brake: false,
        left: false,
        right: false,
    };
}
