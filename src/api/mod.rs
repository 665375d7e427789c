mod anchor_controller;
mod auto_fetch_controller;
mod convergent_scroller;
mod frame_driver;
mod json_contract;
mod materializer;
mod navigation_coordinator;
mod navigation_handle;
mod navigation_job;
mod navigator;
mod navigator_config;
mod navigator_init;
mod navigator_snapshot;
mod observer_registry;
mod passive_tracking;
mod stability_waiter;
mod validation;

pub use convergent_scroller::{ConvergentScroller, ScrollStep};
pub use frame_driver::{FrameReport, NavigationRecord};
pub use json_contract::{NAVIGATOR_SNAPSHOT_JSON_SCHEMA_V1, NavigatorSnapshotJsonContractV1};
pub use materializer::{MaterializeStep, Materializer};
pub use navigation_handle::NavigationHandle;
pub use navigation_job::NavigationPhase;
pub use navigator::ListNavigator;
pub use navigator_config::{AutoFetchConfig, MaterializeConfig, NavigatorConfig, ZoomConfig};
pub use navigator_snapshot::NavigatorSnapshot;
pub use stability_waiter::{SettleStep, StabilityWaiter};
