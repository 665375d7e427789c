mod observers;

pub use observers::{
    NavigationOutcome, NavigatorContext, NavigatorEvent, NavigatorObserver,
};
