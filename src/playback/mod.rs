/// Play/pause/seek clock that samples tracks into the item store.
pub mod scheduler;
