// metric helpers; recorders/exporters are installed by binaries, never here

use metrics::counter;

pub const EMITTER_EVENTS_DROPPED_TOTAL: &str = "emitter_events_dropped_total";

pub fn report_dropped_events(cause: &'static str, quantity: u64) {
    counter!(EMITTER_EVENTS_DROPPED_TOTAL, "cause" => cause).increment(quantity);
}
