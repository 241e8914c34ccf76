use netshape_abstract::{ShapingConfig, SimulationStep};
use tracing::debug;

/// Simulate a leaky bucket over one packet sequence, one time unit per packet.
///
/// Admission is partial: whatever fits below `capacity` is admitted and the
/// excess is dropped. The drain then sends up to `rate` from the occupancy
/// within the same time unit. Occupancy is the only state carried between
/// units; dropped traffic is gone for good.
pub fn run_leaky_bucket(config: &ShapingConfig, packets: &[i64]) -> Vec<SimulationStep> {
    let ShapingConfig { capacity, rate } = *config;
    let mut bucket: i64 = 0;
    let mut steps = Vec::with_capacity(packets.len());

    for (index, &incoming) in packets.iter().enumerate() {
        let time = index as u64 + 1;
        let buffer_before = bucket;

        // 1. Admit: overflow past capacity is dropped
        let mut dropped = 0;
        if bucket + incoming > capacity {
            dropped = (bucket + incoming) - capacity;
            bucket = capacity;
        } else {
            bucket += incoming;
        }

        // 2. Leak: send at the fixed rate, or empty the bucket if below it
        let sent;
        if bucket >= rate {
            sent = rate;
            bucket -= rate;
        } else {
            sent = bucket;
            bucket = 0;
        }

        debug!(
            "leaky t={} incoming={} before={} sent={} dropped={} after={}",
            time, incoming, buffer_before, sent, dropped, bucket
        );

        steps.push(SimulationStep {
            time,
            incoming,
            buffer_before,
            tokens_available: None,
            sent,
            dropped,
            buffer_after: bucket,
            tokens_after: None,
        });
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::run_leaky_bucket;
    use netshape_abstract::ShapingConfig;

    fn config(capacity: i64, rate: i64) -> ShapingConfig {
        ShapingConfig { capacity, rate }
    }

    #[test]
    fn classic_worked_example() {
        let steps = run_leaky_bucket(&config(10, 3), &[4, 2, 6, 8, 2]);
        assert_eq!(steps.len(), 5);

        assert_eq!(steps[0].incoming, 4);
        assert_eq!(steps[0].buffer_before, 0);
        assert_eq!(steps[0].sent, 3);
        assert_eq!(steps[0].dropped, 0);
        assert_eq!(steps[0].buffer_after, 1);

        assert_eq!(steps[1].buffer_before, 1);
        assert_eq!(steps[1].sent, 3);
        assert_eq!(steps[1].buffer_after, 0);

        assert_eq!(steps[2].buffer_before, 0);
        assert_eq!(steps[2].sent, 3);
        assert_eq!(steps[2].buffer_after, 3);

        // 3 + 8 overflows a capacity of 10 by exactly 1
        assert_eq!(steps[3].buffer_before, 3);
        assert_eq!(steps[3].dropped, 1);
        assert_eq!(steps[3].sent, 3);
        assert_eq!(steps[3].buffer_after, 7);

        assert_eq!(steps[4].buffer_before, 7);
        assert_eq!(steps[4].dropped, 0);
        assert_eq!(steps[4].sent, 3);
        assert_eq!(steps[4].buffer_after, 6);
    }

    #[test]
    fn oversized_burst_drops_the_excess() {
        let steps = run_leaky_bucket(&config(5, 1), &[20]);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].dropped, 15);
        assert_eq!(steps[0].sent, 1);
        assert_eq!(steps[0].buffer_after, 4);
    }

    #[test]
    fn empty_input_yields_empty_trace() {
        assert!(run_leaky_bucket(&config(10, 3), &[]).is_empty());
    }

    #[test]
    fn zero_rate_sends_nothing_and_buffer_only_grows() {
        let steps = run_leaky_bucket(&config(5, 0), &[2, 2, 2, 2]);
        let mut previous = 0;
        for step in &steps {
            assert_eq!(step.sent, 0);
            assert!(step.buffer_after >= previous);
            assert!(step.buffer_after <= 5);
            previous = step.buffer_after;
        }
        // Capacity 5 absorbs the first two packets and part of the third
        assert_eq!(steps[2].dropped, 1);
        assert_eq!(steps[3].dropped, 2);
    }

    #[test]
    fn conservation_and_bounds_hold_across_a_bursty_run() {
        let capacity = 7;
        let packets = [3, 0, 9, 1, 14, 0, 2, 5];
        let steps = run_leaky_bucket(&config(capacity, 2), &packets);

        assert_eq!(steps.len(), packets.len());
        for (i, step) in steps.iter().enumerate() {
            assert_eq!(step.time, i as u64 + 1);
            assert!(step.buffer_after >= 0 && step.buffer_after <= capacity);
            assert!(step.sent >= 0 && step.dropped >= 0);
            // incoming splits into the admitted portion plus the dropped excess
            let admitted = step.buffer_after + step.sent - step.buffer_before;
            assert_eq!(step.incoming, admitted + step.dropped);
        }
    }

    #[test]
    fn identical_configs_produce_identical_traces() {
        let cfg = config(10, 3);
        let packets = [4, 2, 6, 8, 2];
        assert_eq!(
            run_leaky_bucket(&cfg, &packets),
            run_leaky_bucket(&cfg, &packets)
        );
    }

    #[test]
    fn degenerate_parameters_still_produce_a_full_trace() {
        // Zero and negative parameters are not rejected; the arithmetic just
        // runs as given and every packet still gets its step
        for cfg in [config(0, 3), config(-4, 3), config(10, -2)] {
            let steps = run_leaky_bucket(&cfg, &[1, 2, 3]);
            assert_eq!(steps.len(), 3);
            assert_eq!(steps.last().unwrap().time, 3);
        }
    }
}
