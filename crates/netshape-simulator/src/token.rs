use netshape_abstract::{ShapingConfig, SimulationStep};
use tracing::debug;

/// Simulate a token bucket over one packet sequence, one time unit per packet.
///
/// Each time unit generates `rate` tokens (capped at `capacity`), then admits
/// the arriving packet into the queue all-or-nothing: a packet that would push
/// the queue past `capacity` is rejected whole, never split. Service is fluid:
/// `min(buffer, tokens)` leaves the queue, consuming one token per unit sent.
///
/// The same `capacity` bounds the token pool and the packet queue. That shared
/// bound is the lab's teaching simplification and is kept as-is.
pub fn run_token_bucket(config: &ShapingConfig, packets: &[i64]) -> Vec<SimulationStep> {
    let ShapingConfig { capacity, rate } = *config;
    let mut buffer: i64 = 0;
    let mut tokens: i64 = 0;
    let mut steps = Vec::with_capacity(packets.len());

    for (index, &incoming) in packets.iter().enumerate() {
        let time = index as u64 + 1;
        let buffer_before = buffer;

        // 1. Generate tokens up to the shared capacity
        tokens += rate;
        if tokens > capacity {
            tokens = capacity;
        }
        let tokens_available = tokens;

        // 2. Admit all-or-nothing: a packet either fits the queue or is rejected whole
        let mut dropped = 0;
        if buffer + incoming > capacity {
            dropped = incoming;
        } else {
            buffer += incoming;
        }

        // 3. Serve as much of the queue as the tokens cover
        let sent = buffer.min(tokens);
        tokens -= sent;
        buffer -= sent;

        debug!(
            "token t={} incoming={} before={} tokens={} sent={} dropped={} after={} tokens_left={}",
            time, incoming, buffer_before, tokens_available, sent, dropped, buffer, tokens
        );

        steps.push(SimulationStep {
            time,
            incoming,
            buffer_before,
            tokens_available: Some(tokens_available),
            sent,
            dropped,
            buffer_after: buffer,
            tokens_after: Some(tokens),
        });
    }

    steps
}
