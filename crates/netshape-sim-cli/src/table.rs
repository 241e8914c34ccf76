use netshape_abstract::{Algorithm, SimulationStep};

/// Render the simulation output log as a fixed-width table, one row per time
/// unit. Token columns appear only for token-bucket runs; a dropped amount of
/// zero renders as `-` so losses stand out.
pub fn render_step_table(algorithm: Algorithm, steps: &[SimulationStep]) -> String {
    let mut lines = Vec::with_capacity(steps.len() + 2);

    match algorithm {
        Algorithm::Leaky => {
            lines.push(format!(
                "{:>8} {:>10} {:>14} {:>8} {:>9} {:>14}",
                "Time (s)", "Incoming", "Buffer (Before)", "Sent", "Dropped", "Buffer (After)"
            ));
            lines.push("-".repeat(68));
            for step in steps {
                lines.push(format!(
                    "{:>8} {:>10} {:>14} {:>8} {:>9} {:>14}",
                    step.time,
                    step.incoming,
                    step.buffer_before,
                    step.sent,
                    dash_if_zero(step.dropped),
                    step.buffer_after
                ));
            }
        }
        Algorithm::Token => {
            lines.push(format!(
                "{:>8} {:>10} {:>14} {:>12} {:>8} {:>9} {:>14} {:>12}",
                "Time (s)",
                "Incoming",
                "Buffer (Before)",
                "Tokens Avail",
                "Sent",
                "Dropped",
                "Buffer (After)",
                "Tokens Left"
            ));
            lines.push("-".repeat(96));
            for step in steps {
                lines.push(format!(
                    "{:>8} {:>10} {:>14} {:>12} {:>8} {:>9} {:>14} {:>12}",
                    step.time,
                    step.incoming,
                    step.buffer_before,
                    step.tokens_available.unwrap_or(0),
                    step.sent,
                    dash_if_zero(step.dropped),
                    step.buffer_after,
                    step.tokens_after.unwrap_or(0)
                ));
            }
        }
    }

    lines.join("\n")
}

fn dash_if_zero(value: i64) -> String {
    if value == 0 {
        "-".to_string()
    } else {
        value.to_string()
    }
}
