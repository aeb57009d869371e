//! Example: Scheduling a meeting against the reference oracles
//!
//! Reads configuration the usual way (environment, config file, defaults),
//! schedules the request given on the command line and prints the summary as
//! JSON. When the scheduler asks for more detail, one follow-up line is read
//! from stdin.
//!
//! Run this example: ```bash cargo run -p raincheck-infra --example schedule
//! -- "Friday 2pm Taipei meet Alice 60min" ```

use std::io::BufRead;

use raincheck_domain::{EventStatus, SchedulingRequest};
use raincheck_infra::{config, init_tracing, reference_orchestrator};

#[tokio::main]
#[allow(clippy::print_stdout)]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    init_tracing(&config.logging)?;

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let text = if text.trim().is_empty() {
        "Friday 2pm Taipei meet Alice 60min".to_string()
    } else {
        text
    };

    let orchestrator = reference_orchestrator(&config)?;
    let mut summary = orchestrator.schedule(&text).await;

    if summary.status == EventStatus::NeedsClarification {
        if let Some(clarification) = summary.clarification.clone() {
            println!("{}", clarification.message);
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            summary = orchestrator
                .run(SchedulingRequest::follow_up(line.trim(), &clarification))
                .await;
        }
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
