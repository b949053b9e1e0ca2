use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_stream::StreamExt;

use report_onboard::config::FlowConfig;
use report_onboard::onboarding::{step, OnboardingController};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = FlowConfig::from_env()?;

    eprintln!("📋 {} v{}", config.name, env!("CARGO_PKG_VERSION"));
    eprintln!("   Two quick steps before your first report.");
    eprintln!("   /back to revisit the previous step, /quit to exit.\n");

    let controller = OnboardingController::with_config(&config);

    // Stands in for the rendering layer's state binding.
    let mut updates = controller.updates();
    let observer = tokio::spawn(async move {
        while let Some(state) = updates.next().await {
            tracing::debug!(
                step = state.current_step,
                name = %state.user_data.name,
                interests = state.user_data.interests.len(),
                "State published"
            );
        }
    });

    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();

    let mut aborted = false;
    while !controller.is_complete() && !aborted {
        match controller.snapshot().current_step {
            step::BASIC_INFO => {
                aborted = !run_basic_info_step(&controller, &mut lines).await?;
            }
            step::INTERESTS => {
                aborted = !run_interests_step(&controller, &mut lines).await?;
            }
            other => {
                // Retreated below the first step; walk back up.
                tracing::warn!(step = other, "Outside the defined steps, returning to start");
                controller.advance_step();
            }
        }
    }

    if controller.is_complete() {
        let status = controller.status();
        eprintln!("\nAll set. Your profile:");
        println!("{}", serde_json::to_string_pretty(&status.user_data)?);
        tracing::info!(
            session_id = %status.session_id,
            transitions = controller.transitions().len(),
            "Onboarding finished"
        );
    } else {
        eprintln!("\nOnboarding aborted.");
    }

    observer.abort();
    Ok(())
}

/// What a round of prompting produced.
enum StepInput {
    Values(Vec<String>),
    Back,
    Quit,
}

/// Prompt for each label in turn. `/back` and `/quit` short-circuit.
async fn prompt_all(
    lines: &mut Lines<BufReader<Stdin>>,
    labels: &[&str],
) -> Result<StepInput> {
    let mut values = Vec::with_capacity(labels.len());
    for label in labels {
        eprint!("{label}: ");
        let Some(line) = lines.next_line().await? else {
            return Ok(StepInput::Quit); // EOF
        };
        let line = line.trim().to_string();
        match line.as_str() {
            "/quit" => return Ok(StepInput::Quit),
            "/back" => return Ok(StepInput::Back),
            _ => values.push(line),
        }
    }
    Ok(StepInput::Values(values))
}

/// Run the basic-info step once. Returns false when the user quit.
async fn run_basic_info_step(
    controller: &OnboardingController,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    eprintln!("Step 1 of 2: about you");
    let values = match prompt_all(
        lines,
        &[
            "Name",
            "Age",
            "Risk tolerance (Low/Medium/High)",
            "Report complexity (Simple/Standard/Detailed)",
        ],
    )
    .await?
    {
        StepInput::Values(values) => values,
        StepInput::Back => {
            controller.retreat_step();
            return Ok(true);
        }
        StepInput::Quit => return Ok(false),
    };

    let [name, age_raw, risk, complexity] = values.as_slice() else {
        return Ok(false);
    };
    // The controller stores whatever it is given; a bad age just fails the
    // validity check below.
    let age = age_raw.parse().unwrap_or(0);
    controller.set_basic_info(name.clone(), age, risk.clone(), complexity.clone());

    if controller.is_current_step_valid() {
        controller.advance_step();
    } else {
        eprintln!("   Every field is required and age must be positive. Let's go again.\n");
    }
    Ok(true)
}

/// Run the interests-and-days step once. Returns false when the user quit.
async fn run_interests_step(
    controller: &OnboardingController,
    lines: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    eprintln!("Step 2 of 2: your reports");
    let values = match prompt_all(
        lines,
        &[
            "Interests (comma-separated)",
            "Report days (1=Mon … 7=Sun, comma-separated)",
        ],
    )
    .await?
    {
        StepInput::Values(values) => values,
        StepInput::Back => {
            controller.retreat_step();
            return Ok(true);
        }
        StepInput::Quit => return Ok(false),
    };

    let [interests_raw, days_raw] = values.as_slice() else {
        return Ok(false);
    };
    let interests: Vec<String> = interests_raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let report_days: Vec<i32> = days_raw
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    controller.set_interests_and_days(interests, report_days);

    if controller.is_current_step_valid() {
        controller.advance_step();
    } else {
        eprintln!("   Pick at least one interest and one delivery day.\n");
    }
    Ok(true)
}
