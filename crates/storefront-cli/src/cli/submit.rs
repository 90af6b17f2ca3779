use super::{load_config, parse_fields};
use anyhow::{Context, Result};
use clap::Args;
use std::collections::BTreeMap;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use storefront::services::{
    FeedbackSink, FormDefinition, FormPurpose, SimulatedTransport, SubmissionCoordinator,
    SubmitOutcome, UiEvent,
};

#[derive(Args)]
pub struct SubmitArgs {
    /// Form to submit (enquiry or contact)
    form: String,

    /// Field value as key=value
    #[arg(long = "field")]
    fields: Vec<String>,

    /// Product the enquiry link was opened for
    #[arg(long)]
    product: Option<String>,

    /// Enquiry type preselected by the link
    #[arg(long = "type")]
    kind: Option<String>,

    /// Make the simulated delivery fail
    #[arg(long)]
    fail: bool,

    /// Override the simulated delivery delay
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Print the delivered payload as JSON
    #[arg(long)]
    json: bool,
}

/// Renders coordinator feedback as terminal lines
struct ConsoleFeedback;

impl FeedbackSink for ConsoleFeedback {
    fn emit(&self, form_id: &str, event: UiEvent) {
        match event {
            UiEvent::StateChanged(state) => println!("[{}] {}", form_id, state),
            UiEvent::ControlChanged(control) => {
                let status = if control.disabled { "disabled" } else { "enabled" };
                println!("[{}] button: {} ({})", form_id, control.label, status);
            },
            UiEvent::FieldValidated { field, result } => {
                if let Some(message) = result.message {
                    println!("[{}] {}: {}", form_id, field, message);
                }
            },
            UiEvent::FieldErrors(errors) => {
                for error in errors {
                    println!("[{}] error {}", form_id, error);
                }
            },
            UiEvent::Notify(notification) => {
                println!("[{}] {}: {}", form_id, notification.level, notification.message);
            },
            UiEvent::ShowModal(modal) => {
                println!("{}", modal.title);
                println!("  {}", modal.message);
                for action in modal.actions {
                    let marker = if action.primary { "*" } else { "-" };
                    println!("  {} {} -> {}", marker, action.label, action.target);
                }
            },
            UiEvent::FormReset => println!("[{}] form reset", form_id),
        }
    }
}

pub async fn execute(args: SubmitArgs) -> Result<ExitCode> {
    let purpose: FormPurpose = args.form.parse()?;
    let fields = parse_fields(&args.fields)?;
    let config = Arc::new(load_config()?);

    let form = FormDefinition::for_purpose(purpose, &config);
    let mut transport = SimulatedTransport::for_form(&form, &config);
    if args.fail {
        transport = transport.failing();
    }
    if let Some(delay_ms) = args.delay_ms {
        transport = transport.with_delay(Duration::from_millis(delay_ms));
    }

    let coordinator = SubmissionCoordinator::new(form, Arc::clone(&config), Arc::new(transport))
        .with_feedback(Arc::new(ConsoleFeedback));

    let mut params = BTreeMap::new();
    if let Some(product) = args.product {
        params.insert("product".to_string(), product);
    }
    if let Some(kind) = args.kind {
        params.insert("type".to_string(), kind);
    }
    coordinator.prefill(&params);

    for (name, value) in fields {
        coordinator.set_value(&name, value);
    }

    match coordinator.submit().await {
        SubmitOutcome::Succeeded { payload, .. } => {
            if args.json {
                let rendered = serde_json::to_string_pretty(&payload)
                    .context("Failed to render payload")?;
                println!("{}", rendered);
            }
            Ok(ExitCode::SUCCESS)
        },
        SubmitOutcome::Invalid(_) | SubmitOutcome::Failed { .. } | SubmitOutcome::Ignored => {
            Ok(ExitCode::FAILURE)
        },
    }
}
