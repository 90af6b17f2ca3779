use anyhow::Result;
use clap::Args;
use std::process::ExitCode;
use storefront::services::{validate, FieldKind, FieldSpec};

#[derive(Args)]
pub struct ValidateArgs {
    /// Value to check
    value: String,

    /// Field kind (text, email, tel, textarea, select)
    #[arg(long, default_value = "text")]
    kind: String,

    /// Field name used in messages
    #[arg(long, default_value = "field")]
    name: String,

    /// Human label used in the required message
    #[arg(long)]
    label: Option<String>,

    /// Treat empty input as invalid
    #[arg(long)]
    required: bool,

    /// Minimum trimmed length
    #[arg(long)]
    min_length: Option<usize>,
}

pub async fn execute(args: ValidateArgs) -> Result<ExitCode> {
    let kind: FieldKind = args.kind.parse()?;

    let mut spec = FieldSpec::new(args.name, kind);
    if args.required {
        spec = spec.required();
    }
    if let Some(label) = args.label {
        spec = spec.with_label(label);
    }
    if let Some(min_length) = args.min_length {
        spec = spec.with_min_length(min_length);
    }

    let result = validate(&spec, &args.value);
    match result.message {
        Some(message) => {
            println!("{}", message);
            Ok(ExitCode::FAILURE)
        }
        None => {
            println!("valid");
            Ok(ExitCode::SUCCESS)
        }
    }
}
